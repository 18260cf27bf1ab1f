//! Filesystem-safe cache key generation.

/// Sanitize an arbitrary lookup key for use as a cache filename.
///
/// ASCII letters and `_` are kept unchanged. Every other character is
/// replaced with `-u<codepoint>-`, the decimal code point wrapped in hyphens.
/// Preserved characters never include `-`, so the encoding is injective.
pub fn sanitize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        if c.is_ascii_alphabetic() || c == '_' {
            out.push(c);
        } else {
            out.push_str("-u");
            out.push_str(&u32::from(c).to_string());
            out.push('-');
        }
    }
    out
}
