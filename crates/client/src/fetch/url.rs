//! Dictionary endpoint URLs built from a configurable base URL.

use url::Url;

/// Error type for base URL parsing failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Canonicalize the dictionary base URL.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Default scheme to https:// if missing
/// 3. Lowercase the host
/// 4. Remove query and fragment
pub fn canonicalize_base(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let url_str = if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };

    let mut parsed = Url::parse(&url_str).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if let Some(host) = parsed.host_str() {
        let host = host.to_lowercase();
        parsed
            .set_host(Some(&host))
            .map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    }

    parsed.set_query(None);
    parsed.set_fragment(None);

    Ok(parsed)
}

/// URL templates of the dictionary site.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self, UrlError> {
        Ok(Self { base: canonicalize_base(base_url)? })
    }

    /// Site home page, which carries the word of the day.
    pub fn home(&self) -> Url {
        self.base.clone()
    }

    /// Entry page: `{base}/rechtschreibung/{word}`.
    ///
    /// Identifiers taken from links may already be percent-encoded, so the
    /// word is decoded before being pushed as a path segment.
    pub fn word(&self, word: &str) -> Url {
        let decoded = String::from_utf8_lossy(&urlencoding::decode_binary(word.as_bytes())).into_owned();
        self.with_segments(&["rechtschreibung", &decoded])
    }

    /// Search page: `{base}/suchen/dudenonline/{term}`.
    pub fn search(&self, term: &str) -> Url {
        self.with_segments(&["suchen", "dudenonline", term])
    }

    /// Autocomplete API endpoint for `term`.
    pub fn autocomplete(&self, term: &str) -> Url {
        let mut url = self.with_segments(&["search_api_autocomplete", "dictionary_search"]);
        url.query_pairs_mut()
            .append_pair("display", "page_1")
            .append_pair("filter", "search_api_fulltext")
            .append_pair("q", term)
            .append_pair("scope", "dictionary");
        url
    }

    fn with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // http(s) URLs always have a path, so this never fails after canonicalize_base
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
