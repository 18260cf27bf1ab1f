//! Fetch outcomes and cache namespaces.

use crate::Error;

/// Result of a single fetch, live or cached.
///
/// `Absent` means the resource was confirmed missing upstream and is distinct
/// from `Failed`. Only `Present` content is ever written to the cache.
#[derive(Debug)]
pub enum FetchOutcome {
    Present(String),
    Absent,
    Failed(Error),
}

impl FetchOutcome {
    pub fn is_present(&self) -> bool {
        matches!(self, FetchOutcome::Present(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FetchOutcome::Absent)
    }

    /// Convert into a `Result` so callers can propagate failures with `?`.
    pub fn into_result(self) -> Result<Option<String>, Error> {
        match self {
            FetchOutcome::Present(text) => Ok(Some(text)),
            FetchOutcome::Absent => Ok(None),
            FetchOutcome::Failed(err) => Err(err),
        }
    }
}

/// Key namespace of a cached fetch kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Word entry pages.
    Word,
    /// Scraped search result pages.
    Search,
    /// Autocomplete JSON responses.
    Autocomplete,
}

impl Namespace {
    /// Filename prefix for entries in this namespace.
    pub fn prefix(self) -> &'static str {
        match self {
            Namespace::Word => "",
            Namespace::Search => "search-",
            Namespace::Autocomplete => "autocomplete-",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(Namespace::Word.prefix(), "");
        assert_eq!(Namespace::Search.prefix(), "search-");
        assert_eq!(Namespace::Autocomplete.prefix(), "autocomplete-");
    }

    #[test]
    fn test_into_result() {
        assert_eq!(FetchOutcome::Present("x".into()).into_result().unwrap(), Some("x".to_string()));
        assert_eq!(FetchOutcome::Absent.into_result().unwrap(), None);
        assert!(matches!(FetchOutcome::Failed(Error::Parse("bad".into())).into_result(), Err(Error::Parse(_))));
    }
}
