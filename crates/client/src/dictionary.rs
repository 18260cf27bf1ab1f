//! Cached word lookup and search.
//!
//! [`Dictionary`] layers the response cache over a [`DictionarySource`] and
//! hands entry pages to a [`PageParser`]. Every call runs its requests
//! sequentially.

use duden_core::{AppConfig, Error, Namespace, ResponseCache};

use crate::fetch::{DictionarySource, FetchClient, FetchConfig};
use crate::parse::{HeadwordParser, PageParser};
use crate::search::{autocomplete_identifiers, search_result_identifiers, word_of_the_day_identifier};

/// Options for [`Dictionary::search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Keep only results whose label matches the term. Ignored for autocomplete.
    pub exact: bool,
    /// Return entry identifiers instead of loading each entry.
    pub identifiers_only: bool,
    /// Read from and write to the response cache.
    pub use_cache: bool,
    /// Query the autocomplete API instead of scraping the search page.
    pub autocomplete: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { exact: true, identifiers_only: false, use_cache: true, autocomplete: false }
    }
}

/// Output of [`Dictionary::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResults<R> {
    /// Entry identifiers in upstream order.
    Identifiers(Vec<String>),
    /// One loaded record per identifier; `None` where the entry page is gone.
    Records(Vec<Option<R>>),
}

impl<R> SearchResults<R> {
    pub fn len(&self) -> usize {
        match self {
            SearchResults::Identifiers(ids) => ids.len(),
            SearchResults::Records(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Dictionary client with a write-through response cache.
pub struct Dictionary<S, P> {
    cache: ResponseCache,
    source: S,
    parser: P,
}

impl Dictionary<FetchClient, HeadwordParser> {
    /// Build an HTTP-backed dictionary from application configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let source = FetchClient::new(&FetchConfig::from(config))?;
        Ok(Self::new(ResponseCache::new(&config.cache_dir), source, HeadwordParser))
    }
}

impl<S, P> Dictionary<S, P>
where
    S: DictionarySource,
    P: PageParser,
{
    pub fn new(cache: ResponseCache, source: S, parser: P) -> Self {
        Self { cache, source, parser }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Load and parse the entry `identifier`.
    ///
    /// Returns `Ok(None)` when the entry page does not exist.
    pub async fn load(&self, identifier: &str, use_cache: bool) -> Result<Option<P::Record>, Error> {
        let page = self
            .cache
            .cached_fetch(identifier, Namespace::Word, use_cache, || self.source.word_page(identifier))
            .await
            .into_result()?;

        match page {
            Some(html) => self.parser.parse(&html).map(Some),
            None => {
                tracing::debug!(identifier, "entry not found");
                Ok(None)
            }
        }
    }

    /// Search for `term` and return identifiers or loaded records.
    pub async fn search(&self, term: &str, options: &SearchOptions) -> Result<SearchResults<P::Record>, Error> {
        let identifiers = self.search_identifiers(term, options).await?;

        if options.identifiers_only {
            return Ok(SearchResults::Identifiers(identifiers));
        }

        let mut records = Vec::with_capacity(identifiers.len());
        for identifier in &identifiers {
            records.push(self.load(identifier, options.use_cache).await?);
        }
        Ok(SearchResults::Records(records))
    }

    /// Entry identifiers matching `term`. `options.identifiers_only` is ignored.
    pub async fn search_identifiers(&self, term: &str, options: &SearchOptions) -> Result<Vec<String>, Error> {
        if options.autocomplete {
            let response = self
                .cache
                .cached_fetch(term, Namespace::Autocomplete, options.use_cache, || self.source.autocomplete(term))
                .await
                .into_result()?;

            return match response {
                Some(json) => autocomplete_identifiers(&json),
                None => Ok(Vec::new()),
            };
        }

        let html = self
            .cache
            .cached_fetch(term, Namespace::Search, options.use_cache, || self.source.search_page(term))
            .await
            .into_result()?
            .unwrap_or_default();

        search_result_identifiers(&html, term, options.exact)
    }

    /// Load today's featured word from the home page.
    ///
    /// The home page itself is never cached. The entry page follows `use_cache`.
    pub async fn word_of_the_day(&self, use_cache: bool) -> Result<Option<P::Record>, Error> {
        let html = self.source.home_page().await.into_result()?.unwrap_or_default();
        let identifier = word_of_the_day_identifier(&html)?;
        tracing::debug!(identifier = %identifier, "word of the day");
        self.load(&identifier, use_cache).await
    }
}
