//! Client code for duden.
//!
//! This crate provides the HTTP fetchers, search result disambiguation,
//! entry page parsing and the cached [`Dictionary`] facade used by the CLI.

pub mod dictionary;
pub mod fetch;
pub mod parse;
pub mod search;

pub use dictionary::{Dictionary, SearchOptions, SearchResults};
pub use fetch::{DictionarySource, Endpoints, FetchClient, FetchConfig, HttpResponse};
pub use parse::{HeadwordParser, PageParser, WordHeadword};
pub use search::{autocomplete_identifiers, clear_text, search_result_identifiers, word_of_the_day_identifier};
