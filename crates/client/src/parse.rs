//! Entry page parsing.
//!
//! [`PageParser`] is the seam between raw entry page markup and the record
//! type callers work with. [`HeadwordParser`] is a minimal implementation
//! that only reads the headline.

use duden_core::Error;
use scraper::{Html, Selector};
use serde::Serialize;

use crate::search::clear_text;

/// Turns entry page markup into a word record.
pub trait PageParser: Send + Sync {
    type Record;

    /// Parse a full entry page. Unexpected structure is an error.
    fn parse(&self, html: &str) -> Result<Self::Record, Error>;
}

/// Headline of an entry page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordHeadword {
    /// Full headline, e.g. `Haus, das`
    pub title: String,
    /// Headline without the article, e.g. `Haus`
    pub name: String,
    /// Grammatical article for nouns
    pub article: Option<String>,
}

impl WordHeadword {
    fn from_title(title: String) -> Self {
        let (name, article) = match title.split_once(", ") {
            Some((name, rest)) if matches!(rest, "der" | "die" | "das") => (name.to_string(), Some(rest.to_string())),
            _ => (title.clone(), None),
        };
        Self { title, name, article }
    }
}

/// Reads the entry headline from `div.lemma h1`, falling back to the first `h1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadwordParser;

impl PageParser for HeadwordParser {
    type Record = WordHeadword;

    fn parse(&self, html: &str) -> Result<WordHeadword, Error> {
        let document = Html::parse_document(html);

        for css in ["div.lemma h1", "h1"] {
            let selector = Selector::parse(css).map_err(|e| Error::Parse(format!("invalid selector {css}: {e}")))?;
            if let Some(headline) = document.select(&selector).next() {
                let title = clear_text(&headline.text().collect::<String>());
                if !title.is_empty() {
                    return Ok(WordHeadword::from_title(title));
                }
            }
        }

        Err(Error::Parse("entry page has no headline".into()))
    }
}
