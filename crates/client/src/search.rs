//! Turning search and autocomplete responses into entry identifiers.
//!
//! An entry identifier is the trailing path segment of an entry URL, e.g.
//! `Haus` for `/rechtschreibung/Haus`.

use duden_core::Error;
use scraper::{Html, Selector};
use serde::Deserialize;

/// One autocomplete suggestion. Only `value` is used.
#[derive(Debug, Deserialize)]
struct AutocompleteEntry {
    value: String,
}

/// Remove markup artifacts from scraped text.
///
/// Drops soft hyphens, collapses whitespace runs to one space and trims.
pub fn clear_text(text: &str) -> String {
    text.replace('\u{ad}', "").split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Alternative spellings listed in a search result label.
///
/// `"Laufen, laufen"` yields `["Laufen", "laufen"]`.
pub fn label_variants(label: &str) -> Vec<String> {
    clear_text(label).split(", ").map(str::to_string).collect()
}

/// Final `/`-separated segment of a URL or path.
pub fn last_path_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn selector(css: &str) -> Result<Selector, Error> {
    Selector::parse(css).map_err(|e| Error::Parse(format!("invalid selector {css}: {e}")))
}

/// Identifiers from an autocomplete JSON response, in response order.
pub fn autocomplete_identifiers(json: &str) -> Result<Vec<String>, Error> {
    let entries: Vec<AutocompleteEntry> =
        serde_json::from_str(json).map_err(|e| Error::Parse(format!("unexpected autocomplete response: {e}")))?;

    let identifiers: Vec<String> = entries
        .iter()
        .map(|entry| {
            let segment = last_path_segment(&entry.value);
            String::from_utf8_lossy(&urlencoding::decode_binary(segment.as_bytes())).into_owned()
        })
        .collect();

    tracing::debug!(count = identifiers.len(), "autocomplete identifiers");
    Ok(identifiers)
}

/// Identifiers from a scraped search result page, in page order.
///
/// Result entries are `h2.vignette__title` headings. With `exact` set, an
/// entry is kept only when `term` equals one of its label variants.
pub fn search_result_identifiers(html: &str, term: &str, exact: bool) -> Result<Vec<String>, Error> {
    let document = Html::parse_document(html);
    let title_selector = selector("h2.vignette__title")?;
    let link_selector = selector("a")?;

    let mut titles = document.select(&title_selector).peekable();
    if titles.peek().is_none() {
        tracing::debug!(term, "no search result entries");
        return Ok(Vec::new());
    }

    let mut identifiers = Vec::new();
    for title in titles {
        let label: String = title.text().collect();
        if exact && !label_variants(&label).iter().any(|variant| variant == term) {
            continue;
        }

        let href = title
            .select(&link_selector)
            .next()
            .and_then(|link| link.value().attr("href"))
            .ok_or_else(|| Error::Parse(format!("search result \"{}\" has no link", clear_text(&label))))?;

        identifiers.push(last_path_segment(href).to_string());
    }

    tracing::debug!(term, exact, count = identifiers.len(), "search result identifiers");
    Ok(identifiers)
}

/// Identifier of the word of the day linked from the home page.
pub fn word_of_the_day_identifier(html: &str) -> Result<String, Error> {
    let document = Html::parse_document(html);
    let link_selector = selector("a.scene__title-link")?;

    document
        .select(&link_selector)
        .next()
        .and_then(|link| link.value().attr("href"))
        .map(|href| last_path_segment(href).to_string())
        .ok_or_else(|| Error::Parse("home page has no word of the day link".into()))
}
