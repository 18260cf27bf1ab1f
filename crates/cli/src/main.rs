//! duden command line entry point.
//!
//! A thin wrapper over `duden_client::Dictionary` that prints results as JSON.
//! Logging goes to stderr so stdout stays machine-readable.

use anyhow::{Context, Result, bail};
use clap::Parser;
use duden_client::{Dictionary, SearchOptions, SearchResults};
use duden_core::AppConfig;
use tracing_subscriber::EnvFilter;

/// Look up words on duden.de.
#[derive(Debug, Parser)]
#[command(name = "duden", version)]
struct Cli {
    /// Entry identifier to load, e.g. `Haus`.
    #[arg(required_unless_present_any = ["search", "word_of_the_day"])]
    word: Option<String>,

    /// Search for a term instead of loading an entry.
    #[arg(long, value_name = "TERM", conflicts_with = "word")]
    search: Option<String>,

    /// Keep search results whose label does not exactly match the term.
    #[arg(long, requires = "search")]
    inexact: bool,

    /// Use the autocomplete API for the search.
    #[arg(long, requires = "search")]
    autocomplete: bool,

    /// Print entry identifiers instead of loading every search result.
    #[arg(long, requires = "search")]
    ids: bool,

    /// Load the word of the day.
    #[arg(long, conflicts_with_all = ["word", "search"])]
    word_of_the_day: bool,

    /// Neither read nor write the response cache.
    #[arg(long)]
    no_cache: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("failed to load configuration")?;
    let use_cache = config.use_cache && !cli.no_cache;

    tracing::debug!(cache_dir = %config.cache_dir.display(), use_cache, "starting duden");

    let dictionary = Dictionary::from_config(&config)?;

    if cli.word_of_the_day {
        let word = dictionary.word_of_the_day(use_cache).await?;
        println!("{}", serde_json::to_string_pretty(&word)?);
        return Ok(());
    }

    if let Some(term) = cli.search.as_deref() {
        let options = SearchOptions {
            exact: !cli.inexact,
            identifiers_only: cli.ids,
            use_cache,
            autocomplete: cli.autocomplete,
        };
        let output = match dictionary.search(term, &options).await? {
            SearchResults::Identifiers(ids) => serde_json::to_string_pretty(&ids)?,
            SearchResults::Records(records) => serde_json::to_string_pretty(&records)?,
        };
        println!("{output}");
        return Ok(());
    }

    let Some(word) = cli.word.as_deref() else { bail!("no word given") };
    match dictionary.load(word, use_cache).await? {
        Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
        None => bail!("word not found: {word}"),
    }

    Ok(())
}
