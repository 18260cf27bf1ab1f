//! Gzip-compressed on-disk cache for raw dictionary responses.
//!
//! This module provides a write-through response cache keyed by a
//! namespace and a sanitized lookup key. It supports:
//!
//! - Filesystem-safe, injective key sanitization
//! - Transparent wrapping of any single-key fetch operation
//! - Corrupt or missing entries treated as plain misses
//!
//! Entries are never expired or evicted.

pub mod key;
pub mod outcome;
pub mod store;

pub use crate::Error;

pub use key::sanitize_key;
pub use outcome::{FetchOutcome, Namespace};
pub use store::ResponseCache;
