//! Core types and shared functionality for duden.
//!
//! This crate provides:
//! - On-disk response cache with gzip-compressed entries
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{FetchOutcome, Namespace, ResponseCache};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
