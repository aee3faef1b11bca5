//! Common utilities for the Marten HTML front end.
//!
//! This crate provides shared infrastructure used by the tokenizer and its
//! callers:
//! - **Warning System** - colored, deduplicated terminal diagnostics
//! - **Loader** - an owned network session for retrieving markup

/// Document retrieval over the network.
pub mod loader;
/// Deduplicated diagnostic output.
pub mod warning;

pub use loader::{LoaderError, Session, is_fetchable_url};
