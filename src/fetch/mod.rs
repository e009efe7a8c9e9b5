// src/fetch/mod.rs
//! # Fetchers
//!
//! A fetcher is the only part of the pipeline that talks to the outside
//! world: given one username and a result limit it returns that user's raw
//! items, newest first or in whatever order the source provides. The
//! orchestrator never reorders what a fetcher returns.
//!
//! Fetchers are shared across worker threads, so they must be `Send + Sync`
//! and must not carry per-user mutable state between calls.
//!
//! Shipped implementations:
//! - [`MockFetcher`] – deterministic-shape synthetic posts with random
//!   engagement counters. Never fails.

mod mock;

pub use mock::MockFetcher;

use thiserror::Error;

use crate::post::RawItem;

/// Why one user's fetch failed. Contained at user granularity by the
/// orchestrator; never aborts a run.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("rate limited{}", retry_suffix(.retry_after_secs))]
    RateLimited { retry_after_secs: Option<u64> },
    #[error("user not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Other(String),
}

fn retry_suffix(secs: &Option<u64>) -> String {
    match secs {
        Some(s) => format!(" (retry after {s}s)"),
        None => String::new(),
    }
}

pub trait Fetcher: Send + Sync {
    /// Short label for logs ("mock", "playwright", ...).
    fn name(&self) -> &str;

    /// Raw items for `username`, at most `limit` of them.
    fn fetch(&self, username: &str, limit: usize) -> Result<Vec<RawItem>, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for Box<F> {
    fn name(&self) -> &str { (**self).name() }
    fn fetch(&self, username: &str, limit: usize) -> Result<Vec<RawItem>, FetchError> {
        (**self).fetch(username, limit)
    }
}

impl<F: Fetcher + ?Sized> Fetcher for std::sync::Arc<F> {
    fn name(&self) -> &str { (**self).name() }
    fn fetch(&self, username: &str, limit: usize) -> Result<Vec<RawItem>, FetchError> {
        (**self).fetch(username, limit)
    }
}
