// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;

pub mod export;
pub mod fetch;
pub mod file;
pub mod gui;
pub mod parse;
pub mod post;
pub mod progress;
pub mod scrape;

pub use export::{ExportArtifact, ExportError, ExportFormat, Exporter};
pub use fetch::{FetchError, Fetcher, MockFetcher};
pub use parse::{Parser, PostParser};
pub use post::{Post, RawItem, ResultSet};
pub use progress::{NullProgress, Progress};
pub use scrape::{InputError, RunOutcome, ScrapeReport, Scraper, UserOutcome, UserStatus};
