// src/gui/actions/mod.rs
//
// Folder module facade: re-export public entrypoints.
// Submodules stay private; consumers only see actions::{copy,export,scrape}.

mod copy;    // src/gui/actions/copy.rs
mod export;  // src/gui/actions/export.rs
mod scrape;  // src/gui/actions/scrape.rs

pub use copy::copy;
pub use export::export;
pub use scrape::{cancel_scrape, poll_scrape, start_scrape};

use crate::{gui::app::App, post::ResultSet};

/// Records of the last finished run, if it produced any.
#[inline]
pub(super) fn current_records(app: &App) -> Option<&ResultSet> {
    app.report
        .as_ref()
        .map(|r| &r.records)
        .filter(|records| !records.is_empty())
}
