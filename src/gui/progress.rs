// src/gui/progress.rs
use std::sync::{Arc, Mutex, MutexGuard};

use eframe::egui;

use crate::{
    fetch::FetchError,
    progress::{fraction, Progress},
};

/// Live run status shared between the scrape thread and the UI thread.
#[derive(Clone, Debug, Default)]
pub struct RunStatus {
    /// Human-readable status line ("Scraping @alice...", "Done!")
    pub line: String,
    pub done: usize,
    pub total: usize,
    /// One line per failed user, in completion order
    pub errors: Vec<String>,
    /// Neutral notes (malformed items skipped, ...)
    pub notes: Vec<String>,
}

impl RunStatus {
    pub fn idle() -> Self {
        Self { line: s!("Idle"), ..Self::default() }
    }

    pub fn fraction(&self) -> f32 {
        if self.total == 0 { 0.0 } else { fraction(self.done, self.total) }
    }
}

pub type SharedStatus = Arc<Mutex<RunStatus>>;

/// Lock the shared status, recovering from a poisoned lock (a panicking
/// scrape thread must not take the UI down with it).
pub fn lock(status: &SharedStatus) -> MutexGuard<'_, RunStatus> {
    status.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct GuiProgress {
    status: SharedStatus,
    ctx: egui::Context,
}

impl GuiProgress {
    pub fn new(status: SharedStatus, ctx: egui::Context) -> Self {
        Self { status, ctx }
    }

    fn update(&self, f: impl FnOnce(&mut RunStatus)) {
        f(&mut lock(&self.status));
        self.ctx.request_repaint();
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: usize) {
        self.update(|s| {
            *s = RunStatus { line: s!("Starting..."), total, ..RunStatus::default() };
        });
    }

    fn log(&mut self, msg: &str) {
        self.update(|s| s.line = s!(msg));
    }

    fn user_done(&mut self, username: &str, _kept: usize, skipped: usize, done: usize, total: usize) {
        self.update(|s| {
            s.done = done;
            s.total = total;
            if skipped > 0 {
                s.notes.push(format!("@{username}: {skipped} malformed item(s) skipped"));
            }
        });
    }

    fn user_failed(&mut self, username: &str, error: &FetchError, done: usize, total: usize) {
        self.update(|s| {
            s.done = done;
            s.total = total;
            s.errors.push(format!("Error for @{username}: {error}"));
        });
    }

    fn finish(&mut self) {
        self.update(|s| s.line = s!("Done!"));
    }
}
