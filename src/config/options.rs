// src/config/options.rs
use std::path::{Path, PathBuf};

use super::consts::*;
use super::settings::Settings;
use crate::export::ExportFormat;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

impl AppOptions {
    /// Effective options: crate defaults overridden by whatever the
    /// settings file provides.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut opts = Self::default();
        opts.scrape.usernames = settings.usernames.clone();
        if let Some(limit) = settings.limit {
            opts.scrape.set_limit(limit);
        }
        if let Some(workers) = settings.workers {
            opts.scrape.set_workers(workers);
        }
        if let Some(dir) = &settings.out_dir {
            opts.export.out_dir = dir.clone();
        }
        opts
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub usernames: Vec<String>,
    limit: usize,
    workers: usize,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            usernames: Vec::new(),
            limit: DEFAULT_LIMIT,
            workers: DEFAULT_WORKERS,
        }
    }
}

impl ScrapeOptions {
    pub fn limit(&self) -> usize { self.limit }
    pub fn workers(&self) -> usize { self.workers }

    /// Clamped to at least 1, like the GUI's number field.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
    }

    pub fn set_workers(&mut self, workers: usize) {
        self.workers = workers.clamp(1, MAX_WORKERS);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    pub formats: Vec<ExportFormat>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            formats: vec![ExportFormat::Csv, ExportFormat::Json],
        }
    }
}

impl ExportOptions {
    pub fn out_dir(&self) -> &Path { &self.out_dir }

    pub fn out_path(&self, format: ExportFormat) -> PathBuf {
        self.out_dir.join(format.file_name())
    }

    /// Parse GUI text into the output directory. Blank text resets to default.
    pub fn set_out_dir(&mut self, text: &str) {
        let s = text.trim();
        self.out_dir = if s.is_empty() {
            PathBuf::from(DEFAULT_OUT_DIR)
        } else {
            PathBuf::from(crate::file::normalize_separators(s))
        };
    }
}
