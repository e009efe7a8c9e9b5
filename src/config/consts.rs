// src/config/consts.rs

pub const APP_TITLE: &str = "Threads Scraper";

// Settings file (optional)
pub const DEFAULT_SETTINGS_PATH: &str = "config/settings.toml";

// Logging
pub const DEFAULT_LOG_FILE: &str = "logs/threads_scrape.log";

// Scrape
pub const DEFAULT_LIMIT: usize = 10;
pub const MOCK_CAP: usize = 5;

// Export
pub const DEFAULT_OUT_DIR: &str = "output";
pub const EXPORT_STEM: &str = "threads_data";

// Concurrency
pub const DEFAULT_WORKERS: usize = 1;
pub const MAX_WORKERS: usize = 8;
