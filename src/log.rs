// src/log.rs
//
// Append-only debug log shared by the GUI, the CLI and the scrape pipeline.
// Lines look like `[00:00:01.250][INFO] Scrape: Begin users=2 limit=10`,
// where the timestamp is the time elapsed since the first log call.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use crate::config::consts::DEFAULT_LOG_FILE;

static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();
static LOG_LOCK: Mutex<()> = Mutex::new(());
static START: OnceLock<Instant> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

/// Point the logger at `path`. Only the first call wins; later calls
/// (and every `write_log` before the first call) use whatever is set.
pub fn init(path: impl Into<PathBuf>) -> bool {
    LOG_PATH.set(path.into()).is_ok()
}

pub fn log_path() -> &'static Path {
    LOG_PATH.get_or_init(default_log_path)
}

// Unit tests log into the temp dir, never into the working tree.
fn default_log_path() -> PathBuf {
    if cfg!(test) {
        std::env::temp_dir().join("threads_scrape_unit.log")
    } else {
        PathBuf::from(DEFAULT_LOG_FILE)
    }
}

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

fn format_line(elapsed_ms: u128, level: &str, msg: &str) -> String {
    format!("[{}][{level}] {msg}\n", fmt_elapsed(elapsed_ms))
}

/// Internal logging function. Never fails; a log line that cannot be
/// written is dropped.
pub fn write_log(level: &str, msg: &str) {
    let line = format_line(start().elapsed().as_millis(), level, msg);
    let path = log_path();

    let Ok(_guard) = LOG_LOCK.lock() else { return };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            let _ = fs::create_dir_all(parent);
        }
    }
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = file.write_all(line.as_bytes());
    }
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::write_log("INFO", &format!($($arg)*))
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::write_log("DEBUG", &format!($($arg)*))
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::write_log("ERROR", &format!($($arg)*))
    };
}
