// src/config/settings.rs
//
// Optional `config/settings.toml`:
//
//     usernames = ["zuck", "mosseri"]
//     limit = 10
//     out_dir = "output"
//     workers = 1
//
// Every key is optional and a missing file is the same as an empty one.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub usernames: Vec<String>,
    pub limit: Option<usize>,
    pub out_dir: Option<PathBuf>,
    pub workers: Option<usize>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid settings file {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Load settings from `path`. A missing file is not an error.
pub fn load(path: &Path) -> Result<Settings, SettingsError> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            logd!("Settings: {} not found, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(source) => return Err(SettingsError::Read { path: path.to_path_buf(), source }),
    };

    let settings = Settings::from_toml(&text)
        .map_err(|source| SettingsError::Parse { path: path.to_path_buf(), source })?;

    logf!(
        "Settings: Loaded {} (usernames={})",
        path.display(),
        settings.usernames.len()
    );
    Ok(settings)
}

/// Like [`load`], but a broken file is logged and replaced by defaults.
/// The GUI uses this so a typo in the settings never blocks startup; the CLI
/// calls [`load`] and reports the error instead.
pub fn load_or_default(path: &Path) -> Settings {
    match load(path) {
        Ok(s) => s,
        Err(e) => {
            loge!("Settings: {e}");
            Settings::default()
        }
    }
}
