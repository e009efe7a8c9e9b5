// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::export::{ExportArtifact, ExportError};

/// Save rendered artifacts into `dir` (created if missing), overwriting
/// earlier exports of the same name. Returns the paths written, in order.
pub fn write_artifacts(dir: &Path, artifacts: &[ExportArtifact]) -> Result<Vec<PathBuf>, ExportError> {
    if artifacts.is_empty() {
        return Ok(Vec::new());
    }
    ensure_directory(dir)?;

    let mut written = Vec::with_capacity(artifacts.len());
    for art in artifacts {
        let path = dir.join(&art.file_name);
        fs::write(&path, &art.bytes)?;
        logf!("Export: Wrote {} ({} bytes, {})", path.display(), art.bytes.len(), art.mime);
        written.push(path);
    }
    Ok(written)
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}

pub fn ensure_directory(dir: &Path) -> std::io::Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    if dir.exists() && !dir.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Find the nearest existing parent folder by walking up the directory tree.
pub fn find_nearest_existing_parent(path: &Path) -> PathBuf {
    let mut current = path.to_path_buf();
    loop {
        if current.is_dir() {
            return current;
        }
        match current.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => current = parent.to_path_buf(),
            _ => return PathBuf::from("."),
        }
    }
}

/// Cross-platform: open a folder in the system file explorer.
pub fn open_folder_in_explorer(path: &Path) -> Result<(), String> {
    #[cfg(target_os = "windows")]
    let program = "explorer";
    #[cfg(target_os = "macos")]
    let program = "open";
    #[cfg(target_os = "linux")]
    let program = "xdg-open";

    #[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
    {
        std::process::Command::new(program)
            .arg(path)
            .spawn()
            .map(|_| ())
            .map_err(|e| format!("Failed to spawn {program}: {e}"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        let _ = path;
        Err(s!("Opening folders not supported on this platform"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_become_native() {
        let sep = std::path::MAIN_SEPARATOR;
        assert_eq!(normalize_separators("a/b\\c"), format!("a{sep}b{sep}c"));
    }

    #[test]
    fn nearest_parent_falls_back_to_cwd() {
        let p = Path::new("definitely/not/here/threads_data.csv");
        assert_eq!(find_nearest_existing_parent(p), PathBuf::from("."));
    }
}
