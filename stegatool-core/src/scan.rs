//! Input enumeration and output naming.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, StegaError};

/// Literal, case-sensitive file name suffixes both flows accept.
pub const RECOGNIZED_EXTENSIONS: [&str; 2] = [".jpg", ".png"];

/// An eligible image found in a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedImage {
    pub path: PathBuf,
    pub file_name: String,
}

pub fn is_recognized(file_name: &str) -> bool {
    RECOGNIZED_EXTENSIONS
        .iter()
        .any(|ext| file_name.ends_with(ext))
}

/// List recognized image files directly inside `dir`, sorted by file name.
///
/// Subdirectories, non-UTF-8 names and unrecognized files are skipped
/// without a warning.
pub fn scan_images(dir: &Path) -> Result<Vec<ScannedImage>> {
    let entries = fs::read_dir(dir).map_err(|e| StegaError::read(dir, e))?;

    let mut images = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| StegaError::read(dir, e))?;
        let Ok(file_name) = entry.file_name().into_string() else {
            continue;
        };
        if !is_recognized(&file_name) {
            continue;
        }
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        images.push(ScannedImage { path, file_name });
    }

    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    debug!(dir = %dir.display(), images = images.len(), "Scanned input directory");
    Ok(images)
}

/// Split a file name into base name and extension at the last `.`.
///
/// Leading dots do not start an extension, so `.png` has no extension.
pub fn split_name(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(dot) if file_name[..dot].chars().any(|c| c != '.') => file_name.split_at(dot),
        _ => (file_name, ""),
    }
}

/// Output file name for one recipient: `{stem}_{name}{ext}`.
pub fn output_file_name(file_name: &str, recipient: &str) -> String {
    let (stem, ext) = split_name(file_name);
    format!("{stem}_{recipient}{ext}")
}
