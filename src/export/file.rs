//! Output file naming and directory handling.

use super::types::ExportError;
use crate::config::ExportConfig;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Generates a filename from a template with chrono format specifiers.
///
/// `generate_filename("annotated_%Y-%m-%d", "pdf")` → `annotated_2026-10-17.pdf`.
pub fn generate_filename(template: &str, extension: &str) -> String {
    let now = Local::now();
    let stem = now.format(template).to_string();
    format!("{}.{}", stem, extension)
}

/// Ensures the directory exists, creating it if necessary.
///
/// Returns the canonicalized path when possible.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Expands a leading `~/` to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Full path of the PDF to write for the configured directory and template.
pub fn output_path(config: &ExportConfig) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(&expand_tilde(&config.directory))?;
    Ok(directory.join(generate_filename(&config.filename_template, "pdf")))
}
