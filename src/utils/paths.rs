use std::borrow::Cow;
use std::env;
use std::fs::File;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, bail};

// Maximum size for a single export JSON file: 64MB
const MAX_FILE_SIZE_BYTES: u64 = 64 * 1024 * 1024;

/// Normalizes an exporter `local_path` to forward slashes
///
/// The exporter may run on Windows and write `media\photos\1.jpg`.
///
/// # Examples
///
/// ```
/// use lastseen::utils::normalize_separators;
///
/// assert_eq!(normalize_separators("media\\photos\\1.jpg"), "media/photos/1.jpg");
/// ```
pub fn normalize_separators(local_path: &str) -> String {
    local_path.replace('\\', "/")
}

/// Resolves an attachment `local_path` against the directory one level above the export
///
/// The export is viewed from `<root>/export`, and attachments live under `<root>`.
///
/// # Errors
///
/// Returns an error if:
/// - The path is empty
/// - The path is absolute
/// - The path contains '..' components (path traversal)
pub fn resolve_attachment_path(export_dir: &Path, local_path: &str) -> Result<PathBuf> {
    let normalized = normalize_separators(local_path.trim());
    if normalized.is_empty() {
        bail!("Attachment path is empty");
    }

    let relative = Path::new(&normalized);
    if relative.is_absolute() || normalized.starts_with('/') {
        bail!("Attachment path must be relative: {}", normalized);
    }

    for component in relative.components() {
        if component == Component::ParentDir {
            bail!("Attachment path contains '..' component: {}", normalized);
        }
    }

    let base = export_dir.parent().unwrap_or_else(|| Path::new(""));
    Ok(base.join(relative))
}

/// Validates that a file's size is within acceptable limits (64MB)
///
/// Takes an open file handle to avoid TOCTOU (time-of-check-time-of-use)
/// race conditions where the file could be modified between the size check
/// and subsequent file operations.
///
/// # Errors
///
/// Returns an error if:
/// - The file metadata cannot be read
/// - The file is larger than 64MB
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > MAX_FILE_SIZE_BYTES {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            file_size,
            MAX_FILE_SIZE_BYTES
        );
    }

    Ok(())
}

/// Formats a path with ~ substitution for the home directory
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use lastseen::utils::format_path_with_tilde;
///
/// let path = PathBuf::from("/Users/alice/Documents");
/// // Returns "~/Documents" if HOME=/Users/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && path_str.starts_with(home)
    {
        return path_str.replacen(home, "~", 1);
    }

    match path_str {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
