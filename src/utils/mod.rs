//! Small helpers shared across modules.

use std::path::Path;

/// Normalise a configured extension to its bare lowercase form.
///
/// Accepts both `".PNG"` and `"png"` and returns `"png"`.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// Check whether a path's extension is in the (normalised) allow-list.
///
/// The comparison is case-insensitive. Paths without an extension never match.
pub fn has_allowed_extension(path: &Path, allowed: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| allowed.iter().any(|a| *a == e))
}

/// Format file size as human-readable string.
///
/// # Arguments
///
/// * `size` - File size in bytes
///
/// # Returns
///
/// Formatted string like "1.5 MB" or "234 KB"
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
