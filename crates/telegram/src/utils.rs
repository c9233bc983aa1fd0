//! Utility functions for formatting

use crate::constants::FALLBACK_USER_NAME;

/// Format file size in human-readable format
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;
    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_index])
}

/// Name used to greet the sender, from their optional first name
pub fn display_name(first_name: Option<&str>) -> String {
    first_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_USER_NAME)
        .to_string()
}

/// Pluralize a count: `plural(1, "torrent")` gives `"1 torrent"`
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
