//! Formatting helpers for human-readable sizes and percentages.

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const SIZE_BASE: f64 = 1024.0;

/// Humanize a byte count using 1024-based units.
///
/// The value is rounded to two decimals and trailing zeros are dropped, so
/// `1536` renders as `1.5 KB` and `52428800` as `50 MB`. Anything beyond the
/// gigabyte range stays expressed in GB.
pub(crate) fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= SIZE_BASE && unit < SIZE_UNITS.len() - 1 {
        value /= SIZE_BASE;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", SIZE_UNITS[unit])
}

/// Render a fraction in `[0, 1]` as a percentage with a fixed number of decimals.
pub(crate) fn format_percent(fraction: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, fraction * 100.0)
}
