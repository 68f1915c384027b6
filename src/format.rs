// Human-readable byte counts for log messages

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Scale `bytes` by 1024 until it drops below 1024 or reaches TB, then render with two decimals.
///
/// `format_bytes(1023) == "1023.00 B"`, `format_bytes(1024) == "1.00 KB"`. Values past TB stay in TB.
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}
