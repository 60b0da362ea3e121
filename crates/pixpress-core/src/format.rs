//! Human-readable byte-count formatting for display.

const FACTOR: f64 = 1024.0;
const UNITS: [&str; 8] = ["", "K", "M", "G", "T", "P", "E", "Z"];

/// Format a byte count using binary (1024-based) unit steps with two
/// decimal places, e.g. `2048` -> `"2.00KB"`.
///
/// Stops at the first unit where the scaled value drops below 1024 and
/// falls back to `YB` for anything larger.
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in UNITS {
        if value < FACTOR {
            return format!("{value:.2}{unit}B");
        }
        value /= FACTOR;
    }
    format!("{value:.2}YB")
}
