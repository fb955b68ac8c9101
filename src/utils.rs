// Utility functions
use chrono::{DateTime, Local};

/// Share of `part` in `total` as a percentage with one decimal.
pub fn percent_of(part: u64, total: u64) -> String {
    if total == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", part as f64 / total as f64 * 100.0)
}

pub fn format_money(value: f64) -> String {
    format!("${:.2}", value)
}

pub fn format_clock(at: DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}
