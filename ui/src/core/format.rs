//! Formatting helpers for presenting dashboard values.

use time::{macros::format_description, OffsetDateTime};

/// Wall-clock label for "last updated" stamps, e.g. `14:03:27 UTC`.
pub fn format_clock(at: OffsetDateTime) -> String {
    at.format(&format_description!("[hour]:[minute]:[second] UTC"))
        .unwrap_or_else(|_| "—".to_string())
}

/// CSS pixel length with two decimals, trailing zeros kept short.
pub fn format_px(value: f64) -> String {
    if !value.is_finite() {
        return "0px".to_string();
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded}px")
}

/// CSS percentage for progress fills, clamped to `0..=100`.
pub fn format_percent_width(value: f64) -> String {
    let clamped = if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    };
    format!("{clamped}%")
}
