//! Small charts drawn inside the metric cards: a sparkline of the transaction
//! history, the API uptime progress bar and the revenue mix bar chart.
//!
//! The height math is pure and unit-tested; the patch builders turn it into
//! markup for one part of a keyed card.

use api::{BreakdownSlice, HealthState};
use dioxus::prelude::*;

use crate::core::format::{format_percent_width, format_px};

use super::markup::html;
use super::patch::Patch;

pub const DEFAULT_MAX_HEIGHT: f64 = 40.0;

/// Bar heights for a sparkline, normalised to the series range. A flat
/// series has a range of 1, so every bar sits at zero.
pub fn sparkline_heights(values: &[f64], max_height: f64) -> Vec<f64> {
    let Some(max) = values.iter().copied().reduce(f64::max) else {
        return Vec::new();
    };
    let min = values.iter().copied().fold(max, f64::min);
    let range = if max - min == 0.0 { 1.0 } else { max - min };
    values
        .iter()
        .map(|value| (value - min) / range * max_height)
        .collect()
}

/// Bar heights proportional to the largest value. An all-zero (or
/// non-positive) set yields zero heights.
pub fn bar_heights(values: &[f64], max_height: f64) -> Vec<f64> {
    let max = values.iter().copied().fold(0.0, f64::max);
    if max <= 0.0 {
        return vec![0.0; values.len()];
    }
    values
        .iter()
        .map(|value| value / max * max_height)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressFill {
    pub width: String,
    pub class: String,
}

pub fn progress(value: f64, state: HealthState) -> ProgressFill {
    ProgressFill {
        width: format_percent_width(value),
        class: format!("progress-bar-fill {}", state.css_class()),
    }
}

pub fn sparkline_markup(values: &[f64], max_height: f64) -> String {
    let styles = sparkline_heights(values, max_height)
        .into_iter()
        .map(|height| format!("height: {};", format_px(height)));
    html(rsx! {
        for (index, style) in styles.enumerate() {
            div { key: "{index}", class: "sparkline-bar", style: "{style}" }
        }
    })
}

pub fn bar_chart_markup(slices: &[BreakdownSlice], max_height: f64) -> String {
    let values: Vec<f64> = slices.iter().map(|slice| slice.value).collect();
    let bars = slices
        .iter()
        .zip(bar_heights(&values, max_height))
        .map(|(slice, height)| {
            (
                slice.label.clone(),
                format!(
                    "height: {}; background-color: {};",
                    format_px(height),
                    slice.color
                ),
            )
        });
    html(rsx! {
        for (label, style) in bars {
            div {
                key: "{label}",
                class: "bar-chart-item",
                "data-label": "{label}",
                style: "{style}",
            }
        }
    })
}

/// Redraw the sparkline in `key`'s `sparkline-chart` part. Empty series leave
/// the chart untouched.
pub fn sparkline_patch(key: &str, values: &[f64]) -> Option<Patch> {
    (!values.is_empty()).then(|| Patch::SetMarkup {
        key: key.to_string(),
        part: "sparkline-chart",
        markup: sparkline_markup(values, DEFAULT_MAX_HEIGHT),
    })
}

pub fn bar_chart_patch(key: &str, slices: &[BreakdownSlice]) -> Option<Patch> {
    (!slices.is_empty()).then(|| Patch::SetMarkup {
        key: key.to_string(),
        part: "bar-chart",
        markup: bar_chart_markup(slices, DEFAULT_MAX_HEIGHT),
    })
}

pub fn progress_patches(key: &str, value: f64, state: HealthState) -> Vec<Patch> {
    let fill = progress(value, state);
    vec![
        Patch::SetStyle {
            key: key.to_string(),
            part: "progress-bar-fill",
            property: "width",
            value: fill.width,
        },
        Patch::SetClass {
            key: key.to_string(),
            part: "progress-bar-fill",
            class: fill.class,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_sparkline_is_all_zero() {
        assert_eq!(sparkline_heights(&[5.0, 5.0, 5.0], 40.0), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn sparkline_spans_full_height() {
        let heights = sparkline_heights(&[10.0, 20.0, 15.0], 40.0);
        assert_eq!(heights, vec![0.0, 40.0, 20.0]);
        assert!(sparkline_heights(&[], 40.0).is_empty());
    }

    #[test]
    fn bar_heights_are_relative_to_max() {
        let heights = bar_heights(&[10.0, 20.0, 5.0], DEFAULT_MAX_HEIGHT);
        let ratios: Vec<f64> = heights.iter().map(|h| h / DEFAULT_MAX_HEIGHT).collect();
        assert_eq!(ratios, vec![0.5, 1.0, 0.25]);
    }

    #[test]
    fn zero_bars_do_not_divide_by_zero() {
        assert_eq!(bar_heights(&[0.0, 0.0], 40.0), vec![0.0, 0.0]);
        assert!(bar_heights(&[], 40.0).is_empty());
    }

    #[test]
    fn empty_series_produce_no_patch() {
        assert!(sparkline_patch("transactions", &[]).is_none());
        assert!(bar_chart_patch("revenue", &[]).is_none());
    }

    #[test]
    fn bar_chart_markup_carries_labels_and_colors() {
        let slices = vec![
            BreakdownSlice {
                label: "Platform".into(),
                value: 30.0,
                color: "#4361ee".into(),
            },
            BreakdownSlice {
                label: "Other".into(),
                value: 15.0,
                color: "#7209b7".into(),
            },
        ];
        let markup = bar_chart_markup(&slices, DEFAULT_MAX_HEIGHT);
        assert_eq!(markup.matches("bar-chart-item").count(), 2);
        assert!(markup.contains("data-label=\"Platform\""));
        assert!(markup.contains("#7209b7"));
        assert!(markup.contains("height: 20px"));
    }

    #[test]
    fn progress_uses_status_class() {
        let fill = progress(99.98, HealthState::Success);
        assert_eq!(fill.width, "99.98%");
        assert_eq!(fill.class, "progress-bar-fill success");
    }
}
