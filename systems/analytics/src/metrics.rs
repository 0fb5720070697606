//! Metric labels and the number formats the dashboard prints.

use serde::Serialize;

/// Labelled value ready to be shown in a metrics panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Metric {
    /// Human readable name of the metric.
    pub label: &'static str,
    /// Formatted value including its unit.
    pub value: String,
}

impl Metric {
    pub(crate) fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

/// Formats a quantity the way the dashboard prints decimals: whole values keep
/// a trailing `.0` and fractional values print their shortest exact form.
#[must_use]
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value}.0")
    } else {
        value.to_string()
    }
}

/// Formats a user count rounded to two decimals, dropping insignificant zeros.
#[must_use]
pub fn format_users(value: f64) -> String {
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}
