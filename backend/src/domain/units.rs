//! Display formatting for measurements and dates.

use chrono::NaiveDate;

/// Format a measurement with at most two decimals and no trailing zeros
fn format_measurement(value: f64, unit: &str) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, unit)
}

/// `3.5` -> `"3.5 kg"`
pub fn format_weight(kg: f64) -> String {
    format_measurement(kg, "kg")
}

/// `50.0` -> `"50 cm"`
pub fn format_length(cm: f64) -> String {
    format_measurement(cm, "cm")
}

/// "January 5, 2024"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// "Jan 5, 2024"
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// "01/05/24", used as chart axis labels
pub fn format_chart_date(date: NaiveDate) -> String {
    date.format("%m/%d/%y").to_string()
}
