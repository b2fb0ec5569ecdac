use time::OffsetDateTime;
use time::macros::format_description;

/// Format a ratio as a percentage with one decimal, dropping a trailing ".0"
pub fn format_percent(ratio: f64) -> String {
    if !ratio.is_finite() {
        return "0%".to_string();
    }
    let text = format!("{:.1}", ratio * 100.0);
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{}%", text)
}

/// Long date, e.g. "Thursday, March 7, 2024"
pub fn format_full_date(dt: OffsetDateTime) -> String {
    let format = format_description!("[weekday], [month repr:long] [day padding:none], [year]");
    dt.format(&format).unwrap_or_else(|_| "unknown".to_string())
}

/// Two-digit clock time, e.g. "02:30 PM"
pub fn format_clock(dt: OffsetDateTime) -> String {
    let format = format_description!("[hour repr:12]:[minute] [period]");
    dt.format(&format).unwrap_or_else(|_| "unknown".to_string())
}

/// Long date with short time, e.g. "Thursday, March 7, 2024 at 2:30 PM"
pub fn format_full_datetime(dt: OffsetDateTime) -> String {
    let format = format_description!("[hour repr:12 padding:none]:[minute] [period]");
    let time = dt.format(&format).unwrap_or_else(|_| "unknown".to_string());
    format!("{} at {}", format_full_date(dt), time)
}

/// Hour-of-day axis label, e.g. "06:00"; 24 wraps to "00:00"
pub fn format_hour_tick(hour: f64) -> String {
    format!("{:02}:00", (hour.round() as i64).rem_euclid(24))
}
