use chrono::{DateTime, Utc};

use lms_core::time::parse_timestamp;

/// `DD/MM/YYYY`, the day-first form used across the dashboards.
#[must_use]
pub fn format_day(value: DateTime<Utc>) -> String {
    value.format("%d/%m/%Y").to_string()
}

/// Due date label: `N/A` when absent, `Invalid Date` when unparsable.
#[must_use]
pub fn format_due_date(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => "N/A".to_owned(),
        Some(value) => parse_timestamp(value).map_or_else(|| "Invalid Date".to_owned(), format_day),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_dates_are_day_first() {
        assert_eq!(format_due_date(Some("2025-06-01T00:00:00.000Z")), "01/06/2025");
        assert_eq!(format_due_date(Some("2025-12-31")), "31/12/2025");
        assert_eq!(format_due_date(None), "N/A");
        assert_eq!(format_due_date(Some("  ")), "N/A");
        assert_eq!(format_due_date(Some("someday")), "Invalid Date");
    }
}
