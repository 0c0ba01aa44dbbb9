use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Canonical representation written into `event_date` on submission.
pub const CANONICAL_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Parses a stored `event_date` into a UTC instant.
///
/// Offsets in RFC 3339 values are honoured; naive values are taken as UTC.
pub fn parse_event_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = parse_naive(value) {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// UTC calendar day of a stored `event_date`, time of day truncated.
pub fn event_day(value: &str) -> Option<NaiveDate> {
    parse_event_date(value).map(|dt| dt.date_naive())
}

/// Parses a `YYYY-MM-DD` filter date.
pub fn parse_filter_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// Parses a bare `HH:MM[:SS]` time of day.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

/// Parses the date-time typed into the submission form.
///
/// RFC 3339 input is converted to UTC; anything else is kept as entered.
pub fn parse_form_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    parse_naive(value)
}

pub fn format_canonical(value: &NaiveDateTime) -> String {
    value.format(CANONICAL_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn event_day_accepts_stored_shapes() {
        assert_eq!(event_day("2024-01-05T10:00:00Z"), Some(day(2024, 1, 5)));
        assert_eq!(event_day("2024-01-05T10:00:00.123Z"), Some(day(2024, 1, 5)));
        assert_eq!(event_day("2024/01/05 23:59:59"), Some(day(2024, 1, 5)));
        assert_eq!(event_day("2024-01-05 08:00:00"), Some(day(2024, 1, 5)));
        assert_eq!(event_day("2024-01-05"), Some(day(2024, 1, 5)));
    }

    #[test]
    fn event_day_is_taken_in_utc() {
        assert_eq!(event_day("2024-01-05T23:30:00-02:00"), Some(day(2024, 1, 6)));
        assert_eq!(event_day("2024-01-06T01:00:00+03:00"), Some(day(2024, 1, 5)));
    }

    #[test]
    fn event_day_rejects_garbage() {
        assert_eq!(event_day(""), None);
        assert_eq!(event_day("yesterday"), None);
        assert_eq!(event_day("2024-13-01"), None);
    }

    #[test]
    fn filter_date_requires_full_day() {
        assert_eq!(parse_filter_date(" 2024-03-01 "), Ok(day(2024, 3, 1)));
        assert!(parse_filter_date("2024-03").is_err());
        assert!(parse_filter_date("03/01/2024").is_err());
    }

    #[test]
    fn time_of_day_with_and_without_seconds() {
        assert!(parse_time_of_day("12:00").is_some());
        assert!(parse_time_of_day("08:15:30").is_some());
        assert!(parse_time_of_day("backup").is_none());
        assert!(parse_time_of_day("25:00").is_none());
    }

    #[test]
    fn form_datetime_without_seconds_formats_canonically() {
        let dt = parse_form_datetime("2024-03-01T12:00").unwrap();
        assert_eq!(format_canonical(&dt), "2024/03/01 12:00:00");
    }

    #[test]
    fn form_datetime_with_offset_is_normalised_to_utc() {
        let dt = parse_form_datetime("2024-03-01T12:00:00+02:00").unwrap();
        assert_eq!(format_canonical(&dt), "2024/03/01 10:00:00");
    }
}
