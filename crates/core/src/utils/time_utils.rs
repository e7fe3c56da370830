use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Storage format for every calendar date in the ledger.
pub const LEDGER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Datetime layouts older datastores may hold in a date column.
const LEGACY_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
];

/// Today's date in the local timezone, used as the entry form default.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a stored date column.
///
/// Accepts plain `YYYY-MM-DD`, the datetime layouts listed above and RFC 3339
/// timestamps (the date part is kept). Anything else is `None`, which callers
/// treat as a malformed row.
pub fn parse_ledger_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, LEDGER_DATE_FORMAT) {
        return Some(date);
    }
    for format in LEGACY_DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.date());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|datetime| datetime.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_dates() {
        assert_eq!(
            parse_ledger_date("2024-03-09"),
            NaiveDate::from_ymd_opt(2024, 3, 9)
        );
    }

    #[test]
    fn parses_datetime_layouts_to_their_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9);
        assert_eq!(parse_ledger_date("2024-03-09 00:00:00"), expected);
        assert_eq!(parse_ledger_date("2024-03-09T13:45:00"), expected);
        assert_eq!(parse_ledger_date("2024-03-09T13:45:00-03:00"), expected);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_ledger_date(""), None);
        assert_eq!(parse_ledger_date("   "), None);
        assert_eq!(parse_ledger_date("not a date"), None);
        assert_eq!(parse_ledger_date("2024-02-30"), None);
        assert_eq!(parse_ledger_date("09/03/2024"), None);
    }
}
