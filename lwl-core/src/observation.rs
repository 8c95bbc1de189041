use crate::error::LevelError;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use lwl_utils::dates::{day_of_year, parse_date, parse_date_compact};

/// Date-time layouts accepted in the date column, tried in order after RFC 3339.
/// Values without an offset are read as UTC.
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y%m%d %H%M",
];

/// Date-only layouts besides "YYYY-MM-DD" and "YYYYMMDD".
pub const DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%m/%d/%Y"];

/// One data line exactly as read from the CSV: cell text, untrimmed, possibly garbage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub date: String,
    pub value: String,
}

impl RawRow {
    pub fn new(date: impl Into<String>, value: impl Into<String>) -> Self {
        RawRow {
            date: date.into(),
            value: value.into(),
        }
    }
}

/// A single water level reading with a parsed UTC timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: DateTime<Utc>,
    pub value: f64,
}

impl Observation {
    /// Calendar year of the reading (UTC).
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Whole days since Jan 1 (UTC) of the reading's year, in `0..=365`.
    pub fn day_of_year(&self) -> u32 {
        day_of_year(&self.date.date_naive())
    }

    pub fn year_day(&self) -> (i32, u32) {
        (self.year(), self.day_of_year())
    }
}

impl TryFrom<&RawRow> for Observation {
    type Error = LevelError;

    fn try_from(row: &RawRow) -> Result<Self, Self::Error> {
        let date = parse_timestamp(&row.date).ok_or_else(|| LevelError::DateParse(row.date.clone()))?;
        let value = parse_value(&row.value).ok_or_else(|| LevelError::ValueParse(row.value.clone()))?;
        Ok(Observation { date, value })
    }
}

/// Parse a date cell into a UTC timestamp.
///
/// RFC 3339 strings keep their offset and are converted to UTC; every other
/// accepted layout is naive and taken as UTC, so the result never depends on
/// the local time zone.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt.and_utc());
        }
    }
    let date = parse_date(text)
        .ok()
        .or_else(|| parse_date_compact(text).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        })?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Parse a value cell. Non-finite numbers are rejected along with non-numeric text.
pub fn parse_value(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
