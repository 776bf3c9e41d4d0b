use chrono::{DateTime, NaiveDate, Utc};

/// A simple clock abstraction for deterministic time in services and tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that uses the current system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Returns the current time according to the clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }
}

/// Placeholder rendered when a stored date string cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// Renders a stored date string as `"Mon D, YYYY"`.
///
/// The store keeps dates as loosely validated strings; anything that
/// parses as neither `YYYY-MM-DD` nor RFC 3339 renders as the literal
/// [`INVALID_DATE`] placeholder instead of propagating an error.
#[must_use]
pub fn format_date(raw: &str) -> String {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|t| t.date_naive()));
    match date {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_fixed_time() {
        assert_eq!(fixed_clock().now(), fixed_now());
    }

    #[test]
    fn format_date_accepts_plain_dates() {
        assert_eq!(format_date("2024-03-05"), "Mar 5, 2024");
    }

    #[test]
    fn format_date_accepts_rfc3339() {
        assert_eq!(format_date("2024-03-05T10:30:00Z"), "Mar 5, 2024");
    }

    #[test]
    fn format_date_falls_back_on_garbage() {
        assert_eq!(format_date("soon"), INVALID_DATE);
        assert_eq!(format_date(""), INVALID_DATE);
    }
}
