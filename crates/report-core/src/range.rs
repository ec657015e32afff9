//! The inclusive UTC date window a report covers.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::error::{ReportError, Result};

/// Inclusive `[start, end]` UTC interval for one report run.
///
/// `start` is midnight of the start date, `end` is 23:59:59 of the end date,
/// so an event stamped at the final second of the end date is still in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportRange {
    /// Resolve optional `YYYY-MM-DD` date strings into a concrete range.
    ///
    /// Defaults: `end` is today (UTC), `start` is 29 days before `end`,
    /// giving a 30-day window.
    pub fn resolve(start_date: Option<&str>, end_date: Option<&str>) -> Result<Self> {
        let end_day = match end_date {
            Some(s) => parse_date(s)?,
            None => Utc::now().date_naive(),
        };
        let start_day = match start_date {
            Some(s) => parse_date(s)?,
            None => end_day - Duration::days(29),
        };

        let range = Self::from_days(start_day, end_day);
        if range.start > range.end {
            return Err(ReportError::Config(format!(
                "start date {} is after end date {}",
                start_day, end_day
            )));
        }
        Ok(range)
    }

    /// Build the range from whole UTC days.
    pub fn from_days(start_day: NaiveDate, end_day: NaiveDate) -> Self {
        let start = start_day.and_time(NaiveTime::MIN).and_utc();
        // Last second of the end day: midnight of the next day minus one.
        let end = (end_day + Duration::days(1)).and_time(NaiveTime::MIN).and_utc()
            - Duration::seconds(1);
        Self { start, end }
    }

    /// `true` when `instant` lies inside the inclusive interval.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Deterministic file stem derived from the covered dates, e.g.
    /// `oak_report_20240101_20240131`.
    pub fn file_stem(&self) -> String {
        format!(
            "oak_report_{}_{}",
            self.start.format("%Y%m%d"),
            self.end.format("%Y%m%d")
        )
    }

    /// Human-readable caption text, e.g. `2024-01-01 to 2024-01-31 (UTC)`.
    pub fn label(&self) -> String {
        format!(
            "{} to {} (UTC)",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ReportError::InvalidDate(s.to_string()))
}
