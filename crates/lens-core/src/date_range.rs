use chrono::{
    DateTime, Datelike, Local, LocalResult, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc,
};
use thiserror::Error;

#[derive(Debug, Error)]
/// Failures produced while normalizing a content date range.
pub enum DateRangeError {
    #[error("invalid date range: {from} is after {to}")]
    InvalidRange { from: String, to: String },
    #[error("date {0} has no valid local midnight (timezone transition)")]
    InvalidLocalTime(NaiveDate),
}

#[derive(Debug, Error)]
#[error("unrecognized date '{0}' (expected YYYY-MM-DD or MM-DD)")]
/// Raised when a CLI date argument does not match any accepted format.
pub struct DateParseError(String);

/// A parsed date argument.
///
/// `year_specified` records whether the input actually carried a year, so the
/// resolver never has to guess from sentinel year values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateInput {
    pub date: NaiveDate,
    pub year_specified: bool,
}

impl DateInput {
    /// Parses `YYYY-MM-DD` / `YYYY/MM/DD`, or `MM-DD` / `M/D` forms which are
    /// completed with the current year.
    pub fn parse(raw: &str) -> Result<Self, DateParseError> {
        Self::parse_with_today(raw, Local::now().date_naive())
    }

    fn parse_with_today(raw: &str, today: NaiveDate) -> Result<Self, DateParseError> {
        let trimmed = raw.trim();
        for format in ["%Y-%m-%d", "%Y/%m/%d"] {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Ok(Self {
                    date,
                    year_specified: true,
                });
            }
        }
        if let Some(date) = parse_month_day(trimmed, today.year()) {
            return Ok(Self {
                date,
                year_specified: false,
            });
        }
        Err(DateParseError(trimmed.to_string()))
    }
}

fn parse_month_day(raw: &str, year: i32) -> Option<NaiveDate> {
    let (month, day) = raw.split_once(['-', '/'])?;
    let month: u32 = month.trim().parse().ok()?;
    let day: u32 = day.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// A validated, ISO-8601 serialized content date range.
///
/// `from` is clamped to local 00:00:00.000 and `to` to local 23:59:59.999
/// before serialization, so the pair always spans whole calendar days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

impl DateRange {
    /// Key identifying this range in the content cache.
    pub fn cache_key(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }
}

/// Normalizes optional start/end dates into a validated [`DateRange`].
///
/// A missing `from` defaults to the first day of `to`'s month (or the current
/// month when both are missing); a missing `to` defaults to the last day of
/// the resolved `from`'s month.
pub fn resolve_range(
    from: Option<DateInput>,
    to: Option<DateInput>,
) -> Result<DateRange, DateRangeError> {
    resolve_range_with_today(from, to, Local::now().date_naive())
}

fn resolve_range_with_today(
    from: Option<DateInput>,
    to: Option<DateInput>,
    today: NaiveDate,
) -> Result<DateRange, DateRangeError> {
    let from_date = match from {
        Some(input) => input.date,
        None => match to {
            Some(input) => start_of_month(input.date),
            None => start_of_month(today),
        },
    };
    let to_date = match to {
        Some(input) => input.date,
        None => end_of_month(from_date),
    };

    let from_instant = local_instant(from_date, NaiveTime::MIN)?;
    let to_instant = local_instant(to_date, end_of_day())?;

    if from_instant > to_instant {
        return Err(DateRangeError::InvalidRange {
            from: to_iso(from_instant),
            to: to_iso(to_instant),
        });
    }

    Ok(DateRange {
        from: to_iso(from_instant),
        to: to_iso(to_instant),
    })
}

/// First calendar day of `date`'s month.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last calendar day of `date`'s month, one day before the 1st of the next
/// month so leap years and short months come out right.
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(date)
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

fn local_instant(date: NaiveDate, time: NaiveTime) -> Result<DateTime<Local>, DateRangeError> {
    match Local.from_local_datetime(&date.and_time(time)) {
        LocalResult::Single(instant) => Ok(instant),
        // Fall-back transitions repeat the wall-clock hour; take the first.
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(DateRangeError::InvalidLocalTime(date)),
    }
}

fn to_iso(instant: DateTime<Local>) -> String {
    instant
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
