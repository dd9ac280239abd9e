use chrono::{NaiveDateTime, NaiveTime};
use thiserror::Error;

use super::month::MonthAnchor;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HalfParseError {
    #[error("day '{0}' is not a valid day of the month")]
    BadDay(String),

    #[error("time '{0}' is not in h:mm am/pm form")]
    BadTime(String),
}

/// Parsed times for one half of a day row. At least one side is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HalfTimes {
    pub time_in: Option<NaiveDateTime>,
    pub time_out: Option<NaiveDateTime>,
}

/// Parse one half-day (arrival, departure) against the month anchor.
///
/// `Ok(None)` means both fields were blank and the half carries no record.
/// An unparseable non-blank field fails the whole half; the other half of
/// the same day is unaffected because each half is parsed on its own.
pub fn parse_half(
    anchor: &MonthAnchor,
    day: &str,
    arrival: &str,
    departure: &str,
) -> Result<Option<HalfTimes>, HalfParseError> {
    let day = day.trim();
    let date = day
        .parse::<u32>()
        .ok()
        .and_then(|d| anchor.date_of(d))
        .ok_or_else(|| HalfParseError::BadDay(day.to_string()))?;

    let time_in = parse_clock(arrival)?.map(|t| date.and_time(t));
    let time_out = parse_clock(departure)?.map(|t| date.and_time(t));

    if time_in.is_none() && time_out.is_none() {
        return Ok(None);
    }
    Ok(Some(HalfTimes { time_in, time_out }))
}

fn parse_clock(raw: &str) -> Result<Option<NaiveTime>, HalfParseError> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(s, "%I:%M %p")
        .map(Some)
        .map_err(|_| HalfParseError::BadTime(s.to_string()))
}
