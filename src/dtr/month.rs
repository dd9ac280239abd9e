use chrono::{Datelike, Months, NaiveDate};
use thiserror::Error;

/// Oldest year a DTR batch may target. Anything before this is a typo.
pub const MIN_YEAR: i32 = 1900;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MonthError {
    #[error("'{0}' is not a recognized month; expected 'Month' or 'Month YYYY'")]
    Unrecognized(String),

    #[error("year {year} is outside 1900..={max}")]
    YearOutOfRange { year: i32, max: i32 },
}

/// The canonical month every day-row of a batch is anchored to.
///
/// Built from free-text input such as "January 2025", "march" (current year
/// implied) or "January 2025 8:00 am" (trailing clock fragment stripped).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthAnchor {
    year: i32,
    month: u32,
    first_day: NaiveDate,
}

impl MonthAnchor {
    pub fn parse(input: &str, today: NaiveDate) -> Result<Self, MonthError> {
        let mut tokens: Vec<&str> = input.split_whitespace().collect();

        // Spreadsheet exports sometimes append a clock time ("January 2025
        // 8:00 am"); cut everything from the first time-looking token on.
        if let Some(pos) = tokens.iter().position(|t| t.contains(':')) {
            tokens.truncate(pos);
        }

        let (name, year) = match tokens.as_slice() {
            [name] => (*name, today.year()),
            [name, year] => (
                *name,
                year.parse::<i32>()
                    .map_err(|_| MonthError::Unrecognized(input.to_string()))?,
            ),
            _ => return Err(MonthError::Unrecognized(input.to_string())),
        };

        let max = today.year() + 1;
        if year < MIN_YEAR || year > max {
            return Err(MonthError::YearOutOfRange { year, max });
        }

        let first_day = NaiveDate::parse_from_str(&format!("{name} 1 {year}"), "%B %d %Y")
            .map_err(|_| MonthError::Unrecognized(input.to_string()))?;

        Ok(Self {
            year,
            month: first_day.month(),
            first_day,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Canonical "Month YYYY" form used as the date anchor for the batch.
    pub fn canonical(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }

    /// The calendar date of `day` within this month, if the day exists.
    pub fn date_of(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Half-open [first day of this month, first day of next month).
    pub fn month_bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.first_day, self.first_day + Months::new(1))
    }
}
