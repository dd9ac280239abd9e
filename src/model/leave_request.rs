use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct LeaveRequest {
    pub id: u64,
    pub employee_id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leave_type: String,
    pub status: String,
}

/// The date range of one approved leave, as the conflict detector sees it.
/// Both ends are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct LeaveSpan {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl LeaveSpan {
    /// Human-readable label: "January 5, 2025" for a single day, otherwise
    /// "January 5, 2025 to January 7, 2025".
    pub fn date_range_label(&self) -> String {
        if self.start_date == self.end_date {
            self.start_date.format("%B %-d, %Y").to_string()
        } else {
            format!(
                "{} to {}",
                self.start_date.format("%B %-d, %Y"),
                self.end_date.format("%B %-d, %Y")
            )
        }
    }
}
