use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One stored half-day attendance row (`dtr_am` or `dtr_pm`).
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct DtrRecord {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 1)]
    pub employee_id: u64,

    #[schema(example = "2025-01-01T07:30:00", value_type = Option<String>, format = "date-time", nullable = true)]
    pub time_in: Option<NaiveDateTime>,

    #[schema(example = "2025-01-01T12:00:00", value_type = Option<String>, format = "date-time", nullable = true)]
    pub time_out: Option<NaiveDateTime>,
}

/// A half-day row about to be bulk-inserted. Never built with both sides
/// null; the parser drops those before they reach a writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDtrRecord {
    pub employee_id: u64,
    pub time_in: Option<NaiveDateTime>,
    pub time_out: Option<NaiveDateTime>,
}
