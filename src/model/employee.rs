use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_number": "2020-0001",
        "first_name": "Juan",
        "middle_name": "Santos",
        "last_name": "Dela Cruz",
        "name_extension": "Jr.",
        "position": "Teacher I"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "2020-0001")]
    pub employee_number: String,

    #[schema(example = "Juan")]
    pub first_name: String,

    #[schema(example = "Santos", nullable = true)]
    pub middle_name: Option<String>,

    #[schema(example = "Dela Cruz")]
    pub last_name: String,

    #[schema(example = "Jr.", nullable = true)]
    pub name_extension: Option<String>,

    #[schema(example = "Teacher I", nullable = true)]
    pub position: Option<String>,

    /// Set when the record is soft-deleted; such employees are invisible to
    /// listing and to name resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = "date-time", nullable = true)]
    pub deleted_at: Option<NaiveDateTime>,
}
