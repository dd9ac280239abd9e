use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::error::DtrError;
use crate::model::dtr::NewDtrRecord;
use crate::model::employee::Employee;
use crate::repo::{AttendanceWriter, EmployeeRepository, LeaveRepository};

use super::month::MonthAnchor;
use super::parser;
use super::resolver;

/// One day row of an import batch as submitted by the front end. All time
/// fields are free text in "h:mm am/pm" form; blanks mean no observation.
/// `undertime_hour`/`undertime_minute` are accepted from legacy payloads
/// and not stored.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DayRecordInput {
    #[schema(example = "1")]
    pub day: String,

    #[serde(default)]
    #[schema(example = "7:30 am")]
    pub am_arrival: String,

    #[serde(default)]
    #[schema(example = "12:00 pm")]
    pub am_departure: String,

    #[serde(default)]
    #[schema(example = "1:00 pm")]
    pub pm_arrival: String,

    #[serde(default)]
    #[schema(example = "5:00 pm")]
    pub pm_departure: String,

    #[serde(default)]
    #[schema(nullable = true)]
    pub undertime_hour: Option<String>,

    #[serde(default)]
    #[schema(nullable = true)]
    pub undertime_minute: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Half {
    Am,
    Pm,
}

/// A half-day dropped from the batch, with the reason it was dropped.
/// Drops never abort the import; they are reported back instead.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SkippedHalf {
    #[schema(example = "3")]
    pub day: String,
    pub half: Half,
    #[schema(example = "time '7:3x am' is not in h:mm am/pm form")]
    pub reason: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportOutcome {
    pub employee: Employee,
    #[schema(example = "January 2025")]
    pub month: String,
    #[schema(example = 20)]
    pub am_saved: u64,
    #[schema(example = 20)]
    pub pm_saved: u64,
    pub skipped: Vec<SkippedHalf>,
}

/// The attendance reconciliation routine.
///
/// Resolves the employee, rejects the whole batch when approved leave
/// overlaps attendance already on file, parses each day's AM and PM halves
/// independently, and bulk-inserts the survivors through `writer`. The
/// writer is scoped to a unit of work owned by the caller: this function
/// never commits, so any error here leaves nothing persisted once the
/// caller drops the unit.
pub async fn reconcile(
    employees: &dyn EmployeeRepository,
    leaves: &dyn LeaveRepository,
    writer: &mut dyn AttendanceWriter,
    anchor: &MonthAnchor,
    employee_name: &str,
    records: &[DayRecordInput],
) -> Result<ImportOutcome, DtrError> {
    let employee = resolver::resolve(employees, employee_name).await?;

    let conflicts = leaves
        .approved_spans_overlapping_attendance(employee.id)
        .await?;
    if !conflicts.is_empty() {
        let ranges = conflicts
            .iter()
            .map(|span| span.date_range_label())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(DtrError::LeaveConflict { ranges });
    }

    let mut am_rows = Vec::new();
    let mut pm_rows = Vec::new();
    let mut skipped = Vec::new();

    for rec in records {
        collect_half(
            anchor,
            &employee,
            rec,
            Half::Am,
            &rec.am_arrival,
            &rec.am_departure,
            &mut am_rows,
            &mut skipped,
        );
        collect_half(
            anchor,
            &employee,
            rec,
            Half::Pm,
            &rec.pm_arrival,
            &rec.pm_departure,
            &mut pm_rows,
            &mut skipped,
        );
    }

    let am_saved = writer.insert_am_batch(&am_rows).await?;
    let pm_saved = writer.insert_pm_batch(&pm_rows).await?;

    info!(
        employee_id = employee.id,
        month = %anchor.canonical(),
        am_saved,
        pm_saved,
        skipped = skipped.len(),
        "DTR batch reconciled"
    );

    Ok(ImportOutcome {
        employee,
        month: anchor.canonical(),
        am_saved,
        pm_saved,
        skipped,
    })
}

#[allow(clippy::too_many_arguments)]
fn collect_half(
    anchor: &MonthAnchor,
    employee: &Employee,
    rec: &DayRecordInput,
    half: Half,
    arrival: &str,
    departure: &str,
    rows: &mut Vec<NewDtrRecord>,
    skipped: &mut Vec<SkippedHalf>,
) {
    match parser::parse_half(anchor, &rec.day, arrival, departure) {
        Ok(Some(times)) => rows.push(NewDtrRecord {
            employee_id: employee.id,
            time_in: times.time_in,
            time_out: times.time_out,
        }),
        Ok(None) => skipped.push(SkippedHalf {
            day: rec.day.clone(),
            half,
            reason: "no times supplied".to_string(),
        }),
        Err(err) => {
            warn!(
                employee_id = employee.id,
                day = %rec.day,
                half = ?half,
                error = %err,
                "Dropping unparseable DTR half-day"
            );
            skipped.push(SkippedHalf {
                day: rec.day.clone(),
                half,
                reason: err.to_string(),
            });
        }
    }
}
