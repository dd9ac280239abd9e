use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::config::Config;
use crate::dtr::month::MonthAnchor;
use crate::dtr::service::{self, DayRecordInput, SkippedHalf};
use crate::model::dtr::DtrRecord;
use crate::model::employee::Employee;
use crate::repo::mysql::{MySqlAttendanceTx, MySqlEmployeeRepo, MySqlLeaveRepo, begin_import_tx};

#[derive(Deserialize, ToSchema)]
pub struct ImportDtrRequest {
    #[schema(example = "Juan Dela Cruz")]
    pub employee_name: String,
    /// "Month" (current year implied) or "Month YYYY"
    #[schema(example = "January 2025")]
    pub month: String,
    pub records: Vec<DayRecordInput>,
}

#[derive(Serialize, ToSchema)]
pub struct ImportDtrResponse {
    #[schema(example = "DTR imported")]
    pub message: String,
    pub employee: Employee,
    #[schema(example = "January 2025")]
    pub month: String,
    #[schema(example = 20)]
    pub am_saved: u64,
    #[schema(example = 20)]
    pub pm_saved: u64,
    pub skipped: Vec<SkippedHalf>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct DtrQuery {
    #[schema(example = 1)]
    /// Employee whose records to fetch
    pub employee_id: u64,
    #[schema(example = "January 2025")]
    /// Month to fetch, "Month" or "Month YYYY"
    pub month: String,
}

#[derive(Serialize, ToSchema)]
pub struct DtrListResponse {
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = "January 2025")]
    pub month: String,
    pub am: Vec<DtrRecord>,
    pub pm: Vec<DtrRecord>,
}

/// Bulk DTR import
///
/// Reconciles one employee's month of half-day rows: resolves the employee
/// by full name, rejects the batch on approved-leave conflicts, drops
/// unparseable half-days and persists the rest atomically.
#[utoipa::path(
    post,
    path = "/api/v1/dtr/import",
    request_body = ImportDtrRequest,
    responses(
        (status = 201, description = "Batch imported; body echoes the resolved employee", body = ImportDtrResponse),
        (status = 400, description = "Month not in 'Month' or 'Month YYYY' form", body = Object, example = json!({
            "message": "'Januberry' is not a recognized month; expected 'Month' or 'Month YYYY'"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "No employee record matched 'Juan Dela Cruz'"
        })),
        (status = 422, description = "Approved leave overlaps recorded attendance", body = Object, example = json!({
            "message": "Employee has approved leave overlapping recorded attendance: January 5, 2025 to January 7, 2025"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "DTR"
)]
pub async fn import_dtr(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    payload: web::Json<ImportDtrRequest>,
) -> actix_web::Result<impl Responder> {
    // Validation layer: a month the normalizer rejects never reaches the
    // reconciliation routine.
    let anchor = match MonthAnchor::parse(&payload.month, Local::now().date_naive()) {
        Ok(anchor) => anchor,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "message": e.to_string()
            })));
        }
    };

    let employees = MySqlEmployeeRepo::new(pool.get_ref().clone());
    let leaves = MySqlLeaveRepo::new(pool.get_ref().clone());

    let mut tx = begin_import_tx(pool.get_ref(), config.dtr_lock_wait_secs)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to open DTR import transaction");
            ErrorInternalServerError("Internal Server Error")
        })?;

    let outcome = {
        let mut writer = MySqlAttendanceTx::new(&mut tx);
        service::reconcile(
            &employees,
            &leaves,
            &mut writer,
            &anchor,
            &payload.employee_name,
            &payload.records,
        )
        .await
    };

    match outcome {
        Ok(outcome) => {
            tx.commit().await.map_err(|e| {
                error!(error = %e, "Failed to commit DTR import");
                ErrorInternalServerError("Internal Server Error")
            })?;

            Ok(HttpResponse::Created().json(ImportDtrResponse {
                message: "DTR imported".to_string(),
                employee: outcome.employee,
                month: outcome.month,
                am_saved: outcome.am_saved,
                pm_saved: outcome.pm_saved,
                skipped: outcome.skipped,
            }))
        }
        Err(err) => {
            if let Err(e) = tx.rollback().await {
                error!(error = %e, "Failed to roll back DTR import");
            }
            Err(err.into())
        }
    }
}

/// Month view of stored DTR rows
#[utoipa::path(
    get,
    path = "/api/v1/dtr",
    params(DtrQuery),
    responses(
        (status = 200, description = "Stored AM/PM rows for the month", body = DtrListResponse),
        (status = 400, description = "Month not in 'Month' or 'Month YYYY' form"),
        (status = 500, description = "Internal server error")
    ),
    tag = "DTR"
)]
pub async fn list_dtr(
    pool: web::Data<MySqlPool>,
    query: web::Query<DtrQuery>,
) -> actix_web::Result<impl Responder> {
    let anchor = match MonthAnchor::parse(&query.month, Local::now().date_naive()) {
        Ok(anchor) => anchor,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "message": e.to_string()
            })));
        }
    };

    let (start, end) = anchor.month_bounds();

    let am = fetch_half(pool.get_ref(), "dtr_am", query.employee_id, start, end).await?;
    let pm = fetch_half(pool.get_ref(), "dtr_pm", query.employee_id, start, end).await?;

    Ok(HttpResponse::Ok().json(DtrListResponse {
        employee_id: query.employee_id,
        month: anchor.canonical(),
        am,
        pm,
    }))
}

async fn fetch_half(
    pool: &MySqlPool,
    table: &str,
    employee_id: u64,
    start: NaiveDate,
    end: NaiveDate,
) -> actix_web::Result<Vec<DtrRecord>> {
    let sql = format!(
        r#"
        SELECT id, employee_id, time_in, time_out
        FROM {table}
        WHERE employee_id = ?
          AND DATE(COALESCE(time_in, time_out)) >= ?
          AND DATE(COALESCE(time_in, time_out)) < ?
        ORDER BY COALESCE(time_in, time_out)
        "#
    );

    sqlx::query_as::<_, DtrRecord>(&sql)
        .bind(employee_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id, table, "Failed to fetch DTR rows");
            ErrorInternalServerError("Internal Server Error")
        })
}
