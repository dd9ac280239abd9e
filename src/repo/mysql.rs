use anyhow::Context;
use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, Transaction};

use crate::model::dtr::NewDtrRecord;
use crate::model::employee::Employee;
use crate::model::leave_request::LeaveSpan;

use super::{AttendanceWriter, EmployeeRepository, LeaveRepository};

const EMPLOYEE_COLUMNS: &str =
    "id, employee_number, first_name, middle_name, last_name, name_extension, position, deleted_at";

pub struct MySqlEmployeeRepo {
    pool: MySqlPool,
}

impl MySqlEmployeeRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for MySqlEmployeeRepo {
    async fn find_by_full_name(&self, normalized: &str) -> anyhow::Result<Option<Employee>> {
        // CONCAT_WS skips NULL middle/extension parts, so the four stored
        // permutations collapse the same way the resolver's variants do.
        let sql = format!(
            r#"
            SELECT {EMPLOYEE_COLUMNS}
            FROM employees
            WHERE deleted_at IS NULL
              AND (
                LOWER(CONCAT_WS(' ', name_extension, first_name, last_name)) = ?
                OR LOWER(CONCAT_WS(' ', first_name, last_name)) = ?
                OR LOWER(CONCAT_WS(' ', first_name, middle_name, last_name)) = ?
                OR LOWER(CONCAT_WS(' ', name_extension, first_name, middle_name, last_name)) = ?
              )
            ORDER BY id
            LIMIT 1
            "#
        );

        sqlx::query_as::<_, Employee>(&sql)
            .bind(normalized)
            .bind(normalized)
            .bind(normalized)
            .bind(normalized)
            .fetch_optional(&self.pool)
            .await
            .context("employee name lookup failed")
    }
}

pub struct MySqlLeaveRepo {
    pool: MySqlPool,
}

impl MySqlLeaveRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeaveRepository for MySqlLeaveRepo {
    async fn approved_spans_overlapping_attendance(
        &self,
        employee_id: u64,
    ) -> anyhow::Result<Vec<LeaveSpan>> {
        let sql = r#"
            SELECT l.start_date, l.end_date
            FROM leave_requests l
            WHERE l.employee_id = ?
              AND l.status = 'approved'
              AND EXISTS (
                SELECT 1
                FROM dtr_am a
                WHERE a.employee_id = l.employee_id
                  AND a.time_in IS NOT NULL
                  AND DATE(a.time_in) BETWEEN l.start_date AND l.end_date
              )
            ORDER BY l.start_date
        "#;

        sqlx::query_as::<_, LeaveSpan>(sql)
            .bind(employee_id)
            .fetch_all(&self.pool)
            .await
            .context("leave conflict lookup failed")
    }
}

/// Begin the unit of work one import runs under. The lock-wait budget keeps
/// a contended import from stalling the request past its worth.
pub async fn begin_import_tx(
    pool: &MySqlPool,
    lock_wait_secs: u32,
) -> anyhow::Result<Transaction<'static, MySql>> {
    let mut tx = pool.begin().await.context("failed to open transaction")?;
    sqlx::query("SET innodb_lock_wait_timeout = ?")
        .bind(lock_wait_secs)
        .execute(&mut *tx)
        .await
        .context("failed to set lock wait budget")?;
    Ok(tx)
}

/// Attendance writer bound to one open transaction. Dropping the
/// transaction without committing undoes both batches.
pub struct MySqlAttendanceTx<'t> {
    tx: &'t mut Transaction<'static, MySql>,
}

impl<'t> MySqlAttendanceTx<'t> {
    pub fn new(tx: &'t mut Transaction<'static, MySql>) -> Self {
        Self { tx }
    }

    async fn insert_batch(&mut self, table: &str, rows: &[NewDtrRecord]) -> anyhow::Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let placeholders = vec!["(?, ?, ?)"; rows.len()].join(", ");
        let sql = format!(
            "INSERT INTO {table} (employee_id, time_in, time_out) VALUES {placeholders}"
        );

        let mut query = sqlx::query(&sql);
        for row in rows {
            query = query
                .bind(row.employee_id)
                .bind(row.time_in)
                .bind(row.time_out);
        }

        let result = query
            .execute(&mut **self.tx)
            .await
            .with_context(|| format!("bulk insert into {table} failed"))?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl AttendanceWriter for MySqlAttendanceTx<'_> {
    async fn insert_am_batch(&mut self, rows: &[NewDtrRecord]) -> anyhow::Result<u64> {
        self.insert_batch("dtr_am", rows).await
    }

    async fn insert_pm_batch(&mut self, rows: &[NewDtrRecord]) -> anyhow::Result<u64> {
        self.insert_batch("dtr_pm", rows).await
    }
}
