//! Repository seams the reconciliation routine reads and writes through.
//! Each trait exposes only the operations the routine needs; the MySQL
//! implementations live in [`mysql`], tests supply in-memory ones.

use async_trait::async_trait;

use crate::model::dtr::NewDtrRecord;
use crate::model::employee::Employee;
use crate::model::leave_request::LeaveSpan;

pub mod mysql;

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Exact match of a normalized (whitespace-collapsed, lowercased) full
    /// name against the stored name permutations. Soft-deleted employees
    /// never match; on a tie the lowest id wins.
    async fn find_by_full_name(&self, normalized: &str) -> anyhow::Result<Option<Employee>>;
}

#[async_trait]
pub trait LeaveRepository: Send + Sync {
    /// Approved leave spans whose date range covers, day-level inclusive,
    /// any AM attendance time_in already on file for the employee. This is
    /// a pre-existing-record check: the incoming batch's dates are never
    /// consulted, so an employee with no stored AM rows cannot conflict.
    async fn approved_spans_overlapping_attendance(
        &self,
        employee_id: u64,
    ) -> anyhow::Result<Vec<LeaveSpan>>;
}

/// Write side of one import, scoped to a single unit of work. The caller
/// owns the unit: committing on success, dropping it on failure, so the AM
/// and PM inserts land together or not at all.
#[async_trait]
pub trait AttendanceWriter: Send {
    async fn insert_am_batch(&mut self, rows: &[NewDtrRecord]) -> anyhow::Result<u64>;
    async fn insert_pm_batch(&mut self, rows: &[NewDtrRecord]) -> anyhow::Result<u64>;
}
