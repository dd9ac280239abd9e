#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use dtrm::dtr::month::MonthAnchor;
use dtrm::dtr::resolver;
use dtrm::dtr::service::DayRecordInput;
use dtrm::model::dtr::NewDtrRecord;
use dtrm::model::employee::Employee;
use dtrm::model::leave_request::LeaveSpan;
use dtrm::repo::{AttendanceWriter, EmployeeRepository, LeaveRepository};

pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

pub fn anchor(month: &str) -> MonthAnchor {
    MonthAnchor::parse(month, fixed_today()).expect("test month should parse")
}

pub fn employee(
    id: u64,
    first: &str,
    middle: Option<&str>,
    last: &str,
    ext: Option<&str>,
) -> Employee {
    Employee {
        id,
        employee_number: format!("2020-{id:04}"),
        first_name: first.to_string(),
        middle_name: middle.map(str::to_string),
        last_name: last.to_string(),
        name_extension: ext.map(str::to_string),
        position: Some("Teacher I".to_string()),
        deleted_at: None,
    }
}

pub fn day_row(
    day: &str,
    am_arrival: &str,
    am_departure: &str,
    pm_arrival: &str,
    pm_departure: &str,
) -> DayRecordInput {
    DayRecordInput {
        day: day.to_string(),
        am_arrival: am_arrival.to_string(),
        am_departure: am_departure.to_string(),
        pm_arrival: pm_arrival.to_string(),
        pm_departure: pm_departure.to_string(),
        undertime_hour: None,
        undertime_minute: None,
    }
}

pub fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

#[derive(Default)]
pub struct InMemoryEmployees {
    pub rows: Vec<Employee>,
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployees {
    async fn find_by_full_name(&self, normalized: &str) -> anyhow::Result<Option<Employee>> {
        let mut matches: Vec<&Employee> = self
            .rows
            .iter()
            .filter(|e| e.deleted_at.is_none())
            .filter(|e| resolver::name_variants(e).iter().any(|v| v == normalized))
            .collect();
        matches.sort_by_key(|e| e.id);
        Ok(matches.first().map(|e| (*e).clone()))
    }
}

/// Mirrors the MySQL detector: approved spans are reported only when they
/// cover the date of an AM time_in already on file for the employee.
#[derive(Default)]
pub struct InMemoryLeaves {
    pub approved: Vec<(u64, LeaveSpan)>,
    pub stored_am_time_in: Vec<(u64, NaiveDateTime)>,
}

#[async_trait]
impl LeaveRepository for InMemoryLeaves {
    async fn approved_spans_overlapping_attendance(
        &self,
        employee_id: u64,
    ) -> anyhow::Result<Vec<LeaveSpan>> {
        let days: Vec<NaiveDate> = self
            .stored_am_time_in
            .iter()
            .filter(|(id, _)| *id == employee_id)
            .map(|(_, t)| t.date())
            .collect();

        Ok(self
            .approved
            .iter()
            .filter(|(id, _)| *id == employee_id)
            .filter(|(_, span)| {
                days.iter()
                    .any(|d| *d >= span.start_date && *d <= span.end_date)
            })
            .map(|(_, span)| span.clone())
            .collect())
    }
}

/// What a committed unit of work left behind.
#[derive(Default)]
pub struct MemoryDtrStore {
    pub am: Vec<NewDtrRecord>,
    pub pm: Vec<NewDtrRecord>,
}

/// Writer staging rows against a shared store. Nothing is visible in the
/// store until `commit`, matching the caller-owned transaction contract.
pub struct StagedWriter {
    store: Arc<Mutex<MemoryDtrStore>>,
    pub staged_am: Vec<NewDtrRecord>,
    pub staged_pm: Vec<NewDtrRecord>,
    pub fail_on_pm: bool,
}

impl StagedWriter {
    pub fn new(store: Arc<Mutex<MemoryDtrStore>>) -> Self {
        Self {
            store,
            staged_am: Vec::new(),
            staged_pm: Vec::new(),
            fail_on_pm: false,
        }
    }

    pub fn commit(self) {
        let mut store = self.store.lock().unwrap();
        store.am.extend(self.staged_am);
        store.pm.extend(self.staged_pm);
    }
}

#[async_trait]
impl AttendanceWriter for StagedWriter {
    async fn insert_am_batch(&mut self, rows: &[NewDtrRecord]) -> anyhow::Result<u64> {
        self.staged_am.extend_from_slice(rows);
        Ok(rows.len() as u64)
    }

    async fn insert_pm_batch(&mut self, rows: &[NewDtrRecord]) -> anyhow::Result<u64> {
        if self.fail_on_pm {
            anyhow::bail!("simulated pm insert failure");
        }
        self.staged_pm.extend_from_slice(rows);
        Ok(rows.len() as u64)
    }
}
