mod common;

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use common::*;
use dtrm::dtr::service;
use dtrm::error::DtrError;
use dtrm::model::leave_request::LeaveSpan;

fn span(y: i32, m: u32, from: u32, to: u32) -> LeaveSpan {
    LeaveSpan {
        start_date: NaiveDate::from_ymd_opt(y, m, from).unwrap(),
        end_date: NaiveDate::from_ymd_opt(y, m, to).unwrap(),
    }
}

#[actix_web::test]
async fn approved_leave_over_stored_attendance_rejects_the_whole_batch() {
    let employees = InMemoryEmployees {
        rows: vec![employee(1, "Juan", None, "Dela Cruz", None)],
    };
    // An AM row already on file inside an approved span triggers the check.
    let leaves = InMemoryLeaves {
        approved: vec![(1, span(2025, 1, 5, 7))],
        stored_am_time_in: vec![(1, dt(2025, 1, 6, 7, 30))],
    };
    let store = Arc::new(Mutex::new(MemoryDtrStore::default()));
    let mut writer = StagedWriter::new(store.clone());

    let records = vec![day_row("10", "7:30 am", "12:00 pm", "1:00 pm", "5:00 pm")];
    let err = service::reconcile(
        &employees,
        &leaves,
        &mut writer,
        &anchor("January 2025"),
        "Juan Dela Cruz",
        &records,
    )
    .await
    .unwrap_err();

    match err {
        DtrError::LeaveConflict { ref ranges } => {
            assert_eq!(ranges, "January 5, 2025 to January 7, 2025");
        }
        other => panic!("expected LeaveConflict, got {other:?}"),
    }

    // Nothing staged, nothing committed.
    assert!(writer.staged_am.is_empty());
    assert!(writer.staged_pm.is_empty());
    let store = store.lock().unwrap();
    assert!(store.am.is_empty());
    assert!(store.pm.is_empty());
}

#[actix_web::test]
async fn no_stored_attendance_means_no_conflict_regardless_of_leave() {
    let employees = InMemoryEmployees {
        rows: vec![employee(1, "Juan", None, "Dela Cruz", None)],
    };
    // Approved leave squarely over the incoming batch's dates, but the
    // detector only looks at rows already on file; with none stored, the
    // import proceeds.
    let leaves = InMemoryLeaves {
        approved: vec![(1, span(2025, 1, 1, 31))],
        stored_am_time_in: vec![],
    };
    let store = Arc::new(Mutex::new(MemoryDtrStore::default()));
    let mut writer = StagedWriter::new(store.clone());

    let records = vec![day_row("10", "7:30 am", "12:00 pm", "1:00 pm", "5:00 pm")];
    let outcome = service::reconcile(
        &employees,
        &leaves,
        &mut writer,
        &anchor("January 2025"),
        "Juan Dela Cruz",
        &records,
    )
    .await
    .unwrap();
    writer.commit();

    assert_eq!(outcome.am_saved, 1);
    assert_eq!(outcome.pm_saved, 1);
    let store = store.lock().unwrap();
    assert_eq!(store.am.len(), 1);
    assert_eq!(store.pm.len(), 1);
}

#[actix_web::test]
async fn other_employees_leave_does_not_conflict() {
    let employees = InMemoryEmployees {
        rows: vec![employee(1, "Juan", None, "Dela Cruz", None)],
    };
    let leaves = InMemoryLeaves {
        approved: vec![(2, span(2025, 1, 5, 7))],
        stored_am_time_in: vec![(2, dt(2025, 1, 6, 7, 30))],
    };
    let store = Arc::new(Mutex::new(MemoryDtrStore::default()));
    let mut writer = StagedWriter::new(store.clone());

    let records = vec![day_row("6", "7:30 am", "12:00 pm", "", "")];
    let outcome = service::reconcile(
        &employees,
        &leaves,
        &mut writer,
        &anchor("January 2025"),
        "Juan Dela Cruz",
        &records,
    )
    .await
    .unwrap();

    assert_eq!(outcome.am_saved, 1);
}

#[actix_web::test]
async fn single_day_conflict_is_listed_without_a_range() {
    let employees = InMemoryEmployees {
        rows: vec![employee(1, "Juan", None, "Dela Cruz", None)],
    };
    let leaves = InMemoryLeaves {
        approved: vec![(1, span(2025, 1, 5, 5))],
        stored_am_time_in: vec![(1, dt(2025, 1, 5, 7, 30))],
    };
    let store = Arc::new(Mutex::new(MemoryDtrStore::default()));
    let mut writer = StagedWriter::new(store.clone());

    let err = service::reconcile(
        &employees,
        &leaves,
        &mut writer,
        &anchor("January 2025"),
        "Juan Dela Cruz",
        &[],
    )
    .await
    .unwrap_err();

    match err {
        DtrError::LeaveConflict { ref ranges } => {
            assert_eq!(ranges, "January 5, 2025");
            assert!(!ranges.contains(" to "));
        }
        other => panic!("expected LeaveConflict, got {other:?}"),
    }
}

#[actix_web::test]
async fn multiple_conflicting_spans_are_joined_with_commas() {
    let employees = InMemoryEmployees {
        rows: vec![employee(1, "Juan", None, "Dela Cruz", None)],
    };
    let leaves = InMemoryLeaves {
        approved: vec![(1, span(2025, 1, 5, 7)), (1, span(2025, 1, 20, 20))],
        stored_am_time_in: vec![(1, dt(2025, 1, 6, 7, 30)), (1, dt(2025, 1, 20, 7, 30))],
    };
    let store = Arc::new(Mutex::new(MemoryDtrStore::default()));
    let mut writer = StagedWriter::new(store.clone());

    let err = service::reconcile(
        &employees,
        &leaves,
        &mut writer,
        &anchor("January 2025"),
        "Juan Dela Cruz",
        &[],
    )
    .await
    .unwrap_err();

    match err {
        DtrError::LeaveConflict { ref ranges } => {
            assert_eq!(
                ranges,
                "January 5, 2025 to January 7, 2025, January 20, 2025"
            );
        }
        other => panic!("expected LeaveConflict, got {other:?}"),
    }
}
