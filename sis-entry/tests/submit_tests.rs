//! Integration tests for the submission controller
//!
//! Each test runs against a throwaway SQLite database in a temp directory.

use sis_common::db::init_database;
use sis_common::model::{CommonFields, KindDetail, PersonRecord, Program, RecordKind, Year};
use sis_common::Store;
use sis_entry::normalize::FieldId;
use sis_entry::{submit, EditOutcome, FormSession, SubmitError};
use sqlx::Connection;
use std::sync::Once;
use tempfile::TempDir;

static TRACING: Once = Once::new();

/// Test helper: temp database + store handle
async fn setup_store() -> (TempDir, Store) {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let store = init_database(&dir.path().join("sis.db"))
        .await
        .expect("Should initialize database");
    (dir, store)
}

/// Test helper: a fully valid enrollee record
fn valid_enrollee(record_id: &str) -> PersonRecord {
    PersonRecord {
        record_id: record_id.to_string(),
        common: CommonFields {
            surname: "DELA CRUZ".to_string(),
            given_name: "Juan Miguel".to_string(),
            middle_initial: "M.".to_string(),
            extension: String::new(),
            barangay: "Sta. Lucia".to_string(),
            town: "Sta. Ana".to_string(),
            province: "Pampanga".to_string(),
            emergency_name: "Maria Dela Cruz".to_string(),
            emergency_relation: "Mother".to_string(),
            emergency_contact: "09171234567".to_string(),
        },
        detail: KindDetail::Enrollee {
            year: Year::Second,
            program: Program::ComputerScience,
        },
    }
}

/// Test helper: a fully valid staff record
fn valid_staff(record_id: &str) -> PersonRecord {
    PersonRecord {
        detail: KindDetail::Staff {
            department: "Registrar".to_string(),
            position: "Records Clerk".to_string(),
        },
        ..valid_enrollee(record_id)
    }
}

/// Test helper: row count of a kind's table
async fn row_count(store: &Store, kind: RecordKind) -> i64 {
    let mut conn = store.connect().await.expect("Should connect");
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", kind.table_name()))
        .fetch_one(&mut conn)
        .await
        .expect("Should count rows");
    conn.close().await.expect("Should close");
    count
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_submit_valid_enrollee_persists_one_row() {
    let (_dir, store) = setup_store().await;

    submit(&store, &valid_enrollee("2024-0001"))
        .await
        .expect("Submission should succeed");

    assert_eq!(row_count(&store, RecordKind::Enrollee).await, 1);
    assert_eq!(row_count(&store, RecordKind::Staff).await, 0);
}

#[tokio::test]
async fn test_validation_lists_every_missing_field() {
    let (_dir, store) = setup_store().await;

    let mut record = valid_enrollee("2024-0002");
    record.common.surname = String::new();
    record.common.emergency_contact = "   ".to_string();

    let err = submit(&store, &record).await.unwrap_err();
    let SubmitError::ValidationFailed(missing) = err else {
        panic!("expected ValidationFailed, got {err:?}");
    };
    assert_eq!(missing, vec!["Surname", "Emergency Contact Number"]);
    assert_eq!(row_count(&store, RecordKind::Enrollee).await, 0);
}

#[tokio::test]
async fn test_contact_number_must_be_exactly_eleven_digits() {
    let (_dir, store) = setup_store().await;

    for bad in ["0917123456", "091712345678"] {
        let mut record = valid_enrollee("2024-0003");
        record.common.emergency_contact = bad.to_string();
        let err = submit(&store, &record).await.unwrap_err();
        assert!(
            matches!(err, SubmitError::ContactNumberInvalid),
            "length {} should be invalid",
            bad.len()
        );
    }
    assert_eq!(row_count(&store, RecordKind::Enrollee).await, 0);

    let mut record = valid_enrollee("2024-0003");
    record.common.emergency_contact = "09171234567".to_string();
    submit(&store, &record).await.expect("11 digits should pass");
}

#[tokio::test]
async fn test_fields_are_trimmed_before_validation() {
    let (_dir, store) = setup_store().await;

    let mut record = valid_enrollee("2024-0004");
    record.common.surname = "  DELA CRUZ  ".to_string();
    record.record_id = " 2024-0004 ".to_string();
    submit(&store, &record).await.expect("Trimmed record is valid");

    let mut conn = store.connect().await.unwrap();
    let (record_id, surname): (String, String) =
        sqlx::query_as("SELECT record_id, surname FROM enrollees")
            .fetch_one(&mut conn)
            .await
            .unwrap();
    assert_eq!(record_id, "2024-0004");
    assert_eq!(surname, "DELA CRUZ");
}

#[tokio::test]
async fn test_address_recomposed_at_submission() {
    let (_dir, store) = setup_store().await;

    submit(&store, &valid_enrollee("2024-0005")).await.unwrap();

    let mut conn = store.connect().await.unwrap();
    let address: String = sqlx::query_scalar("SELECT address FROM enrollees")
        .fetch_one(&mut conn)
        .await
        .unwrap();
    assert_eq!(address, "Sta. Lucia, Sta. Ana, Pampanga");
}

// =============================================================================
// Duplicate protection
// =============================================================================

#[tokio::test]
async fn test_duplicate_record_id_rejected() {
    let (_dir, store) = setup_store().await;

    submit(&store, &valid_enrollee("2024-0010"))
        .await
        .expect("First submission should succeed");

    // Same key, different field values
    let mut second = valid_enrollee("2024-0010");
    second.common.surname = "SANTOS".to_string();
    let err = submit(&store, &second).await.unwrap_err();
    assert!(matches!(err, SubmitError::DuplicateKey));

    assert_eq!(row_count(&store, RecordKind::Enrollee).await, 1);
}

#[tokio::test]
async fn test_record_id_keyspaces_are_per_kind() {
    let (_dir, store) = setup_store().await;

    submit(&store, &valid_enrollee("0001")).await.unwrap();
    submit(&store, &valid_staff("0001"))
        .await
        .expect("Same ID in the staff table should be accepted");

    assert_eq!(row_count(&store, RecordKind::Enrollee).await, 1);
    assert_eq!(row_count(&store, RecordKind::Staff).await, 1);
}

// =============================================================================
// Infrastructure failures
// =============================================================================

#[tokio::test]
async fn test_missing_database_reports_connection_failed() {
    let store = Store::new("/nonexistent/sis.db");
    let err = submit(&store, &valid_enrollee("2024-0020")).await.unwrap_err();
    assert!(matches!(err, SubmitError::ConnectionFailed(_)));
}

// =============================================================================
// Form session flow
// =============================================================================

#[tokio::test]
async fn test_form_session_submit_and_reset() {
    let (_dir, store) = setup_store().await;

    let mut session = FormSession::new(RecordKind::Enrollee);
    let entries = [
        (FieldId::Surname, "dela cruz"),
        (FieldId::GivenName, "juan miguel"),
        (FieldId::MiddleInitial, "m"),
        (FieldId::Barangay, "Sta. Lucia"),
        (FieldId::Town, "Sta. Ana"),
        (FieldId::Province, "Pampanga"),
        (FieldId::RecordId, "2024-0030"),
        (FieldId::EmergencyName, "Maria Dela Cruz"),
        (FieldId::EmergencyRelation, "Mother"),
        (FieldId::EmergencyContact, "09171234567"),
    ];
    for (field, text) in entries {
        let outcome = session.on_field_edited(field, text, text.chars().count());
        if let EditOutcome::Rewritten { text, cursor } = outcome {
            session.on_field_edited(field, &text, cursor);
        }
    }
    session.set_year(Year::Third);
    session.set_program(Program::InformationTechnology);

    session
        .on_submit(&store)
        .await
        .expect("Completed form should submit");

    // Successful submit clears the form
    assert_eq!(session.field_text(FieldId::Surname), "");
    assert_eq!(row_count(&store, RecordKind::Enrollee).await, 1);

    let mut conn = store.connect().await.unwrap();
    let (surname, year): (String, String) =
        sqlx::query_as("SELECT surname, year FROM enrollees WHERE record_id = '2024-0030'")
            .fetch_one(&mut conn)
            .await
            .unwrap();
    assert_eq!(surname, "DELA CRUZ");
    assert_eq!(year, "3rd Year");
}

#[tokio::test]
async fn test_form_session_failed_submit_keeps_fields() {
    let (_dir, store) = setup_store().await;

    let mut session = FormSession::new(RecordKind::Enrollee);
    session.on_field_edited(FieldId::RecordId, "2024-0031", 9);

    let err = session.on_submit(&store).await.unwrap_err();
    assert!(matches!(err, SubmitError::ValidationFailed(_)));
    assert_eq!(session.field_text(FieldId::RecordId), "2024-0031");
}
