//! SubmissionController - validate, dedup, and persist a completed record
//!
//! The duplicate check and the insert run inside one transaction on one
//! scoped connection, and each table's PRIMARY KEY backs the check: a
//! concurrent submit that slips past the existence query still surfaces as a
//! unique-constraint violation, reported as [`SubmitError::DuplicateKey`].
//! Exactly one row is written on success, zero on every failure path.

use sis_common::model::{KindDetail, PersonRecord};
use sis_common::Store;
use sqlx::Connection;
use thiserror::Error;
use tracing::{info, warn};

/// Submission outcome reported to the presentation surface
#[derive(Error, Debug)]
pub enum SubmitError {
    /// A record with this ID already exists in the kind's table
    #[error("This record ID already exists.")]
    DuplicateKey,

    /// One or more required fields are empty; lists every missing field
    #[error("Please complete all required fields: {}", .0.join(", "))]
    ValidationFailed(Vec<String>),

    /// Emergency contact number is not exactly 11 digits
    #[error("Emergency contact number must be exactly 11 digits.")]
    ContactNumberInvalid,

    /// Could not open a store connection
    #[error("Failed to connect to the database: {0}")]
    ConnectionFailed(String),

    /// The insert failed; nothing was written
    #[error("Registration failed: {0}")]
    PersistenceFailed(String),
}

/// Validate and persist one record
///
/// Short-circuits on the first failure. Field trimming and address
/// recomposition happen here, not in the form.
pub async fn submit(store: &Store, record: &PersonRecord) -> Result<(), SubmitError> {
    let record = record.trimmed();
    let kind = record.kind();

    let missing = record.missing_fields();
    if !missing.is_empty() {
        return Err(SubmitError::ValidationFailed(missing));
    }

    if record.common.emergency_contact.chars().count() != 11 {
        return Err(SubmitError::ContactNumberInvalid);
    }

    let mut conn = store
        .connect()
        .await
        .map_err(|e| SubmitError::ConnectionFailed(e.to_string()))?;

    // Existence check and insert share this transaction; dropping it on any
    // early return rolls back.
    let mut tx = conn
        .begin()
        .await
        .map_err(|e| SubmitError::PersistenceFailed(e.to_string()))?;

    let existing: Option<i64> = sqlx::query_scalar(&format!(
        "SELECT 1 FROM {} WHERE record_id = ?",
        kind.table_name()
    ))
    .bind(&record.record_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| SubmitError::PersistenceFailed(e.to_string()))?;

    if existing.is_some() {
        warn!(
            "Rejected duplicate {} record id {}",
            kind.label(),
            record.record_id
        );
        return Err(SubmitError::DuplicateKey);
    }

    insert_record(&mut tx, &record).await?;

    tx.commit()
        .await
        .map_err(|e| SubmitError::PersistenceFailed(e.to_string()))?;

    info!("Registered {} record {}", kind.label(), record.record_id);
    Ok(())
}

async fn insert_record(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    record: &PersonRecord,
) -> Result<(), SubmitError> {
    let c = &record.common;
    let address = c.address();

    let result = match &record.detail {
        KindDetail::Enrollee { year, program } => {
            sqlx::query(
                r#"
                INSERT INTO enrollees (record_id, surname, given_name, middle_initial,
                                       extension, address, year, program,
                                       emergency_name, emergency_relation, emergency_contact)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&record.record_id)
            .bind(&c.surname)
            .bind(&c.given_name)
            .bind(&c.middle_initial)
            .bind(&c.extension)
            .bind(&address)
            .bind(year.as_str())
            .bind(program.as_str())
            .bind(&c.emergency_name)
            .bind(&c.emergency_relation)
            .bind(&c.emergency_contact)
            .execute(&mut **tx)
            .await
        }
        KindDetail::Staff {
            department,
            position,
        } => {
            sqlx::query(
                r#"
                INSERT INTO staff (record_id, surname, given_name, middle_initial,
                                   extension, address, department, position,
                                   emergency_name, emergency_relation, emergency_contact)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&record.record_id)
            .bind(&c.surname)
            .bind(&c.given_name)
            .bind(&c.middle_initial)
            .bind(&c.extension)
            .bind(&address)
            .bind(department)
            .bind(position)
            .bind(&c.emergency_name)
            .bind(&c.emergency_relation)
            .bind(&c.emergency_contact)
            .execute(&mut **tx)
            .await
        }
    };

    match result {
        Ok(_) => Ok(()),
        Err(e) => {
            if e.as_database_error()
                .is_some_and(|d| d.is_unique_violation())
            {
                // Lost a check-then-act race; the PRIMARY KEY caught it
                warn!(
                    "Unique constraint caught duplicate {} record id {}",
                    record.kind().label(),
                    record.record_id
                );
                Err(SubmitError::DuplicateKey)
            } else {
                Err(SubmitError::PersistenceFailed(e.to_string()))
            }
        }
    }
}
