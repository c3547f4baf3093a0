//! Report query construction and projection
//!
//! Filter and sort selections become one SQL statement: the base predicate
//! selects all rows of the kind, each present filter field appends an AND'd
//! equality with a bound parameter, and the sort applies last over the
//! creation timestamp. Ties keep store-native order. Every selection change
//! re-runs the full query.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sis_common::model::{Program, RecordKind, Year};
use sis_common::Store;
use sqlx::{Connection, Row};
use thiserror::Error;
use tracing::debug;

/// Report pipeline errors
#[derive(Error, Debug)]
pub enum ReportError {
    /// Could not open a store connection
    #[error("Failed to connect to the database: {0}")]
    ConnectionFailed(String),

    /// The report query failed
    #[error("Report query failed: {0}")]
    QueryFailed(String),

    /// The spreadsheet artifact could not be written
    #[error("Failed to export data: {0}")]
    ExportFailed(String),
}

/// Optional equality predicates narrowing an enrollee report
///
/// Ignored for staff reports, which have no filterable columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub year: Option<Year>,
    pub program: Option<Program>,
}

/// Sort direction over the creation timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn sql(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// Sort selection; the sort key is always the creation timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        SortSpec {
            direction: SortDirection::Ascending,
        }
    }
}

/// One projected result row, cells ordered per [`headers`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub cells: Vec<String>,
}

const ENROLLEE_HEADERS: &[&str] = &[
    "Record ID",
    "Surname",
    "Given Name",
    "MI",
    "Extension",
    "Address",
    "Year",
    "Program",
    "Emergency Name",
    "Emergency Relation",
    "Emergency Contact",
    "Date Registered",
];

const STAFF_HEADERS: &[&str] = &[
    "Record ID",
    "Surname",
    "Given Name",
    "MI",
    "Extension",
    "Address",
    "Department",
    "Position",
    "Emergency Name",
    "Emergency Relation",
    "Emergency Contact",
    "Date Registered",
];

/// Fixed ordered header list for a kind's projection
pub fn headers(kind: RecordKind) -> &'static [&'static str] {
    match kind {
        RecordKind::Enrollee => ENROLLEE_HEADERS,
        RecordKind::Staff => STAFF_HEADERS,
    }
}

// Column lists are spelled out so the projection stays 1:1 with the header
// list regardless of storage column order.
fn select_columns(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Enrollee => {
            "record_id, surname, given_name, middle_initial, extension, address, \
             year, program, emergency_name, emergency_relation, emergency_contact, created_at"
        }
        RecordKind::Staff => {
            "record_id, surname, given_name, middle_initial, extension, address, \
             department, position, emergency_name, emergency_relation, emergency_contact, created_at"
        }
    }
}

/// Run one report query and project the results
pub async fn query(
    store: &Store,
    kind: RecordKind,
    filter: &FilterSpec,
    sort: &SortSpec,
) -> Result<Vec<ReportRow>, ReportError> {
    let mut sql = format!(
        "SELECT {} FROM {} WHERE 1=1",
        select_columns(kind),
        kind.table_name()
    );
    let mut params: Vec<String> = Vec::new();

    if kind == RecordKind::Enrollee {
        if let Some(year) = filter.year {
            sql.push_str(" AND year = ?");
            params.push(year.as_str().to_string());
        }
        if let Some(program) = filter.program {
            sql.push_str(" AND program = ?");
            params.push(program.as_str().to_string());
        }
    }

    sql.push_str(" ORDER BY created_at ");
    sql.push_str(sort.direction.sql());

    debug!("Report query: {}", sql);

    let mut conn = store
        .connect()
        .await
        .map_err(|e| ReportError::ConnectionFailed(e.to_string()))?;

    let mut q = sqlx::query(&sql);
    for param in &params {
        q = q.bind(param);
    }
    let rows = q
        .fetch_all(&mut conn)
        .await
        .map_err(|e| ReportError::QueryFailed(e.to_string()))?;

    conn.close()
        .await
        .map_err(|e| ReportError::QueryFailed(e.to_string()))?;

    let header_count = headers(kind).len();
    let mut projected = Vec::with_capacity(rows.len());
    for row in &rows {
        let mut cells = Vec::with_capacity(header_count);
        // All columns before created_at are text; only NULL renders as an
        // empty cell, a decode failure aborts the report
        for idx in 0..header_count - 1 {
            let value: Option<String> = row
                .try_get(idx)
                .map_err(|e| ReportError::QueryFailed(e.to_string()))?;
            cells.push(value.unwrap_or_default());
        }
        let created_at: Option<NaiveDateTime> = row
            .try_get(header_count - 1)
            .map_err(|e| ReportError::QueryFailed(e.to_string()))?;
        cells.push(
            created_at
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
        );
        projected.push(ReportRow { cells });
    }

    Ok(projected)
}
