//! Database initialization
//!
//! Creates the database file and both record tables on first run; safe to
//! call again on an existing database.

use crate::{Result, Store};
use sqlx::{Connection, SqliteConnection};
use std::path::Path;
use tracing::info;

/// Initialize the database and create tables if needed
///
/// Returns a [`Store`] handle used by all later scoped connections.
pub async fn init_database(db_path: &Path) -> Result<Store> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // mode=rwc creates the database file on first run
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let mut conn = SqliteConnection::connect(&db_url).await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // WAL allows a reporting read to overlap a registration write
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&mut conn)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&mut conn)
        .await?;

    // Schema creation (idempotent - safe to call multiple times)
    create_enrollees_table(&mut conn).await?;
    create_staff_table(&mut conn).await?;

    conn.close().await?;

    Ok(Store::new(db_path))
}

async fn create_enrollees_table(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS enrollees (
            record_id TEXT PRIMARY KEY,
            surname TEXT NOT NULL,
            given_name TEXT NOT NULL,
            middle_initial TEXT NOT NULL,
            extension TEXT NOT NULL DEFAULT '',
            address TEXT NOT NULL,
            year TEXT NOT NULL,
            program TEXT NOT NULL,
            emergency_name TEXT NOT NULL,
            emergency_relation TEXT NOT NULL,
            emergency_contact TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(conn)
    .await?;

    Ok(())
}

async fn create_staff_table(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS staff (
            record_id TEXT PRIMARY KEY,
            surname TEXT NOT NULL,
            given_name TEXT NOT NULL,
            middle_initial TEXT NOT NULL,
            extension TEXT NOT NULL DEFAULT '',
            address TEXT NOT NULL,
            department TEXT NOT NULL,
            position TEXT NOT NULL,
            emergency_name TEXT NOT NULL,
            emergency_relation TEXT NOT NULL,
            emergency_contact TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(conn)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_creates_both_tables() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("sis.db");

        let store = init_database(&db_path).await.expect("init should succeed");
        assert!(db_path.exists());

        let mut conn = store.connect().await.expect("connect should succeed");
        for table in ["enrollees", "staff"] {
            let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
                .fetch_one(&mut conn)
                .await
                .expect("table should exist");
            assert_eq!(count, 0);
        }
    }

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("sis.db");

        init_database(&db_path).await.unwrap();
        init_database(&db_path).await.expect("re-init should succeed");
    }

    #[tokio::test]
    async fn test_connect_fails_for_missing_database() {
        let store = Store::new("/nonexistent/sis.db");
        assert!(store.connect().await.is_err());
    }
}
