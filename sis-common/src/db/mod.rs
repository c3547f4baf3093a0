//! Database access layer
//!
//! Submission and reporting each open exactly one connection scoped to the
//! operation; release happens on drop on every exit path. There is no
//! connection pool.

use crate::Result;
use sqlx::{Connection, SqliteConnection};
use std::path::{Path, PathBuf};

pub mod init;

pub use init::init_database;

/// Handle to the SQLite store; cheap to clone, holds no open connection
#[derive(Debug, Clone)]
pub struct Store {
    db_path: PathBuf,
}

impl Store {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Store {
            db_path: db_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Open one connection for a single call sequence
    ///
    /// mode=rw: the database must already exist (see [`init_database`])
    pub async fn connect(&self) -> Result<SqliteConnection> {
        let db_url = format!("sqlite://{}?mode=rw", self.db_path.display());
        let mut conn = SqliteConnection::connect(&db_url).await?;

        sqlx::query("PRAGMA busy_timeout = 5000")
            .execute(&mut conn)
            .await?;

        Ok(conn)
    }
}
