//! # SIS Common Library
//!
//! Shared code for the SIS registration modules including:
//! - Record models (RecordKind, Year, Program, PersonRecord)
//! - Database initialization and scoped store access
//! - Configuration loading and root folder resolution
//! - Common error types

pub mod config;
pub mod db;
pub mod error;
pub mod model;

pub use db::Store;
pub use error::{Error, Result};
