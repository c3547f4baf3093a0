//! sis-report - Admin reporting core
//!
//! Turns a (record kind, filter, sort) selection into a query over the store,
//! projects results onto a fixed header list for display, and exports full
//! tables to a spreadsheet artifact.

pub mod export;
pub mod query;
pub mod session;

pub use export::export;
pub use query::{headers, query, FilterSpec, ReportError, ReportRow, SortDirection, SortSpec};
pub use session::ReportSession;
