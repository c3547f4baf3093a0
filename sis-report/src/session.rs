//! ReportSession - surface entry points for the admin report screen
//!
//! Holds the current kind/filter/sort selection. Any filter or sort change
//! triggers a full re-query; there is no incremental diffing. Export ignores
//! the selection and always covers the whole table.

use crate::export::export;
use crate::query::{query, FilterSpec, ReportError, ReportRow, SortSpec};
use sis_common::model::RecordKind;
use sis_common::Store;
use std::path::PathBuf;

/// State of one open report screen
#[derive(Debug, Clone)]
pub struct ReportSession {
    store: Store,
    kind: RecordKind,
    filter: FilterSpec,
    sort: SortSpec,
    export_dir: PathBuf,
}

impl ReportSession {
    pub fn new(store: Store, kind: RecordKind, export_dir: impl Into<PathBuf>) -> Self {
        ReportSession {
            store,
            kind,
            filter: FilterSpec::default(),
            sort: SortSpec::default(),
            export_dir: export_dir.into(),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    /// Re-run the query with the current selection
    pub async fn refresh(&self) -> Result<Vec<ReportRow>, ReportError> {
        query(&self.store, self.kind, &self.filter, &self.sort).await
    }

    /// Replace the filter selection and re-query
    pub async fn on_filter_changed(
        &mut self,
        filter: FilterSpec,
    ) -> Result<Vec<ReportRow>, ReportError> {
        self.filter = filter;
        self.refresh().await
    }

    /// Replace the sort selection and re-query
    pub async fn on_sort_changed(&mut self, sort: SortSpec) -> Result<Vec<ReportRow>, ReportError> {
        self.sort = sort;
        self.refresh().await
    }

    /// Export the whole table to its fixed artifact path
    pub async fn on_export_requested(&self) -> Result<PathBuf, ReportError> {
        export(&self.store, self.kind, &self.export_dir).await
    }
}
