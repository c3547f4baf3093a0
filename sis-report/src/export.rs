//! Spreadsheet export
//!
//! Exports every row of a kind's table - the active report filter does not
//! apply - to a single-sheet .xlsx artifact at a fixed file name under the
//! export directory. The workbook is written to a temporary sibling and
//! renamed into place, so a failed export leaves no partial artifact at the
//! final path and a successful one overwrites the previous export.

use crate::query::{headers, query, FilterSpec, ReportError, ReportRow, SortSpec};
use rust_xlsxwriter::{Format, FormatAlign, Workbook};
use sis_common::model::RecordKind;
use sis_common::Store;
use std::path::{Path, PathBuf};
use tracing::info;

/// Fixed artifact file name for a kind
pub fn export_file_name(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Enrollee => "enrollee_records.xlsx",
        RecordKind::Staff => "staff_records.xlsx",
    }
}

/// Export all rows of the kind to its spreadsheet artifact
///
/// Returns the path of the written artifact.
pub async fn export(
    store: &Store,
    kind: RecordKind,
    export_dir: &Path,
) -> Result<PathBuf, ReportError> {
    // Ignore any active filter: the export always covers the whole table
    let rows = query(store, kind, &FilterSpec::default(), &SortSpec::default()).await?;

    let final_path = export_dir.join(export_file_name(kind));
    let tmp_path = export_dir.join(format!("{}.tmp", export_file_name(kind)));

    write_workbook(headers(kind), &rows, &tmp_path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        ReportError::ExportFailed(e.to_string())
    })?;

    std::fs::rename(&tmp_path, &final_path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        ReportError::ExportFailed(e.to_string())
    })?;

    info!(
        "Exported {} {} records to {}",
        rows.len(),
        kind.label(),
        final_path.display()
    );
    Ok(final_path)
}

fn write_workbook(
    headers: &[&str],
    rows: &[ReportRow],
    path: &Path,
) -> Result<(), rust_xlsxwriter::XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Data")?;

    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let cell_format = Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        for (col, cell) in row.cells.iter().enumerate() {
            worksheet.write_string_with_format(row_idx as u32 + 1, col as u16, cell, &cell_format)?;
        }
    }

    for (col, width) in column_widths(headers, rows).into_iter().enumerate() {
        worksheet.set_column_width(col as u16, width as f64)?;
    }

    workbook.save(path)
}

/// Content-sized column widths: longest value in the column plus padding
fn column_widths(headers: &[&str], rows: &[ReportRow]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            let longest_cell = rows
                .iter()
                .filter_map(|row| row.cells.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0);
            longest_cell.max(header.chars().count()) + 2
        })
        .collect()
}
