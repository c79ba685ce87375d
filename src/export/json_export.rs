//! JSON export functionality
//!
//! Versioned JSON documents for diary exchange between installations.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{dedup_by_timestamp, merge_into_store, ExportError, ExportableEntry, MergeOutcome};
use crate::models::DiaryEntry;
use crate::store::MemoryStore;

/// Current document version
pub const EXPORT_VERSION: u32 = 1;

/// Complete export structure for JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiaryExportJson {
    pub version: u32,
    pub export_date: NaiveDateTime,
    pub entry_count: usize,
    pub entries: Vec<ExportableEntry>,
}

/// Build an export document from an entry snapshot
///
/// Records sharing an exact timestamp collapse to the first seen, so a
/// document re-imports cleanly.
pub fn build_export(entries: &[DiaryEntry], export_date: NaiveDateTime) -> DiaryExportJson {
    let records: Vec<ExportableEntry> = dedup_by_timestamp(entries)
        .into_iter()
        .map(ExportableEntry::from)
        .collect();

    DiaryExportJson {
        version: EXPORT_VERSION,
        export_date,
        entry_count: records.len(),
        entries: records,
    }
}

/// Write an export document to disk
pub fn write_entries_json(document: &DiaryExportJson, path: &PathBuf) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, document)?;

    info!(path = %path.display(), entries = document.entry_count, "wrote JSON export");
    Ok(())
}

/// Read an export document from disk
pub fn read_entries_json(path: &PathBuf) -> Result<DiaryExportJson, ExportError> {
    let file = std::fs::File::open(path)?;
    let document: DiaryExportJson = serde_json::from_reader(file)?;

    if document.version > EXPORT_VERSION {
        return Err(ExportError::UnsupportedVersion(document.version));
    }
    Ok(document)
}

/// Import a document, merging by the timestamp-equality rule
pub fn import_entries_json(
    store: &MemoryStore,
    path: &PathBuf,
) -> Result<MergeOutcome, ExportError> {
    let document = read_entries_json(path)?;
    let outcome = merge_into_store(store, &document.entries)?;

    info!(
        path = %path.display(),
        imported = outcome.imported,
        duplicates = outcome.duplicates,
        "imported JSON export"
    );
    Ok(outcome)
}
