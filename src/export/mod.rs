//! Export module for CSV and JSON diary exchange
//!
//! Provides export of entries and trend series, plus the import merge:
//! an incoming record is inserted only when no existing entry shares its
//! exact timestamp.

pub mod csv_export;
pub mod json_export;

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::models::{DiaryEntry, EntryBuilder, Region};
use crate::store::{EntryStore, MemoryStore, StoreError};

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("invalid export format: {0}. Use 'csv' or 'json'")]
    InvalidFormat(String),

    #[error("unsupported export version: {0}")]
    UnsupportedVersion(u32),
}

/// Export format options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ExportError::InvalidFormat(s.to_string())),
        }
    }
}

impl ExportFormat {
    /// Get file extension for format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Flattened diary record for CSV/JSON exchange
///
/// Region counts are individual columns so every consumer sees the full
/// versioned region set. Photo payloads stay in the app; only the count
/// travels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportableEntry {
    pub timestamp: NaiveDateTime,
    pub severity: u8,
    pub location: String,
    pub notes: String,
    pub photo_count: usize,
    pub face: u32,
    pub neck: u32,
    pub chest: u32,
    pub left_arm: u32,
    pub right_arm: u32,
    pub back: u32,
    pub belly: u32,
    pub buttocks: u32,
    pub left_leg: u32,
    pub right_leg: u32,
    pub left_foot: u32,
    pub right_foot: u32,
}

impl From<&DiaryEntry> for ExportableEntry {
    fn from(entry: &DiaryEntry) -> Self {
        Self {
            timestamp: entry.timestamp,
            severity: entry.severity,
            location: entry.location.clone(),
            notes: entry.notes.clone(),
            photo_count: entry.photos.len(),
            face: entry.counts.get(Region::Face),
            neck: entry.counts.get(Region::Neck),
            chest: entry.counts.get(Region::Chest),
            left_arm: entry.counts.get(Region::LeftArm),
            right_arm: entry.counts.get(Region::RightArm),
            back: entry.counts.get(Region::Back),
            belly: entry.counts.get(Region::Belly),
            buttocks: entry.counts.get(Region::Buttocks),
            left_leg: entry.counts.get(Region::LeftLeg),
            right_leg: entry.counts.get(Region::RightLeg),
            left_foot: entry.counts.get(Region::LeftFoot),
            right_foot: entry.counts.get(Region::RightFoot),
        }
    }
}

impl ExportableEntry {
    /// Rebuild a store insertion from this record
    pub fn to_builder(&self) -> EntryBuilder {
        EntryBuilder::new(self.timestamp)
            .severity(self.severity)
            .location(self.location.clone())
            .notes(self.notes.clone())
            .count(Region::Face, self.face)
            .count(Region::Neck, self.neck)
            .count(Region::Chest, self.chest)
            .count(Region::LeftArm, self.left_arm)
            .count(Region::RightArm, self.right_arm)
            .count(Region::Back, self.back)
            .count(Region::Belly, self.belly)
            .count(Region::Buttocks, self.buttocks)
            .count(Region::LeftLeg, self.left_leg)
            .count(Region::RightLeg, self.right_leg)
            .count(Region::LeftFoot, self.left_foot)
            .count(Region::RightFoot, self.right_foot)
    }
}

/// Result of merging an imported record set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeOutcome {
    pub imported: usize,
    pub duplicates: usize,
}

/// Drop records sharing an exact timestamp, keeping the first seen
///
/// Exports run through this so a document never carries two records with
/// the same instant. Detection is timestamp equality, not a fuzzy window.
pub fn dedup_by_timestamp(entries: &[DiaryEntry]) -> Vec<&DiaryEntry> {
    let mut seen: HashSet<NaiveDateTime> = HashSet::new();
    entries
        .iter()
        .filter(|entry| seen.insert(entry.timestamp))
        .collect()
}

/// Merge imported records into the store
///
/// A record is inserted only when no entry — pre-existing or inserted
/// earlier in this merge — shares its exact timestamp.
pub fn merge_into_store(
    store: &MemoryStore,
    incoming: &[ExportableEntry],
) -> Result<MergeOutcome, StoreError> {
    let mut existing: HashSet<NaiveDateTime> = store
        .fetch_entries()
        .iter()
        .map(|entry| entry.timestamp)
        .collect();

    let mut outcome = MergeOutcome::default();
    for record in incoming {
        if existing.insert(record.timestamp) {
            store.insert(record.to_builder())?;
            outcome.imported += 1;
        } else {
            outcome.duplicates += 1;
        }
    }

    info!(
        imported = outcome.imported,
        duplicates = outcome.duplicates,
        "merged imported entries"
    );
    Ok(outcome)
}

/// Get the default export directory (Downloads folder or temp dir)
pub fn get_export_directory() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::document_dir)
        .unwrap_or_else(std::env::temp_dir)
}

/// Generate a timestamped filename for exports
pub fn generate_export_filename(prefix: &str, extension: &str) -> String {
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    format!("{}_{}.{}", prefix, timestamp, extension)
}

// Re-export writers
pub use csv_export::*;
pub use json_export::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryId;
    use chrono::NaiveDate;

    fn ts(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn entry(id: u64, timestamp: NaiveDateTime) -> DiaryEntry {
        EntryBuilder::new(timestamp)
            .severity(3)
            .location("torso")
            .count(Region::Chest, 4)
            .count(Region::Belly, 1)
            .build(EntryId(id))
    }

    #[test]
    fn test_export_format_from_str() {
        assert!(matches!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv));
        assert!(matches!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv));
        assert!(matches!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json));
        assert!("xml".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
    }

    #[test]
    fn test_exportable_entry_round_trip() {
        let original = entry(1, ts(5, 9));
        let record = ExportableEntry::from(&original);

        assert_eq!(record.timestamp, original.timestamp);
        assert_eq!(record.chest, 4);
        assert_eq!(record.belly, 1);
        assert_eq!(record.photo_count, 0);

        let rebuilt = record.to_builder().build(EntryId(2));
        assert_eq!(rebuilt.counts, original.counts);
        assert_eq!(rebuilt.severity, original.severity);
        assert_eq!(rebuilt.location, original.location);
    }

    #[test]
    fn test_dedup_by_timestamp_keeps_first() {
        let shared = ts(5, 9);
        let entries = vec![entry(1, shared), entry(2, shared), entry(3, ts(6, 9))];

        let unique = dedup_by_timestamp(&entries);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].id, EntryId(1));
        assert_eq!(unique[1].id, EntryId(3));
    }

    #[test]
    fn test_merge_skips_exact_timestamp_matches() {
        let store = MemoryStore::new();
        store.insert(EntryBuilder::new(ts(5, 9))).unwrap();

        let incoming = vec![
            ExportableEntry::from(&entry(10, ts(5, 9))), // duplicate instant
            ExportableEntry::from(&entry(11, ts(6, 10))),
            ExportableEntry::from(&entry(12, ts(7, 11))),
        ];

        let outcome = merge_into_store(&store, &incoming).unwrap();
        assert_eq!(outcome, MergeOutcome { imported: 2, duplicates: 1 });
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_merge_is_exact_not_fuzzy() {
        let store = MemoryStore::new();
        store.insert(EntryBuilder::new(ts(5, 9))).unwrap();

        // One second apart is a different instant, so it imports
        let near = NaiveDate::from_ymd_opt(2026, 3, 5)
            .unwrap()
            .and_hms_opt(9, 0, 1)
            .unwrap();
        let incoming = vec![ExportableEntry::from(&entry(10, near))];

        let outcome = merge_into_store(&store, &incoming).unwrap();
        assert_eq!(outcome, MergeOutcome { imported: 1, duplicates: 0 });
    }

    #[test]
    fn test_merge_dedups_within_incoming_set() {
        let store = MemoryStore::new();
        let incoming = vec![
            ExportableEntry::from(&entry(10, ts(5, 9))),
            ExportableEntry::from(&entry(11, ts(5, 9))),
        ];

        let outcome = merge_into_store(&store, &incoming).unwrap();
        assert_eq!(outcome, MergeOutcome { imported: 1, duplicates: 1 });
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_generate_export_filename() {
        let filename = generate_export_filename("diary", "json");
        assert!(filename.starts_with("diary_"));
        assert!(filename.ends_with(".json"));
        assert!(filename.len() > 20);
    }

    #[test]
    fn test_get_export_directory() {
        let dir = get_export_directory();
        assert!(dir.to_str().is_some());
    }
}
