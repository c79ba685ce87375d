//! Diary entry types
//!
//! The dated observation record and its builder.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::region::{Region, RegionCounts};

/// Stable identity of a diary entry
///
/// Assigned once by the store and unchanged by later edits, including
/// timestamp edits.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An attached photo, opaque to the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Photo(pub Vec<u8>);

/// One dated diary observation
///
/// Entries are read-only to the aggregation engine; the total lesion count
/// is recomputed from `counts` on every aggregation call rather than cached.
/// Timestamps are not unique: two observations may share an instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: EntryId,
    pub timestamp: NaiveDateTime,
    /// Severity grade, 1 (mild) to 5 (severe)
    pub severity: u8,
    pub notes: String,
    pub location: String,
    pub photos: Vec<Photo>,
    pub counts: RegionCounts,
    /// Last generated narrative summary, written by the summarization collaborator
    pub summary: Option<String>,
    pub summary_date: Option<NaiveDateTime>,
}

impl DiaryEntry {
    /// Total lesion count across every tracked region
    pub fn total_count(&self) -> u32 {
        self.counts.total()
    }
}

/// Builder for diary entries
///
/// The store assigns the identity at insert time; tests construct entries
/// directly by passing an id to [`EntryBuilder::build`].
pub struct EntryBuilder {
    timestamp: NaiveDateTime,
    severity: u8,
    notes: String,
    location: String,
    photos: Vec<Photo>,
    counts: RegionCounts,
}

impl EntryBuilder {
    /// Create a builder for an observation at the given instant
    pub fn new(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            severity: 1,
            notes: String::new(),
            location: String::new(),
            photos: Vec::new(),
            counts: RegionCounts::new(),
        }
    }

    /// Set severity, clamped to the 1-5 grading scale
    pub fn severity(mut self, severity: u8) -> Self {
        self.severity = severity.clamp(1, 5);
        self
    }

    /// Set free-form notes
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Set the described body location
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Attach a photo
    pub fn photo(mut self, photo: Photo) -> Self {
        self.photos.push(photo);
        self
    }

    /// Set the lesion count for one region
    pub fn count(mut self, region: Region, count: u32) -> Self {
        self.counts.set(region, count);
        self
    }

    /// Replace all region counts
    pub fn counts(mut self, counts: RegionCounts) -> Self {
        self.counts = counts;
        self
    }

    /// Build the entry under the given identity
    pub fn build(self, id: EntryId) -> DiaryEntry {
        DiaryEntry {
            id,
            timestamp: self.timestamp,
            severity: self.severity,
            notes: self.notes,
            location: self.location,
            photos: self.photos,
            counts: self.counts,
            summary: None,
            summary_date: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let entry = EntryBuilder::new(ts(2026, 3, 5, 9)).build(EntryId(1));

        assert_eq!(entry.id, EntryId(1));
        assert_eq!(entry.severity, 1);
        assert!(entry.notes.is_empty());
        assert!(entry.photos.is_empty());
        assert!(entry.counts.is_clear());
        assert!(entry.summary.is_none());
        assert!(entry.summary_date.is_none());
    }

    #[test]
    fn test_builder_sets_fields() {
        let entry = EntryBuilder::new(ts(2026, 3, 5, 9))
            .severity(4)
            .notes("itchy after exercise")
            .location("torso")
            .photo(Photo(vec![1, 2, 3]))
            .count(Region::Chest, 6)
            .count(Region::Back, 2)
            .build(EntryId(7));

        assert_eq!(entry.severity, 4);
        assert_eq!(entry.notes, "itchy after exercise");
        assert_eq!(entry.location, "torso");
        assert_eq!(entry.photos.len(), 1);
        assert_eq!(entry.total_count(), 8);
    }

    #[test]
    fn test_severity_clamped_to_scale() {
        let low = EntryBuilder::new(ts(2026, 3, 5, 9)).severity(0).build(EntryId(1));
        let high = EntryBuilder::new(ts(2026, 3, 5, 9)).severity(9).build(EntryId(2));

        assert_eq!(low.severity, 1);
        assert_eq!(high.severity, 5);
    }

    #[test]
    fn test_total_count_includes_every_region() {
        let mut counts = RegionCounts::new();
        for region in Region::ALL {
            counts.set(region, 2);
        }
        let entry = EntryBuilder::new(ts(2026, 3, 5, 9)).counts(counts).build(EntryId(1));
        assert_eq!(entry.total_count(), 24);
    }

    #[test]
    fn test_entry_serialization() {
        let entry = EntryBuilder::new(ts(2026, 3, 5, 9))
            .severity(2)
            .count(Region::Face, 3)
            .build(EntryId(42));

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"id\":42"));
        assert!(json.contains("\"severity\":2"));
        assert!(json.contains("\"face\":3"));

        let back: DiaryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
