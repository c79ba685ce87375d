//! Dermatrack - Symptom Diary Engine
//!
//! This library provides the core engine behind a personal symptom diary.
//! It handles:
//! - Dated observations with severity and per-body-region lesion counts
//! - Calendar-aware trend aggregation over selectable time windows
//! - An in-memory entry store collaborator with stable identities
//! - JSON/CSV diary exchange with timestamp-dedup merge
//! - The prompt contract for the narrative summarization collaborator

pub mod export;
pub mod models;
pub mod store;
pub mod summary;
pub mod trends;

use chrono::NaiveDate;

pub use models::{DiaryEntry, EntryBuilder, EntryId, Photo, Region, RegionCounts};
pub use store::{EntryStore, MemoryStore, StoreError};
pub use trends::{
    compute_trend, weekly_trend, Granularity, TimeRange, TrendError, TrendPoint,
};

/// A diary: an entry store plus on-demand trend computation
///
/// Trends are recomputed from a fresh snapshot on every call; the caller
/// decides when to invoke (range selection changed, entries changed, day
/// rolled over). Nothing is cached, so results always match the current
/// entry state for the given reference day.
pub struct Diary {
    store: MemoryStore,
}

impl Diary {
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
        }
    }

    /// The underlying entry store
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Trend series for a chart range, as of the given day
    pub fn trend(
        &self,
        range: TimeRange,
        reference_now: NaiveDate,
    ) -> Result<Vec<TrendPoint>, TrendError> {
        compute_trend(&self.store.fetch_entries(), range, reference_now)
    }

    /// Calendar-week series for the weekly overview chart
    pub fn weekly_trend(
        &self,
        reference_now: NaiveDate,
        weeks_back: i64,
    ) -> Result<Vec<TrendPoint>, TrendError> {
        weekly_trend(&self.store.fetch_entries(), reference_now, weeks_back)
    }
}

impl Default for Diary {
    fn default() -> Self {
        Self::new()
    }
}
