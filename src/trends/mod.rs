//! Trend analysis module
//!
//! This module turns the unordered entry collection into chartable series:
//! - Period generation over a lookback window (day/week/month steps)
//! - Bucketing and averaging of per-entry lesion totals, with zero-fill
//! - A calendar-week series for the weekly overview chart
//!
//! The engine is pure: the same entries, range, and reference date always
//! produce the same series, regardless of entry order or call site. Callers
//! recompute whenever the selected range, the entry collection, or the
//! current day changes.

pub mod aggregate;
pub mod periods;
pub mod weekly;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use aggregate::aggregate;
pub use periods::generate_periods;
pub use weekly::weekly_trend;

use crate::models::DiaryEntry;

/// Trend computation errors
///
/// These are caller errors. Empty entry collections, out-of-window entries,
/// and degenerate windows are all well-formed inputs and never error.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TrendError {
    #[error("lookback must be positive, got {0}")]
    InvalidLookback(i64),

    #[error("period list is empty")]
    EmptyPeriods,

    #[error("period list is not strictly ascending")]
    UnsortedPeriods,
}

/// Unit length of an aggregation period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity::Day
    }
}

impl From<&str> for Granularity {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "week" => Granularity::Week,
            "month" => Granularity::Month,
            _ => Granularity::Day,
        }
    }
}

/// Selectable chart window
///
/// Each range fixes a lookback length and the period granularity used to
/// bucket it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    Week,
    Month,
    SixMonths,
    Year,
}

impl TimeRange {
    /// All ranges in picker order
    pub const ALL: [TimeRange; 4] = [
        TimeRange::Week,
        TimeRange::Month,
        TimeRange::SixMonths,
        TimeRange::Year,
    ];

    /// Length of the lookback window in days
    pub fn lookback_days(&self) -> i64 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::SixMonths => 180,
            TimeRange::Year => 365,
        }
    }

    /// Bucket granularity for this range
    pub fn granularity(&self) -> Granularity {
        match self {
            TimeRange::Week | TimeRange::Month => Granularity::Day,
            TimeRange::SixMonths => Granularity::Week,
            TimeRange::Year => Granularity::Month,
        }
    }

    /// Short picker label
    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Week => "W",
            TimeRange::Month => "M",
            TimeRange::SixMonths => "6M",
            TimeRange::Year => "Y",
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::Week
    }
}

impl From<&str> for TimeRange {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "m" | "month" => TimeRange::Month,
            "6m" | "six_months" => TimeRange::SixMonths,
            "y" | "year" => TimeRange::Year,
            _ => TimeRange::Week,
        }
    }
}

/// One point of a trend series
///
/// `average_count` is the mean lesion total of the entries assigned to the
/// period starting at `period_start`, or exactly `0.0` when no entries
/// landed there. Charts draw a flat baseline for silent periods; any display
/// floor (e.g. `max(0.1, y)`) is the renderer's concern, not part of the
/// series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub period_start: NaiveDate,
    pub average_count: f64,
}

/// Compute the trend series for a time range
///
/// Generates the range's periods back from `reference_now` (the caller's
/// current day, injectable for tests) and buckets `entries` into them. The
/// result has exactly one point per period, sorted ascending by period
/// start.
pub fn compute_trend(
    entries: &[DiaryEntry],
    range: TimeRange,
    reference_now: NaiveDate,
) -> Result<Vec<TrendPoint>, TrendError> {
    let periods = generate_periods(reference_now, range.lookback_days(), range.granularity())?;
    let window_start = periods[0];
    aggregate(entries, &periods, window_start)
}
