//! Period generation
//!
//! Walks a lookback window forward from its start, emitting one period
//! start per granularity unit.

use chrono::{Duration, Months, NaiveDate};
use tracing::debug;

use super::{Granularity, TrendError};

/// Generate the ordered period starts spanning a lookback window
///
/// The window runs from `reference_now - lookback_days` through
/// `reference_now` inclusive; the final partial period is kept so an entry
/// recorded today always has a bucket. `reference_now` is the caller's
/// current day (start-of-day semantics) and is injected rather than read
/// from the clock.
///
/// The result is non-empty and strictly ascending, with consecutive starts
/// one granularity unit apart. Month steps follow calendar month lengths,
/// so a start on the 31st clamps to shorter months rather than drifting.
pub fn generate_periods(
    reference_now: NaiveDate,
    lookback_days: i64,
    granularity: Granularity,
) -> Result<Vec<NaiveDate>, TrendError> {
    if lookback_days <= 0 {
        return Err(TrendError::InvalidLookback(lookback_days));
    }

    let start = reference_now - Duration::days(lookback_days);
    let mut periods = Vec::new();
    let mut cursor = start;

    while cursor <= reference_now {
        periods.push(cursor);
        match advance(cursor, granularity) {
            // Stop if the calendar fails to move the cursor forward
            Some(next) if next > cursor => cursor = next,
            _ => break,
        }
    }

    debug!(
        window_start = %start,
        window_end = %reference_now,
        ?granularity,
        periods = periods.len(),
        "generated trend periods"
    );

    Ok(periods)
}

/// Advance one granularity unit, respecting calendar month lengths
fn advance(cursor: NaiveDate, granularity: Granularity) -> Option<NaiveDate> {
    match granularity {
        Granularity::Day => cursor.succ_opt(),
        Granularity::Week => cursor.checked_add_signed(Duration::weeks(1)),
        Granularity::Month => cursor.checked_add_months(Months::new(1)),
    }
}
