//! Series aggregation
//!
//! Buckets in-window entries into generated periods and reduces each
//! bucket to an average lesion total.

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, trace};

use super::{TrendError, TrendPoint};
use crate::models::DiaryEntry;

/// Bucket entries into periods and average each bucket
///
/// `periods` must be the output of [`super::generate_periods`] (non-empty,
/// strictly ascending) and `window_start` the same lower bound used to
/// generate it. Entries stamped before the window-start instant are
/// excluded entirely; an entry exactly at the instant belongs to the first
/// bucket. Each remaining entry is assigned to the latest period start at
/// or before its calendar day, so a period covers everything from its
/// start until the next period's start, and an entry on the reference day
/// itself lands in the final partial period.
///
/// Every period produces a point: silent periods average exactly `0.0`.
/// The result is ascending by period start and independent of the order
/// entries were supplied in.
pub fn aggregate(
    entries: &[DiaryEntry],
    periods: &[NaiveDate],
    window_start: NaiveDate,
) -> Result<Vec<TrendPoint>, TrendError> {
    validate_periods(periods)?;

    let cutoff = window_start.and_time(NaiveTime::MIN);
    let mut sums = vec![0u64; periods.len()];
    let mut tallies = vec![0u32; periods.len()];

    let mut skipped = 0usize;
    for entry in entries {
        if entry.timestamp < cutoff {
            trace!(entry = %entry.id, timestamp = %entry.timestamp, "entry outside window");
            skipped += 1;
            continue;
        }

        // Latest period start at or before the entry's day; the defensive
        // fallback is the window start, which is always periods[0].
        let day = entry.timestamp.date();
        let slot = match periods.partition_point(|p| *p <= day) {
            0 => 0,
            n => n - 1,
        };

        // The lesion total is recomputed here on every call; the entry's
        // underlying counts may have been edited since the last pass.
        sums[slot] += u64::from(entry.total_count());
        tallies[slot] += 1;
    }

    let series: Vec<TrendPoint> = periods
        .iter()
        .zip(sums.iter().zip(tallies.iter()))
        .map(|(period_start, (sum, tally))| {
            let average_count = if *tally == 0 {
                0.0
            } else {
                *sum as f64 / f64::from(*tally)
            };
            trace!(period = %period_start, entries = tally, average = average_count, "reduced period");
            TrendPoint {
                period_start: *period_start,
                average_count,
            }
        })
        .collect();

    debug!(
        total = entries.len(),
        skipped,
        points = series.len(),
        "aggregated trend series"
    );

    Ok(series)
}

fn validate_periods(periods: &[NaiveDate]) -> Result<(), TrendError> {
    if periods.is_empty() {
        return Err(TrendError::EmptyPeriods);
    }
    if periods.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(TrendError::UnsortedPeriods);
    }
    Ok(())
}
