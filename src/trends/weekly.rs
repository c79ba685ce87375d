//! Calendar-week trend
//!
//! The weekly overview chart buckets by true calendar weeks (Monday
//! starts), unlike the rolling periods of the range charts.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use tracing::{debug, trace};

use super::{TrendError, TrendPoint};
use crate::models::DiaryEntry;

/// Monday of the week containing the given date
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_from_monday = date.weekday().num_days_from_monday();
    date - Duration::days(days_from_monday as i64)
}

/// Sunday of the week containing the given date
pub fn week_end(date: NaiveDate) -> NaiveDate {
    let days_to_sunday = 6 - date.weekday().num_days_from_monday();
    date + Duration::days(days_to_sunday as i64)
}

/// Average lesion totals per calendar week over the last `weeks_back` weeks
///
/// The window runs from `reference_now - weeks_back` weeks through
/// `reference_now`; the first bucket may cover only the tail of its
/// calendar week, since the window cutoff is not week-aligned. Entries
/// before the cutoff are excluded even when their calendar week has a
/// bucket. Weeks with no entries average exactly `0.0`. The series is
/// ascending by week start.
pub fn weekly_trend(
    entries: &[DiaryEntry],
    reference_now: NaiveDate,
    weeks_back: i64,
) -> Result<Vec<TrendPoint>, TrendError> {
    if weeks_back <= 0 {
        return Err(TrendError::InvalidLookback(weeks_back));
    }

    let window_start = reference_now - Duration::weeks(weeks_back);
    let mut starts = Vec::new();
    let mut cursor = week_start(window_start);
    while cursor <= reference_now {
        starts.push(cursor);
        cursor += Duration::weeks(1);
    }

    let cutoff = window_start.and_time(NaiveTime::MIN);
    let mut sums = vec![0u64; starts.len()];
    let mut tallies = vec![0u32; starts.len()];

    for entry in entries {
        if entry.timestamp < cutoff {
            trace!(entry = %entry.id, timestamp = %entry.timestamp, "entry outside weekly window");
            continue;
        }
        match starts.binary_search(&week_start(entry.timestamp.date())) {
            Ok(slot) => {
                sums[slot] += u64::from(entry.total_count());
                tallies[slot] += 1;
            }
            // A week beyond the reference week has no bucket
            Err(_) => {
                trace!(entry = %entry.id, "entry beyond reference week");
            }
        }
    }

    let series: Vec<TrendPoint> = starts
        .iter()
        .zip(sums.iter().zip(tallies.iter()))
        .map(|(start, (sum, tally))| TrendPoint {
            period_start: *start,
            average_count: if *tally == 0 {
                0.0
            } else {
                *sum as f64 / f64::from(*tally)
            },
        })
        .collect();

    debug!(
        window_start = %window_start,
        weeks = series.len(),
        "aggregated calendar-week series"
    );

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DiaryEntry, EntryBuilder, EntryId, Region};
    use chrono::{NaiveDateTime, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, 0, 0).unwrap()
    }

    fn entry(id: u64, timestamp: NaiveDateTime, count: u32) -> DiaryEntry {
        EntryBuilder::new(timestamp)
            .count(Region::Back, count)
            .build(EntryId(id))
    }

    #[test]
    fn test_week_start_is_monday() {
        // Wednesday, March 11, 2026
        let wednesday = date(2026, 3, 11);
        let start = week_start(wednesday);
        assert_eq!(start.weekday(), Weekday::Mon);
        assert_eq!(start, date(2026, 3, 9));

        // Monday maps to itself, Sunday to the preceding Monday
        assert_eq!(week_start(date(2026, 3, 9)), date(2026, 3, 9));
        assert_eq!(week_start(date(2026, 3, 15)), date(2026, 3, 9));
    }

    #[test]
    fn test_week_end_is_sunday() {
        let end = week_end(date(2026, 3, 11));
        assert_eq!(end.weekday(), Weekday::Sun);
        assert_eq!(end, date(2026, 3, 15));
        assert_eq!(week_end(date(2026, 3, 15)), date(2026, 3, 15));
    }

    #[test]
    fn test_weekly_trend_buckets_and_zero_fill() {
        // Wednesday reference, two weeks back: window starts Wed Feb 25,
        // covering week starts Feb 23, Mar 2, Mar 9.
        let entries = vec![
            entry(1, ts(2026, 2, 26, 10), 4),
            entry(2, ts(2026, 3, 10, 9), 2),
            entry(3, ts(2026, 3, 11, 18), 4),
        ];

        let series = weekly_trend(&entries, date(2026, 3, 11), 2).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].period_start, date(2026, 2, 23));
        assert_eq!(series[0].average_count, 4.0);
        assert_eq!(series[1].period_start, date(2026, 3, 2));
        assert_eq!(series[1].average_count, 0.0);
        assert_eq!(series[2].period_start, date(2026, 3, 9));
        assert_eq!(series[2].average_count, 3.0);
    }

    #[test]
    fn test_weekly_trend_window_cutoff_precedes_week_alignment() {
        // Feb 24 falls in the first bucket's calendar week but before the
        // Feb 25 window cutoff, so it is excluded.
        let entries = vec![
            entry(1, ts(2026, 2, 24, 10), 99),
            entry(2, ts(2026, 2, 25, 0), 6),
        ];

        let series = weekly_trend(&entries, date(2026, 3, 11), 2).unwrap();
        assert_eq!(series[0].average_count, 6.0);
    }

    #[test]
    fn test_weekly_trend_twelve_week_span() {
        let series = weekly_trend(&[], date(2026, 3, 11), 12).unwrap();
        // Twelve full weeks plus the partial reference week
        assert_eq!(series.len(), 13);
        assert!(series.iter().all(|p| p.average_count == 0.0));
        for pair in series.windows(2) {
            assert_eq!(pair[1].period_start - pair[0].period_start, Duration::weeks(1));
        }
    }

    #[test]
    fn test_weekly_trend_reference_day_included() {
        let entries = vec![entry(1, ts(2026, 3, 11, 23), 7)];
        let series = weekly_trend(&entries, date(2026, 3, 11), 4).unwrap();
        assert_eq!(series.last().unwrap().average_count, 7.0);
    }

    #[test]
    fn test_weekly_trend_invalid_lookback() {
        assert_eq!(
            weekly_trend(&[], date(2026, 3, 11), 0),
            Err(TrendError::InvalidLookback(0))
        );
    }
}
