//! CSV export functionality
//!
//! Provides CSV serialization for diary entries and trend series.

use std::path::PathBuf;

use csv::Writer;
use tracing::info;

use super::{ExportError, ExportableEntry};
use crate::trends::TrendPoint;

/// Write entries to CSV format
pub fn write_entries_csv(entries: &[ExportableEntry], path: &PathBuf) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    let mut writer = Writer::from_writer(file);

    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;

    info!(path = %path.display(), entries = entries.len(), "wrote entries CSV");
    Ok(())
}

/// Write a trend series to CSV format
pub fn write_trend_csv(series: &[TrendPoint], path: &PathBuf) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    let mut writer = Writer::from_writer(file);

    for point in series {
        writer.serialize(point)?;
    }
    writer.flush()?;

    info!(path = %path.display(), points = series.len(), "wrote trend CSV");
    Ok(())
}
