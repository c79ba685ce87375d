//! Narrative summarization collaborator
//!
//! The diary offers an AI-written paragraph summarizing the entries in the
//! selected window. The text-generation call itself lives outside this
//! crate; this module owns the collaborator contract and the prompt
//! assembly it consumes.

use thiserror::Error;

use crate::models::DiaryEntry;

/// System role sent alongside every summary request
pub const SYSTEM_ROLE: &str =
    "You are a medical diary analysis assistant specialized in inflammatory skin conditions.";

/// Summarization errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SummaryError {
    #[error("summarizer is not configured")]
    NotConfigured,

    #[error("summary response was malformed")]
    InvalidResponse,

    #[error("summary request failed: {0}")]
    Request(String),
}

/// A text-generation collaborator producing narrative summaries
///
/// Implementations take a snapshot of in-window entries and return one
/// paragraph. Callers typically store the result on the most recent entry
/// along with the generation date.
pub trait Summarizer {
    fn summarize(&self, entries: &[DiaryEntry]) -> Result<String, SummaryError>;
}

/// Render entries as the prompt's observation blocks
///
/// One block per entry, blank-line separated, in the order supplied
/// (callers pass newest first).
pub fn format_entries_for_prompt(entries: &[DiaryEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "Date: {}\nLocation: {}\nSeverity: {}\nLesions: {} total\nPhotos: {} photos attached\nNotes: {}",
                entry.timestamp.format("%Y-%m-%d %H:%M"),
                entry.location,
                entry.severity,
                entry.total_count(),
                entry.photos.len(),
                entry.notes
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build the full summary prompt for a set of entries
pub fn build_summary_prompt(entries: &[DiaryEntry]) -> String {
    format!(
        "Analyze these symptom diary entries and provide a concise weekly summary focusing on:\n\
         1. Overall trend in severity\n\
         2. Most affected areas\n\
         3. Key observations or patterns\n\
         4. Recommendations based on the patterns\n\n\
         Entries:\n{}",
        format_entries_for_prompt(entries)
    )
}
