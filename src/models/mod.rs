//! Data models module
//!
//! Contains all data structures used throughout the library:
//! - Diary entry and identity types
//! - Body region enumeration and per-region counts

pub mod entry;
pub mod region;

pub use entry::{DiaryEntry, EntryBuilder, EntryId, Photo};
pub use region::{Region, RegionCounts};
