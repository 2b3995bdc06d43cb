//! Core data models used throughout the sync pipeline.
//!
//! These types represent favorites at each stage of a scan: raw entries as
//! parsed from the source document, normalized entries ready for matching,
//! and the persisted rows the reconciler maintains in SQLite.

use serde::Serialize;

/// Raw favorite record as parsed from the source document, before
/// classification. Lives only for the duration of one scan.
#[derive(Debug, Clone)]
pub struct RawFavoriteEntry {
    pub name: String,
    pub target_raw: String,
    pub thumb: Option<String>,
}

/// Coarse category assigned to a favorite's command target. Only
/// `FileOrMedia` and `StackFile` are eligible for library matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    FileOrMedia,
    DatabaseItem,
    StackFile,
    PluginOrScript,
    Unknown,
}

impl Classification {
    /// Stable tag stored in the `target_classification` column and used as
    /// the third component of the normalized key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::FileOrMedia => "file_or_media",
            Classification::DatabaseItem => "database_item",
            Classification::StackFile => "stack_file",
            Classification::PluginOrScript => "plugin_or_script",
            Classification::Unknown => "unknown",
        }
    }

    /// Display category persisted as `favorite_type`.
    pub fn favorite_type(&self) -> &'static str {
        match self {
            Classification::FileOrMedia | Classification::StackFile => "media",
            Classification::DatabaseItem => "database",
            Classification::PluginOrScript => "addon",
            Classification::Unknown => "unknown",
        }
    }

    /// Whether this class carries a path worth matching against the library.
    pub fn matchable(&self) -> bool {
        matches!(self, Classification::FileOrMedia | Classification::StackFile)
    }
}

/// A favorite after normalization and classification, ready for matching
/// and upsert. Entries without an extractable path keep an empty
/// `normalized_path` — they are still first-class favorites.
#[derive(Debug, Clone)]
pub struct NormalizedFavorite {
    pub name: String,
    pub original_path: String,
    pub normalized_path: String,
    pub favorite_type: String,
    pub target_raw: String,
    pub classification: Classification,
    pub normalized_key: String,
    pub thumb: Option<String>,
}

/// A persisted favorite row. `normalized_key` is unique across all rows;
/// rows are retired in place (`present = false`), never deleted.
#[derive(Debug, Clone, Serialize)]
pub struct PersistedFavorite {
    pub id: String,
    pub name: String,
    pub normalized_path: String,
    pub original_path: String,
    pub favorite_type: String,
    pub target_raw: String,
    pub target_classification: String,
    pub library_movie_id: Option<String>,
    pub is_mapped: bool,
    pub is_missing: bool,
    pub present: bool,
    pub thumb_ref: Option<String>,
    pub first_seen: i64,
    pub last_seen: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// What triggered a scan. Stored in `scan_log.scan_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanType {
    /// Explicit user-triggered refresh.
    Manual,
    /// The one-time enablement event; always a forced full scan.
    Initial,
}

impl ScanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanType::Manual => "manual",
            ScanType::Initial => "initial",
        }
    }
}

/// One reconciliation attempt, as recorded in the append-only `scan_log`
/// table. Never updated after insertion.
#[derive(Debug, Clone, Serialize)]
pub struct ScanRecord {
    pub id: String,
    pub scan_type: String,
    pub file_path: String,
    /// Source mtime in Unix milliseconds; `None` when the source was never
    /// located.
    pub file_modified: Option<i64>,
    pub items_found: i64,
    pub items_mapped: i64,
    pub items_added: i64,
    pub items_updated: i64,
    pub scan_duration_ms: i64,
    pub success: bool,
    pub error_message: Option<String>,
    pub created_at: i64,
}

/// Result of one `scan()` call: either the outcome of a completed attempt
/// or the previous outcome when the change check short-circuited.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub record: ScanRecord,
    /// True when the source was unchanged and nothing was read or written.
    pub short_circuited: bool,
}
