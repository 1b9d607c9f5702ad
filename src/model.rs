//! Record and badge types persisted through the storage adapter.
//!
//! Everything here round-trips through JSON (`serde_json`) with camelCase
//! field names, the same layout the presentation layer reads back out of
//! `localStorage`. Badges persist as data only — the predicate for a badge
//! lives in the code table in [`crate::badges`], never in storage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One scored exam or assessment entry. Immutable after creation; removed
/// only by a bulk clear of the whole collection.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRecord {
    pub id: Uuid,
    pub subject: String,
    /// Percentage score, nominally in [0, 100]. Not strictly validated.
    pub grade: f64,
    pub date: NaiveDate,
    pub exam_type: String,
    /// Creation instant, milliseconds since the Unix epoch.
    pub timestamp: u64,
}

/// A scheduled exam without a score. Independent of the grade collection.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamRecord {
    pub id: Uuid,
    pub subject: String,
    pub date: NaiveDate,
    /// Creation instant, milliseconds since the Unix epoch.
    pub timestamp: u64,
}

/// Achievement badge state.
///
/// `earned` transitions false → true exactly once and never reverts;
/// `earned == true` implies `earned_at` is set. The descriptive fields are
/// refreshed from the fixed catalogue on every startup, so edits to the
/// catalogue propagate to stored badges without losing earned state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    /// Stable key, e.g. `first_a`. Ids outside the catalogue are retained
    /// in storage but never evaluated.
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub earned: bool,
    /// Unlock instant, milliseconds since the Unix epoch.
    #[serde(rename = "earnedDate")]
    pub earned_at: Option<u64>,
}
