//! GradeBook Core - Browser-Resident Grade Tracking
//!
//! Records exam grades (manually or via CSV import), derives descriptive
//! statistics, projects the average needed on remaining exams to reach a
//! target, and awards achievement badges. Compiled to WebAssembly; the
//! JavaScript side owns all rendering and forwards user actions in.
//!
//! State lives in a single owned container ([`GradeBook`]) persisted to
//! browser `localStorage`; nothing is process-global. All operations run to
//! completion on the single browser thread. A multi-threaded host must add
//! its own exclusive-access synchronization around the container.
//!
//! ## Usage in JavaScript
//!
//! ```javascript
//! import init, { GradeBook } from 'gradebook-core';
//!
//! await init();
//! const book = new GradeBook();
//!
//! // Manual entry; returns ids of any badges this unlocked
//! const unlocked = book.add_grade("Math", 95, "2024-01-01", "midterm");
//!
//! // CSV import: the text is parsed fully, then committed atomically
//! const report = book.import_csv(csvText);
//! console.log(report.added, report.newly_earned);
//!
//! // Derived views for rendering
//! const average = book.overall_average();
//! const perSubject = JSON.parse(book.subject_averages_json());
//! const badges = JSON.parse(book.badges_json());
//!
//! // Target projection
//! const projection = book.required_average(85, 2);
//! console.log(projection.required, projection.outcome);
//! ```
//!
//! ## Build
//!
//! ```bash
//! wasm-pack build --target web --out-dir pkg
//! ```

pub mod badges;
pub mod ingest;
pub mod model;
pub mod projection;
pub mod schedule;
pub mod stats;
pub mod storage;

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;
use wasm_bindgen::prelude::*;

use crate::model::{Badge, ExamRecord, GradeRecord};
use crate::projection::{ProjectionError, TargetOutcome};
use crate::storage::{Store, BADGES_KEY, EXAMS_KEY, GRADES_KEY};

// Initialize panic hook for better error messages in browser console
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

// ============================================================================
// Errors
// ============================================================================

/// Failures surfaced across the wasm boundary as error strings. None of
/// these mutate state: a rejected call leaves every collection untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Input-validation: unparsable calendar date.
    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    /// Input-validation: CSV text with no acceptable rows.
    #[error("No valid grade data found in CSV")]
    EmptyImport,

    /// Computation-precondition: projection requested before any grades
    /// exist.
    #[error("Add some grades first to use the target calculator")]
    NoGrades,

    /// Computation-precondition: projection with zero remaining exams.
    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

impl From<Error> for JsValue {
    fn from(err: Error) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

// ============================================================================
// Result types returned to JavaScript
// ============================================================================

/// Result of a CSV import.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct ImportReport {
    added: u32,
    newly_earned: Vec<String>,
}

#[wasm_bindgen]
impl ImportReport {
    /// Number of grade records committed.
    #[wasm_bindgen(getter)]
    pub fn added(&self) -> u32 {
        self.added
    }

    /// Ids of badges unlocked by this import.
    #[wasm_bindgen(getter)]
    pub fn newly_earned(&self) -> Vec<String> {
        self.newly_earned.clone()
    }
}

/// Projection of the average needed on remaining exams.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct TargetProjection {
    required: f64,
    outcome: TargetOutcome,
}

#[wasm_bindgen]
impl TargetProjection {
    /// Required average across the remaining exams.
    #[wasm_bindgen(getter)]
    pub fn required(&self) -> f64 {
        self.required
    }

    /// Classification tier: `"already_exceeded"`, `"comfortable"`,
    /// `"tight"`, or `"not_achievable"`. The caller owns the wording.
    #[wasm_bindgen(getter)]
    pub fn outcome(&self) -> String {
        self.outcome.as_str().to_string()
    }
}

// ============================================================================
// GradeBook facade
// ============================================================================

/// The owned state container: grade, exam, and badge collections plus the
/// storage backend persisting them. Every engine call receives the
/// collections explicitly.
#[wasm_bindgen]
pub struct GradeBook {
    grades: Vec<GradeRecord>,
    exams: Vec<ExamRecord>,
    badges: Vec<Badge>,
    store: Box<dyn Store>,
}

#[wasm_bindgen]
impl GradeBook {
    /// Open the gradebook backed by browser `localStorage` (wasm) or an
    /// in-memory store (native). Absent or unreadable collections fall back
    /// to empty, then the badge catalogue is merged into stored badge state.
    #[wasm_bindgen(constructor)]
    pub fn new() -> GradeBook {
        #[cfg(feature = "console_error_panic_hook")]
        set_panic_hook();

        #[cfg(target_arch = "wasm32")]
        let store: Box<dyn Store> = Box::new(storage::LocalStorage);
        #[cfg(not(target_arch = "wasm32"))]
        let store: Box<dyn Store> = Box::new(storage::MemoryStore::default());

        GradeBook::with_store(store)
    }

    /// Append one grade record, persist, and re-evaluate badges. Returns
    /// the ids of badges newly earned by this entry.
    pub fn add_grade(
        &mut self,
        subject: String,
        grade: f64,
        date: &str,
        exam_type: String,
    ) -> Result<Vec<String>, Error> {
        let date = parse_date(date)?;
        self.grades.push(GradeRecord {
            id: Uuid::new_v4(),
            subject,
            grade,
            date,
            exam_type,
            timestamp: current_time_ms(),
        });
        self.persist_grades();
        Ok(self.unlock_badges())
    }

    /// Schedule an exam.
    pub fn add_exam(&mut self, subject: String, date: &str) -> Result<(), Error> {
        let date = parse_date(date)?;
        self.exams.push(ExamRecord {
            id: Uuid::new_v4(),
            subject,
            date,
            timestamp: current_time_ms(),
        });
        self.persist_exams();
        Ok(())
    }

    /// Import CSV text. The whole text parses into a staging batch before
    /// any mutation; the batch then commits atomically. A text yielding no
    /// acceptable rows is rejected without touching state.
    pub fn import_csv(&mut self, text: &str) -> Result<ImportReport, Error> {
        let staged = ingest::parse_csv(text);
        if staged.is_empty() {
            return Err(Error::EmptyImport);
        }

        let now = current_time_ms();
        let added = staged.len() as u32;
        for row in staged {
            self.grades.push(GradeRecord {
                id: Uuid::new_v4(),
                subject: row.subject,
                grade: row.grade,
                date: row.date,
                exam_type: row.exam_type,
                timestamp: now,
            });
        }
        self.persist_grades();

        Ok(ImportReport {
            added,
            newly_earned: self.unlock_badges(),
        })
    }

    /// Project the average needed on `remaining` exams to reach `target`.
    /// Rejected when no grades are recorded or `remaining` is zero.
    pub fn required_average(
        &self,
        target: f64,
        remaining: u32,
    ) -> Result<TargetProjection, Error> {
        if self.grades.is_empty() {
            return Err(Error::NoGrades);
        }
        let projection = projection::required_average(
            target,
            remaining,
            stats::overall_average(&self.grades),
            self.grades.len(),
        )?;
        Ok(TargetProjection {
            required: projection.required,
            outcome: projection.outcome,
        })
    }

    /// Re-run badge evaluation against the current collections. Returns
    /// newly earned ids.
    pub fn evaluate_badges(&mut self) -> Vec<String> {
        self.unlock_badges()
    }

    /// Arithmetic mean of all grades; 0 when none are recorded.
    pub fn overall_average(&self) -> f64 {
        stats::overall_average(&self.grades)
    }

    /// Highest grade, or `undefined` when none are recorded.
    pub fn max_grade(&self) -> Option<f64> {
        stats::max_grade(&self.grades)
    }

    /// Lowest grade, or `undefined` when none are recorded.
    pub fn min_grade(&self) -> Option<f64> {
        stats::min_grade(&self.grades)
    }

    /// Number of recorded grades.
    pub fn grade_count(&self) -> u32 {
        self.grades.len() as u32
    }

    /// Number of distinct subjects across recorded grades.
    pub fn subject_count(&self) -> u32 {
        stats::unique_subjects(&self.grades).len() as u32
    }

    /// Number of earned badges.
    pub fn earned_badge_count(&self) -> u32 {
        self.badges.iter().filter(|b| b.earned).count() as u32
    }

    /// Per-subject averages as a JSON object (subject -> mean), for the bar
    /// chart.
    pub fn subject_averages_json(&self) -> String {
        to_json(&stats::subject_averages(&self.grades), "{}")
    }

    /// Prefix means over date-ordered grades as a JSON array, for the trend
    /// line chart.
    pub fn running_average_json(&self) -> String {
        let sorted = stats::sorted_by_date(&self.grades);
        to_json(&stats::running_average(&sorted), "[]")
    }

    /// Full badge state as a JSON array, for badge cards.
    pub fn badges_json(&self) -> String {
        to_json(&self.badges, "[]")
    }

    /// Exams dated today or later as a JSON array, ascending by date, for
    /// the countdown view.
    pub fn upcoming_exams_json(&self) -> String {
        to_json(&schedule::upcoming_exams(&self.exams, today()), "[]")
    }

    /// The most recent `limit` grades by creation time, newest first, as a
    /// JSON array, for the activity feed.
    pub fn recent_grades_json(&self, limit: u32) -> String {
        let mut recent: Vec<&GradeRecord> = self.grades.iter().collect();
        recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        recent.truncate(limit as usize);
        to_json(&recent, "[]")
    }

    /// Whole days from today until `date`. Negative for past dates.
    pub fn days_until(&self, date: &str) -> Result<i64, Error> {
        Ok(schedule::days_until(parse_date(date)?, today()))
    }

    /// Bulk-clear every collection and persist the reset state. Badges
    /// return to the locked catalogue defaults.
    pub fn clear_all(&mut self) {
        self.grades.clear();
        self.exams.clear();
        self.badges = badges::merge_catalogue(Vec::new());
        self.persist_grades();
        self.persist_exams();
        self.persist_badges();
    }
}

impl GradeBook {
    /// Open the gradebook over an explicit storage backend.
    pub fn with_store(store: Box<dyn Store>) -> GradeBook {
        let grades = load_collection(store.as_ref(), GRADES_KEY);
        let exams = load_collection(store.as_ref(), EXAMS_KEY);
        let stored: Vec<Badge> = load_collection(store.as_ref(), BADGES_KEY);
        let badges = badges::merge_catalogue(stored);

        let book = GradeBook {
            grades,
            exams,
            badges,
            store,
        };
        // The merged catalogue is the stored baseline from here on.
        book.persist_badges();
        book
    }

    fn unlock_badges(&mut self) -> Vec<String> {
        let newly = badges::evaluate(&mut self.badges, &self.grades, current_time_ms());
        if !newly.is_empty() {
            self.persist_badges();
        }
        newly
    }

    fn persist_grades(&self) {
        self.persist(GRADES_KEY, &self.grades);
    }

    fn persist_exams(&self) {
        self.persist(EXAMS_KEY, &self.exams);
    }

    fn persist_badges(&self) {
        self.persist(BADGES_KEY, &self.badges);
    }

    fn persist<T: serde::Serialize>(&self, key: &str, value: &T) {
        if let Ok(json) = serde_json::to_string(value) {
            self.store.save(key, &json);
        }
    }
}

impl Default for GradeBook {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn load_collection<T: serde::de::DeserializeOwned>(store: &dyn Store, key: &str) -> Vec<T> {
    // Unreadable stored data is treated as absence, never propagated.
    store
        .load(key)
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default()
}

fn to_json<T: serde::Serialize>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| fallback.to_string())
}

fn parse_date(date: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| Error::InvalidDate(date.to_string()))
}

/// Today's calendar date derived from the wall clock.
fn today() -> NaiveDate {
    chrono::DateTime::from_timestamp_millis(current_time_ms() as i64)
        .map(|dt| dt.date_naive())
        .unwrap_or_default()
}

/// Get current time in milliseconds
fn current_time_ms() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        use js_sys::Date;
        Date::now() as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64
    }
}

// ============================================================================
// Tests
// ============================================================================


// ============================================================================
// WASM-specific Tests
// ============================================================================
