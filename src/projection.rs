//! Target Projection - the average needed on remaining exams to reach a goal.
//!
//! Pure classification with no side effects; the caller owns all wording and
//! presentation.

use serde::Serialize;
use thiserror::Error;

/// Precondition failures rejected before the projection math runs.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// Division-by-zero guard: at least one remaining exam is required.
    #[error("Remaining exam count must be at least 1")]
    NoRemainingExams,
}

/// Classification tier for a projected requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetOutcome {
    /// Required average is negative: the target is already exceeded.
    AlreadyExceeded,
    /// Achievable with room to spare (required <= 90).
    Comfortable,
    /// Achievable but demanding (90 < required <= 100).
    Tight,
    /// Required average exceeds 100%.
    NotAchievable,
}

impl TargetOutcome {
    /// Stable string form, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TargetOutcome::AlreadyExceeded => "already_exceeded",
            TargetOutcome::Comfortable => "comfortable",
            TargetOutcome::Tight => "tight",
            TargetOutcome::NotAchievable => "not_achievable",
        }
    }
}

/// A projected requirement and its classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Average needed across the remaining exams.
    pub required: f64,
    pub outcome: TargetOutcome,
}

/// Average needed across `remaining` future exams for the overall mean to
/// reach `target`, given `current_count` recorded grades averaging
/// `current_average`.
///
/// `remaining == 0` is rejected before the division.
pub fn required_average(
    target: f64,
    remaining: u32,
    current_average: f64,
    current_count: usize,
) -> Result<Projection, ProjectionError> {
    if remaining == 0 {
        return Err(ProjectionError::NoRemainingExams);
    }

    let total = current_count as f64 + remaining as f64;
    let required = (target * total - current_average * current_count as f64) / remaining as f64;

    Ok(Projection {
        required,
        outcome: classify(required),
    })
}

fn classify(required: f64) -> TargetOutcome {
    if required > 100.0 {
        TargetOutcome::NotAchievable
    } else if required < 0.0 {
        TargetOutcome::AlreadyExceeded
    } else if required <= 90.0 {
        TargetOutcome::Comfortable
    } else {
        TargetOutcome::Tight
    }
}
