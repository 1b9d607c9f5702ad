//! Badge Engine - a fixed catalogue of achievements with one-way
//! locked → earned transitions.
//!
//! Badges persist as data only. Each catalogue entry names a [`BadgeKind`],
//! and the predicate for a kind lives in [`BadgeKind::check`] — a code table
//! keyed by kind, so no executable logic ever round-trips through storage.
//! Stored badges whose id is not in the catalogue (orphans from older
//! catalogues) are retained untouched and never evaluated.

use crate::model::{Badge, GradeRecord};
use crate::stats;

/// The six badge kinds. Each maps 1:1 to a stable string id in storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeKind {
    FirstA,
    ConsistentImprovement,
    PerfectScore,
    SubjectMaster,
    ExamWarrior,
    HighAchiever,
}

impl BadgeKind {
    /// Stable storage id for this kind.
    pub fn id(self) -> &'static str {
        match self {
            BadgeKind::FirstA => "first_a",
            BadgeKind::ConsistentImprovement => "consistent_improvement",
            BadgeKind::PerfectScore => "perfect_score",
            BadgeKind::SubjectMaster => "subject_master",
            BadgeKind::ExamWarrior => "exam_warrior",
            BadgeKind::HighAchiever => "high_achiever",
        }
    }

    /// Look up a kind from its storage id. Unknown ids return `None`.
    pub fn from_id(id: &str) -> Option<BadgeKind> {
        CATALOGUE
            .iter()
            .map(|spec| spec.kind)
            .find(|kind| kind.id() == id)
    }

    /// Evaluate this kind's predicate against the current grade collection.
    pub fn check(self, grades: &[GradeRecord]) -> bool {
        match self {
            BadgeKind::FirstA => grades.iter().any(|g| g.grade >= 90.0),
            BadgeKind::ConsistentImprovement => consistent_improvement(grades),
            BadgeKind::PerfectScore => grades.iter().any(|g| g.grade == 100.0),
            BadgeKind::SubjectMaster => {
                stats::subject_averages(grades).values().any(|avg| *avg >= 85.0)
            }
            BadgeKind::ExamWarrior => grades.len() >= 10,
            BadgeKind::HighAchiever => {
                grades.len() >= 5 && stats::overall_average(grades) >= 80.0
            }
        }
    }
}

/// Descriptive fields for one catalogue entry.
#[derive(Clone, Copy, Debug)]
pub struct BadgeSpec {
    pub kind: BadgeKind,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

impl BadgeSpec {
    /// A fresh locked badge for this entry.
    fn locked(&self) -> Badge {
        Badge {
            id: self.kind.id().to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
            earned: false,
            earned_at: None,
        }
    }
}

/// The fixed badge catalogue. Order here is evaluation order, which fixes
/// notification order (the predicates themselves are independent).
pub const CATALOGUE: [BadgeSpec; 6] = [
    BadgeSpec {
        kind: BadgeKind::FirstA,
        name: "First A Grade",
        description: "Score your first A grade (90% or above)",
        icon: "\u{1F3AF}",
    },
    BadgeSpec {
        kind: BadgeKind::ConsistentImprovement,
        name: "Consistent Improvement",
        description: "Show improvement over 3 consecutive exams",
        icon: "\u{1F4C8}",
    },
    BadgeSpec {
        kind: BadgeKind::PerfectScore,
        name: "Perfect Score",
        description: "Achieve a perfect 100% score",
        icon: "\u{1F4AF}",
    },
    BadgeSpec {
        kind: BadgeKind::SubjectMaster,
        name: "Subject Master",
        description: "Maintain 85%+ average in any subject",
        icon: "\u{1F451}",
    },
    BadgeSpec {
        kind: BadgeKind::ExamWarrior,
        name: "Exam Warrior",
        description: "Complete 10 or more exams",
        icon: "\u{2694}\u{FE0F}",
    },
    BadgeSpec {
        kind: BadgeKind::HighAchiever,
        name: "High Achiever",
        description: "Maintain overall average above 80%",
        icon: "\u{1F3C6}",
    },
];

/// Merge the fixed catalogue into stored badge state (run once at startup).
///
/// A pure reducer over the two sequences keyed by id: catalogue entries with
/// a matching stored badge refresh its descriptive fields while preserving
/// `earned`/`earnedDate`; entries missing from storage are inserted locked;
/// stored badges with unknown ids are retained untouched. Afterwards every
/// catalogue id is present.
pub fn merge_catalogue(stored: Vec<Badge>) -> Vec<Badge> {
    let mut merged = stored;
    for spec in CATALOGUE.iter() {
        if let Some(existing) = merged.iter_mut().find(|b| b.id == spec.kind.id()) {
            existing.name = spec.name.to_string();
            existing.description = spec.description.to_string();
            existing.icon = spec.icon.to_string();
        } else {
            merged.push(spec.locked());
        }
    }
    merged
}

/// Evaluate every still-locked catalogue badge against the current grades.
///
/// Newly satisfied badges flip to earned (one-way, never reverts) with
/// `earned_at = now_ms`. Returns the ids of badges that transitioned on this
/// call, in catalogue order, for notification. Already-earned badges are
/// never re-evaluated.
pub fn evaluate(badges: &mut [Badge], grades: &[GradeRecord], now_ms: u64) -> Vec<String> {
    let mut newly_earned = Vec::new();

    for spec in CATALOGUE.iter() {
        if let Some(badge) = badges.iter_mut().find(|b| b.id == spec.kind.id()) {
            if badge.earned {
                continue;
            }
            if spec.kind.check(grades) {
                badge.earned = true;
                badge.earned_at = Some(now_ms);
                newly_earned.push(badge.id.clone());
            }
        }
    }

    newly_earned
}

/// Strict 3-in-a-row increase anywhere in the date-sorted grade sequence.
fn consistent_improvement(grades: &[GradeRecord]) -> bool {
    if grades.len() < 3 {
        return false;
    }
    let sorted = stats::sorted_by_date(grades);
    sorted
        .windows(3)
        .any(|w| w[0].grade < w[1].grade && w[1].grade < w[2].grade)
}
