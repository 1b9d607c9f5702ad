//! Statistics Engine - pure, stateless derivations over the grade collection.
//!
//! Every function takes the collection explicitly and is deterministic for a
//! given input; nothing here touches storage or the clock.

use std::collections::BTreeMap;

use crate::model::GradeRecord;

/// Arithmetic mean of all grades. `0.0` for an empty collection (sentinel,
/// not an error).
pub fn overall_average(grades: &[GradeRecord]) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }
    grades.iter().map(|g| g.grade).sum::<f64>() / grades.len() as f64
}

/// Mean grade per subject. Subjects group on exact text match
/// (case-sensitive, no trimming beyond ingestion-time normalization).
pub fn subject_averages(grades: &[GradeRecord]) -> BTreeMap<String, f64> {
    let mut sums: BTreeMap<String, (f64, u32)> = BTreeMap::new();
    for g in grades {
        let slot = sums.entry(g.subject.clone()).or_insert((0.0, 0));
        slot.0 += g.grade;
        slot.1 += 1;
    }
    sums.into_iter()
        .map(|(subject, (sum, count))| (subject, sum / count as f64))
        .collect()
}

/// Every subject present in the collection, each once, first-seen order.
pub fn unique_subjects(grades: &[GradeRecord]) -> Vec<String> {
    let mut subjects: Vec<String> = Vec::new();
    for g in grades {
        if !subjects.iter().any(|s| s == &g.subject) {
            subjects.push(g.subject.clone());
        }
    }
    subjects
}

/// Highest grade, or `None` when the collection is empty.
pub fn max_grade(grades: &[GradeRecord]) -> Option<f64> {
    grades.iter().map(|g| g.grade).reduce(f64::max)
}

/// Lowest grade, or `None` when the collection is empty.
pub fn min_grade(grades: &[GradeRecord]) -> Option<f64> {
    grades.iter().map(|g| g.grade).reduce(f64::min)
}

/// Grades in ascending date order. The sort is stable: records sharing a
/// date keep their relative insertion order.
pub fn sorted_by_date(grades: &[GradeRecord]) -> Vec<GradeRecord> {
    let mut sorted = grades.to_vec();
    sorted.sort_by_key(|g| g.date);
    sorted
}

/// Prefix-mean sequence over date-ordered grades: element i is the mean of
/// the first i + 1 grades. Input must already be sorted ascending by date
/// (see [`sorted_by_date`]). Used for the trend line chart.
pub fn running_average(sorted: &[GradeRecord]) -> Vec<f64> {
    let mut averages = Vec::with_capacity(sorted.len());
    let mut sum = 0.0;
    for (i, g) in sorted.iter().enumerate() {
        sum += g.grade;
        averages.push(sum / (i + 1) as f64);
    }
    averages
}
