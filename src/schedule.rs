//! Exam schedule queries - upcoming exams and countdown math.

use chrono::NaiveDate;

use crate::model::ExamRecord;

/// Exams dated today or later, ascending by date.
pub fn upcoming_exams(exams: &[ExamRecord], today: NaiveDate) -> Vec<ExamRecord> {
    let mut upcoming: Vec<ExamRecord> = exams
        .iter()
        .filter(|exam| exam.date >= today)
        .cloned()
        .collect();
    upcoming.sort_by_key(|exam| exam.date);
    upcoming
}

/// Signed whole days from `today` until `date`. Negative for past dates.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn exam(subject: &str, date: &str) -> ExamRecord {
        ExamRecord {
            id: Uuid::new_v4(),
            subject: subject.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            timestamp: 0,
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_upcoming_filters_past_and_sorts_ascending() {
        let exams = vec![
            exam("History", "2024-03-10"),
            exam("Math", "2024-02-01"),
            exam("English", "2024-02-20"),
        ];
        let upcoming = upcoming_exams(&exams, date("2024-02-15"));
        let subjects: Vec<&str> = upcoming.iter().map(|e| e.subject.as_str()).collect();
        assert_eq!(subjects, vec!["English", "History"]);
    }

    #[test]
    fn test_exam_today_counts_as_upcoming() {
        let exams = vec![exam("Math", "2024-02-15")];
        assert_eq!(upcoming_exams(&exams, date("2024-02-15")).len(), 1);
    }

    #[test]
    fn test_days_until() {
        assert_eq!(days_until(date("2024-02-20"), date("2024-02-15")), 5);
        assert_eq!(days_until(date("2024-02-15"), date("2024-02-15")), 0);
        assert_eq!(days_until(date("2024-02-10"), date("2024-02-15")), -5);
    }
}
