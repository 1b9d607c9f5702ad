//! Record Ingestion - CSV text parsed into a staging batch.
//!
//! Parsing never mutates any collection: the whole text parses into a
//! staging list first, and the owning [`GradeBook`](crate::GradeBook)
//! commits the batch atomically (all rows or none).
//!
//! Format: blank lines are dropped, the first remaining line is treated as a
//! header and discarded unconditionally (even if it holds data), and each
//! following line parses as `subject,grade,date,examType` with per-field
//! trimming. A line is accepted only when all four fields are non-empty, the
//! grade parses as a number, and the date parses as `YYYY-MM-DD`. Malformed
//! lines are skipped without individual reporting; extra fields are ignored.

use chrono::NaiveDate;

/// A parsed-but-uncommitted grade entry. Ids and timestamps are assigned at
/// commit time by the owning collection.
#[derive(Clone, Debug, PartialEq)]
pub struct NewGrade {
    pub subject: String,
    pub grade: f64,
    pub date: NaiveDate,
    pub exam_type: String,
}

/// Parse CSV text into a staging list of grade entries.
pub fn parse_csv(text: &str) -> Vec<NewGrade> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .skip(1) // header row
        .filter_map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Option<NewGrade> {
    let mut fields = line.split(',').map(str::trim);
    let subject = fields.next().filter(|f| !f.is_empty())?;
    let grade = fields.next().filter(|f| !f.is_empty())?;
    let date = fields.next().filter(|f| !f.is_empty())?;
    let exam_type = fields.next().filter(|f| !f.is_empty())?;

    // An unparsable grade or date rejects the whole line.
    let grade: f64 = grade.parse().ok()?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;

    Some(NewGrade {
        subject: subject.to_string(),
        grade,
        date,
        exam_type: exam_type.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_row() {
        let rows = parse_csv("Subject,Grade,Date,Type\nMath,88,2024-01-01,midterm\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].subject, "Math");
        assert_eq!(rows[0].grade, 88.0);
        assert_eq!(rows[0].date.to_string(), "2024-01-01");
        assert_eq!(rows[0].exam_type, "midterm");
    }

    #[test]
    fn test_header_only_yields_nothing() {
        assert!(parse_csv("Subject,Grade,Date,Type\n").is_empty());
        assert!(parse_csv("").is_empty());
    }

    #[test]
    fn test_first_line_discarded_even_if_it_holds_data() {
        let rows = parse_csv("Math,88,2024-01-01,midterm\nEnglish,72,2024-01-02,quiz\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].subject, "English");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let rows = parse_csv("h,h,h,h\n  Math , 88 , 2024-01-01 , midterm \n");
        assert_eq!(rows[0].subject, "Math");
        assert_eq!(rows[0].exam_type, "midterm");
    }

    #[test]
    fn test_blank_lines_skipped_before_header_detection() {
        // The first non-blank line is the header.
        let rows = parse_csv("\n\nSubject,Grade,Date,Type\nMath,88,2024-01-01,midterm\n\n");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_malformed_lines_silently_skipped() {
        let csv = "Subject,Grade,Date,Type\n\
                   Math,88,2024-01-01,midterm\n\
                   missing,fields\n\
                   ,90,2024-01-02,quiz\n\
                   English,,2024-01-03,quiz\n\
                   History,81,2024-01-04,final\n";
        let rows = parse_csv(csv);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].subject, "Math");
        assert_eq!(rows[1].subject, "History");
    }

    #[test]
    fn test_unparsable_grade_or_date_rejects_the_line() {
        let csv = "Subject,Grade,Date,Type\n\
                   Math,ninety,2024-01-01,midterm\n\
                   English,90,January 2nd,quiz\n";
        assert!(parse_csv(csv).is_empty());
    }

    #[test]
    fn test_extra_fields_ignored() {
        let rows = parse_csv("h,h,h,h\nMath,88,2024-01-01,midterm,extra,columns\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].exam_type, "midterm");
    }
}
