use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::CourseId;
use crate::model::navigator::QuizOutcome;

/// Entry of the local quiz-results cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResultRecord {
    pub course_id: CourseId,
    pub course_title: String,
    pub sublesson_title: String,
    pub marks: u32,
    pub total_marks: u32,
    pub timestamp: DateTime<Utc>,
}

impl QuizResultRecord {
    #[must_use]
    pub fn from_outcome(outcome: &QuizOutcome, recorded_at: DateTime<Utc>) -> Self {
        Self {
            course_id: outcome.course_id.clone(),
            course_title: outcome.course_title.clone(),
            sublesson_title: outcome.sublesson_title.clone(),
            marks: u32::try_from(outcome.marks).unwrap_or(u32::MAX),
            total_marks: u32::try_from(outcome.total_marks).unwrap_or(u32::MAX),
            timestamp: recorded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn record_uses_camel_case_fields() {
        let outcome = QuizOutcome {
            course_id: CourseId::new("c1"),
            course_title: "Rust".into(),
            sublesson_title: "Borrowing".into(),
            marks: 2,
            total_marks: 3,
        };
        let record = QuizResultRecord::from_outcome(&outcome, fixed_now());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["courseId"], "c1");
        assert_eq!(json["totalMarks"], 3);
        assert_eq!(json["sublessonTitle"], "Borrowing");
    }
}
