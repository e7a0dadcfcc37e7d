use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::core::time::{
    deserialize_offset_datetime_flexible, deserialize_option_offset_datetime_flexible,
};

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AttemptStudent {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) email: String,
}

/// A prior (scored) attempt as listed by the backend.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AttemptSummary {
    #[serde(deserialize_with = "crate::schemas::deserialize_id_ref")]
    pub(crate) quiz: String,
    #[serde(default)]
    pub(crate) student: Option<AttemptStudent>,
    #[serde(default)]
    pub(crate) score: f64,
    #[serde(default)]
    pub(crate) percentage: f64,
    #[serde(alias = "totalPoints", default)]
    pub(crate) total_points: f64,
    #[serde(alias = "createdAt", deserialize_with = "deserialize_offset_datetime_flexible")]
    pub(crate) created_at: OffsetDateTime,
    #[serde(
        alias = "submittedAt",
        default,
        deserialize_with = "deserialize_option_offset_datetime_flexible"
    )]
    pub(crate) submitted_at: Option<OffsetDateTime>,
    /// Seconds from start to submission, when the backend reports it.
    #[serde(alias = "timeTaken", default)]
    pub(crate) time_taken: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SubmittedAnswer {
    #[serde(rename = "questionId")]
    pub(crate) question_id: String,
    #[serde(rename = "selectedAnswers")]
    pub(crate) selected_answers: Vec<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AnswerResult {
    #[serde(alias = "questionId")]
    pub(crate) question_id: String,
    #[serde(alias = "isCorrect", default)]
    pub(crate) is_correct: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AttemptResult {
    pub(crate) score: f64,
    #[serde(alias = "totalPoints")]
    pub(crate) total_points: f64,
    pub(crate) percentage: f64,
    #[serde(default)]
    pub(crate) answers: Vec<AnswerResult>,
}

impl AttemptResult {
    pub(crate) fn correct_count(&self) -> usize {
        self.answers.iter().filter(|answer| answer.is_correct).count()
    }

    pub(crate) fn incorrect_count(&self) -> usize {
        self.answers.len() - self.correct_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempt_summary_decodes_backend_shape() {
        let attempt: AttemptSummary = serde_json::from_value(serde_json::json!({
            "_id": "a1",
            "quiz": {"_id": "q1"},
            "score": 2.0,
            "percentage": 66.7,
            "totalPoints": 3,
            "createdAt": "2025-03-01T09:00:00Z",
            "submittedAt": "2025-03-01T09:08:30Z",
            "timeTaken": 510
        }))
        .unwrap();
        assert_eq!(attempt.quiz, "q1");
        assert_eq!(attempt.time_taken, Some(510));
        assert!(attempt.submitted_at.is_some());
    }

    #[test]
    fn result_breakdown_counts_per_question_flags() {
        let result: AttemptResult = serde_json::from_value(serde_json::json!({
            "score": 2,
            "totalPoints": 3,
            "percentage": 66.66666666666667,
            "answers": [
                {"questionId": "qq1", "isCorrect": true},
                {"questionId": "qq2", "isCorrect": false}
            ]
        }))
        .unwrap();
        assert_eq!(result.correct_count(), 1);
        assert_eq!(result.incorrect_count(), 1);
    }
}
