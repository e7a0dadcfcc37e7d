use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum QuestionKind {
    Single,
    Multiple,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Question {
    #[serde(alias = "_id")]
    pub(crate) id: String,
    #[serde(alias = "questionText")]
    pub(crate) text: String,
    #[serde(alias = "questionType")]
    pub(crate) kind: QuestionKind,
    pub(crate) options: Vec<String>,
    #[serde(default = "default_points")]
    pub(crate) points: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Quiz {
    #[serde(alias = "_id")]
    pub(crate) id: String,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(alias = "module", deserialize_with = "crate::schemas::deserialize_id_ref")]
    pub(crate) module_id: String,
    /// Attempt duration in minutes.
    pub(crate) duration: i64,
    #[serde(default)]
    pub(crate) questions: Vec<Question>,
    #[serde(alias = "totalPoints", default)]
    pub(crate) total_points: i64,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct QuestionCreate {
    #[serde(rename = "questionText")]
    pub(crate) question_text: String,
    #[serde(rename = "questionType")]
    pub(crate) question_type: QuestionKind,
    pub(crate) options: Vec<String>,
    #[serde(rename = "correctAnswers")]
    pub(crate) correct_answers: Vec<usize>,
    pub(crate) points: i64,
}

#[derive(Debug, Serialize, Validate)]
pub(crate) struct QuizCreate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub(crate) title: String,
    pub(crate) description: String,
    #[validate(range(min = 1, message = "duration must be positive"))]
    pub(crate) duration: i64,
    #[serde(rename = "moduleId")]
    pub(crate) module_id: String,
    pub(crate) questions: Vec<QuestionCreate>,
}

fn default_points() -> i64 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_decodes_backend_shape() {
        let quiz: Quiz = serde_json::from_value(serde_json::json!({
            "_id": "q1",
            "title": "Fractions",
            "description": "Basics",
            "module": {"_id": "m1", "title": "Algebra"},
            "duration": 10,
            "totalPoints": 3,
            "questions": [
                {
                    "_id": "qq1",
                    "questionText": "1/2 + 1/2?",
                    "questionType": "single",
                    "options": ["1", "2"],
                    "points": 1
                },
                {
                    "_id": "qq2",
                    "questionText": "Even numbers?",
                    "questionType": "multiple",
                    "options": ["1", "2", "3", "4"],
                    "points": 2
                }
            ]
        }))
        .unwrap();

        assert_eq!(quiz.module_id, "m1");
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.questions[0].kind, QuestionKind::Single);
        assert_eq!(quiz.total_points, quiz.questions.iter().map(|q| q.points).sum::<i64>());
    }
}
