use thiserror::Error;
use validator::Validate;

use crate::schemas::quiz::{QuestionCreate, QuestionKind, QuizCreate};

#[derive(Debug, Error)]
pub(crate) enum DraftError {
    #[error("question needs text before it can be added")]
    EmptyQuestionText,
    #[error("question needs at least one correct answer")]
    NoCorrectAnswer,
    #[error("quiz needs at least one question")]
    NoQuestions,
    #[error("{0}")]
    Invalid(String),
}

/// One question being edited. Four option slots to start, matching the form
/// the backend expects; empty trailing options are dropped on add.
#[derive(Debug, Clone)]
pub(crate) struct QuestionDraft {
    pub(crate) text: String,
    kind: QuestionKind,
    pub(crate) options: Vec<String>,
    correct: Vec<usize>,
    pub(crate) points: i64,
}

impl QuestionDraft {
    pub(crate) fn new() -> Self {
        Self {
            text: String::new(),
            kind: QuestionKind::Single,
            options: vec![String::new(); 4],
            correct: Vec::new(),
            points: 1,
        }
    }

    pub(crate) fn correct(&self) -> &[usize] {
        &self.correct
    }

    /// Switching type invalidates the marked answers: what counted as a valid
    /// multi-selection is meaningless for a single-choice question and vice
    /// versa.
    pub(crate) fn set_kind(&mut self, kind: QuestionKind) {
        if self.kind != kind {
            self.kind = kind;
            self.correct.clear();
        }
    }

    pub(crate) fn mark_correct(&mut self, option: usize) -> bool {
        if option >= self.options.len() {
            return false;
        }
        match self.kind {
            // Single-choice marking always replaces; re-marking the same
            // option keeps it marked.
            QuestionKind::Single => {
                self.correct = vec![option];
            }
            QuestionKind::Multiple => {
                if let Some(index) = self.correct.iter().position(|&o| o == option) {
                    self.correct.remove(index);
                } else {
                    self.correct.push(option);
                    self.correct.sort_unstable();
                }
            }
        }
        true
    }

    fn validate(&self) -> Result<(), DraftError> {
        if self.text.trim().is_empty() {
            return Err(DraftError::EmptyQuestionText);
        }
        if self.correct.is_empty() {
            return Err(DraftError::NoCorrectAnswer);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct QuizDraft {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) duration: i64,
    questions: Vec<QuestionCreate>,
}

impl QuizDraft {
    pub(crate) fn new() -> Self {
        Self { title: String::new(), description: String::new(), duration: 10, questions: Vec::new() }
    }

    pub(crate) fn questions(&self) -> &[QuestionCreate] {
        &self.questions
    }

    pub(crate) fn total_points(&self) -> i64 {
        self.questions.iter().map(|question| question.points).sum()
    }

    pub(crate) fn add_question(&mut self, draft: QuestionDraft) -> Result<(), DraftError> {
        draft.validate()?;

        let options: Vec<String> = draft
            .options
            .into_iter()
            .map(|option| option.trim().to_string())
            .filter(|option| !option.is_empty())
            .collect();
        let correct: Vec<usize> =
            draft.correct.into_iter().filter(|&index| index < options.len()).collect();
        if correct.is_empty() {
            return Err(DraftError::NoCorrectAnswer);
        }

        self.questions.push(QuestionCreate {
            question_text: draft.text.trim().to_string(),
            question_type: draft.kind,
            options,
            correct_answers: correct,
            points: draft.points.max(1),
        });
        Ok(())
    }

    /// A quiz is only ever persisted with at least one question.
    pub(crate) fn into_create(self, module_id: &str) -> Result<QuizCreate, DraftError> {
        if self.questions.is_empty() {
            return Err(DraftError::NoQuestions);
        }
        let create = QuizCreate {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            duration: self.duration,
            module_id: module_id.to_string(),
            questions: self.questions,
        };
        create.validate().map_err(|e| DraftError::Invalid(e.to_string()))?;
        Ok(create)
    }
}
