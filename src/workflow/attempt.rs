use std::collections::BTreeMap;

use crate::api::client::ApiClient;
use crate::api::errors::ApiError;
use crate::api::{attempts, quizzes};
use crate::schemas::attempt::{AttemptResult, AttemptSummary, SubmittedAnswer};
use crate::schemas::quiz::{QuestionKind, Quiz};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AttemptPhase {
    /// Quiz details and prior attempts shown, countdown not yet running.
    StartScreen,
    InProgress,
    Submitted,
}

/// What a countdown tick meant for the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickOutcome {
    /// Not in progress, or the deadline already fired; nothing to do.
    Idle,
    /// Still counting; remaining seconds after this tick.
    Counting(u64),
    /// The clock just hit zero. Fires at most once per attempt.
    AutoSubmit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SubmitTrigger {
    Manual { confirmed: bool },
    TimeExpired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SubmitOutcome {
    Submitted,
    /// Manual submit without confirmation; nothing changed.
    Declined,
}

/// Drives one quiz attempt from start screen through submission. Selection
/// and countdown state live here; the network only sees the start call and
/// the final answer payload.
pub(crate) struct AttemptWorkflow {
    quiz: Quiz,
    previous: Vec<AttemptSummary>,
    attempt_id: Option<String>,
    answers: BTreeMap<String, Vec<usize>>,
    remaining_seconds: u64,
    auto_submit_fired: bool,
    phase: AttemptPhase,
    result: Option<AttemptResult>,
}

impl AttemptWorkflow {
    pub(crate) async fn load(client: &ApiClient, quiz_id: &str) -> Result<Self, ApiError> {
        let (quiz, mut previous) =
            tokio::try_join!(quizzes::get(client, quiz_id), attempts::by_quiz(client, quiz_id))?;
        previous.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(Self::new(quiz, previous))
    }

    pub(crate) fn new(quiz: Quiz, previous: Vec<AttemptSummary>) -> Self {
        Self {
            quiz,
            previous,
            attempt_id: None,
            answers: BTreeMap::new(),
            remaining_seconds: 0,
            auto_submit_fired: false,
            phase: AttemptPhase::StartScreen,
            result: None,
        }
    }

    pub(crate) fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub(crate) fn module_id(&self) -> &str {
        &self.quiz.module_id
    }

    pub(crate) fn phase(&self) -> AttemptPhase {
        self.phase
    }

    pub(crate) fn previous_attempts(&self) -> &[AttemptSummary] {
        &self.previous
    }

    pub(crate) fn best_percentage(&self) -> Option<f64> {
        self.previous.iter().map(|attempt| attempt.percentage).fold(None, |best, value| {
            Some(match best {
                Some(current) if current >= value => current,
                _ => value,
            })
        })
    }

    pub(crate) fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub(crate) fn selected(&self, question_id: &str) -> &[usize] {
        self.answers.get(question_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn result(&self) -> Option<&AttemptResult> {
        self.result.as_ref()
    }

    /// Open the attempt on the backend and arm the countdown. Returns true
    /// when the quiz allows no time at all and the attempt must be submitted
    /// immediately.
    pub(crate) async fn start(&mut self, client: &ApiClient) -> Result<bool, ApiError> {
        if self.phase != AttemptPhase::StartScreen {
            return Err(ApiError::Validation("Attempt already started".to_string()));
        }

        let attempt_id = attempts::start(client, &self.quiz.id).await?;
        tracing::info!(quiz = %self.quiz.id, attempt = %attempt_id, "Attempt started");

        self.attempt_id = Some(attempt_id);
        self.answers =
            self.quiz.questions.iter().map(|question| (question.id.clone(), Vec::new())).collect();
        self.remaining_seconds = (self.quiz.duration.max(0) as u64) * 60;
        self.auto_submit_fired = false;
        self.phase = AttemptPhase::InProgress;

        Ok(self.remaining_seconds == 0)
    }

    /// Single-choice questions replace the selection; multiple-choice toggles
    /// membership.
    pub(crate) fn toggle_answer(&mut self, question_id: &str, option: usize) -> bool {
        if self.phase != AttemptPhase::InProgress {
            return false;
        }
        let Some(question) = self.quiz.questions.iter().find(|q| q.id == question_id) else {
            return false;
        };
        if option >= question.options.len() {
            return false;
        }
        let Some(selected) = self.answers.get_mut(question_id) else {
            return false;
        };

        match question.kind {
            // A single-choice selection always becomes exactly this option;
            // re-selecting it is a no-op, never a deselect.
            QuestionKind::Single => {
                *selected = vec![option];
            }
            QuestionKind::Multiple => {
                if let Some(index) = selected.iter().position(|&o| o == option) {
                    selected.remove(index);
                } else {
                    selected.push(option);
                    selected.sort_unstable();
                }
            }
        }
        true
    }

    pub(crate) fn answered_count(&self) -> usize {
        self.answers.values().filter(|selected| !selected.is_empty()).count()
    }

    /// Consume one second of the countdown.
    pub(crate) fn tick(&mut self) -> TickOutcome {
        if self.phase != AttemptPhase::InProgress || self.auto_submit_fired {
            return TickOutcome::Idle;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.auto_submit_fired = true;
            TickOutcome::AutoSubmit
        } else {
            TickOutcome::Counting(self.remaining_seconds)
        }
    }

    pub(crate) async fn submit(
        &mut self,
        client: &ApiClient,
        trigger: SubmitTrigger,
    ) -> Result<SubmitOutcome, ApiError> {
        if self.phase == AttemptPhase::Submitted {
            return Err(ApiError::Validation("Attempt already submitted".to_string()));
        }
        if self.phase != AttemptPhase::InProgress {
            return Err(ApiError::Validation("Attempt not started".to_string()));
        }
        if let SubmitTrigger::Manual { confirmed: false } = trigger {
            return Ok(SubmitOutcome::Declined);
        }

        let attempt_id = self
            .attempt_id
            .clone()
            .ok_or_else(|| ApiError::Validation("Attempt not started".to_string()))?;

        // Question order, not map order; every question is reported even when
        // nothing was selected.
        let payload: Vec<SubmittedAnswer> = self
            .quiz
            .questions
            .iter()
            .map(|question| SubmittedAnswer {
                question_id: question.id.clone(),
                selected_answers: self.selected(&question.id).to_vec(),
            })
            .collect();

        // On failure the attempt stays in progress with answers and timer
        // intact; the caller may retry.
        let result = attempts::submit(client, &attempt_id, &payload).await?;
        tracing::info!(
            attempt = %attempt_id,
            score = result.score,
            percentage = result.percentage,
            "Attempt submitted"
        );

        self.result = Some(result);
        self.phase = AttemptPhase::Submitted;
        Ok(SubmitOutcome::Submitted)
    }
}
