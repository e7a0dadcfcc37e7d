use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::api::errors::ApiError;
use crate::schemas::attempt::{AttemptResult, AttemptSummary, SubmittedAnswer};

#[derive(Serialize)]
struct StartPayload<'a> {
    #[serde(rename = "quizId")]
    quiz_id: &'a str,
}

#[derive(Deserialize)]
struct StartEnvelope {
    #[serde(alias = "attemptId")]
    attempt_id: String,
}

#[derive(Serialize)]
struct SubmitPayload<'a> {
    answers: &'a [SubmittedAnswer],
}

#[derive(Deserialize)]
struct AttemptsEnvelope {
    #[serde(default)]
    attempts: Vec<AttemptSummary>,
}

pub(crate) async fn start(client: &ApiClient, quiz_id: &str) -> Result<String, ApiError> {
    let envelope: StartEnvelope = client.post("/attempts/start", &StartPayload { quiz_id }).await?;
    Ok(envelope.attempt_id)
}

pub(crate) async fn submit(
    client: &ApiClient,
    attempt_id: &str,
    answers: &[SubmittedAnswer],
) -> Result<AttemptResult, ApiError> {
    client.post(&format!("/attempts/submit/{attempt_id}"), &SubmitPayload { answers }).await
}

pub(crate) async fn by_quiz(
    client: &ApiClient,
    quiz_id: &str,
) -> Result<Vec<AttemptSummary>, ApiError> {
    let envelope: AttemptsEnvelope = client.get(&format!("/attempts/quiz/{quiz_id}")).await?;
    Ok(envelope.attempts)
}

pub(crate) async fn by_module(
    client: &ApiClient,
    module_id: &str,
) -> Result<Vec<AttemptSummary>, ApiError> {
    let envelope: AttemptsEnvelope = client.get(&format!("/attempts/module/{module_id}")).await?;
    Ok(envelope.attempts)
}

pub(crate) async fn teacher_quiz_attempts(
    client: &ApiClient,
    quiz_id: &str,
) -> Result<Vec<AttemptSummary>, ApiError> {
    let envelope: AttemptsEnvelope =
        client.get(&format!("/attempts/teacher/quiz/{quiz_id}")).await?;
    Ok(envelope.attempts)
}
