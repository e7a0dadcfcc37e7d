use serde::Deserialize;

use crate::api::client::ApiClient;
use crate::api::errors::ApiError;
use crate::schemas::quiz::{Quiz, QuizCreate};

#[derive(Deserialize)]
struct QuizzesEnvelope {
    #[serde(default)]
    quizzes: Vec<Quiz>,
}

#[derive(Deserialize)]
struct QuizEnvelope {
    quiz: Quiz,
}

pub(crate) async fn by_module(client: &ApiClient, module_id: &str) -> Result<Vec<Quiz>, ApiError> {
    let envelope: QuizzesEnvelope = client.get(&format!("/quizzes/module/{module_id}")).await?;
    Ok(envelope.quizzes)
}

pub(crate) async fn get(client: &ApiClient, quiz_id: &str) -> Result<Quiz, ApiError> {
    let envelope: QuizEnvelope = client.get(&format!("/quizzes/{quiz_id}")).await?;
    Ok(envelope.quiz)
}

pub(crate) async fn create(client: &ApiClient, payload: &QuizCreate) -> Result<Quiz, ApiError> {
    let envelope: QuizEnvelope = client.post("/quizzes", payload).await?;
    Ok(envelope.quiz)
}
