use crate::api::client::ApiClient;
use crate::api::errors::ApiError;
use crate::schemas::user::{AuthResponse, Identity, LoginRequest, RegisterRequest};

#[derive(Debug)]
pub(crate) struct AuthSuccess {
    pub(crate) user: Identity,
    pub(crate) token: String,
    pub(crate) message: Option<String>,
}

pub(crate) async fn login(
    client: &ApiClient,
    email: &str,
    password: &str,
) -> Result<AuthSuccess, ApiError> {
    let payload = LoginRequest { email: email.to_string(), password: password.to_string() };
    let response: AuthResponse = client.post("/auth/login", &payload).await?;
    interpret(response)
}

#[derive(serde::Deserialize)]
struct MeEnvelope {
    user: Identity,
}

/// Who the backend thinks the current token belongs to.
pub(crate) async fn me(client: &ApiClient) -> Result<Identity, ApiError> {
    let envelope: MeEnvelope = client.get("/auth/me").await?;
    Ok(envelope.user)
}

pub(crate) async fn register(
    client: &ApiClient,
    payload: &RegisterRequest,
) -> Result<AuthSuccess, ApiError> {
    let response: AuthResponse = client.post("/auth/register", payload).await?;
    interpret(response)
}

/// The backend reports auth failures inside a 200 envelope as often as with
/// an error status, so a missing token or user counts as failure too.
fn interpret(response: AuthResponse) -> Result<AuthSuccess, ApiError> {
    let message = response.message;
    match (response.success, response.user, response.token) {
        (true, Some(user), Some(token)) => Ok(AuthSuccess { user, token, message }),
        _ => Err(ApiError::Api {
            status: 200,
            message: message.unwrap_or_else(|| "Authentication failed".to_string()),
        }),
    }
}
