pub(crate) mod storage;

#[cfg(test)]
mod tests;

use std::sync::{Arc, RwLock};

use validator::Validate;

use crate::api::auth;
use crate::api::client::ApiClient;
use crate::api::errors::ApiError;
use crate::nav::guard::SessionView;
use crate::schemas::user::{Identity, RegisterRequest, Role};
use crate::session::storage::{PersistedSession, SessionStorage};

#[derive(Debug, Clone)]
pub(crate) struct Session {
    pub(crate) user: Identity,
    pub(crate) token: String,
}

#[derive(Debug)]
enum SessionState {
    /// Persisted storage not read yet; guards render a waiting state.
    Loading,
    Anonymous,
    Authenticated(Session),
}

/// Owns the authenticated identity for the whole process. Reads are
/// synchronous so guard decisions never block; writes go through here only,
/// keeping the persisted file and the in-memory state in step.
#[derive(Clone)]
pub(crate) struct SessionStore {
    state: Arc<RwLock<SessionState>>,
    storage: Arc<SessionStorage>,
}

pub(crate) struct RegisterProfile {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) confirm_password: String,
    pub(crate) role: Role,
    pub(crate) subjects: Vec<String>,
}

impl SessionStore {
    pub(crate) fn new(storage: SessionStorage) -> Self {
        Self { state: Arc::new(RwLock::new(SessionState::Loading)), storage: Arc::new(storage) }
    }

    /// Read persisted storage once at startup.
    pub(crate) fn init(&self) {
        let restored = self.storage.load();
        let mut state = self.write();
        *state = match restored {
            Some(persisted) => {
                tracing::debug!(user = %persisted.user.email, "Restored persisted session");
                SessionState::Authenticated(Session {
                    user: persisted.user,
                    token: persisted.token,
                })
            }
            None => SessionState::Anonymous,
        };
    }

    pub(crate) fn is_loading(&self) -> bool {
        matches!(*self.read(), SessionState::Loading)
    }

    pub(crate) fn current_user(&self) -> Option<Identity> {
        match &*self.read() {
            SessionState::Authenticated(session) => Some(session.user.clone()),
            _ => None,
        }
    }

    pub(crate) fn token(&self) -> Option<String> {
        match &*self.read() {
            SessionState::Authenticated(session) => Some(session.token.clone()),
            _ => None,
        }
    }

    pub(crate) fn view(&self) -> SessionView {
        match &*self.read() {
            SessionState::Loading => SessionView::Loading,
            SessionState::Anonymous => SessionView::Anonymous,
            SessionState::Authenticated(session) => SessionView::Authenticated(session.user.role),
        }
    }

    pub(crate) async fn login(
        &self,
        client: &ApiClient,
        email: &str,
        password: &str,
    ) -> Result<Identity, ApiError> {
        let granted = auth::login(client, email, password).await?;
        self.establish(granted.user.clone(), granted.token);
        tracing::info!(user = %granted.user.email, role = granted.user.role.as_str(), "Logged in");
        Ok(granted.user)
    }

    pub(crate) async fn register(
        &self,
        client: &ApiClient,
        profile: RegisterProfile,
    ) -> Result<Identity, ApiError> {
        if profile.password != profile.confirm_password {
            return Err(ApiError::Validation("Passwords do not match".to_string()));
        }
        if profile.role == Role::Teacher && profile.subjects.is_empty() {
            return Err(ApiError::Validation(
                "Teachers must add at least one subject".to_string(),
            ));
        }

        let payload = RegisterRequest {
            name: profile.name,
            email: profile.email,
            password: profile.password,
            role: profile.role,
            subjects: profile.subjects,
        };
        payload.validate().map_err(|e| ApiError::Validation(e.to_string()))?;

        let granted = auth::register(client, &payload).await?;
        self.establish(granted.user.clone(), granted.token);
        tracing::info!(user = %granted.user.email, role = granted.user.role.as_str(), "Registered");
        Ok(granted.user)
    }

    /// Synchronous; there is no network failure mode for logout.
    pub(crate) fn logout(&self) {
        self.clear();
        tracing::info!("Logged out");
    }

    /// Clear identity, token, and the persisted file. Also the 401 path.
    pub(crate) fn clear(&self) {
        *self.write() = SessionState::Anonymous;
        self.storage.clear();
    }

    fn establish(&self, user: Identity, token: String) {
        self.storage.save(&PersistedSession { token: token.clone(), user: user.clone() });
        *self.write() = SessionState::Authenticated(Session { user, token });
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
