use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::schemas::user::Identity;

const SESSION_FILE_NAME: &str = "session.json";

/// What survives process restarts: the bearer token and the last-known
/// identity. Nothing else is durable client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PersistedSession {
    pub(crate) token: String,
    pub(crate) user: Identity,
}

#[derive(Debug, Clone)]
pub(crate) struct SessionStorage {
    path: PathBuf,
}

impl SessionStorage {
    pub(crate) fn new(dir: &Path) -> Self {
        Self { path: dir.join(SESSION_FILE_NAME) }
    }

    pub(crate) fn load(&self) -> Option<PersistedSession> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(error = %err, path = %self.path.display(), "Failed to read session file");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                // A corrupt file is treated as logged out rather than fatal.
                tracing::warn!(error = %err, path = %self.path.display(), "Failed to parse session file");
                None
            }
        }
    }

    pub(crate) fn save(&self, session: &PersistedSession) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                tracing::warn!(error = %err, path = %parent.display(), "Failed to create storage directory");
                return;
            }
        }

        let payload = match serde_json::to_string_pretty(session) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to serialize session");
                return;
            }
        };

        if let Err(err) = fs::write(&self.path, payload) {
            tracing::warn!(error = %err, path = %self.path.display(), "Failed to write session file");
            return;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            if let Err(err) = fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)) {
                tracing::warn!(error = %err, path = %self.path.display(), "Failed to set session file permissions");
            }
        }
    }

    pub(crate) fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(error = %err, path = %self.path.display(), "Failed to remove session file");
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}
