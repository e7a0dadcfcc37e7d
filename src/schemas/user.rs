use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Role {
    Teacher,
    Student,
}

impl Role {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

/// The authenticated user as the backend reports it; also what gets persisted
/// to client storage alongside the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Identity {
    #[serde(alias = "_id")]
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) role: Role,
    #[serde(default)]
    pub(crate) subjects: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Debug, Serialize, Validate)]
pub(crate) struct RegisterRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub(crate) name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub(crate) email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub(crate) password: String,
    pub(crate) role: Role,
    pub(crate) subjects: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    #[serde(default)]
    pub(crate) success: bool,
    #[serde(default)]
    pub(crate) message: Option<String>,
    #[serde(default)]
    pub(crate) user: Option<Identity>,
    #[serde(default)]
    pub(crate) token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_accepts_mongo_style_id() {
        let identity: Identity = serde_json::from_value(serde_json::json!({
            "_id": "u1",
            "name": "Ada",
            "email": "ada@example.com",
            "role": "teacher",
            "subjects": ["Mathematics"]
        }))
        .unwrap();
        assert_eq!(identity.id, "u1");
        assert_eq!(identity.role, Role::Teacher);
    }

    #[test]
    fn identity_subjects_default_to_empty() {
        let identity: Identity = serde_json::from_value(serde_json::json!({
            "id": "u2",
            "name": "Sam",
            "email": "sam@example.com",
            "role": "student"
        }))
        .unwrap();
        assert!(identity.subjects.is_empty());
    }
}
