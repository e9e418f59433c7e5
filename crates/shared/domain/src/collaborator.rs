//! Collaborator domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::password::Password;

/// Collaborator (employee) record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collaborator {
    pub id: Uuid,
    /// Unique login handle
    pub code: String,
    pub display_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Collaborator {
    /// Check a plaintext password against the stored hash.
    pub fn verify_password(&self, plain_text: &str) -> bool {
        Password::from_hash(self.password_hash.as_str()).verify(plain_text)
    }
}

/// Registration input as submitted by a client.
///
/// `password_confirmation` lives only here and is dropped once the
/// password is hashed.
#[derive(Clone)]
pub struct Registration {
    pub code: String,
    pub display_name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("code", &self.code)
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("password_confirmation", &"[REDACTED]")
            .finish()
    }
}

impl Registration {
    /// Ensure the password and its confirmation are identical.
    pub fn check_confirmation(&self) -> DomainResult<()> {
        if self.password != self.password_confirmation {
            return Err(DomainError::validation("Passwords do not match"));
        }
        Ok(())
    }

    /// Hash the password and discard both plaintext fields.
    pub fn into_new_collaborator(self) -> DomainResult<NewCollaborator> {
        let password = Password::new(&self.password)?;
        Ok(NewCollaborator {
            code: self.code,
            display_name: self.display_name,
            email: self.email,
            password,
        })
    }
}

/// Collaborator ready to persist: identity fields plus a hashed password.
#[derive(Debug, Clone)]
pub struct NewCollaborator {
    pub code: String,
    pub display_name: String,
    pub email: String,
    pub password: Password,
}

/// Collaborator response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CollaboratorResponse {
    /// Store-assigned identifier
    pub id: Uuid,
    /// Login code
    pub code: String,
    /// Display name
    pub display_name: String,
    /// Email address
    pub email: String,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Collaborator> for CollaboratorResponse {
    fn from(collaborator: Collaborator) -> Self {
        Self {
            id: collaborator.id,
            code: collaborator.code,
            display_name: collaborator.display_name,
            email: collaborator.email,
            created_at: collaborator.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(password: &str, confirmation: &str) -> Registration {
        Registration {
            code: "E1".to_string(),
            display_name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            password: password.to_string(),
            password_confirmation: confirmation.to_string(),
        }
    }

    #[test]
    fn test_confirmation_mismatch_rejected() {
        let result = registration("Secret1", "Secret2").check_confirmation();
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_confirmation_match_accepted() {
        assert!(registration("Secret1", "Secret1").check_confirmation().is_ok());
    }

    #[test]
    fn test_new_collaborator_holds_only_hash() {
        let new = registration("Secret1", "Secret1")
            .into_new_collaborator()
            .unwrap();

        assert_eq!(new.code, "E1");
        assert_ne!(new.password.as_str(), "Secret1");
        assert!(new.password.verify("Secret1"));
    }

    #[test]
    fn test_registration_debug_redacts_passwords() {
        let debug = format!("{:?}", registration("Secret1", "Secret1"));
        assert!(!debug.contains("Secret1"));
    }

    #[test]
    fn test_serialized_collaborator_hides_hash() {
        let collaborator = Collaborator {
            id: Uuid::new_v4(),
            code: "E1".to_string(),
            display_name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
        };

        assert!(!collaborator.verify_password("Secret1"));
        let json = serde_json::to_string(&collaborator).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2"));
    }
}
