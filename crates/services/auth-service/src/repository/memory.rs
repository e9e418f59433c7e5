//! In-memory collaborator store (development mode and tests).

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::collaborator_repository::{duplicate_key, CollaboratorRepository};
use common::AppResult;
use domain::{Collaborator, NewCollaborator};

/// Collaborators keyed by id, with code and email indexes.
///
/// Uniqueness is checked and the record inserted under one write lock, so
/// concurrent saves of the same code or email cannot both succeed.
#[derive(Default)]
pub struct InMemoryCollaboratorStore {
    inner: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    by_id: HashMap<Uuid, Collaborator>,
    code_index: HashMap<String, Uuid>,
    email_index: HashMap<String, Uuid>,
}

impl InMemoryCollaboratorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored collaborators.
    pub async fn len(&self) -> usize {
        self.inner.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CollaboratorRepository for InMemoryCollaboratorStore {
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Collaborator>> {
        let tables = self.inner.read().await;
        Ok(tables
            .code_index
            .get(code)
            .and_then(|id| tables.by_id.get(id))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Collaborator>> {
        let tables = self.inner.read().await;
        Ok(tables
            .email_index
            .get(email)
            .and_then(|id| tables.by_id.get(id))
            .cloned())
    }

    async fn save(&self, collaborator: NewCollaborator) -> AppResult<Collaborator> {
        let mut tables = self.inner.write().await;

        if tables.code_index.contains_key(&collaborator.code) {
            return Err(duplicate_key("code"));
        }
        if tables.email_index.contains_key(&collaborator.email) {
            return Err(duplicate_key("email"));
        }

        let record = Collaborator {
            id: Uuid::new_v4(),
            code: collaborator.code,
            display_name: collaborator.display_name,
            email: collaborator.email,
            password_hash: collaborator.password.into_string(),
            created_at: Utc::now(),
        };

        tables.code_index.insert(record.code.clone(), record.id);
        tables.email_index.insert(record.email.clone(), record.id);
        tables.by_id.insert(record.id, record.clone());
        debug!(code = %record.code, "Collaborator stored in memory");

        Ok(record)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::AppError;
    use domain::Password;

    fn new_collaborator(code: &str, email: &str) -> NewCollaborator {
        NewCollaborator {
            code: code.to_string(),
            display_name: "Test Collaborator".to_string(),
            email: email.to_string(),
            password: Password::from_hash("$argon2id$placeholder"),
        }
    }

    #[tokio::test]
    async fn test_save_assigns_id_and_indexes() {
        let store = InMemoryCollaboratorStore::new();
        let saved = store.save(new_collaborator("E1", "a@x.com")).await.unwrap();

        let by_code = store.find_by_code("E1").await.unwrap().unwrap();
        let by_email = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(by_code.id, saved.id);
        assert_eq!(by_email.id, saved.id);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_lookup_misses() {
        let store = InMemoryCollaboratorStore::new();
        assert!(store.find_by_code("nobody").await.unwrap().is_none());
        assert!(store.find_by_email("nobody@x.com").await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_duplicate_code_rejected() {
        let store = InMemoryCollaboratorStore::new();
        store.save(new_collaborator("E1", "a@x.com")).await.unwrap();

        let err = store.save(new_collaborator("E1", "b@x.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == "Collaborator code"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryCollaboratorStore::new();
        store.save(new_collaborator("E1", "a@x.com")).await.unwrap();

        let err = store.save(new_collaborator("E2", "a@x.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == "Email address"));
        assert!(store.find_by_code("E2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_saves_same_code_only_one_wins() {
        let store = std::sync::Arc::new(InMemoryCollaboratorStore::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .save(new_collaborator("E1", &format!("user{}@x.com", i)))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(store.len().await, 1);
    }
}
