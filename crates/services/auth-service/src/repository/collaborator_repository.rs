//! Collaborator repository backed by SeaORM.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, SqlErr, Statement,
};
use tracing::debug;
use uuid::Uuid;

use super::entities::collaborator::{self, ActiveModel, Entity as CollaboratorEntity};
use common::{AppError, AppResult};
use domain::{Collaborator, NewCollaborator};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Collaborator persistence contract.
///
/// Uniqueness of `code` and `email` is enforced by the store itself:
/// `save` fails with `AppError::Conflict` on a duplicate, whatever checks
/// the caller did beforehand.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CollaboratorRepository: Send + Sync {
    /// Find collaborator by login code
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Collaborator>>;

    /// Find collaborator by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Collaborator>>;

    /// Persist a new collaborator, assigning its id
    async fn save(&self, collaborator: NewCollaborator) -> AppResult<Collaborator>;

    /// Check the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Conflict error naming the duplicated field, if recognisable.
pub(crate) fn duplicate_key(detail: &str) -> AppError {
    if detail.contains("email") {
        AppError::conflict("Email address")
    } else if detail.contains("code") {
        AppError::conflict("Collaborator code")
    } else {
        AppError::conflict("Collaborator")
    }
}

/// PostgreSQL-backed store. Unique indexes on `code` and `email` come from
/// the migrations.
pub struct CollaboratorStore {
    db: DatabaseConnection,
}

impl CollaboratorStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_insert_error(err: DbErr) -> AppError {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                debug!(%detail, "Duplicate collaborator rejected by unique index");
                duplicate_key(&detail)
            }
            _ => AppError::from(err),
        }
    }
}

#[async_trait]
impl CollaboratorRepository for CollaboratorStore {
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Collaborator>> {
        let result = CollaboratorEntity::find()
            .filter(collaborator::Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Collaborator::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Collaborator>> {
        let result = CollaboratorEntity::find()
            .filter(collaborator::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Collaborator::from))
    }

    async fn save(&self, collaborator: NewCollaborator) -> AppResult<Collaborator> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(collaborator.code),
            display_name: Set(collaborator.display_name),
            email: Set(collaborator.email),
            password_hash: Set(collaborator.password.into_string()),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(Self::map_insert_error)?;
        Ok(Collaborator::from(model))
    }

    async fn ping(&self) -> AppResult<()> {
        self.db
            .execute(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_names_field() {
        let err = duplicate_key(r#"duplicate key value violates unique constraint "idx_collaborators_email""#);
        assert_eq!(err.user_message(), "Email address already exists");

        let err = duplicate_key(r#"duplicate key value violates unique constraint "idx_collaborators_code""#);
        assert_eq!(err.user_message(), "Collaborator code already exists");

        let err = duplicate_key("unique violation");
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
