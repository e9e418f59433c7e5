//! Auth Service Library
//!
//! Collaborator registration and login: password hashing, bearer token
//! issuance and verification, and the credential store. The HTTP API builds
//! its state from [`AuthComponents`].

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;
pub mod token;

use std::sync::Arc;

use tracing::info;

use common::AppResult;

use crate::config::AuthServiceConfig;
use crate::infra::Database;
use crate::repository::{CollaboratorRepository, CollaboratorStore};
use crate::service::{AuthService, Authenticator};
use crate::token::TokenService;

/// Wired auth service and the store it runs on.
#[derive(Clone)]
pub struct AuthComponents {
    pub auth: Arc<dyn AuthService>,
    pub repository: Arc<dyn CollaboratorRepository>,
}

impl AuthComponents {
    /// Wire the authenticator over an existing store.
    pub fn build(
        config: &AuthServiceConfig,
        repository: Arc<dyn CollaboratorRepository>,
    ) -> AppResult<Self> {
        let tokens = Arc::new(TokenService::from_config(&config.jwt)?);
        let auth = Arc::new(Authenticator::new(repository.clone(), tokens));
        Ok(Self { auth, repository })
    }

    /// Connect to the database (applying migrations) and wire the authenticator.
    pub async fn connect(config: &AuthServiceConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::connect(&config.database.url).await?;
        let repository = Arc::new(CollaboratorStore::new(db.connection()));
        Ok(Self::build(config, repository)?)
    }
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &AuthServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open(&config.database.url).await?;

    match action {
        MigrateAction::Up => {
            let applied = db.apply_pending().await?;
            info!(applied, "Migrations applied");
        }
        MigrateAction::Down => {
            db.rollback_last().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            for state in db.migration_states().await? {
                let marker = if state.applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, state.name);
            }
        }
        MigrateAction::Fresh => {
            db.reset().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}
