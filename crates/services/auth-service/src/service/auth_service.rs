//! Authentication service - registration and login of collaborators.
//!
//! Collaborators are passed in explicitly: a credential store and a token
//! service. Each call is independent; the store is the only shared mutable
//! state.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::repository::CollaboratorRepository;
use crate::token::{IssuedToken, TokenService, TokenVerification};
use common::{AppError, AppResult, OptionExt};
use domain::{Collaborator, Registration};

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new collaborator and issue a token for it
    async fn register(&self, registration: Registration) -> AppResult<IssuedToken>;

    /// Check a code/password pair and issue a token
    async fn login(&self, code: &str, password: &str) -> AppResult<IssuedToken>;

    /// Check a presented bearer token
    fn verify_token(&self, token: &str) -> TokenVerification;

    /// Load the collaborator behind an authenticated code
    async fn profile(&self, code: &str) -> AppResult<Collaborator>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    repository: Arc<dyn CollaboratorRepository>,
    tokens: Arc<TokenService>,
}

impl Authenticator {
    pub fn new(repository: Arc<dyn CollaboratorRepository>, tokens: Arc<TokenService>) -> Self {
        Self { repository, tokens }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, registration: Registration) -> AppResult<IssuedToken> {
        registration.check_confirmation()?;

        // Pre-check only; concurrent duplicates are rejected by the store on save
        if self
            .repository
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            warn!(code = %registration.code, "Registration rejected: email already in use");
            return Err(AppError::conflict("Email address"));
        }

        let new_collaborator = registration.into_new_collaborator()?;
        let collaborator = self
            .repository
            .save(new_collaborator)
            .await
            .inspect_err(|e| {
                if let AppError::Conflict(field) = e {
                    warn!(%field, "Registration rejected by store: duplicate key");
                }
            })?;

        info!(code = %collaborator.code, "Collaborator registered");
        self.tokens.issue(&collaborator.code)
    }

    async fn login(&self, code: &str, password: &str) -> AppResult<IssuedToken> {
        let collaborator = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or_not_found("Collaborator")
            .inspect_err(|_| warn!(%code, "Login failed: unknown code"))?;

        if !collaborator.verify_password(password) {
            warn!(%code, "Login failed: incorrect password");
            return Err(AppError::InvalidCredentials);
        }

        info!(%code, "Collaborator logged in");
        self.tokens.issue(&collaborator.code)
    }

    fn verify_token(&self, token: &str) -> TokenVerification {
        self.tokens.verify(token)
    }

    async fn profile(&self, code: &str) -> AppResult<Collaborator> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_not_found("Collaborator")
    }
}
