//! Application state for dependency injection.

use std::sync::Arc;

use auth_service_lib::repository::CollaboratorRepository;
use auth_service_lib::service::AuthService;
use auth_service_lib::AuthComponents;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthService>,
    pub repository: Arc<dyn CollaboratorRepository>,
}

impl AppState {
    pub fn new(auth: Arc<dyn AuthService>, repository: Arc<dyn CollaboratorRepository>) -> Self {
        Self { auth, repository }
    }
}

impl From<AuthComponents> for AppState {
    fn from(components: AuthComponents) -> Self {
        Self::new(components.auth, components.repository)
    }
}
