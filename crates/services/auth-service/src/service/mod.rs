//! Registration and login flows.

mod auth_service;

pub use auth_service::{AuthService, Authenticator};
