//! Domain layer - Collaborator entity and credential value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Types here are shared by the auth service and the HTTP API.

pub mod collaborator;
pub mod constants;
pub mod error;
pub mod password;

pub use collaborator::{Collaborator, CollaboratorResponse, NewCollaborator, Registration};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::{hash_password, verify_password, Password};
