//! Credential store: collaborator persistence and lookup.

pub mod entities;
mod collaborator_repository;
mod memory;

pub use collaborator_repository::{CollaboratorRepository, CollaboratorStore};
pub use memory::InMemoryCollaboratorStore;

#[cfg(any(test, feature = "test-utils"))]
pub use collaborator_repository::MockCollaboratorRepository;
