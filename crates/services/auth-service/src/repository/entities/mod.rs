//! SeaORM entities.

pub mod collaborator;
