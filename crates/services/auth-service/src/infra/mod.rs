//! Infrastructure layer - database connection and migrations.

mod db;
pub mod migrations;

pub use db::{Database, MigrationState};
pub use migrations::Migrator;
