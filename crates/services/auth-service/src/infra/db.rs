//! PostgreSQL connection for the collaborator store, and its schema lifecycle.

use sea_orm::{Database as SeaDatabase, DatabaseConnection, DbErr};
use sea_orm_migration::{MigrationStatus, MigratorTrait};
use tracing::{debug, info};

use super::migrations::Migrator;

/// One schema migration and whether it has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

/// Connection to the collaborator database.
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open a connection and leave the schema untouched.
    pub async fn open(database_url: &str) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(database_url).await?;
        debug!("Collaborator database connection opened");
        Ok(Self { connection })
    }

    /// Open a connection and bring the schema up to date.
    pub async fn connect(database_url: &str) -> Result<Self, DbErr> {
        let db = Self::open(database_url).await?;
        let applied = db.apply_pending().await?;
        info!(applied, "Collaborator database ready");
        Ok(db)
    }

    pub fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Apply every pending migration, returning how many ran.
    pub async fn apply_pending(&self) -> Result<usize, DbErr> {
        let pending = Migrator::get_pending_migrations(&self.connection).await?.len();
        if pending > 0 {
            Migrator::up(&self.connection, None).await?;
        }
        Ok(pending)
    }

    /// Revert the most recent migration.
    pub async fn rollback_last(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Every known migration in order, with its applied flag.
    pub async fn migration_states(&self) -> Result<Vec<MigrationState>, DbErr> {
        Ok(Migrator::get_migration_with_status(&self.connection)
            .await?
            .iter()
            .map(|migration| MigrationState {
                name: migration.name().to_string(),
                applied: matches!(migration.status(), MigrationStatus::Applied),
            })
            .collect())
    }

    /// Drop the collaborator tables and rebuild the schema from scratch.
    pub async fn reset(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }
}
