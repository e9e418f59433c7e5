//! Migration: Create collaborators table with unique code and email.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Collaborators::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Collaborators::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Collaborators::Code).string().not_null())
                    .col(ColumnDef::new(Collaborators::DisplayName).string().not_null())
                    .col(ColumnDef::new(Collaborators::Email).string().not_null())
                    .col(ColumnDef::new(Collaborators::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Collaborators::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One collaborator per code and per email
        manager
            .create_index(
                Index::create()
                    .name("idx_collaborators_code")
                    .table(Collaborators::Table)
                    .col(Collaborators::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_collaborators_email")
                    .table(Collaborators::Table)
                    .col(Collaborators::Email)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Collaborators::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Collaborators {
    Table,
    Id,
    Code,
    DisplayName,
    Email,
    PasswordHash,
    CreatedAt,
}
