//! Create `setup_account` table.
//!
//! Onboarding record for a school; `school_name` is its natural key.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SetupAccount::Table)
                    .if_not_exists()
                    .col(uuid(SetupAccount::Id).primary_key())
                    .col(string_len(SetupAccount::SchoolName, 128).unique_key().not_null())
                    .col(timestamp_with_time_zone(SetupAccount::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(SetupAccount::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SetupAccount::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum SetupAccount { Table, Id, SchoolName, CreatedAt, UpdatedAt }
