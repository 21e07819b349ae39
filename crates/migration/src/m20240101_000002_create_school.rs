//! Create `school` table with an optional FK to `setup_account`.
//!
//! The reference is non-owning: deleting the setup account only clears it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(School::Table)
                    .if_not_exists()
                    .col(uuid(School::Id).primary_key())
                    .col(string_len(School::Name, 128).unique_key().not_null())
                    .col(
                        ColumnDef::new(School::SetupAccountId)
                            .uuid()
                            .null(),
                    )
                    .col(timestamp_with_time_zone(School::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(School::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_school_setup_account")
                            .from(School::Table, School::SetupAccountId)
                            .to(SetupAccount::Table, SetupAccount::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(School::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum School { Table, Id, Name, SetupAccountId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum SetupAccount { Table, Id }
