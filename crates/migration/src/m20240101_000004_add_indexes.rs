use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // School: a setup account backs at most one school (NULLs are not compared)
        manager
            .create_index(
                Index::create()
                    .name("uniq_school_setup_account")
                    .table(School::Table)
                    .col(School::SetupAccountId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_school_setup_account").table(School::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum School { Table, SetupAccountId }
