use sea_orm::DatabaseConnection;

use crate::db::{connect_with_config, migrate, DatabaseConfig};

/// Database connection and configuration tests
pub mod db_tests;



/// Fresh in-memory database with the schema applied.
pub(crate) async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    migrate(&db).await?;
    Ok(db)
}
