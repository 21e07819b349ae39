#![cfg(test)]
use sea_orm::DatabaseConnection;
use models::db::{connect_with_config, migrate, DatabaseConfig};

/// Fresh in-memory SQLite database with the schema applied. Each call is isolated.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    common::utils::logging::init_test_logging();
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    migrate(&db).await?;
    Ok(db)
}
