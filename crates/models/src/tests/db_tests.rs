use std::time::Duration;

use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use anyhow::Result;

use crate::db::{connect_with_config, test_connection, DatabaseConfig};

#[test]
fn in_memory_config_keeps_single_connection() {
    let cfg = DatabaseConfig::in_memory();
    assert!(cfg.is_sqlite());
    assert_eq!(cfg.max_connections, 1);
    assert_eq!(cfg.min_connections, 1);
    assert!(cfg.idle_timeout.is_none());
    assert!(cfg.max_lifetime.is_none());
}

#[test]
fn converts_from_app_config() {
    let app = configs::parse(
        "[database]\nurl = \"postgres://u:p@db/school_admin\"\nmax_connections = 7\nacquire_timeout_secs = 3\n",
    )
    .unwrap();
    let cfg = DatabaseConfig::from(&app.database);
    assert_eq!(cfg.url, "postgres://u:p@db/school_admin");
    assert_eq!(cfg.max_connections, 7);
    assert_eq!(cfg.acquire_timeout, Duration::from_secs(3));
    assert!(!cfg.is_sqlite());
}

#[tokio::test]
async fn test_basic_connection() -> Result<()> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    test_connection(&db).await?;

    let stmt = Statement::from_string(DatabaseBackend::Sqlite, "SELECT 1 as test".to_string());
    let row = db.query_one(stmt).await?.expect("one row");
    let test_value: i32 = row.try_get("", "test")?;
    assert_eq!(test_value, 1);
    Ok(())
}

#[tokio::test]
async fn test_foreign_keys_enabled_on_sqlite() -> Result<()> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    let stmt = Statement::from_string(DatabaseBackend::Sqlite, "PRAGMA foreign_keys".to_string());
    let row = db.query_one(stmt).await?.expect("pragma row");
    let enabled: i32 = row.try_get("", "foreign_keys")?;
    assert_eq!(enabled, 1);
    Ok(())
}

#[tokio::test]
async fn test_invalid_url_fails() {
    let cfg = DatabaseConfig {
        url: "sqlite:///nonexistent-dir/never/created.db?mode=ro".to_string(),
        max_connections: 1,
        min_connections: 1,
        connect_timeout: Duration::from_millis(200),
        acquire_timeout: Duration::from_millis(200),
        ..DatabaseConfig::in_memory()
    };
    assert!(connect_with_config(&cfg).await.is_err());
}
