//! Process wiring: logging, database connection, schema, services.

use std::sync::Arc;

use anyhow::Context;
use sea_orm::DatabaseConnection;
use tracing::info;

use configs::{AppConfig, LogFormat};
use crate::school::{repository::SeaOrmSchoolRepository, SchoolService};
use crate::setup_account::{repository::SeaOrmSetupAccountRepository, SetupAccountService};
use crate::user_account::{repository::SeaOrmUserAccountRepository, UserAccountService};

/// The three entity services over one SeaORM connection.
pub struct Services {
    pub schools: SchoolService<SeaOrmSchoolRepository, SeaOrmSetupAccountRepository>,
    pub setup_accounts: SetupAccountService<SeaOrmSetupAccountRepository>,
    pub user_accounts: UserAccountService<SeaOrmUserAccountRepository>,
}

impl Services {
    pub fn new(db: DatabaseConnection) -> Self {
        // the school service checks references through the same repository
        let setup_repo = Arc::new(SeaOrmSetupAccountRepository::new(db.clone()));
        Self {
            schools: SchoolService::new(Arc::new(SeaOrmSchoolRepository::new(db.clone())), setup_repo.clone()),
            setup_accounts: SetupAccountService::new(setup_repo),
            user_accounts: UserAccountService::new(Arc::new(SeaOrmUserAccountRepository::new(db))),
        }
    }
}

pub fn init_logging(format: LogFormat) -> bool {
    match format {
        LogFormat::Compact => common::utils::logging::init_logging_default(),
        LogFormat::Json => common::utils::logging::init_logging_json(),
    }
}

/// Connect, apply the schema when configured to, and build [`Services`].
pub async fn bootstrap(cfg: &AppConfig) -> anyhow::Result<Services> {
    init_logging(cfg.logging.format);
    let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
    let db = models::db::connect_with_config(&db_cfg)
        .await
        .context("connect database")?;
    if cfg.database.auto_migrate {
        models::db::migrate(&db).await.context("apply schema migrations")?;
    }
    info!(auto_migrate = cfg.database.auto_migrate, "services_ready");
    Ok(Services::new(db))
}

/// [`bootstrap`] with configuration from `config.toml`, or from the
/// environment when no such file exists. A broken file is an error.
pub async fn bootstrap_from_env() -> anyhow::Result<Services> {
    let cfg = AppConfig::load_or_env().context("load configuration")?;
    bootstrap(&cfg).await
}
