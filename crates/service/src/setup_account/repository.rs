use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use models::setup_account;
use crate::errors::ServiceError;

/// Unique keys a setup account can be looked up by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupAccountKey {
    Id(Uuid),
    SchoolName(String),
}

#[derive(Debug, Clone)]
pub struct NewSetupAccount {
    pub school_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct SetupAccountChanges {
    pub school_name: Option<String>,
}

/// Persistence client for setup accounts.
#[async_trait]
pub trait SetupAccountRepository: Send + Sync {
    async fn find_many(&self) -> Result<Vec<setup_account::Model>, ServiceError>;
    async fn find_unique(&self, key: SetupAccountKey) -> Result<Option<setup_account::Model>, ServiceError>;
    async fn create(&self, data: NewSetupAccount) -> Result<setup_account::Model, ServiceError>;
    async fn update(&self, id: Uuid, changes: SetupAccountChanges) -> Result<setup_account::Model, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmSetupAccountRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmSetupAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SetupAccountRepository for SeaOrmSetupAccountRepository {
    async fn find_many(&self) -> Result<Vec<setup_account::Model>, ServiceError> {
        crate::db::setup_account_service::list_setup_accounts(&self.db).await
    }

    async fn find_unique(&self, key: SetupAccountKey) -> Result<Option<setup_account::Model>, ServiceError> {
        match key {
            SetupAccountKey::Id(id) => crate::db::setup_account_service::get_setup_account(&self.db, id).await,
            SetupAccountKey::SchoolName(name) => crate::db::setup_account_service::get_setup_account_by_school_name(&self.db, &name).await,
        }
    }

    async fn create(&self, data: NewSetupAccount) -> Result<setup_account::Model, ServiceError> {
        crate::db::setup_account_service::create_setup_account(&self.db, &data.school_name).await
    }

    async fn update(&self, id: Uuid, changes: SetupAccountChanges) -> Result<setup_account::Model, ServiceError> {
        crate::db::setup_account_service::update_setup_account(&self.db, id, changes.school_name.as_deref()).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        crate::db::setup_account_service::delete_setup_account(&self.db, id).await
    }
}

/// Simple in-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::{Mutex, PoisonError};

    #[derive(Default)]
    pub struct InMemorySetupAccountRepository {
        rows: Mutex<Vec<setup_account::Model>>, // insertion order
    }

    fn name_taken(rows: &[setup_account::Model], name: &str, except: Option<Uuid>) -> bool {
        rows.iter().any(|r| r.school_name == name && Some(r.id) != except)
    }

    #[async_trait]
    impl SetupAccountRepository for InMemorySetupAccountRepository {
        async fn find_many(&self) -> Result<Vec<setup_account::Model>, ServiceError> {
            Ok(self.rows.lock().unwrap_or_else(PoisonError::into_inner).clone())
        }

        async fn find_unique(&self, key: SetupAccountKey) -> Result<Option<setup_account::Model>, ServiceError> {
            let rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(rows
                .iter()
                .find(|r| match &key {
                    SetupAccountKey::Id(id) => r.id == *id,
                    SetupAccountKey::SchoolName(name) => &r.school_name == name,
                })
                .cloned())
        }

        async fn create(&self, data: NewSetupAccount) -> Result<setup_account::Model, ServiceError> {
            setup_account::validate_school_name(&data.school_name)?;
            let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            if name_taken(&rows, &data.school_name, None) {
                return Err(ServiceError::Conflict(format!("school_name {} already exists", data.school_name)));
            }
            let now = Utc::now().into();
            let m = setup_account::Model { id: Uuid::new_v4(), school_name: data.school_name, created_at: now, updated_at: now };
            rows.push(m.clone());
            Ok(m)
        }

        async fn update(&self, id: Uuid, changes: SetupAccountChanges) -> Result<setup_account::Model, ServiceError> {
            let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(n) = &changes.school_name {
                setup_account::validate_school_name(n)?;
                if name_taken(&rows, n, Some(id)) {
                    return Err(ServiceError::Conflict(format!("school_name {} already exists", n)));
                }
            }
            let row = rows.iter_mut().find(|r| r.id == id).ok_or_else(|| ServiceError::not_found("setup_account"))?;
            if let Some(n) = changes.school_name {
                row.school_name = n;
            }
            row.updated_at = Utc::now().into();
            Ok(row.clone())
        }

        async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
            let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            let before = rows.len();
            rows.retain(|r| r.id != id);
            Ok(rows.len() < before)
        }
    }
}
