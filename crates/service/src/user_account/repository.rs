use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use models::user_account;
use crate::errors::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAccountKey {
    Id(Uuid),
    Username(String),
}

/// Row to insert; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUserAccount {
    pub user: String,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct UserAccountChanges {
    pub user: Option<String>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
}

/// Persistence client for user accounts.
#[async_trait]
pub trait UserAccountRepository: Send + Sync {
    async fn find_many(&self) -> Result<Vec<user_account::Model>, ServiceError>;
    async fn find_unique(&self, key: UserAccountKey) -> Result<Option<user_account::Model>, ServiceError>;
    async fn create(&self, data: NewUserAccount) -> Result<user_account::Model, ServiceError>;
    async fn update(&self, id: Uuid, changes: UserAccountChanges) -> Result<user_account::Model, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

#[derive(Clone)]
pub struct SeaOrmUserAccountRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserAccountRepository for SeaOrmUserAccountRepository {
    async fn find_many(&self) -> Result<Vec<user_account::Model>, ServiceError> {
        crate::db::user_account_service::list_user_accounts(&self.db).await
    }

    async fn find_unique(&self, key: UserAccountKey) -> Result<Option<user_account::Model>, ServiceError> {
        match key {
            UserAccountKey::Id(id) => crate::db::user_account_service::get_user_account(&self.db, id).await,
            UserAccountKey::Username(u) => crate::db::user_account_service::get_user_account_by_username(&self.db, &u).await,
        }
    }

    async fn create(&self, data: NewUserAccount) -> Result<user_account::Model, ServiceError> {
        crate::db::user_account_service::create_user_account(&self.db, &data.user, &data.username, data.password_hash).await
    }

    async fn update(&self, id: Uuid, changes: UserAccountChanges) -> Result<user_account::Model, ServiceError> {
        crate::db::user_account_service::update_user_account(
            &self.db,
            id,
            changes.user.as_deref(),
            changes.username.as_deref(),
            changes.password_hash,
        )
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        crate::db::user_account_service::delete_user_account(&self.db, id).await
    }
}

pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::{Mutex, PoisonError};

    #[derive(Default)]
    pub struct InMemoryUserAccountRepository {
        rows: Mutex<Vec<user_account::Model>>,
    }

    fn username_taken(rows: &[user_account::Model], username: &str, except: Option<Uuid>) -> bool {
        rows.iter().any(|r| r.username == username && Some(r.id) != except)
    }

    #[async_trait]
    impl UserAccountRepository for InMemoryUserAccountRepository {
        async fn find_many(&self) -> Result<Vec<user_account::Model>, ServiceError> {
            Ok(self.rows.lock().unwrap_or_else(PoisonError::into_inner).clone())
        }

        async fn find_unique(&self, key: UserAccountKey) -> Result<Option<user_account::Model>, ServiceError> {
            let rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(rows
                .iter()
                .find(|r| match &key {
                    UserAccountKey::Id(id) => r.id == *id,
                    UserAccountKey::Username(u) => &r.username == u,
                })
                .cloned())
        }

        async fn create(&self, data: NewUserAccount) -> Result<user_account::Model, ServiceError> {
            user_account::validate_user(&data.user)?;
            user_account::validate_username(&data.username)?;
            let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            if username_taken(&rows, &data.username, None) {
                return Err(ServiceError::Conflict(format!("username {} already exists", data.username)));
            }
            let now = Utc::now().into();
            let m = user_account::Model {
                id: Uuid::new_v4(),
                user: data.user,
                username: data.username,
                password_hash: data.password_hash,
                created_at: now,
                updated_at: now,
            };
            rows.push(m.clone());
            Ok(m)
        }

        async fn update(&self, id: Uuid, changes: UserAccountChanges) -> Result<user_account::Model, ServiceError> {
            let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(u) = &changes.username {
                user_account::validate_username(u)?;
                if username_taken(&rows, u, Some(id)) {
                    return Err(ServiceError::Conflict(format!("username {} already exists", u)));
                }
            }
            let row = rows.iter_mut().find(|r| r.id == id).ok_or_else(|| ServiceError::not_found("user_account"))?;
            if let Some(u) = changes.user {
                row.user = u;
            }
            if let Some(u) = changes.username {
                row.username = u;
            }
            if let Some(h) = changes.password_hash {
                row.password_hash = h;
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
