use std::sync::Arc;
use uuid::Uuid;
use tracing::{debug, info, instrument};

use models::user_account;
use crate::errors::ServiceError;
use super::dto::{CreateUserAccountDto, EditUserAccountDto};
use super::password::hash_password;
use super::repository::{NewUserAccount, UserAccountChanges, UserAccountKey, UserAccountRepository};

/// User account operations. Plain-text passwords stop here: the repository
/// only ever sees argon2 hashes.
pub struct UserAccountService<R: UserAccountRepository> {
    repo: Arc<R>,
}

impl<R: UserAccountRepository> UserAccountService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get_all_user_accounts(&self) -> Result<Vec<user_account::Model>, ServiceError> {
        let rows = self.repo.find_many().await?;
        debug!(count = rows.len(), "user_accounts_listed");
        Ok(rows)
    }

    pub async fn get_user_account_by_id(&self, id: Uuid) -> Result<Option<user_account::Model>, ServiceError> {
        self.repo.find_unique(UserAccountKey::Id(id)).await
    }

    pub async fn get_user_account_by_username(&self, username: &str) -> Result<Option<user_account::Model>, ServiceError> {
        self.repo.find_unique(UserAccountKey::Username(username.to_string())).await
    }

    #[instrument(skip(self, dto), fields(username = %dto.username))]
    pub async fn create_user_account(&self, dto: CreateUserAccountDto) -> Result<user_account::Model, ServiceError> {
        dto.validate()?;
        let password_hash = hash_password(&dto.password)?;
        let created = self
            .repo
            .create(NewUserAccount { user: dto.user, username: dto.username, password_hash })
            .await?;
        info!(user_account_id = %created.id, "user_account_created");
        Ok(created)
    }

    /// A supplied password is re-hashed; omitted fields stay as they are.
    #[instrument(skip(self, dto), fields(user_account_id = %id))]
    pub async fn edit_user_account(&self, id: Uuid, dto: EditUserAccountDto) -> Result<user_account::Model, ServiceError> {
        dto.validate()?;
        let password_hash = dto.password.as_deref().map(hash_password).transpose()?;
        let changes = UserAccountChanges { user: dto.user, username: dto.username, password_hash };
        let updated = self.repo.update(id, changes).await?;
        info!("user_account_updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(user_account_id = %id))]
    pub async fn delete_user_account(&self, id: Uuid) -> Result<bool, ServiceError> {
        let deleted = self.repo.delete(id).await?;
        info!(deleted, "user_account_deleted");
        Ok(deleted)
    }
}
