use uuid::Uuid;
use chrono::Utc;
use sea_orm::{DatabaseConnection, ActiveModelTrait, EntityTrait, QueryFilter, ColumnTrait, Set};
use models::user_account;
use crate::errors::ServiceError;

/// List all user accounts in storage order.
pub async fn list_user_accounts(db: &DatabaseConnection) -> Result<Vec<user_account::Model>, ServiceError> {
    user_account::Entity::find().all(db).await.map_err(ServiceError::from_db)
}

/// Get a user account by id.
pub async fn get_user_account(db: &DatabaseConnection, id: Uuid) -> Result<Option<user_account::Model>, ServiceError> {
    user_account::Entity::find_by_id(id).one(db).await.map_err(ServiceError::from_db)
}

/// Get a user account by its unique username.
pub async fn get_user_account_by_username(db: &DatabaseConnection, username: &str) -> Result<Option<user_account::Model>, ServiceError> {
    user_account::Entity::find()
        .filter(user_account::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(ServiceError::from_db)
}

/// Create a user account from an already hashed password.
pub async fn create_user_account(db: &DatabaseConnection, user: &str, username: &str, password_hash: String) -> Result<user_account::Model, ServiceError> {
    Ok(user_account::create(db, user, username, password_hash).await?)
}

/// Update a user account with optional fields.
pub async fn update_user_account(
    db: &DatabaseConnection,
    id: Uuid,
    user: Option<&str>,
    username: Option<&str>,
    password_hash: Option<String>,
) -> Result<user_account::Model, ServiceError> {
    let mut am: user_account::ActiveModel = user_account::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(ServiceError::from_db)?
        .ok_or_else(|| ServiceError::not_found("user_account"))?
        .into();
    if let Some(u) = user {
        user_account::validate_user(u)?;
        am.user = Set(u.to_string());
    }
    if let Some(u) = username {
        user_account::validate_username(u)?;
        am.username = Set(u.to_string());
    }
    if let Some(h) = password_hash {
        am.password_hash = Set(h);
    }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(ServiceError::from_db)
}

/// Delete a user account; returns true if a row was removed.
pub async fn delete_user_account(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let res = user_account::Entity::delete_by_id(id).exec(db).await.map_err(ServiceError::from_db)?;
    Ok(res.rows_affected > 0)
}
