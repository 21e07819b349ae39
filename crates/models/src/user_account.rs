use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, validate};

pub const USER_MAX_LEN: usize = 128;
pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 64;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_account")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user: String,
    #[sea_orm(unique)]
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_user(user: &str) -> Result<(), errors::ModelError> {
    validate::required_text("user", user, USER_MAX_LEN)
}

pub fn validate_username(username: &str) -> Result<(), errors::ModelError> {
    validate::required_text("username", username, USERNAME_MAX_LEN)?;
    if username.chars().count() < USERNAME_MIN_LEN {
        return Err(errors::ModelError::Validation(format!("username must be at least {USERNAME_MIN_LEN} characters")));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(errors::ModelError::Validation("username must not contain whitespace".into()));
    }
    Ok(())
}

/// Insert a user account. Takes an already hashed password.
pub async fn create(
    db: &DatabaseConnection,
    user: &str,
    username: &str,
    password_hash: String,
) -> Result<Model, errors::ModelError> {
    validate_user(user)?;
    validate_username(username)?;
    if password_hash.trim().is_empty() {
        return Err(errors::ModelError::Validation("password hash required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user: Set(user.to_string()),
        username: Set(username.to_string()),
        password_hash: Set(password_hash),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}
