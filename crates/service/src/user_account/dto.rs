use serde::{Deserialize, Serialize};

use models::user_account;
use crate::errors::ServiceError;
use super::password::validate_password;

/// Input for creating a user account; every field is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUserAccountDto {
    pub password: String,
    pub user: String,
    pub username: String,
}

impl CreateUserAccountDto {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_password(&self.password)?;
        user_account::validate_user(&self.user)?;
        user_account::validate_username(&self.username)?;
        Ok(())
    }
}

/// Partial update; each field is independently omittable.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EditUserAccountDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl EditUserAccountDto {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(p) = &self.password {
            validate_password(p)?;
        }
        if let Some(u) = &self.user {
            user_account::validate_user(u)?;
        }
        if let Some(u) = &self.username {
            user_account::validate_username(u)?;
        }
        Ok(())
    }
}

// Keep plain-text passwords out of logs.
impl std::fmt::Debug for EditUserAccountDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditUserAccountDto")
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("user", &self.user)
            .field("username", &self.username)
            .finish()
    }
}
