use serde::{Deserialize, Serialize};

use models::setup_account;
use crate::errors::ServiceError;

/// Input for creating a setup account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateSetupAccountDto {
    pub school_name: String,
}

impl CreateSetupAccountDto {
    pub fn validate(&self) -> Result<(), ServiceError> {
        setup_account::validate_school_name(&self.school_name)?;
        Ok(())
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EditSetupAccountDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_name: Option<String>,
}

impl EditSetupAccountDto {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(n) = &self.school_name {
            setup_account::validate_school_name(n)?;
        }
        Ok(())
    }
}
