use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::school;
use crate::errors::ServiceError;

/// Input for creating a school. `setup_account` is the id to connect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateSchoolDto {
    pub name: String,
    pub setup_account: Uuid,
}

impl CreateSchoolDto {
    pub fn validate(&self) -> Result<(), ServiceError> {
        school::validate_name(&self.name)?;
        Ok(())
    }
}

/// Partial update. A missing `setup_account` leaves the link alone; there is
/// no way to clear it through an edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EditSchoolDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_account: Option<Uuid>,
}

impl EditSchoolDto {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(n) = &self.name {
            school::validate_name(n)?;
        }
        Ok(())
    }
}
