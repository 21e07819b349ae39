use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use uuid::Uuid;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// A connect-by-id pointed at a record that does not exist.
    #[error("reference not found: {0}")]
    ReferenceNotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{} not found", entity))
    }

    pub fn reference_not_found(entity: &str, id: Uuid) -> Self {
        Self::ReferenceNotFound(format!("{} {} does not exist", entity, id))
    }

    /// Classify a SeaORM error; constraint violations get their own kinds.
    pub fn from_db(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::Conflict(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Self::ReferenceNotFound(msg),
            _ => Self::Db(err.to_string()),
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation(msg) => Self::Validation(msg),
            ModelError::Db(e) => Self::from_db(e),
        }
    }
}
