//! SeaORM queries backing the repository implementations.

pub mod school_service;
pub mod setup_account_service;
pub mod user_account_service;
