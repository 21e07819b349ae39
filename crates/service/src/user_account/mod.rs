//! User accounts: login identities keyed by username, passwords stored hashed.

pub mod dto;
pub mod password;
pub mod repository;
pub mod service;

pub use service::UserAccountService;
