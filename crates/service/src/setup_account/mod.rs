//! Setup accounts: onboarding records looked up by school name.

pub mod dto;
pub mod repository;
pub mod service;

pub use service::SetupAccountService;
