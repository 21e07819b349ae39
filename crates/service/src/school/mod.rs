//! Schools, each optionally connected to one setup account.

pub mod dto;
pub mod repository;
pub mod service;

pub use service::SchoolService;
