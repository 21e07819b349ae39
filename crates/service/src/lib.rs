//! Service layer providing CRUD operations for schools, setup accounts and
//! user accounts on top of the `models` entities.
//! - Each entity service takes a validated DTO and forwards it to an injected
//!   repository (the persistence client).
//! - `db::*_service` holds the SeaORM queries behind the SeaORM repositories.
//! - `runtime` wires everything to a configured database.

pub mod errors;
pub mod db;
pub mod school;
pub mod setup_account;
pub mod user_account;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
