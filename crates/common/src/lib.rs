//! Shared runtime helpers for the school administration crates.

pub mod utils;
