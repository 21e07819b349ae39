pub mod errors;
pub mod db;
pub mod validate;
pub mod setup_account;
pub mod school;
pub mod user_account;

pub mod prelude {
    pub use super::school::Entity as School;
    pub use super::setup_account::Entity as SetupAccount;
    pub use super::user_account::Entity as UserAccount;
}

#[cfg(test)]
mod tests;
