pub mod account;
pub mod password;
pub mod token;
pub mod verification;
