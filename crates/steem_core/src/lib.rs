pub mod asset;
pub mod authority;
pub mod authority_checker;
pub mod config;
pub mod crypto;
pub mod name;
pub mod operations;
pub mod transaction;
pub mod utils;

pub use steem_error::SteemError;
