mod account_name;
pub use account_name::*;
