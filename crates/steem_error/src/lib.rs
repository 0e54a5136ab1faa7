mod chain_error;
pub use chain_error::SteemError;
