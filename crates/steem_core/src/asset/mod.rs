mod asset;
pub use asset::*;

mod price;
pub use price::*;

mod symbol;
pub use symbol::*;
