mod authority;
pub use authority::*;

mod authority_role;
pub use authority_role::*;

mod required_authorities;
pub use required_authorities::*;
