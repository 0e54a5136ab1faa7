mod private_key;
pub use private_key::*;

mod public_key;
pub use public_key::*;

mod signature;
pub use signature::*;

use ripemd::{Digest as _, Ripemd160};

pub(crate) fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut h = Ripemd160::new();
    h.update(data);
    let out = h.finalize();
    let mut arr = [0u8; 20];
    arr.copy_from_slice(&out);
    arr
}
