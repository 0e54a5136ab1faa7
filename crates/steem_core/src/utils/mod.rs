pub mod u64_flex;

mod static_variant;
pub use static_variant::*;

#[inline]
pub fn steem_assert<T>(condition: bool, error: T) -> Result<(), T> {
    if condition { Ok(()) } else { Err(error) }
}
