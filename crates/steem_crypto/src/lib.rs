mod bytes;
pub use bytes::Bytes;

mod digest;
pub use digest::Digest;

mod fixed_bytes;
pub use fixed_bytes::FixedBytes;
