mod primitives;
mod varint;

pub use varint::{VarUint32, VarUint64};

use thiserror::Error;

/// Error that can be returned when reading bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// Fewer bytes remain than the value requires.
    #[error("truncated input at position {pos}, {needed} more bytes needed")]
    TruncatedInput { pos: usize, needed: usize },
    /// A varint continuation chain is longer than its target integer allows.
    #[error("malformed varint")]
    MalformedVarint,
    #[error("invalid utf-8 in string")]
    InvalidUtf8,
    #[error("parse error: {0}")]
    ParseError(String),
    /// Operation tag that this codec has no schema for.
    #[error("unknown operation type {0}")]
    UnknownOperationType(u64),
    /// Well-formed bytes holding an operation the container does not admit.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

/// Error that can be returned when writing bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    /// Not enough space in the output buffer.
    #[error("not enough space in output buffer")]
    NotEnoughSpace,
    #[error("value out of range: {0}")]
    ValueOutOfRange(String),
    /// Opaque operations cannot be re-encoded.
    #[error("cannot encode unknown operation type {0}")]
    UnknownOperationType(String),
    /// Chain-generated operations are never broadcast.
    #[error("cannot encode virtual operation {0}")]
    VirtualOperation(String),
}

pub trait NumBytes {
    /// Count the number of bytes a type is expected to use.
    fn num_bytes(&self) -> usize;
}

pub trait Read: Sized {
    fn read(bytes: &[u8], pos: &mut usize) -> Result<Self, ReadError>;
}

pub trait Write: NumBytes {
    fn write(&self, bytes: &mut [u8], pos: &mut usize) -> Result<(), WriteError>;

    /// Encode into a freshly allocated buffer of exactly `num_bytes()` length.
    fn pack(&self) -> Result<Vec<u8>, WriteError> {
        let num_bytes = self.num_bytes();
        let mut bytes = vec![0u8; num_bytes];
        let mut pos = 0;
        self.write(&mut bytes, &mut pos)?;
        if pos != num_bytes {
            return Err(WriteError::ValueOutOfRange(format!(
                "wrote {pos} bytes, expected {num_bytes}"
            )));
        }
        Ok(bytes)
    }
}

/// Decode a whole buffer into `T`, rejecting trailing bytes.
pub fn unpack<T: Read>(bytes: &[u8]) -> Result<T, ReadError> {
    let mut pos = 0;
    let value = T::read(bytes, &mut pos)?;
    if pos != bytes.len() {
        return Err(ReadError::ParseError(format!(
            "{} trailing bytes after position {pos}",
            bytes.len() - pos
        )));
    }
    Ok(value)
}

/// Ensure `needed` bytes remain after `pos`.
#[inline(always)]
pub fn ensure_remaining(bytes: &[u8], pos: usize, needed: usize) -> Result<(), ReadError> {
    match pos.checked_add(needed) {
        Some(end) if end <= bytes.len() => Ok(()),
        _ => Err(ReadError::TruncatedInput {
            pos,
            needed: needed.saturating_sub(bytes.len().saturating_sub(pos)),
        }),
    }
}

/// Ensure `needed` bytes of space remain after `pos`.
#[inline(always)]
pub fn ensure_space(bytes: &[u8], pos: usize, needed: usize) -> Result<(), WriteError> {
    match pos.checked_add(needed) {
        Some(end) if end <= bytes.len() => Ok(()),
        _ => Err(WriteError::NotEnoughSpace),
    }
}
