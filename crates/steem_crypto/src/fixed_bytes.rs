use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use steem_serialization::{NumBytes, Read, ReadError, Write, WriteError, ensure_remaining, ensure_space};

/// Raw fixed-width byte array with no length prefix on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FixedBytes<const N: usize>(pub [u8; N]);

impl<const N: usize> FixedBytes<N> {
    #[inline]
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }
}

impl<const N: usize> fmt::Display for FixedBytes<N> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl<const N: usize> FromStr for FixedBytes<N> {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = [0u8; N];
        hex::decode_to_slice(s, &mut out)?;
        Ok(FixedBytes(out))
    }
}

impl<const N: usize> NumBytes for FixedBytes<N> {
    #[inline]
    fn num_bytes(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for FixedBytes<N> {
    #[inline]
    fn default() -> Self {
        FixedBytes([0u8; N])
    }
}

impl<const N: usize> Write for FixedBytes<N> {
    #[inline]
    fn write(&self, bytes: &mut [u8], pos: &mut usize) -> Result<(), WriteError> {
        ensure_space(bytes, *pos, N)?;
        bytes[*pos..*pos + N].copy_from_slice(&self.0);
        *pos += N;
        Ok(())
    }
}

impl<const N: usize> Read for FixedBytes<N> {
    #[inline]
    fn read(data: &[u8], pos: &mut usize) -> Result<Self, ReadError> {
        ensure_remaining(data, *pos, N)?;
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(&data[*pos..*pos + N]);
        *pos += N;
        Ok(FixedBytes(bytes))
    }
}

impl<const N: usize> Serialize for FixedBytes<N> {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

impl<'de, const N: usize> Deserialize<'de> for FixedBytes<N> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FixedBytes::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl<const N: usize> AsRef<[u8]> for FixedBytes<N> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> From<[u8; N]> for FixedBytes<N> {
    fn from(value: [u8; N]) -> Self {
        FixedBytes(value)
    }
}

impl<const N: usize> TryFrom<&[u8]> for FixedBytes<N> {
    type Error = ReadError;

    #[inline]
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; N] = value
            .try_into()
            .map_err(|_| ReadError::ParseError(format!("expected {N} bytes, got {}", value.len())))?;
        Ok(FixedBytes(bytes))
    }
}
