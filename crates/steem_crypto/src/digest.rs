use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::Digest as ShaDigest;
use steem_serialization::{NumBytes, Read, ReadError, Write, WriteError, ensure_remaining, ensure_space};

/// SHA-256 output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    #[inline]
    pub fn hash(data: impl AsRef<[u8]>) -> Self {
        Self::hash_parts(&[data.as_ref()])
    }

    /// Hash the concatenation of `parts` without building it.
    #[inline]
    pub fn hash_parts(parts: &[&[u8]]) -> Self {
        let mut hasher = sha2::Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        let mut out = [0u8; 32];
        out.copy_from_slice(hasher.finalize().as_ref());
        Digest(out)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for Digest {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = [0u8; 32];
        hex::decode_to_slice(s, &mut out)?;
        Ok(Digest(out))
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl NumBytes for Digest {
    #[inline]
    fn num_bytes(&self) -> usize {
        32
    }
}

impl Write for Digest {
    #[inline]
    fn write(&self, bytes: &mut [u8], pos: &mut usize) -> Result<(), WriteError> {
        ensure_space(bytes, *pos, 32)?;
        bytes[*pos..*pos + 32].copy_from_slice(&self.0);
        *pos += 32;
        Ok(())
    }
}

impl Read for Digest {
    #[inline]
    fn read(data: &[u8], pos: &mut usize) -> Result<Self, ReadError> {
        ensure_remaining(data, *pos, 32)?;
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&data[*pos..*pos + 32]);
        *pos += 32;
        Ok(Digest(digest))
    }
}

impl Serialize for Digest {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Digest::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_of_empty_input() {
        assert_eq!(
            Digest::hash(b"").to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn hash_parts_matches_concatenation() {
        assert_eq!(
            Digest::hash_parts(&[b"dez", b"1337"]),
            Digest::hash(b"dez1337")
        );
    }
}
