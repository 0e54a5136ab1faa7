use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use steem_error::SteemError;
use steem_serialization::{NumBytes, Read, ReadError, Write, WriteError, ensure_remaining, ensure_space};

use crate::{config::MAINNET_ADDRESS_PREFIX, crypto::ripemd160};

pub const PUBLIC_KEY_SIZE: usize = 33;
/// Every supported network uses a three character prefix (`STM`, `TST`).
pub const ADDRESS_PREFIX_LENGTH: usize = 3;

/// Compressed secp256k1 public key.
///
/// The address prefix only affects the text form; equality, hashing and the
/// binary encoding use the curve point alone.
#[derive(Debug, Clone)]
pub struct PublicKey {
    pub key: secp256k1::PublicKey,
    prefix: String,
}

impl PublicKey {
    pub fn new(key: secp256k1::PublicKey) -> Self {
        PublicKey {
            key,
            prefix: MAINNET_ADDRESS_PREFIX.to_string(),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SteemError> {
        secp256k1::PublicKey::from_slice(bytes)
            .map(PublicKey::new)
            .map_err(|e| SteemError::InvalidKey(format!("invalid public key bytes: {e}")))
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.key.serialize()
    }

    /// Parse `<prefix><base58>`, requiring the given network prefix.
    pub fn from_str_with_prefix(s: &str, prefix: &str) -> Result<Self, SteemError> {
        let body = s
            .strip_prefix(prefix)
            .ok_or_else(|| SteemError::InvalidKey(format!("{s} does not start with {prefix}")))?;
        let key33 = decode_checked(body)?;
        Ok(PublicKey::from_bytes(&key33)?.with_prefix(prefix))
    }
}

/// Checksum = RIPEMD160(key)[0..4]
fn checksum(data: &[u8]) -> [u8; 4] {
    let d = ripemd160(data);
    [d[0], d[1], d[2], d[3]]
}

fn decode_checked(b58: &str) -> Result<[u8; PUBLIC_KEY_SIZE], SteemError> {
    let data = bs58::decode(b58)
        .into_vec()
        .map_err(|e| SteemError::InvalidKey(format!("invalid base58: {e}")))?;

    if data.len() != PUBLIC_KEY_SIZE + 4 {
        return Err(SteemError::InvalidKey("invalid public key length".into()));
    }
    let (key_bytes, cksum) = data.split_at(PUBLIC_KEY_SIZE);
    if cksum != checksum(key_bytes) {
        return Err(SteemError::InvalidKey("public key checksum mismatch".into()));
    }

    let mut out = [0u8; PUBLIC_KEY_SIZE];
    out.copy_from_slice(key_bytes);
    Ok(out)
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key33 = self.key.serialize();
        let mut payload = Vec::with_capacity(PUBLIC_KEY_SIZE + 4);
        payload.extend_from_slice(&key33);
        payload.extend_from_slice(&checksum(&key33));
        write!(f, "{}{}", self.prefix, bs58::encode(payload).into_string())
    }
}

impl FromStr for PublicKey {
    type Err = SteemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept:
        // 1) <3 letter prefix><base58>
        // 2) raw 33-byte hex (compressed)
        if s.len() == PUBLIC_KEY_SIZE * 2 && s.bytes().all(|b| b.is_ascii_hexdigit()) {
            let bytes =
                hex::decode(s).map_err(|e| SteemError::InvalidKey(format!("invalid hex: {e}")))?;
            return PublicKey::from_bytes(&bytes);
        }

        let prefix = s
            .get(..ADDRESS_PREFIX_LENGTH)
            .filter(|p| p.bytes().all(|b| b.is_ascii_uppercase()))
            .ok_or_else(|| SteemError::InvalidKey(format!("missing address prefix in {s}")))?;
        PublicKey::from_str_with_prefix(s, prefix)
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PublicKey {}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for PublicKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PublicKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.serialize().cmp(&other.key.serialize())
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PublicKey::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Read for PublicKey {
    fn read(data: &[u8], pos: &mut usize) -> Result<Self, ReadError> {
        ensure_remaining(data, *pos, PUBLIC_KEY_SIZE)?;
        let key = secp256k1::PublicKey::from_slice(&data[*pos..*pos + PUBLIC_KEY_SIZE])
            .map_err(|e| ReadError::ParseError(format!("invalid public key: {e}")))?;
        *pos += PUBLIC_KEY_SIZE;
        Ok(PublicKey::new(key))
    }
}

impl NumBytes for PublicKey {
    fn num_bytes(&self) -> usize {
        PUBLIC_KEY_SIZE
    }
}

impl Write for PublicKey {
    fn write(&self, bytes: &mut [u8], pos: &mut usize) -> Result<(), WriteError> {
        ensure_space(bytes, *pos, PUBLIC_KEY_SIZE)?;
        bytes[*pos..*pos + PUBLIC_KEY_SIZE].copy_from_slice(&self.key.serialize());
        *pos += PUBLIC_KEY_SIZE;
        Ok(())
    }
}
