use std::{fmt, str::FromStr};

use secp256k1::{
    Message, SECP256K1,
    ecdsa::{RecoverableSignature, RecoveryId},
};
use serde::{Deserialize, Serialize};
use steem_crypto::Digest;
use steem_error::SteemError;
use steem_serialization::{NumBytes, Read, ReadError, Write, WriteError, ensure_remaining, ensure_space};

use super::public_key::PublicKey;

pub const SIGNATURE_SIZE: usize = 65;

/// Header base for signatures over compressed keys.
const COMPRESSED_HEADER: u8 = 27 + 4;

/// Compact recoverable signature: `[header, r(32), s(32)]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_SIZE]);

impl Signature {
    pub fn from_bytes(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        Signature(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.0
    }

    pub(crate) fn from_recoverable(signature: &RecoverableSignature) -> Self {
        let (recovery_id, compact) = signature.serialize_compact();
        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes[0] = COMPRESSED_HEADER + recovery_id as u8;
        bytes[1..].copy_from_slice(&compact);
        Signature(bytes)
    }

    pub fn recovery_id(&self) -> Result<RecoveryId, SteemError> {
        let header = self.0[0];
        if !(27..=34).contains(&header) {
            return Err(SteemError::RecoveryError(format!(
                "invalid signature header {header}"
            )));
        }
        RecoveryId::try_from(((header - 27) & 3) as i32)
            .map_err(|e| SteemError::RecoveryError(e.to_string()))
    }

    /// The chain accepts only signatures whose `r` and `s` are both below
    /// 2^255 and carry no redundant leading zero byte.
    pub fn is_canonical(&self) -> bool {
        let c = &self.0;
        (c[1] & 0x80) == 0
            && !(c[1] == 0 && (c[2] & 0x80) == 0)
            && (c[33] & 0x80) == 0
            && !(c[33] == 0 && (c[34] & 0x80) == 0)
    }

    pub fn recover(&self, digest: &Digest) -> Result<PublicKey, SteemError> {
        let recovery_id = self.recovery_id()?;
        let signature = RecoverableSignature::from_compact(&self.0[1..], recovery_id)
            .map_err(|e| SteemError::RecoveryError(e.to_string()))?;
        let message = Message::from_digest(digest.0);
        SECP256K1
            .recover_ecdsa(&message, &signature)
            .map(PublicKey::new)
            .map_err(|e| SteemError::RecoveryError(e.to_string()))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", hex::encode(self.0))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for Signature {
    type Err = SteemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; SIGNATURE_SIZE];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| SteemError::RecoveryError(format!("invalid signature hex: {e}")))?;
        Ok(Signature(bytes))
    }
}

impl NumBytes for Signature {
    fn num_bytes(&self) -> usize {
        SIGNATURE_SIZE
    }
}

impl Read for Signature {
    fn read(data: &[u8], pos: &mut usize) -> Result<Self, ReadError> {
        ensure_remaining(data, *pos, SIGNATURE_SIZE)?;
        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes.copy_from_slice(&data[*pos..*pos + SIGNATURE_SIZE]);
        *pos += SIGNATURE_SIZE;
        Ok(Signature(bytes))
    }
}

impl Write for Signature {
    fn write(&self, bytes: &mut [u8], pos: &mut usize) -> Result<(), WriteError> {
        ensure_space(bytes, *pos, SIGNATURE_SIZE)?;
        bytes[*pos..*pos + SIGNATURE_SIZE].copy_from_slice(&self.0);
        *pos += SIGNATURE_SIZE;
        Ok(())
    }
}

impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Signature::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIG_HEX: &str = "1c64dca26c66c15e1ae1f9d6f3f2c94b9189ac9e46adc309deda2a8570c253492f0dddd864b72a0dc3c48842f46866127c43d4a298644ca70787655aa0281ae779";
    const DIGEST_HEX: &str = "1261e0c25e753e4978c8c5c7a90ed5d69bf0c8f29c3375ce3c13aa932bcac06f";

    #[test]
    fn test_recover_known_signature() {
        let signature = Signature::from_str(SIG_HEX).unwrap();
        assert!(signature.is_canonical());
        let digest = Digest::from_str(DIGEST_HEX).unwrap();
        let key = signature.recover(&digest).unwrap();
        assert_eq!(key.to_string(), "STM6AjgkEeGmC8KhBn8cqmxBzqvN8aNuzYFY79fTFkfVFxbEpQTZD");
    }

    #[test]
    fn test_canonical_rule() {
        let mut bytes = [0x11u8; SIGNATURE_SIZE];
        bytes[0] = 31;
        assert!(Signature::from_bytes(bytes).is_canonical());

        let mut high_r = bytes;
        high_r[1] = 0x80;
        assert!(!Signature::from_bytes(high_r).is_canonical());

        let mut padded_s = bytes;
        padded_s[33] = 0x00;
        padded_s[34] = 0x7f;
        assert!(!Signature::from_bytes(padded_s).is_canonical());

        let mut needed_zero = bytes;
        needed_zero[33] = 0x00;
        needed_zero[34] = 0x80;
        assert!(Signature::from_bytes(needed_zero).is_canonical());
    }

    #[test]
    fn test_bad_header_is_recovery_error() {
        let mut bytes = [0x11u8; SIGNATURE_SIZE];
        bytes[0] = 5;
        assert!(matches!(
            Signature::from_bytes(bytes).recover(&Digest::hash(b"x")),
            Err(SteemError::RecoveryError(_))
        ));
    }

    #[test]
    fn test_signature_text_and_wire() {
        let signature = Signature::from_str(SIG_HEX).unwrap();
        assert_eq!(signature.to_string(), SIG_HEX);
        assert_eq!(hex::encode(signature.pack().unwrap()), SIG_HEX);
        assert_eq!(
            serde_json::to_string(&signature).unwrap(),
            format!("\"{SIG_HEX}\"")
        );
        assert!(Signature::from_str("1c64").is_err());
    }
}
