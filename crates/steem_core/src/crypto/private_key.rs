use std::{fmt, str::FromStr};

use secp256k1::{Message, SECP256K1, SecretKey};
use spdlog::debug;
use steem_crypto::Digest;
use steem_error::SteemError;
use zeroize::Zeroizing;

use super::{public_key::PublicKey, signature::Signature};
use crate::config::MAX_SIGNING_ATTEMPTS;

pub const PRIVATE_KEY_SIZE: usize = 32;
const WIF_VERSION: u8 = 0x80;
const WIF_CHECKSUM_SIZE: usize = 4;

/// secp256k1 secret scalar.
///
/// The secret is wiped when the key is dropped. It is never printed and
/// cannot be cloned or serialized.
pub struct PrivateKey {
    secret: Zeroizing<[u8; PRIVATE_KEY_SIZE]>,
}

/// Library secret key that is erased when signing finishes.
struct SecretScope(SecretKey);

impl Drop for SecretScope {
    fn drop(&mut self) {
        self.0.non_secure_erase();
    }
}

impl PrivateKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SteemError> {
        // Range check (non-zero, below the curve order).
        let mut key = SecretKey::from_slice(bytes)
            .map_err(|e| SteemError::InvalidKey(format!("invalid private key: {e}")))?;
        key.non_secure_erase();

        let mut secret = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        secret.copy_from_slice(bytes);
        Ok(PrivateKey { secret })
    }

    /// Derive a key as `sha256(seed)`, the brain-key style used by wallets
    /// and test fixtures (`"<account>_<role>"`).
    pub fn from_seed(seed: impl AsRef<[u8]>) -> Result<Self, SteemError> {
        let digest = Zeroizing::new(Digest::hash(seed.as_ref()).0);
        PrivateKey::from_bytes(digest.as_ref())
    }

    /// Wallet import format: `base58(0x80 ‖ secret ‖ sha256d(..)[0..4])`.
    pub fn from_wif(wif: &str) -> Result<Self, SteemError> {
        let data = Zeroizing::new(
            bs58::decode(wif)
                .into_vec()
                .map_err(|e| SteemError::InvalidKey(format!("invalid base58: {e}")))?,
        );
        if data.len() != 1 + PRIVATE_KEY_SIZE + WIF_CHECKSUM_SIZE {
            return Err(SteemError::InvalidKey("invalid WIF length".into()));
        }
        if data[0] != WIF_VERSION {
            return Err(SteemError::InvalidKey(format!(
                "invalid WIF version byte {:#04x}",
                data[0]
            )));
        }
        let (payload, checksum) = data.split_at(1 + PRIVATE_KEY_SIZE);
        if checksum != wif_checksum(payload) {
            return Err(SteemError::InvalidKey("WIF checksum mismatch".into()));
        }
        PrivateKey::from_bytes(&payload[1..])
    }

    pub fn to_wif(&self) -> String {
        let mut payload = Zeroizing::new(Vec::with_capacity(1 + PRIVATE_KEY_SIZE + WIF_CHECKSUM_SIZE));
        payload.push(WIF_VERSION);
        payload.extend_from_slice(self.secret.as_ref());
        let checksum = wif_checksum(&payload);
        payload.extend_from_slice(&checksum);
        bs58::encode(payload.as_slice()).into_string()
    }

    pub fn public_key(&self) -> Result<PublicKey, SteemError> {
        let scope = self.scope()?;
        Ok(PublicKey::new(secp256k1::PublicKey::from_secret_key(
            SECP256K1, &scope.0,
        )))
    }

    /// Sign with the default attempt budget.
    pub fn sign_digest(&self, digest: &Digest) -> Result<Signature, SteemError> {
        self.sign_digest_with_attempts(digest, MAX_SIGNING_ATTEMPTS)
    }

    /// Deterministic RFC 6979 signing. The first attempt uses no extra
    /// entropy; later attempts feed an attempt counter as nonce data until a
    /// canonical signature that recovers to this key is produced.
    pub fn sign_digest_with_attempts(
        &self,
        digest: &Digest,
        max_attempts: u32,
    ) -> Result<Signature, SteemError> {
        let scope = self.scope()?;
        let expected = PublicKey::new(secp256k1::PublicKey::from_secret_key(SECP256K1, &scope.0));
        let message = Message::from_digest(digest.0);

        for attempt in 0..max_attempts {
            let recoverable = if attempt == 0 {
                SECP256K1.sign_ecdsa_recoverable(&message, &scope.0)
            } else {
                let mut nonce_data = [0u8; 32];
                nonce_data[..4].copy_from_slice(&attempt.to_le_bytes());
                SECP256K1.sign_ecdsa_recoverable_with_noncedata(&message, &scope.0, &nonce_data)
            };
            let signature = Signature::from_recoverable(&recoverable);

            if !signature.is_canonical() {
                debug!("non-canonical signature on attempt {}, retrying", attempt);
                continue;
            }
            match signature.recover(digest) {
                Ok(recovered) if recovered == expected => return Ok(signature),
                _ => debug!("signature did not recover to signer on attempt {}", attempt),
            }
        }

        Err(SteemError::SigningError(format!(
            "no canonical signature after {max_attempts} attempts"
        )))
    }

    fn scope(&self) -> Result<SecretScope, SteemError> {
        SecretKey::from_slice(self.secret.as_ref())
            .map(SecretScope)
            .map_err(|e| SteemError::InvalidKey(e.to_string()))
    }
}

fn wif_checksum(payload: &[u8]) -> [u8; WIF_CHECKSUM_SIZE] {
    let once = Digest::hash(payload);
    let twice = Digest::hash(once.as_bytes());
    let mut out = [0u8; WIF_CHECKSUM_SIZE];
    out.copy_from_slice(&twice.as_bytes()[..WIF_CHECKSUM_SIZE]);
    out
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

impl FromStr for PrivateKey {
    type Err = SteemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrivateKey::from_wif(s)
    }
}
