use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use steem_crypto::Digest;
use steem_error::SteemError;
use steem_proc_macros::{NumBytes, Read, Write};

use crate::{
    authority_checker::{AuthorityLookup, verify_authority},
    config::{ChainConfig, ChainId},
    crypto::{PrivateKey, PublicKey, Signature},
    transaction::{Transaction, TransactionId},
};

/// A transaction plus the signatures over its chain-bound digest.
///
/// The transaction is only reachable by shared reference so the signatures
/// cannot silently go stale; [`SignedTransaction::into_unsigned`] drops them.
#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    transaction: Transaction,
    signatures: Vec<Signature>,
}

impl SignedTransaction {
    pub fn new(transaction: Transaction, signatures: Vec<Signature>) -> Self {
        Self {
            transaction,
            signatures,
        }
    }

    #[inline]
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    #[inline]
    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    pub fn into_unsigned(self) -> Transaction {
        self.transaction
    }

    pub fn id(&self) -> Result<TransactionId, SteemError> {
        self.transaction.id()
    }

    pub fn digest(&self, chain_id: &ChainId) -> Result<Digest, SteemError> {
        self.transaction.digest(chain_id)
    }

    /// Append a signature by `private_key` for the network in `config`.
    pub fn sign(mut self, private_key: &PrivateKey, config: &ChainConfig) -> Result<Self, SteemError> {
        let digest = self.transaction.digest(&config.chain_id)?;
        let signature = private_key.sign_digest_with_attempts(&digest, config.max_signing_attempts)?;
        self.signatures.push(signature);
        Ok(self)
    }

    /// Signer keys in signature order, each listed once.
    pub fn recovered_keys(&self, chain_id: &ChainId) -> Result<Vec<PublicKey>, SteemError> {
        let digest = self.transaction.digest(chain_id)?;
        let mut seen = HashSet::new();
        let mut keys = Vec::with_capacity(self.signatures.len());
        for signature in &self.signatures {
            let key = signature.recover(&digest)?;
            if seen.insert(key.clone()) {
                keys.push(key);
            }
        }
        Ok(keys)
    }

    /// Check the signatures against every authority the operations require.
    pub fn verify_authority(&self, lookup: &dyn AuthorityLookup, config: &ChainConfig) -> Result<(), SteemError> {
        let keys: HashSet<PublicKey> = self
            .recovered_keys(&config.chain_id)?
            .into_iter()
            .map(|key| key.with_prefix(config.address_prefix.clone()))
            .collect();
        verify_authority(&self.transaction.required_authorities(), &keys, lookup, config)
    }
}
