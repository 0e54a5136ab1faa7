use std::{collections::HashSet, fmt};

use serde::{Deserialize, Serialize};
use steem_error::SteemError;
use steem_proc_macros::{NumBytes, Read, Write};

use crate::{crypto::PublicKey, name::AccountName, utils::steem_assert};

/// Weighted-threshold signer requirement.
///
/// Entries keep the order they were supplied in; the wire form writes them
/// as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct Authority {
    pub weight_threshold: u32,
    pub account_auths: Vec<(AccountName, u16)>,
    pub key_auths: Vec<(PublicKey, u16)>,
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "authority {{ threshold: {}, accounts: {:?}, keys: {:?} }}",
            self.weight_threshold,
            self.account_auths
                .iter()
                .map(|(name, weight)| format!("{name}:{weight}"))
                .collect::<Vec<_>>(),
            self.key_auths
                .iter()
                .map(|(key, weight)| format!("{key}:{weight}"))
                .collect::<Vec<_>>(),
        )
    }
}

impl Authority {
    pub fn new(
        weight_threshold: u32,
        account_auths: Vec<(AccountName, u16)>,
        key_auths: Vec<(PublicKey, u16)>,
    ) -> Self {
        Authority {
            weight_threshold,
            account_auths,
            key_auths,
        }
    }

    /// Threshold 1 satisfied by a single key.
    pub fn from_key(key: PublicKey) -> Self {
        Authority::new(1, vec![], vec![(key, 1)])
    }

    /// Threshold 1 satisfied by another account.
    pub fn from_account(account: AccountName) -> Self {
        Authority::new(1, vec![(account, 1)], vec![])
    }

    #[must_use]
    pub fn with_key(mut self, key: PublicKey, weight: u16) -> Self {
        self.key_auths.push((key, weight));
        self
    }

    #[must_use]
    pub fn with_account(mut self, account: AccountName, weight: u16) -> Self {
        self.account_auths.push((account, weight));
        self
    }

    pub fn threshold(&self) -> u32 {
        self.weight_threshold
    }

    pub fn total_weight(&self) -> u64 {
        let accounts: u64 = self.account_auths.iter().map(|(_, w)| *w as u64).sum();
        let keys: u64 = self.key_auths.iter().map(|(_, w)| *w as u64).sum();
        accounts + keys
    }

    /// True when even every entry signing cannot reach the threshold.
    pub fn is_impossible(&self) -> bool {
        self.total_weight() < self.weight_threshold as u64
    }

    pub fn validate(&self) -> Result<(), SteemError> {
        steem_assert(
            self.weight_threshold > 0,
            SteemError::InvalidOperation("authority threshold must be positive".into()),
        )?;
        steem_assert(
            !self.is_impossible(),
            SteemError::InvalidOperation(format!("authority can never be satisfied: {self}")),
        )?;

        let mut accounts = HashSet::new();
        for (account, weight) in &self.account_auths {
            steem_assert(
                !account.is_empty(),
                SteemError::InvalidAccountName("empty account in authority".into()),
            )?;
            steem_assert(
                *weight > 0,
                SteemError::InvalidOperation(format!("zero weight for account {account}")),
            )?;
            steem_assert(
                accounts.insert(account),
                SteemError::InvalidOperation(format!("duplicate account {account} in authority")),
            )?;
        }

        let mut keys = HashSet::new();
        for (key, weight) in &self.key_auths {
            steem_assert(
                *weight > 0,
                SteemError::InvalidOperation(format!("zero weight for key {key}")),
            )?;
            steem_assert(
                keys.insert(key),
                SteemError::InvalidOperation(format!("duplicate key {key} in authority")),
            )?;
        }
        Ok(())
    }
}
