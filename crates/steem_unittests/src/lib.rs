#[cfg(test)]
mod unittests;

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use steem_core::{
        SteemError,
        authority::{Authority, AuthorityRole},
        authority_checker::MemoryAuthorityStore,
        config::ChainConfig,
        crypto::{PrivateKey, PublicKey},
        name::AccountName,
        operations::{BlockId, Operation, TransferOperation, VoteOperation},
        transaction::{SignedTransaction, Transaction},
    };
    use steem_crypto::Digest;
    use steem_time::TimePointSec;

    pub const HEAD_BLOCK_ID: &str = "000085f685abf4dc0000000000000000deadbeef";
    pub const EXPIRATION: u32 = 1459931369;

    /// Offline chain stand-in: an authority table plus the network config.
    pub struct Testing {
        pub config: ChainConfig,
        pub store: MemoryAuthorityStore,
    }

    impl Testing {
        pub fn new() -> Self {
            Self::with_config(ChainConfig::mainnet())
        }

        pub fn with_config(config: ChainConfig) -> Self {
            Testing {
                config,
                store: MemoryAuthorityStore::new(),
            }
        }

        pub fn create_accounts(&mut self, accounts: &[&str]) {
            for account in accounts {
                self.create_account(account);
            }
        }

        /// Every role gets its own single key derived from `<name>_<role>`.
        pub fn create_account(&mut self, account: &str) {
            let key = |role: &str| Authority::from_key(get_public_key(account, role));
            self.store.insert_account(name(account), key("owner"), key("active"), key("posting"));
        }

        pub fn set_authority(&mut self, account: &str, role: AuthorityRole, authority: Authority) {
            self.store.insert(name(account), role, authority);
        }

        pub fn transaction(&self, operations: Vec<Operation>) -> Result<Transaction, SteemError> {
            let mut trx = Transaction::new(0, 0, TimePointSec::new(EXPIRATION), operations)?;
            let head = BlockId::from_str(HEAD_BLOCK_ID).expect("valid head block id");
            trx.set_reference_block(&head);
            Ok(trx)
        }

        pub fn sign(&self, trx: Transaction, keys: &[PrivateKey]) -> Result<SignedTransaction, SteemError> {
            let mut signed = SignedTransaction::new(trx, vec![]);
            for key in keys {
                signed = signed.sign(key, &self.config)?;
            }
            Ok(signed)
        }

        /// Validate, sign and verify the way a node would accept a transaction.
        pub fn push_transaction(
            &self,
            operations: Vec<Operation>,
            keys: &[PrivateKey],
        ) -> Result<SignedTransaction, SteemError> {
            let trx = self.transaction(operations)?;
            trx.validate(&self.config)?;
            let signed = self.sign(trx, keys)?;
            signed.verify_authority(&self.store, &self.config)?;
            Ok(signed)
        }

        pub fn transfer(&self, from: &str, to: &str, amount: i64) -> Operation {
            TransferOperation {
                from: name(from),
                to: name(to),
                amount: self.config.steem(amount),
                memo: String::new(),
            }
            .into()
        }

        pub fn vote(&self, voter: &str, author: &str) -> Operation {
            VoteOperation {
                voter: name(voter),
                author: name(author),
                permlink: "test".into(),
                weight: 10000,
            }
            .into()
        }
    }

    pub fn name(account: &str) -> AccountName {
        AccountName::new(account).expect("valid account name")
    }

    pub fn get_private_key(account: &str, role: &str) -> PrivateKey {
        let secret = account.to_string() + "_" + role;
        let secret = Digest::hash(secret.as_bytes());
        PrivateKey::from_bytes(&secret.0).expect("Failed to create private key")
    }

    pub fn get_public_key(account: &str, role: &str) -> PublicKey {
        get_private_key(account, role)
            .public_key()
            .expect("Failed to derive public key")
    }
}
