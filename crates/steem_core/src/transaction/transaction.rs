use serde::{Deserialize, Deserializer, Serialize, de::Error as DeError};
use steem_crypto::{Digest, FixedBytes};
use steem_error::SteemError;
use steem_proc_macros::{NumBytes, Read, Write};
use steem_serialization::{ReadError, Write as _};
use steem_time::TimePointSec;

use crate::{
    authority::RequiredAuthorities,
    config::{ChainConfig, ChainId},
    crypto::PrivateKey,
    operations::{BlockId, Extensions, Operation},
    transaction::SignedTransaction,
    utils::steem_assert,
};

/// First 20 bytes of the SHA-256 of the unsigned transaction.
pub type TransactionId = FixedBytes<20>;

/// An unsigned transaction. Only broadcastable operations get in, whether
/// it is built, decoded from bytes or parsed from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Write, NumBytes, Serialize)]
pub struct Transaction {
    ref_block_num: u16,
    ref_block_prefix: u32,
    expiration: TimePointSec,
    operations: Vec<Operation>,
    extensions: Extensions,
}

/// Wire and JSON layout of `Transaction` before the operation check.
#[derive(Read, Deserialize)]
struct UncheckedTransaction {
    ref_block_num: u16,
    ref_block_prefix: u32,
    expiration: TimePointSec,
    operations: Vec<Operation>,
    extensions: Extensions,
}

impl UncheckedTransaction {
    fn check(self) -> Result<Transaction, String> {
        if let Some(reason) = self.operations.iter().find_map(unbroadcastable) {
            return Err(reason);
        }
        Ok(Transaction {
            ref_block_num: self.ref_block_num,
            ref_block_prefix: self.ref_block_prefix,
            expiration: self.expiration,
            operations: self.operations,
            extensions: self.extensions,
        })
    }
}

impl steem_serialization::Read for Transaction {
    fn read(bytes: &[u8], pos: &mut usize) -> Result<Self, ReadError> {
        <UncheckedTransaction as steem_serialization::Read>::read(bytes, pos)?
            .check()
            .map_err(ReadError::InvalidOperation)
    }
}

impl<'de> Deserialize<'de> for Transaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        UncheckedTransaction::deserialize(deserializer)?
            .check()
            .map_err(|reason| D::Error::custom(format!("invalid operation: {reason}")))
    }
}

impl Transaction {
    pub fn new(
        ref_block_num: u16,
        ref_block_prefix: u32,
        expiration: TimePointSec,
        operations: Vec<Operation>,
    ) -> Result<Self, SteemError> {
        for op in &operations {
            ensure_broadcastable(op)?;
        }
        Ok(Self {
            ref_block_num,
            ref_block_prefix,
            expiration,
            operations,
            extensions: vec![],
        })
    }

    pub fn ref_block_num(&self) -> u16 {
        self.ref_block_num
    }

    pub fn ref_block_prefix(&self) -> u32 {
        self.ref_block_prefix
    }

    pub fn expiration(&self) -> TimePointSec {
        self.expiration
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Point the TaPoS fields at `block_id`: the low 16 bits of the block
    /// number and the next four id bytes read little-endian.
    pub fn set_reference_block(&mut self, block_id: &BlockId) {
        let id = block_id.as_bytes();
        self.ref_block_num = (u32::from_be_bytes([id[0], id[1], id[2], id[3]]) & 0xffff) as u16;
        self.ref_block_prefix = u32::from_le_bytes([id[4], id[5], id[6], id[7]]);
    }

    pub fn set_expiration(&mut self, expiration: TimePointSec) {
        self.expiration = expiration;
    }

    pub fn push_operation(&mut self, op: impl Into<Operation>) -> Result<(), SteemError> {
        let op = op.into();
        ensure_broadcastable(&op)?;
        self.operations.push(op);
        Ok(())
    }

    pub fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
        steem_assert(
            !self.operations.is_empty(),
            SteemError::InvalidOperation("transaction has no operations".into()),
        )?;
        for op in &self.operations {
            op.validate(config)?;
        }
        Ok(())
    }

    pub fn id(&self) -> Result<TransactionId, SteemError> {
        let digest = Digest::hash(self.pack()?);
        let mut id = [0u8; 20];
        id.copy_from_slice(&digest.as_bytes()[..20]);
        Ok(FixedBytes(id))
    }

    /// `sha256(chain_id ‖ unsigned bytes)`, the message every signature covers.
    pub fn digest(&self, chain_id: &ChainId) -> Result<Digest, SteemError> {
        let bytes = self.pack()?;
        Ok(Digest::hash_parts(&[chain_id.as_bytes().as_slice(), bytes.as_slice()]))
    }

    pub fn required_authorities(&self) -> RequiredAuthorities {
        let mut required = RequiredAuthorities::new();
        for op in &self.operations {
            op.collect_required_authorities(&mut required);
        }
        required
    }

    pub fn sign(self, private_key: &PrivateKey, config: &ChainConfig) -> Result<SignedTransaction, SteemError> {
        SignedTransaction::new(self, vec![]).sign(private_key, config)
    }
}

fn unbroadcastable(op: &Operation) -> Option<String> {
    if op.is_virtual() {
        Some(format!("virtual operation {} cannot be broadcast", op.name()))
    } else if matches!(op, Operation::Unknown(_)) {
        Some(format!("unknown operation {} cannot be broadcast", op.name()))
    } else {
        None
    }
}

fn ensure_broadcastable(op: &Operation) -> Result<(), SteemError> {
    unbroadcastable(op).map_or(Ok(()), |reason| Err(SteemError::InvalidOperation(reason)))
}
