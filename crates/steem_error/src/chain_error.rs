use steem_serialization::{ReadError, WriteError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SteemError {
    #[error("decode error: {0}")]
    Decode(ReadError),
    #[error("encode error: {0}")]
    Encode(#[from] WriteError),
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    #[error("invalid account name: {0}")]
    InvalidAccountName(String),
    #[error("invalid asset: {0}")]
    InvalidAsset(String),
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("signing error: {0}")]
    SigningError(String),
    #[error("signature recover error: {0}")]
    RecoveryError(String),
    #[error("missing required {role} authority of {account}")]
    AuthorityUnsatisfied { account: String, role: String },
    #[error("missing required authority #{0} of the operation's explicit authorities")]
    OtherAuthorityUnsatisfied(usize),
    #[error("authority lookup failed for {account}@{role}: {reason}")]
    AuthorityLookupFailed {
        account: String,
        role: String,
        reason: String,
    },
    #[error("authority recursion limit exceeded: {0}")]
    RecursionLimitExceeded(String),
    #[error("irrelevant signature from key {0}")]
    IrrelevantSignature(String),
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl From<ReadError> for SteemError {
    fn from(err: ReadError) -> Self {
        match err {
            ReadError::InvalidOperation(reason) => SteemError::InvalidOperation(reason),
            err => SteemError::Decode(err),
        }
    }
}
