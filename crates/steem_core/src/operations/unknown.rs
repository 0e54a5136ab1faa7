use serde::{Serialize, Serializer};
use steem_crypto::Bytes;

/// An operation this client has no schema for, kept opaque so that scanning
/// newer block history does not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnknownOperation {
    /// Wire form: the tag plus every byte that followed it.
    Binary { tag: u64, data: Bytes },
    /// JSON form: the variant name and its untouched payload.
    Json { name: String, value: serde_json::Value },
}

impl UnknownOperation {
    pub fn tag(&self) -> Option<u64> {
        match self {
            UnknownOperation::Binary { tag, .. } => Some(*tag),
            UnknownOperation::Json { .. } => None,
        }
    }

    /// Tag or name, whichever identified the operation.
    pub fn describe(&self) -> String {
        match self {
            UnknownOperation::Binary { tag, .. } => tag.to_string(),
            UnknownOperation::Json { name, .. } => name.clone(),
        }
    }
}

impl Serialize for UnknownOperation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            UnknownOperation::Binary { tag, data } => (tag, data).serialize(serializer),
            UnknownOperation::Json { name, value } => (name, value).serialize(serializer),
        }
    }
}
