use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use steem_crypto::Digest;
use steem_error::SteemError;

/// Identifier mixed into every signing digest so a signature is valid on one network only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub Digest);

impl ChainId {
    pub const fn new(bytes: [u8; 32]) -> Self {
        ChainId(Digest(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Mainnet uses the all-zero id.
    pub fn zero() -> Self {
        ChainId::default()
    }
}

impl FromStr for ChainId {
    type Err = SteemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Digest::from_str(s)
            .map(ChainId)
            .map_err(|e| SteemError::ConfigError(format!("invalid chain id {s}: {e}")))
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::ChainId;
    use std::str::FromStr;

    #[test]
    fn test_chain_id_from_str() {
        let id = ChainId::from_str("79276aea5d4877d9a25892eaa01b0adf019d3e5cb12a97478df3298ccdd01673")
            .unwrap();
        assert_eq!(
            id.to_string(),
            "79276aea5d4877d9a25892eaa01b0adf019d3e5cb12a97478df3298ccdd01673"
        );
        assert!(ChainId::from_str("7927").is_err());
        assert_eq!(ChainId::zero().as_bytes(), &[0u8; 32]);
    }
}
