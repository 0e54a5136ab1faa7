use serde::{Deserialize, Serialize};
use steem_error::SteemError;

use crate::{
    asset::{Asset, SBD_SYMBOL, STEEM_SYMBOL, Symbol, TBD_SYMBOL, TESTS_SYMBOL, VESTS_SYMBOL},
    config::{
        ChainId, MAINNET_ADDRESS_PREFIX, MAX_AUTHORITY_LOOKUPS, MAX_SIG_CHECK_DEPTH,
        MAX_SIGNING_ATTEMPTS, TESTNET_ADDRESS_PREFIX, TESTNET_CHAIN_ID,
    },
    utils::steem_assert,
};

/// Network parameters threaded explicitly through validation, signing and verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub chain_id: ChainId,
    pub address_prefix: String,
    pub steem_symbol: Symbol,
    pub sbd_symbol: Symbol,
    pub vests_symbol: Symbol,
    /// How many account hops an authority may delegate through.
    pub max_sig_check_depth: u16,
    /// Upper bound on distinct authorities fetched during one verification.
    pub max_authority_lookups: usize,
    /// Nonce variations tried before signing gives up on a canonical signature.
    pub max_signing_attempts: u32,
}

impl Default for ChainConfig {
    fn default() -> Self {
        ChainConfig::mainnet()
    }
}

impl ChainConfig {
    pub fn mainnet() -> Self {
        ChainConfig {
            chain_id: ChainId::zero(),
            address_prefix: MAINNET_ADDRESS_PREFIX.to_string(),
            steem_symbol: STEEM_SYMBOL,
            sbd_symbol: SBD_SYMBOL,
            vests_symbol: VESTS_SYMBOL,
            max_sig_check_depth: MAX_SIG_CHECK_DEPTH,
            max_authority_lookups: MAX_AUTHORITY_LOOKUPS,
            max_signing_attempts: MAX_SIGNING_ATTEMPTS,
        }
    }

    pub fn testnet() -> Self {
        ChainConfig {
            chain_id: TESTNET_CHAIN_ID,
            address_prefix: TESTNET_ADDRESS_PREFIX.to_string(),
            steem_symbol: TESTS_SYMBOL,
            sbd_symbol: TBD_SYMBOL,
            ..ChainConfig::mainnet()
        }
    }

    /// Load a configuration, filling unspecified fields from mainnet.
    pub fn from_json(json: &str) -> Result<Self, SteemError> {
        let config: ChainConfig =
            serde_json::from_str(json).map_err(|e| SteemError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SteemError> {
        steem_assert(
            !self.address_prefix.is_empty()
                && self.address_prefix.bytes().all(|b| b.is_ascii_alphanumeric()),
            SteemError::ConfigError(format!("invalid address prefix {:?}", self.address_prefix)),
        )?;
        steem_assert(
            self.max_sig_check_depth > 0,
            SteemError::ConfigError("max_sig_check_depth must be positive".into()),
        )?;
        steem_assert(
            self.max_authority_lookups > 0,
            SteemError::ConfigError("max_authority_lookups must be positive".into()),
        )?;
        steem_assert(
            self.max_signing_attempts > 0,
            SteemError::ConfigError("max_signing_attempts must be positive".into()),
        )?;
        let symbols = [self.steem_symbol, self.sbd_symbol, self.vests_symbol];
        steem_assert(
            symbols[0] != symbols[1] && symbols[1] != symbols[2] && symbols[0] != symbols[2],
            SteemError::ConfigError("currency symbols must be distinct".into()),
        )
    }

    pub fn steem(&self, amount: i64) -> Asset {
        Asset::new(amount, self.steem_symbol)
    }

    pub fn sbd(&self, amount: i64) -> Asset {
        Asset::new(amount, self.sbd_symbol)
    }

    pub fn vests(&self, amount: i64) -> Asset {
        Asset::new(amount, self.vests_symbol)
    }

    /// Whether the symbol (code and precision) is one of this chain's currencies.
    pub fn is_known_symbol(&self, symbol: &Symbol) -> bool {
        *symbol == self.steem_symbol || *symbol == self.sbd_symbol || *symbol == self.vests_symbol
    }

    /// Fail unless `asset` is denominated in one of `allowed`.
    pub fn check_symbol(&self, asset: &Asset, allowed: &[Symbol], field: &str) -> Result<(), SteemError> {
        steem_assert(
            self.is_known_symbol(&asset.symbol),
            SteemError::InvalidAsset(format!("{field}: unknown symbol {}", asset.symbol)),
        )?;
        steem_assert(
            allowed.contains(&asset.symbol),
            SteemError::InvalidOperation(format!(
                "{field} must be in {}, got {asset}",
                allowed
                    .iter()
                    .map(Symbol::code)
                    .collect::<Vec<_>>()
                    .join(" or ")
            )),
        )
    }
}
