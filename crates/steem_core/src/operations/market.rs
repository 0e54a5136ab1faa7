use serde::{Deserialize, Serialize};
use steem_error::SteemError;
use steem_proc_macros::{NumBytes, Read, Write};
use steem_time::TimePointSec;

use super::{
    BroadcastOperation,
    validation::{check_positive, require_account},
};
use crate::{
    asset::{Asset, Price},
    authority::{AuthorityRole, RequiredAuthorities},
    config::ChainConfig,
    name::AccountName,
    utils::steem_assert,
};

/// Both sides of an order must be the two liquid currencies, one each.
fn check_market_pair(config: &ChainConfig, sell: &Asset, receive: &Asset) -> Result<(), SteemError> {
    let liquid = [config.steem_symbol, config.sbd_symbol];
    config.check_symbol(sell, &liquid, "amount_to_sell")?;
    config.check_symbol(receive, &liquid, "min_to_receive")?;
    steem_assert(
        sell.symbol != receive.symbol,
        SteemError::InvalidOperation("order must trade STEEM against SBD".into()),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct LimitOrderCreateOperation {
    pub owner: AccountName,
    pub orderid: u32,
    pub amount_to_sell: Asset,
    pub min_to_receive: Asset,
    pub fill_or_kill: bool,
    pub expiration: TimePointSec,
}

impl BroadcastOperation for LimitOrderCreateOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.owner, AuthorityRole::Active);
    }

    fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.owner, "owner")?;
        check_market_pair(config, &self.amount_to_sell, &self.min_to_receive)?;
        Price::new(self.amount_to_sell, self.min_to_receive).validate()
    }
}

/// Like `limit_order_create`, with the price given explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct LimitOrderCreate2Operation {
    pub owner: AccountName,
    pub orderid: u32,
    pub amount_to_sell: Asset,
    pub exchange_rate: Price,
    pub fill_or_kill: bool,
    pub expiration: TimePointSec,
}

impl BroadcastOperation for LimitOrderCreate2Operation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.owner, AuthorityRole::Active);
    }

    fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.owner, "owner")?;
        check_market_pair(config, &self.exchange_rate.base, &self.exchange_rate.quote)?;
        steem_assert(
            self.amount_to_sell.symbol == self.exchange_rate.base.symbol,
            SteemError::InvalidOperation("sell asset must be the base of the price".into()),
        )?;
        self.exchange_rate.validate()?;
        check_positive(&self.amount_to_sell, "amount_to_sell")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct LimitOrderCancelOperation {
    pub owner: AccountName,
    pub orderid: u32,
}

impl BroadcastOperation for LimitOrderCancelOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.owner, AuthorityRole::Active);
    }

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.owner, "owner")
    }
}

/// Witness price feed, SBD per STEEM (either orientation).
#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct FeedPublishOperation {
    pub publisher: AccountName,
    pub exchange_rate: Price,
}

impl BroadcastOperation for FeedPublishOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.publisher, AuthorityRole::Active);
    }

    fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.publisher, "publisher")?;
        let base = self.exchange_rate.base.symbol;
        let quote = self.exchange_rate.quote.symbol;
        steem_assert(
            (base == config.steem_symbol && quote == config.sbd_symbol)
                || (base == config.sbd_symbol && quote == config.steem_symbol),
            SteemError::InvalidOperation("price feed must be a STEEM/SBD price".into()),
        )?;
        self.exchange_rate.validate()
    }
}
