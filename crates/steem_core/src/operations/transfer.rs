use serde::{Deserialize, Serialize};
use steem_error::SteemError;
use steem_proc_macros::{NumBytes, Read, Write};

use super::{
    BroadcastOperation,
    validation::{check_memo, check_non_negative, check_percent, check_positive, require_account},
};
use crate::{
    asset::Asset,
    authority::{AuthorityRole, RequiredAuthorities},
    config::ChainConfig,
    name::AccountName,
    utils::steem_assert,
};

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct TransferOperation {
    pub from: AccountName,
    pub to: AccountName,
    pub amount: Asset,
    pub memo: String,
}

impl BroadcastOperation for TransferOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.from, AuthorityRole::Active);
    }

    fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.from, "from")?;
        require_account(&self.to, "to")?;
        config.check_symbol(&self.amount, &[config.steem_symbol, config.sbd_symbol], "amount")?;
        check_positive(&self.amount, "amount")?;
        check_memo(&self.memo)
    }
}

/// Power up. An empty `to` vests to `from`.
#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct TransferToVestingOperation {
    pub from: AccountName,
    pub to: AccountName,
    pub amount: Asset,
}

impl BroadcastOperation for TransferToVestingOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.from, AuthorityRole::Active);
    }

    fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.from, "from")?;
        config.check_symbol(&self.amount, &[config.steem_symbol], "amount")?;
        check_positive(&self.amount, "amount")
    }
}

/// Power down. A zero amount cancels an active withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct WithdrawVestingOperation {
    pub account: AccountName,
    pub vesting_shares: Asset,
}

impl BroadcastOperation for WithdrawVestingOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.account, AuthorityRole::Active);
    }

    fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.account, "account")?;
        config.check_symbol(&self.vesting_shares, &[config.vests_symbol], "vesting_shares")?;
        check_non_negative(&self.vesting_shares, "vesting_shares")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct SetWithdrawVestingRouteOperation {
    pub from_account: AccountName,
    pub to_account: AccountName,
    pub percent: u16,
    pub auto_vest: bool,
}

impl BroadcastOperation for SetWithdrawVestingRouteOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.from_account, AuthorityRole::Active);
    }

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.from_account, "from_account")?;
        require_account(&self.to_account, "to_account")?;
        check_percent(self.percent, "percent")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct ConvertOperation {
    pub owner: AccountName,
    pub requestid: u32,
    pub amount: Asset,
}

impl BroadcastOperation for ConvertOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.owner, AuthorityRole::Active);
    }

    fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.owner, "owner")?;
        config.check_symbol(&self.amount, &[config.sbd_symbol], "amount")?;
        check_positive(&self.amount, "amount")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct TransferToSavingsOperation {
    pub from: AccountName,
    pub to: AccountName,
    pub amount: Asset,
    pub memo: String,
}

impl BroadcastOperation for TransferToSavingsOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.from, AuthorityRole::Active);
    }

    fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.from, "from")?;
        require_account(&self.to, "to")?;
        config.check_symbol(&self.amount, &[config.steem_symbol, config.sbd_symbol], "amount")?;
        check_positive(&self.amount, "amount")?;
        check_memo(&self.memo)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct TransferFromSavingsOperation {
    pub from: AccountName,
    pub request_id: u32,
    pub to: AccountName,
    pub amount: Asset,
    pub memo: String,
}

impl BroadcastOperation for TransferFromSavingsOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.from, AuthorityRole::Active);
    }

    fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.from, "from")?;
        require_account(&self.to, "to")?;
        config.check_symbol(&self.amount, &[config.steem_symbol, config.sbd_symbol], "amount")?;
        check_positive(&self.amount, "amount")?;
        check_memo(&self.memo)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct CancelTransferFromSavingsOperation {
    pub from: AccountName,
    pub request_id: u32,
}

impl BroadcastOperation for CancelTransferFromSavingsOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.from, AuthorityRole::Active);
    }

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.from, "from")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct DelegateVestingSharesOperation {
    pub delegator: AccountName,
    pub delegatee: AccountName,
    pub vesting_shares: Asset,
}

impl BroadcastOperation for DelegateVestingSharesOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.delegator, AuthorityRole::Active);
    }

    fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.delegator, "delegator")?;
        require_account(&self.delegatee, "delegatee")?;
        steem_assert(
            self.delegator != self.delegatee,
            SteemError::InvalidOperation("cannot delegate vesting shares to yourself".into()),
        )?;
        config.check_symbol(&self.vesting_shares, &[config.vests_symbol], "vesting_shares")?;
        check_non_negative(&self.vesting_shares, "vesting_shares")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct ClaimRewardBalanceOperation {
    pub account: AccountName,
    pub reward_steem: Asset,
    pub reward_sbd: Asset,
    pub reward_vests: Asset,
}

impl BroadcastOperation for ClaimRewardBalanceOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.account, AuthorityRole::Posting);
    }

    fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.account, "account")?;
        config.check_symbol(&self.reward_steem, &[config.steem_symbol], "reward_steem")?;
        config.check_symbol(&self.reward_sbd, &[config.sbd_symbol], "reward_sbd")?;
        config.check_symbol(&self.reward_vests, &[config.vests_symbol], "reward_vests")?;
        check_non_negative(&self.reward_steem, "reward_steem")?;
        check_non_negative(&self.reward_sbd, "reward_sbd")?;
        check_non_negative(&self.reward_vests, "reward_vests")?;
        steem_assert(
            self.reward_steem.amount > 0 || self.reward_sbd.amount > 0 || self.reward_vests.amount > 0,
            SteemError::InvalidOperation("must claim something".into()),
        )
    }
}
