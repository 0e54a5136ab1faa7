use serde::{Deserialize, Serialize};
use steem_error::SteemError;
use steem_proc_macros::{NumBytes, Read, Write};

use super::{
    BroadcastOperation, Extensions,
    validation::{check_json, check_non_negative, require_account},
};
use crate::{
    asset::Asset,
    authority::{Authority, AuthorityRole, RequiredAuthorities},
    config::ChainConfig,
    crypto::PublicKey,
    name::AccountName,
    utils::steem_assert,
};

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct AccountCreateOperation {
    pub fee: Asset,
    pub creator: AccountName,
    pub new_account_name: AccountName,
    pub owner: Authority,
    pub active: Authority,
    pub posting: Authority,
    pub memo_key: PublicKey,
    pub json_metadata: String,
}

impl BroadcastOperation for AccountCreateOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.creator, AuthorityRole::Active);
    }

    fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.creator, "creator")?;
        require_account(&self.new_account_name, "new_account_name")?;
        config.check_symbol(&self.fee, &[config.steem_symbol], "fee")?;
        check_non_negative(&self.fee, "fee")?;
        self.owner.validate()?;
        self.active.validate()?;
        self.posting.validate()?;
        check_json(&self.json_metadata, "json_metadata")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct AccountCreateWithDelegationOperation {
    pub fee: Asset,
    pub delegation: Asset,
    pub creator: AccountName,
    pub new_account_name: AccountName,
    pub owner: Authority,
    pub active: Authority,
    pub posting: Authority,
    pub memo_key: PublicKey,
    pub json_metadata: String,
    pub extensions: Extensions,
}

impl BroadcastOperation for AccountCreateWithDelegationOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.creator, AuthorityRole::Active);
    }

    fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.creator, "creator")?;
        require_account(&self.new_account_name, "new_account_name")?;
        config.check_symbol(&self.fee, &[config.steem_symbol], "fee")?;
        config.check_symbol(&self.delegation, &[config.vests_symbol], "delegation")?;
        check_non_negative(&self.fee, "fee")?;
        check_non_negative(&self.delegation, "delegation")?;
        self.owner.validate()?;
        self.active.validate()?;
        self.posting.validate()?;
        check_json(&self.json_metadata, "json_metadata")
    }
}

/// Replace any of an account's authorities. Changing `owner` needs the
/// current owner authority, anything else the active one.
#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct AccountUpdateOperation {
    pub account: AccountName,
    pub owner: Option<Authority>,
    pub active: Option<Authority>,
    pub posting: Option<Authority>,
    pub memo_key: PublicKey,
    pub json_metadata: String,
}

impl BroadcastOperation for AccountUpdateOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        let role = if self.owner.is_some() {
            AuthorityRole::Owner
        } else {
            AuthorityRole::Active
        };
        required.add(&self.account, role);
    }

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.account, "account")?;
        for authority in [&self.owner, &self.active, &self.posting].into_iter().flatten() {
            authority.validate()?;
        }
        check_json(&self.json_metadata, "json_metadata")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct AccountWitnessVoteOperation {
    pub account: AccountName,
    pub witness: AccountName,
    pub approve: bool,
}

impl BroadcastOperation for AccountWitnessVoteOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.account, AuthorityRole::Active);
    }

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.account, "account")?;
        require_account(&self.witness, "witness")
    }
}

/// An empty `proxy` clears the current proxy.
#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct AccountWitnessProxyOperation {
    pub account: AccountName,
    pub proxy: AccountName,
}

impl BroadcastOperation for AccountWitnessProxyOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.account, AuthorityRole::Active);
    }

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.account, "account")?;
        steem_assert(
            self.proxy != self.account,
            SteemError::InvalidOperation("cannot proxy to self".into()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct DeclineVotingRightsOperation {
    pub account: AccountName,
    pub decline: bool,
}

impl BroadcastOperation for DeclineVotingRightsOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.account, AuthorityRole::Owner);
    }

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.account, "account")
    }
}
