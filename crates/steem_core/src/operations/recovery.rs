use serde::{Deserialize, Serialize};
use steem_error::SteemError;
use steem_proc_macros::{NumBytes, Read, Write};

use super::{BroadcastOperation, Extensions, validation::require_account};
use crate::{
    authority::{Authority, AuthorityRole, RequiredAuthorities},
    config::ChainConfig,
    name::AccountName,
    utils::steem_assert,
};

/// Filed by the recovery partner of `account_to_recover`. An impossible
/// `new_owner_authority` (threshold above total weight) cancels a pending request.
#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct RequestAccountRecoveryOperation {
    pub recovery_account: AccountName,
    pub account_to_recover: AccountName,
    pub new_owner_authority: Authority,
    pub extensions: Extensions,
}

impl BroadcastOperation for RequestAccountRecoveryOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.recovery_account, AuthorityRole::Active);
    }

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.recovery_account, "recovery_account")?;
        require_account(&self.account_to_recover, "account_to_recover")?;
        if self.new_owner_authority.is_impossible() {
            return Ok(());
        }
        self.new_owner_authority.validate()
    }
}

/// Signed by both the new owner authority and an owner authority the account
/// held within the recovery window.
#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct RecoverAccountOperation {
    pub account_to_recover: AccountName,
    pub new_owner_authority: Authority,
    pub recent_owner_authority: Authority,
    pub extensions: Extensions,
}

impl BroadcastOperation for RecoverAccountOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add_other(self.new_owner_authority.clone());
        required.add_other(self.recent_owner_authority.clone());
    }

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.account_to_recover, "account_to_recover")?;
        steem_assert(
            self.new_owner_authority != self.recent_owner_authority,
            SteemError::InvalidOperation("cannot set new owner authority to the recent owner".into()),
        )?;
        self.new_owner_authority.validate()?;
        self.recent_owner_authority.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct ChangeRecoveryAccountOperation {
    pub account_to_recover: AccountName,
    pub new_recovery_account: AccountName,
    pub extensions: Extensions,
}

impl BroadcastOperation for ChangeRecoveryAccountOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.account_to_recover, AuthorityRole::Owner);
    }

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.account_to_recover, "account_to_recover")?;
        require_account(&self.new_recovery_account, "new_recovery_account")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct ResetAccountOperation {
    pub reset_account: AccountName,
    pub account_to_reset: AccountName,
    pub new_owner_authority: Authority,
}

impl BroadcastOperation for ResetAccountOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.reset_account, AuthorityRole::Active);
    }

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.reset_account, "reset_account")?;
        require_account(&self.account_to_reset, "account_to_reset")?;
        self.new_owner_authority.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct SetResetAccountOperation {
    pub account: AccountName,
    pub current_reset_account: AccountName,
    pub reset_account: AccountName,
}

impl BroadcastOperation for SetResetAccountOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.account, AuthorityRole::Owner);
    }

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.account, "account")?;
        steem_assert(
            self.current_reset_account != self.reset_account,
            SteemError::InvalidOperation("new reset account cannot be the current one".into()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct ChallengeAuthorityOperation {
    pub challenger: AccountName,
    pub challenged: AccountName,
    pub require_owner: bool,
}

impl BroadcastOperation for ChallengeAuthorityOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.challenger, AuthorityRole::Active);
    }

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.challenger, "challenger")?;
        require_account(&self.challenged, "challenged")?;
        steem_assert(
            self.challenger != self.challenged,
            SteemError::InvalidOperation("cannot challenge yourself".into()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct ProveAuthorityOperation {
    pub challenged: AccountName,
    pub require_owner: bool,
}

impl BroadcastOperation for ProveAuthorityOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        let role = if self.require_owner {
            AuthorityRole::Owner
        } else {
            AuthorityRole::Active
        };
        required.add(&self.challenged, role);
    }

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.challenged, "challenged")
    }
}
