use serde::{Deserialize, Serialize};
use steem_crypto::Bytes;
use steem_error::SteemError;
use steem_proc_macros::{NumBytes, Read, Write};

use super::{
    BroadcastOperation,
    validation::{check_custom_id, check_json, require_account},
};
use crate::{
    authority::{Authority, AuthorityRole, RequiredAuthorities},
    config::ChainConfig,
    name::AccountName,
    utils::steem_assert,
};

fn check_accounts(accounts: &[AccountName], field: &str) -> Result<(), SteemError> {
    accounts.iter().try_for_each(|a| require_account(a, field))
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct CustomOperation {
    pub required_auths: Vec<AccountName>,
    pub id: u16,
    pub data: Bytes,
}

impl BroadcastOperation for CustomOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add_all(&self.required_auths, AuthorityRole::Active);
    }

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        steem_assert(
            !self.required_auths.is_empty(),
            SteemError::InvalidOperation("at least one account must be specified".into()),
        )?;
        check_accounts(&self.required_auths, "required_auths")
    }
}

/// Plugin payload; the node only checks that `json` parses.
#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct CustomJsonOperation {
    pub required_auths: Vec<AccountName>,
    pub required_posting_auths: Vec<AccountName>,
    pub id: String,
    pub json: String,
}

impl BroadcastOperation for CustomJsonOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add_all(&self.required_auths, AuthorityRole::Active);
        required.add_all(&self.required_posting_auths, AuthorityRole::Posting);
    }

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        steem_assert(
            !self.required_auths.is_empty() || !self.required_posting_auths.is_empty(),
            SteemError::InvalidOperation("at least one account must be specified".into()),
        )?;
        check_accounts(&self.required_auths, "required_auths")?;
        check_accounts(&self.required_posting_auths, "required_posting_auths")?;
        steem_assert(
            !self.id.is_empty(),
            SteemError::InvalidOperation("custom_json id must not be empty".into()),
        )?;
        check_custom_id(&self.id)?;
        steem_assert(
            !self.json.is_empty(),
            SteemError::InvalidOperation("custom_json payload must not be empty".into()),
        )?;
        check_json(&self.json, "json")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct CustomBinaryOperation {
    pub required_owner_auths: Vec<AccountName>,
    pub required_active_auths: Vec<AccountName>,
    pub required_posting_auths: Vec<AccountName>,
    pub required_auths: Vec<Authority>,
    pub id: String,
    pub data: Bytes,
}

impl BroadcastOperation for CustomBinaryOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add_all(&self.required_owner_auths, AuthorityRole::Owner);
        required.add_all(&self.required_active_auths, AuthorityRole::Active);
        required.add_all(&self.required_posting_auths, AuthorityRole::Posting);
        for authority in &self.required_auths {
            required.add_other(authority.clone());
        }
    }

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        steem_assert(
            !(self.required_owner_auths.is_empty()
                && self.required_active_auths.is_empty()
                && self.required_posting_auths.is_empty()
                && self.required_auths.is_empty()),
            SteemError::InvalidOperation("at least one authority type must be specified".into()),
        )?;
        check_accounts(&self.required_owner_auths, "required_owner_auths")?;
        check_accounts(&self.required_active_auths, "required_active_auths")?;
        check_accounts(&self.required_posting_auths, "required_posting_auths")?;
        for authority in &self.required_auths {
            authority.validate()?;
        }
        check_custom_id(&self.id)
    }
}
