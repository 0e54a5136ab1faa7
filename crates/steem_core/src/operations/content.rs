use serde::{Deserialize, Serialize};
use steem_error::SteemError;
use steem_proc_macros::{NumBytes, Read, Write};

use super::{
    BroadcastOperation,
    validation::{check_json, check_percent, check_permlink, check_non_negative, require_account},
};
use crate::{
    asset::Asset,
    authority::{AuthorityRole, RequiredAuthorities},
    config::{ChainConfig, MAX_COMMENT_BENEFICIARIES, STEEM_100_PERCENT},
    name::AccountName,
    utils::{static_variant, steem_assert},
};

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct VoteOperation {
    pub voter: AccountName,
    pub author: AccountName,
    pub permlink: String,
    /// Signed basis points, `-10000..=10000`.
    pub weight: i16,
}

impl BroadcastOperation for VoteOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.voter, AuthorityRole::Posting);
    }

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.voter, "voter")?;
        require_account(&self.author, "author")?;
        check_permlink(&self.permlink)?;
        steem_assert(
            self.weight.unsigned_abs() <= STEEM_100_PERCENT,
            SteemError::InvalidOperation(format!("vote weight {} out of range", self.weight)),
        )
    }
}

/// A post when `parent_author` is empty, otherwise a reply.
#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct CommentOperation {
    pub parent_author: AccountName,
    pub parent_permlink: String,
    pub author: AccountName,
    pub permlink: String,
    pub title: String,
    pub body: String,
    pub json_metadata: String,
}

impl BroadcastOperation for CommentOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.author, AuthorityRole::Posting);
    }

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.author, "author")?;
        steem_assert(
            self.title.len() < 256,
            SteemError::InvalidOperation("comment title is too long".into()),
        )?;
        steem_assert(
            !self.body.is_empty(),
            SteemError::InvalidOperation("comment body is empty".into()),
        )?;
        check_permlink(&self.parent_permlink)?;
        check_permlink(&self.permlink)?;
        check_json(&self.json_metadata, "json_metadata")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct DeleteCommentOperation {
    pub author: AccountName,
    pub permlink: String,
}

impl BroadcastOperation for DeleteCommentOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.author, AuthorityRole::Posting);
    }

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.author, "author")?;
        check_permlink(&self.permlink)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct BeneficiaryRoute {
    pub account: AccountName,
    pub weight: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct CommentPayoutBeneficiaries {
    pub beneficiaries: Vec<BeneficiaryRoute>,
}

impl CommentPayoutBeneficiaries {
    pub fn validate(&self) -> Result<(), SteemError> {
        steem_assert(
            !self.beneficiaries.is_empty(),
            SteemError::InvalidOperation("must specify at least one beneficiary".into()),
        )?;
        steem_assert(
            self.beneficiaries.len() <= MAX_COMMENT_BENEFICIARIES,
            SteemError::InvalidOperation(format!(
                "cannot specify more than {MAX_COMMENT_BENEFICIARIES} beneficiaries"
            )),
        )?;

        let mut total_weight = 0u32;
        for (i, route) in self.beneficiaries.iter().enumerate() {
            require_account(&route.account, "beneficiary")?;
            total_weight += route.weight as u32;
            if i > 0 {
                steem_assert(
                    self.beneficiaries[i - 1].account < route.account,
                    SteemError::InvalidOperation(
                        "beneficiaries must be sorted by account and unique".into(),
                    ),
                )?;
            }
        }
        steem_assert(
            total_weight <= STEEM_100_PERCENT as u32,
            SteemError::InvalidOperation("beneficiary weights exceed 100%".into()),
        )
    }
}

static_variant! {
    pub enum CommentOptionsExtension {
        0 => Beneficiaries(CommentPayoutBeneficiaries),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct CommentOptionsOperation {
    pub author: AccountName,
    pub permlink: String,
    /// SBD value of the maximum payout this comment will receive.
    pub max_accepted_payout: Asset,
    pub percent_steem_dollars: u16,
    pub allow_votes: bool,
    pub allow_curation_rewards: bool,
    pub extensions: Vec<CommentOptionsExtension>,
}

impl BroadcastOperation for CommentOptionsOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.author, AuthorityRole::Posting);
    }

    fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.author, "author")?;
        check_permlink(&self.permlink)?;
        check_percent(self.percent_steem_dollars, "percent_steem_dollars")?;
        config.check_symbol(&self.max_accepted_payout, &[config.sbd_symbol], "max_accepted_payout")?;
        check_non_negative(&self.max_accepted_payout, "max_accepted_payout")?;
        for extension in &self.extensions {
            match extension {
                CommentOptionsExtension::Beneficiaries(b) => b.validate()?,
            }
        }
        Ok(())
    }
}
