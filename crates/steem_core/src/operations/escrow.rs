use serde::{Deserialize, Serialize};
use steem_error::SteemError;
use steem_proc_macros::{NumBytes, Read, Write};
use steem_time::TimePointSec;

use super::{
    BroadcastOperation,
    validation::{check_json, check_non_negative, require_account},
};
use crate::{
    asset::Asset,
    authority::{AuthorityRole, RequiredAuthorities},
    config::ChainConfig,
    name::AccountName,
    utils::steem_assert,
};

fn check_escrow_amounts(config: &ChainConfig, sbd_amount: &Asset, steem_amount: &Asset) -> Result<(), SteemError> {
    config.check_symbol(sbd_amount, &[config.sbd_symbol], "sbd_amount")?;
    config.check_symbol(steem_amount, &[config.steem_symbol], "steem_amount")?;
    check_non_negative(sbd_amount, "sbd_amount")?;
    check_non_negative(steem_amount, "steem_amount")?;
    steem_assert(
        sbd_amount.amount > 0 || steem_amount.amount > 0,
        SteemError::InvalidOperation("escrow must move a non-zero amount".into()),
    )
}

/// Funds held by `agent` until both parties approve and it is released.
#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct EscrowTransferOperation {
    pub from: AccountName,
    pub to: AccountName,
    pub agent: AccountName,
    pub escrow_id: u32,
    pub sbd_amount: Asset,
    pub steem_amount: Asset,
    pub fee: Asset,
    pub ratification_deadline: TimePointSec,
    pub escrow_expiration: TimePointSec,
    pub json_meta: String,
}

impl BroadcastOperation for EscrowTransferOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.from, AuthorityRole::Active);
    }

    fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.from, "from")?;
        require_account(&self.to, "to")?;
        require_account(&self.agent, "agent")?;
        steem_assert(
            self.agent != self.from && self.agent != self.to,
            SteemError::InvalidOperation("agent must be a third party".into()),
        )?;
        config.check_symbol(&self.fee, &[config.steem_symbol, config.sbd_symbol], "fee")?;
        check_non_negative(&self.fee, "fee")?;
        check_escrow_amounts(config, &self.sbd_amount, &self.steem_amount)?;
        steem_assert(
            self.ratification_deadline < self.escrow_expiration,
            SteemError::InvalidOperation("ratification deadline must be before escrow expiration".into()),
        )?;
        check_json(&self.json_meta, "json_meta")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct EscrowApproveOperation {
    pub from: AccountName,
    pub to: AccountName,
    pub agent: AccountName,
    pub who: AccountName,
    pub escrow_id: u32,
    pub approve: bool,
}

impl BroadcastOperation for EscrowApproveOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.who, AuthorityRole::Active);
    }

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.from, "from")?;
        steem_assert(
            self.who == self.to || self.who == self.agent,
            SteemError::InvalidOperation("only to or agent can approve an escrow".into()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct EscrowDisputeOperation {
    pub from: AccountName,
    pub to: AccountName,
    pub agent: AccountName,
    pub who: AccountName,
    pub escrow_id: u32,
}

impl BroadcastOperation for EscrowDisputeOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.who, AuthorityRole::Active);
    }

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.from, "from")?;
        steem_assert(
            self.who == self.from || self.who == self.to,
            SteemError::InvalidOperation("only from or to can dispute an escrow".into()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct EscrowReleaseOperation {
    pub from: AccountName,
    pub to: AccountName,
    pub agent: AccountName,
    /// The account releasing the funds.
    pub who: AccountName,
    /// The account receiving the funds.
    pub receiver: AccountName,
    pub escrow_id: u32,
    pub sbd_amount: Asset,
    pub steem_amount: Asset,
}

impl BroadcastOperation for EscrowReleaseOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.who, AuthorityRole::Active);
    }

    fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.from, "from")?;
        steem_assert(
            self.who == self.from || self.who == self.to || self.who == self.agent,
            SteemError::InvalidOperation("who must be from, to or agent".into()),
        )?;
        steem_assert(
            self.receiver == self.from || self.receiver == self.to,
            SteemError::InvalidOperation("receiver must be from or to".into()),
        )?;
        check_escrow_amounts(config, &self.sbd_amount, &self.steem_amount)
    }
}

#[cfg(test)]
mod tests {
    use steem_serialization::{Write, unpack};

    use super::*;

    fn name(s: &str) -> AccountName {
        AccountName::new(s).unwrap()
    }

    fn escrow(config: &ChainConfig) -> EscrowTransferOperation {
        EscrowTransferOperation {
            from: name("alice"),
            to: name("bob"),
            agent: name("carol"),
            escrow_id: 72526562,
            sbd_amount: config.sbd(5000),
            steem_amount: config.steem(0),
            fee: config.sbd(100),
            ratification_deadline: TimePointSec::new(1459931369),
            escrow_expiration: TimePointSec::new(1459931369 + 3600),
            json_meta: String::new(),
        }
    }

    #[test]
    fn test_escrow_transfer() {
        let config = ChainConfig::mainnet();
        let op = escrow(&config);
        assert!(op.validate(&config).is_ok());
        assert_eq!(unpack::<EscrowTransferOperation>(&op.pack().unwrap()).unwrap(), op);

        let late = EscrowTransferOperation {
            ratification_deadline: op.escrow_expiration,
            ..op.clone()
        };
        assert!(late.validate(&config).is_err());

        let empty = EscrowTransferOperation {
            sbd_amount: config.sbd(0),
            ..op.clone()
        };
        assert!(empty.validate(&config).is_err());

        let swapped = EscrowTransferOperation {
            sbd_amount: config.steem(5),
            ..op.clone()
        };
        assert!(swapped.validate(&config).is_err());

        let self_agent = EscrowTransferOperation { agent: name("alice"), ..op };
        assert!(self_agent.validate(&config).is_err());
    }

    #[test]
    fn test_escrow_parties() {
        let config = ChainConfig::mainnet();
        let approve = EscrowApproveOperation {
            from: name("alice"),
            to: name("bob"),
            agent: name("carol"),
            who: name("carol"),
            escrow_id: 1,
            approve: true,
        };
        assert!(approve.validate(&config).is_ok());
        assert!(EscrowApproveOperation { who: name("alice"), ..approve.clone() }.validate(&config).is_err());

        let release = EscrowReleaseOperation {
            from: name("alice"),
            to: name("bob"),
            agent: name("carol"),
            who: name("carol"),
            receiver: name("carol"),
            escrow_id: 1,
            sbd_amount: config.sbd(1),
            steem_amount: config.steem(0),
        };
        assert!(release.validate(&config).is_err());
        let to_bob = EscrowReleaseOperation { receiver: name("bob"), ..release };
        assert!(to_bob.validate(&config).is_ok());

        let mut required = RequiredAuthorities::new();
        to_bob.get_required_authorities(&mut required);
        approve.get_required_authorities(&mut required);
        assert_eq!(required.active, vec![name("carol")]);
    }
}
