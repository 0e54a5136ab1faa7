mod account;
pub use account::*;

mod content;
pub use content::*;

mod custom;
pub use custom::*;

mod escrow;
pub use escrow::*;

mod extensions;
pub use extensions::*;

mod market;
pub use market::*;

mod recovery;
pub use recovery::*;

mod transfer;
pub use transfer::*;

mod unknown;
pub use unknown::*;

mod virtual_ops;
pub use virtual_ops::*;

mod witness;
pub use witness::*;

mod validation;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use spdlog::warn;
use steem_error::SteemError;
use steem_serialization::{NumBytes, Read, ReadError, VarUint32, Write, WriteError};

use crate::{
    authority::RequiredAuthorities,
    config::ChainConfig,
    utils::{deserialize_static_variant, payload_from_value},
};

/// Behavior shared by every operation a client may broadcast.
pub trait BroadcastOperation {
    /// Add the accounts and explicit authorities that must sign.
    fn get_required_authorities(&self, required: &mut RequiredAuthorities);

    /// Stateless checks a node performs before touching chain state.
    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        Ok(())
    }
}

macro_rules! operations {
    (
        broadcast {
            $($btag:literal => $bvariant:ident($bty:ty) = $bname:literal),+ $(,)?
        }
        virtual_ops {
            $($vtag:literal => $vvariant:ident($vty:ty) = $vname:literal),+ $(,)?
        }
    ) => {
        /// Every operation of the protocol, keyed by its wire tag.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum Operation {
            $($bvariant($bty),)+
            $($vvariant($vty),)+
            Unknown(UnknownOperation),
        }

        impl Operation {
            pub fn tag(&self) -> Option<u64> {
                match self {
                    $(Operation::$bvariant(_) => Some($btag),)+
                    $(Operation::$vvariant(_) => Some($vtag),)+
                    Operation::Unknown(op) => op.tag(),
                }
            }

            pub fn name(&self) -> &str {
                match self {
                    $(Operation::$bvariant(_) => $bname,)+
                    $(Operation::$vvariant(_) => $vname,)+
                    Operation::Unknown(UnknownOperation::Json { name, .. }) => name.as_str(),
                    Operation::Unknown(UnknownOperation::Binary { .. }) => "unknown",
                }
            }

            pub fn is_virtual(&self) -> bool {
                matches!(self, $(Operation::$vvariant(_))|+)
            }

            /// Append this operation's signing requirements to `required`.
            /// Virtual and unknown operations contribute nothing.
            pub fn collect_required_authorities(&self, required: &mut RequiredAuthorities) {
                match self {
                    $(Operation::$bvariant(op) => op.get_required_authorities(required),)+
                    _ => {}
                }
            }

            pub fn required_authorities(&self) -> RequiredAuthorities {
                let mut required = RequiredAuthorities::new();
                self.collect_required_authorities(&mut required);
                required
            }

            pub fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
                match self {
                    $(Operation::$bvariant(op) => op.validate(config),)+
                    Operation::Unknown(op) => Err(SteemError::InvalidOperation(format!(
                        "unknown operation {} cannot be broadcast",
                        op.describe()
                    ))),
                    _ => Err(SteemError::InvalidOperation(format!(
                        "{} is a virtual operation",
                        self.name()
                    ))),
                }
            }

            fn read_payload(tag: u64, bytes: &[u8], pos: &mut usize) -> Result<Option<Operation>, ReadError> {
                let op = match tag {
                    $($btag => Operation::$bvariant(<$bty as Read>::read(bytes, pos)?),)+
                    $($vtag => Operation::$vvariant(<$vty as Read>::read(bytes, pos)?),)+
                    _ => return Ok(None),
                };
                Ok(Some(op))
            }

            fn payload_num_bytes(&self) -> usize {
                match self {
                    $(Operation::$bvariant(op) => op.num_bytes(),)+
                    _ => 0,
                }
            }

            fn write_payload(&self, bytes: &mut [u8], pos: &mut usize) -> Result<(), WriteError> {
                match self {
                    $(Operation::$bvariant(op) => op.write(bytes, pos),)+
                    Operation::Unknown(op) => Err(WriteError::UnknownOperationType(op.describe())),
                    _ => Err(WriteError::VirtualOperation(self.name().to_string())),
                }
            }

            fn payload_to_json<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $(Operation::$bvariant(op) => ($bname, op).serialize(serializer),)+
                    $(Operation::$vvariant(op) => ($vname, op).serialize(serializer),)+
                    Operation::Unknown(op) => op.serialize(serializer),
                }
            }

            fn payload_from_json<E: serde::de::Error>(
                name: String,
                value: serde_json::Value,
            ) -> Result<Operation, E> {
                let key = name.strip_suffix("_operation").unwrap_or(&name).to_string();
                let op = match key.as_str() {
                    $($bname => Operation::$bvariant(payload_from_value(value)?),)+
                    $($vname => Operation::$vvariant(payload_from_value(value)?),)+
                    _ => Operation::Unknown(UnknownOperation::Json { name, value }),
                };
                Ok(op)
            }
        }

        $(
            impl From<$bty> for Operation {
                fn from(op: $bty) -> Self {
                    Operation::$bvariant(op)
                }
            }
        )+
    };
}

operations! {
    broadcast {
        0 => Vote(VoteOperation) = "vote",
        1 => Comment(CommentOperation) = "comment",
        2 => Transfer(TransferOperation) = "transfer",
        3 => TransferToVesting(TransferToVestingOperation) = "transfer_to_vesting",
        4 => WithdrawVesting(WithdrawVestingOperation) = "withdraw_vesting",
        5 => LimitOrderCreate(LimitOrderCreateOperation) = "limit_order_create",
        6 => LimitOrderCancel(LimitOrderCancelOperation) = "limit_order_cancel",
        7 => FeedPublish(FeedPublishOperation) = "feed_publish",
        8 => Convert(ConvertOperation) = "convert",
        9 => AccountCreate(AccountCreateOperation) = "account_create",
        10 => AccountUpdate(AccountUpdateOperation) = "account_update",
        11 => WitnessUpdate(WitnessUpdateOperation) = "witness_update",
        12 => AccountWitnessVote(AccountWitnessVoteOperation) = "account_witness_vote",
        13 => AccountWitnessProxy(AccountWitnessProxyOperation) = "account_witness_proxy",
        14 => Pow(PowOperation) = "pow",
        15 => Custom(CustomOperation) = "custom",
        16 => ReportOverProduction(ReportOverProductionOperation) = "report_over_production",
        17 => DeleteComment(DeleteCommentOperation) = "delete_comment",
        18 => CustomJson(CustomJsonOperation) = "custom_json",
        19 => CommentOptions(CommentOptionsOperation) = "comment_options",
        20 => SetWithdrawVestingRoute(SetWithdrawVestingRouteOperation) = "set_withdraw_vesting_route",
        21 => LimitOrderCreate2(LimitOrderCreate2Operation) = "limit_order_create2",
        22 => ChallengeAuthority(ChallengeAuthorityOperation) = "challenge_authority",
        23 => ProveAuthority(ProveAuthorityOperation) = "prove_authority",
        24 => RequestAccountRecovery(RequestAccountRecoveryOperation) = "request_account_recovery",
        25 => RecoverAccount(RecoverAccountOperation) = "recover_account",
        26 => ChangeRecoveryAccount(ChangeRecoveryAccountOperation) = "change_recovery_account",
        27 => EscrowTransfer(EscrowTransferOperation) = "escrow_transfer",
        28 => EscrowDispute(EscrowDisputeOperation) = "escrow_dispute",
        29 => EscrowRelease(EscrowReleaseOperation) = "escrow_release",
        30 => Pow2(Pow2Operation) = "pow2",
        31 => EscrowApprove(EscrowApproveOperation) = "escrow_approve",
        32 => TransferToSavings(TransferToSavingsOperation) = "transfer_to_savings",
        33 => TransferFromSavings(TransferFromSavingsOperation) = "transfer_from_savings",
        34 => CancelTransferFromSavings(CancelTransferFromSavingsOperation) = "cancel_transfer_from_savings",
        35 => CustomBinary(CustomBinaryOperation) = "custom_binary",
        36 => DeclineVotingRights(DeclineVotingRightsOperation) = "decline_voting_rights",
        37 => ResetAccount(ResetAccountOperation) = "reset_account",
        38 => SetResetAccount(SetResetAccountOperation) = "set_reset_account",
        39 => ClaimRewardBalance(ClaimRewardBalanceOperation) = "claim_reward_balance",
        40 => DelegateVestingShares(DelegateVestingSharesOperation) = "delegate_vesting_shares",
        41 => AccountCreateWithDelegation(AccountCreateWithDelegationOperation) = "account_create_with_delegation",
        42 => WitnessSetProperties(WitnessSetPropertiesOperation) = "witness_set_properties",
    }
    virtual_ops {
        43 => FillConvertRequest(FillConvertRequestOperation) = "fill_convert_request",
        44 => AuthorReward(AuthorRewardOperation) = "author_reward",
        45 => CurationReward(CurationRewardOperation) = "curation_reward",
        46 => CommentReward(CommentRewardOperation) = "comment_reward",
        47 => LiquidityReward(LiquidityRewardOperation) = "liquidity_reward",
        48 => Interest(InterestOperation) = "interest",
        49 => FillVestingWithdraw(FillVestingWithdrawOperation) = "fill_vesting_withdraw",
        50 => FillOrder(FillOrderOperation) = "fill_order",
        51 => ShutdownWitness(ShutdownWitnessOperation) = "shutdown_witness",
        52 => FillTransferFromSavings(FillTransferFromSavingsOperation) = "fill_transfer_from_savings",
        53 => Hardfork(HardforkOperation) = "hardfork",
        54 => CommentPayoutUpdate(CommentPayoutUpdateOperation) = "comment_payout_update",
        55 => ReturnVestingDelegation(ReturnVestingDelegationOperation) = "return_vesting_delegation",
        56 => CommentBenefactorReward(CommentBenefactorRewardOperation) = "comment_benefactor_reward",
        57 => ProducerReward(ProducerRewardOperation) = "producer_reward",
    }
}

impl Operation {
    /// Broadcast encoding. Virtual operations encode to nothing.
    pub fn to_bytes(&self) -> Result<Vec<u8>, WriteError> {
        if self.is_virtual() {
            return Ok(Vec::new());
        }
        self.pack()
    }

    /// Like [`Read::read`], but an unrecognized tag swallows the rest of
    /// `bytes` into [`UnknownOperation::Binary`] instead of failing.
    pub fn read_lenient(bytes: &[u8], pos: &mut usize) -> Result<Operation, ReadError> {
        let tag = VarUint32::read(bytes, pos)?.0 as u64;
        if let Some(op) = Operation::read_payload(tag, bytes, pos)? {
            return Ok(op);
        }
        let data = bytes[*pos..].to_vec();
        warn!("keeping unknown operation type {} as {} opaque bytes", tag, data.len());
        *pos = bytes.len();
        Ok(Operation::Unknown(UnknownOperation::Binary {
            tag,
            data: data.into(),
        }))
    }
}

/// Decode a length-prefixed operation list from historical data.
///
/// An unknown tag ends the scan since its payload length cannot be known.
pub fn decode_operations_lenient(bytes: &[u8]) -> Result<Vec<Operation>, ReadError> {
    let mut pos = 0;
    let count = VarUint32::read(bytes, &mut pos)?.0 as usize;
    let mut operations = Vec::with_capacity(count.min(bytes.len()));
    for index in 0..count {
        let op = Operation::read_lenient(bytes, &mut pos)?;
        let opaque = matches!(op, Operation::Unknown(_));
        operations.push(op);
        if opaque {
            if index + 1 < count {
                warn!("skipping {} operations after an unknown one", count - index - 1);
            }
            return Ok(operations);
        }
    }
    if pos != bytes.len() {
        return Err(ReadError::ParseError(format!(
            "{} trailing bytes after operation list",
            bytes.len() - pos
        )));
    }
    Ok(operations)
}

impl NumBytes for Operation {
    fn num_bytes(&self) -> usize {
        match self.tag() {
            Some(tag) if !self.is_virtual() && !matches!(self, Operation::Unknown(_)) => {
                VarUint32(tag as u32).num_bytes() + self.payload_num_bytes()
            }
            _ => 0,
        }
    }
}

impl Read for Operation {
    fn read(bytes: &[u8], pos: &mut usize) -> Result<Self, ReadError> {
        let tag = VarUint32::read(bytes, pos)?.0 as u64;
        Operation::read_payload(tag, bytes, pos)?.ok_or(ReadError::UnknownOperationType(tag))
    }
}

impl Write for Operation {
    fn write(&self, bytes: &mut [u8], pos: &mut usize) -> Result<(), WriteError> {
        match self.tag() {
            Some(tag) if !self.is_virtual() && !matches!(self, Operation::Unknown(_)) => {
                VarUint32(tag as u32).write(bytes, pos)?;
                self.write_payload(bytes, pos)
            }
            _ => self.write_payload(bytes, pos),
        }
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.payload_to_json(serializer)
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (name, value) = deserialize_static_variant::<D, String>(deserializer)?;
        Operation::payload_from_json(name, value)
    }
}

#[cfg(test)]
mod tests {
    use steem_serialization::unpack;

    use super::*;
    use crate::{
        asset::VESTS_SYMBOL,
        authority::AuthorityRole,
        name::AccountName,
    };

    fn name(s: &str) -> AccountName {
        AccountName::new(s).unwrap()
    }

    const PRODUCER_REWARD: &str = "390764657a3133333700ca9a3b000000000656455354530000";

    #[test]
    fn test_prove_authority_wire() {
        let op: Operation = ProveAuthorityOperation {
            challenged: name("dez1337"),
            require_owner: true,
        }
        .into();
        let bytes = op.to_bytes().unwrap();
        assert_eq!(hex::encode(&bytes), "170764657a3133333701");
        assert_eq!(op.tag(), Some(23));
        assert_eq!(op.name(), "prove_authority");
        assert_eq!(unpack::<Operation>(&bytes).unwrap(), op);

        let active: Operation = ProveAuthorityOperation {
            challenged: name("dez1337"),
            require_owner: false,
        }
        .into();
        assert_eq!(hex::encode(active.to_bytes().unwrap()), "170764657a3133333700");
        assert_eq!(
            active.required_authorities().iter().collect::<Vec<_>>(),
            vec![(&name("dez1337"), AuthorityRole::Active)]
        );
    }

    #[test]
    fn test_producer_reward_is_decode_only() {
        let bytes = hex::decode(PRODUCER_REWARD).unwrap();
        let op = unpack::<Operation>(&bytes).unwrap();
        let Operation::ProducerReward(reward) = &op else {
            panic!("expected producer_reward, got {op:?}");
        };
        assert_eq!(reward.producer(), "dez1337");
        assert_eq!(reward.vesting_shares().symbol, VESTS_SYMBOL);
        assert_eq!(reward.vesting_shares().amount, 1_000_000_000);

        assert!(op.is_virtual());
        assert!(op.required_authorities().is_empty());
        assert_eq!(op.to_bytes().unwrap(), Vec::<u8>::new());
        assert_eq!(op.num_bytes(), 0);
        assert_eq!(
            op.pack(),
            Err(WriteError::VirtualOperation("producer_reward".into()))
        );
        assert!(matches!(
            op.validate(&ChainConfig::mainnet()),
            Err(SteemError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_unknown_tag() {
        let bytes = [0x63, 0xaa, 0xbb];
        assert_eq!(
            unpack::<Operation>(&bytes),
            Err(ReadError::UnknownOperationType(99))
        );

        let mut pos = 0;
        let op = Operation::read_lenient(&bytes, &mut pos).unwrap();
        assert_eq!(pos, 3);
        assert_eq!(
            op,
            Operation::Unknown(UnknownOperation::Binary {
                tag: 99,
                data: vec![0xaa, 0xbb].into(),
            })
        );
        assert_eq!(op.tag(), Some(99));
        assert!(!op.is_virtual());
        assert_eq!(op.to_bytes(), Err(WriteError::UnknownOperationType("99".into())));
    }

    #[test]
    fn test_decode_operations_lenient() {
        let bytes = hex::decode(format!("03{}{}63aabb", "170764657a3133333701", PRODUCER_REWARD)).unwrap();
        let ops = decode_operations_lenient(&bytes).unwrap();
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[0].name(), "prove_authority");
        assert_eq!(ops[1].name(), "producer_reward");
        assert_eq!(ops[2].tag(), Some(99));

        let trailing = hex::decode("01170764657a3133333701ff").unwrap();
        assert!(decode_operations_lenient(&trailing).is_err());
        assert!(decode_operations_lenient(&[0x02, 0x17]).is_err());
    }

    #[test]
    fn test_json_forms() {
        let json = r#"["transfer",{"from":"dez1337","to":"steemj","amount":"1.000 STEEM","memo":"hi"}]"#;
        let op: Operation = serde_json::from_str(json).unwrap();
        assert_eq!(op.name(), "transfer");
        assert_eq!(serde_json::to_string(&op).unwrap(), json);

        let suffixed = json.replacen("\"transfer\"", "\"transfer_operation\"", 1);
        assert_eq!(serde_json::from_str::<Operation>(&suffixed).unwrap(), op);

        let reward: Operation = serde_json::from_str(
            r#"["producer_reward",{"producer":"dez1337","vesting_shares":"1000.000000 VESTS"}]"#,
        )
        .unwrap();
        assert_eq!(reward, unpack::<Operation>(&hex::decode(PRODUCER_REWARD).unwrap()).unwrap());

        let future = r#"["smt_create",{"control_account":"dez1337"}]"#;
        let op: Operation = serde_json::from_str(future).unwrap();
        assert!(matches!(&op, Operation::Unknown(UnknownOperation::Json { name, .. }) if name == "smt_create"));
        assert_eq!(op.tag(), None);
        assert_eq!(op.name(), "smt_create");
        assert_eq!(serde_json::to_string(&op).unwrap(), future);
        assert_eq!(op.pack(), Err(WriteError::UnknownOperationType("smt_create".into())));

        assert!(serde_json::from_str::<Operation>(r#"["transfer",{"from":"dez1337"}]"#).is_err());
    }
}
