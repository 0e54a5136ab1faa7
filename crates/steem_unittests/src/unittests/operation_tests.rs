#[cfg(test)]
mod operation_tests {
    use anyhow::Result;
    use steem_core::{
        asset::Price,
        authority::Authority,
        crypto::{PrivateKey, Signature},
        operations::*,
    };
    use steem_crypto::{Bytes, Digest, FixedBytes};
    use steem_serialization::{Write, unpack};
    use steem_time::TimePointSec;

    use crate::tests::{EXPIRATION, Testing, get_private_key, get_public_key, name};

    /// One broadcast operation and the signers it must ask for. `other` lists
    /// `(account, role)` seeds of single-key authorities.
    struct Case {
        op: Operation,
        owner: &'static [&'static str],
        active: &'static [&'static str],
        posting: &'static [&'static str],
        other: &'static [(&'static str, &'static str)],
    }

    fn case(op: impl Into<Operation>) -> Case {
        Case {
            op: op.into(),
            owner: &[],
            active: &[],
            posting: &[],
            other: &[],
        }
    }

    impl Case {
        fn owner(self, owner: &'static [&'static str]) -> Self {
            Case { owner, ..self }
        }

        fn active(self, active: &'static [&'static str]) -> Self {
            Case { active, ..self }
        }

        fn posting(self, posting: &'static [&'static str]) -> Self {
            Case { posting, ..self }
        }

        fn other(self, other: &'static [(&'static str, &'static str)]) -> Self {
            Case { other, ..self }
        }

        fn signing_keys(&self) -> Vec<PrivateKey> {
            let mut keys = Vec::new();
            keys.extend(self.owner.iter().map(|account| get_private_key(account, "owner")));
            keys.extend(self.active.iter().map(|account| get_private_key(account, "active")));
            keys.extend(self.posting.iter().map(|account| get_private_key(account, "posting")));
            keys.extend(self.other.iter().map(|(account, role)| get_private_key(account, role)));
            keys
        }
    }

    fn key_authority(account: &str, role: &str) -> Authority {
        Authority::from_key(get_public_key(account, role))
    }

    fn chain_props(chain: &Testing) -> ChainProperties {
        ChainProperties {
            account_creation_fee: chain.config.steem(100_000),
            maximum_block_size: 131072,
            sbd_interest_rate: 1000,
        }
    }

    fn block_header(merkle: u8) -> SignedBlockHeader {
        SignedBlockHeader {
            previous: BlockId::default(),
            timestamp: TimePointSec::new(EXPIRATION),
            witness: name("carol"),
            transaction_merkle_root: FixedBytes([merkle; 20]),
            extensions: vec![BlockHeaderExtension::Version(0x0013_0000)],
            witness_signature: Signature::from_bytes([0x1f; 65]),
        }
    }

    fn pow(chain: &Testing) -> Result<PowOperation> {
        let worker_key = get_private_key("alice", "pow");
        let input = Digest::hash(b"pow input");
        let signature = worker_key.sign_digest(&input)?;
        let recovered = signature.recover(&Digest::hash(signature.as_bytes()))?;
        let work = Digest::hash_parts(&[input.as_bytes(), &recovered.to_bytes()]);
        Ok(PowOperation {
            worker_account: name("alice"),
            block_id: BlockId::default(),
            nonce: 42,
            work: Pow {
                worker: worker_key.public_key()?,
                input,
                signature,
                work,
            },
            props: chain_props(chain),
        })
    }

    /// Every broadcast operation, in tag order.
    fn broadcast_cases(chain: &Testing) -> Result<Vec<Case>> {
        let steem = |amount| chain.config.steem(amount);
        let sbd = |amount| chain.config.sbd(amount);
        let vests = |amount| chain.config.vests(amount);
        let expiration = TimePointSec::new(EXPIRATION);

        Ok(vec![
            case(chain.vote("alice", "bob")).posting(&["alice"]),
            case(CommentOperation {
                parent_author: name("bob"),
                parent_permlink: "test".into(),
                author: name("alice"),
                permlink: "re-test".into(),
                title: String::new(),
                body: "hello".into(),
                json_metadata: String::new(),
            })
            .posting(&["alice"]),
            case(chain.transfer("alice", "bob", 1000)).active(&["alice"]),
            case(TransferToVestingOperation {
                from: name("alice"),
                to: name("bob"),
                amount: steem(1000),
            })
            .active(&["alice"]),
            case(WithdrawVestingOperation {
                account: name("alice"),
                vesting_shares: vests(1_000_000),
            })
            .active(&["alice"]),
            case(LimitOrderCreateOperation {
                owner: name("alice"),
                orderid: 1,
                amount_to_sell: steem(1000),
                min_to_receive: sbd(500),
                fill_or_kill: false,
                expiration,
            })
            .active(&["alice"]),
            case(LimitOrderCancelOperation {
                owner: name("alice"),
                orderid: 1,
            })
            .active(&["alice"]),
            case(FeedPublishOperation {
                publisher: name("alice"),
                exchange_rate: Price::new(sbd(1000), steem(1000)),
            })
            .active(&["alice"]),
            case(ConvertOperation {
                owner: name("alice"),
                requestid: 7,
                amount: sbd(1000),
            })
            .active(&["alice"]),
            case(AccountCreateOperation {
                fee: steem(3000),
                creator: name("alice"),
                new_account_name: name("dave"),
                owner: key_authority("dave", "owner"),
                active: key_authority("dave", "active"),
                posting: key_authority("dave", "posting"),
                memo_key: get_public_key("dave", "memo"),
                json_metadata: String::new(),
            })
            .active(&["alice"]),
            case(AccountUpdateOperation {
                account: name("alice"),
                owner: Some(key_authority("alice", "owner2")),
                active: None,
                posting: None,
                memo_key: get_public_key("alice", "memo"),
                json_metadata: "{}".into(),
            })
            .owner(&["alice"]),
            case(WitnessUpdateOperation {
                owner: name("alice"),
                url: "https://steemit.com".into(),
                block_signing_key: get_public_key("alice", "witness"),
                props: chain_props(chain),
                fee: steem(0),
            })
            .active(&["alice"]),
            case(AccountWitnessVoteOperation {
                account: name("alice"),
                witness: name("carol"),
                approve: true,
            })
            .active(&["alice"]),
            case(AccountWitnessProxyOperation {
                account: name("alice"),
                proxy: name("bob"),
            })
            .active(&["alice"]),
            case(pow(chain)?).active(&["alice"]),
            case(CustomOperation {
                required_auths: vec![name("alice")],
                id: 777,
                data: Bytes::new(vec![1, 2, 3]),
            })
            .active(&["alice"]),
            case(ReportOverProductionOperation {
                reporter: name("alice"),
                first_block: block_header(1),
                second_block: block_header(2),
            }),
            case(DeleteCommentOperation {
                author: name("alice"),
                permlink: "test".into(),
            })
            .posting(&["alice"]),
            case(CustomJsonOperation {
                required_auths: vec![],
                required_posting_auths: vec![name("alice")],
                id: "follow".into(),
                json: r#"["follow",{"follower":"alice","following":"bob","what":["blog"]}]"#.into(),
            })
            .posting(&["alice"]),
            case(CommentOptionsOperation {
                author: name("alice"),
                permlink: "test".into(),
                max_accepted_payout: sbd(1_000_000_000),
                percent_steem_dollars: 10000,
                allow_votes: true,
                allow_curation_rewards: true,
                extensions: vec![CommentOptionsExtension::Beneficiaries(CommentPayoutBeneficiaries {
                    beneficiaries: vec![BeneficiaryRoute {
                        account: name("bob"),
                        weight: 500,
                    }],
                })],
            })
            .posting(&["alice"]),
            case(SetWithdrawVestingRouteOperation {
                from_account: name("alice"),
                to_account: name("bob"),
                percent: 5000,
                auto_vest: true,
            })
            .active(&["alice"]),
            case(LimitOrderCreate2Operation {
                owner: name("alice"),
                orderid: 2,
                amount_to_sell: steem(1000),
                exchange_rate: Price::new(steem(1000), sbd(500)),
                fill_or_kill: true,
                expiration,
            })
            .active(&["alice"]),
            case(ChallengeAuthorityOperation {
                challenger: name("alice"),
                challenged: name("bob"),
                require_owner: false,
            })
            .active(&["alice"]),
            case(ProveAuthorityOperation {
                challenged: name("alice"),
                require_owner: true,
            })
            .owner(&["alice"]),
            case(RequestAccountRecoveryOperation {
                recovery_account: name("bob"),
                account_to_recover: name("alice"),
                new_owner_authority: key_authority("alice", "owner2"),
                extensions: vec![],
            })
            .active(&["bob"]),
            case(RecoverAccountOperation {
                account_to_recover: name("alice"),
                new_owner_authority: key_authority("alice", "owner2"),
                recent_owner_authority: key_authority("alice", "owner"),
                extensions: vec![],
            })
            .other(&[("alice", "owner2"), ("alice", "owner")]),
            case(ChangeRecoveryAccountOperation {
                account_to_recover: name("alice"),
                new_recovery_account: name("bob"),
                extensions: vec![],
            })
            .owner(&["alice"]),
            case(EscrowTransferOperation {
                from: name("alice"),
                to: name("bob"),
                agent: name("carol"),
                escrow_id: 1,
                sbd_amount: sbd(1000),
                steem_amount: steem(0),
                fee: sbd(10),
                ratification_deadline: expiration,
                escrow_expiration: TimePointSec::new(EXPIRATION + 3600),
                json_meta: String::new(),
            })
            .active(&["alice"]),
            case(EscrowDisputeOperation {
                from: name("alice"),
                to: name("bob"),
                agent: name("carol"),
                who: name("bob"),
                escrow_id: 1,
            })
            .active(&["bob"]),
            case(EscrowReleaseOperation {
                from: name("alice"),
                to: name("bob"),
                agent: name("carol"),
                who: name("carol"),
                receiver: name("bob"),
                escrow_id: 1,
                sbd_amount: sbd(1000),
                steem_amount: steem(0),
            })
            .active(&["carol"]),
            case(Pow2Operation {
                work: Pow2Work::Pow2(Pow2 {
                    input: Pow2Input {
                        worker_account: name("alice"),
                        prev_block: BlockId::default(),
                        nonce: 99,
                    },
                    pow_summary: 7,
                }),
                new_owner_key: None,
                props: chain_props(chain),
            })
            .active(&["alice"]),
            case(EscrowApproveOperation {
                from: name("alice"),
                to: name("bob"),
                agent: name("carol"),
                who: name("carol"),
                escrow_id: 1,
                approve: true,
            })
            .active(&["carol"]),
            case(TransferToSavingsOperation {
                from: name("alice"),
                to: name("alice"),
                amount: sbd(1000),
                memo: "rainy day".into(),
            })
            .active(&["alice"]),
            case(TransferFromSavingsOperation {
                from: name("alice"),
                request_id: 3,
                to: name("bob"),
                amount: steem(1000),
                memo: String::new(),
            })
            .active(&["alice"]),
            case(CancelTransferFromSavingsOperation {
                from: name("alice"),
                request_id: 3,
            })
            .active(&["alice"]),
            case(CustomBinaryOperation {
                required_owner_auths: vec![],
                required_active_auths: vec![name("alice")],
                required_posting_auths: vec![],
                required_auths: vec![key_authority("carol", "app")],
                id: "follow".into(),
                data: Bytes::new(vec![0xde, 0xad]),
            })
            .active(&["alice"])
            .other(&[("carol", "app")]),
            case(DeclineVotingRightsOperation {
                account: name("alice"),
                decline: true,
            })
            .owner(&["alice"]),
            case(ResetAccountOperation {
                reset_account: name("bob"),
                account_to_reset: name("alice"),
                new_owner_authority: key_authority("alice", "owner2"),
            })
            .active(&["bob"]),
            case(SetResetAccountOperation {
                account: name("alice"),
                current_reset_account: name("bob"),
                reset_account: name("carol"),
            })
            .owner(&["alice"]),
            case(ClaimRewardBalanceOperation {
                account: name("alice"),
                reward_steem: steem(0),
                reward_sbd: sbd(0),
                reward_vests: vests(1000),
            })
            .posting(&["alice"]),
            case(DelegateVestingSharesOperation {
                delegator: name("alice"),
                delegatee: name("bob"),
                vesting_shares: vests(1_000_000),
            })
            .active(&["alice"]),
            case(AccountCreateWithDelegationOperation {
                fee: steem(3000),
                delegation: vests(1_000_000),
                creator: name("alice"),
                new_account_name: name("dave"),
                owner: key_authority("dave", "owner"),
                active: key_authority("dave", "active"),
                posting: key_authority("dave", "posting"),
                memo_key: get_public_key("dave", "memo"),
                json_metadata: String::new(),
                extensions: vec![],
            })
            .active(&["alice"]),
            case(WitnessSetPropertiesOperation {
                owner: name("alice"),
                props: vec![
                    ("account_creation_fee".into(), Bytes::new(steem(3000).pack()?)),
                    ("key".into(), Bytes::new(get_public_key("alice", "witness").pack()?)),
                ],
                extensions: vec![],
            })
            .other(&[("alice", "witness")]),
        ])
    }

    #[test]
    fn test_every_broadcast_operation_round_trips() -> Result<()> {
        let chain = Testing::new();
        let cases = broadcast_cases(&chain)?;
        assert_eq!(cases.len(), 43);

        for (tag, case) in cases.iter().enumerate() {
            let op = &case.op;
            assert_eq!(op.tag(), Some(tag as u64), "{}", op.name());
            assert!(!op.is_virtual(), "{}", op.name());

            let bytes = op.to_bytes()?;
            assert_eq!(bytes[0] as usize, tag, "{}", op.name());
            assert_eq!(&unpack::<Operation>(&bytes)?, op, "{}", op.name());

            let json = serde_json::to_value(op)?;
            assert_eq!(json[0], op.name());
            assert_eq!(&serde_json::from_value::<Operation>(json)?, op, "{}", op.name());

            op.validate(&chain.config)?;
        }
        Ok(())
    }

    #[test]
    fn test_every_broadcast_operation_required_authorities() -> Result<()> {
        let chain = Testing::new();
        for case in broadcast_cases(&chain)? {
            let required = case.op.required_authorities();
            let names = |accounts: &[&str]| accounts.iter().map(|account| name(account)).collect::<Vec<_>>();
            let other: Vec<Authority> = case
                .other
                .iter()
                .map(|(account, role)| key_authority(account, role))
                .collect();

            assert_eq!(required.owner, names(case.owner), "{} owner", case.op.name());
            assert_eq!(required.active, names(case.active), "{} active", case.op.name());
            assert_eq!(required.posting, names(case.posting), "{} posting", case.op.name());
            assert_eq!(required.other, other, "{} other", case.op.name());
        }
        Ok(())
    }

    #[test]
    fn test_every_broadcast_operation_signs_and_verifies() -> Result<()> {
        let mut chain = Testing::new();
        chain.create_accounts(&["alice", "bob", "carol"]);
        for case in broadcast_cases(&chain)? {
            let name = case.op.name().to_string();
            let keys = case.signing_keys();
            let signed = chain
                .push_transaction(vec![case.op], &keys)
                .map_err(|err| anyhow::anyhow!("{name}: {err}"))?;
            assert_eq!(signed.signatures().len(), keys.len(), "{name}");
        }
        Ok(())
    }
}
