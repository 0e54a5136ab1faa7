use serde::{Deserialize, Serialize};
use steem_crypto::{Bytes, Digest, FixedBytes};
use steem_error::SteemError;
use steem_proc_macros::{NumBytes, Read, Write};
use steem_serialization::{Write as _, unpack};
use steem_time::TimePointSec;

use super::{
    BroadcastOperation, Extensions,
    validation::{check_non_negative, check_percent, require_account},
};
use crate::{
    asset::Asset,
    authority::{Authority, AuthorityRole, RequiredAuthorities},
    config::{ChainConfig, MAX_URL_LENGTH, MIN_ACCOUNT_CREATION_FEE, MIN_BLOCK_SIZE_LIMIT},
    crypto::{PublicKey, Signature},
    name::AccountName,
    utils::{VoidPayload, static_variant, steem_assert, u64_flex},
};

pub type BlockId = FixedBytes<20>;
pub type Checksum = FixedBytes<20>;

/// Chain parameters a witness votes on.
#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct ChainProperties {
    pub account_creation_fee: Asset,
    pub maximum_block_size: u32,
    pub sbd_interest_rate: u16,
}

impl ChainProperties {
    pub fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
        config.check_symbol(&self.account_creation_fee, &[config.steem_symbol], "account_creation_fee")?;
        steem_assert(
            self.account_creation_fee.amount >= MIN_ACCOUNT_CREATION_FEE,
            SteemError::InvalidOperation("account creation fee is below the minimum".into()),
        )?;
        steem_assert(
            self.maximum_block_size >= MIN_BLOCK_SIZE_LIMIT,
            SteemError::InvalidOperation(format!(
                "maximum block size must be at least {MIN_BLOCK_SIZE_LIMIT}"
            )),
        )?;
        check_percent(self.sbd_interest_rate, "sbd_interest_rate")
    }
}

fn check_url(url: &str) -> Result<(), SteemError> {
    steem_assert(
        !url.is_empty() && url.len() <= MAX_URL_LENGTH,
        SteemError::InvalidOperation("witness url must be between 1 and 2048 bytes".into()),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct WitnessUpdateOperation {
    pub owner: AccountName,
    pub url: String,
    pub block_signing_key: PublicKey,
    pub props: ChainProperties,
    pub fee: Asset,
}

impl BroadcastOperation for WitnessUpdateOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.owner, AuthorityRole::Active);
    }

    fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.owner, "owner")?;
        check_url(&self.url)?;
        config.check_symbol(&self.fee, &[config.steem_symbol], "fee")?;
        check_non_negative(&self.fee, "fee")?;
        self.props.validate(config)
    }
}

/// Witness parameters as packed values keyed by name. Must be signed by the
/// block signing key stored under `"key"`.
#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct WitnessSetPropertiesOperation {
    pub owner: AccountName,
    pub props: Vec<(String, Bytes)>,
    pub extensions: Extensions,
}

impl WitnessSetPropertiesOperation {
    pub fn prop(&self, name: &str) -> Option<&Bytes> {
        self.props.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn signing_key(&self) -> Result<PublicKey, SteemError> {
        let raw = self
            .prop("key")
            .ok_or_else(|| SteemError::InvalidOperation("witness properties need a signing key".into()))?;
        Ok(unpack::<PublicKey>(raw.as_slice())?)
    }
}

impl BroadcastOperation for WitnessSetPropertiesOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        match self.signing_key() {
            Ok(key) => required.add_other(Authority::from_key(key)),
            // The null account can never sign.
            Err(_) => required.add_other(Authority::from_account(AccountName::null())),
        }
    }

    fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.owner, "owner")?;
        self.signing_key()?;
        if let Some(raw) = self.prop("account_creation_fee") {
            let fee = unpack::<Asset>(raw.as_slice())?;
            config.check_symbol(&fee, &[config.steem_symbol], "account_creation_fee")?;
            steem_assert(
                fee.amount >= MIN_ACCOUNT_CREATION_FEE,
                SteemError::InvalidOperation("account creation fee is below the minimum".into()),
            )?;
        }
        if let Some(raw) = self.prop("maximum_block_size") {
            steem_assert(
                unpack::<u32>(raw.as_slice())? >= MIN_BLOCK_SIZE_LIMIT,
                SteemError::InvalidOperation(format!(
                    "maximum block size must be at least {MIN_BLOCK_SIZE_LIMIT}"
                )),
            )?;
        }
        if let Some(raw) = self.prop("sbd_interest_rate") {
            check_percent(unpack::<u16>(raw.as_slice())?, "sbd_interest_rate")?;
        }
        if let Some(raw) = self.prop("url") {
            check_url(&unpack::<String>(raw.as_slice())?)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct HardforkVersionVote {
    pub hf_version: u32,
    pub hf_time: TimePointSec,
}

static_variant! {
    pub enum BlockHeaderExtension {
        0 => Void(VoidPayload),
        1 => Version(u32),
        2 => HardforkVersionVote(HardforkVersionVote),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct SignedBlockHeader {
    pub previous: BlockId,
    pub timestamp: TimePointSec,
    pub witness: AccountName,
    pub transaction_merkle_root: Checksum,
    pub extensions: Vec<BlockHeaderExtension>,
    pub witness_signature: Signature,
}

/// Evidence of a witness signing two different blocks for one slot.
#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct ReportOverProductionOperation {
    pub reporter: AccountName,
    pub first_block: SignedBlockHeader,
    pub second_block: SignedBlockHeader,
}

impl BroadcastOperation for ReportOverProductionOperation {
    fn get_required_authorities(&self, _required: &mut RequiredAuthorities) {}

    fn validate(&self, _config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.reporter, "reporter")?;
        steem_assert(
            self.first_block.witness == self.second_block.witness,
            SteemError::InvalidOperation("blocks were produced by different witnesses".into()),
        )?;
        steem_assert(
            self.first_block.timestamp == self.second_block.timestamp,
            SteemError::InvalidOperation("blocks are for different slots".into()),
        )?;
        steem_assert(
            self.first_block.pack()? != self.second_block.pack()?,
            SteemError::InvalidOperation("blocks are identical".into()),
        )
    }
}

/// Proof of work over `input` by `worker`.
#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct Pow {
    pub worker: PublicKey,
    pub input: Digest,
    pub signature: Signature,
    pub work: Digest,
}

impl Pow {
    /// The signature over `input` must come from `worker`, and `work` must be
    /// `sha256(input ‖ key recovered from the signature over its own hash)`.
    pub fn validate(&self) -> Result<(), SteemError> {
        steem_assert(
            self.work != Digest::default(),
            SteemError::InvalidOperation("pow work is empty".into()),
        )?;
        steem_assert(
            self.signature.recover(&self.input)? == self.worker,
            SteemError::InvalidOperation("pow signature is not from the worker".into()),
        )?;
        let signature_hash = Digest::hash(self.signature.as_bytes());
        let recovered = self.signature.recover(&signature_hash)?;
        let expected = Digest::hash_parts(&[self.input.as_bytes(), &recovered.to_bytes()]);
        steem_assert(
            expected == self.work,
            SteemError::InvalidOperation("pow work does not match its input".into()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct PowOperation {
    pub worker_account: AccountName,
    pub block_id: BlockId,
    #[serde(with = "u64_flex")]
    pub nonce: u64,
    pub work: Pow,
    pub props: ChainProperties,
}

impl BroadcastOperation for PowOperation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        required.add(&self.worker_account, AuthorityRole::Active);
    }

    fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.worker_account, "worker_account")?;
        self.props.validate(config)?;
        self.work.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct Pow2Input {
    pub worker_account: AccountName,
    pub prev_block: BlockId,
    #[serde(with = "u64_flex")]
    pub nonce: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct Pow2 {
    pub input: Pow2Input,
    pub pow_summary: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct EquihashProof {
    pub n: u32,
    pub k: u32,
    pub seed: Digest,
    pub inputs: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct EquihashPow {
    pub input: Pow2Input,
    pub proof: EquihashProof,
    pub prev_block: BlockId,
    pub pow_summary: u32,
}

static_variant! {
    pub enum Pow2Work {
        0 => Pow2(Pow2),
        1 => EquihashPow(EquihashPow),
    }
}

impl Pow2Work {
    pub fn input(&self) -> &Pow2Input {
        match self {
            Pow2Work::Pow2(work) => &work.input,
            Pow2Work::EquihashPow(work) => &work.input,
        }
    }
}

/// Mining an account into existence. With `new_owner_key` set the worker
/// account is created, so no existing authority signs.
#[derive(Debug, Clone, PartialEq, Eq, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct Pow2Operation {
    pub work: Pow2Work,
    pub new_owner_key: Option<PublicKey>,
    pub props: ChainProperties,
}

impl BroadcastOperation for Pow2Operation {
    fn get_required_authorities(&self, required: &mut RequiredAuthorities) {
        if self.new_owner_key.is_none() {
            required.add(&self.work.input().worker_account, AuthorityRole::Active);
        }
    }

    fn validate(&self, config: &ChainConfig) -> Result<(), SteemError> {
        require_account(&self.work.input().worker_account, "worker_account")?;
        self.props.validate(config)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use steem_serialization::{Read, Write};

    use super::*;
    use crate::crypto::PrivateKey;

    fn name(s: &str) -> AccountName {
        AccountName::new(s).unwrap()
    }

    fn props(config: &ChainConfig) -> ChainProperties {
        ChainProperties {
            account_creation_fee: config.steem(100_000),
            maximum_block_size: 131072,
            sbd_interest_rate: 1000,
        }
    }

    #[test]
    fn test_witness_update() {
        let config = ChainConfig::mainnet();
        let key = PrivateKey::from_seed("dez1337_witness").unwrap().public_key().unwrap();
        let op = WitnessUpdateOperation {
            owner: name("dez1337"),
            url: "https://steemit.com".into(),
            block_signing_key: key,
            props: props(&config),
            fee: config.steem(0),
        };
        assert!(op.validate(&config).is_ok());
        assert_eq!(unpack::<WitnessUpdateOperation>(&op.pack().unwrap()).unwrap(), op);

        let small_blocks = WitnessUpdateOperation {
            props: ChainProperties { maximum_block_size: 1024, ..props(&config) },
            ..op.clone()
        };
        assert!(small_blocks.validate(&config).is_err());
        let no_url = WitnessUpdateOperation { url: String::new(), ..op };
        assert!(no_url.validate(&config).is_err());
    }

    #[test]
    fn test_witness_set_properties_requires_signing_key() {
        let config = ChainConfig::mainnet();
        let key = PrivateKey::from_seed("dez1337_witness").unwrap().public_key().unwrap();
        let op = WitnessSetPropertiesOperation {
            owner: name("dez1337"),
            props: vec![
                ("account_creation_fee".into(), Bytes::new(config.steem(3000).pack().unwrap())),
                ("key".into(), Bytes::new(key.pack().unwrap())),
            ],
            extensions: vec![],
        };
        assert!(op.validate(&config).is_ok());
        let mut required = RequiredAuthorities::new();
        op.get_required_authorities(&mut required);
        assert_eq!(required.other, vec![Authority::from_key(key)]);

        let keyless = WitnessSetPropertiesOperation { props: vec![], ..op };
        assert!(keyless.validate(&config).is_err());
        let mut required = RequiredAuthorities::new();
        keyless.get_required_authorities(&mut required);
        assert_eq!(required.other, vec![Authority::from_account(name("null"))]);
    }

    fn header(witness: &str, merkle: u8) -> SignedBlockHeader {
        SignedBlockHeader {
            previous: BlockId::default(),
            timestamp: TimePointSec::new(1459931369),
            witness: name(witness),
            transaction_merkle_root: FixedBytes([merkle; 20]),
            extensions: vec![BlockHeaderExtension::Version(0x0013_0000)],
            witness_signature: Signature::from_bytes([0x1f; 65]),
        }
    }

    #[test]
    fn test_report_over_production() {
        let config = ChainConfig::mainnet();
        let op = ReportOverProductionOperation {
            reporter: name("dez1337"),
            first_block: header("steemj", 1),
            second_block: header("steemj", 2),
        };
        assert!(op.validate(&config).is_ok());
        let mut required = RequiredAuthorities::new();
        op.get_required_authorities(&mut required);
        assert!(required.is_empty());

        let packed = op.pack().unwrap();
        let mut pos = 0;
        assert_eq!(ReportOverProductionOperation::read(&packed, &mut pos).unwrap(), op);

        let same = ReportOverProductionOperation {
            second_block: header("steemj", 1),
            ..op.clone()
        };
        assert!(same.validate(&config).is_err());
        let other_witness = ReportOverProductionOperation {
            second_block: header("dez1337", 2),
            ..op
        };
        assert!(other_witness.validate(&config).is_err());
    }

    #[test]
    fn test_block_header_extension_json() {
        let vote = BlockHeaderExtension::HardforkVersionVote(HardforkVersionVote {
            hf_version: 0x0013_0000,
            hf_time: TimePointSec::new(1459931369),
        });
        let json = serde_json::to_string(&vote).unwrap();
        assert_eq!(json, r#"[2,{"hf_version":1245184,"hf_time":"2016-04-06T08:29:29"}]"#);
        assert_eq!(serde_json::from_str::<BlockHeaderExtension>(&json).unwrap(), vote);
    }

    #[test]
    fn test_pow_work_check() {
        let config = ChainConfig::mainnet();
        let worker_key = PrivateKey::from_seed("miner_owner").unwrap();
        let input = Digest::hash(b"pow input");
        let signature = worker_key.sign_digest(&input).unwrap();
        let recovered = signature.recover(&Digest::hash(signature.as_bytes())).unwrap();
        let work = Digest::hash_parts(&[input.as_bytes(), &recovered.to_bytes()]);

        let mut op = PowOperation {
            worker_account: name("miner"),
            block_id: BlockId::from_str("0000000109833ce528d5bbfb3f6225b39ee10086").unwrap(),
            nonce: 42,
            work: Pow {
                worker: worker_key.public_key().unwrap(),
                input,
                signature,
                work,
            },
            props: props(&config),
        };
        assert!(op.validate(&config).is_ok());
        assert_eq!(serde_json::to_value(&op).unwrap()["nonce"], 42);

        op.work.work = Digest::hash(b"forged");
        assert!(matches!(op.validate(&config), Err(SteemError::InvalidOperation(_))));
    }

    #[test]
    fn test_pow2_authorities() {
        let config = ChainConfig::mainnet();
        let mut op = Pow2Operation {
            work: Pow2Work::Pow2(Pow2 {
                input: Pow2Input {
                    worker_account: name("miner"),
                    prev_block: BlockId::default(),
                    nonce: u64::MAX,
                },
                pow_summary: 7,
            }),
            new_owner_key: None,
            props: props(&config),
        };
        let mut required = RequiredAuthorities::new();
        op.get_required_authorities(&mut required);
        assert_eq!(required.active, vec![name("miner")]);

        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["work"][0], 0);
        assert_eq!(json["work"][1]["input"]["nonce"], u64::MAX);
        assert_eq!(serde_json::from_value::<Pow2Operation>(json).unwrap(), op);

        op.new_owner_key = Some(PrivateKey::from_seed("miner_owner").unwrap().public_key().unwrap());
        let mut required = RequiredAuthorities::new();
        op.get_required_authorities(&mut required);
        assert!(required.is_empty());
        assert_eq!(unpack::<Pow2Operation>(&op.pack().unwrap()).unwrap(), op);
    }
}
