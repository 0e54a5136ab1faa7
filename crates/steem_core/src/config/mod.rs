mod chain_config;
pub use chain_config::*;

mod chain_id;
pub use chain_id::*;

pub const STEEM_100_PERCENT: u16 = 10000;
pub const MAX_SIG_CHECK_DEPTH: u16 = 2;
pub const MAX_AUTHORITY_LOOKUPS: usize = 256;
pub const MAX_SIGNING_ATTEMPTS: u32 = 64;
pub const MAX_CUSTOM_ID_LENGTH: usize = 32;
pub const MAX_PERMLINK_LENGTH: usize = 256;
pub const MAX_MEMO_SIZE: usize = 2048;
pub const MAX_URL_LENGTH: usize = 2048;
pub const MIN_BLOCK_SIZE_LIMIT: u32 = 65536;
pub const MAX_COMMENT_BENEFICIARIES: usize = 8;
pub const MIN_ACCOUNT_CREATION_FEE: i64 = 1;
pub const NULL_ACCOUNT: &str = "null";

pub const MAINNET_ADDRESS_PREFIX: &str = "STM";
pub const TESTNET_ADDRESS_PREFIX: &str = "TST";
pub const TESTNET_CHAIN_ID: ChainId = ChainId::new([
    0x79, 0x27, 0x6a, 0xea, 0x5d, 0x48, 0x77, 0xd9, 0xa2, 0x58, 0x92, 0xea, 0xa0, 0x1b, 0x0a, 0xdf,
    0x01, 0x9d, 0x3e, 0x5c, 0xb1, 0x2a, 0x97, 0x47, 0x8d, 0xf3, 0x29, 0x8c, 0xcd, 0xd0, 0x16, 0x73,
]);
