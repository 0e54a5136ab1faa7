use steem_error::SteemError;

use crate::{
    asset::Asset,
    config::{MAX_CUSTOM_ID_LENGTH, MAX_MEMO_SIZE, MAX_PERMLINK_LENGTH, STEEM_100_PERCENT},
    name::AccountName,
    utils::steem_assert,
};

pub(crate) fn require_account(account: &AccountName, field: &str) -> Result<(), SteemError> {
    steem_assert(
        !account.is_empty(),
        SteemError::InvalidAccountName(format!("{field} must name an account")),
    )
}

pub(crate) fn check_permlink(permlink: &str) -> Result<(), SteemError> {
    steem_assert(
        permlink.len() < MAX_PERMLINK_LENGTH,
        SteemError::InvalidOperation(format!("permlink is too long ({} bytes)", permlink.len())),
    )
}

pub(crate) fn check_memo(memo: &str) -> Result<(), SteemError> {
    steem_assert(
        memo.len() < MAX_MEMO_SIZE,
        SteemError::InvalidOperation("memo is too large".into()),
    )
}

/// Empty metadata is allowed; anything else has to parse as JSON.
pub(crate) fn check_json(json: &str, field: &str) -> Result<(), SteemError> {
    if json.is_empty() {
        return Ok(());
    }
    serde_json::from_str::<serde_json::Value>(json)
        .map(|_| ())
        .map_err(|e| SteemError::InvalidOperation(format!("{field} is not valid JSON: {e}")))
}

pub(crate) fn check_custom_id(id: &str) -> Result<(), SteemError> {
    steem_assert(
        id.len() <= MAX_CUSTOM_ID_LENGTH,
        SteemError::InvalidOperation(format!("custom id {id:?} is longer than {MAX_CUSTOM_ID_LENGTH}")),
    )
}

pub(crate) fn check_percent(value: u16, field: &str) -> Result<(), SteemError> {
    steem_assert(
        value <= STEEM_100_PERCENT,
        SteemError::InvalidOperation(format!("{field} must not exceed {STEEM_100_PERCENT}")),
    )
}

pub(crate) fn check_positive(asset: &Asset, field: &str) -> Result<(), SteemError> {
    steem_assert(
        asset.amount > 0,
        SteemError::InvalidOperation(format!("{field} must be positive, got {asset}")),
    )
}

pub(crate) fn check_non_negative(asset: &Asset, field: &str) -> Result<(), SteemError> {
    steem_assert(
        asset.amount >= 0,
        SteemError::InvalidOperation(format!("{field} must not be negative, got {asset}")),
    )
}
