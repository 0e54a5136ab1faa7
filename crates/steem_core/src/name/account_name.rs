use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use steem_error::SteemError;
use steem_serialization::{NumBytes, Read, ReadError, Write, WriteError};

use crate::config::NULL_ACCOUNT;

pub const MIN_ACCOUNT_NAME_LENGTH: usize = 3;
pub const MAX_ACCOUNT_NAME_LENGTH: usize = 16;

/// A chain account name.
///
/// Names are 3 to 16 bytes of dot-separated labels. Each label is at least
/// three characters, starts with a lowercase letter, ends with a lowercase
/// letter or digit and otherwise holds lowercase letters, digits and dashes.
/// The empty name is the "no account" sentinel (e.g. a cleared witness proxy).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AccountName(String);

impl AccountName {
    pub fn new(name: impl Into<String>) -> Result<Self, SteemError> {
        let name = name.into();
        if !name.is_empty() && !is_valid_account_name(&name) {
            return Err(SteemError::InvalidAccountName(name));
        }
        Ok(AccountName(name))
    }

    /// The "no account" sentinel.
    pub fn empty() -> Self {
        AccountName(String::new())
    }

    /// The account no key can ever sign for.
    pub fn null() -> Self {
        AccountName(NULL_ACCOUNT.to_string())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn is_valid_account_name(name: &str) -> bool {
    if name.len() < MIN_ACCOUNT_NAME_LENGTH || name.len() > MAX_ACCOUNT_NAME_LENGTH {
        return false;
    }
    name.split('.').all(is_valid_label)
}

fn is_valid_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    if bytes.len() < MIN_ACCOUNT_NAME_LENGTH {
        return false;
    }
    let last = bytes.len() - 1;
    bytes.iter().enumerate().all(|(i, &c)| match i {
        0 => c.is_ascii_lowercase(),
        i if i == last => c.is_ascii_lowercase() || c.is_ascii_digit(),
        _ => c.is_ascii_lowercase() || c.is_ascii_digit() || c == b'-',
    })
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountName {
    type Err = SteemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccountName::new(s)
    }
}

impl TryFrom<&str> for AccountName {
    type Error = SteemError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        AccountName::new(value)
    }
}

impl AsRef<str> for AccountName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for AccountName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AccountName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl NumBytes for AccountName {
    #[inline]
    fn num_bytes(&self) -> usize {
        self.0.num_bytes()
    }
}

impl Write for AccountName {
    #[inline]
    fn write(&self, bytes: &mut [u8], pos: &mut usize) -> Result<(), WriteError> {
        self.0.write(bytes, pos)
    }
}

impl Read for AccountName {
    #[inline]
    fn read(bytes: &[u8], pos: &mut usize) -> Result<Self, ReadError> {
        let name = String::read(bytes, pos)?;
        AccountName::new(name).map_err(|e| ReadError::ParseError(e.to_string()))
    }
}

impl Serialize for AccountName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AccountName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AccountName::new(s).map_err(serde::de::Error::custom)
    }
}
