use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use steem_proc_macros::{NumBytes, Write};
use steem_serialization::{Read, ReadError};

/// Maximum number of characters in a symbol code (one byte holds the precision).
pub const MAX_SYMBOL_LENGTH: usize = 7;
pub const MAX_PRECISION: u8 = 18;

pub const STEEM_SYMBOL: Symbol = Symbol(pack_symbol(3, b"STEEM"));
pub const SBD_SYMBOL: Symbol = Symbol(pack_symbol(3, b"SBD"));
pub const VESTS_SYMBOL: Symbol = Symbol(pack_symbol(6, b"VESTS"));
pub const TESTS_SYMBOL: Symbol = Symbol(pack_symbol(3, b"TESTS"));
pub const TBD_SYMBOL: Symbol = Symbol(pack_symbol(3, b"TBD"));

/// Only for known-good uppercase codes of at most seven bytes.
const fn pack_symbol(precision: u8, code: &[u8]) -> u64 {
    let mut result = precision as u64;
    let mut i = 0;
    while i < code.len() {
        result |= (code[i] as u64) << (8 * (i + 1));
        i += 1;
    }
    result
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    /// Found a non-uppercase ASCII letter.
    InvalidChar(char),
    /// More than 7 characters won't fit.
    TooLong(usize),
    Empty,
    PrecisionTooLarge(u8),
    /// Failed to parse `precision,CODE`.
    ParseError,
}

impl fmt::Display for SymbolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolError::InvalidChar(c) => write!(f, "invalid character in symbol: '{}'", c),
            SymbolError::TooLong(len) => write!(f, "symbol is too long: {} characters", len),
            SymbolError::Empty => write!(f, "symbol is empty"),
            SymbolError::PrecisionTooLarge(p) => write!(f, "precision {} is too large", p),
            SymbolError::ParseError => write!(f, "failed to parse symbol"),
        }
    }
}

impl std::error::Error for SymbolError {}

/// Precision in the low byte, then up to seven zero-padded ASCII characters.
///
/// Packed little-endian this is exactly the on-chain layout:
/// one precision byte followed by a 7-byte symbol buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Write, NumBytes)]
pub struct Symbol(u64);

impl Symbol {
    pub fn new(precision: u8, code: &str) -> Result<Self, SymbolError> {
        if precision > MAX_PRECISION {
            return Err(SymbolError::PrecisionTooLarge(precision));
        }
        string_to_symbol(precision, code).map(Symbol)
    }

    /// Build from a raw value, checking its layout.
    pub fn from_u64(value: u64) -> Result<Self, SymbolError> {
        let precision = symbol_to_precision(value);
        if precision > MAX_PRECISION {
            return Err(SymbolError::PrecisionTooLarge(precision));
        }
        let code = value >> 8;
        if code == 0 {
            return Err(SymbolError::Empty);
        }
        let mut seen_padding = false;
        for i in 0..MAX_SYMBOL_LENGTH {
            let c = ((code >> (8 * i)) & 0xFF) as u8;
            if c == 0 {
                seen_padding = true;
            } else if seen_padding || !c.is_ascii_uppercase() {
                return Err(SymbolError::InvalidChar(c as char));
            }
        }
        Ok(Symbol(value))
    }

    #[inline]
    #[must_use]
    pub const fn precision(&self) -> u8 {
        symbol_to_precision(self.0)
    }

    #[must_use]
    pub fn code(&self) -> String {
        let mut code = String::with_capacity(MAX_SYMBOL_LENGTH);
        let mut v = self.0 >> 8;
        while v > 0 {
            code.push((v & 0xFF) as u8 as char);
            v >>= 8;
        }
        code
    }

    #[inline]
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Symbol {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.precision(), self.code())
    }
}

impl Read for Symbol {
    fn read(bytes: &[u8], pos: &mut usize) -> Result<Self, ReadError> {
        let value = u64::read(bytes, pos)?;
        Symbol::from_u64(value).map_err(|e| ReadError::ParseError(e.to_string()))
    }
}

impl Serialize for Symbol {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Symbol::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl FromStr for Symbol {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (precision_str, code_str) = s.split_once(',').ok_or(SymbolError::ParseError)?;
        let precision: u8 = precision_str
            .trim()
            .parse()
            .map_err(|_| SymbolError::ParseError)?;
        Symbol::new(precision, code_str.trim())
    }
}

#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn symbol_to_precision(value: u64) -> u8 {
    (value & 0xFF) as u8
}

pub fn string_to_symbol(precision: u8, s: &str) -> Result<u64, SymbolError> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return Err(SymbolError::Empty);
    }
    if bytes.len() > MAX_SYMBOL_LENGTH {
        return Err(SymbolError::TooLong(s.len()));
    }

    let mut result: u64 = precision as u64;
    for (i, &b) in bytes.iter().enumerate() {
        if !b.is_ascii_uppercase() {
            return Err(SymbolError::InvalidChar(b as char));
        }
        // first char at bits 8..15, next at 16..23, etc.
        result |= (b as u64) << (8 * (i + 1));
    }
    Ok(result)
}
