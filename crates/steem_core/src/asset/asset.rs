use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use steem_error::SteemError;
use steem_proc_macros::{NumBytes, Read, Write};

use crate::asset::Symbol;

/// Fixed-point amount: `amount * 10^-precision` units of `symbol`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Read, Write, NumBytes)]
pub struct Asset {
    /// The amount of the asset in its smallest unit
    pub amount: i64,
    /// Precision and currency code
    pub symbol: Symbol,
}

impl Asset {
    pub fn new(amount: i64, symbol: Symbol) -> Self {
        Asset { amount, symbol }
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn checked_add(&self, other: &Asset) -> Result<Asset, SteemError> {
        self.ensure_same_symbol(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| SteemError::InvalidAsset(format!("{self} + {other} overflows")))?;
        Ok(Asset::new(amount, self.symbol))
    }

    pub fn checked_sub(&self, other: &Asset) -> Result<Asset, SteemError> {
        self.ensure_same_symbol(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(|| SteemError::InvalidAsset(format!("{self} - {other} overflows")))?;
        Ok(Asset::new(amount, self.symbol))
    }

    fn ensure_same_symbol(&self, other: &Asset) -> Result<(), SteemError> {
        if self.symbol != other.symbol {
            return Err(SteemError::InvalidAsset(format!(
                "symbol mismatch: {} vs {}",
                self.symbol.code(),
                other.symbol.code()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Asset {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let precision = self.symbol.precision();
        let symbol_code = self.symbol.code();

        if precision == 0 {
            write!(f, "{} {}", self.amount, symbol_code)
        } else {
            let precision = usize::from(precision);
            let width = precision + if self.amount < 0 { 2 } else { 1 };
            let formatted = format!("{:0width$}", self.amount, width = width);
            let index = formatted.len() - precision;
            let whole = formatted.get(..index).unwrap_or("");
            let fraction = formatted.get(index..).unwrap_or("");
            write!(f, "{}.{} {}", whole, fraction, symbol_code)
        }
    }
}

impl FromStr for Asset {
    type Err = SteemError;

    /// Parses `"1.000 STEEM"`; the number of decimals is the precision.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SteemError::InvalidAsset(s.to_string());

        let (number, code) = s.trim().split_once(' ').ok_or_else(invalid)?;
        let (negative, digits) = match number.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, number),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if !fraction.bytes().all(|b| b.is_ascii_digit()) || (digits.contains('.') && fraction.is_empty()) {
            return Err(invalid());
        }

        let precision = u8::try_from(fraction.len()).map_err(|_| invalid())?;
        let symbol = Symbol::new(precision, code.trim())
            .map_err(|e| SteemError::InvalidAsset(format!("{s}: {e}")))?;

        let magnitude: i64 = format!("{whole}{fraction}").parse().map_err(|_| invalid())?;
        let amount = if negative { -magnitude } else { magnitude };
        Ok(Asset::new(amount, symbol))
    }
}

impl Serialize for Asset {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Asset::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use steem_serialization::{Write, unpack};

    use super::*;

    fn steem() -> Symbol {
        Symbol::new(3, "STEEM").unwrap()
    }

    #[test]
    fn test_asset_display() {
        assert_eq!(Asset::new(1000, steem()).to_string(), "1.000 STEEM");
        assert_eq!(Asset::new(-5, steem()).to_string(), "-0.005 STEEM");
        assert_eq!(Asset::new(0, steem()).to_string(), "0.000 STEEM");
        let vests = Symbol::new(6, "VESTS").unwrap();
        assert_eq!(Asset::new(123456789, vests).to_string(), "123.456789 VESTS");
    }

    #[test]
    fn test_asset_parse() {
        assert_eq!("1.000 STEEM".parse::<Asset>().unwrap(), Asset::new(1000, steem()));
        assert_eq!("-0.005 STEEM".parse::<Asset>().unwrap(), Asset::new(-5, steem()));
        assert!("1.000".parse::<Asset>().is_err());
        assert!("1. STEEM".parse::<Asset>().is_err());
        assert!("abc STEEM".parse::<Asset>().is_err());
        assert!("1.000 steem".parse::<Asset>().is_err());
    }

    #[test]
    fn test_asset_pack() {
        let asset = Asset::new(1000, steem());
        let packed = hex::encode(asset.pack().unwrap());
        assert_eq!(packed, "e80300000000000003535445454d0000");
        assert_eq!(unpack::<Asset>(&hex::decode(packed).unwrap()).unwrap(), asset);
    }

    #[test]
    fn test_asset_arithmetic_requires_matching_symbols() {
        let sbd = Symbol::new(3, "SBD").unwrap();
        let a = Asset::new(1500, steem());
        assert_eq!(a.checked_add(&Asset::new(500, steem())).unwrap().amount, 2000);
        assert_eq!(a.checked_sub(&Asset::new(500, steem())).unwrap().amount, 1000);
        assert!(matches!(
            a.checked_add(&Asset::new(1, sbd)),
            Err(SteemError::InvalidAsset(_))
        ));
        assert!(Asset::new(i64::MAX, steem()).checked_add(&Asset::new(1, steem())).is_err());
    }

    #[test]
    fn test_asset_json() {
        let asset = Asset::new(1000, steem());
        assert_eq!(serde_json::to_string(&asset).unwrap(), "\"1.000 STEEM\"");
        assert_eq!(serde_json::from_str::<Asset>("\"1.000 STEEM\"").unwrap(), asset);
    }
}
