use serde::{Deserialize, Serialize};
use steem_error::SteemError;
use steem_proc_macros::{NumBytes, Read, Write};

use crate::{asset::Asset, utils::steem_assert};

/// Exchange rate between two currencies, `base / quote`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct Price {
    pub base: Asset,
    pub quote: Asset,
}

impl Price {
    pub fn new(base: Asset, quote: Asset) -> Self {
        Price { base, quote }
    }

    pub fn validate(&self) -> Result<(), SteemError> {
        steem_assert(
            self.base.symbol != self.quote.symbol,
            SteemError::InvalidOperation(format!(
                "price base and quote share symbol {}",
                self.base.symbol.code()
            )),
        )?;
        steem_assert(
            self.base.amount > 0 && self.quote.amount > 0,
            SteemError::InvalidOperation(format!(
                "price {} / {} must be positive",
                self.base, self.quote
            )),
        )
    }
}
