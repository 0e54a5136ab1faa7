//! Chain-generated operations found in block history.
//!
//! They decode from the wire and JSON but have no public constructor and no
//! encoder: a node emits them, clients only read them.

use serde::{Deserialize, Serialize};
use steem_proc_macros::Read;

use crate::{asset::Asset, name::AccountName};

macro_rules! virtual_operation {
    (
        $(#[$meta:meta])*
        $name:ident { $($field:ident: $ty:ty),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Read, Serialize, Deserialize)]
        pub struct $name {
            $(pub(crate) $field: $ty),+
        }

        impl $name {
            $(
                pub fn $field(&self) -> &$ty {
                    &self.$field
                }
            )+
        }
    };
}

virtual_operation! {
    FillConvertRequestOperation {
        owner: AccountName,
        requestid: u32,
        amount_in: Asset,
        amount_out: Asset,
    }
}

virtual_operation! {
    AuthorRewardOperation {
        author: AccountName,
        permlink: String,
        sbd_payout: Asset,
        steem_payout: Asset,
        vesting_payout: Asset,
    }
}

virtual_operation! {
    CurationRewardOperation {
        curator: AccountName,
        reward: Asset,
        comment_author: AccountName,
        comment_permlink: String,
    }
}

virtual_operation! {
    CommentRewardOperation {
        author: AccountName,
        permlink: String,
        payout: Asset,
    }
}

virtual_operation! {
    LiquidityRewardOperation {
        owner: AccountName,
        payout: Asset,
    }
}

virtual_operation! {
    /// SBD interest paid out to a balance holder.
    InterestOperation {
        owner: AccountName,
        interest: Asset,
    }
}

virtual_operation! {
    FillVestingWithdrawOperation {
        from_account: AccountName,
        to_account: AccountName,
        withdrawn: Asset,
        deposited: Asset,
    }
}

virtual_operation! {
    /// Two limit orders matched; `current_*` is the taker side.
    FillOrderOperation {
        current_owner: AccountName,
        current_orderid: u32,
        current_pays: Asset,
        open_owner: AccountName,
        open_orderid: u32,
        open_pays: Asset,
    }
}

virtual_operation! {
    ShutdownWitnessOperation {
        owner: AccountName,
    }
}

virtual_operation! {
    FillTransferFromSavingsOperation {
        from: AccountName,
        to: AccountName,
        amount: Asset,
        request_id: u32,
        memo: String,
    }
}

virtual_operation! {
    HardforkOperation {
        hardfork_id: u32,
    }
}

virtual_operation! {
    CommentPayoutUpdateOperation {
        author: AccountName,
        permlink: String,
    }
}

virtual_operation! {
    ReturnVestingDelegationOperation {
        account: AccountName,
        vesting_shares: Asset,
    }
}

virtual_operation! {
    CommentBenefactorRewardOperation {
        benefactor: AccountName,
        author: AccountName,
        permlink: String,
        reward: Asset,
    }
}

virtual_operation! {
    /// Block reward credited to the witness that produced the block.
    ProducerRewardOperation {
        producer: AccountName,
        vesting_shares: Asset,
    }
}
