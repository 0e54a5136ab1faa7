use crate::utils::{VoidPayload, static_variant};

static_variant! {
    /// Reserved extension slot; only the empty variant exists so far.
    pub enum FutureExtension {
        0 => Void(VoidPayload),
    }
}

pub type Extensions = Vec<FutureExtension>;
