mod unsigned;

pub use unsigned::{VarUint32, VarUint64};
