mod signed_transaction;
pub use signed_transaction::SignedTransaction;

mod transaction;
pub use transaction::{Transaction, TransactionId};
