mod account_id;
mod client_id;
mod deposit_id;
mod transaction_id;

pub use account_id::AccountId;
pub use client_id::ClientId;
pub use deposit_id::DepositId;
pub use transaction_id::TransactionId;
