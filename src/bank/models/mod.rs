mod account;
mod client;
mod commission;
mod deposit;
mod transaction;

pub use account::{Account, AccountType};
pub use client::Client;
pub use commission::CommissionRate;
pub use deposit::{Deposit, DepositState, DepositType};
pub use transaction::{Transaction, TransferRecord};
