mod banking;
pub mod clock;
pub mod commands;
mod error;
pub mod identity;
pub mod ids;
pub mod input;
mod locks;
pub mod models;
mod money;
mod rate;
mod report;
mod result;
pub mod services;
mod settings;
pub mod stores;

pub use banking::Bank;
pub use error::{BankError, Missing};
pub use money::{Money, MoneyError};
pub use rate::Rate;
pub use report::AccountReport;
pub use result::{BankResult, Result};
pub use settings::{BankConfig, DEPOSIT_PRODUCT, RESERVE_ACCOUNT};
