use crate::models::CommissionRate;
use crate::services::DepositSettings;
use crate::Rate;

pub const RESERVE_ACCOUNT: &str = "BANK_DEPOSIT";
pub const DEPOSIT_PRODUCT: &str = "DEPOSIT";

/// Start-up configuration of a `Bank`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankConfig {
    pub deposits: DepositSettings,
    /// Commission rates seeded into the store when the bank is built
    pub rates: Vec<CommissionRate>,
}

impl Default for BankConfig {
    fn default() -> Self {
        return Self {
            deposits: DepositSettings {
                reserve_account: RESERVE_ACCOUNT.to_string(),
                product: DEPOSIT_PRODUCT.to_string(),
                progressive_step: Rate::percent(1),
            },
            rates: vec![CommissionRate {
                product: DEPOSIT_PRODUCT.to_string(),
                rate: Rate::percent(5),
            }],
        };
    }
}
