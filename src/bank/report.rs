use crate::ids::AccountId;
use crate::models::AccountType;
use crate::Money;

use serde::{Deserialize, Serialize};

/// One line of the end-of-run account report
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct AccountReport {
    pub account: AccountId,
    pub number: String,
    pub owner: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub balance: Money,
}
