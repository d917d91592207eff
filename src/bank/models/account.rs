use crate::ids::{AccountId, ClientId};
use crate::{BankError, BankResult, Money};

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    Checking,
    Savings,
    Reserve,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Checking => "CHECKING",
            Self::Savings => "SAVINGS",
            Self::Reserve => "RESERVE",
        };

        return write!(f, "{name}");
    }
}

/// An account and its authoritative balance. The balance can only be moved through the
/// `AccountLedger`, which holds the account's lock while doing so.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub number: String,
    pub owner: Option<ClientId>,
    pub account_type: AccountType,
    balance: Money,
}

impl Account {
    pub fn new(
        id: AccountId,
        number: impl Into<String>,
        owner: Option<ClientId>,
        account_type: AccountType,
    ) -> Self {
        return Self {
            id,
            number: number.into(),
            owner,
            account_type,
            balance: Money::ZERO,
        };
    }

    pub fn balance(&self) -> Money {
        return self.balance;
    }

    pub fn is_owned_by(&self, client: ClientId) -> bool {
        return self.owner == Some(client);
    }

    pub(crate) fn debit(&mut self, amount: &Money) -> BankResult {
        if self.balance < *amount {
            Err(BankError::InsufficientFunds {
                account: self.id,
                requested: *amount,
                available: self.balance,
            })?
        }

        self.balance.sub(amount)?;

        return Ok(());
    }

    pub(crate) fn credit(&mut self, amount: &Money) -> BankResult {
        self.balance.add(amount)?;

        return Ok(());
    }
}
