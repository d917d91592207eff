use crate::ids::{AccountId, ClientId};
use crate::models::DepositType;
use crate::{Money, MoneyError};

use std::fmt;

use chrono::{DateTime, Utc};

use thiserror::Error;

/// What a failed lookup was looking for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Missing {
    SenderAccount(AccountId),
    ReceiverAccount(AccountId),
    Account(AccountId),
    AccountNumber(String),
    CheckingAccount(ClientId),
    Client(String),
    Deposit(DepositType),
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return match self {
            Self::SenderAccount(id) => write!(f, "sender's account {id}"),
            Self::ReceiverAccount(id) => write!(f, "receiver's account {id}"),
            Self::Account(id) => write!(f, "account {id}"),
            Self::AccountNumber(number) => write!(f, "account with number {number:?}"),
            Self::CheckingAccount(client) => write!(f, "checking account of client {client}"),
            Self::Client(name) => write!(f, "client {name:?}"),
            Self::Deposit(deposit_type) => write!(f, "{deposit_type} deposit"),
        };
    }
}

/// Every way a core operation can be rejected. Returned verbatim to the caller; the request
/// layer decides how each kind is presented.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("Not found: {0}")]
    NotFound(Missing),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Insufficient funds in account {account}: requested {requested}, available {available}")]
    InsufficientFunds {
        account: AccountId,
        requested: Money,
        available: Money,
    },

    #[error("Client {client} already holds an active {deposit_type} deposit")]
    DuplicateActiveDeposit {
        client: ClientId,
        deposit_type: DepositType,
    },

    #[error("Deposit is locked until {until}")]
    Locked { until: DateTime<Utc> },

    #[error("Deposit has already been withdrawn on {at}")]
    AlreadyWithdrawn { at: DateTime<Utc> },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("No commission rate configured for product {0:?}")]
    UnknownProduct(String),

    #[error("Cannot transfer from account {0} to itself")]
    SameAccount(AccountId),

    #[error("Invalid client name: {0:?}")]
    InvalidName(String),

    #[error("Client with name {0:?} already exists")]
    ClientExists(String),

    #[error("Account number {0:?} is already taken")]
    AccountNumberTaken(String),

    #[error("No {0} ids left to allocate")]
    IdsExhausted(&'static str),

    #[error(transparent)]
    Money(#[from] MoneyError),
}
