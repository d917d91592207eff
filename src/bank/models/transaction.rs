use crate::ids::{AccountId, TransactionId};
use crate::Money;

use chrono::{DateTime, Utc};

/// Result of moving money inside the ledger, before it is recorded as a `Transaction`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    pub giver: AccountId,
    pub receiver: AccountId,
    pub amount: Money,
    pub giver_balance: Money,
    pub receiver_balance: Money,
}

/// Append-only ledger entry. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    pub giver: AccountId,
    pub receiver: AccountId,
    pub amount: Money,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn involves(&self, account: AccountId) -> bool {
        return self.giver == account || self.receiver == account;
    }
}
