use crate::ids::AccountId;
use crate::models::{Account, Client, Deposit, DepositType, Transaction};
use crate::{Money, Rate};

/// Typed request against the bank, forcing correct handling through the type-system
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register {
        name: String,
        credential: String,
        admin: bool,
    },
    OpenReserve {
        number: String,
    },
    Fund {
        account: AccountId,
        amount: Money,
    },
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Money,
    },
    OpenDeposit {
        principal: Money,
        duration_months: u32,
        deposit_type: DepositType,
    },
    Withdraw {
        deposit_type: DepositType,
    },
    SetRate {
        product: String,
        rate: Rate,
    },
}

impl Command {
    /// Registration is the only request made before the sender has an identity
    pub fn requires_identity(&self) -> bool {
        return !matches!(self, Self::Register { .. });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Registered(Client),
    Opened(Account),
    Funded { account: AccountId, balance: Money },
    Transferred(Transaction),
    DepositOpened(Deposit),
    RateChanged { product: String, rate: Rate },
}
