use crate::error::Missing;
use crate::ids::{AccountId, ClientId};
use crate::locks::KeyedLocks;
use crate::models::{Account, AccountType, TransferRecord};
use crate::stores::AccountStore;
use crate::{BankError, BankResult, Money};

use std::sync::{Arc, Mutex, PoisonError};

/// Sole writer of account balances.
///
/// Every balance change happens while the affected accounts' locks are held, acquired in
/// ascending account id order, so two transfers between the same pair of accounts in opposite
/// directions serialize instead of deadlocking.
pub struct AccountLedger {
    accounts: Arc<dyn AccountStore>,
    locks: KeyedLocks<AccountId>,
    opening: Mutex<()>,
}

impl AccountLedger {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        return Self {
            accounts,
            locks: KeyedLocks::new(),
            opening: Mutex::new(()),
        };
    }

    /// Moves `amount` from `giver` to `receiver`. Both balances are stored together or not at all.
    pub fn transfer(
        &self,
        giver: AccountId,
        receiver: AccountId,
        amount: Money,
    ) -> BankResult<TransferRecord> {
        log::debug!("Ledger transfer of {amount} from {giver} to {receiver}");

        if !amount.is_positive() {
            Err(BankError::InvalidAmount(format!(
                "transfer amount must be positive, got {amount}"
            )))?
        }

        if giver == receiver {
            Err(BankError::SameAccount(giver))?
        }

        let lock_set = self.locks.lock_set(&[giver, receiver]);
        let _guards = lock_set.lock();

        let mut giver_account = self
            .accounts
            .find_by_id(giver)
            .ok_or(BankError::NotFound(Missing::SenderAccount(giver)))?;

        let mut receiver_account = self
            .accounts
            .find_by_id(receiver)
            .ok_or(BankError::NotFound(Missing::ReceiverAccount(receiver)))?;

        // work on copies, nothing is stored until both sides succeed
        giver_account.debit(&amount)?;
        receiver_account.credit(&amount)?;

        let record = TransferRecord {
            giver,
            receiver,
            amount,
            giver_balance: giver_account.balance(),
            receiver_balance: receiver_account.balance(),
        };

        self.accounts.save_all(vec![giver_account, receiver_account]);

        log::debug!("Ledger transfer committed: {record:?}");

        return Ok(record);
    }

    /// Credits money entering the bank from outside, e.g. cash paid in at a branch
    pub fn fund(&self, account: AccountId, amount: Money) -> BankResult<Money> {
        if !amount.is_positive() {
            Err(BankError::InvalidAmount(format!(
                "funding amount must be positive, got {amount}"
            )))?
        }

        let lock_set = self.locks.lock_set(&[account]);
        let _guards = lock_set.lock();

        let mut target = self
            .accounts
            .find_by_id(account)
            .ok_or(BankError::NotFound(Missing::Account(account)))?;

        target.credit(&amount)?;

        let balance = target.balance();
        self.accounts.save(target);

        log::info!("Funded account {account} with {amount}, balance now {balance}");

        return Ok(balance);
    }

    pub fn balance(&self, account: AccountId) -> BankResult<Money> {
        let lock_set = self.locks.lock_set(&[account]);
        let _guards = lock_set.lock();

        return self
            .accounts
            .find_by_id(account)
            .map(|account| account.balance())
            .ok_or(BankError::NotFound(Missing::Account(account)));
    }

    /// Opens an empty account under a number nobody else holds
    pub fn open_account(
        &self,
        number: &str,
        owner: Option<ClientId>,
        account_type: AccountType,
    ) -> BankResult<Account> {
        let _opening = self.opening.lock().unwrap_or_else(PoisonError::into_inner);

        if self.accounts.find_by_number(number).is_some() {
            Err(BankError::AccountNumberTaken(number.to_string()))?
        }

        let account = Account::new(self.accounts.next_id()?, number, owner, account_type);
        self.accounts.save(account.clone());

        log::info!("Opened {account_type} account {} ({number})", account.id);

        return Ok(account);
    }
}
