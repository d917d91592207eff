use super::{require_admin, CommissionService, TransactionService};

use crate::clock::Clock;
use crate::error::Missing;
use crate::ids::{AccountId, ClientId};
use crate::locks::KeyedLocks;
use crate::models::{Account, Client, Deposit, DepositType, Transaction};
use crate::stores::{AccountStore, DepositStore};
use crate::{BankError, BankResult, Money, Rate};

use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositSettings {
    /// Number of the bank account that holds deposited principal and pays out returns
    pub reserve_account: String,
    /// Commission product whose rate applies to new deposits
    pub product: String,
    /// Percentage points added to a progressive deposit's rate per completed year
    pub progressive_step: Rate,
}

/// Opens deposits and pays them out once matured.
///
/// At most one deposit per client and type is active. The check and the creation run under the
/// lock of that (client, type) pair, and so does withdrawal, so neither can be raced.
pub struct DepositService {
    settings: DepositSettings,
    accounts: Arc<dyn AccountStore>,
    deposits: Arc<dyn DepositStore>,
    commissions: Arc<CommissionService>,
    transactions: Arc<TransactionService>,
    clock: Arc<dyn Clock>,
    locks: KeyedLocks<(ClientId, DepositType)>,
}

impl DepositService {
    pub fn new(
        settings: DepositSettings,
        accounts: Arc<dyn AccountStore>,
        deposits: Arc<dyn DepositStore>,
        commissions: Arc<CommissionService>,
        transactions: Arc<TransactionService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        return Self {
            settings,
            accounts,
            deposits,
            commissions,
            transactions,
            clock,
            locks: KeyedLocks::new(),
        };
    }

    pub fn open_deposit(
        &self,
        client: &Client,
        principal: Money,
        duration_months: u32,
        deposit_type: DepositType,
    ) -> BankResult<Deposit> {
        log::debug!(
            "Client {} opens {deposit_type} deposit of {principal} for {duration_months} months",
            client.name
        );

        if !principal.is_positive() {
            Err(BankError::InvalidAmount(format!(
                "deposit principal must be positive, got {principal}"
            )))?
        }

        if duration_months == 0 {
            Err(BankError::InvalidAmount(
                "deposit duration must be at least one month".to_string(),
            ))?
        }

        let lock_set = self.locks.lock_set(&[(client.id, deposit_type)]);
        let _guards = lock_set.lock();

        let checking = self.checking_account_of(client)?;

        if checking.balance() < principal {
            Err(BankError::InsufficientFunds {
                account: checking.id,
                requested: principal,
                available: checking.balance(),
            })?
        }

        let already_active = self
            .deposits
            .find_by_client(client.id)
            .iter()
            .any(|deposit| deposit.deposit_type == deposit_type && deposit.is_active());

        if already_active {
            Err(BankError::DuplicateActiveDeposit {
                client: client.id,
                deposit_type,
            })?
        }

        let rate = self.commissions.rate_for(&self.settings.product)?;
        let return_on_investment = deposit_type.return_on_investment(
            principal,
            rate,
            duration_months,
            self.settings.progressive_step,
        )?;

        let reserve = self.reserve_account()?;
        let id = self.deposits.next_id()?;

        let funding = self
            .transactions
            .execute_transfer(checking.id, reserve, principal)?;

        let deposit = Deposit::new(
            id,
            client.id,
            checking.id,
            deposit_type,
            principal,
            duration_months,
            rate,
            funding.timestamp,
            return_on_investment,
        );

        self.deposits.save(deposit.clone());

        log::info!(
            "Deposit {} opened for client {}: {principal} at {rate} returns {return_on_investment} on {}",
            deposit.id,
            client.name,
            deposit.maturity()
        );

        return Ok(deposit);
    }

    /// Pays out the client's matured deposit of `deposit_type` into their checking account
    pub fn withdraw(&self, client: &Client, deposit_type: DepositType) -> BankResult<Transaction> {
        log::debug!("Client {} withdraws {deposit_type} deposit", client.name);

        let lock_set = self.locks.lock_set(&[(client.id, deposit_type)]);
        let _guards = lock_set.lock();

        let mut deposit = self
            .deposit_of_type(client.id, deposit_type)
            .ok_or(BankError::NotFound(Missing::Deposit(deposit_type)))?;

        if let Some(at) = deposit.withdrawn_at() {
            Err(BankError::AlreadyWithdrawn { at })?
        }

        let maturity = deposit.maturity();

        if self.clock.now() < maturity {
            Err(BankError::Locked { until: maturity })?
        }

        let checking = self.checking_account_of(client)?;
        let reserve = self.reserve_account()?;

        let payout = self.transactions.execute_transfer(
            reserve,
            checking.id,
            deposit.return_on_investment,
        )?;

        deposit.mark_withdrawn(payout.timestamp)?;
        self.deposits.save(deposit.clone());

        log::info!(
            "Deposit {} withdrawn by client {}: {} paid out",
            deposit.id,
            client.name,
            payout.amount
        );

        return Ok(payout);
    }

    /// Every deposit, most recent first. Admin only.
    pub fn list_all(&self, requester: &Client) -> BankResult<Vec<Deposit>> {
        require_admin(requester, "list all deposits")?;

        return Ok(most_recent_first(self.deposits.find_all()));
    }

    /// The client's own deposits, most recent first
    pub fn deposits_of(&self, client: &Client) -> Vec<Deposit> {
        return most_recent_first(self.deposits.find_by_client(client.id));
    }

    /// The active deposit of that type if there is one, otherwise the most recent
    fn deposit_of_type(&self, client: ClientId, deposit_type: DepositType) -> Option<Deposit> {
        let mut candidates: Vec<Deposit> = self
            .deposits
            .find_by_client(client)
            .into_iter()
            .filter(|deposit| deposit.deposit_type == deposit_type)
            .collect();

        candidates.sort_by_key(|deposit| (deposit.is_active(), deposit.id));

        return candidates.pop();
    }

    fn checking_account_of(&self, client: &Client) -> BankResult<Account> {
        return client
            .checking_account
            .and_then(|id| self.accounts.find_by_id(id))
            .ok_or(BankError::NotFound(Missing::CheckingAccount(client.id)));
    }

    fn reserve_account(&self) -> BankResult<AccountId> {
        let number = &self.settings.reserve_account;

        return self
            .accounts
            .find_by_number(number)
            .map(|account| account.id)
            .ok_or_else(|| BankError::NotFound(Missing::AccountNumber(number.to_string())));
    }
}

fn most_recent_first(mut deposits: Vec<Deposit>) -> Vec<Deposit> {
    deposits.sort_by(|a, b| b.id.cmp(&a.id));
    return deposits;
}
