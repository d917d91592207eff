use crate::clock::Clock;
use crate::commands::{Command, Outcome};
use crate::error::Missing;
use crate::models::{Account, Client};
use crate::services::{
    require_admin, AccountLedger, CommissionService, DepositService, OnboardingService,
    TransactionService,
};
use crate::stores::{
    AccountStore, ClientStore, CommissionStore, InMemoryAccountStore, InMemoryClientStore,
    InMemoryCommissionStore, InMemoryDepositStore, InMemoryTransactionStore,
};
use crate::{AccountReport, BankConfig, BankError, BankResult, Rate};

use std::sync::Arc;

/// All services wired to one set of stores
pub struct Bank {
    clients: Arc<dyn ClientStore>,
    accounts: Arc<dyn AccountStore>,
    rates: Arc<dyn CommissionStore>,
    ledger: Arc<AccountLedger>,
    transactions: Arc<TransactionService>,
    deposits: DepositService,
    onboarding: OnboardingService,
}

impl Bank {
    /// Builds a bank on in-memory stores, seeded with the configured rates and reserve account
    pub fn in_memory(config: BankConfig, clock: Arc<dyn Clock>) -> BankResult<Self> {
        let clients: Arc<dyn ClientStore> = Arc::new(InMemoryClientStore::new());
        let accounts: Arc<dyn AccountStore> = Arc::new(InMemoryAccountStore::new());
        let rates: Arc<dyn CommissionStore> = Arc::new(InMemoryCommissionStore::new());

        for commission in config.rates.iter() {
            rates.set_rate(&commission.product, commission.rate);
        }

        let ledger = Arc::new(AccountLedger::new(accounts.clone()));

        let transactions = Arc::new(TransactionService::new(
            ledger.clone(),
            accounts.clone(),
            Arc::new(InMemoryTransactionStore::new()),
            clock.clone(),
        ));

        let reserve_account = config.deposits.reserve_account.clone();

        let deposits = DepositService::new(
            config.deposits,
            accounts.clone(),
            Arc::new(InMemoryDepositStore::new()),
            Arc::new(CommissionService::new(rates.clone())),
            transactions.clone(),
            clock,
        );

        let onboarding = OnboardingService::new(clients.clone(), ledger.clone());
        onboarding.open_reserve_account(&reserve_account)?;

        return Ok(Self {
            clients,
            accounts,
            rates,
            ledger,
            transactions,
            deposits,
            onboarding,
        });
    }

    pub fn ledger(&self) -> &AccountLedger {
        return &self.ledger;
    }

    pub fn transactions(&self) -> &TransactionService {
        return &self.transactions;
    }

    pub fn deposits(&self) -> &DepositService {
        return &self.deposits;
    }

    pub fn onboarding(&self) -> &OnboardingService {
        return &self.onboarding;
    }

    pub fn clients(&self) -> &dyn ClientStore {
        return self.clients.as_ref();
    }

    pub fn client(&self, name: &str) -> BankResult<Client> {
        return self
            .clients
            .find_by_name(name)
            .ok_or_else(|| BankError::NotFound(Missing::Client(name.to_string())));
    }

    /// Accounts owned by the client, in opening order
    pub fn accounts_of(&self, client: &Client) -> Vec<Account> {
        return self.accounts.find_by_client(client.id);
    }

    pub fn account_by_number(&self, number: &str) -> BankResult<Account> {
        return self
            .accounts
            .find_by_number(number)
            .ok_or_else(|| BankError::NotFound(Missing::AccountNumber(number.to_string())));
    }

    /// Administrative rate change. Deposits opened earlier keep the rate they were opened with.
    pub fn set_rate(&self, product: &str, rate: Rate, requester: &Client) -> BankResult {
        require_admin(requester, "change commission rates")?;

        self.rates.set_rate(product, rate);

        log::info!("Commission rate of {product} set to {rate} by {}", requester.name);

        return Ok(());
    }

    pub fn execute(&self, command: Command, requester: Option<&Client>) -> BankResult<Outcome> {
        log::debug!("Executing command: {command:?}");

        let outcome = match command {
            Command::Register {
                name,
                credential,
                admin,
            } => {
                let client = self.onboarding.register_client(&name, &credential, admin)?;
                Outcome::Registered(client)
            }

            Command::OpenReserve { number } => {
                require_admin(authenticated(requester)?, "open reserve accounts")?;
                Outcome::Opened(self.onboarding.open_reserve_account(&number)?)
            }

            Command::Fund { account, amount } => {
                require_admin(authenticated(requester)?, "fund accounts")?;
                let balance = self.ledger.fund(account, amount)?;
                Outcome::Funded { account, balance }
            }

            Command::Transfer { from, to, amount } => {
                let requester = authenticated(requester)?;
                let transaction = self.transactions.transfer_funds(from, to, amount, requester)?;
                Outcome::Transferred(transaction)
            }

            Command::OpenDeposit {
                principal,
                duration_months,
                deposit_type,
            } => {
                let requester = authenticated(requester)?;
                Outcome::DepositOpened(self.deposits.open_deposit(
                    requester,
                    principal,
                    duration_months,
                    deposit_type,
                )?)
            }

            Command::Withdraw { deposit_type } => {
                let requester = authenticated(requester)?;
                Outcome::Transferred(self.deposits.withdraw(requester, deposit_type)?)
            }

            Command::SetRate { product, rate } => {
                self.set_rate(&product, rate, authenticated(requester)?)?;
                Outcome::RateChanged { product, rate }
            }
        };

        return Ok(outcome);
    }

    /// Every account with its current balance, ordered by account id
    pub fn account_report(&self) -> Vec<AccountReport> {
        return self
            .accounts
            .find_all()
            .into_iter()
            .map(|account| {
                let owner = account
                    .owner
                    .and_then(|owner| self.clients.find_by_id(owner))
                    .map(|client| client.name)
                    .unwrap_or_default();

                AccountReport {
                    account: account.id,
                    number: account.number.clone(),
                    owner,
                    account_type: account.account_type,
                    balance: account.balance(),
                }
            })
            .collect();
    }
}

fn authenticated(requester: Option<&Client>) -> BankResult<&Client> {
    return requester
        .ok_or_else(|| BankError::PermissionDenied("request is not authenticated".to_string()));
}
