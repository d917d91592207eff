use super::{require_admin, AccountLedger};

use crate::clock::Clock;
use crate::error::Missing;
use crate::ids::AccountId;
use crate::models::{Client, Transaction};
use crate::stores::{AccountStore, TransactionStore};
use crate::{BankError, BankResult, Money};

use std::sync::Arc;

/// Validates transfers, moves the money through the ledger and records the resulting
/// transaction
pub struct TransactionService {
    ledger: Arc<AccountLedger>,
    accounts: Arc<dyn AccountStore>,
    transactions: Arc<dyn TransactionStore>,
    clock: Arc<dyn Clock>,
}

impl TransactionService {
    pub fn new(
        ledger: Arc<AccountLedger>,
        accounts: Arc<dyn AccountStore>,
        transactions: Arc<dyn TransactionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        return Self {
            ledger,
            accounts,
            transactions,
            clock,
        };
    }

    /// Transfer requested by a client. Non-admin clients may only send from their own accounts.
    pub fn transfer_funds(
        &self,
        sender: AccountId,
        receiver: AccountId,
        amount: Money,
        requester: &Client,
    ) -> BankResult<Transaction> {
        log::debug!(
            "Client {} requests transfer of {amount} from {sender} to {receiver}",
            requester.name
        );

        let sender_account = self
            .accounts
            .find_by_id(sender)
            .ok_or(BankError::NotFound(Missing::SenderAccount(sender)))?;

        if self.accounts.find_by_id(receiver).is_none() {
            Err(BankError::NotFound(Missing::ReceiverAccount(receiver)))?
        }

        if !requester.admin && !sender_account.is_owned_by(requester.id) {
            Err(BankError::PermissionDenied(format!(
                "account {sender} does not belong to client {:?}",
                requester.name
            )))?
        }

        return self.execute_transfer(sender, receiver, amount);
    }

    /// Transfer on behalf of the bank itself, e.g. deposit funding and payout
    pub(crate) fn execute_transfer(
        &self,
        sender: AccountId,
        receiver: AccountId,
        amount: Money,
    ) -> BankResult<Transaction> {
        let record = self.ledger.transfer(sender, receiver, amount)?;

        let transaction = Transaction {
            id: self.transactions.next_id(),
            giver: record.giver,
            receiver: record.receiver,
            amount: record.amount,
            timestamp: self.clock.now(),
        };

        self.transactions.save(transaction.clone());

        log::info!(
            "Transaction {} recorded: {} from {} to {}",
            transaction.id,
            transaction.amount,
            transaction.giver,
            transaction.receiver
        );

        return Ok(transaction);
    }

    /// Transactions sent from `account`, oldest first
    pub fn outgoing_for(&self, account: AccountId) -> Vec<Transaction> {
        return chronological(self.transactions.find_by_giver(account));
    }

    /// Transactions received by `account`, oldest first
    pub fn incoming_for(&self, account: AccountId) -> Vec<Transaction> {
        return chronological(self.transactions.find_by_receiver(account));
    }

    /// Outgoing transactions of the requester's checking account
    pub fn outgoing_of(&self, requester: &Client) -> BankResult<Vec<Transaction>> {
        let checking = checking_account_of(requester)?;
        return Ok(self.outgoing_for(checking));
    }

    /// Incoming transactions of the requester's checking account
    pub fn incoming_of(&self, requester: &Client) -> BankResult<Vec<Transaction>> {
        let checking = checking_account_of(requester)?;
        return Ok(self.incoming_for(checking));
    }

    /// Every transaction, most recent first. Admin only.
    pub fn all(&self, requester: &Client) -> BankResult<Vec<Transaction>> {
        require_admin(requester, "list all transactions")?;

        return Ok(most_recent_first(self.transactions.find_all()));
    }

    /// Every transaction that touched the account with `number`, most recent first. Admin only.
    pub fn for_account_number(
        &self,
        number: &str,
        requester: &Client,
    ) -> BankResult<Vec<Transaction>> {
        require_admin(requester, "list transactions of an account")?;

        let account = self
            .accounts
            .find_by_number(number)
            .ok_or_else(|| BankError::NotFound(Missing::AccountNumber(number.to_string())))?;

        let transactions = self
            .transactions
            .find_all()
            .into_iter()
            .filter(|tx| tx.involves(account.id))
            .collect();

        return Ok(most_recent_first(transactions));
    }
}

fn checking_account_of(client: &Client) -> BankResult<AccountId> {
    return client
        .checking_account
        .ok_or(BankError::NotFound(Missing::CheckingAccount(client.id)));
}

fn chronological(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.sort_by_key(|tx| (tx.timestamp, tx.id));
    return transactions;
}

fn most_recent_first(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.sort_by(|a, b| b.id.cmp(&a.id));
    return transactions;
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::clock::ManualClock;
    use crate::ids::ClientId;
    use crate::models::AccountType;
    use crate::stores::{InMemoryAccountStore, InMemoryTransactionStore};

    use chrono::{Duration, TimeZone, Utc};

    struct Fixture {
        service: TransactionService,
        ledger: Arc<AccountLedger>,
        clock: Arc<ManualClock>,
        user: Client,
        admin: Client,
    }

    fn build_fixture() -> Fixture {
        let accounts = Arc::new(InMemoryAccountStore::new());
        let ledger = Arc::new(AccountLedger::new(accounts.clone()));
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        ));

        let service = TransactionService::new(
            ledger.clone(),
            accounts,
            Arc::new(InMemoryTransactionStore::new()),
            clock.clone(),
        );

        let mut user = Client::new(ClientId(1), "User", "password", false);
        let mut admin = Client::new(ClientId(2), "Admin", "password", true);

        let checking = ledger
            .open_account("checking1", Some(user.id), AccountType::Checking)
            .unwrap();
        let receiving = ledger
            .open_account("receiving1", Some(admin.id), AccountType::Checking)
            .unwrap();

        ledger.fund(checking.id, Money::whole(500)).unwrap();

        user.checking_account = Some(checking.id);
        admin.checking_account = Some(receiving.id);

        Fixture {
            service,
            ledger,
            clock,
            user,
            admin,
        }
    }

    fn checking(client: &Client) -> AccountId {
        client.checking_account.unwrap()
    }

    #[test]
    fn transfer_funds() {
        let fixture = build_fixture();
        let (from, to) = (checking(&fixture.user), checking(&fixture.admin));

        let transaction = fixture
            .service
            .transfer_funds(from, to, Money::whole(100), &fixture.user)
            .unwrap();

        assert_eq!(transaction.giver, from);
        assert_eq!(transaction.receiver, to);
        assert_eq!(transaction.amount, Money::whole(100));
        assert_eq!(transaction.timestamp, fixture.clock.now());

        assert_eq!(fixture.ledger.balance(from), Ok(Money::whole(400)));
        assert_eq!(fixture.ledger.balance(to), Ok(Money::whole(100)));
        assert_eq!(fixture.service.outgoing_for(from), vec![transaction]);
    }

    #[test]
    fn transfer_funds_sender_not_found() {
        let fixture = build_fixture();

        let result = fixture.service.transfer_funds(
            AccountId(42),
            checking(&fixture.admin),
            Money::whole(100),
            &fixture.user,
        );

        assert_eq!(result, Err(BankError::NotFound(Missing::SenderAccount(AccountId(42)))));
    }

    #[test]
    fn transfer_funds_receiver_not_found() {
        let fixture = build_fixture();

        let result = fixture.service.transfer_funds(
            checking(&fixture.user),
            AccountId(42),
            Money::whole(100),
            &fixture.user,
        );

        assert_eq!(result, Err(BankError::NotFound(Missing::ReceiverAccount(AccountId(42)))));
        assert!(fixture.service.outgoing_for(checking(&fixture.user)).is_empty());
    }

    #[test]
    fn transfer_funds_from_someone_elses_account() {
        let fixture = build_fixture();

        let result = fixture.service.transfer_funds(
            checking(&fixture.admin),
            checking(&fixture.user),
            Money::whole(1),
            &fixture.user,
        );

        assert!(matches!(result, Err(BankError::PermissionDenied(_))));
    }

    #[test]
    fn failed_transfer_records_nothing() {
        let fixture = build_fixture();
        let (from, to) = (checking(&fixture.user), checking(&fixture.admin));

        let result = fixture
            .service
            .transfer_funds(from, to, Money::whole(501), &fixture.user);

        assert!(matches!(result, Err(BankError::InsufficientFunds { .. })));
        assert!(fixture.service.all(&fixture.admin).unwrap().is_empty());
        assert_eq!(fixture.ledger.balance(from), Ok(Money::whole(500)));
    }

    #[test]
    fn outgoing_and_incoming_are_chronological() {
        let fixture = build_fixture();
        let (from, to) = (checking(&fixture.user), checking(&fixture.admin));

        let first = fixture
            .service
            .transfer_funds(from, to, Money::whole(100), &fixture.user)
            .unwrap();

        fixture.clock.set(fixture.clock.now() + Duration::days(1));

        let second = fixture
            .service
            .transfer_funds(from, to, Money::whole(200), &fixture.user)
            .unwrap();

        assert_eq!(
            fixture.service.outgoing_of(&fixture.user),
            Ok(vec![first.clone(), second.clone()])
        );
        assert_eq!(
            fixture.service.incoming_of(&fixture.admin),
            Ok(vec![first, second])
        );
        assert_eq!(fixture.service.incoming_of(&fixture.user), Ok(vec![]));
    }

    #[test]
    fn all_requires_admin() {
        let fixture = build_fixture();

        assert!(matches!(
            fixture.service.all(&fixture.user),
            Err(BankError::PermissionDenied(_))
        ));
    }

    #[test]
    fn all_is_most_recent_first() {
        let fixture = build_fixture();
        let (from, to) = (checking(&fixture.user), checking(&fixture.admin));

        let ids: Vec<_> = (1..=3)
            .map(|units| {
                fixture
                    .service
                    .transfer_funds(from, to, Money::whole(units), &fixture.user)
                    .unwrap()
                    .id
            })
            .collect();

        let listed: Vec<_> = fixture
            .service
            .all(&fixture.admin)
            .unwrap()
            .into_iter()
            .map(|tx| tx.id)
            .collect();

        assert_eq!(listed, ids.into_iter().rev().collect::<Vec<_>>());
    }

    #[test]
    fn for_account_number() {
        let fixture = build_fixture();
        let (from, to) = (checking(&fixture.user), checking(&fixture.admin));

        let sent = fixture
            .service
            .transfer_funds(from, to, Money::whole(100), &fixture.user)
            .unwrap();
        let returned = fixture
            .service
            .transfer_funds(to, from, Money::whole(40), &fixture.admin)
            .unwrap();

        assert_eq!(
            fixture.service.for_account_number("checking1", &fixture.admin),
            Ok(vec![returned, sent])
        );
        assert!(matches!(
            fixture.service.for_account_number("checking1", &fixture.user),
            Err(BankError::PermissionDenied(_))
        ));
        assert_eq!(
            fixture.service.for_account_number("missing", &fixture.admin),
            Err(BankError::NotFound(Missing::AccountNumber("missing".to_string())))
        );
    }

    #[test]
    fn queries_without_checking_account() {
        let fixture = build_fixture();
        let stranger = Client::new(ClientId(9), "Stranger", "password", false);

        assert_eq!(
            fixture.service.outgoing_of(&stranger),
            Err(BankError::NotFound(Missing::CheckingAccount(ClientId(9))))
        );
    }
}
