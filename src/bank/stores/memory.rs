use super::{AccountStore, ClientStore, CommissionStore, DepositStore, TransactionStore};

use crate::ids::{AccountId, ClientId, DepositId, TransactionId};
use crate::models::{Account, Client, Deposit, Transaction};
use crate::{BankError, BankResult, Rate};

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Rows keyed by id plus an id sequence starting at 1
#[derive(Debug)]
struct Table<K, V> {
    rows: RwLock<BTreeMap<K, V>>,
    sequence: AtomicU64,
}

impl<K: Ord, V: Clone> Table<K, V> {
    fn new() -> Self {
        return Self {
            rows: RwLock::new(BTreeMap::new()),
            sequence: AtomicU64::new(0),
        };
    }

    fn next_sequence(&self) -> u64 {
        return self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<K, V>> {
        return self.rows.read().unwrap_or_else(PoisonError::into_inner);
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<K, V>> {
        return self.rows.write().unwrap_or_else(PoisonError::into_inner);
    }

    fn find(&self, key: &K) -> Option<V> {
        return self.read().get(key).cloned();
    }

    fn filter(&self, predicate: impl Fn(&V) -> bool) -> Vec<V> {
        return self.read().values().filter(|row| predicate(row)).cloned().collect();
    }

    fn all(&self) -> Vec<V> {
        return self.read().values().cloned().collect();
    }
}

fn narrow(sequence: u64, kind: &'static str) -> BankResult<u32> {
    return u32::try_from(sequence).map_err(|_| BankError::IdsExhausted(kind));
}

#[derive(Debug)]
pub struct InMemoryAccountStore {
    table: Table<AccountId, Account>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        return Self { table: Table::new() };
    }
}

impl AccountStore for InMemoryAccountStore {
    fn next_id(&self) -> BankResult<AccountId> {
        return narrow(self.table.next_sequence(), "account").map(AccountId);
    }

    fn find_by_id(&self, id: AccountId) -> Option<Account> {
        return self.table.find(&id);
    }

    fn find_by_number(&self, number: &str) -> Option<Account> {
        return self.table.filter(|account| account.number == number).pop();
    }

    fn find_by_client(&self, client: ClientId) -> Vec<Account> {
        return self.table.filter(|account| account.is_owned_by(client));
    }

    fn find_all(&self) -> Vec<Account> {
        return self.table.all();
    }

    fn save(&self, account: Account) {
        self.table.write().insert(account.id, account);
    }

    fn save_all(&self, accounts: Vec<Account>) {
        let mut rows = self.table.write();

        for account in accounts {
            rows.insert(account.id, account);
        }
    }
}

#[derive(Debug)]
pub struct InMemoryTransactionStore {
    table: Table<TransactionId, Transaction>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        return Self { table: Table::new() };
    }
}

impl TransactionStore for InMemoryTransactionStore {
    fn next_id(&self) -> TransactionId {
        return TransactionId(self.table.next_sequence());
    }

    fn save(&self, transaction: Transaction) {
        self.table.write().insert(transaction.id, transaction);
    }

    fn find_by_giver(&self, account: AccountId) -> Vec<Transaction> {
        return self.table.filter(|tx| tx.giver == account);
    }

    fn find_by_receiver(&self, account: AccountId) -> Vec<Transaction> {
        return self.table.filter(|tx| tx.receiver == account);
    }

    fn find_all(&self) -> Vec<Transaction> {
        return self.table.all();
    }
}

#[derive(Debug)]
pub struct InMemoryDepositStore {
    table: Table<DepositId, Deposit>,
}

impl InMemoryDepositStore {
    pub fn new() -> Self {
        return Self { table: Table::new() };
    }
}

impl DepositStore for InMemoryDepositStore {
    fn next_id(&self) -> BankResult<DepositId> {
        return narrow(self.table.next_sequence(), "deposit").map(DepositId);
    }

    fn save(&self, deposit: Deposit) {
        self.table.write().insert(deposit.id, deposit);
    }

    fn find_by_client(&self, client: ClientId) -> Vec<Deposit> {
        return self.table.filter(|deposit| deposit.client == client);
    }

    fn find_all(&self) -> Vec<Deposit> {
        return self.table.all();
    }
}

#[derive(Debug)]
pub struct InMemoryClientStore {
    table: Table<ClientId, Client>,
}

impl InMemoryClientStore {
    pub fn new() -> Self {
        return Self { table: Table::new() };
    }
}

impl ClientStore for InMemoryClientStore {
    fn next_id(&self) -> BankResult<ClientId> {
        return narrow(self.table.next_sequence(), "client").map(ClientId);
    }

    fn find_by_id(&self, id: ClientId) -> Option<Client> {
        return self.table.find(&id);
    }

    fn find_by_name(&self, name: &str) -> Option<Client> {
        return self.table.filter(|client| client.name == name).pop();
    }

    fn save(&self, client: Client) {
        self.table.write().insert(client.id, client);
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCommissionStore {
    rates: RwLock<HashMap<String, Rate>>,
}

impl InMemoryCommissionStore {
    pub fn new() -> Self {
        return Self::default();
    }
}

impl CommissionStore for InMemoryCommissionStore {
    fn find_by_product(&self, product: &str) -> Option<Rate> {
        let rates = self.rates.read().unwrap_or_else(PoisonError::into_inner);
        return rates.get(product).copied();
    }

    fn set_rate(&self, product: &str, rate: Rate) {
        let mut rates = self.rates.write().unwrap_or_else(PoisonError::into_inner);
        rates.insert(product.to_string(), rate);
    }
}
