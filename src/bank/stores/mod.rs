//! Persistence seams consumed by the services. The in-memory implementations back the binary
//! and the tests; a database-backed implementation only has to honour these traits.

mod memory;

pub use memory::{
    InMemoryAccountStore, InMemoryClientStore, InMemoryCommissionStore, InMemoryDepositStore,
    InMemoryTransactionStore,
};

use crate::ids::{AccountId, ClientId, DepositId, TransactionId};
use crate::models::{Account, Client, Deposit, Transaction};
use crate::{BankResult, Rate};

/// `next_id` hands out every id at most once and fails with `BankError::IdsExhausted` once the
/// id space is used up.
pub trait AccountStore: Send + Sync {
    fn next_id(&self) -> BankResult<AccountId>;
    fn find_by_id(&self, id: AccountId) -> Option<Account>;
    fn find_by_number(&self, number: &str) -> Option<Account>;
    fn find_by_client(&self, client: ClientId) -> Vec<Account>;
    fn find_all(&self) -> Vec<Account>;
    fn save(&self, account: Account);

    /// Stores every account in one step, readers never see only some of them
    fn save_all(&self, accounts: Vec<Account>) {
        for account in accounts {
            self.save(account);
        }
    }
}

pub trait TransactionStore: Send + Sync {
    fn next_id(&self) -> TransactionId;
    fn save(&self, transaction: Transaction);
    fn find_by_giver(&self, account: AccountId) -> Vec<Transaction>;
    fn find_by_receiver(&self, account: AccountId) -> Vec<Transaction>;
    fn find_all(&self) -> Vec<Transaction>;
}

pub trait DepositStore: Send + Sync {
    fn next_id(&self) -> BankResult<DepositId>;
    fn save(&self, deposit: Deposit);
    fn find_by_client(&self, client: ClientId) -> Vec<Deposit>;
    fn find_all(&self) -> Vec<Deposit>;
}

pub trait ClientStore: Send + Sync {
    fn next_id(&self) -> BankResult<ClientId>;
    fn find_by_id(&self, id: ClientId) -> Option<Client>;
    fn find_by_name(&self, name: &str) -> Option<Client>;
    fn save(&self, client: Client);
}

/// Commission rates per product. `set_rate` belongs to the administrative side, the services
/// only read.
pub trait CommissionStore: Send + Sync {
    fn find_by_product(&self, product: &str) -> Option<Rate>;
    fn set_rate(&self, product: &str, rate: Rate);
}
