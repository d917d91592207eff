#![allow(dead_code)]

use bank::clock::ManualClock;
use bank::ids::AccountId;
use bank::models::Client;
use bank::{Bank, BankConfig, Money, RESERVE_ACCOUNT};

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

pub struct Harness {
    pub bank: Bank,
    pub clock: Arc<ManualClock>,
    pub admin: Client,
}

pub fn opening_day() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
}

pub fn start() -> Harness {
    start_with(BankConfig::default())
}

/// A bank whose reserve already holds 100 000 of capital to pay interest from
pub fn start_with(config: BankConfig) -> Harness {
    let clock = Arc::new(ManualClock::new(opening_day()));
    let bank = Bank::in_memory(config, clock.clone()).unwrap();

    let admin = bank.onboarding().register_client("root", "hunter2", true).unwrap();

    let harness = Harness { bank, clock, admin };
    harness
        .bank
        .ledger()
        .fund(harness.reserve(), Money::whole(100_000))
        .unwrap();

    harness
}

impl Harness {
    /// Registers a client and pays `funds` into their checking account
    pub fn client_with(&self, name: &str, funds: i64) -> Client {
        let client = self.bank.onboarding().register_client(name, "pw", false).unwrap();

        if funds > 0 {
            self.bank
                .ledger()
                .fund(checking(&client), Money::whole(funds))
                .unwrap();
        }

        client
    }

    pub fn reserve(&self) -> AccountId {
        self.bank.account_by_number(RESERVE_ACCOUNT).unwrap().id
    }

    pub fn balance(&self, account: AccountId) -> Money {
        self.bank.ledger().balance(account).unwrap()
    }
}

pub fn checking(client: &Client) -> AccountId {
    client.checking_account.unwrap()
}
