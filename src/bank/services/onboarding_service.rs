use super::AccountLedger;

use crate::ids::ClientId;
use crate::models::{Account, AccountType, Client};
use crate::stores::ClientStore;
use crate::{BankError, BankResult};

use std::sync::{Arc, Mutex, PoisonError};

/// Creates clients together with their checking account, and the bank's own reserve accounts
pub struct OnboardingService {
    clients: Arc<dyn ClientStore>,
    ledger: Arc<AccountLedger>,
    registration: Mutex<()>,
}

impl OnboardingService {
    pub fn new(clients: Arc<dyn ClientStore>, ledger: Arc<AccountLedger>) -> Self {
        return Self {
            clients,
            ledger,
            registration: Mutex::new(()),
        };
    }

    pub fn register_client(&self, name: &str, credential: &str, admin: bool) -> BankResult<Client> {
        let name = name.trim();

        if name.is_empty() {
            Err(BankError::InvalidName(name.to_string()))?
        }

        let _registration = self.registration.lock().unwrap_or_else(PoisonError::into_inner);

        if self.clients.find_by_name(name).is_some() {
            log::warn!("Client with name {name:?} already exists");
            Err(BankError::ClientExists(name.to_string()))?
        }

        let mut client = Client::new(self.clients.next_id()?, name, credential, admin);

        let checking = self.ledger.open_account(
            &checking_number(client.id),
            Some(client.id),
            AccountType::Checking,
        )?;
        client.checking_account = Some(checking.id);

        self.clients.save(client.clone());

        log::info!(
            "Registered client {} ({name}) with checking account {}",
            client.id,
            checking.number
        );

        return Ok(client);
    }

    pub fn open_reserve_account(&self, number: &str) -> BankResult<Account> {
        return self.ledger.open_account(number, None, AccountType::Reserve);
    }
}

fn checking_number(client: ClientId) -> String {
    return format!("CHK-{:08}", client.0);
}
