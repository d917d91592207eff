mod account_ledger;
mod commission_service;
mod deposit_service;
mod onboarding_service;
mod transaction_service;

pub use account_ledger::AccountLedger;
pub use commission_service::CommissionService;
pub use deposit_service::{DepositService, DepositSettings};
pub use onboarding_service::OnboardingService;
pub use transaction_service::TransactionService;

use crate::models::Client;
use crate::{BankError, BankResult};

/// Admin-only listings share this check
pub(crate) fn require_admin(requester: &Client, action: &str) -> BankResult {
    if !requester.admin {
        log::warn!("Client {} is not allowed to {action}", requester.name);
        Err(BankError::PermissionDenied(format!(
            "client {:?} is not allowed to {action}",
            requester.name
        )))?
    }

    return Ok(());
}
