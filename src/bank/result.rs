use crate::BankError;

/// Convenience type to make error mapping cleaner in the application layer
pub type Result<T = ()> = anyhow::Result<T>;

/// Result of a core ledger or deposit operation
pub type BankResult<T = ()> = std::result::Result<T, BankError>;
