use crate::Rate;

/// Rate of a named product, e.g. "DEPOSIT"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommissionRate {
    pub product: String,
    pub rate: Rate,
}
