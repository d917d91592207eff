use crate::stores::CommissionStore;
use crate::{BankError, BankResult, Rate};

use std::sync::Arc;

/// Read-only view of the live commission rates
pub struct CommissionService {
    store: Arc<dyn CommissionStore>,
}

impl CommissionService {
    pub fn new(store: Arc<dyn CommissionStore>) -> Self {
        return Self { store };
    }

    pub fn rate_for(&self, product: &str) -> BankResult<Rate> {
        let rate = self
            .store
            .find_by_product(product)
            .ok_or_else(|| BankError::UnknownProduct(product.to_string()))?;

        log::debug!("Current {product} rate: {rate}");

        return Ok(rate);
    }
}
