use crate::ids::{AccountId, ClientId, DepositId};
use crate::money::SCALE;
use crate::{BankError, BankResult, Money, MoneyError, Rate};

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Months, Utc};

use serde::Deserialize;

const MONTHS_PER_YEAR: i128 = 12;
const PERCENT: i128 = 100;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum DepositType {
    /// Simple interest at the snapshot rate for the whole duration
    #[serde(alias = "fixed")]
    Fixed,
    /// Simple interest whose annual rate steps up once per completed year of duration
    #[serde(alias = "progressive")]
    Progressive,
}

impl DepositType {
    /// Total payout at maturity: principal plus interest.
    ///
    /// Month `m` (1-based) of a progressive deposit earns `rate + step * floor((m - 1) / 12)`
    /// percent per year, so the payout never decreases as the duration grows. Interest is
    /// rounded half-up to the smallest money unit.
    pub fn return_on_investment(
        &self,
        principal: Money,
        rate: Rate,
        duration_months: u32,
        progressive_step: Rate,
    ) -> Result<Money, MoneyError> {
        let overflow = || MoneyError::Overflow("interest", principal, Money::MAX);

        let months = i128::from(duration_months);
        let rate = i128::from(rate.0);

        // sum of the annual rate applied to every month, in rate units
        let rate_months = match self {
            Self::Fixed => rate.checked_mul(months),
            Self::Progressive => {
                let years = months / MONTHS_PER_YEAR;
                let remainder = months % MONTHS_PER_YEAR;
                let completed_years = years
                    .checked_mul((years - 1).max(0))
                    .and_then(|pairs| pairs.checked_mul(MONTHS_PER_YEAR / 2))
                    .and_then(|full| full.checked_add(remainder * years));

                completed_years
                    .and_then(|completed| i128::from(progressive_step.0).checked_mul(completed))
                    .zip(rate.checked_mul(months))
                    .and_then(|(steps, base)| base.checked_add(steps))
            }
        }
        .ok_or_else(overflow)?;

        let numerator = i128::from(principal.0)
            .checked_mul(rate_months)
            .ok_or_else(overflow)?;
        let denominator = PERCENT * i128::from(SCALE) * MONTHS_PER_YEAR;
        let interest = numerator
            .checked_add(denominator / 2)
            .ok_or_else(overflow)?
            / denominator;

        let interest = i64::try_from(interest)
            .map(Money)
            .map_err(|_| overflow())?;

        let mut payout = principal;
        payout.add(&interest)?;

        return Ok(payout);
    }
}

impl fmt::Display for DepositType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return match self {
            Self::Fixed => write!(f, "FIXED"),
            Self::Progressive => write!(f, "PROGRESSIVE"),
        };
    }
}

impl FromStr for DepositType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        return match s.trim().to_ascii_uppercase().as_str() {
            "FIXED" => Ok(Self::Fixed),
            "PROGRESSIVE" => Ok(Self::Progressive),
            other => Err(format!("There is no type of deposit as {other}")),
        };
    }
}

/// ACTIVE -> WITHDRAWN, exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepositState {
    Active,
    Withdrawn { at: DateTime<Utc> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deposit {
    pub id: DepositId,
    pub client: ClientId,
    pub account: AccountId,
    pub deposit_type: DepositType,
    pub principal: Money,
    pub duration_months: u32,
    /// Commission rate at the time the deposit was opened
    pub rate: Rate,
    pub created_at: DateTime<Utc>,
    pub return_on_investment: Money,
    state: DepositState,
}

impl Deposit {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: DepositId,
        client: ClientId,
        account: AccountId,
        deposit_type: DepositType,
        principal: Money,
        duration_months: u32,
        rate: Rate,
        created_at: DateTime<Utc>,
        return_on_investment: Money,
    ) -> Self {
        return Self {
            id,
            client,
            account,
            deposit_type,
            principal,
            duration_months,
            rate,
            created_at,
            return_on_investment,
            state: DepositState::Active,
        };
    }

    pub fn state(&self) -> DepositState {
        return self.state;
    }

    pub fn is_active(&self) -> bool {
        return self.state == DepositState::Active;
    }

    pub fn withdrawn_at(&self) -> Option<DateTime<Utc>> {
        return match self.state {
            DepositState::Active => None,
            DepositState::Withdrawn { at } => Some(at),
        };
    }

    /// The instant `created_at + duration_months`, clamped to the end of shorter months
    pub fn maturity(&self) -> DateTime<Utc> {
        return self
            .created_at
            .checked_add_months(Months::new(self.duration_months))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
    }

    pub(crate) fn mark_withdrawn(&mut self, at: DateTime<Utc>) -> BankResult {
        if let DepositState::Withdrawn { at } = self.state {
            Err(BankError::AlreadyWithdrawn { at })?
        }

        self.state = DepositState::Withdrawn { at };

        return Ok(());
    }
}
