use crate::commands::Command;
use crate::identity::IdentityResolver;
use crate::ids::AccountId;
use crate::models::DepositType;
use crate::{Money, Rate, Result};

use chrono::{DateTime, Utc};

use serde::Deserialize;

use thiserror::Error;

/// Represents an input row that a CSV record would deserialize into
#[derive(Deserialize, Debug, Clone, Default)]
pub struct InputCommand {
    #[serde(rename = "type")]
    pub typ: InputCommandType,

    /// Name of the authenticated client sending the request
    pub client: Option<String>,
    /// When the request is made, the clock keeps its previous time when empty
    pub at: Option<DateTime<Utc>>,

    pub name: Option<String>,
    pub secret: Option<String>,
    pub admin: Option<bool>,
    pub account: Option<u32>,
    pub to: Option<u32>,
    pub amount: Option<String>,
    pub duration: Option<u32>,
    pub deposit: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InputCommandType {
    #[default]
    Register,
    Reserve,
    Fund,
    Transfer,
    Open,
    Withdraw,
    Rate,
}

#[derive(Error, Debug)]
pub enum InputParseError {
    #[error("Error parsing input command: {0} value missing: {1:?}")]
    MissingValue(&'static str, InputCommand),

    #[error("Error parsing input command: {0}: {1:?}")]
    InvalidDepositType(String, InputCommand),
}

impl InputCommand {
    pub fn parse_command(self) -> Result<Command> {
        let command = match self.typ {
            InputCommandType::Register => Command::Register {
                name: self.required("name", &self.name)?,
                credential: self.secret.clone().unwrap_or_default(),
                admin: self.admin.unwrap_or(false),
            },
            InputCommandType::Reserve => Command::OpenReserve {
                number: self.required("name", &self.name)?,
            },
            InputCommandType::Fund => Command::Fund {
                account: AccountId(self.required("account", &self.account)?),
                amount: self.amount()?,
            },
            InputCommandType::Transfer => Command::Transfer {
                from: AccountId(self.required("account", &self.account)?),
                to: AccountId(self.required("to", &self.to)?),
                amount: self.amount()?,
            },
            InputCommandType::Open => Command::OpenDeposit {
                principal: self.amount()?,
                duration_months: self.required("duration", &self.duration)?,
                deposit_type: self.deposit_type()?,
            },
            InputCommandType::Withdraw => Command::Withdraw {
                deposit_type: self.deposit_type()?,
            },
            InputCommandType::Rate => Command::SetRate {
                product: self.required("name", &self.name)?,
                rate: Rate::parse(&self.required("amount", &self.amount)?)?,
            },
        };

        return Ok(command);
    }

    fn required<T: Clone>(&self, field: &'static str, value: &Option<T>) -> Result<T> {
        let value = value
            .clone()
            .ok_or_else(|| InputParseError::MissingValue(field, self.clone()))?;

        return Ok(value);
    }

    fn amount(&self) -> Result<Money> {
        let amount = self.required("amount", &self.amount)?;
        return Ok(Money::parse(&amount)?);
    }

    fn deposit_type(&self) -> Result<DepositType> {
        let deposit = self.required("deposit", &self.deposit)?;

        let deposit_type = deposit
            .parse()
            .map_err(|e| InputParseError::InvalidDepositType(e, self.clone()))?;

        return Ok(deposit_type);
    }
}

/// The `client` column of a row stands for whoever the authentication layer let through
#[derive(Debug, Default, Clone, Copy)]
pub struct RowIdentity;

impl IdentityResolver for RowIdentity {
    type Context = InputCommand;

    fn authenticated_name(&self, context: &InputCommand) -> Option<String> {
        return context.client.clone().filter(|name| !name.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_input(typ: InputCommandType) -> InputCommand {
        InputCommand {
            typ,
            client: Some("alice".to_string()),
            ..InputCommand::default()
        }
    }

    #[test]
    fn parse_transfer() {
        let input = InputCommand {
            account: Some(2),
            to: Some(3),
            amount: Some("10.5".to_string()),
            ..build_input(InputCommandType::Transfer)
        };

        assert_eq!(
            input.parse_command().unwrap(),
            Command::Transfer {
                from: AccountId(2),
                to: AccountId(3),
                amount: Money(105_000),
            }
        );
    }

    #[test]
    fn parse_open_deposit() {
        let input = InputCommand {
            amount: Some("1000".to_string()),
            duration: Some(12),
            deposit: Some("fixed".to_string()),
            ..build_input(InputCommandType::Open)
        };

        assert_eq!(
            input.parse_command().unwrap(),
            Command::OpenDeposit {
                principal: Money::whole(1000),
                duration_months: 12,
                deposit_type: DepositType::Fixed,
            }
        );
    }

    #[test]
    fn parse_register_defaults() {
        let input = InputCommand {
            name: Some("bob".to_string()),
            ..build_input(InputCommandType::Register)
        };

        assert_eq!(
            input.parse_command().unwrap(),
            Command::Register {
                name: "bob".to_string(),
                credential: String::new(),
                admin: false,
            }
        );
    }

    #[test]
    fn parse_missing_values() {
        assert!(build_input(InputCommandType::Fund).parse_command().is_err());
        assert!(build_input(InputCommandType::Withdraw).parse_command().is_err());
        assert!(build_input(InputCommandType::Rate).parse_command().is_err());
    }

    #[test]
    fn parse_unknown_deposit_type() {
        let input = InputCommand {
            deposit: Some("compound".to_string()),
            ..build_input(InputCommandType::Withdraw)
        };

        let error = input.parse_command().unwrap_err();
        assert!(error.downcast_ref::<InputParseError>().is_some());
    }

    #[test]
    fn row_identity() {
        let input = build_input(InputCommandType::Withdraw);
        assert_eq!(RowIdentity.authenticated_name(&input), Some("alice".to_string()));

        let anonymous = InputCommand {
            client: Some(String::new()),
            ..input
        };
        assert_eq!(RowIdentity.authenticated_name(&anonymous), None);
    }
}
