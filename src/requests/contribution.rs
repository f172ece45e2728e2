use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::models::contribution::{ContributionChanges, ContributionError, NewContribution};

const CREATE_INVALID: &str = "Name and a valid amount are required";
const AMOUNT_INVALID: &str = "Amount must be a positive number";

// Fields stay loosely typed so that a wrong type is reported as a
// validation failure instead of a body parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateContributionRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub cleared: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateContributionRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub cleared: Option<Value>,
}

impl CreateContributionRequest {
    pub fn validate(self) -> Result<NewContribution, ContributionError> {
        let name = self
            .name
            .as_ref()
            .and_then(trimmed_name)
            .ok_or_else(|| ContributionError::Validation(CREATE_INVALID.to_string()))?;
        let amount = self
            .amount
            .as_ref()
            .and_then(parse_amount)
            .ok_or_else(|| ContributionError::Validation(CREATE_INVALID.to_string()))?;
        let cleared = self.cleared.as_ref().is_some_and(coerce_flag);

        Ok(NewContribution {
            name,
            amount,
            cleared,
        })
    }
}

impl UpdateContributionRequest {
    /// A blank or non-string name is dropped rather than rejected; a bad
    /// amount is always rejected.
    pub fn validate(self) -> Result<ContributionChanges, ContributionError> {
        let name = self.name.as_ref().and_then(trimmed_name);
        let amount = match self.amount.as_ref() {
            Some(raw) => Some(
                parse_amount(raw)
                    .ok_or_else(|| ContributionError::Validation(AMOUNT_INVALID.to_string()))?,
            ),
            None => None,
        };
        let cleared = self.cleared.as_ref().map(coerce_flag);

        let changes = ContributionChanges {
            name,
            amount,
            cleared,
        };
        if changes.is_empty() {
            return Err(ContributionError::NoUpdateFields);
        }
        Ok(changes)
    }
}

fn trimmed_name(value: &Value) -> Option<String> {
    let trimmed = value.as_str()?.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Accepts JSON numbers and numeric strings; rejects negatives.
pub fn parse_amount(value: &Value) -> Option<Decimal> {
    let amount = match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Decimal::from(int)
            } else if let Some(uint) = number.as_u64() {
                Decimal::from(uint)
            } else {
                Decimal::try_from(number.as_f64()?).ok()?
            }
        }
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Decimal::from_str(text)
                .or_else(|_| Decimal::from_scientific(text))
                .ok()?
        }
        _ => return None,
    };

    (amount >= Decimal::ZERO).then(|| amount.normalize())
}

pub fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !matches!(text.trim(), "" | "false" | "0"),
        Value::Array(_) | Value::Object(_) => true,
    }
}
