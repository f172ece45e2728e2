use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContributionError {
    #[error("{0}")]
    Validation(String),
    #[error("No valid fields provided to update")]
    NoUpdateFields,
    #[error("Missing contributor id")]
    MissingId,
    #[error("Contributor not found")]
    NotFound { id: String },
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A single pledge or payment toward the fundraising goal.
///
/// `created_at` lives in the table for provenance only and is never selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Contribution {
    pub id: i32,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub cleared: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContribution {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub cleared: bool,
}

/// Sparse set of fields for a partial update. `None` leaves the column as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContributionChanges {
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub cleared: Option<bool>,
}

impl ContributionChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.amount.is_none() && self.cleared.is_none()
    }

    pub fn apply_to(&self, contribution: &mut Contribution) {
        if let Some(name) = &self.name {
            contribution.name = name.clone();
        }
        if let Some(amount) = self.amount {
            contribution.amount = amount;
        }
        if let Some(cleared) = self.cleared {
            contribution.cleared = cleared;
        }
    }
}
