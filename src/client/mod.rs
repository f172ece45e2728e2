//! HTTP client for the contributor API with a local copy of the list.
//!
//! The local list is only changed after the server confirms a mutation. It
//! is not kept in sync with writes made by other clients.

use reqwest::{Client, Response, StatusCode};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

use crate::metrics::{FundraisingTargets, Summary, remaining_to_target};
use crate::models::contribution::{Contribution, NewContribution};
use crate::utils::helpers::ErrorResponse;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server responded with {status}: {message}")]
    Status { status: StatusCode, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Load,
    Add,
    Update,
    Delete,
}

impl FailureKind {
    pub fn message(self) -> &'static str {
        match self {
            FailureKind::Load => "Could not load contributors from the database.",
            FailureKind::Add => "Could not add contributor. Please try again.",
            FailureKind::Update => "Could not update contributor. Please try again.",
            FailureKind::Delete => "Could not delete contributor. Please try again.",
        }
    }
}

/// The most recent failure, without any of the underlying error detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBanner {
    pub kind: FailureKind,
}

impl StatusBanner {
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContributionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleared: Option<bool>,
}

impl ContributionPatch {
    pub fn amount(amount: Decimal) -> Self {
        Self {
            amount: Some(amount),
            ..Default::default()
        }
    }

    pub fn cleared(cleared: bool) -> Self {
        Self {
            cleared: Some(cleared),
            ..Default::default()
        }
    }
}

pub struct ContributorClient {
    http: Client,
    base_url: String,
    targets: FundraisingTargets,
    contributors: Vec<Contribution>,
    status: Option<StatusBanner>,
}

impl ContributorClient {
    pub fn new(base_url: impl Into<String>, targets: FundraisingTargets) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            targets,
            contributors: Vec::new(),
            status: None,
        }
    }

    pub fn contributors(&self) -> &[Contribution] {
        &self.contributors
    }

    pub fn status(&self) -> Option<&StatusBanner> {
        self.status.as_ref()
    }

    pub fn targets(&self) -> &FundraisingTargets {
        &self.targets
    }

    pub fn summary(&self) -> Summary {
        Summary::compute(&self.contributors, &self.targets)
    }

    pub fn remaining_for(&self, contribution: &Contribution) -> Decimal {
        remaining_to_target(contribution, self.targets.per_person_target)
    }

    fn collection_url(&self) -> String {
        format!("{}/api/contributors", self.base_url)
    }

    fn item_url(&self, id: i32) -> String {
        format!("{}/api/contributors/{}", self.base_url, id)
    }

    /// Replaces the local list with the server's.
    pub async fn fetch_contributors(&mut self) -> Result<&[Contribution], ClientError> {
        let result = async {
            let response = self.http.get(self.collection_url()).send().await?;
            Ok::<_, ClientError>(expect_success(response).await?.json::<Vec<Contribution>>().await?)
        }
        .await;

        let contributors = self.settle(FailureKind::Load, result)?;
        info!("Loaded {} contributors", contributors.len());
        self.contributors = contributors;
        Ok(&self.contributors)
    }

    pub async fn add_contributor(
        &mut self,
        name: &str,
        amount: Decimal,
        cleared: bool,
    ) -> Result<Contribution, ClientError> {
        let body = NewContribution {
            name: name.to_string(),
            amount,
            cleared,
        };
        let result = async {
            let response = self.http.post(self.collection_url()).json(&body).send().await?;
            Ok::<_, ClientError>(expect_success(response).await?.json::<Contribution>().await?)
        }
        .await;

        let created = self.settle(FailureKind::Add, result)?;
        self.contributors.insert(0, created.clone());
        Ok(created)
    }

    pub async fn update_contributor(
        &mut self,
        id: i32,
        patch: &ContributionPatch,
    ) -> Result<Contribution, ClientError> {
        let result = async {
            let response = self.http.patch(self.item_url(id)).json(patch).send().await?;
            Ok::<_, ClientError>(expect_success(response).await?.json::<Contribution>().await?)
        }
        .await;

        let updated = self.settle(FailureKind::Update, result)?;
        if let Some(existing) = self.contributors.iter_mut().find(|c| c.id == id) {
            *existing = updated.clone();
        }
        Ok(updated)
    }

    pub async fn delete_contributor(&mut self, id: i32) -> Result<(), ClientError> {
        let result = async {
            let response = self.http.delete(self.item_url(id)).send().await?;
            expect_success(response).await?;
            Ok::<_, ClientError>(())
        }
        .await;

        self.settle(FailureKind::Delete, result)?;
        self.contributors.retain(|c| c.id != id);
        Ok(())
    }

    fn settle<T>(&mut self, kind: FailureKind, result: Result<T, ClientError>) -> Result<T, ClientError> {
        match result {
            Ok(value) => {
                self.status = None;
                Ok(value)
            }
            Err(e) => {
                error!("{}: {}", kind.message(), e);
                self.status = Some(StatusBanner { kind });
                Err(e)
            }
        }
    }
}

async fn expect_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorResponse>()
        .await
        .map(|body| body.error)
        .unwrap_or_else(|_| status.to_string());
    Err(ClientError::Status { status, message })
}
