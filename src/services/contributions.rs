use std::sync::Arc;

use tracing::info;

use crate::models::contribution::{Contribution, ContributionError};
use crate::repository::ContributionStore;
use crate::requests::contribution::{CreateContributionRequest, UpdateContributionRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::List => "list contributors",
            Operation::Create => "create contributor",
            Operation::Update => "update contributor",
            Operation::Delete => "delete contributor",
        }
    }

    /// Opaque message returned to callers on storage failures.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "Failed to fetch contributors",
            Operation::Create => "Failed to create contributor",
            Operation::Update => "Failed to update contributor",
            Operation::Delete => "Failed to delete contributor",
        }
    }
}

/// The contributor contract, shared by the HTTP server and the function host.
#[derive(Clone)]
pub struct ContributionService {
    store: Arc<dyn ContributionStore>,
}

impl ContributionService {
    pub fn new(store: Arc<dyn ContributionStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Contribution>, ContributionError> {
        self.store.list().await
    }

    pub async fn create(
        &self,
        request: CreateContributionRequest,
    ) -> Result<Contribution, ContributionError> {
        let contribution = request.validate()?;
        let created = self.store.insert(contribution).await?;
        info!("Created contributor {} ({})", created.id, created.name);
        Ok(created)
    }

    pub async fn update(
        &self,
        raw_id: &str,
        request: UpdateContributionRequest,
    ) -> Result<Contribution, ContributionError> {
        require_id(raw_id)?;
        let changes = request.validate()?;
        let id = parse_id(raw_id)?;

        let updated = self
            .store
            .update(id, changes)
            .await?
            .ok_or_else(|| ContributionError::NotFound {
                id: raw_id.to_string(),
            })?;
        info!("Updated contributor {}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, raw_id: &str) -> Result<(), ContributionError> {
        require_id(raw_id)?;
        let id = parse_id(raw_id)?;

        if self.store.delete(id).await? == 0 {
            return Err(ContributionError::NotFound {
                id: raw_id.to_string(),
            });
        }
        info!("Deleted contributor {}", id);
        Ok(())
    }
}

fn require_id(raw_id: &str) -> Result<(), ContributionError> {
    if raw_id.trim().is_empty() {
        return Err(ContributionError::MissingId);
    }
    Ok(())
}

/// Ids are positive serials; anything else cannot match a row.
fn parse_id(raw_id: &str) -> Result<i32, ContributionError> {
    match raw_id.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ContributionError::NotFound {
            id: raw_id.to_string(),
        }),
    }
}
