use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::ContributionStore;
use crate::models::contribution::{
    Contribution, ContributionChanges, ContributionError, NewContribution,
};

/// Process-local store used by tests and database-less local runs.
#[derive(Debug, Default)]
pub struct MemoryContributionStore {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i32,
    rows: BTreeMap<i32, Contribution>,
}

impl MemoryContributionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContributionStore for MemoryContributionStore {
    async fn list(&self) -> Result<Vec<Contribution>, ContributionError> {
        let state = self.state.lock().await;
        Ok(state.rows.values().rev().cloned().collect())
    }

    async fn insert(&self, contribution: NewContribution) -> Result<Contribution, ContributionError> {
        let mut state = self.state.lock().await;
        // ids are never reused, even after the newest row is deleted
        state.last_id += 1;
        let created = Contribution {
            id: state.last_id,
            name: contribution.name,
            amount: contribution.amount,
            cleared: contribution.cleared,
        };
        state.rows.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: i32,
        changes: ContributionChanges,
    ) -> Result<Option<Contribution>, ContributionError> {
        if changes.is_empty() {
            return Err(ContributionError::NoUpdateFields);
        }

        let mut state = self.state.lock().await;
        Ok(state.rows.get_mut(&id).map(|row| {
            changes.apply_to(row);
            row.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<u64, ContributionError> {
        let mut state = self.state.lock().await;
        Ok(u64::from(state.rows.remove(&id).is_some()))
    }
}
