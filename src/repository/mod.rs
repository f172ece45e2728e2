use async_trait::async_trait;

use crate::models::contribution::{
    Contribution, ContributionChanges, ContributionError, NewContribution,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryContributionStore;
pub use postgres::PgContributionStore;

/// Storage seam for contribution records.
///
/// Every mutation touches a single row by primary key, so implementations
/// need no coordination beyond what the backing store already provides.
#[async_trait]
pub trait ContributionStore: Send + Sync {
    /// All records, newest (highest id) first.
    async fn list(&self) -> Result<Vec<Contribution>, ContributionError>;

    async fn insert(&self, contribution: NewContribution) -> Result<Contribution, ContributionError>;

    /// Returns `None` when no record has this id.
    async fn update(
        &self,
        id: i32,
        changes: ContributionChanges,
    ) -> Result<Option<Contribution>, ContributionError>;

    /// Returns the number of removed rows (0 or 1).
    async fn delete(&self, id: i32) -> Result<u64, ContributionError>;
}
