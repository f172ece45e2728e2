use async_trait::async_trait;

use super::ContributionStore;
use crate::database::connection::DbPool;
use crate::models::contribution::{
    Contribution, ContributionChanges, ContributionError, NewContribution,
};

#[derive(Debug, Clone)]
pub struct PgContributionStore {
    pool: DbPool,
}

impl PgContributionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContributionStore for PgContributionStore {
    async fn list(&self) -> Result<Vec<Contribution>, ContributionError> {
        let contributions = sqlx::query_as::<_, Contribution>(
            "SELECT id, name, amount, cleared
             FROM money_contributions.contributions
             ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(contributions)
    }

    async fn insert(&self, contribution: NewContribution) -> Result<Contribution, ContributionError> {
        let contribution = sqlx::query_as::<_, Contribution>(
            "INSERT INTO money_contributions.contributions (name, amount, cleared)
             VALUES ($1, $2, $3)
             RETURNING id, name, amount, cleared",
        )
        .bind(contribution.name)
        .bind(contribution.amount)
        .bind(contribution.cleared)
        .fetch_one(&self.pool)
        .await?;

        Ok(contribution)
    }

    async fn update(
        &self,
        id: i32,
        changes: ContributionChanges,
    ) -> Result<Option<Contribution>, ContributionError> {
        if changes.is_empty() {
            return Err(ContributionError::NoUpdateFields);
        }

        let updated = sqlx::query_as::<_, Contribution>(
            r#"
            UPDATE money_contributions.contributions
            SET
                name = COALESCE($2, name),
                amount = COALESCE($3, amount),
                cleared = COALESCE($4, cleared)
            WHERE id = $1
            RETURNING id, name, amount, cleared
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.amount)
        .bind(changes.cleared)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<u64, ContributionError> {
        let result = sqlx::query("DELETE FROM money_contributions.contributions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
