use tracing::info;

use super::connection::DbPool;

const CREATE_SCHEMA: &str = "CREATE SCHEMA IF NOT EXISTS money_contributions";

const CREATE_CONTRIBUTIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS money_contributions.contributions (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        amount NUMERIC NOT NULL CHECK (amount >= 0),
        cleared BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

/// Creates the schema and table when missing. Safe to run on every start.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_SCHEMA).execute(pool).await?;
    sqlx::query(CREATE_CONTRIBUTIONS).execute(pool).await?;
    info!("Contributions table is ready");
    Ok(())
}
