// In crates/database/src/postgres.rs

use crate::{Error, Result, StateStore};
use app_config::types::StorageSettings;
use async_trait::async_trait;
use core_types::LedgerState;
use sqlx::types::Json;
use sqlx::{postgres::PgPoolOptions, PgPool};

/// A wrapper around the `sqlx` connection pool, addressing one ledger document.
#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
    collection: String,
    document: String,
}

/// Establishes a connection pool to the PostgreSQL database and runs migrations.
///
/// A missing URL is `Error::NotConfigured`; the caller decides whether to
/// carry on without persistence.
pub async fn connect(settings: &StorageSettings) -> Result<Db> {
    let url = settings
        .url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| Error::NotConfigured("storage.url is not set".to_string()))?;

    // Create a connection pool.
    let pool = PgPoolOptions::new().max_connections(5).connect(url).await?;

    // Run database migrations. This ensures the database schema is up-to-date.
    sqlx::migrate!("../../migrations").run(&pool).await.map_err(Error::from)?;

    Ok(Db {
        pool,
        collection: settings.collection.clone(),
        document: settings.document.clone(),
    })
}

#[async_trait]
impl StateStore for Db {
    fn name(&self) -> &'static str {
        "Postgres"
    }

    async fn fetch(&self) -> Result<Option<LedgerState>> {
        let row: Option<(Json<LedgerState>,)> =
            sqlx::query_as("SELECT body FROM documents WHERE collection = $1 AND name = $2")
                .bind(&self.collection)
                .bind(&self.document)
                .fetch_optional(&self.pool)
                .await
                .map_err(Error::OperationFailed)?;

        Ok(row.map(|(Json(state),)| state))
    }

    async fn store(&self, state: &LedgerState) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, name, body, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (collection, name)
            DO UPDATE SET body = EXCLUDED.body, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&self.collection)
        .bind(&self.document)
        .bind(Json(state))
        .execute(&self.pool)
        .await
        .map_err(Error::OperationFailed)?;

        Ok(())
    }
}
