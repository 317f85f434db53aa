//! PostgreSQL implementation of LedgerReader.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::rows::{LedgerRow, LEDGER_COLUMNS};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::ledger::PawPointTransaction;
use crate::ports::{CachedBalance, LedgerReader};

pub struct PostgresLedgerReader {
    pool: PgPool,
}

impl PostgresLedgerReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerReader for PostgresLedgerReader {
    async fn entries_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PawPointTransaction>, DomainError> {
        let rows: Vec<LedgerRow> = sqlx::query_as(&format!(
            "SELECT {} FROM paw_point_transactions WHERE user_id = $1 ORDER BY seq",
            LEDGER_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load ledger entries", e))?;

        rows.into_iter().map(PawPointTransaction::try_from).collect()
    }

    async fn cached_balances(&self) -> Result<Vec<CachedBalance>, DomainError> {
        let rows: Vec<(Uuid, i64)> =
            sqlx::query_as("SELECT id, paw_points FROM users ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to load balances", e))?;

        Ok(rows
            .into_iter()
            .map(|(id, paw_points)| CachedBalance {
                user_id: UserId::from_uuid(id),
                paw_points,
            })
            .collect())
    }
}
