use crate::DbError;
use crate::store::{STATUS_LIST_LIMIT, StatusCheck, StatusCheckStore};
use async_trait::async_trait;
use sqlx::postgres::PgPool;

/// PostgreSQL-backed status check store.
#[derive(Debug, Clone)]
pub struct PgStatusCheckStore {
    pool: PgPool,
}

impl PgStatusCheckStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatusCheckStore for PgStatusCheckStore {
    async fn insert(&self, check: &StatusCheck) -> Result<(), DbError> {
        sqlx::query(r#"INSERT INTO status_checks (id, client_name, "timestamp") VALUES ($1, $2, $3)"#)
            .bind(check.id)
            .bind(&check.client_name)
            .bind(check.timestamp)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<StatusCheck>, DbError> {
        let checks = sqlx::query_as::<_, StatusCheck>(
            r#"
            SELECT id, client_name, "timestamp"
            FROM status_checks
            ORDER BY "timestamp" ASC
            LIMIT $1
            "#,
        )
        .bind(STATUS_LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        Ok(checks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn unreachable_database_surfaces_a_store_error() {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy("postgres://postgres@127.0.0.1:1/status")
            .unwrap();
        let store: Arc<dyn StatusCheckStore> = Arc::new(PgStatusCheckStore::new(pool));

        let inserted = store.insert(&StatusCheck::new("dashboard")).await;
        assert!(matches!(inserted, Err(DbError::ConnectionError(_))));
        assert!(matches!(store.list().await, Err(DbError::ConnectionError(_))));
    }
}
