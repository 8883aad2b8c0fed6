use crate::error::DbError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Most status checks returned by a single listing.
pub const STATUS_LIST_LIMIT: i64 = 1000;

/// A recorded client ping.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: Uuid,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

/// Body of `POST /api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

impl StatusCheck {
    /// Stamps a new check with a random v4 id and the current UTC time.
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_name: client_name.into(),
            timestamp: Utc::now(),
        }
    }
}

impl From<StatusCheckCreate> for StatusCheck {
    fn from(input: StatusCheckCreate) -> Self {
        Self::new(input.client_name)
    }
}

/// Persistence for status checks.
#[async_trait]
pub trait StatusCheckStore: Send + Sync {
    async fn insert(&self, check: &StatusCheck) -> Result<(), DbError>;

    /// Up to `STATUS_LIST_LIMIT` checks, oldest first.
    async fn list(&self) -> Result<Vec<StatusCheck>, DbError>;
}
