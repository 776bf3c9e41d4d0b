use chrono::Utc;
use yodha_core::model::Account;

use super::{SqliteRepository, mapping::ser};
use crate::repository::{SessionRepository, StorageError};

/// There is one session slot per database; the key never varies.
const SESSION_KEY: &str = "admin_session";

#[async_trait::async_trait]
impl SessionRepository for SqliteRepository {
    async fn load_session(&self) -> Result<Option<Account>, StorageError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT payload FROM session WHERE key = ?1")
                .bind(SESSION_KEY)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.map(|(payload,)| serde_json::from_str(&payload).map_err(ser))
            .transpose()
    }

    async fn store_session(&self, account: &Account) -> Result<(), StorageError> {
        let payload = serde_json::to_string(account).map_err(ser)?;

        sqlx::query(
            r"
            INSERT INTO session (key, payload, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            ",
        )
        .bind(SESSION_KEY)
        .bind(payload)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn clear_session(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM session WHERE key = ?1")
            .bind(SESSION_KEY)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}
