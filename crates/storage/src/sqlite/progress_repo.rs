use yodha_core::model::{ProgressRecord, UserId};

use super::{SqliteRepository, mapping::map_progress_row};
use crate::repository::{ProgressRepository, StorageError};

#[async_trait::async_trait]
impl ProgressRepository for SqliteRepository {
    async fn list_progress(&self, user_id: UserId) -> Result<Vec<ProgressRecord>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, question_id, is_completed, is_marked_for_revision,
                   created_at, updated_at
            FROM user_progress
            WHERE user_id = ?1
            ORDER BY created_at, id
            ",
        )
        .bind(user_id.value().to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        rows.iter().map(map_progress_row).collect()
    }
}

impl SqliteRepository {
    /// Record or update one user/question completion row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn upsert_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO user_progress (
                id, user_id, question_id, is_completed, is_marked_for_revision,
                created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(user_id, question_id) DO UPDATE SET
                is_completed = excluded.is_completed,
                is_marked_for_revision = excluded.is_marked_for_revision,
                updated_at = excluded.updated_at
            ",
        )
        .bind(record.id.to_string())
        .bind(record.user_id.value().to_string())
        .bind(record.question_id.value().to_string())
        .bind(record.is_completed)
        .bind(record.is_marked_for_revision)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}
