use yodha_core::model::{LearningPath, LearningPathId, Question, Topic, UserId};

use super::{
    SqliteRepository,
    mapping::{list_from_json, map_path_row, map_question_row, map_topic_row},
};
use crate::repository::{CatalogRepository, StorageError};

#[async_trait::async_trait]
impl CatalogRepository for SqliteRepository {
    async fn list_learning_paths(&self) -> Result<Vec<LearningPath>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, title, description, difficulty, sr, created_at, updated_at
            FROM learning_paths
            ORDER BY sr, created_at, id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        rows.iter().map(map_path_row).collect()
    }

    async fn list_topics(&self) -> Result<Vec<Topic>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, learning_path_id, name, created_at, updated_at
            FROM topics
            ORDER BY created_at, id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        rows.iter().map(map_topic_row).collect()
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, topic_id, title, difficulty, solution_link, practice_link,
                   created_at, updated_at
            FROM questions
            ORDER BY created_at, id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        rows.iter().map(map_question_row).collect()
    }

    async fn assigned_learning_paths(
        &self,
        user_id: UserId,
    ) -> Result<Option<Vec<LearningPathId>>, StorageError> {
        let row: Option<(Option<String>,)> =
            sqlx::query_as("SELECT assigned_learning_paths FROM users WHERE id = ?1")
                .bind(user_id.value().to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some((raw,)) => list_from_json(raw),
            None => Ok(None),
        }
    }
}

impl SqliteRepository {
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn upsert_learning_path(&self, path: &LearningPath) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO learning_paths (
                id, title, description, difficulty, sr, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                difficulty = excluded.difficulty,
                sr = excluded.sr,
                updated_at = excluded.updated_at
            ",
        )
        .bind(path.id.value().to_string())
        .bind(path.title.clone())
        .bind(path.description.clone())
        .bind(path.difficulty.clone())
        .bind(path.sr)
        .bind(path.created_at)
        .bind(path.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn upsert_topic(&self, topic: &Topic) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO topics (id, learning_path_id, name, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                learning_path_id = excluded.learning_path_id,
                name = excluded.name,
                updated_at = excluded.updated_at
            ",
        )
        .bind(topic.id.value().to_string())
        .bind(topic.learning_path_id.value().to_string())
        .bind(topic.name.clone())
        .bind(topic.created_at)
        .bind(topic.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn upsert_question(&self, question: &Question) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO questions (
                id, topic_id, title, difficulty, solution_link, practice_link,
                created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(id) DO UPDATE SET
                topic_id = excluded.topic_id,
                title = excluded.title,
                difficulty = excluded.difficulty,
                solution_link = excluded.solution_link,
                practice_link = excluded.practice_link,
                updated_at = excluded.updated_at
            ",
        )
        .bind(question.id.value().to_string())
        .bind(question.topic_id.value().to_string())
        .bind(question.title.clone())
        .bind(question.difficulty.clone())
        .bind(question.solution_link.clone())
        .bind(question.practice_link.clone())
        .bind(question.created_at)
        .bind(question.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}
