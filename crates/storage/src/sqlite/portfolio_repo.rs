use yodha_core::model::{
    Assessment, BadgeType, Certificate, Project, Publication, Training, UserBadge, UserId,
    UserSkill, WorkExperience,
};

use super::{
    SqliteRepository,
    mapping::{
        list_to_json, map_assessment_row, map_badge_type_row, map_certificate_row,
        map_project_row, map_publication_row, map_skill_row, map_training_row,
        map_user_badge_row, map_work_row,
    },
};
use crate::repository::{PortfolioRepository, StorageError};

fn conn(e: sqlx::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait::async_trait]
impl PortfolioRepository for SqliteRepository {
    async fn trainings(&self, user_id: UserId) -> Result<Vec<Training>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, title, organization, description, start_date,
                   end_date, created_at, updated_at
            FROM trainings
            WHERE user_id = ?1
            ORDER BY start_date DESC, id
            ",
        )
        .bind(user_id.value().to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_training_row).collect()
    }

    async fn assessments(&self, user_id: UserId) -> Result<Vec<Assessment>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, title, provider, score, max_score,
                   assessment_date, certificate_url, created_at, updated_at
            FROM assessments
            WHERE user_id = ?1
            ORDER BY assessment_date DESC, id
            ",
        )
        .bind(user_id.value().to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_assessment_row).collect()
    }

    async fn certificates(&self, user_id: UserId) -> Result<Vec<Certificate>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, title, issuer, issue_date, expiry_date,
                   credential_url, created_at, updated_at
            FROM certificates
            WHERE user_id = ?1
            ORDER BY issue_date DESC, id
            ",
        )
        .bind(user_id.value().to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_certificate_row).collect()
    }

    async fn work_experience(
        &self,
        user_id: UserId,
    ) -> Result<Vec<WorkExperience>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, company, position, location, description,
                   technologies, start_date, end_date, created_at, updated_at
            FROM work_experience
            WHERE user_id = ?1
            ORDER BY start_date DESC, id
            ",
        )
        .bind(user_id.value().to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_work_row).collect()
    }

    async fn projects(&self, user_id: UserId) -> Result<Vec<Project>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, title, description, technologies, project_url,
                   image_url, start_date, end_date, created_at, updated_at
            FROM projects
            WHERE user_id = ?1
            ORDER BY start_date DESC, id
            ",
        )
        .bind(user_id.value().to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_project_row).collect()
    }

    async fn publications(&self, user_id: UserId) -> Result<Vec<Publication>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, title, authors, publication_name,
                   publication_date, doi, url, created_at, updated_at
            FROM publications
            WHERE user_id = ?1
            ORDER BY publication_date DESC, id
            ",
        )
        .bind(user_id.value().to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_publication_row).collect()
    }

    async fn skills(&self, user_id: UserId) -> Result<Vec<UserSkill>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, skill_name, created_at
            FROM user_skills
            WHERE user_id = ?1
            ORDER BY skill_name, id
            ",
        )
        .bind(user_id.value().to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_skill_row).collect()
    }

    async fn user_badges(&self, user_id: UserId) -> Result<Vec<UserBadge>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, badge_id, earned_at
            FROM user_badges
            WHERE user_id = ?1
            ORDER BY earned_at DESC, id
            ",
        )
        .bind(user_id.value().to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_user_badge_row).collect()
    }

    async fn badge_types(&self) -> Result<Vec<BadgeType>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, name, description, icon_name, background_color,
                   text_color, created_at
            FROM badge_types
            ORDER BY name, id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_badge_type_row).collect()
    }
}

// Seed-side writers. The admin surface itself never mutates these
// collections, so they stay off the repository traits.
impl SqliteRepository {
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn insert_training(&self, row: &Training) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO trainings (
                id, user_id, title, organization, description, start_date,
                end_date, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ",
        )
        .bind(row.id.to_string())
        .bind(row.user_id.value().to_string())
        .bind(row.title.clone())
        .bind(row.organization.clone())
        .bind(row.description.clone())
        .bind(row.start_date.clone())
        .bind(row.end_date.clone())
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn insert_assessment(&self, row: &Assessment) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO assessments (
                id, user_id, title, provider, score, max_score,
                assessment_date, certificate_url, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ",
        )
        .bind(row.id.to_string())
        .bind(row.user_id.value().to_string())
        .bind(row.title.clone())
        .bind(row.provider.clone())
        .bind(row.score.clone())
        .bind(row.max_score.clone())
        .bind(row.assessment_date.clone())
        .bind(row.certificate_url.clone())
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn insert_certificate(&self, row: &Certificate) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO certificates (
                id, user_id, title, issuer, issue_date, expiry_date,
                credential_url, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ",
        )
        .bind(row.id.to_string())
        .bind(row.user_id.value().to_string())
        .bind(row.title.clone())
        .bind(row.issuer.clone())
        .bind(row.issue_date.clone())
        .bind(row.expiry_date.clone())
        .bind(row.credential_url.clone())
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn insert_work_experience(
        &self,
        row: &WorkExperience,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO work_experience (
                id, user_id, company, position, location, description,
                technologies, start_date, end_date, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ",
        )
        .bind(row.id.to_string())
        .bind(row.user_id.value().to_string())
        .bind(row.company.clone())
        .bind(row.position.clone())
        .bind(row.location.clone())
        .bind(row.description.clone())
        .bind(list_to_json(row.technologies.as_ref())?)
        .bind(row.start_date.clone())
        .bind(row.end_date.clone())
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn insert_project(&self, row: &Project) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO projects (
                id, user_id, title, description, technologies, project_url,
                image_url, start_date, end_date, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ",
        )
        .bind(row.id.to_string())
        .bind(row.user_id.value().to_string())
        .bind(row.title.clone())
        .bind(row.description.clone())
        .bind(list_to_json(row.technologies.as_ref())?)
        .bind(row.project_url.clone())
        .bind(row.image_url.clone())
        .bind(row.start_date.clone())
        .bind(row.end_date.clone())
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn insert_publication(&self, row: &Publication) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO publications (
                id, user_id, title, authors, publication_name,
                publication_date, doi, url, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ",
        )
        .bind(row.id.to_string())
        .bind(row.user_id.value().to_string())
        .bind(row.title.clone())
        .bind(
            serde_json::to_string(&row.authors)
                .map_err(|e| StorageError::Serialization(e.to_string()))?,
        )
        .bind(row.publication_name.clone())
        .bind(row.publication_date.clone())
        .bind(row.doi.clone())
        .bind(row.url.clone())
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn insert_skill(&self, row: &UserSkill) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO user_skills (id, user_id, skill_name, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(row.id.to_string())
        .bind(row.user_id.value().to_string())
        .bind(row.skill_name.clone())
        .bind(row.created_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn insert_badge_type(&self, row: &BadgeType) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO badge_types (
                id, name, description, icon_name, background_color,
                text_color, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(row.id.value().to_string())
        .bind(row.name.clone())
        .bind(row.description.clone())
        .bind(row.icon_name.clone())
        .bind(row.background_color.clone())
        .bind(row.text_color.clone())
        .bind(row.created_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn insert_user_badge(&self, row: &UserBadge) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO user_badges (id, user_id, badge_id, earned_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(row.id.to_string())
        .bind(row.user_id.value().to_string())
        .bind(row.badge_id.value().to_string())
        .bind(row.earned_at.clone())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }
}
