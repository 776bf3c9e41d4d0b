use yodha_core::model::{Profile, UserId};

use super::{
    SqliteRepository,
    mapping::{list_to_json, map_profile_row},
};
use crate::repository::{ProfileRepository, StorageError};

const PROFILE_COLUMNS: &str = r"
    u.id, p.real_name, u.username, u.email, u.prn, p.bio, p.college_name,
    p.location, p.profile_picture_url, p.linkedin_url, p.github_url,
    p.leetcode_url, p.hackerrank_url, p.gfg_url, p.cgpa, u.grad_year,
    u.department, u.course, p.active, u.assigned_learning_paths,
    u.created_at, u.updated_at
";

#[async_trait::async_trait]
impl ProfileRepository for SqliteRepository {
    async fn list_profiles(&self) -> Result<Vec<Profile>, StorageError> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {PROFILE_COLUMNS}
            FROM users u
            JOIN profiles p ON p.id = u.id
            ORDER BY u.created_at, u.id
            ",
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        rows.iter().map(map_profile_row).collect()
    }

    async fn get_profile(&self, id: UserId) -> Result<Option<Profile>, StorageError> {
        let row = sqlx::query(&format!(
            r"
            SELECT {PROFILE_COLUMNS}
            FROM users u
            JOIN profiles p ON p.id = u.id
            WHERE u.id = ?1
            ",
        ))
        .bind(id.value().to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_profile_row).transpose()
    }
}

impl SqliteRepository {
    /// Write a user record and its profile row, replacing existing values.
    ///
    /// The password is stored alongside the account columns so that
    /// credential checks stay a single lookup.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if either write fails.
    pub async fn upsert_profile(
        &self,
        profile: &Profile,
        password: &str,
    ) -> Result<(), StorageError> {
        let assigned = list_to_json(profile.assigned_learning_paths.as_ref())?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO users (
                id, username, prn, email, password, department, course,
                grad_year, assigned_learning_paths, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ON CONFLICT(id) DO UPDATE SET
                username = excluded.username,
                prn = excluded.prn,
                email = excluded.email,
                password = excluded.password,
                department = excluded.department,
                course = excluded.course,
                grad_year = excluded.grad_year,
                assigned_learning_paths = excluded.assigned_learning_paths,
                updated_at = excluded.updated_at
            ",
        )
        .bind(profile.id.value().to_string())
        .bind(profile.username.clone())
        .bind(profile.prn.clone())
        .bind(profile.email.clone())
        .bind(password.to_owned())
        .bind(profile.department.clone())
        .bind(profile.course.clone())
        .bind(profile.grad_year)
        .bind(assigned)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO profiles (
                id, real_name, bio, college_name, location, profile_picture_url,
                linkedin_url, github_url, leetcode_url, hackerrank_url, gfg_url,
                cgpa, active, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            ON CONFLICT(id) DO UPDATE SET
                real_name = excluded.real_name,
                bio = excluded.bio,
                college_name = excluded.college_name,
                location = excluded.location,
                profile_picture_url = excluded.profile_picture_url,
                linkedin_url = excluded.linkedin_url,
                github_url = excluded.github_url,
                leetcode_url = excluded.leetcode_url,
                hackerrank_url = excluded.hackerrank_url,
                gfg_url = excluded.gfg_url,
                cgpa = excluded.cgpa,
                active = excluded.active,
                updated_at = excluded.updated_at
            ",
        )
        .bind(profile.id.value().to_string())
        .bind(profile.real_name.clone())
        .bind(profile.bio.clone())
        .bind(profile.college_name.clone())
        .bind(profile.location.clone())
        .bind(profile.profile_picture_url.clone())
        .bind(profile.linkedin_url.clone())
        .bind(profile.github_url.clone())
        .bind(profile.leetcode_url.clone())
        .bind(profile.hackerrank_url.clone())
        .bind(profile.gfg_url.clone())
        .bind(profile.cgpa)
        .bind(profile.active)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}
