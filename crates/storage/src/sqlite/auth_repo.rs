use yodha_core::model::Account;

use super::{SqliteRepository, mapping::map_account_row};
use crate::repository::{AuthRepository, StorageError};

#[async_trait::async_trait]
impl AuthRepository for SqliteRepository {
    async fn authenticate(
        &self,
        prn: &str,
        password: &str,
    ) -> Result<Option<Account>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, username, prn, email, department, course, grad_year
            FROM users
            WHERE prn = ?1 AND password = ?2
            ",
        )
        .bind(prn.to_owned())
        .bind(password.to_owned())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_account_row).transpose()
    }
}
