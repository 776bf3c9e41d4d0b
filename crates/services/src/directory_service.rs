use std::sync::Arc;

use yodha_core::model::User;
use yodha_core::roster::{FilterSpec, SortSpec, apply_filter_and_sort};

use storage::repository::ProfileRepository;

use crate::error::DirectoryError;

/// Fetches the full roster and applies the filter/sort engine.
#[derive(Clone)]
pub struct DirectoryService {
    profiles: Arc<dyn ProfileRepository>,
}

impl DirectoryService {
    #[must_use]
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// All users, mapped for display, in store order.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Storage` if the fetch fails.
    pub async fn list_users(&self) -> Result<Vec<User>, DirectoryError> {
        let profiles = self.profiles.list_profiles().await?;
        Ok(profiles.iter().map(User::from_profile).collect())
    }

    /// The roster under the given filter and sort.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Storage` if the fetch fails.
    pub async fn visible_users(
        &self,
        filter: &FilterSpec,
        sort: &SortSpec,
    ) -> Result<Vec<User>, DirectoryError> {
        let users = self.list_users().await?;
        Ok(apply_filter_and_sort(&users, filter, sort))
    }
}
