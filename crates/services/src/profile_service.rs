use std::sync::Arc;

use yodha_core::model::{Profile, User, UserId};

use storage::repository::ProfileRepository;

use crate::error::ProfileError;

/// Single-profile lookups for the detail page.
#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    #[must_use]
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// Fetch a profile by id; `Ok(None)` means not found.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Storage` if the fetch fails.
    pub async fn get_profile(&self, id: UserId) -> Result<Option<Profile>, ProfileError> {
        let profile = self.profiles.get_profile(id).await?;
        Ok(profile)
    }

    /// Same lookup, mapped for display.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Storage` if the fetch fails.
    pub async fn get_user(&self, id: UserId) -> Result<Option<User>, ProfileError> {
        let profile = self.profiles.get_profile(id).await?;
        Ok(profile.as_ref().map(User::from_profile))
    }
}
