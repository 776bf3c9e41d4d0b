use chrono::{DateTime, Utc};

use crate::model::ids::UserId;
use crate::model::profile::Profile;

/// Display-oriented user shape consumed by listing and detail views.
///
/// All optional text fields default to empty strings so downstream
/// rendering never has to branch on `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub grad_year: Option<i32>,
    pub department: String,
    pub course: String,
    pub location: String,
    pub bio: String,
    pub join_date: DateTime<Utc>,
}

impl User {
    /// Adapts a raw profile row into the display shape.
    ///
    /// Defaulting rules: display name falls back to the username when
    /// the real name is empty; a missing picture URL yields a
    /// deterministic placeholder keyed by the profile id. Mapping the
    /// same profile twice yields identical output.
    #[must_use]
    pub fn from_profile(profile: &Profile) -> Self {
        let name = if profile.real_name.trim().is_empty() {
            profile.username.clone()
        } else {
            profile.real_name.clone()
        };
        let avatar = profile
            .profile_picture_url
            .clone()
            .unwrap_or_else(|| format!("https://i.pravatar.cc/150?u={}", profile.id));

        Self {
            id: profile.id,
            name,
            email: profile.email.clone(),
            avatar,
            grad_year: profile.grad_year,
            department: profile.department.clone().unwrap_or_default(),
            course: profile.course.clone().unwrap_or_default(),
            location: profile.location.clone().unwrap_or_default(),
            bio: profile.bio.clone().unwrap_or_default(),
            join_date: profile.created_at,
        }
    }
}
