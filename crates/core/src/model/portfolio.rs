use chrono::{DateTime, Utc};

use crate::model::ids::{BadgeId, UserId};

/// A training entry on a user's record.
///
/// Date fields arrive as raw strings from the store and are rendered
/// with [`crate::time::format_date`], which tolerates malformed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Training {
    pub id: uuid::Uuid,
    pub user_id: UserId,
    pub title: String,
    pub organization: String,
    pub description: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A scored external assessment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub id: uuid::Uuid,
    pub user_id: UserId,
    pub title: String,
    pub provider: String,
    pub score: String,
    pub max_score: String,
    pub assessment_date: String,
    pub certificate_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A standalone certificate (distinct from assessments).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    pub id: uuid::Uuid,
    pub user_id: UserId,
    pub title: String,
    pub issuer: String,
    pub issue_date: String,
    pub expiry_date: Option<String>,
    pub credential_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkExperience {
    pub id: uuid::Uuid,
    pub user_id: UserId,
    pub company: String,
    pub position: String,
    pub location: Option<String>,
    pub description: String,
    pub technologies: Option<Vec<String>>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: uuid::Uuid,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub technologies: Option<Vec<String>>,
    pub project_url: Option<String>,
    pub image_url: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub id: uuid::Uuid,
    pub user_id: UserId,
    pub title: String,
    pub authors: Vec<String>,
    pub publication_name: String,
    pub publication_date: String,
    pub doi: Option<String>,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single named skill attached to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSkill {
    pub id: uuid::Uuid,
    pub user_id: UserId,
    pub skill_name: String,
    pub created_at: DateTime<Utc>,
}

/// An earned badge; resolved against [`BadgeType`] for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserBadge {
    pub id: uuid::Uuid,
    pub user_id: UserId,
    pub badge_id: BadgeId,
    pub earned_at: String,
}

/// Badge catalog entry: name, icon and colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeType {
    pub id: BadgeId,
    pub name: String,
    pub description: Option<String>,
    pub icon_name: String,
    pub background_color: String,
    pub text_color: String,
    pub created_at: DateTime<Utc>,
}
