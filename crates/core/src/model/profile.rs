use chrono::{DateTime, Utc};
use url::Url;

use crate::model::ids::{LearningPathId, UserId};

/// Joined profile-plus-account view of a single user, as fetched from
/// the remote `user_profiles` collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: UserId,
    pub real_name: String,
    pub username: String,
    pub email: String,
    pub prn: String,
    pub bio: Option<String>,
    pub college_name: Option<String>,
    pub location: Option<String>,
    pub profile_picture_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub leetcode_url: Option<String>,
    pub hackerrank_url: Option<String>,
    pub gfg_url: Option<String>,
    pub cgpa: Option<f64>,
    pub grad_year: Option<i32>,
    pub department: Option<String>,
    pub course: Option<String>,
    pub active: Option<bool>,
    /// Restricts which learning paths count toward path-level progress.
    pub assigned_learning_paths: Option<Vec<LearningPathId>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A labeled, validated social profile link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub label: &'static str,
    pub url: Url,
}

impl Profile {
    /// Returns the profile's social links in display order.
    ///
    /// Fields holding malformed URLs are dropped silently; the remote
    /// store does not validate them.
    #[must_use]
    pub fn social_links(&self) -> Vec<SocialLink> {
        let raw = [
            ("LinkedIn", self.linkedin_url.as_deref()),
            ("GitHub", self.github_url.as_deref()),
            ("LeetCode", self.leetcode_url.as_deref()),
            ("HackerRank", self.hackerrank_url.as_deref()),
            ("GeeksforGeeks", self.gfg_url.as_deref()),
        ];
        raw.into_iter()
            .filter_map(|(label, value)| {
                let url = Url::parse(value?).ok()?;
                Some(SocialLink { label, url })
            })
            .collect()
    }
}
