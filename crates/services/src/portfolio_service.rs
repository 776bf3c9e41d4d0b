use std::collections::HashMap;
use std::sync::Arc;

use yodha_core::model::{
    Assessment, Certificate, Project, Publication, Training, UserId, UserSkill, WorkExperience,
};

use storage::repository::{PortfolioRepository, StorageError};

use crate::notify::{Notice, Notifier};

/// A user badge joined with its catalog entry for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBadge {
    pub name: String,
    pub description: Option<String>,
    pub icon_name: String,
    pub background_color: String,
    pub text_color: String,
    pub earned_at: String,
}

/// Every portfolio collection for one user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPortfolio {
    pub trainings: Vec<Training>,
    pub assessments: Vec<Assessment>,
    pub certificates: Vec<Certificate>,
    pub work_experience: Vec<WorkExperience>,
    pub projects: Vec<Project>,
    pub publications: Vec<Publication>,
    pub skills: Vec<UserSkill>,
    pub badges: Vec<ResolvedBadge>,
}

/// Per-collection fetchers that degrade to empty on failure.
///
/// A failed fetch logs a warning and raises a notice; the caller always
/// receives a usable (possibly empty) collection. Nothing here is fatal.
#[derive(Clone)]
pub struct PortfolioService {
    portfolio: Arc<dyn PortfolioRepository>,
    notifier: Arc<dyn Notifier>,
}

impl PortfolioService {
    #[must_use]
    pub fn new(portfolio: Arc<dyn PortfolioRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            portfolio,
            notifier,
        }
    }

    fn degrade<T>(&self, collection: &str, result: Result<Vec<T>, StorageError>) -> Vec<T> {
        match result {
            Ok(items) => items,
            Err(error) => {
                tracing::warn!(collection, %error, "portfolio fetch failed");
                self.notifier
                    .notify(Notice::error(format!("Could not load {collection}")));
                Vec::new()
            }
        }
    }

    pub async fn trainings(&self, user_id: UserId) -> Vec<Training> {
        let result = self.portfolio.trainings(user_id).await;
        self.degrade("trainings", result)
    }

    pub async fn assessments(&self, user_id: UserId) -> Vec<Assessment> {
        let result = self.portfolio.assessments(user_id).await;
        self.degrade("assessments", result)
    }

    pub async fn certificates(&self, user_id: UserId) -> Vec<Certificate> {
        let result = self.portfolio.certificates(user_id).await;
        self.degrade("certificates", result)
    }

    pub async fn work_experience(&self, user_id: UserId) -> Vec<WorkExperience> {
        let result = self.portfolio.work_experience(user_id).await;
        self.degrade("work experience", result)
    }

    pub async fn projects(&self, user_id: UserId) -> Vec<Project> {
        let result = self.portfolio.projects(user_id).await;
        self.degrade("projects", result)
    }

    pub async fn publications(&self, user_id: UserId) -> Vec<Publication> {
        let result = self.portfolio.publications(user_id).await;
        self.degrade("publications", result)
    }

    pub async fn skills(&self, user_id: UserId) -> Vec<UserSkill> {
        let result = self.portfolio.skills(user_id).await;
        self.degrade("skills", result)
    }

    /// Badges joined with the badge-type catalog.
    ///
    /// The two fetches degrade together; a badge whose type is missing
    /// from the catalog is dropped, mirroring how dangling references
    /// are excluded elsewhere.
    pub async fn badges(&self, user_id: UserId) -> Vec<ResolvedBadge> {
        let earned = {
            let result = self.portfolio.user_badges(user_id).await;
            self.degrade("badges", result)
        };
        if earned.is_empty() {
            return Vec::new();
        }
        let catalog = {
            let result = self.portfolio.badge_types().await;
            self.degrade("badges", result)
        };

        let by_id: HashMap<_, _> = catalog.into_iter().map(|b| (b.id, b)).collect();
        earned
            .into_iter()
            .filter_map(|badge| {
                let entry = by_id.get(&badge.badge_id)?;
                Some(ResolvedBadge {
                    name: entry.name.clone(),
                    description: entry.description.clone(),
                    icon_name: entry.icon_name.clone(),
                    background_color: entry.background_color.clone(),
                    text_color: entry.text_color.clone(),
                    earned_at: badge.earned_at,
                })
            })
            .collect()
    }

    /// Every collection for the detail page in one call.
    pub async fn full(&self, user_id: UserId) -> UserPortfolio {
        UserPortfolio {
            trainings: self.trainings(user_id).await,
            assessments: self.assessments(user_id).await,
            certificates: self.certificates(user_id).await,
            work_experience: self.work_experience(user_id).await,
            projects: self.projects(user_id).await,
            publications: self.publications(user_id).await,
            skills: self.skills(user_id).await,
            badges: self.badges(user_id).await,
        }
    }
}
