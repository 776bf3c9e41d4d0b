use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use yodha_core::model::{
    Account, Assessment, BadgeType, Certificate, LearningPath, LearningPathId, Profile,
    ProgressRecord, Project, Publication, Question, Topic, Training, UserBadge, UserId, UserSkill,
    WorkExperience,
};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Read access to the joined profile+account collection.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch every profile row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails.
    async fn list_profiles(&self) -> Result<Vec<Profile>, StorageError>;

    /// Fetch one profile by user id.
    ///
    /// Returns `Ok(None)` when the profile does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails.
    async fn get_profile(&self, id: UserId) -> Result<Option<Profile>, StorageError>;
}

/// Read access to the global learning catalog.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_learning_paths(&self) -> Result<Vec<LearningPath>, StorageError>;

    async fn list_topics(&self) -> Result<Vec<Topic>, StorageError>;

    async fn list_questions(&self) -> Result<Vec<Question>, StorageError>;

    /// The user's assigned-path restriction, if any.
    ///
    /// `Ok(None)` means no restriction is recorded for the user.
    async fn assigned_learning_paths(
        &self,
        user_id: UserId,
    ) -> Result<Option<Vec<LearningPathId>>, StorageError>;
}

/// Read access to per-user completion records.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    async fn list_progress(&self, user_id: UserId) -> Result<Vec<ProgressRecord>, StorageError>;
}

/// Read access to the per-user portfolio collections.
#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    async fn trainings(&self, user_id: UserId) -> Result<Vec<Training>, StorageError>;

    async fn assessments(&self, user_id: UserId) -> Result<Vec<Assessment>, StorageError>;

    async fn certificates(&self, user_id: UserId) -> Result<Vec<Certificate>, StorageError>;

    async fn work_experience(&self, user_id: UserId)
    -> Result<Vec<WorkExperience>, StorageError>;

    async fn projects(&self, user_id: UserId) -> Result<Vec<Project>, StorageError>;

    async fn publications(&self, user_id: UserId) -> Result<Vec<Publication>, StorageError>;

    async fn skills(&self, user_id: UserId) -> Result<Vec<UserSkill>, StorageError>;

    async fn user_badges(&self, user_id: UserId) -> Result<Vec<UserBadge>, StorageError>;

    /// The global badge-type catalog.
    async fn badge_types(&self) -> Result<Vec<BadgeType>, StorageError>;
}

/// The remote authentication call.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Resolve a PRN + password pair to an account row.
    ///
    /// Returns `Ok(None)` for unknown or mismatched credentials; the
    /// credential check itself happens remotely.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the call fails.
    async fn authenticate(&self, prn: &str, password: &str)
    -> Result<Option<Account>, StorageError>;
}

/// Persisted client session: one serialized record under a fixed key.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn load_session(&self) -> Result<Option<Account>, StorageError>;

    async fn store_session(&self, account: &Account) -> Result<(), StorageError>;

    async fn clear_session(&self) -> Result<(), StorageError>;
}

#[derive(Default)]
struct InMemoryState {
    profiles: Vec<Profile>,
    accounts: HashMap<String, (String, Account)>,
    learning_paths: Vec<LearningPath>,
    topics: Vec<Topic>,
    questions: Vec<Question>,
    assigned: HashMap<UserId, Vec<LearningPathId>>,
    progress: HashMap<UserId, Vec<ProgressRecord>>,
    trainings: HashMap<UserId, Vec<Training>>,
    assessments: HashMap<UserId, Vec<Assessment>>,
    certificates: HashMap<UserId, Vec<Certificate>>,
    work_experience: HashMap<UserId, Vec<WorkExperience>>,
    projects: HashMap<UserId, Vec<Project>>,
    publications: HashMap<UserId, Vec<Publication>>,
    skills: HashMap<UserId, Vec<UserSkill>>,
    user_badges: HashMap<UserId, Vec<UserBadge>>,
    badge_types: Vec<BadgeType>,
    session: Option<Account>,
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, InMemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }

    /// Registers a profile row (and nothing else) for tests.
    ///
    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    pub fn insert_profile(&self, profile: Profile) {
        self.lock().expect("state lock").profiles.push(profile);
    }

    /// Registers a login credential and the row the authenticate call
    /// returns for it.
    ///
    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    pub fn insert_account(&self, password: &str, account: Account) {
        self.lock()
            .expect("state lock")
            .accounts
            .insert(account.prn.clone(), (password.to_string(), account));
    }

    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    pub fn insert_learning_path(&self, path: LearningPath) {
        self.lock().expect("state lock").learning_paths.push(path);
    }

    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    pub fn insert_topic(&self, topic: Topic) {
        self.lock().expect("state lock").topics.push(topic);
    }

    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    pub fn insert_question(&self, question: Question) {
        self.lock().expect("state lock").questions.push(question);
    }

    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    pub fn set_assigned_paths(&self, user_id: UserId, paths: Vec<LearningPathId>) {
        self.lock().expect("state lock").assigned.insert(user_id, paths);
    }

    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    pub fn insert_progress(&self, record: ProgressRecord) {
        self.lock()
            .expect("state lock")
            .progress
            .entry(record.user_id)
            .or_default()
            .push(record);
    }

    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    pub fn insert_training(&self, training: Training) {
        self.lock()
            .expect("state lock")
            .trainings
            .entry(training.user_id)
            .or_default()
            .push(training);
    }

    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    pub fn insert_assessment(&self, assessment: Assessment) {
        self.lock()
            .expect("state lock")
            .assessments
            .entry(assessment.user_id)
            .or_default()
            .push(assessment);
    }

    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    pub fn insert_certificate(&self, certificate: Certificate) {
        self.lock()
            .expect("state lock")
            .certificates
            .entry(certificate.user_id)
            .or_default()
            .push(certificate);
    }

    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    pub fn insert_work_experience(&self, work: WorkExperience) {
        self.lock()
            .expect("state lock")
            .work_experience
            .entry(work.user_id)
            .or_default()
            .push(work);
    }

    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    pub fn insert_project(&self, project: Project) {
        self.lock()
            .expect("state lock")
            .projects
            .entry(project.user_id)
            .or_default()
            .push(project);
    }

    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    pub fn insert_publication(&self, publication: Publication) {
        self.lock()
            .expect("state lock")
            .publications
            .entry(publication.user_id)
            .or_default()
            .push(publication);
    }

    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    pub fn insert_skill(&self, skill: UserSkill) {
        self.lock()
            .expect("state lock")
            .skills
            .entry(skill.user_id)
            .or_default()
            .push(skill);
    }

    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    pub fn insert_user_badge(&self, badge: UserBadge) {
        self.lock()
            .expect("state lock")
            .user_badges
            .entry(badge.user_id)
            .or_default()
            .push(badge);
    }

    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    pub fn insert_badge_type(&self, badge_type: BadgeType) {
        self.lock().expect("state lock").badge_types.push(badge_type);
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn list_profiles(&self) -> Result<Vec<Profile>, StorageError> {
        Ok(self.lock()?.profiles.clone())
    }

    async fn get_profile(&self, id: UserId) -> Result<Option<Profile>, StorageError> {
        Ok(self.lock()?.profiles.iter().find(|p| p.id == id).cloned())
    }
}

#[async_trait]
impl CatalogRepository for InMemoryRepository {
    async fn list_learning_paths(&self) -> Result<Vec<LearningPath>, StorageError> {
        Ok(self.lock()?.learning_paths.clone())
    }

    async fn list_topics(&self) -> Result<Vec<Topic>, StorageError> {
        Ok(self.lock()?.topics.clone())
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        Ok(self.lock()?.questions.clone())
    }

    async fn assigned_learning_paths(
        &self,
        user_id: UserId,
    ) -> Result<Option<Vec<LearningPathId>>, StorageError> {
        Ok(self.lock()?.assigned.get(&user_id).cloned())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn list_progress(&self, user_id: UserId) -> Result<Vec<ProgressRecord>, StorageError> {
        Ok(self.lock()?.progress.get(&user_id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl PortfolioRepository for InMemoryRepository {
    async fn trainings(&self, user_id: UserId) -> Result<Vec<Training>, StorageError> {
        Ok(self.lock()?.trainings.get(&user_id).cloned().unwrap_or_default())
    }

    async fn assessments(&self, user_id: UserId) -> Result<Vec<Assessment>, StorageError> {
        Ok(self.lock()?.assessments.get(&user_id).cloned().unwrap_or_default())
    }

    async fn certificates(&self, user_id: UserId) -> Result<Vec<Certificate>, StorageError> {
        Ok(self.lock()?.certificates.get(&user_id).cloned().unwrap_or_default())
    }

    async fn work_experience(
        &self,
        user_id: UserId,
    ) -> Result<Vec<WorkExperience>, StorageError> {
        Ok(self
            .lock()?
            .work_experience
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn projects(&self, user_id: UserId) -> Result<Vec<Project>, StorageError> {
        Ok(self.lock()?.projects.get(&user_id).cloned().unwrap_or_default())
    }

    async fn publications(&self, user_id: UserId) -> Result<Vec<Publication>, StorageError> {
        Ok(self.lock()?.publications.get(&user_id).cloned().unwrap_or_default())
    }

    async fn skills(&self, user_id: UserId) -> Result<Vec<UserSkill>, StorageError> {
        Ok(self.lock()?.skills.get(&user_id).cloned().unwrap_or_default())
    }

    async fn user_badges(&self, user_id: UserId) -> Result<Vec<UserBadge>, StorageError> {
        Ok(self.lock()?.user_badges.get(&user_id).cloned().unwrap_or_default())
    }

    async fn badge_types(&self) -> Result<Vec<BadgeType>, StorageError> {
        Ok(self.lock()?.badge_types.clone())
    }
}

#[async_trait]
impl AuthRepository for InMemoryRepository {
    async fn authenticate(
        &self,
        prn: &str,
        password: &str,
    ) -> Result<Option<Account>, StorageError> {
        let state = self.lock()?;
        Ok(state.accounts.get(prn).and_then(|(stored, account)| {
            (stored == password).then(|| account.clone())
        }))
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn load_session(&self) -> Result<Option<Account>, StorageError> {
        Ok(self.lock()?.session.clone())
    }

    async fn store_session(&self, account: &Account) -> Result<(), StorageError> {
        self.lock()?.session = Some(account.clone());
        Ok(())
    }

    async fn clear_session(&self) -> Result<(), StorageError> {
        self.lock()?.session = None;
        Ok(())
    }
}

/// Aggregates the collection repositories behind trait objects for
/// easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub profiles: Arc<dyn ProfileRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub progress: Arc<dyn ProgressRepository>,
    pub portfolio: Arc<dyn PortfolioRepository>,
    pub auth: Arc<dyn AuthRepository>,
    pub session: Arc<dyn SessionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self::from_in_memory(&repo)
    }

    /// Wraps an existing in-memory repository, keeping a handle to it
    /// so tests can insert fixtures through the same state.
    #[must_use]
    pub fn from_in_memory(repo: &InMemoryRepository) -> Self {
        Self {
            profiles: Arc::new(repo.clone()),
            catalog: Arc::new(repo.clone()),
            progress: Arc::new(repo.clone()),
            portfolio: Arc::new(repo.clone()),
            auth: Arc::new(repo.clone()),
            session: Arc::new(repo.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yodha_core::time::fixed_now;

    fn build_profile(id: UserId) -> Profile {
        Profile {
            id,
            real_name: "Test User".to_string(),
            username: "test.user".to_string(),
            email: "test@example.com".to_string(),
            prn: "PRN1".to_string(),
            bio: None,
            college_name: None,
            location: None,
            profile_picture_url: None,
            linkedin_url: None,
            github_url: None,
            leetcode_url: None,
            hackerrank_url: None,
            gfg_url: None,
            cgpa: None,
            grad_year: Some(2025),
            department: Some("CSE".to_string()),
            course: None,
            active: Some(true),
            assigned_learning_paths: None,
            created_at: fixed_now(),
            updated_at: fixed_now(),
        }
    }

    #[tokio::test]
    async fn profile_roundtrip() {
        let repo = InMemoryRepository::new();
        let id = UserId::generate();
        repo.insert_profile(build_profile(id));

        let fetched = repo.get_profile(id).await.unwrap();
        assert_eq!(fetched.map(|p| p.id), Some(id));
        assert!(repo.get_profile(UserId::generate()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn authenticate_checks_credentials() {
        let repo = InMemoryRepository::new();
        let account = Account {
            id: UserId::generate(),
            username: "test.user".to_string(),
            prn: "PRN1".to_string(),
            email: "test@example.com".to_string(),
            department: None,
            course: None,
            grad_year: None,
        };
        repo.insert_account("secret", account.clone());

        let hit = repo.authenticate("PRN1", "secret").await.unwrap();
        assert_eq!(hit, Some(account));
        assert!(repo.authenticate("PRN1", "wrong").await.unwrap().is_none());
        assert!(repo.authenticate("PRN2", "secret").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn session_store_and_clear() {
        let repo = InMemoryRepository::new();
        assert!(repo.load_session().await.unwrap().is_none());

        let account = Account {
            id: UserId::generate(),
            username: "test.user".to_string(),
            prn: "PRN1".to_string(),
            email: "test@example.com".to_string(),
            department: None,
            course: None,
            grad_year: None,
        };
        repo.store_session(&account).await.unwrap();
        assert_eq!(repo.load_session().await.unwrap(), Some(account));

        repo.clear_session().await.unwrap();
        assert!(repo.load_session().await.unwrap().is_none());
    }
}
