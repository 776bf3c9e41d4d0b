use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::auth_service::AuthService;
use crate::directory_service::DirectoryService;
use crate::error::AppServicesError;
use crate::notify::Notifier;
use crate::portfolio_service::PortfolioService;
use crate::profile_service::ProfileService;
use crate::progress_service::ProgressService;
use crate::view::ViewService;

/// Assembles the app-facing services over one `Storage`.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    auth: Arc<AuthService>,
    directory: Arc<DirectoryService>,
    profiles: Arc<ProfileService>,
    portfolio: Arc<PortfolioService>,
    progress: Arc<ProgressService>,
    views: Arc<ViewService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, notifier))
    }

    /// Build services over the in-memory repository, for tests.
    #[must_use]
    pub fn in_memory(clock: Clock, notifier: Arc<dyn Notifier>) -> Self {
        Self::from_storage(&Storage::in_memory(), clock, notifier)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, notifier: Arc<dyn Notifier>) -> Self {
        let auth = Arc::new(AuthService::new(
            Arc::clone(&storage.auth),
            Arc::clone(&storage.session),
            Arc::clone(&notifier),
        ));
        let directory = Arc::new(DirectoryService::new(Arc::clone(&storage.profiles)));
        let profiles = Arc::new(ProfileService::new(Arc::clone(&storage.profiles)));
        let portfolio = Arc::new(PortfolioService::new(
            Arc::clone(&storage.portfolio),
            Arc::clone(&notifier),
        ));
        let progress = Arc::new(ProgressService::new(
            Arc::clone(&storage.catalog),
            Arc::clone(&storage.progress),
            Arc::clone(&notifier),
        ));
        let views = Arc::new(ViewService::new(
            Arc::clone(&directory),
            Arc::clone(&profiles),
            Arc::clone(&portfolio),
            Arc::clone(&progress),
        ));

        Self {
            clock,
            auth,
            directory,
            profiles,
            portfolio,
            progress,
            views,
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn directory(&self) -> Arc<DirectoryService> {
        Arc::clone(&self.directory)
    }

    #[must_use]
    pub fn profiles(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profiles)
    }

    #[must_use]
    pub fn portfolio(&self) -> Arc<PortfolioService> {
        Arc::clone(&self.portfolio)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn views(&self) -> Arc<ViewService> {
        Arc::clone(&self.views)
    }
}
