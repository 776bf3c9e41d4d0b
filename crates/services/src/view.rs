//! Page-level view assembly with stale-response protection.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use yodha_core::model::{Profile, User, UserId};
use yodha_core::roster::{FilterSpec, SortSpec};

use crate::directory_service::DirectoryService;
use crate::portfolio_service::{PortfolioService, UserPortfolio};
use crate::profile_service::ProfileService;
use crate::progress_service::{ProgressBundle, ProgressService};

/// Lifecycle of one page's data.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Loaded(T),
    Errored(String),
}

/// Holds a `ViewState` plus a generation counter.
///
/// Each `begin()` bumps the generation; a `resolve()` carrying an older
/// generation is ignored, so a slow fetch finishing after the user
/// navigated away cannot overwrite the newer page's data.
pub struct ViewSlot<T> {
    state: RwLock<ViewState<T>>,
    generation: AtomicU64,
}

impl<T> Default for ViewSlot<T> {
    fn default() -> Self {
        Self {
            state: RwLock::new(ViewState::Loading),
            generation: AtomicU64::new(0),
        }
    }
}

impl<T> ViewSlot<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load: reset to `Loading` and return the new generation.
    pub fn begin(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = ViewState::Loading;
        generation
    }

    /// Install `state` if `generation` is still current.
    ///
    /// Returns `false` when the resolution was stale and dropped.
    pub fn resolve(&self, generation: u64, state: ViewState<T>) -> bool {
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
        true
    }
}

impl<T: Clone> ViewSlot<T> {
    #[must_use]
    pub fn current(&self) -> ViewState<T> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Data behind the user list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub users: Vec<User>,
}

/// Everything the detail page renders for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDetailData {
    pub user: User,
    pub profile: Profile,
    pub portfolio: UserPortfolio,
    pub progress: ProgressBundle,
}

/// Detail page outcome; not-found is an explicit screen, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum UserDetailView {
    NotFound,
    Found(Box<UserDetailData>),
}

/// Assembles full page data into generation-guarded slots.
pub struct ViewService {
    directory: Arc<DirectoryService>,
    profiles: Arc<ProfileService>,
    portfolio: Arc<PortfolioService>,
    progress: Arc<ProgressService>,
    dashboard: ViewSlot<DashboardView>,
    user_detail: ViewSlot<UserDetailView>,
}

impl ViewService {
    #[must_use]
    pub fn new(
        directory: Arc<DirectoryService>,
        profiles: Arc<ProfileService>,
        portfolio: Arc<PortfolioService>,
        progress: Arc<ProgressService>,
    ) -> Self {
        Self {
            directory,
            profiles,
            portfolio,
            progress,
            dashboard: ViewSlot::new(),
            user_detail: ViewSlot::new(),
        }
    }

    /// Load the roster page under the given filter and sort.
    pub async fn load_dashboard(&self, filter: &FilterSpec, sort: &SortSpec) -> ViewState<DashboardView> {
        let generation = self.dashboard.begin();
        let state = match self.directory.visible_users(filter, sort).await {
            Ok(users) => ViewState::Loaded(DashboardView { users }),
            Err(error) => ViewState::Errored(error.to_string()),
        };
        self.dashboard.resolve(generation, state.clone());
        state
    }

    /// Load the full detail page for one user.
    pub async fn load_user_detail(&self, id: UserId) -> ViewState<UserDetailView> {
        let generation = self.user_detail.begin();
        let state = match self.profiles.get_profile(id).await {
            Err(error) => ViewState::Errored(error.to_string()),
            Ok(None) => ViewState::Loaded(UserDetailView::NotFound),
            Ok(Some(profile)) => {
                let user = User::from_profile(&profile);
                let portfolio = self.portfolio.full(id).await;
                let progress = self.progress.bundle(id).await;
                ViewState::Loaded(UserDetailView::Found(Box::new(UserDetailData {
                    user,
                    profile,
                    portfolio,
                    progress,
                })))
            }
        };
        self.user_detail.resolve(generation, state.clone());
        state
    }

    #[must_use]
    pub fn dashboard(&self) -> ViewState<DashboardView> {
        self.dashboard.current()
    }

    #[must_use]
    pub fn user_detail(&self) -> ViewState<UserDetailView> {
        self.user_detail.current()
    }
}
