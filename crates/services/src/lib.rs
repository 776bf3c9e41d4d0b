#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth_service;
pub mod directory_service;
pub mod error;
pub mod notify;
pub mod portfolio_service;
pub mod profile_service;
pub mod progress_service;
pub mod view;

pub use yodha_core::Clock;

pub use app_services::AppServices;
pub use auth_service::AuthService;
pub use directory_service::DirectoryService;
pub use error::{AppServicesError, AuthError, DirectoryError, ProfileError};
pub use notify::{BufferedNotifier, Notice, NoticeLevel, Notifier};
pub use portfolio_service::{PortfolioService, ResolvedBadge, UserPortfolio};
pub use profile_service::ProfileService;
pub use progress_service::{ProgressBundle, ProgressService};
pub use view::{DashboardView, UserDetailData, UserDetailView, ViewService, ViewSlot, ViewState};
