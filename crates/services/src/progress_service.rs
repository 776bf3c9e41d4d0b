use std::sync::Arc;

use yodha_core::model::{LearningPath, LearningPathId, ProgressRecord, Question, Topic, UserId};
use yodha_core::progress::{
    DifficultyBreakdown, OverallProgress, PathProgress, overall_progress, progress_by_difficulty,
    progress_by_learning_path,
};

use storage::repository::{CatalogRepository, ProgressRepository, StorageError};

use crate::notify::{Notice, Notifier};

/// The three aggregate views for one user's detail page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressBundle {
    pub breakdown: DifficultyBreakdown,
    pub paths: Vec<PathProgress>,
    pub overall: OverallProgress,
}

/// Fetches catalog and completion data and runs the aggregation engine.
///
/// Fetch failures degrade to empty inputs (warn + notice), so a broken
/// store renders as zero progress rather than an error page.
#[derive(Clone)]
pub struct ProgressService {
    catalog: Arc<dyn CatalogRepository>,
    progress: Arc<dyn ProgressRepository>,
    notifier: Arc<dyn Notifier>,
}

struct ProgressInputs {
    progress: Vec<ProgressRecord>,
    questions: Vec<Question>,
    topics: Vec<Topic>,
    paths: Vec<LearningPath>,
    assigned: Option<Vec<LearningPathId>>,
}

impl ProgressService {
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        progress: Arc<dyn ProgressRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            catalog,
            progress,
            notifier,
        }
    }

    fn degrade<T: Default>(&self, what: &str, result: Result<T, StorageError>) -> T {
        match result {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(what, %error, "progress fetch failed");
                self.notifier
                    .notify(Notice::error(format!("Could not load {what}")));
                T::default()
            }
        }
    }

    async fn inputs(&self, user_id: UserId) -> ProgressInputs {
        let progress = {
            let result = self.progress.list_progress(user_id).await;
            self.degrade("progress", result)
        };
        let questions = {
            let result = self.catalog.list_questions().await;
            self.degrade("questions", result)
        };
        let topics = {
            let result = self.catalog.list_topics().await;
            self.degrade("topics", result)
        };
        let paths = {
            let result = self.catalog.list_learning_paths().await;
            self.degrade("learning paths", result)
        };
        // A failed assignment lookup falls back to "no restriction".
        let assigned = {
            let result = self.catalog.assigned_learning_paths(user_id).await;
            self.degrade("assigned paths", result)
        };

        ProgressInputs {
            progress,
            questions,
            topics,
            paths,
            assigned,
        }
    }

    /// All three aggregates in one pass over the fetched inputs.
    pub async fn bundle(&self, user_id: UserId) -> ProgressBundle {
        let inputs = self.inputs(user_id).await;
        ProgressBundle {
            breakdown: progress_by_difficulty(&inputs.progress, &inputs.questions),
            paths: progress_by_learning_path(
                &inputs.progress,
                &inputs.questions,
                &inputs.topics,
                &inputs.paths,
                inputs.assigned.as_deref(),
            ),
            overall: overall_progress(&inputs.progress, &inputs.questions),
        }
    }

    pub async fn difficulty_breakdown(&self, user_id: UserId) -> DifficultyBreakdown {
        self.bundle(user_id).await.breakdown
    }

    /// Per-path tallies, honoring the user's assignment list.
    pub async fn path_progress(&self, user_id: UserId) -> Vec<PathProgress> {
        self.bundle(user_id).await.paths
    }

    pub async fn overall(&self, user_id: UserId) -> OverallProgress {
        self.bundle(user_id).await.overall
    }
}
