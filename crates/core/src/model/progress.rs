use chrono::{DateTime, Utc};

use crate::model::ids::{QuestionId, UserId};

/// Per-user, per-question completion snapshot.
///
/// The store guarantees at most one record per (user, question) pair;
/// that invariant is not re-validated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    pub id: uuid::Uuid,
    pub user_id: UserId,
    pub question_id: QuestionId,
    pub is_completed: bool,
    pub is_marked_for_revision: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
