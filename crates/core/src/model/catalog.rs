use chrono::{DateTime, Utc};

use crate::model::ids::{LearningPathId, QuestionId, TopicId};

/// Difficulty bucket for aggregated progress.
///
/// The remote store keeps difficulty as a free-text label; matching is
/// case-insensitive and unrecognized labels fall outside every bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Theory,
}

impl Difficulty {
    /// All buckets, in display order.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Theory,
    ];

    /// Parses a raw difficulty label from the store.
    ///
    /// Returns `None` for labels outside the four known buckets.
    #[must_use]
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            "theory" => Some(Self::Theory),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Theory => "Theory",
        }
    }
}

/// A named curriculum track containing topics.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningPath {
    pub id: LearningPathId,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    /// Optional sort rank assigned in the store.
    pub sr: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A grouping of questions within a learning path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub id: TopicId,
    pub learning_path_id: LearningPathId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The atomic trackable unit of learning progress.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: QuestionId,
    pub topic_id: TopicId,
    pub title: String,
    /// Free-text difficulty label as stored remotely; see [`Difficulty`].
    pub difficulty: String,
    pub solution_link: Option<String>,
    pub practice_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Question {
    /// Resolves the raw label into a bucket, if it names one.
    #[must_use]
    pub fn bucket(&self) -> Option<Difficulty> {
        Difficulty::parse_label(&self.difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_label_is_case_insensitive() {
        assert_eq!(Difficulty::parse_label("easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse_label("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse_label("Theory"), Some(Difficulty::Theory));
        assert_eq!(Difficulty::parse_label(" Medium "), Some(Difficulty::Medium));
    }

    #[test]
    fn parse_label_rejects_unknown_labels() {
        assert_eq!(Difficulty::parse_label("Extreme"), None);
        assert_eq!(Difficulty::parse_label(""), None);
    }

    #[test]
    fn as_str_roundtrips_through_parse() {
        for bucket in Difficulty::ALL {
            assert_eq!(Difficulty::parse_label(bucket.as_str()), Some(bucket));
        }
    }
}
