//! Learning-progress aggregation.
//!
//! Pure computations over immutable snapshots of the remote catalog
//! (questions, topics, learning paths) and a user's completion
//! records. No state is retained between calls, and empty or
//! malformed inputs never error: counts degenerate to zero and
//! percentages to 0.

use std::collections::{HashMap, HashSet};

use crate::model::{
    Difficulty, LearningPath, LearningPathId, ProgressRecord, Question, QuestionId, Topic,
};

/// Completed/total pair for one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketTally {
    pub completed: u32,
    pub total: u32,
}

impl BucketTally {
    /// Completion percentage as a rounded integer in 0..=100.
    ///
    /// A zero total yields 0, never NaN.
    #[must_use]
    pub fn percent(&self) -> u8 {
        percent_of(self.completed, self.total)
    }
}

/// Completion counts for the four fixed difficulty buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DifficultyBreakdown {
    pub easy: BucketTally,
    pub medium: BucketTally,
    pub hard: BucketTally,
    pub theory: BucketTally,
}

impl DifficultyBreakdown {
    #[must_use]
    pub fn get(&self, bucket: Difficulty) -> BucketTally {
        match bucket {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
            Difficulty::Theory => self.theory,
        }
    }

    fn get_mut(&mut self, bucket: Difficulty) -> &mut BucketTally {
        match bucket {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
            Difficulty::Theory => &mut self.theory,
        }
    }
}

/// Single completed/total/percent triple across all buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverallProgress {
    pub completed: u32,
    pub total: u32,
    pub percent: u8,
}

/// Per-path completion summary, in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct PathProgress {
    pub path_id: LearningPathId,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub completed: u32,
    pub total: u32,
    /// Rounded integer percentage; 0 when the path has no questions.
    pub percent_complete: u8,
}

fn percent_of(completed: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (f64::from(completed) / f64::from(total) * 100.0).round();
    // completed <= total holds for every tally we build, so this stays in 0..=100.
    pct.clamp(0.0, 100.0) as u8
}

fn completed_question_ids(progress: &[ProgressRecord]) -> HashSet<QuestionId> {
    progress
        .iter()
        .filter(|record| record.is_completed)
        .map(|record| record.question_id)
        .collect()
}

/// Tallies completion per difficulty bucket.
///
/// The question catalog is scanned once for totals; completed progress
/// records are resolved through a question-id index, so the cost is
/// O(Q + P). Questions with unrecognized difficulty labels and
/// progress records referencing unknown questions are dropped
/// silently.
#[must_use]
pub fn progress_by_difficulty(
    progress: &[ProgressRecord],
    questions: &[Question],
) -> DifficultyBreakdown {
    let mut breakdown = DifficultyBreakdown::default();

    let mut bucket_by_id: HashMap<QuestionId, Difficulty> = HashMap::with_capacity(questions.len());
    for question in questions {
        if let Some(bucket) = question.bucket() {
            breakdown.get_mut(bucket).total += 1;
            bucket_by_id.insert(question.id, bucket);
        }
    }

    for record in progress {
        if !record.is_completed {
            continue;
        }
        if let Some(bucket) = bucket_by_id.get(&record.question_id) {
            breakdown.get_mut(*bucket).completed += 1;
        }
    }

    breakdown
}

/// Tallies completion per learning path.
///
/// `assigned` of `None` or an empty slice includes every path. Output
/// order matches the order of `paths` as supplied. A question whose
/// topic is missing from `topics`, or whose topic's path is missing
/// from `paths`, is excluded from every tally.
#[must_use]
pub fn progress_by_learning_path(
    progress: &[ProgressRecord],
    questions: &[Question],
    topics: &[Topic],
    paths: &[LearningPath],
    assigned: Option<&[LearningPathId]>,
) -> Vec<PathProgress> {
    let included = |id: LearningPathId| match assigned {
        None | Some([]) => true,
        Some(ids) => ids.contains(&id),
    };

    let path_by_topic: HashMap<_, _> = topics
        .iter()
        .map(|topic| (topic.id, topic.learning_path_id))
        .collect();
    let known_paths: HashSet<_> = paths.iter().map(|path| path.id).collect();
    let completed = completed_question_ids(progress);

    let mut tallies: HashMap<LearningPathId, BucketTally> = HashMap::with_capacity(paths.len());
    for question in questions {
        let Some(path_id) = path_by_topic.get(&question.topic_id) else {
            continue;
        };
        if !known_paths.contains(path_id) {
            continue;
        }
        let tally = tallies.entry(*path_id).or_default();
        tally.total += 1;
        if completed.contains(&question.id) {
            tally.completed += 1;
        }
    }

    paths
        .iter()
        .filter(|path| included(path.id))
        .map(|path| {
            let tally = tallies.get(&path.id).copied().unwrap_or_default();
            PathProgress {
                path_id: path.id,
                title: path.title.clone(),
                description: path.description.clone(),
                difficulty: path.difficulty.clone(),
                completed: tally.completed,
                total: tally.total,
                percent_complete: tally.percent(),
            }
        })
        .collect()
}

/// Sums the difficulty breakdown into a single triple.
///
/// Summing the breakdown (rather than counting raw rows) keeps the
/// overall totals consistent with the per-bucket totals even when the
/// catalog carries unrecognized difficulty labels.
#[must_use]
pub fn overall_progress(progress: &[ProgressRecord], questions: &[Question]) -> OverallProgress {
    let breakdown = progress_by_difficulty(progress, questions);
    let mut completed = 0;
    let mut total = 0;
    for bucket in Difficulty::ALL {
        let tally = breakdown.get(bucket);
        completed += tally.completed;
        total += tally.total;
    }
    OverallProgress {
        completed,
        total,
        percent: percent_of(completed, total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TopicId, UserId};
    use crate::time::fixed_now;

    fn question(id: QuestionId, topic_id: TopicId, difficulty: &str) -> Question {
        Question {
            id,
            topic_id,
            title: format!("Q {difficulty}"),
            difficulty: difficulty.to_string(),
            solution_link: None,
            practice_link: None,
            created_at: fixed_now(),
            updated_at: fixed_now(),
        }
    }

    fn record(user_id: UserId, question_id: QuestionId, completed: bool) -> ProgressRecord {
        ProgressRecord {
            id: uuid::Uuid::new_v4(),
            user_id,
            question_id,
            is_completed: completed,
            is_marked_for_revision: false,
            created_at: fixed_now(),
            updated_at: fixed_now(),
        }
    }

    fn topic(id: TopicId, path_id: LearningPathId, name: &str) -> Topic {
        Topic {
            id,
            learning_path_id: path_id,
            name: name.to_string(),
            created_at: fixed_now(),
            updated_at: fixed_now(),
        }
    }

    fn path(id: LearningPathId, title: &str) -> LearningPath {
        LearningPath {
            id,
            title: title.to_string(),
            description: format!("{title} track"),
            difficulty: "Medium".to_string(),
            sr: None,
            created_at: fixed_now(),
            updated_at: fixed_now(),
        }
    }

    #[test]
    fn difficulty_breakdown_matches_hand_computed_totals() {
        // questions: q1 Easy, q2 Hard; progress: q1 completed.
        let topic_id = TopicId::generate();
        let q1 = QuestionId::generate();
        let q2 = QuestionId::generate();
        let questions = vec![
            question(q1, topic_id, "Easy"),
            question(q2, topic_id, "Hard"),
        ];
        let user = UserId::generate();
        let progress = vec![record(user, q1, true)];

        let breakdown = progress_by_difficulty(&progress, &questions);
        assert_eq!(breakdown.easy, BucketTally { completed: 1, total: 1 });
        assert_eq!(breakdown.hard, BucketTally { completed: 0, total: 1 });
        assert_eq!(breakdown.medium, BucketTally { completed: 0, total: 0 });
        assert_eq!(breakdown.theory, BucketTally { completed: 0, total: 0 });
    }

    #[test]
    fn completed_never_exceeds_total_per_bucket() {
        let topic_id = TopicId::generate();
        let q1 = QuestionId::generate();
        let questions = vec![question(q1, topic_id, "theory")];
        let user = UserId::generate();
        // A stray completion for an unknown question must not inflate counts.
        let progress = vec![
            record(user, q1, true),
            record(user, QuestionId::generate(), true),
        ];

        let breakdown = progress_by_difficulty(&progress, &questions);
        for bucket in Difficulty::ALL {
            let tally = breakdown.get(bucket);
            assert!(tally.completed <= tally.total);
        }
        assert_eq!(breakdown.theory, BucketTally { completed: 1, total: 1 });
    }

    #[test]
    fn difficulty_matching_is_case_insensitive() {
        let topic_id = TopicId::generate();
        let questions = vec![
            question(QuestionId::generate(), topic_id, "EASY"),
            question(QuestionId::generate(), topic_id, "easy"),
            question(QuestionId::generate(), topic_id, "Brutal"),
        ];
        let breakdown = progress_by_difficulty(&[], &questions);
        assert_eq!(breakdown.easy.total, 2);
        // Unrecognized labels are dropped, not errored.
        assert_eq!(overall_progress(&[], &questions).total, 2);
    }

    #[test]
    fn overall_sums_equal_per_bucket_sums() {
        let topic_id = TopicId::generate();
        let ids: Vec<QuestionId> = (0..6).map(|_| QuestionId::generate()).collect();
        let labels = ["Easy", "Medium", "Hard", "Theory", "Easy", "weird"];
        let questions: Vec<Question> = ids
            .iter()
            .zip(labels)
            .map(|(id, label)| question(*id, topic_id, label))
            .collect();
        let user = UserId::generate();
        let progress = vec![
            record(user, ids[0], true),
            record(user, ids[2], true),
            record(user, ids[3], false),
        ];

        let breakdown = progress_by_difficulty(&progress, &questions);
        let overall = overall_progress(&progress, &questions);
        let completed_sum: u32 = Difficulty::ALL
            .iter()
            .map(|b| breakdown.get(*b).completed)
            .sum();
        let total_sum: u32 = Difficulty::ALL.iter().map(|b| breakdown.get(*b).total).sum();
        assert_eq!(overall.completed, completed_sum);
        assert_eq!(overall.total, total_sum);
    }

    #[test]
    fn zero_totals_yield_zero_percent() {
        assert_eq!(BucketTally::default().percent(), 0);
        let overall = overall_progress(&[], &[]);
        assert_eq!(overall.percent, 0);
        assert_eq!(progress_by_learning_path(&[], &[], &[], &[], None), vec![]);
    }

    #[test]
    fn path_progress_counts_and_rounds() {
        let path_id = LearningPathId::generate();
        let topic_id = TopicId::generate();
        let ids: Vec<QuestionId> = (0..3).map(|_| QuestionId::generate()).collect();
        let questions: Vec<Question> = ids
            .iter()
            .map(|id| question(*id, topic_id, "Easy"))
            .collect();
        let topics = vec![topic(topic_id, path_id, "Arrays")];
        let paths = vec![path(path_id, "DSA")];
        let user = UserId::generate();
        let progress = vec![record(user, ids[0], true), record(user, ids[1], true)];

        let result = progress_by_learning_path(&progress, &questions, &topics, &paths, None);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].completed, 2);
        assert_eq!(result[0].total, 3);
        // 2/3 rounds to 67.
        assert_eq!(result[0].percent_complete, 67);
    }

    #[test]
    fn dangling_topic_or_path_references_are_excluded_silently() {
        let known_path = LearningPathId::generate();
        let known_topic = TopicId::generate();
        let orphan_topic = TopicId::generate();
        let questions = vec![
            question(QuestionId::generate(), known_topic, "Easy"),
            // Topic missing from the topic set.
            question(QuestionId::generate(), orphan_topic, "Easy"),
        ];
        let topics = vec![
            topic(known_topic, known_path, "Arrays"),
            // Topic whose path is missing from the path set.
            topic(orphan_topic, LearningPathId::generate(), "Ghost"),
        ];
        let paths = vec![path(known_path, "DSA")];

        let mut topics_with_orphan = topics.clone();
        topics_with_orphan.pop();
        let without_topic =
            progress_by_learning_path(&[], &questions, &topics_with_orphan, &paths, None);
        assert_eq!(without_topic[0].total, 1);

        let with_orphan = progress_by_learning_path(&[], &questions, &topics, &paths, None);
        assert_eq!(with_orphan[0].total, 1);
    }

    #[test]
    fn assigned_paths_restrict_output_and_empty_list_means_all() {
        let first = LearningPathId::generate();
        let second = LearningPathId::generate();
        let paths = vec![path(first, "DSA"), path(second, "SQL")];

        let all = progress_by_learning_path(&[], &[], &[], &paths, Some(&[]));
        assert_eq!(all.len(), 2);

        let only_second = progress_by_learning_path(&[], &[], &[], &paths, Some(&[second]));
        assert_eq!(only_second.len(), 1);
        assert_eq!(only_second[0].path_id, second);
    }

    #[test]
    fn path_output_preserves_catalog_order() {
        let ids: Vec<LearningPathId> = (0..4).map(|_| LearningPathId::generate()).collect();
        let paths: Vec<LearningPath> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| path(*id, &format!("Track {i}")))
            .collect();
        let result = progress_by_learning_path(&[], &[], &[], &paths, None);
        let out_ids: Vec<LearningPathId> = result.iter().map(|p| p.path_id).collect();
        assert_eq!(out_ids, ids);
    }
}
