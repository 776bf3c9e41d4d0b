use sqlx::Row;
use uuid::Uuid;

use yodha_core::model::{
    Account, Assessment, BadgeId, BadgeType, Certificate, LearningPath, LearningPathId, Profile,
    ProgressRecord, Project, Publication, Question, QuestionId, Topic, TopicId, Training,
    UserBadge, UserId, UserSkill, WorkExperience,
};

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn parse_uuid(field: &'static str, raw: &str) -> Result<Uuid, StorageError> {
    Uuid::parse_str(raw).map_err(|_| StorageError::Serialization(format!("invalid {field}: {raw}")))
}

pub(crate) fn user_id_from_text(raw: &str) -> Result<UserId, StorageError> {
    Ok(UserId::new(parse_uuid("user_id", raw)?))
}

pub(crate) fn question_id_from_text(raw: &str) -> Result<QuestionId, StorageError> {
    Ok(QuestionId::new(parse_uuid("question_id", raw)?))
}

pub(crate) fn topic_id_from_text(raw: &str) -> Result<TopicId, StorageError> {
    Ok(TopicId::new(parse_uuid("topic_id", raw)?))
}

pub(crate) fn path_id_from_text(raw: &str) -> Result<LearningPathId, StorageError> {
    Ok(LearningPathId::new(parse_uuid("learning_path_id", raw)?))
}

pub(crate) fn badge_id_from_text(raw: &str) -> Result<BadgeId, StorageError> {
    Ok(BadgeId::new(parse_uuid("badge_id", raw)?))
}

pub(crate) fn row_id_from_text(raw: &str) -> Result<Uuid, StorageError> {
    parse_uuid("id", raw)
}

/// Encodes a list column (technologies, authors, assigned paths) as JSON text.
pub(crate) fn list_to_json<T: serde::Serialize>(
    list: Option<&Vec<T>>,
) -> Result<Option<String>, StorageError> {
    list.map(|values| serde_json::to_string(values).map_err(ser))
        .transpose()
}

pub(crate) fn list_from_json<T: serde::de::DeserializeOwned>(
    raw: Option<String>,
) -> Result<Option<Vec<T>>, StorageError> {
    raw.map(|text| serde_json::from_str(&text).map_err(ser))
        .transpose()
}

pub(crate) fn map_profile_row(row: &sqlx::sqlite::SqliteRow) -> Result<Profile, StorageError> {
    let id = user_id_from_text(&row.try_get::<String, _>("id").map_err(ser)?)?;
    let assigned = list_from_json::<LearningPathId>(
        row.try_get::<Option<String>, _>("assigned_learning_paths")
            .map_err(ser)?,
    )?;

    Ok(Profile {
        id,
        real_name: row.try_get("real_name").map_err(ser)?,
        username: row.try_get("username").map_err(ser)?,
        email: row.try_get("email").map_err(ser)?,
        prn: row.try_get("prn").map_err(ser)?,
        bio: row.try_get("bio").map_err(ser)?,
        college_name: row.try_get("college_name").map_err(ser)?,
        location: row.try_get("location").map_err(ser)?,
        profile_picture_url: row.try_get("profile_picture_url").map_err(ser)?,
        linkedin_url: row.try_get("linkedin_url").map_err(ser)?,
        github_url: row.try_get("github_url").map_err(ser)?,
        leetcode_url: row.try_get("leetcode_url").map_err(ser)?,
        hackerrank_url: row.try_get("hackerrank_url").map_err(ser)?,
        gfg_url: row.try_get("gfg_url").map_err(ser)?,
        cgpa: row.try_get("cgpa").map_err(ser)?,
        grad_year: row.try_get("grad_year").map_err(ser)?,
        department: row.try_get("department").map_err(ser)?,
        course: row.try_get("course").map_err(ser)?,
        active: row.try_get("active").map_err(ser)?,
        assigned_learning_paths: assigned,
        created_at: row.try_get("created_at").map_err(ser)?,
        updated_at: row.try_get("updated_at").map_err(ser)?,
    })
}

pub(crate) fn map_account_row(row: &sqlx::sqlite::SqliteRow) -> Result<Account, StorageError> {
    Ok(Account {
        id: user_id_from_text(&row.try_get::<String, _>("id").map_err(ser)?)?,
        username: row.try_get("username").map_err(ser)?,
        prn: row.try_get("prn").map_err(ser)?,
        email: row.try_get("email").map_err(ser)?,
        department: row.try_get("department").map_err(ser)?,
        course: row.try_get("course").map_err(ser)?,
        grad_year: row.try_get("grad_year").map_err(ser)?,
    })
}

pub(crate) fn map_path_row(row: &sqlx::sqlite::SqliteRow) -> Result<LearningPath, StorageError> {
    Ok(LearningPath {
        id: path_id_from_text(&row.try_get::<String, _>("id").map_err(ser)?)?,
        title: row.try_get("title").map_err(ser)?,
        description: row.try_get("description").map_err(ser)?,
        difficulty: row.try_get("difficulty").map_err(ser)?,
        sr: row.try_get("sr").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
        updated_at: row.try_get("updated_at").map_err(ser)?,
    })
}

pub(crate) fn map_topic_row(row: &sqlx::sqlite::SqliteRow) -> Result<Topic, StorageError> {
    Ok(Topic {
        id: topic_id_from_text(&row.try_get::<String, _>("id").map_err(ser)?)?,
        learning_path_id: path_id_from_text(
            &row.try_get::<String, _>("learning_path_id").map_err(ser)?,
        )?,
        name: row.try_get("name").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
        updated_at: row.try_get("updated_at").map_err(ser)?,
    })
}

pub(crate) fn map_question_row(row: &sqlx::sqlite::SqliteRow) -> Result<Question, StorageError> {
    Ok(Question {
        id: question_id_from_text(&row.try_get::<String, _>("id").map_err(ser)?)?,
        topic_id: topic_id_from_text(&row.try_get::<String, _>("topic_id").map_err(ser)?)?,
        title: row.try_get("title").map_err(ser)?,
        difficulty: row.try_get("difficulty").map_err(ser)?,
        solution_link: row.try_get("solution_link").map_err(ser)?,
        practice_link: row.try_get("practice_link").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
        updated_at: row.try_get("updated_at").map_err(ser)?,
    })
}

pub(crate) fn map_progress_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<ProgressRecord, StorageError> {
    Ok(ProgressRecord {
        id: row_id_from_text(&row.try_get::<String, _>("id").map_err(ser)?)?,
        user_id: user_id_from_text(&row.try_get::<String, _>("user_id").map_err(ser)?)?,
        question_id: question_id_from_text(
            &row.try_get::<String, _>("question_id").map_err(ser)?,
        )?,
        is_completed: row.try_get("is_completed").map_err(ser)?,
        is_marked_for_revision: row.try_get("is_marked_for_revision").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
        updated_at: row.try_get("updated_at").map_err(ser)?,
    })
}

pub(crate) fn map_training_row(row: &sqlx::sqlite::SqliteRow) -> Result<Training, StorageError> {
    Ok(Training {
        id: row_id_from_text(&row.try_get::<String, _>("id").map_err(ser)?)?,
        user_id: user_id_from_text(&row.try_get::<String, _>("user_id").map_err(ser)?)?,
        title: row.try_get("title").map_err(ser)?,
        organization: row.try_get("organization").map_err(ser)?,
        description: row.try_get("description").map_err(ser)?,
        start_date: row.try_get("start_date").map_err(ser)?,
        end_date: row.try_get("end_date").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
        updated_at: row.try_get("updated_at").map_err(ser)?,
    })
}

pub(crate) fn map_assessment_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<Assessment, StorageError> {
    Ok(Assessment {
        id: row_id_from_text(&row.try_get::<String, _>("id").map_err(ser)?)?,
        user_id: user_id_from_text(&row.try_get::<String, _>("user_id").map_err(ser)?)?,
        title: row.try_get("title").map_err(ser)?,
        provider: row.try_get("provider").map_err(ser)?,
        score: row.try_get("score").map_err(ser)?,
        max_score: row.try_get("max_score").map_err(ser)?,
        assessment_date: row.try_get("assessment_date").map_err(ser)?,
        certificate_url: row.try_get("certificate_url").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
        updated_at: row.try_get("updated_at").map_err(ser)?,
    })
}

pub(crate) fn map_certificate_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<Certificate, StorageError> {
    Ok(Certificate {
        id: row_id_from_text(&row.try_get::<String, _>("id").map_err(ser)?)?,
        user_id: user_id_from_text(&row.try_get::<String, _>("user_id").map_err(ser)?)?,
        title: row.try_get("title").map_err(ser)?,
        issuer: row.try_get("issuer").map_err(ser)?,
        issue_date: row.try_get("issue_date").map_err(ser)?,
        expiry_date: row.try_get("expiry_date").map_err(ser)?,
        credential_url: row.try_get("credential_url").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
        updated_at: row.try_get("updated_at").map_err(ser)?,
    })
}

pub(crate) fn map_work_row(row: &sqlx::sqlite::SqliteRow) -> Result<WorkExperience, StorageError> {
    Ok(WorkExperience {
        id: row_id_from_text(&row.try_get::<String, _>("id").map_err(ser)?)?,
        user_id: user_id_from_text(&row.try_get::<String, _>("user_id").map_err(ser)?)?,
        company: row.try_get("company").map_err(ser)?,
        position: row.try_get("position").map_err(ser)?,
        location: row.try_get("location").map_err(ser)?,
        description: row.try_get("description").map_err(ser)?,
        technologies: list_from_json(row.try_get("technologies").map_err(ser)?)?,
        start_date: row.try_get("start_date").map_err(ser)?,
        end_date: row.try_get("end_date").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
        updated_at: row.try_get("updated_at").map_err(ser)?,
    })
}

pub(crate) fn map_project_row(row: &sqlx::sqlite::SqliteRow) -> Result<Project, StorageError> {
    Ok(Project {
        id: row_id_from_text(&row.try_get::<String, _>("id").map_err(ser)?)?,
        user_id: user_id_from_text(&row.try_get::<String, _>("user_id").map_err(ser)?)?,
        title: row.try_get("title").map_err(ser)?,
        description: row.try_get("description").map_err(ser)?,
        technologies: list_from_json(row.try_get("technologies").map_err(ser)?)?,
        project_url: row.try_get("project_url").map_err(ser)?,
        image_url: row.try_get("image_url").map_err(ser)?,
        start_date: row.try_get("start_date").map_err(ser)?,
        end_date: row.try_get("end_date").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
        updated_at: row.try_get("updated_at").map_err(ser)?,
    })
}

pub(crate) fn map_publication_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<Publication, StorageError> {
    let authors: Vec<String> = list_from_json(Some(
        row.try_get::<String, _>("authors").map_err(ser)?,
    ))?
    .unwrap_or_default();

    Ok(Publication {
        id: row_id_from_text(&row.try_get::<String, _>("id").map_err(ser)?)?,
        user_id: user_id_from_text(&row.try_get::<String, _>("user_id").map_err(ser)?)?,
        title: row.try_get("title").map_err(ser)?,
        authors,
        publication_name: row.try_get("publication_name").map_err(ser)?,
        publication_date: row.try_get("publication_date").map_err(ser)?,
        doi: row.try_get("doi").map_err(ser)?,
        url: row.try_get("url").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
        updated_at: row.try_get("updated_at").map_err(ser)?,
    })
}

pub(crate) fn map_skill_row(row: &sqlx::sqlite::SqliteRow) -> Result<UserSkill, StorageError> {
    Ok(UserSkill {
        id: row_id_from_text(&row.try_get::<String, _>("id").map_err(ser)?)?,
        user_id: user_id_from_text(&row.try_get::<String, _>("user_id").map_err(ser)?)?,
        skill_name: row.try_get("skill_name").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
    })
}

pub(crate) fn map_user_badge_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<UserBadge, StorageError> {
    Ok(UserBadge {
        id: row_id_from_text(&row.try_get::<String, _>("id").map_err(ser)?)?,
        user_id: user_id_from_text(&row.try_get::<String, _>("user_id").map_err(ser)?)?,
        badge_id: badge_id_from_text(&row.try_get::<String, _>("badge_id").map_err(ser)?)?,
        earned_at: row.try_get("earned_at").map_err(ser)?,
    })
}

pub(crate) fn map_badge_type_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<BadgeType, StorageError> {
    Ok(BadgeType {
        id: badge_id_from_text(&row.try_get::<String, _>("id").map_err(ser)?)?,
        name: row.try_get("name").map_err(ser)?,
        description: row.try_get("description").map_err(ser)?,
        icon_name: row.try_get("icon_name").map_err(ser)?,
        background_color: row.try_get("background_color").map_err(ser)?,
        text_color: row.try_get("text_color").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
    })
}
