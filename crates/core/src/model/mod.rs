mod account;
mod catalog;
mod ids;
mod portfolio;
mod profile;
mod progress;
mod user;

pub use ids::{BadgeId, LearningPathId, ParseIdError, QuestionId, TopicId, UserId};

pub use account::Account;
pub use catalog::{Difficulty, LearningPath, Question, Topic};
pub use portfolio::{
    Assessment, BadgeType, Certificate, Project, Publication, Training, UserBadge, UserSkill,
    WorkExperience,
};
pub use profile::{Profile, SocialLink};
pub use progress::ProgressRecord;
pub use user::User;
