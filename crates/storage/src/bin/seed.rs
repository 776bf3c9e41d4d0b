use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;
use yodha_core::model::{
    Assessment, BadgeId, BadgeType, Certificate, LearningPath, LearningPathId, Profile,
    ProgressRecord, Project, Publication, Question, QuestionId, Topic, TopicId, Training,
    UserBadge, UserId, UserSkill, WorkExperience,
};

use storage::sqlite::SqliteRepository;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    students: u32,
    questions_per_topic: u32,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidStudents { raw: String },
    InvalidQuestions { raw: String },
    InvalidDbUrl { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidStudents { raw } => write!(f, "invalid --students value: {raw}"),
            ArgsError::InvalidQuestions { raw } => write!(f, "invalid --questions value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("YODHA_DB_URL").unwrap_or_else(|_| "sqlite:dev.sqlite3".into());
        let mut students = std::env::var("YODHA_STUDENTS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(6);
        let mut questions_per_topic = std::env::var("YODHA_QUESTIONS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(4);
        let mut now: Option<DateTime<Utc>> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--students" => {
                    let value = require_value(&mut args, "--students")?;
                    students = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidStudents { raw: value.clone() })?;
                }
                "--questions" => {
                    let value = require_value(&mut args, "--questions")?;
                    questions_per_topic = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidQuestions { raw: value.clone() })?;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value.clone() })?
                        .with_timezone(&Utc);
                    now = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            students,
            questions_per_topic,
            now,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>    SQLite URL (default: sqlite:dev.sqlite3)");
    eprintln!("  --students <n>       Number of demo students to upsert (default: 6)");
    eprintln!("  --questions <n>      Questions per topic (default: 4)");
    eprintln!("  --now <rfc3339>      Fixed current time for deterministic seeding");
    eprintln!("  -h, --help           Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  YODHA_DB_URL, YODHA_STUDENTS, YODHA_QUESTIONS");
}

/// Stable ids so reseeding the same database upserts instead of duplicating.
fn stable_id(namespace: &str, n: u32) -> Uuid {
    Uuid::new_v5(
        &Uuid::NAMESPACE_OID,
        format!("yodha-seed/{namespace}/{n}").as_bytes(),
    )
}

const PATHS: [(&str, &str, &str); 3] = [
    (
        "DSA Fundamentals",
        "Arrays, strings and the basics of complexity.",
        "Easy",
    ),
    (
        "Advanced Algorithms",
        "Graphs, dynamic programming, greedy techniques.",
        "Hard",
    ),
    (
        "CS Core Theory",
        "Operating systems, networks and databases.",
        "Theory",
    ),
];

const TOPICS_PER_PATH: [&str; 2] = ["Warmup", "Deep Dive"];

const DIFFICULTIES: [&str; 4] = ["Easy", "Medium", "Hard", "Theory"];

const NAMES: [(&str, &str, &str, &str); 6] = [
    ("Asha Pillai", "asha", "Computer Engineering", "B.Tech"),
    ("Rohan Mehta", "rohan", "Computer Engineering", "B.Tech"),
    ("Neha Kulkarni", "neha", "Information Technology", "B.Tech"),
    ("Vikram Shah", "vikram", "Information Technology", "M.Tech"),
    ("Sara Fernandes", "sara", "Electronics", "B.Tech"),
    ("Arjun Nair", "arjun", "Computer Engineering", "MCA"),
];

fn demo_profile(n: u32, now: DateTime<Utc>) -> Profile {
    let idx = (n as usize) % NAMES.len();
    let (real_name, username, department, course) = NAMES[idx];
    Profile {
        id: UserId::new(stable_id("user", n)),
        real_name: real_name.to_owned(),
        username: format!("{username}{n}"),
        email: format!("{username}{n}@example.edu"),
        prn: format!("PRN{:04}", 1000 + n),
        bio: Some("Demo student account.".to_owned()),
        college_name: Some("Yodha Institute of Technology".to_owned()),
        location: Some("Pune".to_owned()),
        profile_picture_url: None,
        linkedin_url: Some(format!("https://linkedin.com/in/{username}{n}")),
        github_url: Some(format!("https://github.com/{username}{n}")),
        leetcode_url: None,
        hackerrank_url: None,
        gfg_url: None,
        cgpa: Some(7.0 + f64::from(n % 3)),
        grad_year: Some(2025 + i32::try_from(n % 3).unwrap_or(0)),
        department: Some(department.to_owned()),
        course: Some(course.to_owned()),
        active: Some(true),
        assigned_learning_paths: None,
        created_at: now,
        updated_at: now,
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let repo = SqliteRepository::connect(&args.db_url).await?;
    repo.migrate().await?;
    let now = args.now.unwrap_or_else(Utc::now);

    // Catalog: paths, topics, questions with difficulties rotating over
    // the four recognized labels.
    let mut question_ids: Vec<QuestionId> = Vec::new();
    for (p, (title, description, difficulty)) in PATHS.iter().enumerate() {
        let p = u32::try_from(p)?;
        let path = LearningPath {
            id: LearningPathId::new(stable_id("path", p)),
            title: (*title).to_owned(),
            description: (*description).to_owned(),
            difficulty: (*difficulty).to_owned(),
            sr: Some(i64::from(p) + 1),
            created_at: now,
            updated_at: now,
        };
        repo.upsert_learning_path(&path).await?;

        for (t, topic_name) in TOPICS_PER_PATH.iter().enumerate() {
            let t = u32::try_from(t)?;
            let topic = Topic {
                id: TopicId::new(stable_id("topic", p * 10 + t)),
                learning_path_id: path.id,
                name: format!("{title}: {topic_name}"),
                created_at: now,
                updated_at: now,
            };
            repo.upsert_topic(&topic).await?;

            for q in 0..args.questions_per_topic {
                let qn = (p * 100 + t * 10 + q) as usize;
                let question = Question {
                    id: QuestionId::new(stable_id("question", p * 1000 + t * 100 + q)),
                    topic_id: topic.id,
                    title: format!("{topic_name} problem {}", q + 1),
                    difficulty: DIFFICULTIES[qn % DIFFICULTIES.len()].to_owned(),
                    solution_link: None,
                    practice_link: Some(format!(
                        "https://leetcode.com/problems/demo-{p}-{t}-{q}/"
                    )),
                    created_at: now,
                    updated_at: now,
                };
                repo.upsert_question(&question).await?;
                question_ids.push(question.id);
            }
        }
    }

    let badge = BadgeType {
        id: BadgeId::new(stable_id("badge", 1)),
        name: "Early Bird".to_owned(),
        description: Some("Completed the first ten questions.".to_owned()),
        icon_name: "sunrise".to_owned(),
        background_color: "#FDE68A".to_owned(),
        text_color: "#92400E".to_owned(),
        created_at: now,
    };
    repo.insert_badge_type(&badge).await.ok();

    // Students with staggered completion so progress numbers differ.
    for n in 0..args.students {
        let profile = demo_profile(n, now);
        repo.upsert_profile(&profile, "password123").await?;

        let completed_count = (question_ids.len() * (n as usize + 1)) / (args.students as usize + 1);
        for (i, question_id) in question_ids.iter().enumerate() {
            let record = ProgressRecord {
                id: stable_id("progress", n * 10_000 + u32::try_from(i)?),
                user_id: profile.id,
                question_id: *question_id,
                is_completed: i < completed_count,
                is_marked_for_revision: i % 7 == 0,
                created_at: now,
                updated_at: now,
            };
            repo.upsert_progress(&record).await?;
        }

        repo.insert_training(&Training {
            id: stable_id("training", n),
            user_id: profile.id,
            title: "Summer Bootcamp".to_owned(),
            organization: "Yodha Labs".to_owned(),
            description: None,
            start_date: "2025-06-01".to_owned(),
            end_date: Some("2025-07-15".to_owned()),
            created_at: now,
            updated_at: now,
        })
        .await
        .ok();

        repo.insert_certificate(&Certificate {
            id: stable_id("certificate", n),
            user_id: profile.id,
            title: "SQL Essentials".to_owned(),
            issuer: "Coursera".to_owned(),
            issue_date: "2025-03-10".to_owned(),
            expiry_date: None,
            credential_url: None,
            created_at: now,
            updated_at: now,
        })
        .await
        .ok();

        repo.insert_skill(&UserSkill {
            id: stable_id("skill", n),
            user_id: profile.id,
            skill_name: "Rust".to_owned(),
            created_at: now,
        })
        .await
        .ok();

        repo.insert_assessment(&Assessment {
            id: stable_id("assessment", n),
            user_id: profile.id,
            title: "Aptitude Test".to_owned(),
            provider: "AMCAT".to_owned(),
            score: format!("{}", 60 + (n % 4) * 10),
            max_score: "100".to_owned(),
            assessment_date: "2025-04-12".to_owned(),
            certificate_url: None,
            created_at: now,
            updated_at: now,
        })
        .await
        .ok();

        repo.insert_work_experience(&WorkExperience {
            id: stable_id("work", n),
            user_id: profile.id,
            company: "Acme Systems".to_owned(),
            position: "Intern".to_owned(),
            location: Some("Pune".to_owned()),
            description: "Built internal dashboards.".to_owned(),
            technologies: Some(vec!["Rust".to_owned(), "SQLite".to_owned()]),
            start_date: "2025-01-02".to_owned(),
            end_date: Some("2025-05-30".to_owned()),
            created_at: now,
            updated_at: now,
        })
        .await
        .ok();

        repo.insert_project(&Project {
            id: stable_id("project", n),
            user_id: profile.id,
            title: "Pathfinder Visualizer".to_owned(),
            description: "Interactive graph search demos.".to_owned(),
            technologies: Some(vec!["Rust".to_owned()]),
            project_url: None,
            image_url: None,
            start_date: "2024-11-01".to_owned(),
            end_date: None,
            created_at: now,
            updated_at: now,
        })
        .await
        .ok();

        repo.insert_publication(&Publication {
            id: stable_id("publication", n),
            user_id: profile.id,
            title: "Cache-friendly Tries".to_owned(),
            authors: vec![profile.real_name.clone()],
            publication_name: "Student CS Review".to_owned(),
            publication_date: "2025-02-20".to_owned(),
            doi: None,
            url: None,
            created_at: now,
            updated_at: now,
        })
        .await
        .ok();

        // Students past the halfway mark earn the demo badge.
        if completed_count * 2 >= question_ids.len() {
            repo.insert_user_badge(&UserBadge {
                id: stable_id("user-badge", n),
                user_id: profile.id,
                badge_id: badge.id,
                earned_at: "2025-05-01".to_owned(),
            })
            .await
            .ok();
        }
    }

    println!(
        "Seeded {} students over {} questions into {}",
        args.students,
        question_ids.len(),
        args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
