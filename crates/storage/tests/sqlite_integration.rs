use yodha_core::model::{
    Account, Assessment, BadgeId, BadgeType, Certificate, LearningPath, LearningPathId, Profile,
    ProgressRecord, Project, Publication, Question, QuestionId, Topic, TopicId, Training,
    UserBadge, UserId, UserSkill, WorkExperience,
};
use yodha_core::progress::{overall_progress, progress_by_learning_path};
use yodha_core::time::fixed_now;

use storage::repository::{
    AuthRepository, CatalogRepository, PortfolioRepository, ProfileRepository, ProgressRepository,
    SessionRepository,
};
use storage::sqlite::SqliteRepository;

fn build_profile(username: &str, prn: &str) -> Profile {
    let now = fixed_now();
    Profile {
        id: UserId::generate(),
        real_name: format!("{username} surname"),
        username: username.to_owned(),
        email: format!("{username}@example.edu"),
        prn: prn.to_owned(),
        bio: None,
        college_name: None,
        location: None,
        profile_picture_url: None,
        linkedin_url: None,
        github_url: None,
        leetcode_url: None,
        hackerrank_url: None,
        gfg_url: None,
        cgpa: Some(8.2),
        grad_year: Some(2026),
        department: Some("Computer Engineering".to_owned()),
        course: Some("B.Tech".to_owned()),
        active: Some(true),
        assigned_learning_paths: None,
        created_at: now,
        updated_at: now,
    }
}

fn build_path(title: &str, sr: i64) -> LearningPath {
    let now = fixed_now();
    LearningPath {
        id: LearningPathId::generate(),
        title: title.to_owned(),
        description: String::new(),
        difficulty: "Medium".to_owned(),
        sr: Some(sr),
        created_at: now,
        updated_at: now,
    }
}

fn build_topic(path: &LearningPath, name: &str) -> Topic {
    let now = fixed_now();
    Topic {
        id: TopicId::generate(),
        learning_path_id: path.id,
        name: name.to_owned(),
        created_at: now,
        updated_at: now,
    }
}

fn build_question(topic: &Topic, title: &str, difficulty: &str) -> Question {
    let now = fixed_now();
    Question {
        id: QuestionId::generate(),
        topic_id: topic.id,
        title: title.to_owned(),
        difficulty: difficulty.to_owned(),
        solution_link: None,
        practice_link: None,
        created_at: now,
        updated_at: now,
    }
}

fn build_progress(user_id: UserId, question_id: QuestionId, completed: bool) -> ProgressRecord {
    let now = fixed_now();
    ProgressRecord {
        id: uuid::Uuid::new_v4(),
        user_id,
        question_id,
        is_completed: completed,
        is_marked_for_revision: false,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn sqlite_roundtrip_profiles_and_credentials() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_profiles?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let mut profile = build_profile("asha", "PRN1001");
    profile.assigned_learning_paths = Some(vec![LearningPathId::generate()]);
    repo.upsert_profile(&profile, "s3cret").await.unwrap();

    let listed = repo.list_profiles().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], profile);

    let fetched = repo.get_profile(profile.id).await.unwrap();
    assert_eq!(fetched.as_ref(), Some(&profile));

    let assigned = repo.assigned_learning_paths(profile.id).await.unwrap();
    assert_eq!(assigned, profile.assigned_learning_paths);

    // Correct credentials resolve; wrong password and unknown PRN do not.
    let account = repo.authenticate("PRN1001", "s3cret").await.unwrap();
    assert_eq!(account.map(|a| a.id), Some(profile.id));
    assert!(repo.authenticate("PRN1001", "wrong").await.unwrap().is_none());
    assert!(repo.authenticate("PRN9999", "s3cret").await.unwrap().is_none());

    let missing = repo.get_profile(UserId::generate()).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn sqlite_catalog_and_progress_feed_the_aggregator() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_catalog?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let profile = build_profile("rohan", "PRN1002");
    repo.upsert_profile(&profile, "pw").await.unwrap();

    let path = build_path("DSA Fundamentals", 1);
    repo.upsert_learning_path(&path).await.unwrap();
    let topic = build_topic(&path, "Arrays");
    repo.upsert_topic(&topic).await.unwrap();

    let q1 = build_question(&topic, "Two Sum", "Easy");
    let q2 = build_question(&topic, "3Sum", "Medium");
    let q3 = build_question(&topic, "LRU Cache", "Hard");
    for q in [&q1, &q2, &q3] {
        repo.upsert_question(q).await.unwrap();
    }

    repo.upsert_progress(&build_progress(profile.id, q1.id, true))
        .await
        .unwrap();
    repo.upsert_progress(&build_progress(profile.id, q2.id, false))
        .await
        .unwrap();

    let paths = repo.list_learning_paths().await.unwrap();
    let topics = repo.list_topics().await.unwrap();
    let questions = repo.list_questions().await.unwrap();
    let progress = repo.list_progress(profile.id).await.unwrap();

    assert_eq!(paths.len(), 1);
    assert_eq!(topics.len(), 1);
    assert_eq!(questions.len(), 3);
    assert_eq!(progress.len(), 2);

    let per_path = progress_by_learning_path(&progress, &questions, &topics, &paths, None);
    assert_eq!(per_path.len(), 1);
    assert_eq!(per_path[0].completed, 1);
    assert_eq!(per_path[0].total, 3);
    assert_eq!(per_path[0].percent_complete, 33);

    let overall = overall_progress(&progress, &questions);
    assert_eq!(overall.completed, 1);
    assert_eq!(overall.total, 3);
}

#[tokio::test]
async fn sqlite_progress_upsert_replaces_existing_row() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_upsert?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let profile = build_profile("neha", "PRN1003");
    repo.upsert_profile(&profile, "pw").await.unwrap();
    let path = build_path("Theory", 1);
    repo.upsert_learning_path(&path).await.unwrap();
    let topic = build_topic(&path, "OS");
    repo.upsert_topic(&topic).await.unwrap();
    let question = build_question(&topic, "Paging", "Theory");
    repo.upsert_question(&question).await.unwrap();

    let mut record = build_progress(profile.id, question.id, false);
    repo.upsert_progress(&record).await.unwrap();
    record.is_completed = true;
    repo.upsert_progress(&record).await.unwrap();

    let progress = repo.list_progress(profile.id).await.unwrap();
    assert_eq!(progress.len(), 1);
    assert!(progress[0].is_completed);
}

#[tokio::test]
async fn sqlite_portfolio_collections_roundtrip() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_portfolio?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let now = fixed_now();
    let profile = build_profile("vikram", "PRN1004");
    repo.upsert_profile(&profile, "pw").await.unwrap();

    let training = Training {
        id: uuid::Uuid::new_v4(),
        user_id: profile.id,
        title: "Summer Bootcamp".to_owned(),
        organization: "Yodha Labs".to_owned(),
        description: Some("Intensive DSA drills.".to_owned()),
        start_date: "2025-06-01".to_owned(),
        end_date: None,
        created_at: now,
        updated_at: now,
    };
    repo.insert_training(&training).await.unwrap();

    let assessment = Assessment {
        id: uuid::Uuid::new_v4(),
        user_id: profile.id,
        title: "Aptitude Test".to_owned(),
        provider: "AMCAT".to_owned(),
        score: "82".to_owned(),
        max_score: "100".to_owned(),
        assessment_date: "2025-04-12".to_owned(),
        certificate_url: Some("https://amcat.example/cert/82".to_owned()),
        created_at: now,
        updated_at: now,
    };
    repo.insert_assessment(&assessment).await.unwrap();

    let certificate = Certificate {
        id: uuid::Uuid::new_v4(),
        user_id: profile.id,
        title: "SQL Essentials".to_owned(),
        issuer: "Coursera".to_owned(),
        issue_date: "2025-03-10".to_owned(),
        expiry_date: Some("2027-03-10".to_owned()),
        credential_url: None,
        created_at: now,
        updated_at: now,
    };
    repo.insert_certificate(&certificate).await.unwrap();

    let work = WorkExperience {
        id: uuid::Uuid::new_v4(),
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
    };
    repo.insert_work_experience(&work).await.unwrap();

    let project = Project {
        id: uuid::Uuid::new_v4(),
        user_id: profile.id,
        title: "Pathfinder Visualizer".to_owned(),
        description: "Interactive graph search demos.".to_owned(),
        technologies: None,
        project_url: Some("https://github.com/vikram/pathfinder".to_owned()),
        image_url: None,
        start_date: "2024-11-01".to_owned(),
        end_date: None,
        created_at: now,
        updated_at: now,
    };
    repo.insert_project(&project).await.unwrap();

    let publication = Publication {
        id: uuid::Uuid::new_v4(),
        user_id: profile.id,
        title: "Cache-friendly Tries".to_owned(),
        authors: vec!["V. Shah".to_owned(), "A. Pillai".to_owned()],
        publication_name: "Student CS Review".to_owned(),
        publication_date: "2025-02-20".to_owned(),
        doi: Some("10.1000/demo.42".to_owned()),
        url: None,
        created_at: now,
        updated_at: now,
    };
    repo.insert_publication(&publication).await.unwrap();

    let skill = UserSkill {
        id: uuid::Uuid::new_v4(),
        user_id: profile.id,
        skill_name: "Rust".to_owned(),
        created_at: now,
    };
    repo.insert_skill(&skill).await.unwrap();

    let badge_type = BadgeType {
        id: BadgeId::generate(),
        name: "Early Bird".to_owned(),
        description: None,
        icon_name: "sunrise".to_owned(),
        background_color: "#FDE68A".to_owned(),
        text_color: "#92400E".to_owned(),
        created_at: now,
    };
    repo.insert_badge_type(&badge_type).await.unwrap();

    let user_badge = UserBadge {
        id: uuid::Uuid::new_v4(),
        user_id: profile.id,
        badge_id: badge_type.id,
        earned_at: "2025-05-01".to_owned(),
    };
    repo.insert_user_badge(&user_badge).await.unwrap();

    assert_eq!(repo.trainings(profile.id).await.unwrap(), vec![training]);
    assert_eq!(repo.assessments(profile.id).await.unwrap(), vec![assessment]);
    assert_eq!(
        repo.certificates(profile.id).await.unwrap(),
        vec![certificate]
    );
    assert_eq!(repo.work_experience(profile.id).await.unwrap(), vec![work]);
    assert_eq!(repo.projects(profile.id).await.unwrap(), vec![project]);
    assert_eq!(
        repo.publications(profile.id).await.unwrap(),
        vec![publication]
    );
    assert_eq!(repo.skills(profile.id).await.unwrap(), vec![skill]);
    assert_eq!(
        repo.user_badges(profile.id).await.unwrap(),
        vec![user_badge.clone()]
    );

    // The earned badge resolves against the badge catalog.
    let catalog = repo.badge_types().await.unwrap();
    assert_eq!(catalog, vec![badge_type.clone()]);
    assert_eq!(catalog[0].id, user_badge.badge_id);

    // Another user's portfolio stays empty.
    let other = build_profile("sara", "PRN1005");
    repo.upsert_profile(&other, "pw").await.unwrap();
    assert!(repo.trainings(other.id).await.unwrap().is_empty());
    assert!(repo.publications(other.id).await.unwrap().is_empty());
    assert!(repo.user_badges(other.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn sqlite_session_stores_one_account() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_session?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.load_session().await.unwrap().is_none());

    let account = Account {
        id: UserId::generate(),
        username: "asha1".to_owned(),
        prn: "PRN1001".to_owned(),
        email: "asha1@example.edu".to_owned(),
        department: Some("Computer Engineering".to_owned()),
        course: None,
        grad_year: Some(2026),
    };
    repo.store_session(&account).await.unwrap();
    assert_eq!(repo.load_session().await.unwrap(), Some(account.clone()));

    // Storing again overwrites the single slot rather than adding rows.
    let mut renamed = account.clone();
    renamed.username = "asha-renamed".to_owned();
    repo.store_session(&renamed).await.unwrap();
    assert_eq!(repo.load_session().await.unwrap(), Some(renamed));

    repo.clear_session().await.unwrap();
    assert!(repo.load_session().await.unwrap().is_none());
}
