use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use services::notify::BufferedNotifier;
use services::view::{UserDetailView, ViewState};
use services::{AppServices, Clock};
use yodha_core::model::UserId;
use yodha_core::roster::{FilterSpec, SortDirection, SortKey, SortSpec};
use yodha_core::time::format_date;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidUserId { raw: String },
    InvalidGradYear { raw: String },
    InvalidSortKey { raw: String },
    MissingUserId,
    MissingCredentials,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidUserId { raw } => write!(f, "invalid user id: {raw}"),
            ArgsError::InvalidGradYear { raw } => write!(f, "invalid --grad-year value: {raw}"),
            ArgsError::InvalidSortKey { raw } => write!(
                f,
                "invalid --sort value: {raw} (expected name, email, department, course or grad-year)"
            ),
            ArgsError::MissingUserId => write!(f, "user requires an id argument"),
            ArgsError::MissingCredentials => {
                write!(f, "login requires --prn and --password")
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- <command> [--db <sqlite_url>] [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  login --prn <prn> --password <password>   Sign in and persist the session");
    eprintln!("  logout                                    Clear the persisted session");
    eprintln!("  whoami                                    Show the current session");
    eprintln!("  users [options]                           List users");
    eprintln!("  user <id>                                 Full detail for one user");
    eprintln!();
    eprintln!("Options for users:");
    eprintln!("  --search <text>           Substring match on name, email or id");
    eprintln!("  --department <name>       Keep only this department (repeatable)");
    eprintln!("  --course <name>           Keep only this course (repeatable)");
    eprintln!("  --grad-year <year>        Keep only this graduation year (repeatable)");
    eprintln!("  --sort <key>              name | email | department | course | grad-year");
    eprintln!("  --desc                    Sort descending");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:dev.sqlite3   (or YODHA_DB_URL)");
}

#[derive(Debug)]
enum Command {
    Login { prn: String, password: String },
    Logout,
    Whoami,
    Users { filter: FilterSpec, sort: SortSpec },
    User { id: UserId },
}

struct Parsed {
    db_url: String,
    command: Command,
}

fn parse_sort_key(raw: &str) -> Result<SortKey, ArgsError> {
    match raw {
        "name" => Ok(SortKey::Name),
        "email" => Ok(SortKey::Email),
        "department" => Ok(SortKey::Department),
        "course" => Ok(SortKey::Course),
        "grad-year" => Ok(SortKey::GradYear),
        _ => Err(ArgsError::InvalidSortKey {
            raw: raw.to_owned(),
        }),
    }
}

fn parse_args() -> Result<Parsed, ArgsError> {
    let mut argv = std::env::args().skip(1).peekable();

    let subcommand = match argv.peek().map(String::as_str) {
        None | Some("--help" | "-h") => {
            print_usage();
            std::process::exit(0);
        }
        Some(_) => argv.next().unwrap_or_default(),
    };

    let mut db_url = std::env::var("YODHA_DB_URL")
        .ok()
        .map_or_else(|| "sqlite://dev.sqlite3".into(), normalize_sqlite_url);

    let mut prn: Option<String> = None;
    let mut password: Option<String> = None;
    let mut filter = FilterSpec::default();
    let mut sort_key = SortKey::Name;
    let mut descending = false;
    let mut user_id: Option<UserId> = None;

    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--db" => {
                let value = require_value(&mut argv, "--db")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidDbUrl { raw: value });
                }
                db_url = normalize_sqlite_url(value);
            }
            "--prn" => prn = Some(require_value(&mut argv, "--prn")?),
            "--password" => password = Some(require_value(&mut argv, "--password")?),
            "--search" => filter.search = require_value(&mut argv, "--search")?,
            "--department" => filter
                .departments
                .push(require_value(&mut argv, "--department")?),
            "--course" => filter.courses.push(require_value(&mut argv, "--course")?),
            "--grad-year" => {
                let value = require_value(&mut argv, "--grad-year")?;
                let year = value
                    .parse::<i32>()
                    .map_err(|_| ArgsError::InvalidGradYear { raw: value.clone() })?;
                filter.grad_years.push(year);
            }
            "--sort" => {
                let value = require_value(&mut argv, "--sort")?;
                sort_key = parse_sort_key(&value)?;
            }
            "--desc" => descending = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other if other.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
            other => {
                let id = UserId::from_str(other).map_err(|_| ArgsError::InvalidUserId {
                    raw: other.to_owned(),
                })?;
                user_id = Some(id);
            }
        }
    }

    let command = match subcommand.as_str() {
        "login" => match (prn, password) {
            (Some(prn), Some(password)) => Command::Login { prn, password },
            _ => return Err(ArgsError::MissingCredentials),
        },
        "logout" => Command::Logout,
        "whoami" => Command::Whoami,
        "users" => {
            let direction = if descending {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            Command::Users {
                filter,
                sort: SortSpec {
                    key: sort_key,
                    direction,
                },
            }
        }
        "user" => Command::User {
            id: user_id.ok_or(ArgsError::MissingUserId)?,
        },
        other => return Err(ArgsError::UnknownArg(other.to_owned())),
    };

    Ok(Parsed { db_url, command })
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent) / 5;
    format!("[{}{}] {percent:>3}%", "#".repeat(filled), ".".repeat(20 - filled))
}

fn grad_year_text(year: Option<i32>) -> String {
    year.map_or_else(|| "N/A".to_owned(), |y| y.to_string())
}

fn print_notices(notifier: &BufferedNotifier) {
    for notice in notifier.drain() {
        eprintln!("note: {}", notice.message);
    }
}

/// Commands that read user data require a restored session first,
/// mirroring the gated admin surface.
async fn require_session(services: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let auth = services.auth();
    if auth.restore().await?.is_none() {
        return Err("not logged in; run `app login --prn <prn> --password <password>`".into());
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = parse_args().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so
    // core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;

    let notifier = Arc::new(BufferedNotifier::new());
    let services =
        AppServices::new_sqlite(&parsed.db_url, Clock::default_clock(), notifier.clone()).await?;

    match parsed.command {
        Command::Login { prn, password } => {
            let account = services.auth().login(&prn, &password).await?;
            println!("Logged in as {} ({})", account.username, account.prn);
        }
        Command::Logout => {
            services.auth().logout().await?;
            println!("Logged out.");
        }
        Command::Whoami => match services.auth().restore().await? {
            Some(account) => {
                println!("{} ({})", account.username, account.prn);
                println!("  email:      {}", account.email);
                println!("  department: {}", account.department.unwrap_or_default());
                println!("  course:     {}", account.course.unwrap_or_default());
                println!("  grad year:  {}", grad_year_text(account.grad_year));
            }
            None => println!("Not logged in."),
        },
        Command::Users { filter, sort } => {
            require_session(&services).await?;
            let state = services.views().load_dashboard(&filter, &sort).await;
            match state {
                ViewState::Loaded(dashboard) => {
                    println!(
                        "{:<24} {:<30} {:<24} {:<10} {:<9}",
                        "NAME", "EMAIL", "DEPARTMENT", "COURSE", "GRAD YEAR"
                    );
                    for user in &dashboard.users {
                        println!(
                            "{:<24} {:<30} {:<24} {:<10} {:<9}",
                            user.name,
                            user.email,
                            user.department,
                            user.course,
                            grad_year_text(user.grad_year)
                        );
                    }
                    println!();
                    println!("{} user(s)", dashboard.users.len());
                }
                ViewState::Errored(message) => return Err(message.into()),
                ViewState::Loading => {}
            }
        }
        Command::User { id } => {
            require_session(&services).await?;
            let state = services.views().load_user_detail(id).await;
            match state {
                ViewState::Loaded(UserDetailView::NotFound) => {
                    println!("User {id} not found.");
                }
                ViewState::Loaded(UserDetailView::Found(detail)) => {
                    println!("{} <{}>", detail.user.name, detail.user.email);
                    println!("  prn:        {}", detail.profile.prn);
                    println!("  department: {}", detail.user.department);
                    println!("  course:     {}", detail.user.course);
                    println!("  grad year:  {}", grad_year_text(detail.user.grad_year));
                    println!(
                        "  joined:     {}",
                        detail.user.join_date.format("%b %-d, %Y")
                    );
                    for link in detail.profile.social_links() {
                        println!("  {}: {}", link.label, link.url);
                    }

                    println!();
                    let overall = detail.progress.overall;
                    println!(
                        "Overall   {} {}/{}",
                        progress_bar(overall.percent),
                        overall.completed,
                        overall.total
                    );
                    let breakdown = &detail.progress.breakdown;
                    for (label, tally) in [
                        ("Easy", breakdown.easy),
                        ("Medium", breakdown.medium),
                        ("Hard", breakdown.hard),
                        ("Theory", breakdown.theory),
                    ] {
                        println!(
                            "{label:<9} {} {}/{}",
                            progress_bar(tally.percent()),
                            tally.completed,
                            tally.total
                        );
                    }

                    if !detail.progress.paths.is_empty() {
                        println!();
                        println!("Learning paths:");
                        for path in &detail.progress.paths {
                            println!(
                                "  {:<28} {} {}/{}",
                                path.title,
                                progress_bar(path.percent_complete),
                                path.completed,
                                path.total
                            );
                        }
                    }

                    let portfolio = &detail.portfolio;
                    println!();
                    println!("Portfolio:");
                    for training in &portfolio.trainings {
                        println!(
                            "  training:    {} ({}, {})",
                            training.title,
                            training.organization,
                            format_date(&training.start_date)
                        );
                    }
                    for certificate in &portfolio.certificates {
                        println!(
                            "  certificate: {} ({}, {})",
                            certificate.title,
                            certificate.issuer,
                            format_date(&certificate.issue_date)
                        );
                    }
                    for assessment in &portfolio.assessments {
                        println!(
                            "  assessment:  {} ({}/{})",
                            assessment.title, assessment.score, assessment.max_score
                        );
                    }
                    for work in &portfolio.work_experience {
                        println!("  work:        {} at {}", work.position, work.company);
                    }
                    for project in &portfolio.projects {
                        println!("  project:     {}", project.title);
                    }
                    for publication in &portfolio.publications {
                        println!("  publication: {}", publication.title);
                    }
                    if !portfolio.skills.is_empty() {
                        let skills: Vec<&str> = portfolio
                            .skills
                            .iter()
                            .map(|s| s.skill_name.as_str())
                            .collect();
                        println!("  skills:      {}", skills.join(", "));
                    }
                    for badge in &portfolio.badges {
                        println!(
                            "  badge:       {} (earned {})",
                            badge.name,
                            format_date(&badge.earned_at)
                        );
                    }
                }
                ViewState::Errored(message) => return Err(message.into()),
                ViewState::Loading => {}
            }
        }
    }

    print_notices(&notifier);
    Ok(())
}

#[tokio::main]
async fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
