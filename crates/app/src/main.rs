use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use lms_core::model::{Session, UserId};
use log::info;
use services::config::parse_base_url;
use services::{
    AdminTaskService, ApiConfig, AppServices, Clock, CourseViewerService, StudentTaskService,
};
use storage::repository::{LoginRepository, QuizResultRepository, Storage};
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://dev.sqlite3";
const DEFAULT_RESULTS_LIMIT: u32 = 20;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidLimit { raw: String },
    IncompleteLogin,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidLimit { raw } => write!(f, "invalid --limit value: {raw}"),
            ArgsError::IncompleteLogin => {
                write!(f, "--user-id and --token must be given together")
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

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn session(&self) -> Option<Session> {
        self.services.session().cloned()
    }

    fn admin_tasks(&self) -> Arc<AdminTaskService> {
        self.services.admin_tasks()
    }

    fn course_viewer(&self) -> Arc<CourseViewerService> {
        self.services.course_viewer()
    }

    fn student_tasks(&self) -> Arc<StudentTaskService> {
        self.services.student_tasks()
    }
}

#[derive(Debug, Default)]
struct Args {
    db_url: String,
    api_url: Option<String>,
    user_id: Option<String>,
    token: Option<String>,
    limit: Option<u32>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui      [--db <sqlite_url>] [--api-url <url>] [--user-id <id> --token <token>]");
    eprintln!("  cargo run -p app -- results [--db <sqlite_url>] [--limit <n>]");
    eprintln!("  cargo run -p app -- logout  [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:dev.sqlite3");
    eprintln!("  --api-url http://localhost:5000/api");
    eprintln!("  --limit {DEFAULT_RESULTS_LIMIT}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LMS_DB_URL, LMS_API_BASE_URL, LMS_API_TIMEOUT_SECS, LMS_USER_ID, LMS_TOKEN, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Results,
    Logout,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "results" => Some(Self::Results),
            "logout" => Some(Self::Logout),
            _ => None,
        }
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            db_url: env_value("LMS_DB_URL")
                .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url),
            user_id: env_value("LMS_USER_ID"),
            token: env_value("LMS_TOKEN"),
            ..Self::default()
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    parsed.db_url = normalize_sqlite_url(value);
                }
                "--api-url" => parsed.api_url = Some(require_value(args, "--api-url")?),
                "--user-id" => parsed.user_id = Some(require_value(args, "--user-id")?),
                "--token" => parsed.token = Some(require_value(args, "--token")?),
                "--limit" => {
                    let value = require_value(args, "--limit")?;
                    let limit = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidLimit { raw: value.clone() })?;
                    parsed.limit = Some(limit);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    /// Login given on the command line or in the environment, if any.
    fn login(&self) -> Result<Option<Session>, ArgsError> {
        let user_id = self.user_id.as_deref().map(str::trim).filter(|v| !v.is_empty());
        let token = self.token.as_deref().map(str::trim).filter(|v| !v.is_empty());
        match (user_id, token) {
            (Some(user_id), Some(token)) => Ok(Some(Session::new(UserId::new(user_id), token))),
            (None, None) => Ok(None),
            _ => Err(ArgsError::IncompleteLogin),
        }
    }

    fn api_config(&self) -> Result<ApiConfig, Box<dyn std::error::Error>> {
        let mut config = ApiConfig::from_env()?;
        if let Some(raw) = self.api_url.as_deref() {
            config.base_url = parse_base_url(raw)?;
        }
        Ok(config)
    }
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

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;

    match cmd {
        Command::Ui => {
            let login = parsed.login()?;
            let config = parsed.api_config()?;
            let services =
                AppServices::new_sqlite(&parsed.db_url, &config, Clock::default_clock(), login)
                    .await?;
            if services.session().is_none() {
                info!("no stored login; course and task screens will ask to log in");
            }

            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("LMS Dashboards")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Results => {
            let storage = Storage::sqlite(&parsed.db_url).await?;
            let limit = parsed.limit.unwrap_or(DEFAULT_RESULTS_LIMIT);
            let results = storage.quiz_results.list_results(limit).await?;
            if results.is_empty() {
                println!("No cached quiz results.");
            }
            for record in results {
                println!(
                    "{}  {} / {}  {}/{}",
                    record.timestamp.format("%d/%m/%Y %H:%M"),
                    record.course_title,
                    record.sublesson_title,
                    record.marks,
                    record.total_marks
                );
            }
            Ok(())
        }
        Command::Logout => {
            let storage = Storage::sqlite(&parsed.db_url).await?;
            storage.login.clear_session().await?;
            println!("Stored login cleared.");
            Ok(())
        }
    }
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

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
