use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use services::{AppServices, ChannelNotifier, Clock, QuizConfig};
use tracing_subscriber::EnvFilter;

#[cfg(feature = "desktop")]
mod desktop;
mod terminal;

const DEFAULT_HISTORY_LIMIT: u32 = 20;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeconds { raw: String },
    InvalidLimit { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeconds { raw } => write!(f, "invalid --seconds value: {raw}"),
            ArgsError::InvalidLimit { raw } => write!(f, "invalid --limit value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
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
    eprintln!(
        "  cargo run -p app -- [play]  [--db <sqlite_url>] [--seconds <n>] [--questions <file.json>]"
    );
    eprintln!("  cargo run -p app -- history [--db <sqlite_url>] [--limit <n>]");
    eprintln!("  cargo run -p app --features desktop -- ui [--db <sqlite_url>] [--seconds <n>]");
    eprintln!();
    eprintln!("Flags for every command:");
    eprintln!("  --verbose   debug logging (RUST_LOG overrides)");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://quiz.sqlite3");
    eprintln!("  --seconds 30");
    eprintln!("  --limit {DEFAULT_HISTORY_LIMIT}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_SECONDS_PER_QUESTION, QUIZ_QUESTIONS");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    History,
    Ui,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "history" => Some(Self::History),
            "ui" => Some(Self::Ui),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Args {
    config: QuizConfig,
    history_limit: u32,
    verbose: bool,
}

impl Args {
    /// Applies command-line flags on top of an env-derived config.
    fn parse(
        mut config: QuizConfig,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<Self, ArgsError> {
        let mut history_limit = DEFAULT_HISTORY_LIMIT;
        let mut verbose = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    config
                        .set_db_url(value.clone())
                        .map_err(|_| ArgsError::InvalidDbUrl { raw: value })?;
                }
                "--seconds" => {
                    let value = require_value(args, "--seconds")?;
                    config
                        .set_seconds(&value)
                        .map_err(|_| ArgsError::InvalidSeconds { raw: value })?;
                }
                "--questions" => {
                    let value = require_value(args, "--questions")?;
                    config.questions_path = Some(PathBuf::from(value));
                }
                "--limit" => {
                    let value = require_value(args, "--limit")?;
                    history_limit = value
                        .parse()
                        .ok()
                        .filter(|limit| *limit > 0)
                        .ok_or(ArgsError::InvalidLimit { raw: value })?;
                }
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        config.db_url = normalize_sqlite_url(config.db_url);
        Ok(Self {
            config,
            history_limit,
            verbose,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") || raw.starts_with("sqlite:file:")
    {
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
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" || db_url.starts_with("sqlite:file:") {
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

/// Logs go to stderr so the terminal front-end owns stdout.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: play in the terminal when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with('-') => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with('-') {
        argv.remove(0);
    }

    let env_config = QuizConfig::from_env()?;
    let mut iter = argv.into_iter();
    let parsed = Args::parse(env_config, &mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_logging(parsed.verbose);
    tracing::debug!(?cmd, db = %parsed.config.db_url, "starting");

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.config.db_url)?;
    let (notifier, notices) = ChannelNotifier::new();
    let services =
        AppServices::new_sqlite(parsed.config, Clock::default(), Arc::new(notifier)).await?;

    match cmd {
        Command::Play => {
            terminal::play(services.runner(), notices).await?;
            Ok(())
        }
        Command::History => print_history(&services, parsed.history_limit).await,
        Command::Ui => launch_ui(&services, notices).await,
    }
}

async fn print_history(
    services: &AppServices,
    limit: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows = services.history().recent(limit).await?;
    if rows.is_empty() {
        println!("No saved quiz runs yet.");
        return Ok(());
    }
    for row in rows {
        let record = &row.record;
        println!(
            "#{:<4} {}  {} / {}  ({} attempts, {} correct)",
            row.id.value(),
            record.timestamp_iso(),
            record.score,
            record.total_questions,
            record.attempts.len(),
            record.correct_attempts()
        );
    }
    Ok(())
}

#[cfg(feature = "desktop")]
async fn launch_ui(
    services: &AppServices,
    notices: tokio::sync::mpsc::UnboundedReceiver<services::Notice>,
) -> Result<(), Box<dyn std::error::Error>> {
    desktop::launch(services, notices).await;
    Ok(())
}

#[cfg(not(feature = "desktop"))]
#[allow(clippy::unused_async)]
async fn launch_ui(
    _services: &AppServices,
    _notices: tokio::sync::mpsc::UnboundedReceiver<services::Notice>,
) -> Result<(), Box<dyn std::error::Error>> {
    Err("the desktop window is not built in; rebuild with `--features desktop`".into())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
