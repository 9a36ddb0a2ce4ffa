use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{Clock, QuizLoopService};
use storage::repository::Storage;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidStart { raw: String },
    InvalidBankPath { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidStart { raw } => {
                write!(f, "invalid --start value: {raw} (expected a question number from 1)")
            }
            ArgsError::InvalidBankPath { raw } => write!(f, "invalid --bank value: {raw:?}"),
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

struct DesktopApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    bank: Option<PathBuf>,
    /// Zero-based index of the first question shown.
    start_index: usize,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--bank <path.json>] [--start <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  bundled GATE 2024 networking questions, starting at question 1");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_BANK, QUIZ_START, RUST_LOG");
}

fn parse_start(raw: String) -> Result<usize, ArgsError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(ArgsError::InvalidStart { raw }),
    }
}

fn parse_bank(raw: String) -> Result<PathBuf, ArgsError> {
    if raw.trim().is_empty() {
        return Err(ArgsError::InvalidBankPath { raw });
    }
    Ok(PathBuf::from(raw))
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Self>, ArgsError> {
        let mut bank = env("QUIZ_BANK").map(parse_bank).transpose()?;
        let mut start_index = env("QUIZ_START").map(parse_start).transpose()?.unwrap_or(0);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bank" => {
                    let value = require_value(args, "--bank")?;
                    bank = Some(parse_bank(value)?);
                }
                "--start" => {
                    let value = require_value(args, "--start")?;
                    start_index = parse_start(value)?;
                }
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Some(Self { bank, start_index }))
    }
}

/// Log to stderr; `RUST_LOG` overrides the default `info` filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = match Args::parse(&mut argv, |key| std::env::var(key).ok()) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(e) => {
            print_usage();
            return Err(e.into());
        }
    };

    init_tracing();

    let storage = match parsed.bank.as_deref() {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading question bank");
            Storage::from_json_file(path).await?
        }
        None => Storage::bundled()?,
    };

    let quiz_loop = QuizLoopService::new(Clock::default_clock(), storage.questions)
        .with_start_index(parsed.start_index);

    // Fail before opening a window if the bank or start question is unusable.
    let session = quiz_loop.start_session().await?;
    tracing::info!(
        questions = session.total_questions(),
        start = parsed.start_index + 1,
        "quiz ready"
    );
    drop(session);

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        quiz_loop: Arc::new(quiz_loop),
    });
    let context = build_app_context(&app);

    // Keep the window a regular, non-floating one.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Computer Networks Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(2);
    }
}
