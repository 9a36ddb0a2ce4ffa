use std::fmt;
use std::path::PathBuf;

use quiz_core::model::QuestionBank;
use storage::bundled::bundled_drafts;
use storage::json::{parse_bank, render_bank};

#[derive(Debug, Clone)]
struct Args {
    out: Option<PathBuf>,
    check: Option<PathBuf>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidPath { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidPath { flag, raw } => write!(f, "invalid {flag} value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_path(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<PathBuf, ArgsError> {
    let value = args.next().ok_or(ArgsError::MissingValue { flag })?;
    if value.trim().is_empty() {
        return Err(ArgsError::InvalidPath { flag, raw: value });
    }
    Ok(PathBuf::from(value))
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut out = None;
        let mut check = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out" => out = Some(require_path(&mut args, "--out")?),
                "--check" => check = Some(require_path(&mut args, "--check")?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { out, check })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin export_bank -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --out <path>      Write the bundled bank as JSON to <path> (default: stdout)");
    eprintln!("  --check <path>    Validate a JSON bank file instead of exporting");
    eprintln!("  -h, --help        Show this help");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    if let Some(path) = args.check {
        let raw = tokio::fs::read_to_string(&path).await?;
        let bank = QuestionBank::from_drafts(parse_bank(&raw)?).map_err(quiz_core::Error::from)?;
        println!("{}: {} valid questions", path.display(), bank.len());
        return Ok(());
    }

    let rendered = render_bank(&bundled_drafts())?;
    match args.out {
        Some(path) => {
            tokio::fs::write(&path, rendered).await?;
            eprintln!("Wrote bundled bank to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
