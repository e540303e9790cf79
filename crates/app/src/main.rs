use std::fmt;

use prep_core::model::{PreferenceScope, Site};
use services::{AppServices, Clock};
use tracing_subscriber::EnvFilter;

mod bundled;
mod render;

const DEFAULT_DB_PATH: &str = "prep.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingArgument { name: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
    InvalidSite { raw: String },
    InvalidScope { raw: String },
    ConfirmationRequired { command: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingArgument { name } => write!(f, "missing <{name}>"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidSite { raw } => {
                write!(f, "invalid --site value: {raw} (leetcode, gfg, hackerrank, other)")
            }
            ArgsError::InvalidScope { raw } => {
                write!(f, "invalid scope: {raw} (checklist, top100)")
            }
            ArgsError::ConfirmationRequired { command } => {
                write!(f, "{command} erases progress; pass --yes to confirm")
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
    eprintln!("  prep [--db <sqlite_url>] checklist [--section <name>]");
    eprintln!("  prep [--db <sqlite_url>] toggle <item-key>");
    eprintln!("  prep [--db <sqlite_url>] reset --yes");
    eprintln!("  prep [--db <sqlite_url>] import <file.json>");
    eprintln!("  prep [--db <sqlite_url>] top100 [--category <name>]");
    eprintln!("  prep [--db <sqlite_url>] top100-toggle <item-key>");
    eprintln!("  prep [--db <sqlite_url>] top100-reset --yes");
    eprintln!("  prep [--db <sqlite_url>] pref <checklist|top100> [--site <site>] [--custom <text>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_PATH} (relative to the working directory)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PREP_DB_URL, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Checklist { section: Option<String> },
    Toggle { key: String },
    Reset,
    Import { path: String },
    Top100 { category: Option<String> },
    Top100Toggle { key: String },
    Top100Reset,
    Pref {
        scope: PreferenceScope,
        site: Option<Site>,
        custom: Option<String>,
    },
}

#[derive(Debug)]
struct Args {
    db_url: String,
    command: Command,
}

impl Args {
    fn parse(argv: impl IntoIterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let mut db_url = default_db_url(std::env::var("PREP_DB_URL").ok());
        let mut rest = Vec::new();

        let mut args = argv.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--help" | "-h" => return Ok(None),
                _ => rest.push(arg),
            }
        }

        let mut rest = rest.into_iter();
        let Some(name) = rest.next() else {
            return Ok(None);
        };
        let command = Command::parse(&name, &mut rest)?;
        Ok(Some(Self { db_url, command }))
    }
}

impl Command {
    fn parse(name: &str, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let command = match name {
            "checklist" => Command::Checklist {
                section: optional_flag(args, "--section")?,
            },
            "toggle" => Command::Toggle {
                key: positional(args, "item-key")?,
            },
            "reset" => {
                confirm(args, "reset")?;
                Command::Reset
            }
            "import" => Command::Import {
                path: positional(args, "file.json")?,
            },
            "top100" => Command::Top100 {
                category: optional_flag(args, "--category")?,
            },
            "top100-toggle" => Command::Top100Toggle {
                key: positional(args, "item-key")?,
            },
            "top100-reset" => {
                confirm(args, "top100-reset")?;
                Command::Top100Reset
            }
            "pref" => Self::parse_pref(args)?,
            other => return Err(ArgsError::UnknownCommand(other.to_owned())),
        };
        if let Some(extra) = args.next() {
            return Err(ArgsError::UnknownArg(extra));
        }
        Ok(command)
    }

    fn parse_pref(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let raw = positional(args, "scope")?;
        let scope = raw
            .parse::<PreferenceScope>()
            .map_err(|_| ArgsError::InvalidScope { raw })?;
        let mut site = None;
        let mut custom = None;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--site" => {
                    let raw = require_value(args, "--site")?;
                    site = Some(
                        raw.parse::<Site>()
                            .map_err(|_| ArgsError::InvalidSite { raw })?,
                    );
                }
                "--custom" => custom = Some(require_value(args, "--custom")?),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(Command::Pref {
            scope,
            site,
            custom,
        })
    }
}

fn positional(
    args: &mut impl Iterator<Item = String>,
    name: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingArgument { name })
}

fn optional_flag(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<Option<String>, ArgsError> {
    match args.next() {
        None => Ok(None),
        Some(arg) if arg == flag => require_value(args, flag).map(Some),
        Some(arg) => Err(ArgsError::UnknownArg(arg)),
    }
}

fn confirm(
    args: &mut impl Iterator<Item = String>,
    command: &'static str,
) -> Result<(), ArgsError> {
    match args.next().as_deref() {
        Some("--yes" | "-y") => Ok(()),
        Some(other) => Err(ArgsError::UnknownArg(other.to_owned())),
        None => Err(ArgsError::ConfirmationRequired { command }),
    }
}

/// `PREP_DB_URL` when set, else the default file; both made absolute.
fn default_db_url(from_env: Option<String>) -> String {
    normalize_sqlite_url(from_env.unwrap_or_else(|| DEFAULT_DB_PATH.into()))
}

fn normalize_sqlite_url(raw: String) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" {
        return trimmed.to_string();
    }

    let rest = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .unwrap_or(trimmed);
    let (path_str, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    match query {
        Some(query) => format!("sqlite://{}?{query}", absolute.display()),
        None => format!("sqlite://{}", absolute.display()),
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

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = match Args::parse(std::env::args().skip(1)) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            return Err(err.into());
        }
    };

    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(&parsed.db_url, Clock::default_clock()).await?;
    tracing::debug!(db_url = %parsed.db_url, command = ?parsed.command, "running");

    match parsed.command {
        Command::Checklist { section } => {
            let tracker = services.checklist(bundled::syllabus()?).await;
            if let Some(name) = section.as_deref() {
                if tracker.syllabus().section(name).is_none_or(|s| s.section.is_summary()) {
                    return Err(format!(
                        "unknown section: {name} (one of: {})",
                        tracker.section_names().join(", ")
                    )
                    .into());
                }
            }
            let prefs = services.preferences().await;
            print!("{}", render::checklist(&tracker, &prefs, section.as_deref())?);
        }
        Command::Toggle { key } => {
            let mut tracker = services.checklist(bundled::syllabus()?).await;
            let done = tracker.toggle(&key).await?;
            println!("{} {key}", if done { "completed" } else { "cleared" });
            println!("Overall progress: {}%", tracker.progress().rounded_percent());
        }
        Command::Reset => {
            let mut tracker = services.checklist(bundled::syllabus()?).await;
            tracker.reset().await;
            println!("Checklist progress cleared.");
        }
        Command::Import { path } => {
            let text = std::fs::read_to_string(&path)?;
            let mut tracker = services.checklist(bundled::syllabus()?).await;
            tracker.import_json(&text).await?;
            println!(
                "Imported {} sections from {path}; progress reset.",
                tracker.section_names().len()
            );
        }
        Command::Top100 { category } => {
            let tracker = services.top100(bundled::top100()?).await;
            if let Some(name) = category.as_deref() {
                if tracker.problems().category(name).is_none() {
                    return Err(format!("unknown category: {name}").into());
                }
            }
            let prefs = services.preferences().await;
            print!("{}", render::top100(&tracker, &prefs, category.as_deref())?);
        }
        Command::Top100Toggle { key } => {
            let mut tracker = services.top100(bundled::top100()?).await;
            let done = tracker.toggle(&key).await?;
            println!("{} {key}", if done { "completed" } else { "cleared" });
            println!("Overall progress: {}%", tracker.progress().rounded_percent());
        }
        Command::Top100Reset => {
            let mut tracker = services.top100(bundled::top100()?).await;
            tracker.reset().await;
            println!("Top 100 progress cleared.");
        }
        Command::Pref {
            scope,
            site,
            custom,
        } => {
            let mut prefs = services.preferences().await;
            if let Some(site) = site {
                prefs.set_site(scope, site).await;
            }
            if let Some(custom) = custom {
                prefs.set_custom(scope, custom).await;
            }
            println!("{}", render::preference(&prefs, scope));
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
