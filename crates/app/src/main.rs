use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use exam_core::model::ImageCatalog;
use services::{AppServices, Clock, ExamService};
use storage::load_bank;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://exam.sqlite3";
const DEFAULT_BANK_PATH: &str = "assets/bank.json";
const DEFAULT_IMAGE_DIR: &str = "assets/images";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
    EmptyPath { flag: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::EmptyPath { flag } => write!(f, "{flag} must not be empty"),
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

fn require_path(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<PathBuf, ArgsError> {
    let value = require_value(args, flag)?;
    if value.trim().is_empty() {
        return Err(ArgsError::EmptyPath { flag });
    }
    Ok(PathBuf::from(value))
}

struct DesktopApp {
    exam_service: Arc<ExamService>,
    images: ImageCatalog,
}

impl UiApp for DesktopApp {
    fn exam_service(&self) -> Arc<ExamService> {
        Arc::clone(&self.exam_service)
    }

    fn image_catalog(&self) -> ImageCatalog {
        self.images.clone()
    }
}

/// Bundled assets sit next to the installed binary; otherwise `relative` is
/// taken from the working directory.
fn default_asset_path(relative: &str, exe_dir: Option<&Path>) -> PathBuf {
    exe_dir
        .map(|dir| dir.join(relative))
        .filter(|candidate| candidate.exists())
        .unwrap_or_else(|| PathBuf::from(relative))
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    db_url: String,
    bank_path: PathBuf,
    image_dir: PathBuf,
}

#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    Run(Args),
    Help,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  exam-trainer [ui] [--db <sqlite_url>] [--bank <path>] [--images <dir>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --bank {DEFAULT_BANK_PATH}");
    eprintln!("  --images {DEFAULT_IMAGE_DIR}");
    eprintln!("  (asset paths are looked up next to the executable, then in the working directory)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  EXAM_DB_URL, EXAM_BANK_PATH, EXAM_IMAGE_DIR, RUST_LOG");
}

impl Args {
    /// Flags win over environment values, which win over defaults.
    fn parse(
        args: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let mut args = args.into_iter().peekable();

        // `ui` is the only subcommand and may be omitted.
        if let Some(first) = args.peek() {
            if first == "ui" {
                args.next();
            } else if !first.starts_with('-') {
                return Err(ArgsError::UnknownCommand(first.clone()));
            }
        }

        let mut db_url = env("EXAM_DB_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DB_URL.to_string());
        let exe_dir = exe_dir();
        let mut bank_path = env("EXAM_BANK_PATH")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(
                || default_asset_path(DEFAULT_BANK_PATH, exe_dir.as_deref()),
                PathBuf::from,
            );
        let mut image_dir = env("EXAM_IMAGE_DIR")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(
                || default_asset_path(DEFAULT_IMAGE_DIR, exe_dir.as_deref()),
                PathBuf::from,
            );

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--bank" => bank_path = require_path(&mut args, "--bank")?,
                "--images" => image_dir = require_path(&mut args, "--images")?,
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Parsed::Run(Self {
            db_url: normalize_sqlite_url(db_url),
            bank_path,
            image_dir,
        }))
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
    let path = Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Args::parse(std::env::args().skip(1), |key| std::env::var(key).ok()).map_err(
        |e| {
            eprintln!("{e}");
            print_usage();
            e
        },
    )?;
    let args = match parsed {
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
        Parsed::Run(args) => args,
    };

    init_tracing();

    let bank = Arc::new(load_bank(&args.bank_path)?);

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&args.db_url)?;
    let services = AppServices::new_sqlite(&args.db_url, bank, Clock::system()).await?;
    let exam_service = services.exam_service();
    tracing::info!(
        db = %args.db_url,
        questions = exam_service.eligible_questions(),
        images = %args.image_dir.display(),
        "starting exam trainer"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        exam_service,
        images: ImageCatalog::new(args.image_dir),
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Driving License Practice")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
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

    let path = Path::new(path);
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
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
