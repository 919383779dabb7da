use std::fmt;
use std::path::Path;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    CatalogLoader, CatalogSource, CsvCatalogLoader, MediaPlayer, QuizController, SessionStore,
};
use storage::repository::Storage;
use tokio::sync::Mutex;
use ui::{App, DomMediaPlayer, SharedQuiz, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://quiz.sqlite3";
const DEFAULT_CATALOG: &str = "songs.csv";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidCatalog { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidCatalog { raw } => write!(f, "invalid --catalog value: {raw}"),
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
    quiz: SharedQuiz,
    catalog_label: String,
}

impl UiApp for DesktopApp {
    fn quiz(&self) -> SharedQuiz {
        Arc::clone(&self.quiz)
    }

    fn catalog_label(&self) -> String {
        self.catalog_label.clone()
    }
}

#[derive(Debug)]
struct Args {
    db_url: String,
    catalog: CatalogSource,
    reset: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>] [--catalog <path_or_url>] [--reset]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --catalog {DEFAULT_CATALOG}");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --reset   discard the stored session before launching");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_CATALOG, RUST_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("QUIZ_DB_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| DEFAULT_DB_URL.into(), |value| sqlite_url(&value));
        let mut catalog = std::env::var("QUIZ_CATALOG")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATALOG.into());
        let mut reset = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = sqlite_url(&value);
                }
                "--catalog" => {
                    let value = require_value(args, "--catalog")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidCatalog { raw: value });
                    }
                    catalog = value;
                }
                "--reset" => reset = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            catalog: CatalogSource::parse(catalog.trim()),
            reset,
        })
    }
}

/// Turn `--db` input into a `sqlite:` URL sqlx can open. Bare paths (with or
/// without a `sqlite:` prefix) are resolved against the working directory.
fn sqlite_url(raw: &str) -> String {
    let raw = raw.trim();
    let already_url = ["sqlite://", "sqlite::memory:", "sqlite:file:"]
        .iter()
        .any(|prefix| raw.starts_with(prefix));
    if already_url {
        return raw.to_string();
    }

    let path = Path::new(raw.strip_prefix("sqlite:").unwrap_or(raw));
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
    };
    format!("sqlite://{}", path.display())
}

/// Create the directory holding the database file; sqlx only creates the file.
fn ensure_db_dir(db_url: &str) -> std::io::Result<()> {
    let Some(rest) = db_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let file = Path::new(rest.split('?').next().unwrap_or(rest));
    match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    log::info!(
        "starting song quiz (db={}, catalog={})",
        parsed.db_url,
        parsed.catalog
    );

    ensure_db_dir(&parsed.db_url)?;
    let storage = Storage::sqlite(&parsed.db_url).await?;

    let catalog_label = parsed.catalog.to_string();
    let loader: Arc<dyn CatalogLoader> = Arc::new(CsvCatalogLoader::new(parsed.catalog));
    let store = SessionStore::new(Arc::clone(&storage.sessions), loader);
    if parsed.reset {
        store.clear_stored().await?;
        log::info!("stored session discarded");
    }

    let player: Box<dyn MediaPlayer> = Box::new(DomMediaPlayer::new());
    let quiz: SharedQuiz = Arc::new(Mutex::new(QuizController::new(store, player)));
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        quiz,
        catalog_label,
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Song Quiz")
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
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run().await {
        log::error!("{err}");
        std::process::exit(2);
    }
}
