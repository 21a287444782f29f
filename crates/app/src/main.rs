use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{Clock, SessionFactory};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};
use zoo_core::model::{AnimalRecord, Roster, roster_from_records};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidRate { raw: String },
    InvalidRoster { reason: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidRate { raw } => write!(f, "invalid --rate value: {raw}"),
            ArgsError::InvalidRoster { reason } => write!(f, "invalid roster file: {reason}"),
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
    roster: Roster,
    sessions: Arc<SessionFactory>,
}

impl UiApp for DesktopApp {
    fn roster(&self) -> Roster {
        self.roster.clone()
    }

    fn sessions(&self) -> Arc<SessionFactory> {
        Arc::clone(&self.sessions)
    }
}

struct Args {
    locale: String,
    rate: f32,
    clips_dir: Option<PathBuf>,
    roster_path: Option<PathBuf>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--locale <tag>] [--rate <multiplier>]");
    eprintln!("                      [--clips <dir>] [--roster <file.json>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --locale en-US");
    eprintln!("  --rate 0.9          # announcement speed, 1.0 = normal");
    eprintln!("  --clips .           # base directory for relative clip paths");
    eprintln!("  --roster <builtin>  # ten animals, lion through chicken");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  VOCAL_ZOO_LOCALE, VOCAL_ZOO_RATE, VOCAL_ZOO_CLIPS, VOCAL_ZOO_ROSTER");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut locale = std::env::var("VOCAL_ZOO_LOCALE").unwrap_or_else(|_| "en-US".into());
        let mut rate = std::env::var("VOCAL_ZOO_RATE")
            .ok()
            .and_then(|value| value.parse::<f32>().ok())
            .unwrap_or(0.9);
        let mut clips_dir = std::env::var("VOCAL_ZOO_CLIPS").ok().map(PathBuf::from);
        let mut roster_path = std::env::var("VOCAL_ZOO_ROSTER").ok().map(PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--locale" => {
                    locale = require_value(args, "--locale")?;
                }
                "--rate" => {
                    let value = require_value(args, "--rate")?;
                    rate = value
                        .parse::<f32>()
                        .ok()
                        .filter(|rate| *rate > 0.25 && *rate <= 4.0)
                        .ok_or(ArgsError::InvalidRate { raw: value })?;
                }
                "--clips" => {
                    clips_dir = Some(PathBuf::from(require_value(args, "--clips")?));
                }
                "--roster" => {
                    roster_path = Some(PathBuf::from(require_value(args, "--roster")?));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            locale,
            rate,
            clips_dir,
            roster_path,
        })
    }
}

/// Load the roster, either the built-in ten animals or a JSON file of
/// records, rebasing relative clip paths onto the clips directory.
fn load_roster(args: &Args) -> Result<Roster, Box<dyn std::error::Error>> {
    let mut records = match &args.roster_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str::<Vec<AnimalRecord>>(&raw).map_err(|err| {
                ArgsError::InvalidRoster {
                    reason: err.to_string(),
                }
            })?
        }
        None => Roster::builtin()
            .animals()
            .iter()
            .map(AnimalRecord::from_animal)
            .collect(),
    };

    if let Some(dir) = &args.clips_dir {
        for record in &mut records {
            if !record.audio.starts_with("http://") && !record.audio.starts_with("https://") {
                let path = Path::new(&record.audio);
                if path.is_relative() {
                    record.audio = dir.join(path).display().to_string();
                }
            }
        }
    }

    let roster = roster_from_records(records).map_err(|err| ArgsError::InvalidRoster {
        reason: err.to_string(),
    })?;
    Ok(roster)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|err| {
        eprintln!("{err}");
        print_usage();
        err
    })?;

    let roster = load_roster(&args)?;

    // Capability detection happens once here; the views only ever see the
    // resulting stack through the session factory.
    let stack = speech::desktop::detect();
    info!(?stack, "speech stack detected");

    let sessions = Arc::new(
        SessionFactory::new(stack, Clock::default_clock())
            .with_locale(args.locale.clone())
            .with_announce_rate(args.rate),
    );

    let app = DesktopApp { roster, sessions };
    let context = build_app_context(&(Arc::new(app) as Arc<dyn UiApp>));

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Vocal Zoo")
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
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
