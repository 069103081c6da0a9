use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use classboard_core::{ClassboardConfig, ScheduleId};
use classboard_schedule::dashboard::{cancel_occurrence, restore_occurrence};
use classboard_schedule::grouping::{filter_by_subject, group_by_name};
use classboard_schedule::{build_view, DashboardPoller, DateTag, ReferenceInstant, ScheduleStore};
use tokio::sync::watch;
use tracing::{info, warn};

mod render;
mod source;

use source::SnapshotFile;

#[derive(Debug, Parser)]
#[command(name = "classboard", version, about = "Live class timetable board")]
struct Cli {
    /// Config file (default: $CLASSBOARD_CONFIG, then ~/.classboard/classboard.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print today's board once.
    Board {
        /// Reference time, `YYYY-MM-DDTHH:MM` (default: now)
        #[arg(long, value_parser = parse_at)]
        at: Option<NaiveDateTime>,
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Cancel (or restore) one day of a recurring class.
    Cancel {
        id: String,
        /// Day to cancel, `M/d` (default: the date of --at)
        #[arg(long)]
        date: Option<DateTag>,
        #[arg(long)]
        restore: bool,
        #[arg(long, value_parser = parse_at)]
        at: Option<NaiveDateTime>,
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// List teachers, one line per name.
    Teachers {
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Redraw the board whenever the data or the minute changes.
    Watch {
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
}

fn parse_at(text: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M")
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM ({e})"))
}

fn reference(at: Option<NaiveDateTime>) -> ReferenceInstant {
    at.map(ReferenceInstant::new).unwrap_or_else(ReferenceInstant::now)
}

fn snapshot_path(config: &ClassboardConfig, flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| PathBuf::from(&config.dashboard.snapshot_path))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // load config first so its log filter can apply; warn once tracing is up
    let (config, load_error) = match ClassboardConfig::load(cli.config.as_deref()) {
        Ok(c) => (c, None),
        Err(e) => (ClassboardConfig::default(), Some(e)),
    };

    let filter = config.log.filter.clone();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(e) = load_error {
        warn!("Config load failed ({}), using defaults", e);
    }

    match cli.command {
        Command::Board { at, snapshot } => {
            let store = SnapshotFile::new(snapshot_path(&config, snapshot));
            let view = build_view(&store.snapshot()?, reference(at));
            print!("{}", render::render_view(&view));
        }
        Command::Cancel {
            id,
            date,
            restore,
            at,
            snapshot,
        } => {
            let store = SnapshotFile::new(snapshot_path(&config, snapshot));
            let tag = date.unwrap_or_else(|| reference(at).date_tag());
            let id: ScheduleId = id.into();
            let updated = if restore {
                restore_occurrence(&store, &id, tag)?
            } else {
                cancel_occurrence(&store, &id, tag)?
            };
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        Command::Teachers { subject, snapshot } => {
            let store = SnapshotFile::new(snapshot_path(&config, snapshot));
            let groups = group_by_name(&store.snapshot()?.teachers);
            let shown = match subject.as_deref() {
                Some(s) => filter_by_subject(&groups, s),
                None => groups.iter().collect(),
            };
            print!("{}", render::render_teachers(&shown));
        }
        Command::Watch { snapshot } => {
            let path = snapshot_path(&config, snapshot);
            let store: Arc<dyn ScheduleStore> = Arc::new(SnapshotFile::new(&path));
            let (poller, mut views) =
                DashboardPoller::new(store, config.dashboard.poll_interval());
            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            let handle = tokio::spawn(poller.run(shutdown_rx));
            info!(path = %path.display(), "watching snapshot");

            loop {
                tokio::select! {
                    changed = views.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        if let Some(view) = views.borrow_and_update().as_ref() {
                            print!("{}", render::render_view(view));
                            println!();
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        info!("interrupt received");
                        break;
                    }
                }
            }

            let _ = shutdown_tx.send(true);
            handle.await.context("dashboard poller task")?;
        }
    }

    Ok(())
}
