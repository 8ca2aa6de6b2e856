use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use snapdeck_core::{AppConfig, Axis};

mod commands;

#[derive(Parser)]
#[command(name = "snapdeck")]
#[command(author, version, about = "One gesture, one section: snap navigation for terminal decks")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of the default location
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open an interactive deck
    Run {
        /// Lay sections out left to right
        #[arg(long)]
        horizontal: bool,
        /// Number of sections in the deck
        #[arg(short = 'n', long, default_value_t = 8)]
        sections: usize,
        /// Open at this section (1-based) without animating
        #[arg(short = 's', long)]
        section: Option<usize>,
    },
    /// Feed a recorded wheel trace through the navigation core
    Replay {
        /// JSON trace file
        path: PathBuf,
    },
    /// Show the configuration
    Config {
        /// Write the default configuration if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // The TUI owns the terminal, so it logs to a file
    let log_to_file = matches!(cli.command, Some(Commands::Run { .. }) | None);
    init_logging(&config, log_to_file)?;

    match cli.command {
        Some(Commands::Run {
            horizontal,
            sections,
            section,
        }) => {
            if horizontal {
                config.ui.axis = Axis::Horizontal;
            }
            commands::run::run(config, sections, section).await
        }
        None => commands::run::run(config, 8, None).await,
        Some(Commands::Replay { path }) => commands::replay::run(&config, &path),
        Some(Commands::Config { init }) => {
            let path = cli.config.unwrap_or_else(AppConfig::config_path);
            commands::config::run(&config, &path, init)
        }
    }
}

fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating log directory {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening log file {}", path.display()))?;

        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry.with(fmt::layer().with_target(false)).init();
    }

    Ok(())
}
