//! Elastic navigation bar CLI
//!
//! Replays scroll traces against a bar configuration and prints the
//! resulting layouts, one JSON object per line.

mod simulate;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use elastic_core::EdgeInsets;
use elastic_navbar::{Config, TitleDisplayMode};
use elastic_platform::DeviceOrientation;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use simulate::Scenario;

#[derive(Parser)]
#[command(name = "elastic-nav")]
#[command(author, version, about = "Inspect elastic navigation bar layouts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay raw scroll offsets and print a layout per sample
    Simulate {
        /// Bar config file (TOML); defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Device orientation (portrait, landscape-left, landscape-right, ...)
        #[arg(short, long, default_value = "portrait")]
        orientation: String,

        /// Safe-area inset at the top edge
        #[arg(long, default_value_t = 47.0)]
        inset_top: f32,

        /// Safe-area inset at the bottom edge
        #[arg(long, default_value_t = 34.0)]
        inset_bottom: f32,

        /// Title text; the bar has no title when omitted
        #[arg(short, long)]
        title: Option<String>,

        /// Title display mode
        #[arg(short, long, value_enum, default_value_t = ModeArg::Auto)]
        mode: ModeArg,

        /// Enable pull-to-refresh
        #[arg(short, long)]
        refreshable: bool,

        /// Raise the stop signal before this sample index
        #[arg(long)]
        stop_after: Option<usize>,

        /// Raw content offsets; positive values pull the content down
        #[arg(required = true, allow_hyphen_values = true)]
        offsets: Vec<f32>,
    },
    /// Print or check a bar config
    Config {
        /// Config file to validate; prints the defaults when omitted
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Auto,
    Large,
    Inline,
}

impl From<ModeArg> for TitleDisplayMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Auto => TitleDisplayMode::Auto,
            ModeArg::Large => TitleDisplayMode::Large,
            ModeArg::Inline => TitleDisplayMode::Inline,
        }
    }
}

/// Filter used when `RUST_LOG` is unset or does not parse
const DEFAULT_LOG_FILTER: &str = "warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            config,
            orientation,
            inset_top,
            inset_bottom,
            title,
            mode,
            refreshable,
            stop_after,
            offsets,
        } => {
            let scenario = Scenario {
                config: load_config(config.as_deref())?,
                orientation: orientation
                    .parse::<DeviceOrientation>()
                    .with_context(|| format!("Invalid --orientation '{orientation}'"))?,
                insets: EdgeInsets::new(inset_top, 0.0, inset_bottom, 0.0),
                title,
                display_mode: mode.into(),
                refreshable,
                stop_after,
                offsets,
            };
            run_simulate(&scenario)
        }
        Commands::Config { path } => run_config(path.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    Config::load(path).with_context(|| format!("Failed to load config {}", path.display()))
}

fn run_simulate(scenario: &Scenario) -> Result<()> {
    let frames = simulate::run(scenario)?;
    tracing::info!(samples = frames.len(), "simulation finished");

    let mut out = io::stdout().lock();
    for frame in &frames {
        serde_json::to_writer(&mut out, frame).context("Failed to write frame")?;
        writeln!(out)?;
    }
    Ok(())
}

fn run_config(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    if path.is_some() {
        config.validate().context("Config is invalid")?;
        tracing::info!("config is valid");
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
