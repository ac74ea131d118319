//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod calendar;
pub mod comment;
pub mod config;
pub mod init;
pub mod post;
pub mod stats;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use std::path::PathBuf;
use std::sync::Arc;

use pf_core::config::{Config, CONFIG_FILE_NAME};
use pf_core::post::PostStatus;
use pf_core::types::UserId;
use pf_core::EditorialWorkflow;
use pf_storage::FileSystemStore;

/// postflow - editorial workflow and discussion engine
#[derive(Debug, Parser)]
#[command(name = "postflow")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory holding the store and configuration
    #[arg(long, global = true, env = "POSTFLOW_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Acting user ID
    #[arg(long, short, global = true, env = "POSTFLOW_USER", default_value = "1")]
    pub user: UserId,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize the data directory and configuration
    Init(init::InitArgs),

    /// Create, edit and move posts through review
    #[command(subcommand)]
    Post(post::PostCommand),

    /// Discuss posts in threaded comments
    #[command(subcommand)]
    Comment(comment::CommentCommand),

    /// Show posts scheduled in a month
    Calendar(calendar::CalendarArgs),

    /// Show post counts per status
    Stats(stats::StatsArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Resolved locations and configuration shared by every command
#[derive(Debug)]
pub struct AppContext {
    /// Loaded configuration
    pub config: Config,
    /// Where the configuration was (or would be) loaded from
    pub config_path: PathBuf,
    /// Directory holding the store file
    pub data_dir: PathBuf,
    /// Acting user
    pub user: UserId,
}

impl AppContext {
    /// Resolve paths and load configuration
    ///
    /// The data directory comes from `--data-dir`, then the configuration's
    /// `[storage] data_dir`, then the platform default.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let base_dir = cli
            .data_dir
            .clone()
            .unwrap_or_else(FileSystemStore::default_base_dir);
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| base_dir.join(CONFIG_FILE_NAME));

        let config = Config::load_or_default(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

        let data_dir = match (&cli.data_dir, &config.storage.data_dir) {
            (Some(dir), _) => dir.clone(),
            (None, Some(dir)) => dir.clone(),
            (None, None) => base_dir,
        };

        Ok(Self {
            config,
            config_path,
            data_dir,
            user: cli.user,
        })
    }

    /// Open the file store in the data directory
    pub fn open_store(&self) -> Result<FileSystemStore> {
        FileSystemStore::new(&self.data_dir)
            .with_context(|| format!("Failed to open store in {}", self.data_dir.display()))
    }

    /// Build a workflow over the file store
    pub fn workflow(&self) -> Result<EditorialWorkflow> {
        let store = self.open_store()?;
        Ok(EditorialWorkflow::with_config(Arc::new(store), &self.config))
    }

    /// Format a timestamp with the configured date format
    pub fn format_time(&self, time: &DateTime<Utc>) -> String {
        time.format(&self.config.display.date_format).to_string()
    }
}

/// Run the CLI application
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let ctx = AppContext::resolve(&cli)?;

    // Dispatch to command handler
    match cli.command {
        Commands::Init(args) => init::execute(&ctx, args).await,
        Commands::Post(cmd) => post::execute(&ctx, cmd).await,
        Commands::Comment(cmd) => comment::execute(&ctx, cmd).await,
        Commands::Calendar(args) => calendar::execute(&ctx, args).await,
        Commands::Stats(args) => stats::execute(&ctx, args).await,
        Commands::Config(cmd) => config::execute(&ctx, cmd),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC)
pub fn parse_publish_date(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    if let Ok(time) = DateTime::parse_from_rfc3339(s) {
        return Ok(time.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|time| time.and_utc())
        .ok_or_else(|| format!("Invalid date '{}': expected YYYY-MM-DD or RFC 3339", s))
}

/// Colored label for a status
pub fn status_label(status: PostStatus) -> ColoredString {
    match status {
        PostStatus::Draft => status.label().dimmed(),
        PostStatus::InReview => status.label().yellow(),
        PostStatus::Approved => status.label().cyan(),
        PostStatus::Published => status.label().green(),
    }
}

/// Ask for confirmation unless `yes` was given
pub fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    Ok(confirmed)
}
