//! Init command
//!
//! Create the data directory, an empty store and a default configuration.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use pf_core::config::Config;

use super::AppContext;

/// Arguments for the init command
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite of existing data and configuration
    #[arg(long)]
    pub force: bool,
}

/// Execute the init command
pub async fn execute(ctx: &AppContext, args: InitArgs) -> Result<()> {
    println!("Initializing postflow in {}...", ctx.data_dir.display());

    let store = ctx.open_store()?;
    if store.initialize(args.force).await? {
        println!(
            "{} Created store at {}",
            "✓".green(),
            store.store_path().display()
        );
    } else {
        eprintln!(
            "{} Store already exists. Use --force to start over.",
            "⚠".yellow()
        );
    }

    if ctx.config_path.exists() && !args.force {
        eprintln!(
            "{} Configuration already exists at {}",
            "⚠".yellow(),
            ctx.config_path.display()
        );
    } else {
        Config::default()
            .save(&ctx.config_path)
            .context("Failed to write config.toml")?;
        println!(
            "{} Wrote default configuration to {}",
            "✓".green(),
            ctx.config_path.display()
        );
    }

    println!("\n{}", "Next steps:".bold());
    println!("  1. Draft a post:");
    println!("     {}", "postflow post create \"My first post\"".cyan());
    println!("  2. Send it to review:");
    println!("     {}", "postflow post submit 1".cyan());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn context_in(dir: &std::path::Path) -> AppContext {
        AppContext {
            config: Config::default(),
            config_path: dir.join("config.toml"),
            data_dir: PathBuf::from(dir),
            user: pf_core::types::UserId(1),
        }
    }

    #[tokio::test]
    async fn test_init_creates_store_and_config() {
        let temp = TempDir::new().unwrap();
        let ctx = context_in(temp.path());

        execute(&ctx, InitArgs { force: false }).await.unwrap();
        assert!(temp.path().join("config.toml").exists());
        assert!(temp.path().join(pf_storage::STORE_FILE_NAME).exists());
    }

    #[tokio::test]
    async fn test_init_keeps_existing_config() {
        let temp = TempDir::new().unwrap();
        let ctx = context_in(temp.path());
        std::fs::write(&ctx.config_path, "[display]\nshow_resolved = false\n").unwrap();

        execute(&ctx, InitArgs { force: false }).await.unwrap();
        let content = std::fs::read_to_string(&ctx.config_path).unwrap();
        assert!(content.contains("show_resolved = false"));

        execute(&ctx, InitArgs { force: true }).await.unwrap();
        let content = std::fs::read_to_string(&ctx.config_path).unwrap();
        assert!(content.contains("show_resolved = true"));
    }
}
