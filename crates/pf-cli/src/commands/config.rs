//! Config command
//!
//! Inspect postflow configuration.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::AppContext;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print configuration and data locations
    Path,
}

/// Execute the config command
pub fn execute(ctx: &AppContext, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(ctx, json),
        ConfigCommand::Path => show_paths(ctx),
    }
}

fn show_config(ctx: &AppContext, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&ctx.config)?);
        return Ok(());
    }

    println!("{}", "Configuration:".bold().underline());
    if ctx.config_path.exists() {
        println!("{}", ctx.config_path.display().to_string().dimmed());
    } else {
        println!(
            "{}",
            format!("{} (not found, using defaults)", ctx.config_path.display()).dimmed()
        );
    }
    println!();
    println!("{}", ctx.config.to_toml()?);

    Ok(())
}

fn show_paths(ctx: &AppContext) -> Result<()> {
    println!("config: {}", ctx.config_path.display());
    println!("data:   {}", ctx.data_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_config_show_json_flag() {
        let cli = Cli::try_parse_from(["postflow", "config", "show", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommand::Show { json: true })
        ));
    }

    #[test]
    fn test_config_path() {
        let cli = Cli::try_parse_from(["postflow", "config", "path"]).unwrap();
        assert!(matches!(cli.command, Commands::Config(ConfigCommand::Path)));
    }
}
