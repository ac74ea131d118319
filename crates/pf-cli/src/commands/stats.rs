//! Stats command
//!
//! Summarize posts per status.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use pf_core::post::query::recent;
use pf_core::post::{PostQuery, PostStatus};

use super::{status_label, AppContext};

/// Arguments for the stats command
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Number of recently updated posts to show
    #[arg(long, default_value = "5")]
    pub recent: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the stats command
pub async fn execute(ctx: &AppContext, args: StatsArgs) -> Result<()> {
    let workflow = ctx.workflow()?;
    let counts = workflow.status_counts().await?;
    let latest = recent(workflow.list_posts(&PostQuery::new()).await?, args.recent);

    if args.json {
        let value = serde_json::json!({
            "counts": counts,
            "total": counts.total(),
            "recent": latest,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "Posts by status".bold().underline());
    println!();
    for status in PostStatus::ALL {
        println!(
            "  {:<10} {}",
            status_label(status),
            counts.get(status).to_string().bold()
        );
    }
    println!("  {:<10} {}", "Total", counts.total());

    if !latest.is_empty() {
        println!();
        println!("{}", "Recently updated".bold());
        for post in &latest {
            println!(
                "  {:>4}  {} ({})",
                post.id.to_string().green(),
                post.title,
                ctx.format_time(&post.updated_at).dimmed()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_stats_defaults() {
        let cli = Cli::try_parse_from(["postflow", "stats"]).unwrap();
        match cli.command {
            Commands::Stats(args) => {
                assert_eq!(args.recent, 5);
                assert!(!args.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
