//! Calendar command
//!
//! Show which posts fall on each day of a month.

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use clap::Args;
use colored::Colorize;

use super::{status_label, AppContext};

/// Arguments for the calendar command
#[derive(Debug, Args)]
pub struct CalendarArgs {
    /// Year (default: current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Month number 1-12 (default: current month)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the calendar command
pub async fn execute(ctx: &AppContext, args: CalendarArgs) -> Result<()> {
    let today = Utc::now().date_naive();
    let year = args.year.unwrap_or_else(|| today.year());
    let month = args.month.unwrap_or_else(|| today.month());

    let workflow = ctx.workflow()?;
    let calendar = workflow
        .calendar(year, month)
        .await
        .context(format!("Failed to build calendar for {}-{:02}", year, month))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&calendar)?);
        return Ok(());
    }

    let title = calendar
        .days
        .first()
        .map(|day| day.date.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", year, month));
    println!("{}", title.bold().underline());
    println!();

    if calendar.post_count() == 0 {
        println!("No posts scheduled.");
        return Ok(());
    }

    for day in calendar.busy_days() {
        let label = day.date.format("%a %e").to_string();
        let label = if day.date == today {
            label.bold().cyan()
        } else {
            label.normal()
        };
        println!("  {}", label);
        for post in &day.posts {
            println!(
                "      {:>4}  {:<10} {}",
                post.id.to_string().green(),
                status_label(post.status),
                post.title
            );
        }
    }

    println!(
        "\n  {} posts on {} days",
        calendar.post_count(),
        calendar.busy_days().count()
    );
    Ok(())
}
