//! Comment command
//!
//! Discuss posts in threaded comments.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;

use pf_core::comment::{Comment, CommentNode};
use pf_core::types::{CommentId, PostId};

use super::{confirm, AppContext};

/// Comment subcommands
#[derive(Debug, Subcommand)]
pub enum CommentCommand {
    /// Add a top-level comment to a post
    Add {
        /// Post ID
        post: PostId,

        /// Comment text
        content: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reply to a comment
    Reply {
        /// Parent comment ID
        parent: CommentId,

        /// Reply text
        content: String,

        /// Require the parent to belong to this post
        #[arg(long)]
        post: Option<PostId>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a comment resolved
    Resolve {
        /// Comment ID
        id: CommentId,
    },

    /// Delete a comment; its replies stay in the thread
    Delete {
        /// Comment ID
        id: CommentId,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },

    /// Show the discussion on a post
    Thread {
        /// Post ID
        post: PostId,

        /// Include resolved comments
        #[arg(long, conflicts_with = "hide_resolved")]
        all: bool,

        /// Hide resolved comments
        #[arg(long)]
        hide_resolved: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Execute the comment command
pub async fn execute(ctx: &AppContext, cmd: CommentCommand) -> Result<()> {
    let workflow = ctx.workflow()?;

    match cmd {
        CommentCommand::Add {
            post,
            content,
            json,
        } => {
            let comment = workflow
                .add_comment(post, ctx.user, &content)
                .await
                .context(format!("Failed to comment on post '{}'", post))?;
            print_created(&comment, json)
        }
        CommentCommand::Reply {
            parent,
            content,
            post,
            json,
        } => {
            let comment = match post {
                Some(post) => workflow.reply_on_post(post, parent, ctx.user, &content).await,
                None => workflow.reply(parent, ctx.user, &content).await,
            }
            .context(format!("Failed to reply to comment '{}'", parent))?;
            print_created(&comment, json)
        }
        CommentCommand::Resolve { id } => {
            let comment = workflow
                .resolve_comment(id)
                .await
                .context(format!("Failed to resolve comment '{}'", id))?;
            println!(
                "{} Comment {} resolved.",
                "✓".green(),
                comment.id.to_string().green()
            );
            Ok(())
        }
        CommentCommand::Delete { id, yes } => {
            let comment = workflow
                .get_comment(id)
                .await
                .context(format!("Comment '{}' not found", id))?;
            if !yes {
                println!("Comment {}: {}", id.to_string().green(), preview(&comment.content));
            }
            if !confirm("Delete this comment?", yes)? {
                println!("Deletion cancelled.");
                return Ok(());
            }
            workflow.delete_comment(id).await?;
            println!("{} Comment '{}' deleted.", "✓".green(), id);
            Ok(())
        }
        CommentCommand::Thread {
            post,
            all,
            hide_resolved,
            json,
        } => {
            workflow
                .get_post(post)
                .await
                .context(format!("Post '{}' not found", post))?;
            let forest = workflow.comment_tree(post).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&forest)?);
                return Ok(());
            }

            let show_resolved = if all {
                true
            } else if hide_resolved {
                false
            } else {
                ctx.config.display.show_resolved
            };

            if forest.is_empty() {
                println!("No comments on post {}.", post);
                return Ok(());
            }

            println!(
                "{} ({} comments, {} unresolved)",
                format!("Thread for post {}", post).bold().underline(),
                forest.total_count(),
                forest.unresolved_count()
            );
            println!();
            let mut lines = Vec::new();
            for root in forest.roots() {
                render_node(ctx, root, show_resolved, &mut lines);
            }
            for line in lines {
                println!("{}", line);
            }
            Ok(())
        }
    }
}

fn print_created(comment: &Comment, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(comment)?);
        return Ok(());
    }
    match comment.parent_id {
        Some(parent) => println!(
            "{} Added reply {} to comment {}",
            "✓".green(),
            comment.id.to_string().green(),
            parent
        ),
        None => println!(
            "{} Added comment {} on post {}",
            "✓".green(),
            comment.id.to_string().green(),
            comment.post_id
        ),
    }
    Ok(())
}

/// First line of a comment, shortened for prompts
fn preview(content: &str) -> String {
    let first = content.lines().next().unwrap_or_default();
    if first.chars().count() > 60 {
        format!("{}...", first.chars().take(57).collect::<String>())
    } else {
        first.to_string()
    }
}

/// Render a node and its replies; a hidden resolved comment hides its subtree
fn render_node(ctx: &AppContext, node: &CommentNode, show_resolved: bool, out: &mut Vec<String>) {
    let comment = &node.comment;
    if comment.resolved && !show_resolved {
        return;
    }

    let indent = "  ".repeat(node.depth + 1);
    let marker = if comment.resolved {
        "✓".green()
    } else {
        "●".yellow()
    };
    out.push(format!(
        "{}{} #{} user {} · {}",
        indent,
        marker,
        comment.id,
        comment.user_id,
        ctx.format_time(&comment.created_at).dimmed()
    ));
    for line in comment.content.lines() {
        out.push(format!("{}  {}", indent, line));
    }

    for reply in &node.replies {
        render_node(ctx, reply, show_resolved, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Cli, Commands};
    use clap::Parser;
    use pf_core::comment::CommentTree;
    use pf_core::config::Config;
    use pf_core::types::UserId;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> CommentCommand {
        match Cli::try_parse_from(args).unwrap().command {
            Commands::Comment(cmd) => cmd,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    fn context() -> AppContext {
        AppContext {
            config: Config::default(),
            config_path: PathBuf::from("config.toml"),
            data_dir: PathBuf::from("."),
            user: UserId(1),
        }
    }

    #[test]
    fn test_reply_args() {
        let cmd = parse(&["postflow", "comment", "reply", "12", "Agreed", "--post", "3"]);
        match cmd {
            CommentCommand::Reply {
                parent,
                content,
                post,
                ..
            } => {
                assert_eq!(parent, CommentId(12));
                assert_eq!(content, "Agreed");
                assert_eq!(post, Some(PostId(3)));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_thread_flags_conflict() {
        let result =
            Cli::try_parse_from(["postflow", "comment", "thread", "1", "--all", "--hide-resolved"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short\nsecond line"), "short");
        let long = "x".repeat(80);
        assert_eq!(preview(&long).chars().count(), 60);
    }

    #[test]
    fn test_render_hides_resolved_subtree() {
        colored::control::set_override(false);
        let now = chrono::Utc::now();
        let comment = |id: u64, parent: Option<u64>, resolved: bool| Comment {
            id: CommentId(id),
            post_id: PostId(1),
            user_id: UserId(1),
            content: format!("comment {}", id),
            parent_id: parent.map(CommentId),
            resolved,
            created_at: now + chrono::Duration::seconds(id as i64),
        };
        let forest = CommentTree::build(
            PostId(1),
            vec![
                comment(1, None, true),
                comment(2, Some(1), false),
                comment(3, None, false),
            ],
        );
        let ctx = context();

        let mut lines = Vec::new();
        for root in forest.roots() {
            render_node(&ctx, root, true, &mut lines);
        }
        assert_eq!(lines.len(), 6);
        assert!(lines[2].starts_with("    ✓") || lines[2].starts_with("    ●"));

        let mut lines = Vec::new();
        for root in forest.roots() {
            render_node(&ctx, root, false, &mut lines);
        }
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("comment 3"));
    }
}
