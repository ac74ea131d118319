//! Post command
//!
//! Create and edit posts and move them through review.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use colored::Colorize;

use pf_core::post::{NewPost, Post, PostEdit, PostQuery, PostSort, PostStatus, Trigger};
use pf_core::types::{PostId, UserId, WorkspaceId};
use pf_core::EditorialWorkflow;

use super::{confirm, parse_publish_date, status_label, AppContext};

/// Post subcommands
#[derive(Debug, Subcommand)]
pub enum PostCommand {
    /// Create a draft post
    Create {
        /// Post title
        title: String,

        /// Post body
        #[arg(long, default_value = "")]
        content: String,

        /// Tag (repeatable)
        #[arg(long = "tag", short)]
        tags: Vec<String>,

        /// Planned publication date (YYYY-MM-DD or RFC 3339)
        #[arg(long, value_parser = parse_publish_date)]
        publish_date: Option<DateTime<Utc>>,

        /// Workspace ID
        #[arg(long, short, default_value = "1")]
        workspace: WorkspaceId,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List posts
    List {
        /// Only posts with this status
        #[arg(long, short)]
        status: Option<PostStatus>,

        /// Search title and content
        #[arg(long)]
        search: Option<String>,

        /// Only posts carrying this tag
        #[arg(long, short)]
        tag: Option<String>,

        /// Only posts by this author
        #[arg(long)]
        author: Option<UserId>,

        /// Only posts in this workspace
        #[arg(long, short)]
        workspace: Option<WorkspaceId>,

        /// Sort order (newest, oldest, updated, title, title-desc)
        #[arg(long, default_value = "newest")]
        sort: PostSort,

        /// Limit number of posts
        #[arg(long, short, default_value = "20")]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show post details
    Show {
        /// Post ID
        id: PostId,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit title, body, tags or publication date
    Edit {
        /// Post ID
        id: PostId,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New body
        #[arg(long)]
        content: Option<String>,

        /// Replace tags (repeatable)
        #[arg(long = "tag", short)]
        tags: Vec<String>,

        /// Remove every tag
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,

        /// New publication date (YYYY-MM-DD or RFC 3339)
        #[arg(long, value_parser = parse_publish_date)]
        publish_date: Option<DateTime<Utc>>,

        /// Remove the publication date
        #[arg(long, conflicts_with = "publish_date")]
        clear_publish_date: bool,
    },

    /// Delete a post
    Delete {
        /// Post ID
        id: PostId,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },

    /// Send a draft to review
    Submit {
        /// Post ID
        id: PostId,
    },

    /// Approve a post in review
    Approve {
        /// Post ID
        id: PostId,
    },

    /// Send a post in review back to draft
    Revert {
        /// Post ID
        id: PostId,
    },

    /// Publish an approved post
    Publish {
        /// Post ID
        id: PostId,
    },
}

/// Execute the post command
pub async fn execute(ctx: &AppContext, cmd: PostCommand) -> Result<()> {
    let workflow = ctx.workflow()?;

    match cmd {
        PostCommand::Create {
            title,
            content,
            tags,
            publish_date,
            workspace,
            json,
        } => {
            let mut new = NewPost::new(title, ctx.user, workspace).with_content(content);
            new.tags = tags;
            new.publish_date = publish_date;
            create_post(&workflow, new, json).await
        }
        PostCommand::List {
            status,
            search,
            tag,
            author,
            workspace,
            sort,
            limit,
            json,
        } => {
            let mut query = PostQuery::new().sorted_by(sort);
            if let Some(status) = status {
                query = query.with_status(status);
            }
            if let Some(search) = search {
                query = query.with_search(search);
            }
            if let Some(tag) = tag {
                query = query.with_tag(tag);
            }
            if let Some(author) = author {
                query = query.by_author(author);
            }
            if let Some(workspace) = workspace {
                query = query.in_workspace(workspace);
            }
            list_posts(ctx, &workflow, &query, limit, json).await
        }
        PostCommand::Show { id, json } => show_post(ctx, &workflow, id, json).await,
        PostCommand::Edit {
            id,
            title,
            content,
            tags,
            clear_tags,
            publish_date,
            clear_publish_date,
        } => {
            let edit = PostEdit {
                title,
                content,
                tags: if clear_tags {
                    Some(Vec::new())
                } else if tags.is_empty() {
                    None
                } else {
                    Some(tags)
                },
                publish_date: if clear_publish_date {
                    Some(None)
                } else {
                    publish_date.map(Some)
                },
            };
            edit_post(&workflow, id, edit).await
        }
        PostCommand::Delete { id, yes } => delete_post(&workflow, id, yes).await,
        PostCommand::Submit { id } => transition(&workflow, id, Trigger::SubmitForReview).await,
        PostCommand::Approve { id } => transition(&workflow, id, Trigger::Approve).await,
        PostCommand::Revert { id } => transition(&workflow, id, Trigger::RevertToDraft).await,
        PostCommand::Publish { id } => transition(&workflow, id, Trigger::Publish).await,
    }
}

async fn create_post(workflow: &EditorialWorkflow, new: NewPost, as_json: bool) -> Result<()> {
    let post = workflow
        .create_post(new)
        .await
        .context("Failed to create post")?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&post)?);
        return Ok(());
    }

    println!(
        "{} Created post {} {}",
        "✓".green(),
        post.id.to_string().green(),
        post.title.bold()
    );
    Ok(())
}

async fn list_posts(
    ctx: &AppContext,
    workflow: &EditorialWorkflow,
    query: &PostQuery,
    limit: usize,
    as_json: bool,
) -> Result<()> {
    let posts = workflow.list_posts(query).await?;
    let total = posts.len();
    let posts: Vec<Post> = posts.into_iter().take(limit).collect();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    if posts.is_empty() {
        println!("No posts found.");
        return Ok(());
    }

    println!("{}", "Posts:".bold().underline());
    println!();

    for post in &posts {
        let tags = if post.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", post.tags.join(", "))
        };
        println!(
            "  {:>4}  {:<10} {}{} ({})",
            post.id.to_string().green(),
            status_label(post.status),
            post.title,
            tags.cyan(),
            ctx.format_time(&post.updated_at).dimmed()
        );
    }

    if total > limit {
        println!(
            "\n  {} Showing {} of {} posts. Use --limit to show more.",
            "ℹ".blue(),
            limit,
            total
        );
    }

    Ok(())
}

async fn show_post(
    ctx: &AppContext,
    workflow: &EditorialWorkflow,
    id: PostId,
    as_json: bool,
) -> Result<()> {
    let post = workflow
        .get_post(id)
        .await
        .context(format!("Post '{}' not found", id))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&post)?);
        return Ok(());
    }

    let thread = workflow.comment_tree(id).await?;

    println!("{}", "Post Details".bold().underline());
    println!();
    println!("  ID: {}", post.id.to_string().green());
    println!("  Title: {}", post.title.bold());
    println!("  Status: {}", status_label(post.status));
    println!("  Author: {}", post.author_id);
    println!("  Workspace: {}", post.workspace_id);
    if !post.tags.is_empty() {
        println!("  Tags: {}", post.tags.join(", ").cyan());
    }
    if let Some(date) = &post.publish_date {
        println!("  Publish date: {}", ctx.format_time(date));
    }
    println!("  Created: {}", ctx.format_time(&post.created_at));
    println!("  Updated: {}", ctx.format_time(&post.updated_at));

    let next: Vec<String> = Trigger::ALL
        .iter()
        .filter(|t| t.from_status() == post.status)
        .map(|t| t.name().to_string())
        .collect();
    if !next.is_empty() {
        println!("  Next: {}", next.join(", ").cyan());
    }

    println!();
    println!("{}", "Comments".bold());
    println!(
        "  Total: {}",
        thread.total_count().to_string().yellow()
    );
    println!(
        "  Unresolved: {}",
        thread.unresolved_count().to_string().yellow()
    );

    if !post.content.is_empty() {
        println!();
        println!("{}", "Content".bold());
        for line in post.content.lines() {
            println!("  {}", line);
        }
    }

    Ok(())
}

async fn edit_post(workflow: &EditorialWorkflow, id: PostId, edit: PostEdit) -> Result<()> {
    let post = workflow
        .edit_post(id, edit)
        .await
        .context(format!("Failed to edit post '{}'", id))?;
    println!(
        "{} Updated post {} {}",
        "✓".green(),
        post.id.to_string().green(),
        post.title.bold()
    );
    Ok(())
}

async fn delete_post(workflow: &EditorialWorkflow, id: PostId, yes: bool) -> Result<()> {
    let post = workflow
        .get_post(id)
        .await
        .context(format!("Post '{}' not found", id))?;

    if !yes {
        println!("Post: {} {}", id.to_string().green(), post.title);
        println!("  Status: {}", status_label(post.status));
    }
    if !confirm("Delete this post?", yes)? {
        println!("Deletion cancelled.");
        return Ok(());
    }

    workflow.delete_post(id).await?;
    println!("{} Post '{}' deleted.", "✓".green(), id);
    Ok(())
}

async fn transition(workflow: &EditorialWorkflow, id: PostId, trigger: Trigger) -> Result<()> {
    let post = workflow
        .apply_transition(id, trigger)
        .await
        .context(format!("Cannot {} post '{}'", trigger, id))?;
    println!(
        "{} Post {} is now {}",
        "✓".green(),
        post.id.to_string().green(),
        status_label(post.status)
    );
    Ok(())
}
