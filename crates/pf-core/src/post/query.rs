//! Search, filter and sort over a post collection

use super::model::Post;
use super::status::PostStatus;
use crate::types::{UserId, WorkspaceId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Sort order for post listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PostSort {
    /// Newest first
    #[default]
    CreatedDesc,
    /// Oldest first
    CreatedAsc,
    /// Most recently updated first
    UpdatedDesc,
    /// Title A-Z
    TitleAsc,
    /// Title Z-A
    TitleDesc,
}

impl PostSort {
    fn compare(&self, a: &Post, b: &Post) -> Ordering {
        let primary = match self {
            PostSort::CreatedDesc => b.created_at.cmp(&a.created_at),
            PostSort::CreatedAsc => a.created_at.cmp(&b.created_at),
            PostSort::UpdatedDesc => b.updated_at.cmp(&a.updated_at),
            PostSort::TitleAsc => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            PostSort::TitleDesc => b.title.to_lowercase().cmp(&a.title.to_lowercase()),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

impl FromStr for PostSort {
    type Err = crate::WorkflowError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "created_desc" | "newest" => Ok(PostSort::CreatedDesc),
            "created_asc" | "oldest" => Ok(PostSort::CreatedAsc),
            "updated_desc" | "updated" => Ok(PostSort::UpdatedDesc),
            "title_asc" | "title" => Ok(PostSort::TitleAsc),
            "title_desc" => Ok(PostSort::TitleDesc),
            _ => Err(crate::WorkflowError::Validation(format!(
                "Unknown sort order: {}",
                s
            ))),
        }
    }
}

/// Filter criteria for post listings
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    /// Case-insensitive substring of title or content
    pub search: Option<String>,
    /// Exact status
    pub status: Option<PostStatus>,
    /// Owning workspace
    pub workspace_id: Option<WorkspaceId>,
    /// Author
    pub author_id: Option<UserId>,
    /// Carries this tag
    pub tag: Option<String>,
    /// Sort order
    pub sort: PostSort,
}

impl PostQuery {
    /// Create a new empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by search term
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Filter by status
    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filter by workspace
    pub fn in_workspace(mut self, workspace_id: WorkspaceId) -> Self {
        self.workspace_id = Some(workspace_id);
        self
    }

    /// Filter by author
    pub fn by_author(mut self, author_id: UserId) -> Self {
        self.author_id = Some(author_id);
        self
    }

    /// Filter by tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set the sort order
    pub fn sorted_by(mut self, sort: PostSort) -> Self {
        self.sort = sort;
        self
    }

    /// Check if a post matches this query
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(ref term) = self.search {
            let term = term.to_lowercase();
            if !post.title.to_lowercase().contains(&term)
                && !post.content.to_lowercase().contains(&term)
            {
                return false;
            }
        }

        if let Some(status) = self.status {
            if post.status != status {
                return false;
            }
        }

        if let Some(workspace_id) = self.workspace_id {
            if post.workspace_id != workspace_id {
                return false;
            }
        }

        if let Some(author_id) = self.author_id {
            if post.author_id != author_id {
                return false;
            }
        }

        if let Some(ref tag) = self.tag {
            if !post.has_tag(tag) {
                return false;
            }
        }

        true
    }

    /// Filter and sort a post collection
    pub fn apply(&self, posts: impl IntoIterator<Item = Post>) -> Vec<Post> {
        let mut result: Vec<Post> = posts.into_iter().filter(|p| self.matches(p)).collect();
        result.sort_by(|a, b| self.sort.compare(a, b));
        result
    }
}

/// Number of posts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Posts in Draft
    pub draft: usize,
    /// Posts in review
    pub in_review: usize,
    /// Approved posts
    pub approved: usize,
    /// Published posts
    pub published: usize,
}

impl StatusCounts {
    /// Count posts by status
    pub fn tally<'a>(posts: impl IntoIterator<Item = &'a Post>) -> Self {
        let mut counts = Self::default();
        for post in posts {
            match post.status {
                PostStatus::Draft => counts.draft += 1,
                PostStatus::InReview => counts.in_review += 1,
                PostStatus::Approved => counts.approved += 1,
                PostStatus::Published => counts.published += 1,
            }
        }
        counts
    }

    /// Count for a single status
    pub fn get(&self, status: PostStatus) -> usize {
        match status {
            PostStatus::Draft => self.draft,
            PostStatus::InReview => self.in_review,
            PostStatus::Approved => self.approved,
            PostStatus::Published => self.published,
        }
    }

    /// Total number of posts counted
    pub fn total(&self) -> usize {
        self.draft + self.in_review + self.approved + self.published
    }
}

/// The `n` most recently updated posts
pub fn recent(posts: impl IntoIterator<Item = Post>, n: usize) -> Vec<Post> {
    let mut posts = PostQuery::new().sorted_by(PostSort::UpdatedDesc).apply(posts);
    posts.truncate(n);
    posts
}
