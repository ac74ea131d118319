//! Post data models

use super::status::{PostStatus, StatusChange};
use crate::error::{Result, WorkflowError};
use crate::types::{PostId, UserId, WorkspaceId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A unit of content with a four-state publication lifecycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Unique post identifier
    pub id: PostId,
    /// Post title, never empty
    pub title: String,
    /// Body, may contain markup
    #[serde(default)]
    pub content: String,
    /// Publication status
    pub status: PostStatus,
    /// Author of the post
    pub author_id: UserId,
    /// Owning workspace
    pub workspace_id: WorkspaceId,
    /// Scheduled or actual publication time
    #[serde(default)]
    pub publish_date: Option<DateTime<Utc>>,
    /// Tags for categorization
    #[serde(default)]
    pub tags: Vec<String>,
    /// When the post was created
    pub created_at: DateTime<Utc>,
    /// When the post was last mutated
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Materialize a new post; storage supplies the ID and clock
    pub fn from_new(id: PostId, new: NewPost, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            content: new.content,
            status: PostStatus::Draft,
            author_id: new.author_id,
            workspace_id: new.workspace_id,
            publish_date: new.publish_date,
            tags: new.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a patch and refresh updated_at
    ///
    /// A status change is only applied if the current status equals the
    /// change's `from`; otherwise nothing is modified.
    pub fn apply_patch(&mut self, patch: PostPatch) -> Result<()> {
        if let Some(change) = patch.status {
            if self.status != change.from {
                return Err(WorkflowError::IllegalTransition {
                    from: self.status,
                    to: change.to,
                });
            }
        }

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(publish_date) = patch.publish_date {
            self.publish_date = publish_date;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(change) = patch.status {
            self.status = change.to;
        }
        self.touch();
        Ok(())
    }

    /// Mark post as updated
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Date the post is shown on in the calendar
    pub fn calendar_date(&self) -> NaiveDate {
        self.publish_date.unwrap_or(self.created_at).date_naive()
    }

    /// Check if the post carries a tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Data for creating a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    /// Post title
    pub title: String,
    /// Body
    #[serde(default)]
    pub content: String,
    /// Author
    pub author_id: UserId,
    /// Owning workspace
    pub workspace_id: WorkspaceId,
    /// Optional publication date
    #[serde(default)]
    pub publish_date: Option<DateTime<Utc>>,
    /// Tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewPost {
    /// Create a new post draft with only a title
    pub fn new(title: impl Into<String>, author_id: UserId, workspace_id: WorkspaceId) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
            author_id,
            workspace_id,
            publish_date: None,
            tags: Vec::new(),
        }
    }

    /// Set the body
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set the publication date
    pub fn with_publish_date(mut self, date: DateTime<Utc>) -> Self {
        self.publish_date = Some(date);
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Partial update of a stored post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostPatch {
    /// New title
    pub title: Option<String>,
    /// New body
    pub content: Option<String>,
    /// New publication date; `Some(None)` clears it
    pub publish_date: Option<Option<DateTime<Utc>>>,
    /// Replacement tag set
    pub tags: Option<Vec<String>>,
    /// Compare-and-set status change
    pub status: Option<StatusChange>,
}

impl PostPatch {
    /// Create an empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the body
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set or clear the publication date
    pub fn publish_date(mut self, date: Option<DateTime<Utc>>) -> Self {
        self.publish_date = Some(date);
        self
    }

    /// Replace the tag set
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Attach a validated status change
    pub fn status(mut self, change: StatusChange) -> Self {
        self.status = Some(change);
        self
    }

    /// Check if the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.publish_date.is_none()
            && self.tags.is_none()
            && self.status.is_none()
    }
}

/// Content edit requested by a caller; status is not editable this way
#[derive(Debug, Clone, Default)]
pub struct PostEdit {
    /// New title
    pub title: Option<String>,
    /// New body
    pub content: Option<String>,
    /// New publication date; `Some(None)` clears it
    pub publish_date: Option<Option<DateTime<Utc>>>,
    /// Replacement tag set
    pub tags: Option<Vec<String>>,
}

impl From<PostEdit> for PostPatch {
    fn from(edit: PostEdit) -> Self {
        PostPatch {
            title: edit.title,
            content: edit.content,
            publish_date: edit.publish_date,
            tags: edit.tags,
            status: None,
        }
    }
}
