//! Comment data models

use crate::types::{CommentId, PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A discussion message attached to a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment identifier
    pub id: CommentId,
    /// Owning post
    pub post_id: PostId,
    /// Author of the comment
    pub user_id: UserId,
    /// Comment content, never empty
    pub content: String,
    /// Comment this one replies to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentId>,
    /// Whether the comment has been addressed
    #[serde(default)]
    pub resolved: bool,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Materialize a new comment; storage supplies the ID and clock
    pub fn from_new(id: CommentId, new: NewComment, now: DateTime<Utc>) -> Self {
        Self {
            id,
            post_id: new.post_id,
            user_id: new.user_id,
            content: new.content,
            parent_id: new.parent_id,
            resolved: false,
            created_at: now,
        }
    }

    /// Apply a patch
    pub fn apply_patch(&mut self, patch: CommentPatch) {
        if let Some(resolved) = patch.resolved {
            self.resolved = resolved;
        }
    }

    /// Check if this is a reply
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Thread ordering: creation time, then ID
    pub fn thread_order(&self, other: &Comment) -> Ordering {
        self.created_at
            .cmp(&other.created_at)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Data for creating a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    /// Owning post
    pub post_id: PostId,
    /// Author
    pub user_id: UserId,
    /// Content
    pub content: String,
    /// Comment being replied to
    #[serde(default)]
    pub parent_id: Option<CommentId>,
}

impl NewComment {
    /// A top-level comment
    pub fn root(post_id: PostId, user_id: UserId, content: impl Into<String>) -> Self {
        Self {
            post_id,
            user_id,
            content: content.into(),
            parent_id: None,
        }
    }

    /// A reply to `parent_id`
    pub fn reply(
        post_id: PostId,
        parent_id: CommentId,
        user_id: UserId,
        content: impl Into<String>,
    ) -> Self {
        Self {
            post_id,
            user_id,
            content: content.into(),
            parent_id: Some(parent_id),
        }
    }
}

/// Partial update of a stored comment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPatch {
    /// New resolution flag
    pub resolved: Option<bool>,
}

impl CommentPatch {
    /// Patch that marks a comment resolved
    pub fn resolve() -> Self {
        Self {
            resolved: Some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn create_test_comment(id: u64) -> Comment {
        Comment::from_new(
            CommentId(id),
            NewComment::root(PostId(1), UserId(2), "Looks good"),
            Utc::now(),
        )
    }

    #[test]
    fn test_comment_creation() {
        let comment = create_test_comment(1);
        assert_eq!(comment.content, "Looks good");
        assert!(!comment.resolved);
        assert!(!comment.is_reply());
    }

    #[test]
    fn test_reply_creation() {
        let reply = Comment::from_new(
            CommentId(2),
            NewComment::reply(PostId(1), CommentId(1), UserId(3), "Agreed"),
            Utc::now(),
        );
        assert_eq!(reply.parent_id, Some(CommentId(1)));
        assert!(reply.is_reply());
    }

    #[test]
    fn test_resolve_patch() {
        let mut comment = create_test_comment(1);
        comment.apply_patch(CommentPatch::resolve());
        assert!(comment.resolved);

        comment.apply_patch(CommentPatch::default());
        assert!(comment.resolved);
    }

    #[test]
    fn test_thread_order() {
        let mut a = create_test_comment(5);
        let mut b = create_test_comment(3);
        a.created_at = b.created_at;
        assert_eq!(a.thread_order(&b), Ordering::Greater);

        b.created_at = a.created_at + Duration::seconds(1);
        assert_eq!(a.thread_order(&b), Ordering::Less);
    }

    #[test]
    fn test_comment_serialization() {
        let comment = create_test_comment(1);
        let json = serde_json::to_string(&comment).unwrap();
        assert!(!json.contains("parent_id"));
        let comment2: Comment = serde_json::from_str(&json).unwrap();
        assert_eq!(comment, comment2);
    }
}
