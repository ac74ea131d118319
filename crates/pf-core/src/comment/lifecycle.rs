//! Comment lifecycle: add, reply, resolve, delete

use super::model::{Comment, CommentPatch, NewComment};
use super::tree::{CommentTree, MAX_REPLY_DEPTH};
use crate::error::{Result, WorkflowError};
use crate::store::WorkflowStore;
use crate::types::{CommentId, PostId, UserId};
use crate::validator::Validator;
use tracing::{debug, info};

/// Enforces which operations a comment allows
#[derive(Debug, Clone, Default)]
pub struct CommentLifecycle {
    validator: Validator,
}

impl CommentLifecycle {
    /// Create a lifecycle manager with the given validator
    pub fn new(validator: Validator) -> Self {
        Self { validator }
    }

    /// Add a top-level comment to a post
    pub async fn add_root<S>(
        &self,
        store: &S,
        post_id: PostId,
        user_id: UserId,
        content: &str,
    ) -> Result<Comment>
    where
        S: WorkflowStore + ?Sized,
    {
        self.validator.validate_comment(content)?;
        store.get_post(post_id).await?;

        let comment = store
            .create_comment(NewComment::root(post_id, user_id, content))
            .await?;
        info!("Added comment {} on post {}", comment.id, post_id);
        Ok(comment)
    }

    /// Reply to a comment on `post_id`
    ///
    /// The parent's depth is computed from the post's current comment tree,
    /// so a reply under a comment whose own parent was deleted starts over
    /// at depth 1.
    pub async fn reply<S>(
        &self,
        store: &S,
        post_id: PostId,
        parent_id: CommentId,
        user_id: UserId,
        content: &str,
    ) -> Result<Comment>
    where
        S: WorkflowStore + ?Sized,
    {
        self.validator.validate_comment(content)?;

        let parent = match store.get_comment(parent_id).await {
            Ok(parent) => parent,
            Err(WorkflowError::CommentNotFound(_)) => {
                return Err(WorkflowError::ParentNotFound(parent_id))
            }
            Err(e) => return Err(e),
        };
        if parent.post_id != post_id {
            return Err(WorkflowError::ParentMismatch {
                parent: parent_id,
                expected: post_id,
                actual: parent.post_id,
            });
        }

        let forest = CommentTree::build(post_id, store.list_comments_by_post(post_id).await?);
        let depth = forest
            .depth_of(parent_id)
            .ok_or(WorkflowError::ParentNotFound(parent_id))?;
        if depth >= MAX_REPLY_DEPTH {
            debug!(
                "Rejected reply to comment {} at depth {}",
                parent_id, depth
            );
            return Err(WorkflowError::MaxDepthExceeded {
                parent: parent_id,
                depth,
            });
        }

        let comment = store
            .create_comment(NewComment::reply(post_id, parent_id, user_id, content))
            .await?;
        info!(
            "Added reply {} to comment {} on post {}",
            comment.id, parent_id, post_id
        );
        Ok(comment)
    }

    /// Mark a comment resolved; resolving twice is a no-op
    pub async fn resolve<S>(&self, store: &S, comment_id: CommentId) -> Result<Comment>
    where
        S: WorkflowStore + ?Sized,
    {
        let comment = store.get_comment(comment_id).await?;
        if comment.resolved {
            debug!("Comment {} already resolved", comment_id);
            return Ok(comment);
        }

        let comment = store
            .update_comment(comment_id, CommentPatch::resolve())
            .await?;
        info!("Resolved comment {}", comment_id);
        Ok(comment)
    }

    /// Delete a comment; replies are not touched
    pub async fn delete<S>(&self, store: &S, comment_id: CommentId) -> Result<()>
    where
        S: WorkflowStore + ?Sized,
    {
        store.delete_comment(comment_id).await?;
        info!("Deleted comment {}", comment_id);
        Ok(())
    }
}
