//! Editorial workflow coordinator
//!
//! The single entry point for callers. Status intents map onto fixed target
//! statuses, so callers can never name an arbitrary transition. Every
//! operation returns `Result`; domain failures are [`WorkflowError`]
//! variants, never panics.
//!
//! # Example
//!
//! ```ignore
//! use pf_core::store::MemoryStore;
//! use pf_core::workflow::EditorialWorkflow;
//!
//! let workflow = EditorialWorkflow::new(MemoryStore::new());
//! let post = workflow.create_post(NewPost::new("Hello", author, workspace)).await?;
//! let post = workflow.submit_for_review(post.id).await?;
//! ```

use crate::comment::{Comment, CommentLifecycle, CommentTree, Forest};
use crate::config::Config;
use crate::error::{Result, WorkflowError};
use crate::post::{
    CalendarMonth, NewPost, Post, PostEdit, PostPatch, PostQuery, StatusCounts, StatusMachine,
    Trigger,
};
use crate::store::WorkflowStore;
use crate::types::{CommentId, PostId, UserId};
use crate::validator::Validator;
use std::sync::Arc;
use tracing::info;

/// Coordinator for post transitions and discussions
pub struct EditorialWorkflow {
    /// Storage backend
    store: Arc<dyn WorkflowStore>,
    /// Input validation
    validator: Validator,
    /// Comment operations
    comments: CommentLifecycle,
}

impl EditorialWorkflow {
    /// Create a new workflow with the given store
    pub fn new(store: impl WorkflowStore + 'static) -> Self {
        Self::with_store(Arc::new(store))
    }

    /// Create a new workflow with a shared store
    pub fn with_store(store: Arc<dyn WorkflowStore>) -> Self {
        Self::with_validator(store, Validator::new())
    }

    /// Create a new workflow honoring configured limits
    pub fn with_config(store: Arc<dyn WorkflowStore>, config: &Config) -> Self {
        Self::with_validator(store, Validator::from_config(&config.workflow))
    }

    fn with_validator(store: Arc<dyn WorkflowStore>, validator: Validator) -> Self {
        Self {
            store,
            comments: CommentLifecycle::new(validator.clone()),
            validator,
        }
    }

    // Posts

    /// Create a post in Draft
    pub async fn create_post(&self, mut post: NewPost) -> Result<Post> {
        self.validator.validate_title(&post.title)?;
        post.title = post.title.trim().to_string();
        post.tags = self.validator.normalize_tags(post.tags)?;

        let post = self.store.create_post(post).await?;
        info!("Created post {} ({:?})", post.id, post.title);
        Ok(post)
    }

    /// Load a post
    pub async fn get_post(&self, post_id: PostId) -> Result<Post> {
        self.store.get_post(post_id).await
    }

    /// Edit content fields of a post; status is untouched
    pub async fn edit_post(&self, post_id: PostId, mut edit: PostEdit) -> Result<Post> {
        if let Some(title) = edit.title.take() {
            self.validator.validate_title(&title)?;
            edit.title = Some(title.trim().to_string());
        }
        if let Some(tags) = edit.tags.take() {
            edit.tags = Some(self.validator.normalize_tags(tags)?);
        }

        let patch = PostPatch::from(edit);
        if patch.is_empty() {
            return Err(WorkflowError::Validation("Nothing to update".to_string()));
        }

        let post = self.store.update_post(post_id, patch).await?;
        info!("Edited post {}", post_id);
        Ok(post)
    }

    /// Delete a post regardless of its status
    pub async fn delete_post(&self, post_id: PostId) -> Result<()> {
        self.store.delete_post(post_id).await?;
        info!("Deleted post {}", post_id);
        Ok(())
    }

    /// List posts matching a query
    pub async fn list_posts(&self, query: &PostQuery) -> Result<Vec<Post>> {
        Ok(query.apply(self.store.list_posts().await?))
    }

    /// Count posts per status
    pub async fn status_counts(&self) -> Result<StatusCounts> {
        let posts = self.store.list_posts().await?;
        Ok(StatusCounts::tally(&posts))
    }

    /// Posts bucketed by day for a calendar month
    pub async fn calendar(&self, year: i32, month: u32) -> Result<CalendarMonth> {
        CalendarMonth::build(year, month, self.store.list_posts().await?)
    }

    // Status transitions

    /// Apply a named transition
    pub async fn apply_transition(&self, post_id: PostId, trigger: Trigger) -> Result<Post> {
        StatusMachine::apply(self.store.as_ref(), post_id, trigger.target()).await
    }

    /// Draft -> In Review
    pub async fn submit_for_review(&self, post_id: PostId) -> Result<Post> {
        self.apply_transition(post_id, Trigger::SubmitForReview).await
    }

    /// In Review -> Approved
    pub async fn approve(&self, post_id: PostId) -> Result<Post> {
        self.apply_transition(post_id, Trigger::Approve).await
    }

    /// In Review -> Draft
    pub async fn revert_to_draft(&self, post_id: PostId) -> Result<Post> {
        self.apply_transition(post_id, Trigger::RevertToDraft).await
    }

    /// Approved -> Published
    pub async fn publish(&self, post_id: PostId) -> Result<Post> {
        self.apply_transition(post_id, Trigger::Publish).await
    }

    // Discussion

    /// Add a top-level comment
    pub async fn add_comment(
        &self,
        post_id: PostId,
        user_id: UserId,
        content: &str,
    ) -> Result<Comment> {
        self.comments
            .add_root(self.store.as_ref(), post_id, user_id, content)
            .await
    }

    /// Reply to a comment; the post is taken from the parent
    pub async fn reply(
        &self,
        parent_id: CommentId,
        user_id: UserId,
        content: &str,
    ) -> Result<Comment> {
        let parent = self.store.get_comment(parent_id).await.map_err(|e| match e {
            WorkflowError::CommentNotFound(id) => WorkflowError::ParentNotFound(id),
            other => other,
        })?;
        self.comments
            .reply(
                self.store.as_ref(),
                parent.post_id,
                parent_id,
                user_id,
                content,
            )
            .await
    }

    /// Reply to a comment that must belong to `post_id`
    pub async fn reply_on_post(
        &self,
        post_id: PostId,
        parent_id: CommentId,
        user_id: UserId,
        content: &str,
    ) -> Result<Comment> {
        self.comments
            .reply(self.store.as_ref(), post_id, parent_id, user_id, content)
            .await
    }

    /// Load a comment
    pub async fn get_comment(&self, comment_id: CommentId) -> Result<Comment> {
        self.store.get_comment(comment_id).await
    }

    /// Mark a comment resolved
    pub async fn resolve_comment(&self, comment_id: CommentId) -> Result<Comment> {
        self.comments.resolve(self.store.as_ref(), comment_id).await
    }

    /// Delete a comment
    pub async fn delete_comment(&self, comment_id: CommentId) -> Result<()> {
        self.comments.delete(self.store.as_ref(), comment_id).await
    }

    /// Threaded discussion for a post
    pub async fn comment_tree(&self, post_id: PostId) -> Result<Forest> {
        let comments = self.store.list_comments_by_post(post_id).await?;
        Ok(CommentTree::build(post_id, comments))
    }
}
