//! Storage collaborator abstraction
//!
//! The workflow never owns record state. Every read and write goes through a
//! [`WorkflowStore`], which assigns identifiers, stamps timestamps and
//! serializes writes. Status changes are compare-and-set (see
//! [`crate::post::StatusChange`]) so a transition validated against a stale
//! status cannot be persisted.

mod memory;
mod records;

pub use memory::MemoryStore;
pub use records::RecordSet;

use crate::comment::{Comment, CommentPatch, NewComment};
use crate::error::Result;
use crate::post::{NewPost, Post, PostPatch};
use crate::types::{CommentId, PostId};
use async_trait::async_trait;

/// Trait for post and comment storage implementations
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Load a post; fails with `PostNotFound`
    async fn get_post(&self, id: PostId) -> Result<Post>;

    /// List all posts
    async fn list_posts(&self) -> Result<Vec<Post>>;

    /// Create a post in Draft, assigning its ID and timestamps
    async fn create_post(&self, post: NewPost) -> Result<Post>;

    /// Apply a patch and refresh updated_at
    async fn update_post(&self, id: PostId, patch: PostPatch) -> Result<Post>;

    /// Delete a post
    async fn delete_post(&self, id: PostId) -> Result<()>;

    /// Load a comment; fails with `CommentNotFound`
    async fn get_comment(&self, id: CommentId) -> Result<Comment>;

    /// List every comment on a post, in no particular order
    async fn list_comments_by_post(&self, post_id: PostId) -> Result<Vec<Comment>>;

    /// Create a comment, assigning its ID and timestamp
    async fn create_comment(&self, comment: NewComment) -> Result<Comment>;

    /// Apply a patch to a comment
    async fn update_comment(&self, id: CommentId, patch: CommentPatch) -> Result<Comment>;

    /// Delete a comment; replies are left in place
    async fn delete_comment(&self, id: CommentId) -> Result<()>;
}
