//! In-memory store

use super::records::RecordSet;
use super::WorkflowStore;
use crate::comment::{Comment, CommentPatch, NewComment};
use crate::error::Result;
use crate::post::{NewPost, Post, PostPatch};
use crate::types::{CommentId, PostId};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-memory post and comment storage
///
/// Writes take an exclusive lock, so a status compare-and-set always sees
/// the latest committed status.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<RecordSet>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with existing records
    pub fn with_records(records: RecordSet) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Copy of the current record set
    pub async fn snapshot(&self) -> RecordSet {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl WorkflowStore for MemoryStore {
    async fn get_post(&self, id: PostId) -> Result<Post> {
        self.records.read().await.get_post(id)
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        Ok(self.records.read().await.list_posts())
    }

    async fn create_post(&self, post: NewPost) -> Result<Post> {
        Ok(self.records.write().await.create_post(post))
    }

    async fn update_post(&self, id: PostId, patch: PostPatch) -> Result<Post> {
        self.records.write().await.update_post(id, patch)
    }

    async fn delete_post(&self, id: PostId) -> Result<()> {
        self.records.write().await.delete_post(id)
    }

    async fn get_comment(&self, id: CommentId) -> Result<Comment> {
        self.records.read().await.get_comment(id)
    }

    async fn list_comments_by_post(&self, post_id: PostId) -> Result<Vec<Comment>> {
        Ok(self.records.read().await.list_comments_by_post(post_id))
    }

    async fn create_comment(&self, comment: NewComment) -> Result<Comment> {
        Ok(self.records.write().await.create_comment(comment))
    }

    async fn update_comment(&self, id: CommentId, patch: CommentPatch) -> Result<Comment> {
        self.records.write().await.update_comment(id, patch)
    }

    async fn delete_comment(&self, id: CommentId) -> Result<()> {
        self.records.write().await.delete_comment(id)
    }
}
