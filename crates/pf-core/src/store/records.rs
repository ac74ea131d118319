//! Plain record set shared by the in-process store implementations

use crate::comment::{Comment, CommentPatch, NewComment};
use crate::error::{Result, WorkflowError};
use crate::post::{NewPost, Post, PostPatch};
use crate::types::{CommentId, PostId};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Posts and comments keyed by ID, with monotonic ID counters
///
/// IDs are never reused, even after deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSet {
    /// Next post ID to hand out
    pub next_post_id: u64,
    /// Next comment ID to hand out
    pub next_comment_id: u64,
    /// All posts
    #[serde(default)]
    pub posts: BTreeMap<PostId, Post>,
    /// All comments
    #[serde(default)]
    pub comments: BTreeMap<CommentId, Comment>,
}

impl RecordSet {
    /// Create an empty record set
    pub fn new() -> Self {
        Self {
            next_post_id: 1,
            next_comment_id: 1,
            posts: BTreeMap::new(),
            comments: BTreeMap::new(),
        }
    }

    /// Build a record set from existing records
    ///
    /// Counters start after the largest ID present.
    pub fn from_records(
        posts: impl IntoIterator<Item = Post>,
        comments: impl IntoIterator<Item = Comment>,
    ) -> Self {
        let posts: BTreeMap<PostId, Post> = posts.into_iter().map(|p| (p.id, p)).collect();
        let comments: BTreeMap<CommentId, Comment> =
            comments.into_iter().map(|c| (c.id, c)).collect();

        let mut set = Self {
            next_post_id: 1,
            next_comment_id: 1,
            posts,
            comments,
        };
        set.repair_counters();
        set
    }

    /// Make sure counters are past every stored ID
    pub fn repair_counters(&mut self) {
        if let Some(max) = self.posts.keys().next_back() {
            self.next_post_id = self.next_post_id.max(max.0 + 1);
        }
        if let Some(max) = self.comments.keys().next_back() {
            self.next_comment_id = self.next_comment_id.max(max.0 + 1);
        }
    }

    /// Look up a post by ID
    pub fn get_post(&self, id: PostId) -> Result<Post> {
        self.posts
            .get(&id)
            .cloned()
            .ok_or(WorkflowError::PostNotFound(id))
    }

    /// Every post, ordered by ID
    pub fn list_posts(&self) -> Vec<Post> {
        self.posts.values().cloned().collect()
    }

    /// Insert a Draft post under the next post ID
    pub fn create_post(&mut self, new: NewPost) -> Post {
        let id = PostId(self.next_post_id);
        self.next_post_id += 1;

        let post = Post::from_new(id, new, Utc::now());
        self.posts.insert(id, post.clone());
        post
    }

    /// Apply a patch to a post, checking any status change
    pub fn update_post(&mut self, id: PostId, patch: PostPatch) -> Result<Post> {
        let post = self
            .posts
            .get_mut(&id)
            .ok_or(WorkflowError::PostNotFound(id))?;
        post.apply_patch(patch)?;
        Ok(post.clone())
    }

    /// Remove a post; its comments stay
    pub fn delete_post(&mut self, id: PostId) -> Result<()> {
        self.posts
            .remove(&id)
            .map(|_| ())
            .ok_or(WorkflowError::PostNotFound(id))
    }

    /// Look up a comment by ID
    pub fn get_comment(&self, id: CommentId) -> Result<Comment> {
        self.comments
            .get(&id)
            .cloned()
            .ok_or(WorkflowError::CommentNotFound(id))
    }

    /// Comments on a post, ordered by ID
    pub fn list_comments_by_post(&self, post_id: PostId) -> Vec<Comment> {
        self.comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect()
    }

    /// Insert a comment under the next comment ID
    pub fn create_comment(&mut self, new: NewComment) -> Comment {
        let id = CommentId(self.next_comment_id);
        self.next_comment_id += 1;

        let comment = Comment::from_new(id, new, Utc::now());
        self.comments.insert(id, comment.clone());
        comment
    }

    /// Apply a patch to a comment
    pub fn update_comment(&mut self, id: CommentId, patch: CommentPatch) -> Result<Comment> {
        let comment = self
            .comments
            .get_mut(&id)
            .ok_or(WorkflowError::CommentNotFound(id))?;
        comment.apply_patch(patch);
        Ok(comment.clone())
    }

    /// Remove a comment; its replies stay
    pub fn delete_comment(&mut self, id: CommentId) -> Result<()> {
        self.comments
            .remove(&id)
            .map(|_| ())
            .ok_or(WorkflowError::CommentNotFound(id))
    }
}

impl Default for RecordSet {
    fn default() -> Self {
        Self::new()
    }
}
