//! Error types for postflow

use crate::post::PostStatus;
use crate::types::{CommentId, PostId};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for postflow
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Post not found
    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    /// Comment not found
    #[error("Comment not found: {0}")]
    CommentNotFound(CommentId),

    /// Reply target does not exist
    #[error("Parent comment not found: {0}")]
    ParentNotFound(CommentId),

    /// Status pair is not in the transition table
    #[error("Illegal transition from {from} to {to}")]
    IllegalTransition { from: PostStatus, to: PostStatus },

    /// Reply would nest deeper than allowed
    #[error("Cannot reply to comment {parent}: depth {depth} is the maximum")]
    MaxDepthExceeded { parent: CommentId, depth: usize },

    /// Reply parent belongs to a different post
    #[error("Comment {parent} belongs to post {actual}, not post {expected}")]
    ParentMismatch {
        parent: CommentId,
        expected: PostId,
        actual: PostId,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage collaborator failed or is unreachable
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<WorkflowError>,
    },
}

/// Caller-facing error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A post or comment identifier did not resolve
    NotFound,
    /// Status pair not in the transition table
    IllegalTransition,
    /// Reply nesting limit reached
    MaxDepthExceeded,
    /// Reply parent on a different post
    ParentMismatch,
    /// Empty or oversized input
    Validation,
    /// Storage collaborator failure
    StorageUnavailable,
    /// Local IO, config or serialization failure
    Internal,
}

impl WorkflowError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        WorkflowError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Map this error onto the caller-facing taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkflowError::PostNotFound(_)
            | WorkflowError::CommentNotFound(_)
            | WorkflowError::ParentNotFound(_) => ErrorKind::NotFound,
            WorkflowError::IllegalTransition { .. } => ErrorKind::IllegalTransition,
            WorkflowError::MaxDepthExceeded { .. } => ErrorKind::MaxDepthExceeded,
            WorkflowError::ParentMismatch { .. } => ErrorKind::ParentMismatch,
            WorkflowError::Validation(_) => ErrorKind::Validation,
            WorkflowError::StorageUnavailable(_) => ErrorKind::StorageUnavailable,
            WorkflowError::Io(_)
            | WorkflowError::Serde(_)
            | WorkflowError::Config(_)
            | WorkflowError::FileNotFound(_) => ErrorKind::Internal,
            WorkflowError::WithContext { source, .. } => source.kind(),
        }
    }

    /// Check if this is a not-found condition
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// Result type alias for postflow
pub type Result<T> = std::result::Result<T, WorkflowError>;
