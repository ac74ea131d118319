//! Input validation for posts and comments

use crate::config::WorkflowConfig;
use crate::error::{Result, WorkflowError};

/// Maximum comment length (default)
pub const MAX_COMMENT_LENGTH: usize = 10000;

/// Maximum title length (default)
pub const MAX_TITLE_LENGTH: usize = 200;

/// Validator for user-supplied text
#[derive(Debug, Clone)]
pub struct Validator {
    max_comment_length: usize,
    max_title_length: usize,
}

impl Validator {
    /// Create a new validator with default settings
    pub fn new() -> Self {
        Self {
            max_comment_length: MAX_COMMENT_LENGTH,
            max_title_length: MAX_TITLE_LENGTH,
        }
    }

    /// Create a validator from workflow configuration
    pub fn from_config(config: &WorkflowConfig) -> Self {
        Self {
            max_comment_length: config.max_comment_length,
            max_title_length: config.max_title_length,
        }
    }

    /// Validate comment content
    pub fn validate_comment(&self, content: &str) -> Result<()> {
        let trimmed = content.trim();

        if trimmed.is_empty() {
            return Err(WorkflowError::Validation(
                "Comment content cannot be empty".to_string(),
            ));
        }

        if trimmed.chars().count() > self.max_comment_length {
            return Err(WorkflowError::Validation(format!(
                "Comment content exceeds maximum length of {} characters",
                self.max_comment_length
            )));
        }

        Ok(())
    }

    /// Validate a post title
    pub fn validate_title(&self, title: &str) -> Result<()> {
        let trimmed = title.trim();

        if trimmed.is_empty() {
            return Err(WorkflowError::Validation(
                "Post title cannot be empty".to_string(),
            ));
        }

        if trimmed.chars().count() > self.max_title_length {
            return Err(WorkflowError::Validation(format!(
                "Post title exceeds maximum length of {} characters",
                self.max_title_length
            )));
        }

        Ok(())
    }

    /// Trim tags and drop duplicates, keeping first occurrence order
    pub fn normalize_tags(&self, tags: Vec<String>) -> Result<Vec<String>> {
        let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            let tag = tag.trim();
            if tag.is_empty() {
                return Err(WorkflowError::Validation(
                    "Tags cannot be empty".to_string(),
                ));
            }
            if !normalized.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                normalized.push(tag.to_string());
            }
        }
        Ok(normalized)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
