//! Post status state machine
//!
//! A post moves through four statuses. The only legal moves are:
//!
//! | From      | To        | Trigger           |
//! |-----------|-----------|-------------------|
//! | Draft     | InReview  | submit-for-review |
//! | InReview  | Approved  | approve           |
//! | InReview  | Draft     | revert-to-draft   |
//! | Approved  | Published | publish           |
//!
//! `Published` is terminal.

use super::model::{Post, PostPatch};
use crate::error::{Result, WorkflowError};
use crate::store::WorkflowStore;
use crate::types::PostId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Publication status of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PostStatus {
    /// Being written by the author
    Draft,
    /// Waiting for an editor
    InReview,
    /// Accepted, ready to go out
    Approved,
    /// Live
    Published,
}

impl PostStatus {
    /// All statuses in lifecycle order
    pub const ALL: [PostStatus; 4] = [
        PostStatus::Draft,
        PostStatus::InReview,
        PostStatus::Approved,
        PostStatus::Published,
    ];

    /// Statuses reachable in one step from this one
    pub fn allowed_transitions(&self) -> &'static [PostStatus] {
        match self {
            PostStatus::Draft => &[PostStatus::InReview],
            PostStatus::InReview => &[PostStatus::Approved, PostStatus::Draft],
            PostStatus::Approved => &[PostStatus::Published],
            PostStatus::Published => &[],
        }
    }

    /// Check whether moving to `to` is legal
    pub fn can_transition_to(&self, to: PostStatus) -> bool {
        self.allowed_transitions().contains(&to)
    }

    /// Check if no transition leaves this status
    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            PostStatus::Draft => "Draft",
            PostStatus::InReview => "In Review",
            PostStatus::Approved => "Approved",
            PostStatus::Published => "Published",
        }
    }
}

impl Default for PostStatus {
    fn default() -> Self {
        PostStatus::Draft
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PostStatus {
    type Err = WorkflowError;

    /// Normalize a free-form status string
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect();

        match normalized.as_str() {
            "draft" => Ok(PostStatus::Draft),
            "inreview" | "review" => Ok(PostStatus::InReview),
            "approved" => Ok(PostStatus::Approved),
            "published" => Ok(PostStatus::Published),
            _ => Err(WorkflowError::Validation(format!("Unknown post status: {}", s))),
        }
    }
}

/// Named intent that moves a post to a fixed target status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    /// Draft -> InReview
    SubmitForReview,
    /// InReview -> Approved
    Approve,
    /// InReview -> Draft
    RevertToDraft,
    /// Approved -> Published
    Publish,
}

impl Trigger {
    /// All triggers
    pub const ALL: [Trigger; 4] = [
        Trigger::SubmitForReview,
        Trigger::Approve,
        Trigger::RevertToDraft,
        Trigger::Publish,
    ];

    /// Status the post must currently be in
    pub fn from_status(&self) -> PostStatus {
        match self {
            Trigger::SubmitForReview => PostStatus::Draft,
            Trigger::Approve | Trigger::RevertToDraft => PostStatus::InReview,
            Trigger::Publish => PostStatus::Approved,
        }
    }

    /// Status the post ends up in
    pub fn target(&self) -> PostStatus {
        match self {
            Trigger::SubmitForReview => PostStatus::InReview,
            Trigger::Approve => PostStatus::Approved,
            Trigger::RevertToDraft => PostStatus::Draft,
            Trigger::Publish => PostStatus::Published,
        }
    }

    /// Find the trigger for a status pair, if the pair is legal
    pub fn for_transition(from: PostStatus, to: PostStatus) -> Option<Trigger> {
        Self::ALL
            .into_iter()
            .find(|t| t.from_status() == from && t.target() == to)
    }

    /// Kebab-case name
    pub fn name(&self) -> &'static str {
        match self {
            Trigger::SubmitForReview => "submit-for-review",
            Trigger::Approve => "approve",
            Trigger::RevertToDraft => "revert-to-draft",
            Trigger::Publish => "publish",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated status move, applied by storage only if the stored status still equals `from`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    /// Expected current status
    pub from: PostStatus,
    /// New status
    pub to: PostStatus,
}

/// Validates and applies post status transitions
pub struct StatusMachine;

impl StatusMachine {
    /// Validate a (from, to) pair against the transition table
    pub fn validate(from: PostStatus, to: PostStatus) -> Result<StatusChange> {
        if from.can_transition_to(to) {
            Ok(StatusChange { from, to })
        } else {
            Err(WorkflowError::IllegalTransition { from, to })
        }
    }

    /// Move a stored post to `to`
    ///
    /// Reads the current status from the store, validates the pair and
    /// persists the change as a compare-and-set patch. The store refreshes
    /// `updated_at`; nothing else on the post is touched.
    pub async fn apply<S>(store: &S, post_id: PostId, to: PostStatus) -> Result<Post>
    where
        S: WorkflowStore + ?Sized,
    {
        let post = store.get_post(post_id).await?;
        let change = Self::validate(post.status, to).map_err(|e| {
            debug!("Rejected transition for post {}: {}", post_id, e);
            e
        })?;

        let updated = store
            .update_post(post_id, PostPatch::new().status(change))
            .await?;
        info!(
            "Post {} moved from {} to {}",
            post_id, change.from, change.to
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::NewPost;
    use crate::store::MemoryStore;
    use crate::types::{UserId, WorkspaceId};
    use pretty_assertions::assert_eq;

    const LEGAL: [(PostStatus, PostStatus); 4] = [
        (PostStatus::Draft, PostStatus::InReview),
        (PostStatus::InReview, PostStatus::Approved),
        (PostStatus::InReview, PostStatus::Draft),
        (PostStatus::Approved, PostStatus::Published),
    ];

    #[test]
    fn test_transition_table_is_exact() {
        for from in PostStatus::ALL {
            for to in PostStatus::ALL {
                let expected = LEGAL.contains(&(from, to));
                assert_eq!(from.can_transition_to(to), expected, "{} -> {}", from, to);
                assert_eq!(StatusMachine::validate(from, to).is_ok(), expected);
            }
        }
    }

    #[test]
    fn test_self_transitions_rejected() {
        for status in PostStatus::ALL {
            let err = StatusMachine::validate(status, status).unwrap_err();
            assert!(matches!(err, WorkflowError::IllegalTransition { .. }));
        }
    }

    #[test]
    fn test_published_is_terminal() {
        assert!(PostStatus::Published.is_terminal());
        assert!(!PostStatus::Draft.is_terminal());
    }

    #[test]
    fn test_trigger_targets() {
        for trigger in Trigger::ALL {
            assert!(trigger.from_status().can_transition_to(trigger.target()));
            assert_eq!(
                Trigger::for_transition(trigger.from_status(), trigger.target()),
                Some(trigger)
            );
        }
        assert_eq!(
            Trigger::for_transition(PostStatus::Published, PostStatus::Draft),
            None
        );
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("Draft".parse::<PostStatus>().unwrap(), PostStatus::Draft);
        assert_eq!("In Review".parse::<PostStatus>().unwrap(), PostStatus::InReview);
        assert_eq!("in_review".parse::<PostStatus>().unwrap(), PostStatus::InReview);
        assert_eq!("review".parse::<PostStatus>().unwrap(), PostStatus::InReview);
        assert_eq!("APPROVED".parse::<PostStatus>().unwrap(), PostStatus::Approved);
        assert_eq!(" published ".parse::<PostStatus>().unwrap(), PostStatus::Published);
        assert!("archived".parse::<PostStatus>().is_err());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(PostStatus::InReview.to_string(), "In Review");
        assert_eq!(Trigger::RevertToDraft.to_string(), "revert-to-draft");
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&PostStatus::InReview).unwrap();
        assert_eq!(json, "\"InReview\"");
    }

    #[tokio::test]
    async fn test_apply_transition() {
        let store = MemoryStore::new();
        let post = store
            .create_post(NewPost::new("Title", UserId(1), WorkspaceId(1)))
            .await
            .unwrap();

        let updated = StatusMachine::apply(&store, post.id, PostStatus::InReview)
            .await
            .unwrap();
        assert_eq!(updated.status, PostStatus::InReview);
        assert!(updated.updated_at >= post.updated_at);

        let err = StatusMachine::apply(&store, post.id, PostStatus::Published)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::IllegalTransition {
                from: PostStatus::InReview,
                to: PostStatus::Published
            }
        ));
    }

    #[tokio::test]
    async fn test_apply_missing_post() {
        let store = MemoryStore::new();
        let err = StatusMachine::apply(&store, PostId(99), PostStatus::InReview)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::PostNotFound(PostId(99))));
    }
}
