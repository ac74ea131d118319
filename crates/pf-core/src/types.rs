//! Core type definitions for postflow

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Get the raw integer value
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                $name(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = crate::WorkflowError;

            fn from_str(s: &str) -> crate::Result<Self> {
                s.trim().parse::<u64>().map($name).map_err(|_| {
                    crate::WorkflowError::Validation(format!(
                        "Invalid {} ID: {}",
                        $label, s
                    ))
                })
            }
        }
    };
}

record_id!(
    /// Unique identifier for a post, assigned by storage
    PostId,
    "post"
);

record_id!(
    /// Unique identifier for a comment, assigned by storage
    CommentId,
    "comment"
);

record_id!(
    /// Identifier of a user (authors and commenters)
    UserId,
    "user"
);

record_id!(
    /// Identifier of the workspace a post belongs to
    WorkspaceId,
    "workspace"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(PostId(42).to_string(), "42");
        assert_eq!(CommentId(7).to_string(), "7");
    }

    #[test]
    fn test_id_parse() {
        assert_eq!("12".parse::<PostId>().unwrap(), PostId(12));
        assert_eq!(" 3 ".parse::<CommentId>().unwrap(), CommentId(3));
        assert!("abc".parse::<UserId>().is_err());
        assert!("-1".parse::<WorkspaceId>().is_err());
    }

    #[test]
    fn test_id_ordering() {
        assert!(CommentId(1) < CommentId(2));
        assert_eq!(PostId::from(5).get(), 5);
    }

    #[test]
    fn test_id_serialization() {
        let json = serde_json::to_string(&PostId(9)).unwrap();
        assert_eq!(json, "9");
        let id: CommentId = serde_json::from_str("11").unwrap();
        assert_eq!(id, CommentId(11));
    }
}
