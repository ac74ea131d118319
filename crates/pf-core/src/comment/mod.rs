//! Comment system module
//!
//! Handles comment models, threading and the comment lifecycle.

pub mod lifecycle;
pub mod model;
pub mod tree;

pub use lifecycle::CommentLifecycle;
pub use model::*;
pub use tree::{CommentNode, CommentTree, Forest, MAX_REPLY_DEPTH};
