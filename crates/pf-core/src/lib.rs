//! pf-core - Core library for postflow
//!
//! This crate provides the editorial workflow of postflow: the post status
//! machine, threaded comment discussions, storage abstraction, and the
//! coordinator that ties them together.

pub mod error;
pub mod types;
pub mod config;
pub mod validator;
pub mod post;
pub mod comment;
pub mod store;
pub mod workflow;

pub use error::{ErrorKind, Result, WorkflowError};
pub use types::*;
pub use workflow::EditorialWorkflow;
