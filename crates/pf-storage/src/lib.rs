//! pf-storage - Storage library for postflow
//!
//! This crate provides the file system backed [`pf_core::store::WorkflowStore`].

mod fs_store;
mod store_file;

pub use fs_store::{FileSystemStore, STORE_FILE_NAME};
pub use store_file::{StoreFile, StoreMigrator, CURRENT_SCHEMA_VERSION};
