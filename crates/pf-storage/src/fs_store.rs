//! File system storage for posts and comments

use crate::store_file::{StoreFile, StoreMigrator, CURRENT_SCHEMA_VERSION};
use async_trait::async_trait;
use pf_core::comment::{Comment, CommentPatch, NewComment};
use pf_core::error::{Result, WorkflowError};
use pf_core::post::{NewPost, Post, PostPatch};
use pf_core::store::{RecordSet, WorkflowStore};
use pf_core::types::{CommentId, PostId};
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Name of the store file inside the data directory
pub const STORE_FILE_NAME: &str = "store.json";

fn unavailable(context: &str, e: impl std::fmt::Display) -> WorkflowError {
    WorkflowError::StorageUnavailable(format!("{}: {}", context, e))
}

/// File system based workflow storage
///
/// All records live in a single JSON file. Each write loads the file,
/// applies the change and replaces the file atomically while holding a
/// lock, so writes from one process never interleave.
pub struct FileSystemStore {
    /// Base directory for data
    base_dir: PathBuf,
    /// Path of the store file
    store_path: PathBuf,
    /// Serializes load-modify-save cycles
    lock: Mutex<()>,
}

impl FileSystemStore {
    /// Create a new file system store
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        let store_path = base_dir.join(STORE_FILE_NAME);

        let store = Self {
            base_dir,
            store_path,
            lock: Mutex::new(()),
        };

        store.ensure_dirs()?;
        Ok(store)
    }

    /// Create storage in the default data directory
    pub fn default_location() -> Result<Self> {
        Self::new(Self::default_base_dir())
    }

    /// Default data directory (platform data dir, or ~/.postflow)
    pub fn default_base_dir() -> PathBuf {
        directories::ProjectDirs::from("com", "postflow", "postflow")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".postflow")
            })
    }

    /// Ensure required directories exist
    fn ensure_dirs(&self) -> Result<()> {
        if !self.base_dir.exists() {
            fs::create_dir_all(&self.base_dir)
                .map_err(|e| unavailable("Failed to create data directory", e))?;
            debug!("Created data directory: {:?}", self.base_dir);
        }
        Ok(())
    }

    /// Get a temporary path for atomic writes
    fn temp_path(&self) -> PathBuf {
        self.base_dir.join(format!(".{}.tmp", STORE_FILE_NAME))
    }

    /// Get base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the store file path
    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Check whether the store file has been written yet
    pub fn exists(&self) -> bool {
        self.store_path.exists()
    }

    /// Write an empty store file
    ///
    /// Existing data is only replaced when `force` is set.
    pub async fn initialize(&self, force: bool) -> Result<bool> {
        let _guard = self.lock.lock().await;
        if self.exists() && !force {
            debug!("Store already initialized at {:?}", self.store_path);
            return Ok(false);
        }
        self.write_records(&RecordSet::new())?;
        info!("Initialized store at {:?}", self.store_path);
        Ok(true)
    }

    /// Read records from disk; a missing file is an empty store
    fn read_records(&self) -> Result<RecordSet> {
        let file = match fs::File::open(&self.store_path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(RecordSet::new());
            }
            Err(e) => return Err(unavailable("Failed to open store file", e)),
        };

        let reader = BufReader::new(file);
        let store_file: StoreFile = serde_json::from_reader(reader)
            .map_err(|e| unavailable("Corrupt store file", e))?;

        let migrated = if StoreMigrator::needs_migration(&store_file) {
            info!(
                "Migrating store from version {} to {}",
                store_file.schema_version, CURRENT_SCHEMA_VERSION
            );
            StoreMigrator::migrate(store_file)?
        } else {
            store_file
        };

        let mut records = migrated.into_records();
        records.repair_counters();
        Ok(records)
    }

    /// Write records atomically (write to temp, then rename)
    fn write_records(&self, records: &RecordSet) -> Result<()> {
        let temp_path = self.temp_path();
        let file = StoreFile::new(records.clone());

        let temp_file = fs::File::create(&temp_path)
            .map_err(|e| unavailable("Failed to create temp file", e))?;
        let mut writer = BufWriter::new(temp_file);
        serde_json::to_writer_pretty(&mut writer, &file)
            .map_err(|e| unavailable("Failed to serialize store", e))?;
        writer
            .flush()
            .map_err(|e| unavailable("Failed to write temp file", e))?;

        fs::rename(&temp_path, &self.store_path).map_err(|e| {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                warn!("Failed to remove temp file {:?}: {}", temp_path, cleanup);
            }
            unavailable("Failed to replace store file", e)
        })?;

        debug!("Saved store to {:?}", self.store_path);
        Ok(())
    }

    /// Run a read-only closure against the current records
    async fn read<T>(&self, f: impl FnOnce(&RecordSet) -> Result<T>) -> Result<T> {
        let _guard = self.lock.lock().await;
        let records = self.read_records()?;
        f(&records)
    }

    /// Run a mutation and persist it if it succeeds
    async fn modify<T>(&self, f: impl FnOnce(&mut RecordSet) -> Result<T>) -> Result<T> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_records()?;
        let value = f(&mut records)?;
        self.write_records(&records)?;
        Ok(value)
    }

    /// Copy of every stored record
    pub async fn snapshot(&self) -> Result<RecordSet> {
        self.read(|records| Ok(records.clone())).await
    }
}

#[async_trait]
impl WorkflowStore for FileSystemStore {
    async fn get_post(&self, id: PostId) -> Result<Post> {
        self.read(|records| records.get_post(id)).await
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        self.read(|records| Ok(records.list_posts())).await
    }

    async fn create_post(&self, post: NewPost) -> Result<Post> {
        self.modify(|records| Ok(records.create_post(post))).await
    }

    async fn update_post(&self, id: PostId, patch: PostPatch) -> Result<Post> {
        self.modify(|records| records.update_post(id, patch)).await
    }

    async fn delete_post(&self, id: PostId) -> Result<()> {
        self.modify(|records| records.delete_post(id)).await
    }

    async fn get_comment(&self, id: CommentId) -> Result<Comment> {
        self.read(|records| records.get_comment(id)).await
    }

    async fn list_comments_by_post(&self, post_id: PostId) -> Result<Vec<Comment>> {
        self.read(|records| Ok(records.list_comments_by_post(post_id)))
            .await
    }

    async fn create_comment(&self, comment: NewComment) -> Result<Comment> {
        self.modify(|records| Ok(records.create_comment(comment)))
            .await
    }

    async fn update_comment(&self, id: CommentId, patch: CommentPatch) -> Result<Comment> {
        self.modify(|records| records.update_comment(id, patch))
            .await
    }

    async fn delete_comment(&self, id: CommentId) -> Result<()> {
        self.modify(|records| records.delete_comment(id)).await
    }
}
