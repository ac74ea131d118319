//! Store file format and schema migration

use pf_core::error::{Result, WorkflowError};
use pf_core::store::RecordSet;
use serde::{Deserialize, Serialize};

/// Current schema version
pub const CURRENT_SCHEMA_VERSION: &str = "1.0";

/// On-disk store format with schema version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreFile {
    /// Schema version for migration
    pub schema_version: String,
    /// Posts, comments and ID counters
    pub records: RecordSet,
}

impl StoreFile {
    /// Wrap records with the current schema version
    pub fn new(records: RecordSet) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION.to_string(),
            records,
        }
    }

    /// Get the records, consuming the file
    pub fn into_records(self) -> RecordSet {
        self.records
    }

    /// Parse schema version as (major, minor)
    pub fn parse_version(&self) -> Option<(u32, u32)> {
        let (major, minor) = self.schema_version.split_once('.')?;
        Some((major.parse().ok()?, minor.parse().ok()?))
    }
}

/// Store schema migrator
pub struct StoreMigrator;

impl StoreMigrator {
    /// Migrate a store file to the current schema version
    pub fn migrate(mut file: StoreFile) -> Result<StoreFile> {
        let (major, _minor) = file
            .parse_version()
            .ok_or_else(|| WorkflowError::Validation("Invalid schema version format".to_string()))?;

        if major != 1 {
            return Err(WorkflowError::Validation(format!(
                "Incompatible schema version: {} (expected 1.x)",
                file.schema_version
            )));
        }

        // 1.x files only differ in counters, which are recomputed from records
        file.records.repair_counters();
        file.schema_version = CURRENT_SCHEMA_VERSION.to_string();
        Ok(file)
    }

    /// Check if a file needs migration
    pub fn needs_migration(file: &StoreFile) -> bool {
        file.schema_version != CURRENT_SCHEMA_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_file_creation() {
        let file = StoreFile::new(RecordSet::new());
        assert_eq!(file.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(file.parse_version(), Some((1, 0)));
        assert!(!StoreMigrator::needs_migration(&file));
    }

    #[test]
    fn test_migrate_minor_version() {
        let mut file = StoreFile::new(RecordSet::new());
        file.schema_version = "1.3".to_string();

        assert!(StoreMigrator::needs_migration(&file));
        let migrated = StoreMigrator::migrate(file).unwrap();
        assert_eq!(migrated.schema_version, CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn test_migrate_incompatible_version() {
        let mut file = StoreFile::new(RecordSet::new());
        file.schema_version = "2.0".to_string();
        assert!(StoreMigrator::migrate(file).is_err());
    }

    #[test]
    fn test_migrate_invalid_version() {
        let mut file = StoreFile::new(RecordSet::new());
        file.schema_version = "latest".to_string();
        assert!(file.parse_version().is_none());
        assert!(StoreMigrator::migrate(file).is_err());
    }
}
