//! File-backed design store.
//!
//! Each design is one `<uuid>.json` file holding a [`DesignRecord`]. Writes go
//! through a temp file and a rename so a crash never leaves a half-written
//! record behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::document::{from_persistable, DesignDocument, ParsedDesign};
use super::PersistenceAdapter;

/// Message for an empty or missing title.
pub const TITLE_REQUIRED: &str = "Valid title is required";
/// Message for missing or non-object design data.
pub const DATA_REQUIRED: &str = "Valid data object is required";

/// Errors raised by the design store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No design with the requested id
    #[error("Design not found")]
    NotFound,

    /// Rejected input
    #[error("{0}")]
    Validation(String),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Record could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A stored design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRecord {
    /// UUID string
    pub id: String,
    /// Trimmed title
    pub title: String,
    /// Design document as submitted
    pub data: Value,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

impl DesignRecord {
    /// Listing view of the record.
    #[must_use]
    pub fn summary(&self) -> DesignSummary {
        DesignSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Parses the stored document.
    #[must_use]
    pub fn parsed(&self) -> ParsedDesign {
        from_persistable(&self.data)
    }
}

/// A design without its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignSummary {
    /// UUID string
    pub id: String,
    /// Trimmed title
    pub title: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// Checks a title and data pair, returning the trimmed title.
pub fn validate_input(title: Option<&str>, data: &Value) -> StoreResult<String> {
    let title = title.map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return Err(StoreError::Validation(TITLE_REQUIRED.to_string()));
    }
    if !data.is_object() {
        return Err(StoreError::Validation(DATA_REQUIRED.to_string()));
    }
    Ok(title.to_string())
}

/// Directory of design records.
#[derive(Debug, Clone)]
pub struct DesignStore {
    dir: PathBuf,
}

impl DesignStore {
    /// Opens a store, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "opened design store");
        Ok(Self { dir })
    }

    /// Store directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: &str) -> StoreResult<PathBuf> {
        // Only canonical UUIDs map to files; anything else cannot exist.
        let uuid = Uuid::parse_str(id).map_err(|_| StoreError::NotFound)?;
        Ok(self.dir.join(format!("{}.json", uuid.hyphenated())))
    }

    fn read_record(path: &Path) -> StoreResult<DesignRecord> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound,
            _ => StoreError::Io(e),
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_record(&self, record: &DesignRecord) -> StoreResult<()> {
        let path = self.record_path(&record.id)?;
        // One temp file per write, so concurrent saves of a design never share it.
        let temp_path = path.with_extension(format!("json.{}.tmp", Uuid::new_v4().simple()));
        fs::write(&temp_path, serde_json::to_vec_pretty(record)?)?;
        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
        Ok(())
    }

    /// All designs, most recently updated first. Unreadable records are skipped.
    pub fn list(&self) -> StoreResult<Vec<DesignSummary>> {
        let mut summaries = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            match Self::read_record(&path) {
                Ok(record) => summaries.push(record.summary()),
                Err(e) => warn!(path = %path.display(), "skipping unreadable design record: {e}"),
            }
        }
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    /// Fetches one design.
    pub fn get(&self, id: &str) -> StoreResult<DesignRecord> {
        Self::read_record(&self.record_path(id)?)
    }

    /// Creates a design with a fresh id.
    pub fn create(&self, title: Option<&str>, data: Value) -> StoreResult<DesignRecord> {
        let title = validate_input(title, &data)?;
        let now = Utc::now();
        let record = DesignRecord {
            id: Uuid::new_v4().to_string(),
            title,
            data,
            created_at: now,
            updated_at: now,
        };
        self.write_record(&record)?;
        info!(id = %record.id, title = %record.title, "created design");
        Ok(record)
    }

    /// Replaces the title and data of an existing design.
    pub fn update(&self, id: &str, title: Option<&str>, data: Value) -> StoreResult<DesignRecord> {
        let title = validate_input(title, &data)?;
        let mut record = self.get(id)?;
        record.title = title;
        record.data = data;
        record.updated_at = Utc::now().max(record.created_at);
        self.write_record(&record)?;
        info!(id = %record.id, "updated design");
        Ok(record)
    }

    /// Deletes a design.
    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let path = self.record_path(id)?;
        fs::remove_file(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound,
            _ => StoreError::Io(e),
        })?;
        info!(id, "deleted design");
        Ok(())
    }
}

impl PersistenceAdapter for DesignStore {
    fn save(&self, id: Option<&str>, document: &DesignDocument) -> StoreResult<DesignSummary> {
        let data = document.to_value()?;
        let title = Some(document.title());
        let record = match id {
            Some(id) => self.update(id, title, data)?,
            None => self.create(title, data)?,
        };
        Ok(record.summary())
    }

    fn load(&self, id: &str) -> StoreResult<ParsedDesign> {
        Ok(self.get(id)?.parsed())
    }

    fn list(&self) -> StoreResult<Vec<DesignSummary>> {
        Self::list(self)
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        Self::delete(self, id)
    }
}
