//! Local file import and export.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use super::document::{parse_str, DesignDocument, ParsedDesign};

/// Formats a timestamp for use in export file names.
#[must_use]
pub fn file_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H-%M-%S").to_string()
}

/// Writes design documents and BOMs into a directory with timestamped names.
#[derive(Debug, Clone)]
pub struct LocalFiles {
    dir: PathBuf,
}

impl LocalFiles {
    /// Creates an adapter writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `shelf-design-<timestamp>.json`.
    pub fn export_json(&self, document: &DesignDocument) -> Result<PathBuf> {
        let content =
            serde_json::to_string_pretty(document).context("Failed to serialize design")?;
        self.write_named("shelf-design", "json", &content)
    }

    /// Writes `shelf-bom-<timestamp>.csv`.
    pub fn export_bom(&self, csv: &str) -> Result<PathBuf> {
        self.write_named("shelf-bom", "csv", csv)
    }

    fn write_named(&self, prefix: &str, extension: &str, content: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;
        let path = self
            .dir
            .join(format!("{prefix}-{}.{extension}", file_timestamp(Utc::now())));
        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "exported file");
        Ok(path)
    }

    /// Reads a design document from a file.
    pub fn import_json(path: &Path) -> Result<ParsedDesign> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read design file: {}", path.display()))?;
        parse_str(&content)
            .with_context(|| format!("Design file is not valid JSON: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DesignSnapshot;
    use crate::persistence::document::to_persistable;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_file_timestamp_format() {
        let now = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(file_timestamp(now), "2025-03-04T05-06-07");
    }

    #[test]
    fn test_export_and_import_json() -> Result<()> {
        let temp = TempDir::new()?;
        let files = LocalFiles::new(temp.path().join("out"));
        let document = to_persistable(&DesignSnapshot::default(), "Empty shelf");

        let path = files.export_json(&document)?;
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        assert!(name.starts_with("shelf-design-"));
        assert!(name.ends_with(".json"));

        let parsed = LocalFiles::import_json(&path)?;
        assert_eq!(parsed.title(), Some("Empty shelf"));
        assert!(parsed.is_empty());
        Ok(())
    }

    #[test]
    fn test_import_rejects_invalid_json() -> Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join("broken.json");
        fs::write(&path, "{ nope")?;

        let err = LocalFiles::import_json(&path).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
        Ok(())
    }

    #[test]
    fn test_export_bom_name() -> Result<()> {
        let temp = TempDir::new()?;
        let path = LocalFiles::new(temp.path()).export_bom("a,b\n")?;
        assert!(path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("shelf-bom-") && n.ends_with(".csv")));
        assert_eq!(fs::read_to_string(path)?, "a,b\n");
        Ok(())
    }
}
