//! Design documents and where they are kept.
//!
//! - [`document`]: the versioned JSON document and its lenient reader
//! - [`local`]: timestamped file export and import
//! - [`store`]: the file-backed design store used by the HTTP API
//! - `background`: saves and loads on tokio's blocking pool (feature `web`)

#[cfg(feature = "web")]
pub mod background;
pub mod document;
pub mod local;
pub mod store;

pub use document::{
    from_persistable, parse_str, to_persistable, DesignDocument, DesignMetadata, DesignSettings,
    ParsedDesign, TemplateSection,
};
pub use local::LocalFiles;
pub use store::{DesignRecord, DesignStore, DesignSummary, StoreError, StoreResult};

/// Saving and loading whole designs.
///
/// Implementations must be shareable across threads so saves can run in the
/// background while the user keeps editing.
pub trait PersistenceAdapter: Send + Sync {
    /// Saves a document, updating `id` when given or creating a new design.
    fn save(&self, id: Option<&str>, document: &DesignDocument) -> StoreResult<DesignSummary>;

    /// Loads and parses a stored design.
    fn load(&self, id: &str) -> StoreResult<ParsedDesign>;

    /// Lists stored designs, most recently updated first.
    fn list(&self) -> StoreResult<Vec<DesignSummary>>;

    /// Deletes a stored design.
    fn delete(&self, id: &str) -> StoreResult<()>;
}
