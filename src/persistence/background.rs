//! Saves and loads that run off the interaction path.
//!
//! The document is captured before the task starts, so edits made while a save
//! is in flight are not part of it. Concurrent saves are not coordinated; the
//! last one to reach the store wins.

use std::io;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::document::{DesignDocument, ParsedDesign};
use super::store::{DesignSummary, StoreError, StoreResult};
use super::PersistenceAdapter;

fn join_failure(e: tokio::task::JoinError) -> StoreError {
    StoreError::Io(io::Error::other(e))
}

/// Saves `document` on the blocking pool and reports the outcome to `on_complete`.
///
/// Passing an `id` updates that design; `None` creates a new one. Must be
/// called from within a tokio runtime.
pub fn spawn_save<A, F>(
    adapter: Arc<A>,
    id: Option<String>,
    document: DesignDocument,
    on_complete: F,
) -> JoinHandle<()>
where
    A: PersistenceAdapter + ?Sized + 'static,
    F: FnOnce(StoreResult<DesignSummary>) + Send + 'static,
{
    debug!(title = %document.title(), ?id, "starting background save");
    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || adapter.save(id.as_deref(), &document))
            .await
            .unwrap_or_else(|e| Err(join_failure(e)));
        if let Err(e) = &result {
            warn!("background save failed: {e}");
        }
        on_complete(result);
    })
}

/// Loads a design on the blocking pool and reports the outcome to `on_complete`.
pub fn spawn_load<A, F>(adapter: Arc<A>, id: String, on_complete: F) -> JoinHandle<()>
where
    A: PersistenceAdapter + ?Sized + 'static,
    F: FnOnce(StoreResult<ParsedDesign>) + Send + 'static,
{
    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || adapter.load(&id))
            .await
            .unwrap_or_else(|e| Err(join_failure(e)));
        on_complete(result);
    })
}
