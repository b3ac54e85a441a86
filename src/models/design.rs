//! A point-in-time copy of everything a design consists of.

use serde::{Deserialize, Serialize};

use super::{BoxModule, FreeBoard};

/// Modules plus free boards, detached from the live registry.
///
/// Evaluation, export and saves operate on a snapshot so that later edits
/// cannot race with them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSnapshot {
    /// Box modules in listing order
    pub modules: Vec<BoxModule>,
    /// Free-standing boards in listing order
    pub free_boards: Vec<FreeBoard>,
}

impl DesignSnapshot {
    /// True when there is nothing to build.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.free_boards.is_empty()
    }
}
