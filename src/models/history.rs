//! Deleted-component history entries used to restore removed leaf components.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::divider::{Shelf, Support};
use super::ModuleId;

/// Kind of a leaf component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletedKind {
    /// A module board
    Board,
    /// A vertical divider
    Support,
    /// A horizontal divider
    Shelf,
}

/// Full snapshot of a component taken just before it was disabled or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum DeletedComponent {
    /// A disabled board
    Board(Board),
    /// A removed support
    Support(Support),
    /// A removed shelf
    Shelf(Shelf),
}

impl DeletedComponent {
    /// Kind of the snapshot.
    #[must_use]
    pub const fn kind(&self) -> DeletedKind {
        match self {
            Self::Board(_) => DeletedKind::Board,
            Self::Support(_) => DeletedKind::Support,
            Self::Shelf(_) => DeletedKind::Shelf,
        }
    }

    /// Id of the snapshotted component.
    #[must_use]
    pub const fn id(&self) -> u32 {
        match self {
            Self::Board(b) => b.id,
            Self::Support(s) => s.id,
            Self::Shelf(s) => s.id,
        }
    }
}

/// One history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedComponentRecord {
    /// Module the component belonged to
    pub box_id: ModuleId,
    /// Snapshot of the component
    pub component: DeletedComponent,
    /// When it was deleted
    pub deleted_at: DateTime<Utc>,
}

impl DeletedComponentRecord {
    /// Records a deletion that happens now.
    #[must_use]
    pub fn now(box_id: ModuleId, component: DeletedComponent) -> Self {
        Self {
            box_id,
            component,
            deleted_at: Utc::now(),
        }
    }

    /// Kind of the deleted component.
    #[must_use]
    pub const fn kind(&self) -> DeletedKind {
        self.component.kind()
    }
}
