//! The five fixed structural panels of a module.

use serde::{Deserialize, Serialize};

use super::space::{Dimension, Size3, SizePatch};
use super::ModuleId;

/// Identifier of a module board (own namespace).
pub type BoardId = u32;

/// Which slot of a module a board occupies. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardType {
    /// Top panel
    Top,
    /// Bottom panel
    Bottom,
    /// Left side panel
    Left,
    /// Right side panel
    Right,
    /// Back panel
    Back,
}

impl BoardType {
    /// All board types in slot order.
    pub const ALL: [Self; 5] = [Self::Top, Self::Bottom, Self::Left, Self::Right, Self::Back];

    /// Lowercase identifier as used in documents and the CLI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::Back => "back",
        }
    }

    /// Japanese part name used in the bill of materials.
    #[must_use]
    pub const fn part_name(self) -> &'static str {
        match self {
            Self::Top => "天板",
            Self::Bottom => "底板",
            Self::Left => "左側板",
            Self::Right => "右側板",
            Self::Back => "背板",
        }
    }

    /// Panel length and width in terms of the board's effective size.
    ///
    /// Top/bottom span width x depth, sides span height x depth and the
    /// back spans width x height.
    #[must_use]
    pub fn panel_extent(self, effective: Size3) -> (f64, f64) {
        match self {
            Self::Top | Self::Bottom => (effective.width, effective.depth),
            Self::Left | Self::Right => (effective.height, effective.depth),
            Self::Back => (effective.width, effective.height),
        }
    }
}

impl std::fmt::Display for BoardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BoardType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown board type: {s}"))
    }
}

/// One structural panel of a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Unique board id
    pub id: BoardId,
    /// Owning module (lookup only)
    pub box_id: ModuleId,
    /// Slot this board occupies
    #[serde(rename = "type")]
    pub board_type: BoardType,
    /// Disabled boards are soft-deleted and keep all their fields
    pub enabled: bool,
    /// Thickness in millimeters
    pub thickness: f64,
    /// Optional per-dimension override of the module size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub individual_size: Option<SizePatch>,
}

impl Board {
    /// Creates an enabled board without size override.
    #[must_use]
    pub fn new(id: BoardId, box_id: ModuleId, board_type: BoardType, thickness: f64) -> Self {
        Self {
            id,
            box_id,
            board_type,
            enabled: true,
            thickness,
            individual_size: None,
        }
    }

    /// The size this board is built with: override fields first, then the module size.
    #[must_use]
    pub fn effective_size(&self, module_size: Size3) -> Size3 {
        self.individual_size
            .map_or(module_size, |patch| patch.resolve(module_size))
    }

    /// Overrides a single dimension, materializing the override from the module size first.
    pub fn set_individual_dimension(
        &mut self,
        module_size: Size3,
        dimension: Dimension,
        value: f64,
    ) {
        let patch = self
            .individual_size
            .get_or_insert_with(|| SizePatch::from_size(module_size));
        patch.set(dimension, value);
    }
}

/// The five board slots of a module.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoardSet {
    /// Top slot
    #[serde(default)]
    pub top: Option<Board>,
    /// Bottom slot
    #[serde(default)]
    pub bottom: Option<Board>,
    /// Left slot
    #[serde(default)]
    pub left: Option<Board>,
    /// Right slot
    #[serde(default)]
    pub right: Option<Board>,
    /// Back slot
    #[serde(default)]
    pub back: Option<Board>,
}

impl BoardSet {
    /// Returns the board in a slot.
    #[must_use]
    pub fn get(&self, board_type: BoardType) -> Option<&Board> {
        self.slot(board_type).as_ref()
    }

    /// Returns the board in a slot mutably.
    pub fn get_mut(&mut self, board_type: BoardType) -> Option<&mut Board> {
        self.slot_mut(board_type).as_mut()
    }

    /// Places a board into the slot matching its type.
    pub fn insert(&mut self, board: Board) {
        let board_type = board.board_type;
        *self.slot_mut(board_type) = Some(board);
    }

    /// Empties a slot, returning its board.
    pub fn remove(&mut self, board_type: BoardType) -> Option<Board> {
        self.slot_mut(board_type).take()
    }

    /// Iterates over occupied slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Board> {
        BoardType::ALL.into_iter().filter_map(|t| self.get(t))
    }

    /// Iterates mutably over occupied slots.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Board> {
        [
            &mut self.top,
            &mut self.bottom,
            &mut self.left,
            &mut self.right,
            &mut self.back,
        ]
        .into_iter()
        .filter_map(Option::as_mut)
    }

    /// Enabled boards only.
    pub fn enabled(&self) -> impl Iterator<Item = &Board> {
        self.iter().filter(|b| b.enabled)
    }

    fn slot(&self, board_type: BoardType) -> &Option<Board> {
        match board_type {
            BoardType::Top => &self.top,
            BoardType::Bottom => &self.bottom,
            BoardType::Left => &self.left,
            BoardType::Right => &self.right,
            BoardType::Back => &self.back,
        }
    }

    fn slot_mut(&mut self, board_type: BoardType) -> &mut Option<Board> {
        match board_type {
            BoardType::Top => &mut self.top,
            BoardType::Bottom => &mut self.bottom,
            BoardType::Left => &mut self.left,
            BoardType::Right => &mut self.right,
            BoardType::Back => &mut self.back,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_type_from_str() {
        assert_eq!("Back".parse::<BoardType>(), Ok(BoardType::Back));
        assert!("shelf".parse::<BoardType>().is_err());
    }

    #[test]
    fn test_individual_dimension_materializes_from_module_size() {
        let module_size = Size3::new(80.0, 180.0, 35.0);
        let mut board = Board::new(1, 1, BoardType::Top, 18.0);
        board.set_individual_dimension(module_size, Dimension::Width, 60.0);

        let patch = board.individual_size.unwrap();
        assert_eq!(patch.width, Some(60.0));
        assert_eq!(patch.height, Some(180.0));
        assert_eq!(patch.depth, Some(35.0));

        // Later module edits no longer leak into materialized fields
        assert_eq!(
            board.effective_size(Size3::new(100.0, 200.0, 40.0)),
            Size3::new(60.0, 180.0, 35.0)
        );
    }

    #[test]
    fn test_board_set_iterates_in_slot_order() {
        let mut set = BoardSet::default();
        set.insert(Board::new(2, 1, BoardType::Back, 18.0));
        set.insert(Board::new(1, 1, BoardType::Top, 18.0));
        let types: Vec<_> = set.iter().map(|b| b.board_type).collect();
        assert_eq!(types, vec![BoardType::Top, BoardType::Back]);
    }

    #[test]
    fn test_board_set_insert_replaces_slot() {
        let mut set = BoardSet::default();
        set.insert(Board::new(1, 1, BoardType::Left, 18.0));
        set.insert(Board::new(7, 1, BoardType::Left, 12.0));

        assert_eq!(set.iter().count(), 1);
        assert_eq!(set.get(BoardType::Left).map(|b| b.id), Some(7));

        let removed = set.remove(BoardType::Left).unwrap();
        assert_eq!(removed.thickness, 12.0);
        assert!(set.get(BoardType::Left).is_none());
        assert!(set.remove(BoardType::Left).is_none());
    }
}
