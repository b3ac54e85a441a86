//! Spatial primitives: vectors, sizes, partial updates and bounding boxes.
//!
//! All lengths are centimeters unless a field name says otherwise.

use serde::{Deserialize, Serialize};

/// A point or offset in 3D space (centimeters).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X axis (left/right)
    pub x: f64,
    /// Y axis (up)
    pub y: f64,
    /// Z axis (towards the viewer)
    pub z: f64,
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Creates a new vector.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Component-wise addition.
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    /// Returns the component for the given axis.
    #[must_use]
    pub fn get(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Returns a copy with one component replaced.
    #[must_use]
    pub fn with(mut self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
        self
    }

    /// True when every component is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// One of the three spatial axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal screen axis
    X,
    /// Vertical axis
    Y,
    /// Depth axis
    Z,
}

/// Envelope of a module: width (X), height (Y), depth (Z).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size3 {
    /// Extent along X
    pub width: f64,
    /// Extent along Y
    pub height: f64,
    /// Extent along Z
    pub depth: f64,
}

impl Size3 {
    /// Creates a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Returns the value for a dimension.
    #[must_use]
    pub fn get(self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Width => self.width,
            Dimension::Height => self.height,
            Dimension::Depth => self.depth,
        }
    }

    /// Sets the value for a dimension.
    pub fn set(&mut self, dimension: Dimension, value: f64) {
        match dimension {
            Dimension::Width => self.width = value,
            Dimension::Height => self.height = value,
            Dimension::Depth => self.depth = value,
        }
    }

    /// Applies every dimension present in the patch.
    pub fn merge(&mut self, patch: &SizePatch) {
        for dimension in Dimension::ALL {
            if let Some(value) = patch.get(dimension) {
                self.set(dimension, value);
            }
        }
    }

    /// True when every dimension is finite and strictly positive.
    #[must_use]
    pub fn is_valid(self) -> bool {
        Dimension::ALL.iter().all(|d| {
            let v = self.get(*d);
            v.is_finite() && v > 0.0
        })
    }
}

/// A named size dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// X extent
    Width,
    /// Y extent
    Height,
    /// Z extent
    Depth,
}

impl Dimension {
    /// All dimensions in declaration order.
    pub const ALL: [Self; 3] = [Self::Width, Self::Height, Self::Depth];
}

/// A partial size: only the present fields are meaningful.
///
/// Used both for partial module resizes and as a board's individual size
/// override, where absent fields fall back to the module's size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SizePatch {
    /// Width override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Height override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Depth override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
}

impl SizePatch {
    /// Patch that sets a single dimension.
    #[must_use]
    pub fn only(dimension: Dimension, value: f64) -> Self {
        let mut patch = Self::default();
        patch.set(dimension, value);
        patch
    }

    /// Patch that sets every dimension from a full size.
    #[must_use]
    pub fn from_size(size: Size3) -> Self {
        Self {
            width: Some(size.width),
            height: Some(size.height),
            depth: Some(size.depth),
        }
    }

    /// Returns the value for a dimension, if present.
    #[must_use]
    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::Width => self.width,
            Dimension::Height => self.height,
            Dimension::Depth => self.depth,
        }
    }

    /// Sets one dimension.
    pub fn set(&mut self, dimension: Dimension, value: f64) {
        match dimension {
            Dimension::Width => self.width = Some(value),
            Dimension::Height => self.height = Some(value),
            Dimension::Depth => self.depth = Some(value),
        }
    }

    /// Resolves the patch against a fallback size.
    #[must_use]
    pub fn resolve(&self, fallback: Size3) -> Size3 {
        Size3 {
            width: self.width.unwrap_or(fallback.width),
            height: self.height.unwrap_or(fallback.height),
            depth: self.depth.unwrap_or(fallback.depth),
        }
    }
}

/// A partial position: `None` means "leave this axis unchanged".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionPatch {
    /// X value
    #[serde(default)]
    pub x: Option<f64>,
    /// Y value
    #[serde(default)]
    pub y: Option<f64>,
    /// Z value
    #[serde(default)]
    pub z: Option<f64>,
}

impl PositionPatch {
    /// Patch that sets a single axis.
    #[must_use]
    pub fn only(axis: Axis, value: f64) -> Self {
        let mut patch = Self::default();
        match axis {
            Axis::X => patch.x = Some(value),
            Axis::Y => patch.y = Some(value),
            Axis::Z => patch.z = Some(value),
        }
        patch
    }

    /// Applies the patch to a position.
    #[must_use]
    pub fn apply(&self, mut position: Vec3) -> Vec3 {
        if let Some(x) = self.x {
            position.x = x;
        }
        if let Some(y) = self.y {
            position.y = y;
        }
        if let Some(z) = self.z {
            position.z = z;
        }
        position
    }
}

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Bounds {
    /// Box centered at `center` with the given half extents.
    #[must_use]
    pub fn from_center(center: Vec3, half: Vec3) -> Self {
        Self {
            min: Vec3::new(center.x - half.x, center.y - half.y, center.z - half.z),
            max: Vec3::new(center.x + half.x, center.y + half.y, center.z + half.z),
        }
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: Vec3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Vec3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    /// True when the (x, y) point lies within the box's front projection.
    #[must_use]
    pub fn contains_xy(&self, x: f64, y: f64) -> bool {
        x >= self.min.x && x <= self.max.x && y >= self.min.y && y <= self.max.y
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_patch_resolve_falls_back_per_field() {
        let patch = SizePatch::only(Dimension::Width, 50.0);
        let resolved = patch.resolve(Size3::new(80.0, 180.0, 35.0));
        assert_eq!(resolved, Size3::new(50.0, 180.0, 35.0));
    }

    #[test]
    fn test_size_merge_only_touches_present_fields() {
        let mut size = Size3::new(80.0, 180.0, 35.0);
        size.merge(&SizePatch {
            width: None,
            height: Some(120.0),
            depth: None,
        });
        assert_eq!(size, Size3::new(80.0, 120.0, 35.0));
    }

    #[test]
    fn test_position_patch_zero_is_a_value() {
        let patch = PositionPatch {
            x: Some(0.0),
            y: None,
            z: None,
        };
        assert_eq!(patch.apply(Vec3::new(5.0, 6.0, 7.0)), Vec3::new(0.0, 6.0, 7.0));
    }

    #[test]
    fn test_bounds_union() {
        let a = Bounds::from_center(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));
        let b = Bounds::from_center(Vec3::new(4.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let u = a.union(b);
        assert_eq!(u.min, Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(u.max, Vec3::new(5.0, 1.0, 1.0));
        assert!(u.contains_xy(2.0, 0.5));
    }
}
