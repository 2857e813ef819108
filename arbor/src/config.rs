//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::TreeError;

/// Per-tree configuration.
///
/// Hosts can build it in code or decode it from JSON; missing fields take
/// their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// When true, parent and child check states are independent.
    pub check_strictly: bool,

    /// Geometry of the before/inside/after drop zones.
    pub drop_zone: DropZone,
}

impl TreeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Turn off check propagation between parents and children.
    pub fn check_strictly(mut self, strict: bool) -> Self {
        self.check_strictly = strict;
        self
    }

    /// Set the drop zone geometry.
    pub fn drop_zone(mut self, zone: DropZone) -> Self {
        self.drop_zone = zone;
        self
    }
}

/// Size of the "insert before" and "insert after" bands at the top and
/// bottom edge of a hovered row. The rest of the row nests the dragged node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropZone {
    /// Fraction of the row height used by each edge band.
    pub side_range: f32,

    /// Minimum edge band size, in the same unit as the row geometry.
    pub min_gap: f32,
}

impl DropZone {
    pub const DEFAULT_SIDE_RANGE: f32 = 0.25;
    pub const DEFAULT_MIN_GAP: f32 = 2.0;

    pub const fn new(side_range: f32, min_gap: f32) -> Self {
        Self {
            side_range,
            min_gap,
        }
    }

    /// Edge band size for a row of the given height.
    pub fn gap(&self, height: f32) -> f32 {
        (height * self.side_range).max(self.min_gap)
    }
}

impl Default for DropZone {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIDE_RANGE, Self::DEFAULT_MIN_GAP)
    }
}
