//! # Grid Module
//!
//! Grid topologies, the cell-flag map built on them, routing and field of
//! vision.
//!
//! Four topologies share one coordinate-and-geometry interface:
//! [`OrthogonalGrid`], [`IsometricGrid`], [`StaggeredGrid`] and
//! [`HexagonalGrid`]. [`AnyGrid`] closes over them (plus an unset state) so
//! that [`GridMap`] can hold any of them by value.
//!
//! Cell coordinates are [`Vec2I`]; world coordinates are [`Vec2F`] with the
//! layer's top-left corner at the origin.

pub mod any_grid;
pub mod array2d;
pub mod hexagonal;
pub mod isometric;
pub mod map;
pub mod orthogonal;
pub mod route;
pub mod staggered;
pub mod vision;

pub use any_grid::*;
pub use array2d::*;
pub use hexagonal::*;
pub use isometric::*;
pub use map::*;
pub use orthogonal::*;
pub use route::*;
pub use staggered::*;
pub use vision::*;

use crate::{RectI, Vec2I};
use serde::{Deserialize, Serialize};

/// Axis along which staggered and hexagonal layers shift every other line.
///
/// `Y` shifts rows horizontally; `X` shifts columns vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellAxis {
    X,
    Y,
}

/// Which lines of a staggered or hexagonal layer are shifted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellIndex {
    Odd,
    Even,
}

impl CellIndex {
    /// Whether line `index` is shifted by half a tile.
    pub fn is_shifted(self, index: i32) -> bool {
        let odd = index.rem_euclid(2) == 1;
        match self {
            CellIndex::Odd => odd,
            CellIndex::Even => !odd,
        }
    }

    pub(crate) fn shift(self, index: i32) -> i32 {
        i32::from(self.is_shifted(index))
    }
}

bitflags::bitflags! {
    /// Options for neighbor enumeration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CellNeighborQuery: u8 {
        /// Drop neighbors outside the layer
        const VALID = 1 << 0;
        /// Include vertex-sharing neighbors
        const DIAGONAL = 1 << 1;
    }
}

impl Default for CellNeighborQuery {
    fn default() -> Self {
        Self::VALID
    }
}

/// Cell-index bounds of a layer.
pub(crate) fn layer_rect(layer_size: Vec2I) -> RectI {
    RectI::from_size(layer_size)
}

/// Applies the `VALID` filter of a neighbor query.
pub(crate) fn filter_neighbors(neighbors: Vec<Vec2I>, layer_size: Vec2I, query: CellNeighborQuery) -> Vec<Vec2I> {
    if !query.contains(CellNeighborQuery::VALID) {
        return neighbors;
    }

    let layer = layer_rect(layer_size);
    neighbors.into_iter().filter(|&neighbor| layer.contains(neighbor)).collect()
}

/// Bounding cell range of a set of corner cells, grown by `margin` and clipped
/// to the layer. Empty when it misses the layer entirely.
pub(crate) fn visible_area_from_corners(corners: [Vec2I; 4], margin: i32, layer_size: Vec2I) -> RectI {
    let min = corners
        .iter()
        .fold(Vec2I::new(i32::MAX, i32::MAX), |acc, c| Vec2I::new(acc.x.min(c.x), acc.y.min(c.y)));
    let max = corners
        .iter()
        .fold(Vec2I::new(i32::MIN, i32::MIN), |acc, c| Vec2I::new(acc.x.max(c.x), acc.y.max(c.y)));

    // Corners far outside the layer are pulled in just past the margin
    let clamp = |value: i32, extent: i32| value.clamp(-margin - 1, extent.max(0) + margin);
    let min = Vec2I::new(clamp(min.x, layer_size.x), clamp(min.y, layer_size.y));
    let max = Vec2I::new(clamp(max.x, layer_size.x), clamp(max.y, layer_size.y));

    let area = RectI::from_min_max(
        Vec2I::new(min.x - margin, min.y - margin),
        Vec2I::new(max.x + margin + 1, max.y + margin + 1),
    );

    area.intersection(&layer_rect(layer_size)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_index_shift() {
        assert!(CellIndex::Odd.is_shifted(1));
        assert!(CellIndex::Odd.is_shifted(-1));
        assert!(!CellIndex::Odd.is_shifted(2));
        assert!(CellIndex::Even.is_shifted(0));
        assert!(CellIndex::Even.is_shifted(-2));
        assert_eq!(CellIndex::Even.shift(3), 0);
    }

    #[test]
    fn test_visible_area_clipped() {
        let corners = [
            Vec2I::new(-3, -3),
            Vec2I::new(2, -3),
            Vec2I::new(2, 1),
            Vec2I::new(-3, 1),
        ];
        let area = visible_area_from_corners(corners, 0, Vec2I::new(10, 10));
        assert_eq!(area, RectI::from_size(Vec2I::new(3, 2)));

        let outside = [Vec2I::new(20, 20); 4];
        assert!(visible_area_from_corners(outside, 1, Vec2I::new(10, 10)).is_empty());
    }

    #[test]
    fn test_visible_area_extreme_corners() {
        let corners = [
            Vec2I::new(i32::MIN, i32::MIN),
            Vec2I::new(i32::MAX, i32::MIN),
            Vec2I::new(i32::MAX, i32::MAX),
            Vec2I::new(i32::MIN, i32::MAX),
        ];
        let area = visible_area_from_corners(corners, 1, Vec2I::new(10, 10));
        assert_eq!(area, RectI::from_size(Vec2I::new(10, 10)));

        let beyond = [Vec2I::new(i32::MAX, i32::MAX); 4];
        assert!(visible_area_from_corners(beyond, 1, Vec2I::new(10, 10)).is_empty());
    }
}
