//! # AnyGrid
//!
//! Closed set of grid topologies behind one interface.

use super::{CellNeighborQuery, HexagonalGrid, IsometricGrid, OrthogonalGrid, StaggeredGrid};
use crate::{RectF, RectI, Vec2F, Vec2I};
use serde::{Deserialize, Serialize};

/// One of the grid topologies, or no grid at all.
///
/// Every query on [`AnyGrid::None`] returns a zero or empty value.
///
/// # Examples
///
/// ```
/// use gridstead::{AnyGrid, CellNeighborQuery, Vec2I};
///
/// let grid = AnyGrid::default();
/// assert!(grid.compute_bounds().is_empty());
/// assert!(grid.compute_neighbors(Vec2I::new(1, 1), CellNeighborQuery::all()).is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum AnyGrid {
    #[default]
    None,
    Orthogonal(OrthogonalGrid),
    Isometric(IsometricGrid),
    Staggered(StaggeredGrid),
    Hexagonal(HexagonalGrid),
}

impl AnyGrid {
    /// Number of cells along each axis.
    pub fn layer_size(&self) -> Vec2I {
        match self {
            AnyGrid::None => Vec2I::zero(),
            AnyGrid::Orthogonal(grid) => grid.layer_size,
            AnyGrid::Isometric(grid) => grid.layer_size,
            AnyGrid::Staggered(grid) => grid.layer_size,
            AnyGrid::Hexagonal(grid) => grid.layer_size,
        }
    }

    /// Short topology name, for logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            AnyGrid::None => "none",
            AnyGrid::Orthogonal(_) => "orthogonal",
            AnyGrid::Isometric(_) => "isometric",
            AnyGrid::Staggered(_) => "staggered",
            AnyGrid::Hexagonal(_) => "hexagonal",
        }
    }

    /// Cell-index bounds of the whole layer.
    pub fn compute_bounds(&self) -> RectI {
        match self {
            AnyGrid::None => RectI::default(),
            AnyGrid::Orthogonal(grid) => grid.compute_bounds(),
            AnyGrid::Isometric(grid) => grid.compute_bounds(),
            AnyGrid::Staggered(grid) => grid.compute_bounds(),
            AnyGrid::Hexagonal(grid) => grid.compute_bounds(),
        }
    }

    /// World-space extent of the whole layer.
    pub fn compute_world_bounds(&self) -> RectF {
        match self {
            AnyGrid::None => RectF::default(),
            AnyGrid::Orthogonal(grid) => grid.compute_world_bounds(),
            AnyGrid::Isometric(grid) => grid.compute_world_bounds(),
            AnyGrid::Staggered(grid) => grid.compute_world_bounds(),
            AnyGrid::Hexagonal(grid) => grid.compute_world_bounds(),
        }
    }

    /// Range of cells a world-space rectangle can touch, clipped to the layer.
    pub fn compute_visible_area(&self, local: RectF) -> RectI {
        match self {
            AnyGrid::None => RectI::default(),
            AnyGrid::Orthogonal(grid) => grid.compute_visible_area(local),
            AnyGrid::Isometric(grid) => grid.compute_visible_area(local),
            AnyGrid::Staggered(grid) => grid.compute_visible_area(local),
            AnyGrid::Hexagonal(grid) => grid.compute_visible_area(local),
        }
    }

    /// World-space bounding box of one cell.
    pub fn compute_cell_bounds(&self, position: Vec2I) -> RectF {
        match self {
            AnyGrid::None => RectF::default(),
            AnyGrid::Orthogonal(grid) => grid.compute_cell_bounds(position),
            AnyGrid::Isometric(grid) => grid.compute_cell_bounds(position),
            AnyGrid::Staggered(grid) => grid.compute_cell_bounds(position),
            AnyGrid::Hexagonal(grid) => grid.compute_cell_bounds(position),
        }
    }

    /// Cell containing a world-space location.
    pub fn compute_position(&self, location: Vec2F) -> Vec2I {
        match self {
            AnyGrid::None => Vec2I::zero(),
            AnyGrid::Orthogonal(grid) => grid.compute_position(location),
            AnyGrid::Isometric(grid) => grid.compute_position(location),
            AnyGrid::Staggered(grid) => grid.compute_position(location),
            AnyGrid::Hexagonal(grid) => grid.compute_position(location),
        }
    }

    /// Outline of one cell, as a closed polygon without the repeated first point.
    pub fn compute_contour(&self, position: Vec2I) -> Vec<Vec2F> {
        match self {
            AnyGrid::None => Vec::new(),
            AnyGrid::Orthogonal(grid) => grid.compute_contour(position),
            AnyGrid::Isometric(grid) => grid.compute_contour(position),
            AnyGrid::Staggered(grid) => grid.compute_contour(position),
            AnyGrid::Hexagonal(grid) => grid.compute_contour(position),
        }
    }

    pub fn compute_neighbors(&self, position: Vec2I, query: CellNeighborQuery) -> Vec<Vec2I> {
        match self {
            AnyGrid::None => Vec::new(),
            AnyGrid::Orthogonal(grid) => grid.compute_neighbors(position, query),
            AnyGrid::Isometric(grid) => grid.compute_neighbors(position, query),
            AnyGrid::Staggered(grid) => grid.compute_neighbors(position, query),
            AnyGrid::Hexagonal(grid) => grid.compute_neighbors(position, query),
        }
    }

    pub fn are_diagonal_neighbors(&self, p0: Vec2I, p1: Vec2I) -> bool {
        match self {
            AnyGrid::None => false,
            AnyGrid::Orthogonal(grid) => grid.are_diagonal_neighbors(p0, p1),
            AnyGrid::Isometric(grid) => grid.are_diagonal_neighbors(p0, p1),
            AnyGrid::Staggered(grid) => grid.are_diagonal_neighbors(p0, p1),
            AnyGrid::Hexagonal(grid) => grid.are_diagonal_neighbors(p0, p1),
        }
    }
}

impl From<OrthogonalGrid> for AnyGrid {
    fn from(grid: OrthogonalGrid) -> Self {
        AnyGrid::Orthogonal(grid)
    }
}

impl From<IsometricGrid> for AnyGrid {
    fn from(grid: IsometricGrid) -> Self {
        AnyGrid::Isometric(grid)
    }
}

impl From<StaggeredGrid> for AnyGrid {
    fn from(grid: StaggeredGrid) -> Self {
        AnyGrid::Staggered(grid)
    }
}

impl From<HexagonalGrid> for AnyGrid {
    fn from(grid: HexagonalGrid) -> Self {
        AnyGrid::Hexagonal(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellAxis, CellIndex};

    #[test]
    fn test_none_is_inert() {
        let grid = AnyGrid::None;
        let position = Vec2I::new(3, 4);

        assert_eq!(grid.layer_size(), Vec2I::zero());
        assert_eq!(grid.compute_bounds(), RectI::default());
        assert_eq!(grid.compute_world_bounds(), RectF::default());
        assert_eq!(
            grid.compute_visible_area(RectF::from_size(Vec2F::new(100.0, 100.0))),
            RectI::default()
        );
        assert_eq!(grid.compute_cell_bounds(position), RectF::default());
        assert_eq!(grid.compute_position(Vec2F::new(12.0, 5.0)), Vec2I::zero());
        assert!(grid.compute_contour(position).is_empty());
        assert!(grid.compute_neighbors(position, CellNeighborQuery::all()).is_empty());
        assert!(!grid.are_diagonal_neighbors(position, Vec2I::new(4, 5)));
    }

    #[test]
    fn test_dispatch() {
        let tile = Vec2F::new(32.0, 32.0);
        let layer = Vec2I::new(4, 4);
        let grids: Vec<AnyGrid> = vec![
            OrthogonalGrid::new(tile, layer).into(),
            IsometricGrid::new(tile, layer).into(),
            StaggeredGrid::new(tile, layer, CellAxis::Y, CellIndex::Odd).into(),
            HexagonalGrid::with_radius(16.0, layer, CellAxis::X, CellIndex::Even).into(),
        ];

        let contours: Vec<usize> = grids.iter().map(|g| g.compute_contour(Vec2I::new(1, 1)).len()).collect();
        assert_eq!(contours, vec![4, 4, 4, 6]);

        for grid in &grids {
            assert_eq!(grid.layer_size(), layer);
            assert_eq!(grid.compute_bounds(), RectI::from_size(layer));
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let grid: AnyGrid = StaggeredGrid::new(Vec2F::new(64.0, 32.0), Vec2I::new(5, 9), CellAxis::X, CellIndex::Even).into();
        let json = serde_json::to_string(&grid).unwrap();
        let back: AnyGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }
}
