//! # Orthogonal Grid
//!
//! Rectangular cells laid out in rows and columns.

use super::{filter_neighbors, layer_rect, visible_area_from_corners, CellNeighborQuery};
use crate::{RectF, RectI, Vec2F, Vec2I};
use serde::{Deserialize, Serialize};

/// Rectangular cells of `tile_size`, `layer_size` cells wide and high.
///
/// # Examples
///
/// ```
/// use gridstead::{OrthogonalGrid, Vec2F, Vec2I};
///
/// let grid = OrthogonalGrid::new(Vec2F::new(16.0, 16.0), Vec2I::new(10, 10));
/// assert_eq!(grid.compute_position(Vec2F::new(40.0, 8.0)), Vec2I::new(2, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrthogonalGrid {
    pub tile_size: Vec2F,
    pub layer_size: Vec2I,
}

impl OrthogonalGrid {
    pub fn new(tile_size: Vec2F, layer_size: Vec2I) -> Self {
        Self {
            tile_size,
            layer_size,
        }
    }

    pub fn compute_bounds(&self) -> RectI {
        layer_rect(self.layer_size)
    }

    pub fn compute_world_bounds(&self) -> RectF {
        RectF::from_size(Vec2F::new(
            self.layer_size.x as f32 * self.tile_size.x,
            self.layer_size.y as f32 * self.tile_size.y,
        ))
    }

    pub fn compute_visible_area(&self, local: RectF) -> RectI {
        let corners = local.corners().map(|corner| self.compute_position(corner));
        visible_area_from_corners(corners, 0, self.layer_size)
    }

    pub fn compute_cell_bounds(&self, position: Vec2I) -> RectF {
        RectF::from_position_size(
            Vec2F::new(
                position.x as f32 * self.tile_size.x,
                position.y as f32 * self.tile_size.y,
            ),
            self.tile_size,
        )
    }

    pub fn compute_position(&self, location: Vec2F) -> Vec2I {
        Vec2F::new(location.x / self.tile_size.x, location.y / self.tile_size.y).floor()
    }

    pub fn compute_contour(&self, position: Vec2I) -> Vec<Vec2F> {
        self.compute_cell_bounds(position).corners().to_vec()
    }

    /// Edge neighbors (N, W, E, S), then vertex neighbors when requested.
    pub fn compute_neighbors(&self, position: Vec2I, query: CellNeighborQuery) -> Vec<Vec2I> {
        let Vec2I { x, y } = position;
        let mut neighbors = vec![
            Vec2I::new(x, y - 1),
            Vec2I::new(x - 1, y),
            Vec2I::new(x + 1, y),
            Vec2I::new(x, y + 1),
        ];

        if query.contains(CellNeighborQuery::DIAGONAL) {
            neighbors.extend([
                Vec2I::new(x - 1, y - 1),
                Vec2I::new(x + 1, y - 1),
                Vec2I::new(x - 1, y + 1),
                Vec2I::new(x + 1, y + 1),
            ]);
        }

        filter_neighbors(neighbors, self.layer_size, query)
    }

    pub fn are_diagonal_neighbors(&self, p0: Vec2I, p1: Vec2I) -> bool {
        let delta = (p1 - p0).abs();
        delta.x == 1 && delta.y == 1
    }
}
