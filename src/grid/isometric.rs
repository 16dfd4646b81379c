//! # Isometric Grid
//!
//! Diamond cells forming one big diamond, cell `(0, 0)` at the top.
//!
//! Moving along `x` goes down-right, moving along `y` goes down-left. Index
//! space is orthogonal: edge neighbors differ by one on a single axis.

use super::{filter_neighbors, layer_rect, visible_area_from_corners, CellNeighborQuery};
use crate::{RectF, RectI, Vec2F, Vec2I};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IsometricGrid {
    pub tile_size: Vec2F,
    pub layer_size: Vec2I,
}

impl IsometricGrid {
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
        let span = (self.layer_size.x + self.layer_size.y) as f32 / 2.0;
        RectF::from_size(Vec2F::new(span * self.tile_size.x, span * self.tile_size.y))
    }

    pub fn compute_visible_area(&self, local: RectF) -> RectI {
        let corners = local.corners().map(|corner| self.compute_position(corner));
        visible_area_from_corners(corners, 0, self.layer_size)
    }

    pub fn compute_cell_bounds(&self, position: Vec2I) -> RectF {
        let half = self.tile_size * 0.5;
        let x = (position.x - position.y + self.layer_size.y - 1) as f32 * half.x;
        let y = (position.x + position.y) as f32 * half.y;
        RectF::from_position_size(Vec2F::new(x, y), self.tile_size)
    }

    pub fn compute_position(&self, location: Vec2F) -> Vec2I {
        let half = self.tile_size * 0.5;
        // u = x - y and v = x + y in cell units
        let u = (location.x - self.layer_size.y as f32 * half.x) / half.x;
        let v = location.y / half.y;
        Vec2I::new(((u + v) / 2.0).floor() as i32, ((v - u) / 2.0).floor() as i32)
    }

    /// Diamond outline: top, right, bottom, left.
    pub fn compute_contour(&self, position: Vec2I) -> Vec<Vec2F> {
        let bounds = self.compute_cell_bounds(position);
        let center = bounds.center();
        let max = bounds.max();
        vec![
            Vec2F::new(center.x, bounds.position.y),
            Vec2F::new(max.x, center.y),
            Vec2F::new(center.x, max.y),
            Vec2F::new(bounds.position.x, center.y),
        ]
    }

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
