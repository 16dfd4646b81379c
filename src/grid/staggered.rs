//! # Staggered Grid
//!
//! Diamond cells in a rectangular layer, every other row (or column) shifted
//! by half a tile.
//!
//! Cell centers sit on a diamond lattice. Rotating that lattice by 45° gives
//! an orthogonal "lattice space" where edge neighbors are one cardinal step
//! apart and vertex neighbors one diagonal step apart; routing heuristics and
//! field of vision work in that space.

use super::{filter_neighbors, layer_rect, visible_area_from_corners, CellAxis, CellIndex, CellNeighborQuery};
use crate::{RectF, RectI, Vec2F, Vec2I};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaggeredGrid {
    pub tile_size: Vec2F,
    pub layer_size: Vec2I,
    pub axis: CellAxis,
    pub index: CellIndex,
}

impl StaggeredGrid {
    pub fn new(tile_size: Vec2F, layer_size: Vec2I, axis: CellAxis, index: CellIndex) -> Self {
        Self {
            tile_size,
            layer_size,
            axis,
            index,
        }
    }

    fn parity(&self) -> i32 {
        match self.index {
            CellIndex::Odd => 0,
            CellIndex::Even => 1,
        }
    }

    /// Cell center in half-tile units.
    fn center_units(&self, position: Vec2I) -> Vec2I {
        match self.axis {
            CellAxis::Y => Vec2I::new(2 * position.x + 1 + self.index.shift(position.y), position.y + 1),
            CellAxis::X => Vec2I::new(position.x + 1, 2 * position.y + 1 + self.index.shift(position.x)),
        }
    }

    fn from_center_units(&self, units: Vec2I) -> Vec2I {
        match self.axis {
            CellAxis::Y => {
                let y = units.y - 1;
                Vec2I::new((units.x - 1 - self.index.shift(y)).div_euclid(2), y)
            }
            CellAxis::X => {
                let x = units.x - 1;
                Vec2I::new(x, (units.y - 1 - self.index.shift(x)).div_euclid(2))
            }
        }
    }

    /// Position of a cell in lattice space.
    pub fn compute_lattice_position(&self, position: Vec2I) -> Vec2I {
        let units = self.center_units(position);
        let p = self.parity();
        Vec2I::new(
            (units.x + units.y - p).div_euclid(2),
            (units.x - units.y - p).div_euclid(2),
        )
    }

    /// Cell at a lattice-space position.
    pub fn compute_cell_from_lattice(&self, lattice: Vec2I) -> Vec2I {
        let p = self.parity();
        let a = 2 * lattice.x + p;
        let b = 2 * lattice.y + p;
        self.from_center_units(Vec2I::new((a + b) / 2, (a - b) / 2))
    }

    pub fn compute_bounds(&self) -> RectI {
        layer_rect(self.layer_size)
    }

    pub fn compute_world_bounds(&self) -> RectF {
        let Vec2I { x: w, y: h } = self.layer_size;
        let size = match self.axis {
            CellAxis::Y => Vec2F::new(
                (w as f32 + 0.5) * self.tile_size.x,
                (h + 1) as f32 * self.tile_size.y / 2.0,
            ),
            CellAxis::X => Vec2F::new(
                (w + 1) as f32 * self.tile_size.x / 2.0,
                (h as f32 + 0.5) * self.tile_size.y,
            ),
        };
        RectF::from_size(size)
    }

    pub fn compute_visible_area(&self, local: RectF) -> RectI {
        let corners = local.corners().map(|corner| self.compute_position(corner));
        visible_area_from_corners(corners, 1, self.layer_size)
    }

    pub fn compute_cell_bounds(&self, position: Vec2I) -> RectF {
        let half = self.tile_size * 0.5;
        let units = self.center_units(position);
        let center = Vec2F::new(units.x as f32 * half.x, units.y as f32 * half.y);
        RectF::from_position_size(center - half, self.tile_size)
    }

    pub fn compute_position(&self, location: Vec2F) -> Vec2I {
        let half = self.tile_size * 0.5;
        let u = location.x / half.x;
        let v = location.y / half.y;
        let p = self.parity() as f32;

        // Rotated, each diamond is a 2x2 square centered on coordinates of parity p
        let snap = |t: f32| 2.0 * ((t + 1.0 - p) / 2.0).floor() + p;
        let limit = i64::from(i32::MAX);
        let a = (snap(u + v) as i64).clamp(-limit, limit);
        let b = (snap(u - v) as i64).clamp(-limit, limit);
        let unit = |value: i64| (value / 2).clamp(i64::from(i32::MIN / 4), i64::from(i32::MAX / 4)) as i32;
        self.from_center_units(Vec2I::new(unit(a + b), unit(a - b)))
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

    /// Edge neighbors, then vertex neighbors when requested.
    pub fn compute_neighbors(&self, position: Vec2I, query: CellNeighborQuery) -> Vec<Vec2I> {
        let Vec2I { x, y } = position;

        let mut neighbors = match self.axis {
            CellAxis::Y => {
                let s = self.index.shift(y);
                vec![
                    Vec2I::new(x - 1 + s, y - 1),
                    Vec2I::new(x + s, y - 1),
                    Vec2I::new(x - 1 + s, y + 1),
                    Vec2I::new(x + s, y + 1),
                ]
            }
            CellAxis::X => {
                let s = self.index.shift(x);
                vec![
                    Vec2I::new(x - 1, y - 1 + s),
                    Vec2I::new(x - 1, y + s),
                    Vec2I::new(x + 1, y - 1 + s),
                    Vec2I::new(x + 1, y + s),
                ]
            }
        };

        if query.contains(CellNeighborQuery::DIAGONAL) {
            match self.axis {
                CellAxis::Y => neighbors.extend([
                    Vec2I::new(x, y - 2),
                    Vec2I::new(x - 1, y),
                    Vec2I::new(x + 1, y),
                    Vec2I::new(x, y + 2),
                ]),
                CellAxis::X => neighbors.extend([
                    Vec2I::new(x, y - 1),
                    Vec2I::new(x - 2, y),
                    Vec2I::new(x + 2, y),
                    Vec2I::new(x, y + 1),
                ]),
            }
        }

        filter_neighbors(neighbors, self.layer_size, query)
    }

    pub fn are_diagonal_neighbors(&self, p0: Vec2I, p1: Vec2I) -> bool {
        let delta = (p1 - p0).abs();
        match self.axis {
            CellAxis::Y => (delta.x == 1 && delta.y == 0) || (delta.x == 0 && delta.y == 2),
            CellAxis::X => (delta.x == 0 && delta.y == 1) || (delta.x == 2 && delta.y == 0),
        }
    }
}
