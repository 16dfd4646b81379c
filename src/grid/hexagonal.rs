//! # Hexagonal Grid
//!
//! Pointy-top hexagons in shifted rows (`CellAxis::Y`) or flat-top hexagons
//! in shifted columns (`CellAxis::X`).
//!
//! A hexagon is described by its bounding `tile_size` and the length of the
//! `side` that runs parallel to the stagger axis. Consecutive rows (or
//! columns) overlap by the height of the hexagon's slanted cap.

use super::{filter_neighbors, layer_rect, visible_area_from_corners, CellAxis, CellIndex, CellNeighborQuery};
use crate::{RectF, RectI, Vec2F, Vec2I};
use serde::{Deserialize, Serialize};

/// Hexagonal layer.
///
/// # Examples
///
/// ```
/// use gridstead::{CellAxis, CellIndex, HexagonalGrid, Vec2I};
///
/// let grid = HexagonalGrid::with_radius(16.0, Vec2I::new(8, 8), CellAxis::Y, CellIndex::Odd);
/// assert_eq!(grid.hex_distance(Vec2I::new(0, 0), Vec2I::new(3, 0)), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HexagonalGrid {
    pub tile_size: Vec2F,
    pub side: f32,
    pub layer_size: Vec2I,
    pub axis: CellAxis,
    pub index: CellIndex,
}

impl HexagonalGrid {
    pub fn new(tile_size: Vec2F, side: f32, layer_size: Vec2I, axis: CellAxis, index: CellIndex) -> Self {
        Self {
            tile_size,
            side,
            layer_size,
            axis,
            index,
        }
    }

    /// Regular hexagons with the given circumradius.
    pub fn with_radius(radius: f32, layer_size: Vec2I, axis: CellAxis, index: CellIndex) -> Self {
        let narrow = 3f32.sqrt() * radius;
        let wide = 2.0 * radius;
        let tile_size = match axis {
            CellAxis::Y => Vec2F::new(narrow, wide),
            CellAxis::X => Vec2F::new(wide, narrow),
        };
        Self::new(tile_size, radius, layer_size, axis, index)
    }

    /// Distance between two consecutive rows (or columns).
    fn stride(&self) -> f32 {
        match self.axis {
            CellAxis::Y => (self.tile_size.y + self.side) / 2.0,
            CellAxis::X => (self.tile_size.x + self.side) / 2.0,
        }
    }

    /// Extent of the slanted part at each end of the hexagon.
    fn cap(&self) -> f32 {
        match self.axis {
            CellAxis::Y => (self.tile_size.y - self.side) / 2.0,
            CellAxis::X => (self.tile_size.x - self.side) / 2.0,
        }
    }

    pub fn compute_bounds(&self) -> RectI {
        layer_rect(self.layer_size)
    }

    pub fn compute_world_bounds(&self) -> RectF {
        let Vec2I { x: w, y: h } = self.layer_size;
        let size = match self.axis {
            CellAxis::Y => Vec2F::new(
                (w as f32 + 0.5) * self.tile_size.x,
                h as f32 * self.stride() + self.cap(),
            ),
            CellAxis::X => Vec2F::new(
                w as f32 * self.stride() + self.cap(),
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
        let origin = match self.axis {
            CellAxis::Y => Vec2F::new(
                (position.x as f32 + self.index.shift(position.y) as f32 / 2.0) * self.tile_size.x,
                position.y as f32 * self.stride(),
            ),
            CellAxis::X => Vec2F::new(
                position.x as f32 * self.stride(),
                (position.y as f32 + self.index.shift(position.x) as f32 / 2.0) * self.tile_size.y,
            ),
        };
        RectF::from_position_size(origin, self.tile_size)
    }

    pub fn compute_position(&self, location: Vec2F) -> Vec2I {
        // Work in (along, across) coordinates: `across` runs over the shifted
        // lines, `along` runs inside one line.
        let (along, across, tile_along) = match self.axis {
            CellAxis::Y => (location.x, location.y, self.tile_size.x),
            CellAxis::X => (location.y, location.x, self.tile_size.y),
        };

        let stride = self.stride();
        let cap = self.cap();
        let cell_in_line = |line: i32| {
            let shift = self.index.shift(line) as f32 * tile_along / 2.0;
            ((along - shift) / tile_along).floor() as i32
        };

        let line = (across / stride).floor() as i32;
        let offset = across - line as f32 * stride;
        let mut cell = (cell_in_line(line), line);

        if offset < cap {
            // Inside the band shared with the previous line
            let shift = self.index.shift(line) as f32 * tile_along / 2.0;
            let middle = cell.0 as f32 * tile_along + shift + tile_along / 2.0;
            let distance = (along - middle).abs() / (tile_along / 2.0);
            if offset < cap * distance {
                let previous = line.saturating_sub(1);
                cell = (cell_in_line(previous), previous);
            }
        }

        match self.axis {
            CellAxis::Y => Vec2I::new(cell.0, cell.1),
            CellAxis::X => Vec2I::new(cell.1, cell.0),
        }
    }

    /// Hexagon outline, clockwise from the top (pointy) or top-left (flat) vertex.
    pub fn compute_contour(&self, position: Vec2I) -> Vec<Vec2F> {
        let bounds = self.compute_cell_bounds(position);
        let Vec2F { x: l, y: t } = bounds.position;
        let Vec2F { x: w, y: h } = self.tile_size;
        let cap = self.cap();

        match self.axis {
            CellAxis::Y => vec![
                Vec2F::new(l + w / 2.0, t),
                Vec2F::new(l + w, t + cap),
                Vec2F::new(l + w, t + cap + self.side),
                Vec2F::new(l + w / 2.0, t + h),
                Vec2F::new(l, t + cap + self.side),
                Vec2F::new(l, t + cap),
            ],
            CellAxis::X => vec![
                Vec2F::new(l + cap, t),
                Vec2F::new(l + cap + self.side, t),
                Vec2F::new(l + w, t + h / 2.0),
                Vec2F::new(l + cap + self.side, t + h),
                Vec2F::new(l + cap, t + h),
                Vec2F::new(l, t + h / 2.0),
            ],
        }
    }

    /// The six edge neighbors. The `DIAGONAL` flag has no effect.
    pub fn compute_neighbors(&self, position: Vec2I, query: CellNeighborQuery) -> Vec<Vec2I> {
        let Vec2I { x, y } = position;

        let neighbors = match self.axis {
            CellAxis::Y => {
                let s = self.index.shift(y);
                vec![
                    Vec2I::new(x - 1, y),
                    Vec2I::new(x + 1, y),
                    Vec2I::new(x - 1 + s, y - 1),
                    Vec2I::new(x + s, y - 1),
                    Vec2I::new(x - 1 + s, y + 1),
                    Vec2I::new(x + s, y + 1),
                ]
            }
            CellAxis::X => {
                let s = self.index.shift(x);
                vec![
                    Vec2I::new(x, y - 1),
                    Vec2I::new(x, y + 1),
                    Vec2I::new(x - 1, y - 1 + s),
                    Vec2I::new(x - 1, y + s),
                    Vec2I::new(x + 1, y - 1 + s),
                    Vec2I::new(x + 1, y + s),
                ]
            }
        };

        filter_neighbors(neighbors, self.layer_size, query)
    }

    pub fn are_diagonal_neighbors(&self, _p0: Vec2I, _p1: Vec2I) -> bool {
        false
    }

    /// Number of steps between two cells.
    pub fn hex_distance(&self, p0: Vec2I, p1: Vec2I) -> u32 {
        let a = self.to_axial(p0);
        let b = self.to_axial(p1);
        let dq = b.x - a.x;
        let dr = b.y - a.y;
        ((dq.abs() + dr.abs() + (dq + dr).abs()) / 2) as u32
    }

    fn to_axial(&self, position: Vec2I) -> Vec2I {
        let Vec2I { x, y } = position;
        match (self.axis, self.index) {
            (CellAxis::Y, CellIndex::Odd) => Vec2I::new(x - (y - (y & 1)) / 2, y),
            (CellAxis::Y, CellIndex::Even) => Vec2I::new(x - (y + (y & 1)) / 2, y),
            (CellAxis::X, CellIndex::Odd) => Vec2I::new(x, y - (x - (x & 1)) / 2),
            (CellAxis::X, CellIndex::Even) => Vec2I::new(x, y - (x + (x & 1)) / 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regular_grids() -> Vec<HexagonalGrid> {
        let layer = Vec2I::new(6, 5);
        vec![
            HexagonalGrid::with_radius(20.0, layer, CellAxis::Y, CellIndex::Odd),
            HexagonalGrid::with_radius(20.0, layer, CellAxis::Y, CellIndex::Even),
            HexagonalGrid::with_radius(20.0, layer, CellAxis::X, CellIndex::Odd),
            HexagonalGrid::with_radius(20.0, layer, CellAxis::X, CellIndex::Even),
        ]
    }

    #[test]
    fn test_pointy_layout() {
        let grid = HexagonalGrid::new(Vec2F::new(64.0, 64.0), 32.0, Vec2I::new(4, 3), CellAxis::Y, CellIndex::Odd);
        assert_eq!(grid.compute_cell_bounds(Vec2I::new(1, 1)).position, Vec2F::new(96.0, 48.0));
        assert_eq!(grid.compute_world_bounds().size, Vec2F::new(288.0, 160.0));

        let contour = grid.compute_contour(Vec2I::new(0, 0));
        assert_eq!(contour.len(), 6);
        assert_eq!(contour[0], Vec2F::new(32.0, 0.0));
        assert_eq!(contour[2], Vec2F::new(64.0, 48.0));
    }

    #[test]
    fn test_pointy_cap_band() {
        let grid = HexagonalGrid::new(Vec2F::new(64.0, 64.0), 32.0, Vec2I::new(4, 3), CellAxis::Y, CellIndex::Odd);
        // Under the bottom tip of (0, 0) but above the slanted edge of row 1
        assert_eq!(grid.compute_position(Vec2F::new(30.0, 49.0)), Vec2I::new(0, 0));
        // Just inside the top tip of (-1, 1)
        assert_eq!(grid.compute_position(Vec2F::new(1.0, 60.0)), Vec2I::new(-1, 1));
    }

    #[test]
    fn test_position_round_trip() {
        for grid in regular_grids() {
            for y in -1..6 {
                for x in -1..7 {
                    let position = Vec2I::new(x, y);
                    let center = grid.compute_cell_bounds(position).center();
                    assert_eq!(grid.compute_position(center), position, "{:?}", grid);
                }
            }
        }
    }

    #[test]
    fn test_position_far_away() {
        for grid in regular_grids() {
            for location in [
                Vec2F::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
                Vec2F::new(f32::INFINITY, f32::NEG_INFINITY),
                Vec2F::new(f32::MIN, 10.0),
                Vec2F::new(10.0, f32::MIN),
            ] {
                assert!(!grid.compute_bounds().contains(grid.compute_position(location)), "{:?}", location);
            }
        }
    }

    #[test]
    fn test_visible_area_covers_touched_cells() {
        let rects = [
            RectF::from_position_size(Vec2F::new(10.0, 5.0), Vec2F::new(60.0, 40.0)),
            RectF::from_position_size(Vec2F::new(-30.0, -30.0), Vec2F::new(80.0, 70.0)),
            RectF::from_position_size(Vec2F::new(100.0, 50.0), Vec2F::new(200.0, 200.0)),
            RectF::from_position_size(Vec2F::new(90.0, 60.0), Vec2F::new(1.0, 1.0)),
        ];
        for grid in regular_grids() {
            for rect in rects {
                let area = grid.compute_visible_area(rect);
                for y in 0..grid.layer_size.y {
                    for x in 0..grid.layer_size.x {
                        let position = Vec2I::new(x, y);
                        let touched = rect.contains(grid.compute_cell_bounds(position).center())
                            || grid.compute_contour(position).into_iter().any(|vertex| rect.contains(vertex));
                        if touched {
                            assert!(area.contains(position), "{:?} {:?} {:?}", grid, rect, position);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_visible_area_unbounded() {
        for grid in regular_grids() {
            let everything = RectF::from_position_size(
                Vec2F::new(f32::MIN, f32::MIN),
                Vec2F::new(f32::INFINITY, f32::INFINITY),
            );
            assert_eq!(grid.compute_visible_area(everything), grid.compute_bounds());
        }
    }

    #[test]
    fn test_neighbors_are_equidistant() {
        for grid in regular_grids() {
            for position in [Vec2I::new(2, 2), Vec2I::new(3, 3)] {
                let center = grid.compute_cell_bounds(position).center();
                let neighbors = grid.compute_neighbors(position, CellNeighborQuery::all());
                assert_eq!(neighbors.len(), 6);

                for neighbor in neighbors {
                    let other = grid.compute_cell_bounds(neighbor).center();
                    let distance = ((other.x - center.x).powi(2) + (other.y - center.y).powi(2)).sqrt();
                    assert!((distance - 3f32.sqrt() * 20.0).abs() < 1e-3, "{:?}", grid);
                    assert_eq!(grid.hex_distance(position, neighbor), 1);
                    assert!(!grid.are_diagonal_neighbors(position, neighbor));
                }
            }
        }
    }

    #[test]
    fn test_corner_neighbors_filtered() {
        let grid = HexagonalGrid::with_radius(20.0, Vec2I::new(6, 5), CellAxis::Y, CellIndex::Odd);
        assert_eq!(grid.compute_neighbors(Vec2I::new(0, 0), CellNeighborQuery::VALID).len(), 2);
        assert_eq!(grid.compute_neighbors(Vec2I::new(0, 0), CellNeighborQuery::empty()).len(), 6);
    }
}
