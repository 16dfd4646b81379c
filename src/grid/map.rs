//! # Grid Map
//!
//! Per-cell flags and tags over an [`AnyGrid`].
//!
//! Routing lives in [`super::route`] and field of vision in
//! [`super::vision`]; both extend [`GridMap`].
//!
//! All queries and mutators accept positions outside the layer: reads return
//! `false` (or the default tag) and writes are ignored.

use super::{AnyGrid, Array2D, CellAxis, CellIndex, HexagonalGrid, IsometricGrid, OrthogonalGrid, StaggeredGrid};
use crate::{Vec2F, Vec2I};

bitflags::bitflags! {
    /// State of one cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CellFlags: u8 {
        /// Sight passes through
        const TRANSPARENT = 1 << 0;
        /// Routes may enter
        const WALKABLE = 1 << 1;
        /// Routes may enter at an extra cost
        const BLOCKED = 1 << 2;
        /// Seen by the last field of vision
        const VISIBLE = 1 << 3;
        /// Seen at least once
        const EXPLORED = 1 << 4;
    }
}

impl CellFlags {
    /// An open cell.
    pub const EMPTY_CELL: CellFlags = CellFlags::TRANSPARENT.union(CellFlags::WALKABLE);
}

impl Default for CellFlags {
    fn default() -> Self {
        Self::EMPTY_CELL
    }
}

/// Cell flags and tags for a layer.
///
/// # Examples
///
/// ```
/// use gridstead::{GridMap, Vec2F, Vec2I};
///
/// let mut map = GridMap::orthogonal(Vec2F::new(16.0, 16.0), Vec2I::new(10, 10));
/// map.set_wall(Vec2I::new(2, 3));
/// assert!(!map.walkable(Vec2I::new(2, 3)));
/// assert!(!map.walkable(Vec2I::new(-1, 0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GridMap {
    grid: AnyGrid,
    cells: Array2D<CellFlags>,
    tags: Array2D<u32>,
}

impl GridMap {
    /// Creates a map of empty cells sized to the grid's layer.
    pub fn new(grid: AnyGrid) -> Self {
        let size = grid.layer_size();
        Self {
            grid,
            cells: Array2D::new(size, CellFlags::default()),
            tags: Array2D::new(size, 0),
        }
    }

    pub fn orthogonal(tile_size: Vec2F, layer_size: Vec2I) -> Self {
        Self::new(OrthogonalGrid::new(tile_size, layer_size).into())
    }

    pub fn isometric(tile_size: Vec2F, layer_size: Vec2I) -> Self {
        Self::new(IsometricGrid::new(tile_size, layer_size).into())
    }

    pub fn staggered(tile_size: Vec2F, layer_size: Vec2I, axis: CellAxis, index: CellIndex) -> Self {
        Self::new(StaggeredGrid::new(tile_size, layer_size, axis, index).into())
    }

    pub fn hexagonal(tile_size: Vec2F, side: f32, layer_size: Vec2I, axis: CellAxis, index: CellIndex) -> Self {
        Self::new(HexagonalGrid::new(tile_size, side, layer_size, axis, index).into())
    }

    pub fn grid(&self) -> &AnyGrid {
        &self.grid
    }

    pub fn size(&self) -> Vec2I {
        self.cells.size()
    }

    pub fn valid(&self, position: Vec2I) -> bool {
        self.cells.valid(position)
    }

    /// All positions of the map, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Vec2I> {
        self.cells.positions()
    }

    /// Flags of a cell; empty outside the layer.
    pub fn properties(&self, position: Vec2I) -> CellFlags {
        self.cells.get(position).copied().unwrap_or_else(CellFlags::empty)
    }

    pub fn set_properties(&mut self, position: Vec2I, flags: CellFlags) {
        if let Some(cell) = self.cells.get_mut(position) {
            *cell = flags;
        }
    }

    pub fn add_properties(&mut self, position: Vec2I, flags: CellFlags) {
        if let Some(cell) = self.cells.get_mut(position) {
            cell.insert(flags);
        }
    }

    pub fn remove_properties(&mut self, position: Vec2I, flags: CellFlags) {
        if let Some(cell) = self.cells.get_mut(position) {
            cell.remove(flags);
        }
    }

    /// Sets every cell to `flags`.
    pub fn reset(&mut self, flags: CellFlags) {
        self.cells.fill(flags);
    }

    /// Makes a cell transparent and walkable, keeping its sight memory.
    pub fn set_empty(&mut self, position: Vec2I) {
        self.add_properties(position, CellFlags::EMPTY_CELL);
        self.remove_properties(position, CellFlags::BLOCKED);
    }

    /// Makes a cell opaque and not walkable, keeping its sight memory.
    pub fn set_wall(&mut self, position: Vec2I) {
        self.remove_properties(position, CellFlags::EMPTY_CELL | CellFlags::BLOCKED);
    }

    fn flag(&self, position: Vec2I, flag: CellFlags) -> bool {
        self.properties(position).contains(flag)
    }

    fn set_flag(&mut self, position: Vec2I, flag: CellFlags, value: bool) {
        if let Some(cell) = self.cells.get_mut(position) {
            cell.set(flag, value);
        }
    }

    pub fn walkable(&self, position: Vec2I) -> bool {
        self.flag(position, CellFlags::WALKABLE)
    }

    pub fn set_walkable(&mut self, position: Vec2I, walkable: bool) {
        self.set_flag(position, CellFlags::WALKABLE, walkable);
    }

    pub fn transparent(&self, position: Vec2I) -> bool {
        self.flag(position, CellFlags::TRANSPARENT)
    }

    pub fn set_transparent(&mut self, position: Vec2I, transparent: bool) {
        self.set_flag(position, CellFlags::TRANSPARENT, transparent);
    }

    pub fn blocked(&self, position: Vec2I) -> bool {
        self.flag(position, CellFlags::BLOCKED)
    }

    pub fn set_blocked(&mut self, position: Vec2I, blocked: bool) {
        self.set_flag(position, CellFlags::BLOCKED, blocked);
    }

    pub fn visible(&self, position: Vec2I) -> bool {
        self.flag(position, CellFlags::VISIBLE)
    }

    pub fn explored(&self, position: Vec2I) -> bool {
        self.flag(position, CellFlags::EXPLORED)
    }

    fn clear_flag(&mut self, flag: CellFlags) {
        for cell in self.cells.iter_mut() {
            cell.remove(flag);
        }
    }

    pub fn clear_visible(&mut self) {
        self.clear_flag(CellFlags::VISIBLE);
    }

    pub fn clear_explored(&mut self) {
        self.clear_flag(CellFlags::EXPLORED);
    }

    pub fn clear_blocks(&mut self) {
        self.clear_flag(CellFlags::BLOCKED);
    }

    /// User tag of a cell; 0 outside the layer.
    pub fn tag(&self, position: Vec2I) -> u32 {
        self.tags.get(position).copied().unwrap_or_default()
    }

    pub fn set_tag(&mut self, position: Vec2I, tag: u32) {
        if let Some(cell) = self.tags.get_mut(position) {
            *cell = tag;
        }
    }
}
