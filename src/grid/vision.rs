//! # Field of Vision
//!
//! Symmetric shadowcasting over a [`GridMap`].
//!
//! Each of the four quadrants around the origin is scanned row by row. A row
//! is the set of cells at one Chebyshev depth between a start and an end
//! slope; opaque cells narrow the slopes of the rows behind them. Slopes are
//! kept as exact fractions so that the result does not depend on floating
//! point rounding.
//!
//! Orthogonal and isometric grids are scanned in index space. Staggered
//! grids are scanned in their lattice space, where neighbors form a square
//! pattern. Hexagonal grids have no such square structure.

use super::{AnyGrid, CellFlags, GridMap};
use crate::{fatal, GridsteadError, GridsteadResult, Vec2I};
use serde::{Deserialize, Serialize};

/// What a field of vision records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Visibility {
    /// Mark seen cells `VISIBLE`
    Basic,
    /// Mark seen cells `VISIBLE` and `EXPLORED`
    #[default]
    Full,
}

impl Visibility {
    fn flags(self) -> CellFlags {
        match self {
            Visibility::Basic => CellFlags::VISIBLE,
            Visibility::Full => CellFlags::VISIBLE | CellFlags::EXPLORED,
        }
    }
}

/// Slope `num / den` with `den > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slope {
    num: i32,
    den: i32,
}

impl Slope {
    const fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    /// Slope through the near-left corner of a cell.
    fn at(depth: i32, col: i32) -> Self {
        Self::new(2 * col - 1, 2 * depth)
    }
}

/// Cells at one depth of a quadrant, between two slopes.
#[derive(Debug, Clone, Copy)]
struct Row {
    depth: i32,
    start: Slope,
    end: Slope,
}

impl Row {
    fn columns(&self) -> std::ops::RangeInclusive<i32> {
        let min = round_ties_up(self.depth * self.start.num, self.start.den);
        let max = round_ties_down(self.depth * self.end.num, self.end.den);
        min..=max
    }

    fn next(&self) -> Row {
        Row {
            depth: self.depth + 1,
            ..*self
        }
    }

    /// Whether the cell center lies inside the row's slopes.
    fn is_symmetric(&self, col: i32) -> bool {
        col * self.start.den >= self.depth * self.start.num && col * self.end.den <= self.depth * self.end.num
    }
}

/// `floor(n / d + 1/2)` for `d > 0`.
fn round_ties_up(n: i32, d: i32) -> i32 {
    (2 * n + d).div_euclid(2 * d)
}

/// `ceil(n / d - 1/2)` for `d > 0`.
fn round_ties_down(n: i32, d: i32) -> i32 {
    -(-(2 * n - d)).div_euclid(2 * d)
}

#[derive(Debug, Clone, Copy)]
enum Quadrant {
    North,
    East,
    South,
    West,
}

impl Quadrant {
    const ALL: [Quadrant; 4] = [Quadrant::North, Quadrant::East, Quadrant::South, Quadrant::West];

    fn transform(self, origin: Vec2I, depth: i32, col: i32) -> Vec2I {
        match self {
            Quadrant::North => Vec2I::new(origin.x + col, origin.y - depth),
            Quadrant::South => Vec2I::new(origin.x + col, origin.y + depth),
            Quadrant::East => Vec2I::new(origin.x + depth, origin.y + col),
            Quadrant::West => Vec2I::new(origin.x - depth, origin.y + col),
        }
    }
}

impl GridMap {
    /// Marks every cell seen from `origin` within `range` as visible and explored.
    ///
    /// Panics on hexagonal or unset grids.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridstead::{GridMap, Vec2F, Vec2I};
    ///
    /// let mut map = GridMap::orthogonal(Vec2F::new(16.0, 16.0), Vec2I::new(9, 9));
    /// map.set_wall(Vec2I::new(4, 3));
    /// map.compute_field_of_vision(Vec2I::new(4, 4), 4);
    ///
    /// assert!(map.visible(Vec2I::new(4, 3)));
    /// assert!(!map.visible(Vec2I::new(4, 1)));
    /// assert!(map.explored(Vec2I::new(8, 8)));
    /// ```
    pub fn compute_field_of_vision(&mut self, origin: Vec2I, range: u32) {
        self.compute_field_of_vision_with(origin, range, Visibility::Full);
    }

    /// Field of vision recording only what `visibility` asks for.
    ///
    /// Panics on hexagonal or unset grids.
    pub fn compute_field_of_vision_with(&mut self, origin: Vec2I, range: u32, visibility: Visibility) {
        if let Err(error) = self.try_compute_field_of_vision(origin, range, visibility) {
            fatal(error);
        }
    }

    /// Field of vision, reporting unsupported grids as an error.
    ///
    /// Cells are only ever added to the visible set; call
    /// [`GridMap::clear_visible`] first to start from nothing.
    pub fn try_compute_field_of_vision(&mut self, origin: Vec2I, range: u32, visibility: Visibility) -> GridsteadResult<()> {
        let grid = *self.grid();
        let to_cell: Box<dyn Fn(Vec2I) -> Vec2I> = match grid {
            AnyGrid::Orthogonal(_) | AnyGrid::Isometric(_) => Box::new(|position| position),
            AnyGrid::Staggered(grid) => Box::new(move |lattice| grid.compute_cell_from_lattice(lattice)),
            AnyGrid::Hexagonal(_) | AnyGrid::None => {
                return Err(GridsteadError::UnsupportedGrid(format!(
                    "field of vision needs a square neighborhood, got a {} grid",
                    grid.kind()
                )))
            }
        };
        if !self.valid(origin) {
            log::debug!("Field of vision origin {:?} is outside the map", origin);
            return Ok(());
        }
        let origin_lattice = match grid {
            AnyGrid::Staggered(grid) => grid.compute_lattice_position(origin),
            _ => origin,
        };

        let flags = visibility.flags();
        let range = i32::try_from(range).unwrap_or(i32::MAX);
        self.add_properties(origin, flags);

        for quadrant in Quadrant::ALL {
            let cell = |depth: i32, col: i32| to_cell(quadrant.transform(origin_lattice, depth, col));
            let mut rows = vec![Row {
                depth: 1,
                start: Slope::new(-1, 1),
                end: Slope::new(1, 1),
            }];

            while let Some(mut row) = rows.pop() {
                if row.depth > range {
                    continue;
                }

                let mut previous_wall: Option<bool> = None;
                for col in row.columns() {
                    let position = cell(row.depth, col);
                    let wall = !self.transparent(position);

                    if wall || row.is_symmetric(col) {
                        self.add_properties(position, flags);
                    }
                    match (previous_wall, wall) {
                        (Some(true), false) => row.start = Slope::at(row.depth, col),
                        (Some(false), true) => {
                            let mut next = row.next();
                            next.end = Slope::at(row.depth, col);
                            rows.push(next);
                        }
                        _ => {}
                    }
                    previous_wall = Some(wall);
                }

                if previous_wall == Some(false) {
                    rows.push(row.next());
                }
            }
        }

        log::trace!("Field of vision from {:?} with range {}", origin, range);
        Ok(())
    }
}
