//! Dense two-dimensional storage indexed by cell position.

use crate::{RectI, Vec2I};
use serde::{Deserialize, Serialize};

/// Row-major array of `size.x * size.y` values.
///
/// Lookups outside the array return `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Array2D<T> {
    size: Vec2I,
    data: Vec<T>,
}

impl<T: Clone> Array2D<T> {
    /// Creates an array filled with `value`. Negative sizes are treated as zero.
    pub fn new(size: Vec2I, value: T) -> Self {
        let size = Vec2I::new(size.x.max(0), size.y.max(0));
        Self {
            size,
            data: vec![value; (size.x as usize) * (size.y as usize)],
        }
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T> Array2D<T> {
    pub fn size(&self) -> Vec2I {
        self.size
    }

    pub fn valid(&self, position: Vec2I) -> bool {
        RectI::from_size(self.size).contains(position)
    }

    fn offset(&self, position: Vec2I) -> Option<usize> {
        self.valid(position)
            .then(|| position.y as usize * self.size.x as usize + position.x as usize)
    }

    pub fn get(&self, position: Vec2I) -> Option<&T> {
        self.offset(position).map(|offset| &self.data[offset])
    }

    pub fn get_mut(&mut self, position: Vec2I) -> Option<&mut T> {
        self.offset(position).map(move |offset| &mut self.data[offset])
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Vec2I> {
        let size = self.size;
        (0..size.y).flat_map(move |y| (0..size.x).map(move |x| Vec2I::new(x, y)))
    }
}
