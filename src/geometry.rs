//! # Geometry
//!
//! Integer cell coordinates and continuous world coordinates.
//!
//! Cell space uses [`Vec2I`]/[`RectI`]; world space (pixels or any other
//! continuous unit) uses [`Vec2F`]/[`RectF`]. Rectangles are half-open: they
//! contain `position` and exclude `position + size`.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 2D integer vector, mostly used as a cell coordinate.
///
/// # Examples
///
/// ```
/// use gridstead::Vec2I;
///
/// let pos = Vec2I::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// assert_eq!(pos.manhattan_distance(Vec2I::new(7, 9)), 7);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Vec2I {
    pub x: i32,
    pub y: i32,
}

impl Vec2I {
    /// Creates a new vector with the given coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the zero vector.
    pub const fn zero() -> Self {
        Self::new(0, 0)
    }

    /// Component-wise absolute value.
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// Calculates the Manhattan distance to another position.
    pub fn manhattan_distance(self, other: Vec2I) -> u32 {
        let delta = (self - other).abs();
        (delta.x + delta.y) as u32
    }

    /// Calculates the Chebyshev (king move) distance to another position.
    pub fn chebyshev_distance(self, other: Vec2I) -> u32 {
        let delta = (self - other).abs();
        delta.x.max(delta.y) as u32
    }

    /// Calculates the Euclidean distance to another position.
    pub fn euclidean_distance(self, other: Vec2I) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Converts to a continuous vector.
    pub fn as_vec2f(self) -> Vec2F {
        Vec2F::new(self.x as f32, self.y as f32)
    }
}

impl Add for Vec2I {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2I {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<i32> for Vec2I {
    type Output = Self;

    fn mul(self, factor: i32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

/// A 2D floating point vector in world space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2F {
    pub x: f32,
    pub y: f32,
}

impl Vec2F {
    /// Creates a new vector with the given coordinates.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the zero vector.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Component-wise floor, converted to integers.
    pub fn floor(self) -> Vec2I {
        Vec2I::new(self.x.floor() as i32, self.y.floor() as i32)
    }
}

impl Add for Vec2F {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2F {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Vec2F {
    type Output = Self;

    fn mul(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

/// An integer rectangle, usually a range of cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RectI {
    pub position: Vec2I,
    pub size: Vec2I,
}

impl RectI {
    /// Creates a rectangle from its top-left corner and size.
    pub const fn from_position_size(position: Vec2I, size: Vec2I) -> Self {
        Self { position, size }
    }

    /// Creates a rectangle anchored at the origin.
    pub const fn from_size(size: Vec2I) -> Self {
        Self::from_position_size(Vec2I::zero(), size)
    }

    /// Creates a rectangle from an inclusive min and an exclusive max.
    pub fn from_min_max(min: Vec2I, max: Vec2I) -> Self {
        Self::from_position_size(min, max - min)
    }

    /// Top-left corner (inclusive).
    pub fn min(&self) -> Vec2I {
        self.position
    }

    /// Bottom-right corner (exclusive).
    pub fn max(&self) -> Vec2I {
        self.position + self.size
    }

    /// Whether the rectangle covers no cell.
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    /// Whether `point` lies inside the rectangle.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridstead::{RectI, Vec2I};
    ///
    /// let rect = RectI::from_size(Vec2I::new(4, 3));
    /// assert!(rect.contains(Vec2I::new(3, 2)));
    /// assert!(!rect.contains(Vec2I::new(4, 2)));
    /// ```
    pub fn contains(&self, point: Vec2I) -> bool {
        let max = self.max();
        point.x >= self.position.x && point.x < max.x && point.y >= self.position.y && point.y < max.y
    }

    /// Overlap of two rectangles, or `None` when they are disjoint.
    pub fn intersection(&self, other: &RectI) -> Option<RectI> {
        let min = Vec2I::new(
            self.position.x.max(other.position.x),
            self.position.y.max(other.position.y),
        );
        let max = Vec2I::new(self.max().x.min(other.max().x), self.max().y.min(other.max().y));
        let rect = RectI::from_min_max(min, max);
        (!rect.is_empty()).then_some(rect)
    }
}

/// A floating point rectangle in world space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RectF {
    pub position: Vec2F,
    pub size: Vec2F,
}

impl RectF {
    /// Creates a rectangle from its top-left corner and size.
    pub const fn from_position_size(position: Vec2F, size: Vec2F) -> Self {
        Self { position, size }
    }

    /// Creates a rectangle anchored at the origin.
    pub const fn from_size(size: Vec2F) -> Self {
        Self::from_position_size(Vec2F::zero(), size)
    }

    /// Top-left corner.
    pub fn min(&self) -> Vec2F {
        self.position
    }

    /// Bottom-right corner.
    pub fn max(&self) -> Vec2F {
        self.position + self.size
    }

    /// Center of the rectangle.
    pub fn center(&self) -> Vec2F {
        self.position + self.size * 0.5
    }

    /// The four corners, clockwise from the top-left.
    pub fn corners(&self) -> [Vec2F; 4] {
        let min = self.min();
        let max = self.max();
        [
            min,
            Vec2F::new(max.x, min.y),
            max,
            Vec2F::new(min.x, max.y),
        ]
    }

    /// Whether `point` lies inside the rectangle.
    pub fn contains(&self, point: Vec2F) -> bool {
        let max = self.max();
        point.x >= self.position.x && point.x < max.x && point.y >= self.position.y && point.y < max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2i_distances() {
        let a = Vec2I::new(0, 0);
        let b = Vec2I::new(3, 4);
        assert_eq!(a.manhattan_distance(b), 7);
        assert_eq!(a.chebyshev_distance(b), 4);
        assert_eq!(a.euclidean_distance(b), 5.0);
    }

    #[test]
    fn test_vec2i_arithmetic() {
        let a = Vec2I::new(5, 10);
        let b = Vec2I::new(3, 2);
        assert_eq!(a + b, Vec2I::new(8, 12));
        assert_eq!(a - b, Vec2I::new(2, 8));
        assert_eq!(b * 3, Vec2I::new(9, 6));
    }

    #[test]
    fn test_vec2f_floor_negative() {
        assert_eq!(Vec2F::new(-0.5, 1.5).floor(), Vec2I::new(-1, 1));
    }

    #[test]
    fn test_rect_intersection() {
        let a = RectI::from_size(Vec2I::new(10, 10));
        let b = RectI::from_position_size(Vec2I::new(5, -2), Vec2I::new(10, 4));
        assert_eq!(
            a.intersection(&b),
            Some(RectI::from_position_size(Vec2I::new(5, 0), Vec2I::new(5, 2)))
        );

        let far = RectI::from_position_size(Vec2I::new(20, 20), Vec2I::new(1, 1));
        assert_eq!(a.intersection(&far), None);
    }

    #[test]
    fn test_rectf_corners_and_center() {
        let rect = RectF::from_position_size(Vec2F::new(2.0, 4.0), Vec2F::new(4.0, 2.0));
        assert_eq!(rect.center(), Vec2F::new(4.0, 5.0));
        assert_eq!(rect.corners()[2], Vec2F::new(6.0, 6.0));
        assert!(rect.contains(Vec2F::new(2.0, 4.0)));
        assert!(!rect.contains(Vec2F::new(6.0, 4.0)));
    }
}
