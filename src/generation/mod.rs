//! # Generation Module
//!
//! Procedural layouts written directly into a [`GridMap`].
//!
//! Generators are deterministic for a given [`GenerationConfig`]: the same
//! seed always produces the same map. Two generators are provided:
//! [`RoomCorridorGenerator`] carves rectangular rooms joined by corridors,
//! and [`CaveGenerator`] grows organic caverns from Perlin noise.

pub mod caves;
pub mod dungeon;

pub use caves::*;
pub use dungeon::*;

use crate::config::{DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH, DEFAULT_TILE_SIZE};
use crate::{GridMap, GridsteadError, GridsteadResult, RectI, Vec2F, Vec2I};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
///
/// Room sizes include the surrounding wall ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Map size in cells
    pub map_size: Vec2I,
    /// Tile size of the generated grid
    pub tile_size: Vec2F,
    /// Minimum room edge length
    pub min_room_size: i32,
    /// Maximum room edge length
    pub max_room_size: i32,
    /// Minimum number of rooms to attempt
    pub min_rooms: u32,
    /// Maximum number of rooms to attempt
    pub max_rooms: u32,
    /// Attempts to place a room before giving up on it
    pub max_placement_attempts: u32,
    /// Probability of extra connections between rooms (0.0 to 1.0)
    pub extra_connection_chance: f64,
    /// Frequency of the cave noise
    pub noise_frequency: f64,
    /// Density below which a cave cell starts as a wall (0.0 to 1.0)
    pub wall_threshold: f64,
    /// Cellular-automaton passes applied to caves
    pub smoothing_passes: u32,
}

impl GenerationConfig {
    /// Creates a default generation configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridstead::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert!(config.min_room_size >= 3);
    /// assert!(config.max_room_size >= config.min_room_size);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            map_size: Vec2I::new(DEFAULT_MAP_WIDTH, DEFAULT_MAP_HEIGHT),
            tile_size: Vec2F::new(DEFAULT_TILE_SIZE, DEFAULT_TILE_SIZE),
            min_room_size: 4,
            max_room_size: 12,
            min_rooms: 6,
            max_rooms: 15,
            max_placement_attempts: 100,
            extra_connection_chance: 0.15,
            noise_frequency: 0.08,
            wall_threshold: 0.45,
            smoothing_passes: 4,
        }
    }

    /// Creates a configuration for testing with smaller, simpler maps.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            map_size: Vec2I::new(40, 30),
            min_room_size: 3,
            max_room_size: 6,
            min_rooms: 3,
            max_rooms: 6,
            max_placement_attempts: 50,
            extra_connection_chance: 0.1,
            smoothing_passes: 3,
            ..Self::new(seed)
        }
    }

    /// Checks that the configuration can produce a map at all.
    pub fn validate(&self) -> GridsteadResult<()> {
        if self.min_room_size < 3 || self.max_room_size < self.min_room_size {
            return Err(GridsteadError::GenerationFailed(format!(
                "Invalid room size range {}..={}",
                self.min_room_size, self.max_room_size
            )));
        }

        if self.min_rooms == 0 || self.max_rooms < self.min_rooms {
            return Err(GridsteadError::GenerationFailed(format!(
                "Invalid room count range {}..={}",
                self.min_rooms, self.max_rooms
            )));
        }

        let smallest = self.min_room_size + 2;
        if self.map_size.x < smallest || self.map_size.y < smallest {
            return Err(GridsteadError::GenerationFailed(format!(
                "Map size {}x{} is too small",
                self.map_size.x, self.map_size.y
            )));
        }

        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// A rectangular room, walls included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Index of this room in its dungeon
    pub id: u32,
    /// Extent of the room including its wall ring
    pub bounds: RectI,
    /// Rooms joined to this one by a corridor
    pub connections: Vec<u32>,
}

impl Room {
    /// Creates a new room.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridstead::{Room, Vec2I};
    ///
    /// let room = Room::new(1, Vec2I::new(5, 5), Vec2I::new(10, 8));
    /// assert!(room.contains(Vec2I::new(7, 7)));
    /// assert!(!room.contains(Vec2I::new(20, 20)));
    /// ```
    pub fn new(id: u32, top_left: Vec2I, size: Vec2I) -> Self {
        Self {
            id,
            bounds: RectI::from_position_size(top_left, size),
            connections: Vec::new(),
        }
    }

    pub fn center(&self) -> Vec2I {
        let Vec2I { x, y } = self.bounds.position;
        Vec2I::new(x + self.bounds.size.x / 2, y + self.bounds.size.y / 2)
    }

    /// Number of floor cells inside the wall ring.
    pub fn inner_area(&self) -> u32 {
        self.interior().map_or(0, |inner| (inner.size.x * inner.size.y) as u32)
    }

    pub fn contains(&self, position: Vec2I) -> bool {
        self.bounds.contains(position)
    }

    pub fn is_border(&self, position: Vec2I) -> bool {
        self.contains(position) && !self.interior().is_some_and(|inner| inner.contains(position))
    }

    pub fn overlaps(&self, other: &Room) -> bool {
        self.bounds.intersection(&other.bounds).is_some()
    }

    fn interior(&self) -> Option<RectI> {
        let inner = RectI::from_min_max(
            self.bounds.min() + Vec2I::new(1, 1),
            self.bounds.max() - Vec2I::new(1, 1),
        );
        (!inner.is_empty()).then_some(inner)
    }

    /// Positions inside the wall ring, row by row.
    pub fn floor_positions(&self) -> Vec<Vec2I> {
        let Some(inner) = self.interior() else {
            return Vec::new();
        };
        let (min, max) = (inner.min(), inner.max());
        (min.y..max.y)
            .flat_map(|y| (min.x..max.x).map(move |x| Vec2I::new(x, y)))
            .collect()
    }

    pub fn add_connection(&mut self, room_id: u32) {
        if !self.connections.contains(&room_id) {
            self.connections.push(room_id);
        }
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> GridsteadResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> GridsteadResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Opens an L-shaped corridor between two cells.
    pub fn carve_l_corridor(map: &mut GridMap, start: Vec2I, end: Vec2I, horizontal_first: bool) {
        let corner = if horizontal_first {
            Vec2I::new(end.x, start.y)
        } else {
            Vec2I::new(start.x, end.y)
        };
        carve_line(map, start, corner);
        carve_line(map, corner, end);
    }

    /// Opens a straight horizontal or vertical run of cells, both ends included.
    fn carve_line(map: &mut GridMap, from: Vec2I, to: Vec2I) {
        for y in from.y.min(to.y)..=from.y.max(to.y) {
            for x in from.x.min(to.x)..=from.x.max(to.x) {
                map.set_empty(Vec2I::new(x, y));
            }
        }
    }

    /// Number of walkable cells.
    pub fn walkable_count(map: &GridMap) -> usize {
        map.positions().filter(|&p| map.walkable(p)).count()
    }

    /// Validates that a map meets basic requirements.
    pub fn validate_map(map: &GridMap, config: &GenerationConfig) -> GridsteadResult<()> {
        if map.size() != config.map_size {
            return Err(GridsteadError::GenerationFailed(format!(
                "Map is {:?}, expected {:?}",
                map.size(),
                config.map_size
            )));
        }

        if walkable_count(map) == 0 {
            return Err(GridsteadError::GenerationFailed("Map has no walkable cells".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellFlags;
    use std::collections::HashSet;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert!(config.validate().is_ok());
        assert!(GenerationConfig::for_testing(1).validate().is_ok());
    }

    #[test]
    fn test_invalid_configs() {
        let mut config = GenerationConfig::for_testing(1);
        config.min_room_size = 2;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::for_testing(1);
        config.map_size = Vec2I::new(4, 40);
        assert!(matches!(config.validate(), Err(GridsteadError::GenerationFailed(_))));
    }

    #[test]
    fn test_config_json() {
        let config = GenerationConfig::for_testing(99);
        let json = serde_json::to_string(&config).unwrap();
        let back: GenerationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_room_geometry() {
        let room = Room::new(1, Vec2I::new(5, 5), Vec2I::new(10, 8));

        assert_eq!(room.center(), Vec2I::new(10, 9));
        assert_eq!(room.inner_area(), 48);
        assert!(room.contains(Vec2I::new(5, 5)));
        assert!(room.contains(Vec2I::new(14, 12)));
        assert!(!room.contains(Vec2I::new(15, 12)));

        assert!(room.is_border(Vec2I::new(5, 5)));
        assert!(room.is_border(Vec2I::new(10, 5)));
        assert!(!room.is_border(Vec2I::new(7, 7)));
    }

    #[test]
    fn test_room_overlap() {
        let room1 = Room::new(1, Vec2I::new(5, 5), Vec2I::new(10, 8));
        let room2 = Room::new(2, Vec2I::new(10, 8), Vec2I::new(6, 6));
        let room3 = Room::new(3, Vec2I::new(20, 20), Vec2I::new(5, 5));

        assert!(room1.overlaps(&room2));
        assert!(room2.overlaps(&room1));
        assert!(!room1.overlaps(&room3));
    }

    #[test]
    fn test_floor_positions() {
        let room = Room::new(1, Vec2I::new(5, 5), Vec2I::new(4, 4));
        let floor: HashSet<_> = room.floor_positions().into_iter().collect();

        assert_eq!(floor.len(), 4);
        assert!(floor.iter().all(|&p| !room.is_border(p)));
        assert!(floor.contains(&room.center()));
    }

    #[test]
    fn test_room_connections() {
        let mut room = Room::new(1, Vec2I::new(0, 0), Vec2I::new(4, 4));
        room.add_connection(2);
        room.add_connection(2);
        room.add_connection(3);
        assert_eq!(room.connections, vec![2, 3]);
    }

    #[test]
    fn test_carve_l_corridor() {
        let mut map = GridMap::orthogonal(Vec2F::new(8.0, 8.0), Vec2I::new(10, 10));
        map.reset(CellFlags::empty());

        utils::carve_l_corridor(&mut map, Vec2I::new(1, 1), Vec2I::new(6, 4), true);
        assert!(map.walkable(Vec2I::new(1, 1)));
        assert!(map.walkable(Vec2I::new(6, 1)));
        assert!(map.walkable(Vec2I::new(6, 4)));
        assert!(!map.walkable(Vec2I::new(1, 4)));
        assert_eq!(utils::walkable_count(&map), 9);
    }
}
