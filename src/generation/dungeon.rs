//! # Dungeon Generation
//!
//! Room-and-corridor layouts on an orthogonal [`GridMap`].
//!
//! The map starts as solid wall. Rooms are placed at random without
//! overlapping, their interiors are opened, consecutive rooms are joined by
//! L-shaped corridors and a few extra corridors add loops. Connectivity is
//! checked with the router before the dungeon is returned.

use super::{utils, GenerationConfig, Generator, Room};
use crate::{CellFlags, GridMap, GridsteadError, GridsteadResult, Route, RouteCost, Vec2I};
use rand::rngs::StdRng;
use rand::Rng;

/// A generated dungeon.
#[derive(Debug, Clone)]
pub struct Dungeon {
    pub map: GridMap,
    pub rooms: Vec<Room>,
    /// Starting cell, the center of the first room
    pub spawn: Vec2I,
}

/// Room-and-corridor dungeon generator.
#[derive(Debug, Clone)]
pub struct RoomCorridorGenerator {
    /// Whether to reject dungeons whose rooms are not all connected
    pub ensure_connectivity: bool,
}

impl RoomCorridorGenerator {
    /// Creates a new dungeon generator with default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridstead::{utils, GenerationConfig, Generator, RoomCorridorGenerator};
    ///
    /// let config = GenerationConfig::for_testing(3);
    /// let mut rng = utils::create_rng(&config);
    /// let dungeon = RoomCorridorGenerator::new().generate(&config, &mut rng).unwrap();
    /// assert!(dungeon.map.walkable(dungeon.spawn));
    /// ```
    pub fn new() -> Self {
        Self {
            ensure_connectivity: true,
        }
    }

    fn place_rooms(&self, map: &mut GridMap, config: &GenerationConfig, rng: &mut StdRng) -> GridsteadResult<Vec<Room>> {
        let mut rooms: Vec<Room> = Vec::new();
        let room_count = rng.gen_range(config.min_rooms..=config.max_rooms);

        for _ in 0..room_count {
            let id = rooms.len() as u32;
            if let Some(room) = self.try_place_room(map, config, rng, id, &rooms) {
                for position in room.floor_positions() {
                    map.set_empty(position);
                }
                rooms.push(room);
            }
        }

        if rooms.is_empty() {
            return Err(GridsteadError::GenerationFailed("Failed to place any rooms".to_string()));
        }

        Ok(rooms)
    }

    fn try_place_room(
        &self,
        map: &GridMap,
        config: &GenerationConfig,
        rng: &mut StdRng,
        id: u32,
        existing: &[Room],
    ) -> Option<Room> {
        let size = map.size();

        for _ in 0..config.max_placement_attempts {
            let room_size = Vec2I::new(
                rng.gen_range(config.min_room_size..=config.max_room_size),
                rng.gen_range(config.min_room_size..=config.max_room_size),
            );

            // Keep a one-cell margin around the map edge
            let max = size - room_size - Vec2I::new(1, 1);
            if max.x < 1 || max.y < 1 {
                continue;
            }

            let top_left = Vec2I::new(rng.gen_range(1..=max.x), rng.gen_range(1..=max.y));
            let room = Room::new(id, top_left, room_size);

            if !existing.iter().any(|other| room.overlaps(other)) {
                return Some(room);
            }
        }

        log::debug!("Gave up placing room {} after {} attempts", id, config.max_placement_attempts);
        None
    }

    fn connect_rooms(&self, map: &mut GridMap, rooms: &mut [Room], config: &GenerationConfig, rng: &mut StdRng) {
        if rooms.len() < 2 {
            return;
        }

        for i in 0..rooms.len() - 1 {
            self.join(map, rooms, i, i + 1, rng);
        }

        let extra_connections = (rooms.len() as f64 * config.extra_connection_chance).round() as usize;
        for _ in 0..extra_connections {
            let a = rng.gen_range(0..rooms.len());
            let b = rng.gen_range(0..rooms.len());
            if a != b {
                self.join(map, rooms, a, b, rng);
            }
        }
    }

    fn join(&self, map: &mut GridMap, rooms: &mut [Room], a: usize, b: usize, rng: &mut StdRng) {
        utils::carve_l_corridor(map, rooms[a].center(), rooms[b].center(), rng.gen_bool(0.5));

        let (id_a, id_b) = (rooms[a].id, rooms[b].id);
        rooms[a].add_connection(id_b);
        rooms[b].add_connection(id_a);
    }

    /// Checks that every room center can be reached from the first room.
    fn validate_connectivity(&self, map: &GridMap, rooms: &[Room]) -> GridsteadResult<()> {
        let Some((first, others)) = rooms.split_first() else {
            return Ok(());
        };

        let cost = RouteCost::new(1.0, 0.0, 0.0);
        for room in others {
            if map.compute_route(first.center(), room.center(), cost, Route::AStar).is_empty() {
                return Err(GridsteadError::GenerationFailed(format!(
                    "Room {} is not connected to room {}",
                    room.id, first.id
                )));
            }
        }

        Ok(())
    }
}

impl Generator<Dungeon> for RoomCorridorGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> GridsteadResult<Dungeon> {
        config.validate()?;

        let mut map = GridMap::orthogonal(config.tile_size, config.map_size);
        map.reset(CellFlags::empty());

        let mut rooms = self.place_rooms(&mut map, config, rng)?;
        self.connect_rooms(&mut map, &mut rooms, config, rng);

        let dungeon = Dungeon {
            spawn: rooms[0].center(),
            map,
            rooms,
        };
        self.validate(&dungeon, config)?;

        log::info!(
            "{} generated {} rooms, {} walkable cells",
            self.generator_type(),
            dungeon.rooms.len(),
            utils::walkable_count(&dungeon.map)
        );
        Ok(dungeon)
    }

    fn validate(&self, dungeon: &Dungeon, config: &GenerationConfig) -> GridsteadResult<()> {
        utils::validate_map(&dungeon.map, config)?;

        if !dungeon.map.walkable(dungeon.spawn) {
            return Err(GridsteadError::GenerationFailed(format!(
                "Spawn {:?} is not walkable",
                dungeon.spawn
            )));
        }

        if self.ensure_connectivity {
            self.validate_connectivity(&dungeon.map, &dungeon.rooms)?;
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "RoomCorridorGenerator"
    }
}

impl Default for RoomCorridorGenerator {
    fn default() -> Self {
        Self::new()
    }
}
