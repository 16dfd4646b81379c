//! # Cave Generation
//!
//! Organic caverns on an orthogonal [`GridMap`].
//!
//! Cell density is Perlin noise mixed with a little white noise; cells below
//! the configured threshold start as walls. A few cellular-automaton passes
//! smooth the result, then every open region except the largest is filled so
//! the whole cave is reachable.

use super::{utils, GenerationConfig, Generator};
use crate::{Array2D, CellFlags, CellNeighborQuery, GridMap, GridsteadError, GridsteadResult, Vec2I};
use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::VecDeque;

/// Share of the density that comes from Perlin noise; the rest is white noise.
const NOISE_WEIGHT: f64 = 0.75;

/// Noise-based cave generator.
#[derive(Debug, Clone)]
pub struct CaveGenerator {
    /// Whether to keep only the largest connected open region
    pub keep_largest_region: bool,
}

impl CaveGenerator {
    pub fn new() -> Self {
        Self {
            keep_largest_region: true,
        }
    }

    fn seed_walls(&self, config: &GenerationConfig, rng: &mut StdRng) -> Array2D<bool> {
        let perlin = Perlin::new(rng.gen());
        let size = config.map_size;
        let mut walls = Array2D::new(size, true);

        for position in walls.positions().collect::<Vec<_>>() {
            let border = position.x == 0 || position.y == 0 || position.x == size.x - 1 || position.y == size.y - 1;
            let sample = perlin.get([
                position.x as f64 * config.noise_frequency,
                position.y as f64 * config.noise_frequency,
            ]);
            let density = NOISE_WEIGHT * (sample + 1.0) / 2.0 + (1.0 - NOISE_WEIGHT) * rng.gen::<f64>();

            if let Some(wall) = walls.get_mut(position) {
                *wall = border || density < config.wall_threshold;
            }
        }

        walls
    }

    /// One 4-5 rule pass: a cell with more than four wall neighbors becomes a
    /// wall, fewer than four becomes open. Outside the map counts as wall.
    fn smooth(&self, walls: &Array2D<bool>) -> Array2D<bool> {
        let size = walls.size();
        let mut next = walls.clone();

        for position in walls.positions() {
            let mut count = 0;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if (dx, dy) != (0, 0) && walls.get(position + Vec2I::new(dx, dy)).copied().unwrap_or(true) {
                        count += 1;
                    }
                }
            }

            let border = position.x == 0 || position.y == 0 || position.x == size.x - 1 || position.y == size.y - 1;
            if let Some(cell) = next.get_mut(position) {
                if border || count > 4 {
                    *cell = true;
                } else if count < 4 {
                    *cell = false;
                }
            }
        }

        next
    }

    /// Walls up every open cell outside the largest connected region.
    fn keep_largest(&self, map: &mut GridMap) {
        let mut region = Array2D::new(map.size(), usize::MAX);
        let mut sizes: Vec<usize> = Vec::new();

        for start in map.positions().collect::<Vec<_>>() {
            if !map.walkable(start) || region.get(start) != Some(&usize::MAX) {
                continue;
            }

            let id = sizes.len();
            let mut count = 0;
            let mut queue = VecDeque::from([start]);
            if let Some(cell) = region.get_mut(start) {
                *cell = id;
            }

            while let Some(position) = queue.pop_front() {
                count += 1;
                for neighbor in map.grid().compute_neighbors(position, CellNeighborQuery::VALID) {
                    if map.walkable(neighbor) && region.get(neighbor) == Some(&usize::MAX) {
                        if let Some(cell) = region.get_mut(neighbor) {
                            *cell = id;
                        }
                        queue.push_back(neighbor);
                    }
                }
            }
            sizes.push(count);
        }

        let Some(largest) = (0..sizes.len()).max_by_key(|&id| (sizes[id], std::cmp::Reverse(id))) else {
            return;
        };

        for position in map.positions().collect::<Vec<_>>() {
            let id = region.get(position).copied().unwrap_or(usize::MAX);
            if id != usize::MAX && id != largest {
                map.set_wall(position);
            }
        }

        log::debug!("Cave has {} regions, kept {} cells", sizes.len(), sizes[largest]);
    }
}

impl Generator<GridMap> for CaveGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> GridsteadResult<GridMap> {
        let size = config.map_size;
        if size.x < 3 || size.y < 3 {
            return Err(GridsteadError::GenerationFailed(format!(
                "Map size {}x{} is too small",
                size.x, size.y
            )));
        }

        let mut walls = self.seed_walls(config, rng);
        for _ in 0..config.smoothing_passes {
            walls = self.smooth(&walls);
        }

        let mut map = GridMap::orthogonal(config.tile_size, size);
        map.reset(CellFlags::empty());
        for position in walls.positions() {
            if walls.get(position) == Some(&false) {
                map.set_empty(position);
            }
        }

        if self.keep_largest_region {
            self.keep_largest(&mut map);
        }

        self.validate(&map, config)?;
        log::info!(
            "{} opened {} of {} cells",
            self.generator_type(),
            utils::walkable_count(&map),
            size.x * size.y
        );
        Ok(map)
    }

    fn validate(&self, map: &GridMap, config: &GenerationConfig) -> GridsteadResult<()> {
        utils::validate_map(map, config)
    }

    fn generator_type(&self) -> &'static str {
        "CaveGenerator"
    }
}

impl Default for CaveGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Route, RouteCost};

    fn generate(seed: u64) -> GridMap {
        let config = GenerationConfig::for_testing(seed);
        let mut rng = utils::create_rng(&config);
        CaveGenerator::new().generate(&config, &mut rng).unwrap()
    }

    #[test]
    fn test_border_is_wall() {
        let map = generate(5);
        let size = map.size();
        for position in map.positions() {
            let border = position.x == 0 || position.y == 0 || position.x == size.x - 1 || position.y == size.y - 1;
            if border {
                assert!(!map.walkable(position));
            }
        }
    }

    #[test]
    fn test_single_connected_region() {
        let map = generate(11);
        let open: Vec<Vec2I> = map.positions().filter(|&p| map.walkable(p)).collect();
        assert!(!open.is_empty());

        let cost = RouteCost::new(1.0, 0.0, 0.0);
        let first = open[0];
        for &other in open.iter().step_by(7) {
            assert!(!map.compute_route(first, other, cost, Route::Dijkstra).is_empty());
        }
    }

    #[test]
    fn test_same_seed_same_cave() {
        assert_eq!(generate(77), generate(77));
    }

    #[test]
    fn test_smoothing_fills_isolated_cells() {
        let generator = CaveGenerator::new();
        let mut walls = Array2D::new(Vec2I::new(5, 5), true);
        *walls.get_mut(Vec2I::new(2, 2)).unwrap() = false;

        let smoothed = generator.smooth(&walls);
        assert_eq!(smoothed.get(Vec2I::new(2, 2)), Some(&true));
    }

    #[test]
    fn test_solid_threshold_fails() {
        let mut config = GenerationConfig::for_testing(3);
        config.wall_threshold = 2.0;
        let mut rng = utils::create_rng(&config);
        assert!(matches!(
            CaveGenerator::new().generate(&config, &mut rng),
            Err(GridsteadError::GenerationFailed(_))
        ));
    }
}
