//! Generated maps driven through routing, vision and resource loading.

use gridstead::{
    decode_json, memory_loader, utils, CaveGenerator, GenerationConfig, Generator, MemoryLoader, Resource,
    ResourceManager, ResourceRegistry, Route, RouteCost, RoomCorridorGenerator, Vec2I,
};
use std::rc::Rc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_dungeon_rooms_reachable_from_spawn() {
    init_logging();
    for seed in [1, 17, 256, 9001] {
        let config = GenerationConfig::new(seed);
        let mut rng = utils::create_rng(&config);
        let dungeon = RoomCorridorGenerator::new().generate(&config, &mut rng).unwrap();

        for room in &dungeon.rooms {
            let route = dungeon
                .map
                .compute_route(dungeon.spawn, room.center(), RouteCost::default(), Route::AStar);
            assert_eq!(route.last(), Some(&room.center()), "seed {} room {}", seed, room.id);
        }
    }
}

#[test]
fn test_dungeon_vision_from_spawn() {
    init_logging();
    let config = GenerationConfig::for_testing(31);
    let mut rng = utils::create_rng(&config);
    let mut dungeon = RoomCorridorGenerator::new().generate(&config, &mut rng).unwrap();

    dungeon.map.compute_field_of_vision(dungeon.spawn, 4);
    let spawn_room = &dungeon.rooms[0];

    // Rooms are convex, so the whole floor of the spawn room within range is seen
    for position in spawn_room.floor_positions() {
        if position.chebyshev_distance(dungeon.spawn) <= 4 {
            assert!(dungeon.map.visible(position), "{:?}", position);
        }
    }
}

#[test]
fn test_caves_for_several_seeds() {
    init_logging();
    for seed in 0..5 {
        let config = GenerationConfig::for_testing(seed);
        let mut rng = utils::create_rng(&config);
        let map = CaveGenerator::new().generate(&config, &mut rng).unwrap();

        assert_eq!(map.size(), config.map_size);
        assert!(utils::walkable_count(&map) > 0);
    }
}

#[test]
fn test_generators_differ_by_seed() {
    let generate = |seed| {
        let config = GenerationConfig::for_testing(seed);
        let mut rng = utils::create_rng(&config);
        RoomCorridorGenerator::new().generate(&config, &mut rng).unwrap().map
    };

    assert_eq!(generate(8), generate(8));
    assert_ne!(generate(8), generate(9));
}

/// Level definition stored as JSON.
#[derive(Debug, Clone)]
struct Level(GenerationConfig);

impl Resource for Level {
    type Context = ();
}

#[test]
fn test_config_loaded_as_resource() {
    init_logging();
    let mut memory = MemoryLoader::new();
    memory.add_memory(
        "levels/crypt.json",
        serde_json::to_vec(&GenerationConfig {
            map_size: Vec2I::new(30, 20),
            ..GenerationConfig::for_testing(64)
        })
        .unwrap(),
    );

    let mut manager = ResourceManager::new();
    manager.add_registry(ResourceRegistry::<Level>::with_loader(memory_loader::<Level, _>(
        Rc::new(memory),
        |bytes, _| Ok(Level(decode_json(bytes)?)),
    )));

    let Level(config) = manager.acquire::<Level>("levels/crypt.json").clone();
    assert_eq!(config.seed, 64);

    let mut rng = utils::create_rng(&config);
    let dungeon = RoomCorridorGenerator::new().generate(&config, &mut rng).unwrap();
    assert_eq!(dungeon.map.size(), Vec2I::new(30, 20));

    manager.unload::<Level>("levels/crypt.json");
    assert!(!manager.loaded::<Level>("levels/crypt.json"));
}
