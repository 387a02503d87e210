use std::collections::BTreeSet;

use game_core::{
    CardinalDirection, GameConfig, GameEngine, GameEvent, MonsterCatalog, MonsterTemplate,
    PlayerAction, PlayerConfig, Position, TurnError, World, parse_level,
};

fn catalog_with(extra: &[MonsterTemplate]) -> MonsterCatalog {
    let mut catalog = MonsterCatalog::default();
    for template in extra {
        catalog.insert(template.clone()).unwrap();
    }
    catalog
}

fn single_level(rows: &[&str], catalog: &MonsterCatalog, player: &PlayerConfig) -> World {
    let level = parse_level("one", rows, catalog, 10).unwrap();
    World::new([level], "one", player).unwrap()
}

fn brute(strength: i32) -> MonsterTemplate {
    MonsterTemplate {
        name: "Brute".to_string(),
        glyph: 'B',
        hp: 40,
        strength,
        speed: 1.0,
        sight_range: 0,
    }
}

fn seen_tiles(world: &World) -> BTreeSet<(String, Position)> {
    let mut seen = BTreeSet::new();
    for name in world.level_names() {
        let Some(level) = world.level(name) else { continue };
        for (y, row) in level.rows().iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                if tile.seen {
                    seen.insert((name.to_string(), Position::new(x as i32, y as i32)));
                }
            }
        }
    }
    seen
}

#[test]
fn lethal_hit_ends_the_simulation() {
    let catalog = catalog_with(&[brute(25)]);
    let mut world = single_level(&["#####", "#@B.#", "#####"], &catalog, &PlayerConfig::default());

    let err = GameEngine::new(&mut world)
        .step(PlayerAction::Search)
        .unwrap_err();

    assert_eq!(
        err,
        TurnError::PlayerDead {
            killer: "Brute".to_string(),
            hp: -5,
        }
    );
    assert_eq!(world.player().character.hp, -5);
    assert_eq!(world.current_level().last_event(), GameEvent::Hit);
}

#[test]
fn portal_moves_the_player_to_another_level() {
    let catalog = MonsterCatalog::default();
    let one = parse_level("one", &[".@..", "...."], &catalog, 10).unwrap();
    let two_rows = vec!["......."; 7];
    let two = parse_level("two", &two_rows, &catalog, 10).unwrap();
    let mut world = World::new([one, two], "one", &PlayerConfig::default()).unwrap();
    world
        .add_portal("one", Position::new(0, 0), "two", Position::new(5, 5))
        .unwrap();

    let report = GameEngine::new(&mut world)
        .step(PlayerAction::Move(CardinalDirection::Left))
        .unwrap();

    assert_eq!(report.level, "two");
    assert_eq!(report.event, GameEvent::Portal);
    assert_eq!(world.current_level_name(), "two");
    assert_eq!(world.player().position(), Position::new(5, 5));
    let snapshot = world.snapshot();
    assert_eq!(snapshot.level, "two");
    assert_eq!(snapshot.player.position, Position::new(5, 5));
    assert!(snapshot.tile(Position::new(5, 5)).is_some_and(|t| t.visible));
}

#[test]
fn portals_only_work_one_way() {
    let catalog = MonsterCatalog::default();
    let one = parse_level("one", &[".@.."], &catalog, 10).unwrap();
    let two = parse_level("two", &["...."], &catalog, 10).unwrap();
    let mut world = World::new([one, two], "one", &PlayerConfig::default()).unwrap();
    world
        .add_portal("one", Position::new(0, 0), "two", Position::new(2, 0))
        .unwrap();

    let mut engine = GameEngine::new(&mut world);
    engine.step(PlayerAction::Move(CardinalDirection::Left)).unwrap();
    engine.step(PlayerAction::Move(CardinalDirection::Left)).unwrap();
    engine.step(PlayerAction::Move(CardinalDirection::Right)).unwrap();

    assert_eq!(world.current_level_name(), "two");
    assert_eq!(world.player().position(), Position::new(2, 0));
}

#[test]
fn occupied_arrival_tile_blocks_the_portal() {
    let catalog = MonsterCatalog::default();
    let one = parse_level("one", &[".@.."], &catalog, 10).unwrap();
    let two = parse_level("two", &["#R.."], &catalog, 10).unwrap();
    let mut world = World::new([one, two], "one", &PlayerConfig::default()).unwrap();
    world
        .add_portal("one", Position::new(0, 0), "two", Position::new(1, 0))
        .unwrap();

    let report = GameEngine::new(&mut world)
        .step(PlayerAction::Move(CardinalDirection::Left))
        .unwrap();

    assert_eq!(report.level, "one");
    assert_eq!(report.event, GameEvent::Move);
    assert_eq!(world.player().position(), Position::ORIGIN);
    assert_eq!(
        report.message.as_deref(),
        Some("Something blocks the way to two")
    );
}

#[test]
fn portal_registration_validates_endpoints() {
    let catalog = MonsterCatalog::default();
    let one = parse_level("one", &[".@.."], &catalog, 10).unwrap();
    let mut world = World::new([one], "one", &PlayerConfig::default()).unwrap();
    assert!(
        world
            .add_portal("one", Position::new(0, 0), "nowhere", Position::ORIGIN)
            .is_err()
    );
    assert!(
        world
            .add_portal("one", Position::new(9, 0), "one", Position::ORIGIN)
            .is_err()
    );
}

#[test]
fn rat_runs_two_tiles_then_bites() {
    let mut world = single_level(&["@....R"], &MonsterCatalog::default(), &PlayerConfig::default());
    let mut engine = GameEngine::new(&mut world);

    engine.step(PlayerAction::Search).unwrap();
    assert!(engine.world().current_level().monster_at(Position::new(3, 0)).is_some());

    engine.step(PlayerAction::Search).unwrap();
    assert!(engine.world().current_level().monster_at(Position::new(1, 0)).is_some());

    let report = engine.step(PlayerAction::Search).unwrap();
    assert_eq!(report.event, GameEvent::Hit);
    assert_eq!(report.message.as_deref(), Some("Rat attacked Dralanor for 5"));
    assert_eq!(world.player().character.hp, 15);
    let rat = world.current_level().monster_at(Position::new(1, 0)).unwrap();
    assert_eq!(rat.character.ap, 1.0);
}

#[test]
fn slow_monster_moves_every_other_turn() {
    let snail = MonsterTemplate {
        name: "Snail".to_string(),
        glyph: 'N',
        hp: 5,
        strength: 1,
        speed: 0.5,
        sight_range: 0,
    };
    let catalog = catalog_with(&[snail]);
    let mut world = single_level(&["@...N"], &catalog, &PlayerConfig::default());
    let mut engine = GameEngine::new(&mut world);

    let expected = [4, 3, 3, 2, 2, 1];
    for x in expected {
        engine.step(PlayerAction::Search).unwrap();
        assert!(
            engine.world().current_level().monster_at(Position::new(x, 0)).is_some(),
            "snail should be at x={x} on turn {}",
            engine.world().turn()
        );
    }
}

#[test]
fn adjacent_monster_banks_at_most_one_turn_of_action_points() {
    let ferret = MonsterTemplate {
        name: "Ferret".to_string(),
        glyph: 'F',
        hp: 30,
        strength: 1,
        speed: 2.0,
        sight_range: 0,
    };
    let catalog = catalog_with(&[ferret]);
    let mut world = single_level(&["@F."], &catalog, &PlayerConfig::default());
    let mut engine = GameEngine::new(&mut world);

    let mut banked = Vec::new();
    for _ in 0..5 {
        let report = engine.step(PlayerAction::Search).unwrap();
        assert_eq!(report.event, GameEvent::Hit);
        let ferret = engine.world().current_level().monster_at(Position::new(1, 0)).unwrap();
        banked.push(ferret.character.ap);
    }

    assert_eq!(banked, vec![1.0, 2.0, 2.0, 2.0, 2.0]);
    assert_eq!(world.player().character.hp, 15);
}

#[test]
fn huge_sight_range_is_rejected_by_config_and_clipped_by_the_world() {
    let player = PlayerConfig {
        sight_range: i32::MAX,
        ..PlayerConfig::default()
    };
    assert!(GameConfig::default().with_player(player.clone()).validate().is_err());

    let world = single_level(&["#...", ".@..", "...."], &MonsterCatalog::default(), &player);
    assert_eq!(world.snapshot().visible_positions().count(), 12);
}

#[test]
fn unreachable_monster_passes_and_forfeits_its_accrual() {
    let mut world = single_level(&["@|R"], &MonsterCatalog::default(), &PlayerConfig::default());
    GameEngine::new(&mut world).step(PlayerAction::Search).unwrap();

    let rat = world.current_level().monster_at(Position::new(2, 0)).unwrap();
    assert_eq!(rat.character.ap, 0.0);
    assert_eq!(world.player().character.hp, 20);
}

#[test]
fn player_kills_a_rat_in_three_blows() {
    let mut world = single_level(&["@R.."], &MonsterCatalog::default(), &PlayerConfig::default());
    let mut engine = GameEngine::new(&mut world);

    for _ in 0..2 {
        engine.step(PlayerAction::Move(CardinalDirection::Right)).unwrap();
        assert_eq!(engine.world().player().position(), Position::ORIGIN);
    }
    let report = engine.step(PlayerAction::Move(CardinalDirection::Right)).unwrap();

    assert_eq!(report.event, GameEvent::Attack);
    assert_eq!(report.message.as_deref(), Some("Dralanor killed Rat"));
    assert!(world.current_level().monsters().is_empty());
    assert_eq!(world.player().character.hp, 10);
}

#[test]
fn bumping_a_closed_door_opens_it_without_moving() {
    let mut world = single_level(
        &["#######", "#@|...#", "#######"],
        &MonsterCatalog::default(),
        &PlayerConfig::default(),
    );
    let before: BTreeSet<Position> = world.snapshot().visible_positions().collect();
    assert!(!before.contains(&Position::new(4, 1)));

    let report = GameEngine::new(&mut world)
        .step(PlayerAction::Move(CardinalDirection::Right))
        .unwrap();

    assert_eq!(report.event, GameEvent::DoorOpen);
    assert_eq!(world.player().position(), Position::new(1, 1));
    let after: BTreeSet<Position> = world.snapshot().visible_positions().collect();
    assert!(after.is_superset(&before));
    assert!(after.contains(&Position::new(4, 1)));
}

#[test]
fn walls_waste_the_step() {
    let mut world = single_level(
        &["###", "#@#", "###"],
        &MonsterCatalog::default(),
        &PlayerConfig::default(),
    );
    let report = GameEngine::new(&mut world)
        .step(PlayerAction::Move(CardinalDirection::Up))
        .unwrap();
    assert_eq!(report.event, GameEvent::None);
    assert_eq!(world.player().position(), Position::new(1, 1));
    assert_eq!(world.turn(), 1);
}

#[test]
fn occupancy_and_seen_invariants_hold_every_turn() {
    let rows = [
        "############",
        "#@.....#...#",
        "#..R...|.S.#",
        "#....#.#...#",
        "#.S..#.#.R.#",
        "#..R.....R.#",
        "############",
    ];
    let player = PlayerConfig {
        hp: 1_000_000,
        strength: 1,
        ..PlayerConfig::default()
    };
    let mut world = single_level(&rows, &MonsterCatalog::default(), &player);
    let script = [
        PlayerAction::Move(CardinalDirection::Right),
        PlayerAction::Move(CardinalDirection::Down),
        PlayerAction::Search,
        PlayerAction::Move(CardinalDirection::Right),
        PlayerAction::Move(CardinalDirection::Right),
        PlayerAction::Move(CardinalDirection::Up),
        PlayerAction::Move(CardinalDirection::Left),
        PlayerAction::Move(CardinalDirection::Down),
    ];

    let mut previously_seen = seen_tiles(&world);
    let mut engine = GameEngine::new(&mut world);
    for turn in 0..80 {
        engine.step(script[turn % script.len()]).unwrap();

        let world = engine.world();
        let level = world.current_level();
        let player_at = world.player().position();
        assert!(level.occupancy_consistent(player_at), "turn {turn}");
        for position in level.monsters().keys() {
            assert!(level.tile(*position).is_some_and(|t| !t.terrain.is_solid()));
        }

        let seen = seen_tiles(world);
        assert!(seen.is_superset(&previously_seen), "seen shrank on turn {turn}");
        previously_seen = seen;
    }
}
