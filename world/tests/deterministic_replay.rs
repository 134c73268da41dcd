use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use wumpus_core::{Cave, Command, Event, GameStatus, HazardAbilities};
use wumpus_world::{self as world, query, GameConfig, World};

#[test]
fn identical_seeds_replay_identically() {
    for seed in [0_u64, 1, 0x42f0_e1eb_d4a5_3c21] {
        let first = replay(seed);
        let second = replay(seed);

        assert_eq!(first, second, "replay diverged for seed {seed:#x}");
        assert_eq!(first.fingerprint(), second.fingerprint());
    }
}

#[test]
fn different_seeds_eventually_diverge() {
    let baseline = replay(7).fingerprint();
    assert!(
        (8..40).any(|seed| replay(seed).fingerprint() != baseline),
        "every seed produced the same session"
    );
}

fn replay(seed: u64) -> ReplayOutcome {
    let config = GameConfig::default().with_seed(seed);
    let mut world = World::new(config).expect("default config is valid");
    let mut log = Vec::new();

    for round in 0..12_u32 {
        let command = scripted_command(&world, round);
        let mut events = Vec::new();
        world::apply(&mut world, command, &mut events);
        log.extend(events);

        if query::is_game_over(&world) {
            let mut events = Vec::new();
            world::apply(&mut world, Command::NewGame { initial_arrows: 5 }, &mut events);
            log.extend(events);
        }
    }

    ReplayOutcome {
        player: query::player_location(&world),
        arrows: query::arrows_remaining(&world),
        status: query::status(&world),
        message: query::message(&world).to_owned(),
        events: log,
    }
}

/// Alternates between walking to the first neighbour and firing into the last.
fn scripted_command(world: &World, round: u32) -> Command {
    let player = query::player_location(world);
    let neighbors = query::neighbors(world, player);

    if round % 3 == 2 {
        Command::Shoot {
            path: neighbors.last().copied().into_iter().collect(),
        }
    } else {
        Command::MovePlayer {
            destination: neighbors.first().copied().unwrap_or(player),
            abilities: HazardAbilities {
                planks: round % 2 == 0,
                bat_taxi: false,
            },
        }
    }
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    player: Cave,
    arrows: u32,
    status: GameStatus,
    message: String,
    events: Vec<Event>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.player.hash(&mut hasher);
        self.arrows.hash(&mut hasher);
        self.status.hash(&mut hasher);
        self.message.hash(&mut hasher);
        for event in &self.events {
            format!("{event:?}").hash(&mut hasher);
        }
        hasher.finish()
    }
}
