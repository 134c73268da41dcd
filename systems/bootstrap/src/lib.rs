#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Hunt the Wumpus experience.

use wumpus_core::{Cave, Cue};
use wumpus_world::{query, World};

const INSTRUCTIONS: &str = "\
Objective: hunt down the Wumpus without falling into pits or being carried off by bats.
Move into a connected cave, or shoot an arrow through up to five connected caves.
Kill the Wumpus to earn currency and spend it on radar, planks or the bat taxi.";

/// Produces data required to greet the player and describe their surroundings.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Rules summary shown beneath the banner.
    #[must_use]
    pub const fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    /// Captures what the player can currently observe.
    #[must_use]
    pub fn surroundings(&self, world: &World) -> Surroundings {
        let cave = query::player_location(world);
        Surroundings {
            cave,
            exits: query::neighbors(world, cave).to_vec(),
            arrows: query::arrows_remaining(world),
            cues: query::perceive(world),
        }
    }
}

/// Presentation snapshot of the player's position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surroundings {
    /// Cave the player occupies.
    pub cave: Cave,
    /// Caves reachable in one move.
    pub exits: Vec<Cave>,
    /// Arrows left in the quiver.
    pub arrows: u32,
    /// Sensory cues from neighbouring caves.
    pub cues: Vec<Cue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wumpus_world::{GameConfig, Placement};

    #[test]
    fn surroundings_reflect_the_player_cave() {
        let placement = Placement {
            wumpus: Cave::new(1),
            pits: [Cave::new(11), Cave::new(20)],
            bats: [Cave::new(3), Cave::new(4)],
            player: Cave::new(6),
        };
        let world = World::from_placement(GameConfig::default().with_seed(5), placement)
            .expect("layout fits the grid");

        let surroundings = Bootstrap.surroundings(&world);

        assert_eq!(surroundings.cave, Cave::new(6));
        assert_eq!(
            surroundings.exits,
            vec![Cave::new(1), Cave::new(11), Cave::new(7)]
        );
        assert_eq!(surroundings.arrows, 5);
        assert_eq!(surroundings.cues, vec![Cue::WumpusNearby, Cue::Breeze]);
    }

    #[test]
    fn banner_greets_the_player() {
        let world = World::new(GameConfig::default().with_seed(8)).expect("valid config");
        assert_eq!(
            Bootstrap.welcome_banner(&world),
            "Welcome to Hunt the Wumpus!"
        );
        assert!(Bootstrap.instructions().starts_with("Objective:"));
    }
}
