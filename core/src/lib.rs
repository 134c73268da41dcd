#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Hunt the Wumpus engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing the player's intent, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values that systems such
//! as the ability economy react to. Outcomes are carried by tagged enums so
//! callers can branch exhaustively instead of matching on message text.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Hunt the Wumpus!";

/// Identifier of a single cave. Caves are numbered from one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cave(u32);

impl Cave {
    /// Creates a new cave identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Cave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Abilities the player currently holds when a hazard is resolved.
///
/// The world never tracks ability charges itself. Callers pass these flags in
/// and settle their own counters from the returned [`HazardOutcome`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HazardAbilities {
    /// Wooden planks are available to bridge a pit.
    pub planks: bool,
    /// The bat taxi service is available when bats snatch the player.
    pub bat_taxi: bool,
}

impl HazardAbilities {
    /// No abilities available.
    pub const NONE: Self = Self {
        planks: false,
        bat_taxi: false,
    };
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Discards the current session and places a fresh cave system.
    NewGame {
        /// Number of arrows the player starts with.
        initial_arrows: u32,
    },
    /// Requests that the player walk into an adjacent cave.
    MovePlayer {
        /// Cave the player wants to enter.
        destination: Cave,
        /// Abilities available should the destination hold a hazard.
        abilities: HazardAbilities,
    },
    /// Fires an arrow along the provided trajectory.
    Shoot {
        /// Ordered caves the arrow should travel through.
        path: Vec<Cave>,
    },
    /// Places the player directly into any cave, then re-checks hazards.
    ForceRelocate {
        /// Cave the player is dropped into.
        destination: Cave,
        /// Abilities available should the destination hold a hazard.
        abilities: HazardAbilities,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a new session started.
    GameStarted {
        /// Cave the player starts in.
        player: Cave,
        /// Arrows granted for the session.
        arrows: u32,
    },
    /// Confirms that the player walked between two adjacent caves.
    PlayerMoved {
        /// Cave the player occupied before moving.
        from: Cave,
        /// Cave the player occupies after the move.
        to: Cave,
    },
    /// Confirms that the player was placed directly into a cave.
    PlayerRelocated {
        /// Cave the player occupied before the relocation.
        from: Cave,
        /// Cave the player was dropped into.
        to: Cave,
    },
    /// Reports that bats carried the player off to a random cave.
    PlayerCarried {
        /// Cave holding the bats.
        from: Cave,
        /// Cave the bats dropped the player into.
        to: Cave,
    },
    /// Reports how the hazard in the player's cave was resolved.
    HazardResolved {
        /// Cave whose hazard was checked.
        cave: Cave,
        /// Outcome tag callers use to settle ability counters.
        outcome: HazardOutcome,
    },
    /// Confirms that an arrow left the quiver.
    ArrowFired {
        /// Arrows left after the shot.
        remaining: u32,
    },
    /// Reports how a shot was resolved.
    ShotResolved {
        /// Outcome of the shot.
        outcome: ShotOutcome,
    },
    /// Reports that a missed shot woke the Wumpus and it moved.
    WumpusRelocated {
        /// Cave the Wumpus slept in.
        from: Cave,
        /// Cave the Wumpus moved into.
        to: Cave,
    },
    /// Reports that a command was refused without changing state.
    ActionRejected {
        /// Specific reason the command was refused.
        reason: ActionError,
    },
    /// Announces that the session reached a terminal state.
    GameEnded {
        /// How the session ended.
        end: GameEnd,
    },
}

/// Result of checking the player's cave for hazards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardOutcome {
    /// Nothing dangerous happened, or bats carried the player off.
    None,
    /// A pit was crossed using planks; the caller spends one plank charge.
    PlanksUsed,
    /// Bats offer a taxi; the caller spends one charge and picks a destination.
    TaxiAvailable,
    /// The hazard ended the game.
    Terminal,
}

impl HazardOutcome {
    /// Reports whether the outcome ended the game.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Terminal)
    }
}

/// Result of firing an arrow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotOutcome {
    /// The arrow struck the Wumpus.
    Hit,
    /// The arrow looped back into the player's cave.
    SelfInflicted,
    /// The path contained an illegal step and the arrow hit nothing.
    Veered,
    /// The arrow completed its path without hitting anything.
    Missed {
        /// Whether the noise woke the Wumpus and it changed caves.
        wumpus_moved: bool,
    },
    /// The quiver was already empty.
    NoArrows,
}

/// Reason a session reached its terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEnd {
    /// The player shot the Wumpus.
    WumpusKilled,
    /// The player walked into the Wumpus.
    EatenByWumpus,
    /// The player fell into a pit without planks.
    FellIntoPit,
    /// The player's own arrow came back around.
    ShotSelf,
    /// The quiver ran dry.
    OutOfArrows,
}

impl GameEnd {
    /// Reports whether the session ended in the player's favour.
    #[must_use]
    pub const fn is_victory(self) -> bool {
        matches!(self, Self::WumpusKilled)
    }
}

/// Lifecycle of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Commands are accepted.
    Active,
    /// The session is over; only a new game may proceed.
    Over(GameEnd),
}

impl GameStatus {
    /// Reports whether the session has ended.
    #[must_use]
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Over(_))
    }
}

/// Sensory cue produced by a hazard in a neighbouring cave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// The Wumpus sleeps next door.
    WumpusNearby,
    /// A pit lies next door.
    Breeze,
    /// Bats roost next door.
    BatsNearby,
}

impl Cue {
    /// Text shown to the player for the cue.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::WumpusNearby => "I smell a Wumpus!",
            Self::Breeze => "I feel a breeze.",
            Self::BatsNearby => "I hear bats.",
        }
    }
}

/// Contents of a cave as reported by a radar scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    /// The Wumpus.
    Wumpus,
    /// A bottomless pit.
    Pit,
    /// Giant bats.
    Bats,
    /// Nothing.
    Empty,
}

/// Consumable abilities sold in the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    /// Reveals the contents of any cave.
    Radar,
    /// Bridges one pit.
    Planks,
    /// Lets the player choose where the bats drop them.
    BatTaxi,
}

impl Ability {
    /// Human readable name of the ability.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Radar => "radar",
            Self::Planks => "planks",
            Self::BatTaxi => "bat taxi",
        }
    }
}

/// Reasons a command may be refused by the world.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionError {
    /// The session already ended.
    #[error("the game is over")]
    GameOver,
    /// The destination is not adjacent to the player's cave.
    #[error("cave {to} is not connected to cave {from}")]
    NotConnected {
        /// Cave the player occupies.
        from: Cave,
        /// Requested destination.
        to: Cave,
    },
    /// A shot was requested without any trajectory.
    #[error("an arrow path needs at least one cave")]
    EmptyPath,
    /// The command named a cave that does not exist.
    #[error("cave {cave} does not exist")]
    UnknownCave {
        /// Offending identifier.
        cave: Cave,
    },
}

#[cfg(test)]
mod tests {
    use super::{ActionError, Cave, GameEnd, GameStatus, HazardOutcome, ShotOutcome};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn cave_round_trips_through_bincode() {
        assert_round_trip(&Cave::new(17));
    }

    #[test]
    fn shot_outcome_round_trips_through_bincode() {
        assert_round_trip(&ShotOutcome::Missed { wumpus_moved: true });
    }

    #[test]
    fn action_error_round_trips_through_bincode() {
        assert_round_trip(&ActionError::NotConnected {
            from: Cave::new(6),
            to: Cave::new(8),
        });
    }

    #[test]
    fn action_error_messages_name_caves() {
        let error = ActionError::NotConnected {
            from: Cave::new(6),
            to: Cave::new(8),
        };
        assert_eq!(error.to_string(), "cave 8 is not connected to cave 6");
        assert_eq!(
            ActionError::UnknownCave { cave: Cave::new(21) }.to_string(),
            "cave 21 does not exist"
        );
    }

    #[test]
    fn only_terminal_hazard_outcome_is_terminal() {
        assert!(HazardOutcome::Terminal.is_terminal());
        assert!(!HazardOutcome::PlanksUsed.is_terminal());
        assert!(!HazardOutcome::TaxiAvailable.is_terminal());
        assert!(!HazardOutcome::None.is_terminal());
    }

    #[test]
    fn only_wumpus_kill_is_victory() {
        assert!(GameEnd::WumpusKilled.is_victory());
        assert!(!GameEnd::ShotSelf.is_victory());
        assert!(GameStatus::Over(GameEnd::OutOfArrows).is_over());
        assert!(!GameStatus::Active.is_over());
    }
}
