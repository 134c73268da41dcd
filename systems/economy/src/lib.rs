#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that tracks currency and consumable ability charges.
//!
//! The world never knows which abilities the player owns. This system turns
//! its ledger into the [`HazardAbilities`] flags carried by movement commands
//! and settles the ledger from the outcome tags the world broadcasts.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wumpus_core::{Ability, Cave, Command, Event, HazardAbilities, HazardOutcome, Occupant};

/// Price and yield of a single store item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    /// Currency deducted per purchase.
    pub price: u32,
    /// Charges granted per purchase.
    pub charges: u32,
}

impl Offer {
    /// Creates a new store offer.
    #[must_use]
    pub const fn new(price: u32, charges: u32) -> Self {
        Self { price, charges }
    }
}

/// Items sold in the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Store {
    /// Radar scans.
    pub radar: Offer,
    /// Wooden planks.
    pub planks: Offer,
    /// Bat taxi rides.
    pub bat_taxi: Offer,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            radar: Offer::new(50, 2),
            planks: Offer::new(75, 1),
            bat_taxi: Offer::new(60, 1),
        }
    }
}

impl Store {
    /// Offer for the given ability.
    #[must_use]
    pub const fn offer(&self, ability: Ability) -> Offer {
        match ability {
            Ability::Radar => self.radar,
            Ability::Planks => self.planks,
            Ability::BatTaxi => self.bat_taxi,
        }
    }
}

/// Currency paid out for killing the Wumpus.
///
/// The payout shrinks by `move_penalty` for every move attempted during the
/// session but never drops below `minimum`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reward {
    /// Payout for a kill without moving.
    pub base: u32,
    /// Deduction per move attempt.
    pub move_penalty: u32,
    /// Lowest possible payout.
    pub minimum: u32,
}

impl Default for Reward {
    fn default() -> Self {
        Self {
            base: 100,
            move_penalty: 2,
            minimum: 10,
        }
    }
}

impl Reward {
    /// Payout after `moves` move attempts.
    #[must_use]
    pub fn for_moves(&self, moves: u32) -> u32 {
        self.base
            .saturating_sub(moves.saturating_mul(self.move_penalty))
            .max(self.minimum)
    }
}

/// Configuration parameters required to construct the economy system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Store prices and yields.
    pub store: Store,
    /// Victory payout.
    pub reward: Reward,
    /// Keep the currency balance when a new game starts.
    pub carry_currency: bool,
}

/// Reasons a ledger operation may be refused.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum EconomyError {
    /// The balance does not cover the price.
    #[error("not enough currency to buy {}: costs {price}, balance {balance}", .ability.label())]
    InsufficientFunds {
        /// Ability the player tried to buy.
        ability: Ability,
        /// Price of the ability.
        price: u32,
        /// Balance at the time of the attempt.
        balance: u32,
    },
    /// No charges of the ability are left.
    #[error("no {} uses left", .ability.label())]
    NoCharges {
        /// Ability the player tried to use.
        ability: Ability,
    },
    /// The bats have not offered a ride.
    #[error("the bats have not offered a taxi ride")]
    NoTaxiPending,
    /// The scanned cave is not part of the cave system.
    #[error("cave {cave} does not exist")]
    UnknownCave {
        /// Cave the player tried to scan.
        cave: Cave,
    },
}

/// Contents of a cave revealed by a radar scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadarReport {
    /// Scanned cave.
    pub cave: Cave,
    /// What the cave holds.
    pub occupant: Occupant,
}

impl fmt::Display for RadarReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let contents = match self.occupant {
            Occupant::Wumpus => "Wumpus is there!",
            Occupant::Pit => "A bottomless pit is there.",
            Occupant::Bats => "Giant bats are there.",
            Occupant::Empty => "It's empty.",
        };
        write!(f, "Radar scan of cave {}: {contents}", self.cave)
    }
}

/// Ability ledger for one player.
#[derive(Debug, Clone, Default)]
pub struct Economy {
    config: Config,
    currency: u32,
    radar: u32,
    planks: u32,
    bat_taxi: u32,
    moves: u32,
    taxi_pending: bool,
    game_over: bool,
    last_reward: Option<u32>,
}

impl Economy {
    /// Creates a new ledger with an empty balance.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current currency balance.
    #[must_use]
    pub const fn currency(&self) -> u32 {
        self.currency
    }

    /// Charges left for the ability.
    #[must_use]
    pub const fn charges(&self, ability: Ability) -> u32 {
        match ability {
            Ability::Radar => self.radar,
            Ability::Planks => self.planks,
            Ability::BatTaxi => self.bat_taxi,
        }
    }

    /// Move attempts made during the current session.
    #[must_use]
    pub const fn moves(&self) -> u32 {
        self.moves
    }

    /// Reports whether the bats are waiting for a destination.
    #[must_use]
    pub const fn taxi_pending(&self) -> bool {
        self.taxi_pending
    }

    /// Payout granted for the most recent victory, if the session was won.
    #[must_use]
    pub const fn last_reward(&self) -> Option<u32> {
        self.last_reward
    }

    /// Store configuration.
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.config.store
    }

    /// Abilities to pass along when the player's cave is checked for hazards.
    #[must_use]
    pub const fn hazard_abilities(&self) -> HazardAbilities {
        HazardAbilities {
            planks: self.planks > 0,
            bat_taxi: self.bat_taxi > 0,
        }
    }

    /// Buys one batch of the ability, returning the charges now held.
    pub fn purchase(&mut self, ability: Ability) -> Result<u32, EconomyError> {
        let offer = self.config.store.offer(ability);
        if self.currency < offer.price {
            return Err(EconomyError::InsufficientFunds {
                ability,
                price: offer.price,
                balance: self.currency,
            });
        }

        self.currency -= offer.price;
        let slot = self.slot_mut(ability);
        *slot = slot.saturating_add(offer.charges);
        let held = *slot;
        debug!(
            "purchased {} for {}, {held} charges held",
            ability.label(),
            offer.price
        );
        Ok(held)
    }

    /// Builds a movement command and counts the attempt toward the reward.
    pub fn move_command(&mut self, destination: Cave) -> Command {
        if !self.game_over {
            self.moves = self.moves.saturating_add(1);
        }
        Command::MovePlayer {
            destination,
            abilities: self.hazard_abilities(),
        }
    }

    /// Builds the relocation command for a taxi ride the bats offered.
    pub fn relocate_command(&self, destination: Cave) -> Result<Command, EconomyError> {
        if !self.taxi_pending {
            return Err(EconomyError::NoTaxiPending);
        }
        Ok(Command::ForceRelocate {
            destination,
            abilities: self.hazard_abilities(),
        })
    }

    /// Spends a radar charge to reveal the contents of `cave`.
    ///
    /// `occupant_at` should mirror the world's `query::occupant` helper and
    /// return `None` for caves outside the cave system. No charge is spent
    /// when the scan is refused.
    pub fn scan<F>(&mut self, cave: Cave, occupant_at: F) -> Result<RadarReport, EconomyError>
    where
        F: FnOnce(Cave) -> Option<Occupant>,
    {
        if self.radar == 0 {
            return Err(EconomyError::NoCharges {
                ability: Ability::Radar,
            });
        }
        let occupant = occupant_at(cave).ok_or(EconomyError::UnknownCave { cave })?;
        self.radar -= 1;
        Ok(RadarReport { cave, occupant })
    }

    /// Settles the ledger from world events.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::GameStarted { .. } => self.reset(),
                Event::HazardResolved {
                    outcome: HazardOutcome::PlanksUsed,
                    ..
                } => {
                    self.planks = self.planks.saturating_sub(1);
                }
                Event::HazardResolved {
                    outcome: HazardOutcome::TaxiAvailable,
                    ..
                } => {
                    self.bat_taxi = self.bat_taxi.saturating_sub(1);
                    self.taxi_pending = true;
                }
                Event::PlayerMoved { .. } | Event::PlayerRelocated { .. } => {
                    self.taxi_pending = false;
                }
                Event::GameEnded { end } => {
                    self.game_over = true;
                    self.taxi_pending = false;
                    if end.is_victory() {
                        let reward = self.config.reward.for_moves(self.moves);
                        self.currency = self.currency.saturating_add(reward);
                        self.last_reward = Some(reward);
                        debug!("awarded {reward} after {} moves", self.moves);
                    }
                }
                _ => {}
            }
        }
    }

    fn reset(&mut self) {
        let currency = if self.config.carry_currency {
            self.currency
        } else {
            0
        };
        *self = Self {
            config: self.config,
            currency,
            ..Self::default()
        };
    }

    fn slot_mut(&mut self, ability: Ability) -> &mut u32 {
        match ability {
            Ability::Radar => &mut self.radar,
            Ability::Planks => &mut self.planks,
            Ability::BatTaxi => &mut self.bat_taxi,
        }
    }
}
