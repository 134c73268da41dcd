#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Hunt the Wumpus.

mod config;
mod graph;
mod placement;

use log::{debug, info, trace};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use wumpus_core::{
    ActionError, Cave, Command, Event, GameEnd, GameStatus, HazardAbilities, HazardOutcome,
    ShotOutcome, WELCOME_BANNER,
};

pub use config::{
    ConfigError, GameConfig, DEFAULT_ARROWS, DEFAULT_ARROW_RANGE, DEFAULT_COLUMNS, DEFAULT_ROWS,
    DEFAULT_WAKE_CHANCE, MAX_CAVES,
};
pub use graph::CaveGraph;
pub use placement::{Placement, RESERVED_CAVES};

const NEW_GAME_MESSAGE: &str = "Starting a new game. Good luck!";
const OUT_OF_ARROWS_MESSAGE: &str = "You are out of arrows! Game Over.";

/// Represents the authoritative state of one Hunt the Wumpus session.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    graph: CaveGraph,
    player: Cave,
    wumpus: Cave,
    pits: [Cave; 2],
    bats: [Cave; 2],
    arrows: u32,
    status: GameStatus,
    message: String,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a new session with a randomly populated cave system.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let graph = CaveGraph::grid(config.rows, config.columns);
        let mut rng = seeded_rng(config.seed);
        let placement =
            Placement::random(&graph, &mut rng).ok_or(ConfigError::TooFewCaves {
                available: graph.cave_count(),
            })?;
        Ok(Self::assemble(config, graph, placement, rng))
    }

    /// Creates a new session from an explicit layout.
    pub fn from_placement(config: GameConfig, placement: Placement) -> Result<Self, ConfigError> {
        config.validate()?;
        let graph = CaveGraph::grid(config.rows, config.columns);
        if !placement.fits(&graph) {
            return Err(ConfigError::InvalidPlacement);
        }
        let rng = seeded_rng(config.seed);
        Ok(Self::assemble(config, graph, placement, rng))
    }

    fn assemble(
        config: GameConfig,
        graph: CaveGraph,
        placement: Placement,
        rng: ChaCha8Rng,
    ) -> Self {
        let mut world = Self {
            banner: WELCOME_BANNER,
            arrows: config.initial_arrows,
            config,
            graph,
            player: placement.player,
            wumpus: placement.wumpus,
            pits: placement.pits,
            bats: placement.bats,
            status: GameStatus::Active,
            message: String::new(),
            rng,
        };
        world.begin(placement);
        world
    }

    fn begin(&mut self, placement: Placement) {
        self.player = placement.player;
        self.wumpus = placement.wumpus;
        self.pits = placement.pits;
        self.bats = placement.bats;
        self.arrows = self.config.initial_arrows;
        self.status = GameStatus::Active;
        self.message = NEW_GAME_MESSAGE.to_owned();
        debug!("cave system populated: {placement:?}");
        info!(
            "new game started in cave {} with {} arrows",
            self.player, self.arrows
        );
    }

    fn restart(&mut self, initial_arrows: u32, out_events: &mut Vec<Event>) {
        self.config.initial_arrows = initial_arrows;
        let Some(placement) = Placement::random(&self.graph, &mut self.rng) else {
            return;
        };
        self.begin(placement);
        out_events.push(Event::GameStarted {
            player: self.player,
            arrows: self.arrows,
        });
    }

    fn reject(&mut self, reason: ActionError, out_events: &mut Vec<Event>) {
        self.message = match reason {
            ActionError::GameOver => "The game is over. Start a new game.".to_owned(),
            ActionError::NotConnected { .. } => "That's not a connected cave! Try again.".to_owned(),
            ActionError::EmptyPath => {
                "Invalid arrow path. Name at least one cave to shoot through.".to_owned()
            }
            ActionError::UnknownCave { cave } => format!("There is no cave {cave}."),
        };
        debug!("command rejected: {reason}");
        out_events.push(Event::ActionRejected { reason });
    }

    fn finish(&mut self, end: GameEnd, out_events: &mut Vec<Event>) {
        self.status = GameStatus::Over(end);
        info!("game over: {end:?}");
        out_events.push(Event::GameEnded { end });
    }

    fn move_player(
        &mut self,
        destination: Cave,
        abilities: HazardAbilities,
        out_events: &mut Vec<Event>,
    ) {
        if self.status.is_over() {
            self.reject(ActionError::GameOver, out_events);
            return;
        }

        let from = self.player;
        if !self.graph.are_adjacent(from, destination) {
            self.reject(
                ActionError::NotConnected {
                    from,
                    to: destination,
                },
                out_events,
            );
            return;
        }

        self.player = destination;
        self.message = format!("You are now in cave {destination}.");
        debug!("player moved from cave {from} to cave {destination}");
        out_events.push(Event::PlayerMoved {
            from,
            to: destination,
        });
        self.resolve_hazards(abilities, out_events);
    }

    fn force_relocate(
        &mut self,
        destination: Cave,
        abilities: HazardAbilities,
        out_events: &mut Vec<Event>,
    ) {
        if self.status.is_over() {
            self.reject(ActionError::GameOver, out_events);
            return;
        }

        if !self.graph.contains(destination) {
            self.reject(ActionError::UnknownCave { cave: destination }, out_events);
            return;
        }

        let from = self.player;
        self.player = destination;
        self.message = format!("The bats dropped you off in cave {destination}.");
        debug!("player relocated from cave {from} to cave {destination}");
        out_events.push(Event::PlayerRelocated {
            from,
            to: destination,
        });
        self.resolve_hazards(abilities, out_events);
    }

    /// Resolves whatever occupies the player's cave. The first match wins.
    fn resolve_hazards(
        &mut self,
        abilities: HazardAbilities,
        out_events: &mut Vec<Event>,
    ) {
        let cave = self.player;

        let (outcome, end) = if cave == self.wumpus {
            self.message = "The Wumpus got you! Game Over.".to_owned();
            (HazardOutcome::Terminal, Some(GameEnd::EatenByWumpus))
        } else if self.pits.contains(&cave) {
            if abilities.planks {
                self.message =
                    "You fell into a pit but used your wooden planks to escape!".to_owned();
                (HazardOutcome::PlanksUsed, None)
            } else {
                self.message = "You fell into a bottomless pit! Game Over.".to_owned();
                (HazardOutcome::Terminal, Some(GameEnd::FellIntoPit))
            }
        } else if self.bats.contains(&cave) {
            if abilities.bat_taxi {
                self.message =
                    "Giant bats snatch you! You can now choose your destination.".to_owned();
                (HazardOutcome::TaxiAvailable, None)
            } else {
                self.message = "Giant bats snatch you and drop you in a random cave!".to_owned();
                self.carry_player(out_events);
                (HazardOutcome::None, None)
            }
        } else {
            (HazardOutcome::None, None)
        };

        out_events.push(Event::HazardResolved { cave, outcome });
        if let Some(end) = end {
            self.finish(end, out_events);
        }
    }

    /// Drops the player into a random cave free of the Wumpus and every
    /// hazard. The landing cave is not checked again.
    fn carry_player(&mut self, out_events: &mut Vec<Event>) {
        let from = self.player;
        let safe: Vec<Cave> = self
            .graph
            .caves()
            .filter(|cave| {
                *cave != self.wumpus
                    && !self.pits.contains(cave)
                    && !self.bats.contains(cave)
                    && *cave != from
            })
            .collect();

        let landing = match safe.choose(&mut self.rng) {
            Some(cave) => Some(*cave),
            None => {
                let elsewhere: Vec<Cave> =
                    self.graph.caves().filter(|cave| *cave != from).collect();
                elsewhere.choose(&mut self.rng).copied()
            }
        };

        if let Some(to) = landing {
            self.player = to;
            debug!("bats carried the player from cave {from} to cave {to}");
            out_events.push(Event::PlayerCarried { from, to });
        }
    }

    fn shoot(&mut self, path: &[Cave], out_events: &mut Vec<Event>) {
        if self.status.is_over() {
            self.reject(ActionError::GameOver, out_events);
            return;
        }

        if self.arrows == 0 {
            self.message = OUT_OF_ARROWS_MESSAGE.to_owned();
            out_events.push(Event::ShotResolved {
                outcome: ShotOutcome::NoArrows,
            });
            self.finish(GameEnd::OutOfArrows, out_events);
            return;
        }

        if path.is_empty() {
            self.reject(ActionError::EmptyPath, out_events);
            return;
        }

        if let Some(&cave) = path.iter().find(|cave| !self.graph.contains(**cave)) {
            self.reject(ActionError::UnknownCave { cave }, out_events);
            return;
        }

        self.arrows -= 1;
        out_events.push(Event::ArrowFired {
            remaining: self.arrows,
        });

        let outcome = match self.trace_arrow(path) {
            ArrowFlight::Hit => {
                self.message = "You shot the Wumpus! You win!".to_owned();
                ShotOutcome::Hit
            }
            ArrowFlight::SelfInflicted => {
                self.message = "You shot yourself! Game Over.".to_owned();
                ShotOutcome::SelfInflicted
            }
            ArrowFlight::Veered => {
                self.message = "Arrow veered off course! It hit nothing.".to_owned();
                ShotOutcome::Veered
            }
            ArrowFlight::Spent => {
                let wumpus_moved = self.rng.gen_bool(self.config.wumpus_wake_chance);
                if wumpus_moved {
                    self.message = "Your shot woke the Wumpus! He moved!".to_owned();
                    self.relocate_wumpus(out_events);
                } else {
                    self.message = "Arrow missed.".to_owned();
                }
                ShotOutcome::Missed { wumpus_moved }
            }
        };

        debug!("arrow resolved as {outcome:?}, {} left", self.arrows);
        out_events.push(Event::ShotResolved { outcome });

        match outcome {
            ShotOutcome::Hit => self.finish(GameEnd::WumpusKilled, out_events),
            ShotOutcome::SelfInflicted => self.finish(GameEnd::ShotSelf, out_events),
            ShotOutcome::Veered | ShotOutcome::Missed { .. } | ShotOutcome::NoArrows => {
                if self.arrows == 0 {
                    self.message.push('\n');
                    self.message.push_str(OUT_OF_ARROWS_MESSAGE);
                    self.finish(GameEnd::OutOfArrows, out_events);
                }
            }
        }
    }

    /// Follows the arrow from the player's cave. Each step must stay put or
    /// cross a single tunnel; steps beyond the configured range are dropped.
    fn trace_arrow(&self, path: &[Cave]) -> ArrowFlight {
        if path.len() > self.config.max_arrow_path {
            debug!(
                "arrow path of {} caves exceeds range {}",
                path.len(),
                self.config.max_arrow_path
            );
        }

        let mut current = self.player;
        for &step in path.iter().take(self.config.max_arrow_path) {
            if step != current && !self.graph.are_adjacent(current, step) {
                trace!("arrow cannot reach cave {step} from cave {current}");
                return ArrowFlight::Veered;
            }

            current = step;
            trace!("arrow passes through cave {current}");

            if current == self.wumpus {
                return ArrowFlight::Hit;
            }
            if current == self.player {
                return ArrowFlight::SelfInflicted;
            }
        }

        ArrowFlight::Spent
    }

    fn relocate_wumpus(&mut self, out_events: &mut Vec<Event>) {
        let from = self.wumpus;
        let player = self.player;
        let candidates: Vec<Cave> = self
            .graph
            .caves()
            .filter(|cave| *cave != player && *cave != from)
            .collect();

        let destination = match candidates.choose(&mut self.rng) {
            Some(cave) => Some(*cave),
            None => {
                let elsewhere: Vec<Cave> =
                    self.graph.caves().filter(|cave| *cave != player).collect();
                elsewhere.choose(&mut self.rng).copied()
            }
        };

        if let Some(to) = destination {
            self.wumpus = to;
            debug!("wumpus woke and moved from cave {from} to cave {to}");
            out_events.push(Event::WumpusRelocated { from, to });
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ArrowFlight {
    Hit,
    SelfInflicted,
    Veered,
    Spent,
}

fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::NewGame { initial_arrows } => world.restart(initial_arrows, out_events),
        Command::MovePlayer {
            destination,
            abilities,
        } => world.move_player(destination, abilities, out_events),
        Command::Shoot { path } => world.shoot(&path, out_events),
        Command::ForceRelocate {
            destination,
            abilities,
        } => world.force_relocate(destination, abilities, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use wumpus_core::{Cave, Cue, GameStatus, Occupant};

    use super::{CaveGraph, GameConfig, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the configuration the session runs with.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Provides read-only access to the cave connectivity graph.
    #[must_use]
    pub fn graph(world: &World) -> &CaveGraph {
        &world.graph
    }

    /// Cave the player currently occupies.
    #[must_use]
    pub fn player_location(world: &World) -> Cave {
        world.player
    }

    /// Arrows left in the quiver.
    #[must_use]
    pub fn arrows_remaining(world: &World) -> u32 {
        world.arrows
    }

    /// Lifecycle state of the session.
    #[must_use]
    pub fn status(world: &World) -> GameStatus {
        world.status
    }

    /// Reports whether the session has ended.
    #[must_use]
    pub fn is_game_over(world: &World) -> bool {
        world.status.is_over()
    }

    /// Text describing the most recent state change.
    #[must_use]
    pub fn message(world: &World) -> &str {
        &world.message
    }

    /// Caves connected to `cave`.
    #[must_use]
    pub fn neighbors(world: &World, cave: Cave) -> &[Cave] {
        world.graph.neighbors(cave)
    }

    /// What a radar scan of `cave` would reveal, or `None` for caves outside the graph.
    #[must_use]
    pub fn occupant(world: &World, cave: Cave) -> Option<Occupant> {
        if !world.graph.contains(cave) {
            return None;
        }

        let occupant = if cave == world.wumpus {
            Occupant::Wumpus
        } else if world.pits.contains(&cave) {
            Occupant::Pit
        } else if world.bats.contains(&cave) {
            Occupant::Bats
        } else {
            Occupant::Empty
        };
        Some(occupant)
    }

    /// Sensory cues from the caves around the player, in neighbour order.
    #[must_use]
    pub fn perceive(world: &World) -> Vec<Cue> {
        let mut cues = Vec::new();
        for neighbor in world.graph.neighbors(world.player) {
            if *neighbor == world.wumpus {
                cues.push(Cue::WumpusNearby);
            }
            if world.pits.contains(neighbor) {
                cues.push(Cue::Breeze);
            }
            if world.bats.contains(neighbor) {
                cues.push(Cue::BatsNearby);
            }
        }
        cues
    }
}
