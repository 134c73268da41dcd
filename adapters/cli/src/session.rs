//! Line-oriented driver that feeds player actions through the world.

use std::{io::Write, str::FromStr};

use anyhow::{Context, Result};
use log::debug;
use thiserror::Error;
use wumpus_core::{Ability, Cave, Command, Event};
use wumpus_system_bootstrap::Bootstrap;
use wumpus_system_economy::Economy;
use wumpus_world::{self as world, query, World};

use crate::config::Settings;

const HELP: &str = "\
Commands:
  move <cave>            walk into a connected cave
  shoot <cave> [cave..]  fire an arrow along a path of up to five caves
  taxi <cave>            fly to any cave after the bats offer a ride
  radar <cave>           reveal what a cave holds
  buy radar|planks|taxi  spend currency in the store
  new                    start a new game
  help                   show this list
  quit                   leave the game";

/// Whether the driver should keep reading input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Read the next line.
    Continue,
    /// Stop reading input.
    Quit,
}

/// Player intent parsed from one line of input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Move(Cave),
    Shoot(Vec<Cave>),
    Taxi(Cave),
    Radar(Cave),
    Buy(Ability),
    NewGame,
    Help,
    Quit,
}

/// Reasons a line of input could not be understood.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ParseError {
    #[error("unknown command `{0}`, type `help` for a list")]
    UnknownCommand(String),
    #[error("`{0}` needs a cave number")]
    MissingCave(&'static str),
    #[error("`{0}` is not a cave number")]
    InvalidCave(String),
    #[error("unknown item `{0}`, choose radar, planks or taxi")]
    UnknownAbility(String),
}

impl FromStr for Action {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|word| !word.is_empty());
        let Some(verb) = words.next() else {
            return Err(ParseError::UnknownCommand(String::new()));
        };

        match verb.to_ascii_lowercase().as_str() {
            "move" | "m" => single_cave("move", words).map(Self::Move),
            "shoot" | "s" => {
                let path = words.map(parse_cave).collect::<Result<Vec<_>, _>>()?;
                if path.is_empty() {
                    return Err(ParseError::MissingCave("shoot"));
                }
                Ok(Self::Shoot(path))
            }
            "taxi" => single_cave("taxi", words).map(Self::Taxi),
            "radar" => single_cave("radar", words).map(Self::Radar),
            "buy" => match words.next().map(str::to_ascii_lowercase).as_deref() {
                Some("radar") => Ok(Self::Buy(Ability::Radar)),
                Some("planks") => Ok(Self::Buy(Ability::Planks)),
                Some("taxi") => Ok(Self::Buy(Ability::BatTaxi)),
                other => Err(ParseError::UnknownAbility(other.unwrap_or_default().to_owned())),
            },
            "new" => Ok(Self::NewGame),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ => Err(ParseError::UnknownCommand(verb.to_owned())),
        }
    }
}

fn single_cave<'a>(
    command: &'static str,
    mut words: impl Iterator<Item = &'a str>,
) -> Result<Cave, ParseError> {
    words
        .next()
        .ok_or(ParseError::MissingCave(command))
        .and_then(parse_cave)
}

fn parse_cave(word: &str) -> Result<Cave, ParseError> {
    word.parse::<u32>()
        .map(Cave::new)
        .map_err(|_| ParseError::InvalidCave(word.to_owned()))
}

/// A running game plus the player's ability ledger.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    economy: Economy,
    bootstrap: Bootstrap,
    initial_arrows: u32,
}

impl Session {
    /// Builds a session from the merged settings.
    pub(crate) fn new(settings: Settings) -> Result<Self> {
        let initial_arrows = settings.game.initial_arrows;
        let world = World::new(settings.game).context("invalid game configuration")?;
        Ok(Self::with_world(world, Economy::new(settings.economy), initial_arrows))
    }

    fn with_world(world: World, economy: Economy, initial_arrows: u32) -> Self {
        Self {
            world,
            economy,
            bootstrap: Bootstrap,
            initial_arrows,
        }
    }

    /// Prints the banner, the rules and the opening position.
    pub(crate) fn greet<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "{}", self.bootstrap.welcome_banner(&self.world))?;
        writeln!(out, "{}", self.bootstrap.instructions())?;
        writeln!(out, "Type `help` for the list of commands.")?;
        self.render(out)
    }

    /// Parses and performs one line of input.
    pub(crate) fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        match line.parse::<Action>() {
            Ok(action) => self.perform(action, out),
            Err(error) => {
                writeln!(out, "{error}")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn perform<W: Write>(&mut self, action: Action, out: &mut W) -> Result<Flow> {
        debug!("performing {action:?}");
        match action {
            Action::Move(destination) => {
                let command = self.economy.move_command(destination);
                self.dispatch(command, out)?;
            }
            Action::Shoot(path) => self.dispatch(Command::Shoot { path }, out)?,
            Action::Taxi(destination) => match self.economy.relocate_command(destination) {
                Ok(command) => self.dispatch(command, out)?,
                Err(error) => writeln!(out, "{error}")?,
            },
            Action::Radar(cave) => {
                let world = &self.world;
                match self.economy.scan(cave, |cave| query::occupant(world, cave)) {
                    Ok(report) => writeln!(out, "{report}")?,
                    Err(error) => writeln!(out, "{error}")?,
                }
            }
            Action::Buy(ability) => match self.economy.purchase(ability) {
                Ok(_) => writeln!(
                    out,
                    "Purchased {} for {} currency.",
                    ability.label(),
                    self.economy.store().offer(ability).price
                )?,
                Err(error) => writeln!(out, "{error}")?,
            },
            Action::NewGame => self.dispatch(
                Command::NewGame {
                    initial_arrows: self.initial_arrows,
                },
                out,
            )?,
            Action::Help => writeln!(out, "{HELP}")?,
            Action::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn dispatch<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        self.economy.handle(&events);

        self.render(out)?;

        let won = events
            .iter()
            .any(|event| matches!(event, Event::GameEnded { end } if end.is_victory()));
        if let (true, Some(reward)) = (won, self.economy.last_reward()) {
            writeln!(out, "You won! You receive {reward} currency.")?;
        }
        if self.economy.taxi_pending() {
            writeln!(out, "Choose a cave with `taxi <cave>` to fly to.")?;
        }
        if query::is_game_over(&self.world) {
            writeln!(out, "Type `new` to play again.")?;
        }
        Ok(())
    }

    fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        let surroundings = self.bootstrap.surroundings(&self.world);
        let exits: Vec<String> = surroundings.exits.iter().map(Cave::to_string).collect();

        writeln!(out, "--- Current State ---")?;
        writeln!(out, "You are in cave {}.", surroundings.cave)?;
        writeln!(out, "Connected caves: {}", exits.join(", "))?;
        writeln!(out, "Arrows remaining: {}", surroundings.arrows)?;
        writeln!(
            out,
            "Currency: {} | radar {} | planks {} | taxi {}",
            self.economy.currency(),
            self.economy.charges(Ability::Radar),
            self.economy.charges(Ability::Planks),
            self.economy.charges(Ability::BatTaxi)
        )?;
        for cue in &surroundings.cues {
            writeln!(out, "{}", cue.description())?;
        }
        writeln!(out, "Message: {}", query::message(&self.world))?;
        Ok(())
    }
}
