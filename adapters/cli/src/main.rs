#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Hunt the Wumpus experience.

mod config;
mod session;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use crate::{
    config::Settings,
    session::{Flow, Session},
};

/// Hunt the Wumpus in a grid of caves.
#[derive(Debug, Parser)]
#[command(name = "wumpus", version, about)]
struct Args {
    /// Seed for cave placement and Wumpus wake-ups.
    #[arg(long)]
    seed: Option<u64>,

    /// Arrows in the quiver at the start of each game.
    #[arg(long)]
    arrows: Option<u32>,

    /// TOML file with game and store settings.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep earned currency when a new game starts.
    #[arg(long)]
    carry_currency: bool,
}

/// Entry point for the Hunt the Wumpus command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    settings.override_with(args.seed, args.arrows, args.carry_currency);
    info!("starting with {settings:?}");

    let mut session = Session::new(settings)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    session.greet(&mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        if session.handle_line(&line, &mut stdout)? == Flow::Quit {
            break;
        }
        stdout.flush()?;
    }

    writeln!(stdout, "Goodbye!")?;
    Ok(())
}
