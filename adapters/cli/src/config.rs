//! File-backed settings for the command-line adapter.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use wumpus_world::GameConfig;

/// Settings read from the optional TOML configuration file.
///
/// ```toml
/// [game]
/// initial_arrows = 3
/// wumpus_wake_chance = 0.5
///
/// [economy]
/// carry_currency = true
///
/// [economy.store.radar]
/// price = 40
/// charges = 2
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    /// Cave system parameters.
    pub(crate) game: GameConfig,
    /// Store prices, victory payout and currency carry-over.
    pub(crate) economy: wumpus_system_economy::Config,
}

impl Settings {
    /// Loads settings from the TOML file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse settings toml contents")
    }

    /// Applies command-line overrides on top of the file settings.
    pub(crate) fn override_with(
        &mut self,
        seed: Option<u64>,
        arrows: Option<u32>,
        carry_currency: bool,
    ) {
        if let Some(seed) = seed {
            self.game.seed = Some(seed);
        }
        if let Some(arrows) = arrows {
            self.game.initial_arrows = arrows;
        }
        if carry_currency {
            self.economy.carry_currency = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let settings = Settings::parse("").expect("empty toml is valid");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let settings = Settings::parse(
            r#"
            [game]
            initial_arrows = 3
            seed = 42

            [economy]
            carry_currency = true

            [economy.store.radar]
            price = 40
            charges = 3
            "#,
        )
        .expect("valid toml");

        assert_eq!(settings.game.initial_arrows, 3);
        assert_eq!(settings.game.seed, Some(42));
        assert_eq!(settings.game.rows, 4);
        assert!(settings.economy.carry_currency);
        assert_eq!(settings.economy.store.radar.price, 40);
        assert_eq!(settings.economy.store.planks.price, 75);
        assert_eq!(settings.economy.reward.base, 100);
    }

    #[test]
    fn malformed_file_reports_context() {
        let error = Settings::parse("[game]\ninitial_arrows = \"many\"").unwrap_err();
        assert!(error.to_string().contains("failed to parse settings"));
    }

    #[test]
    fn flags_override_file_values() {
        let mut settings = Settings::default();
        settings.override_with(Some(9), Some(2), true);
        assert_eq!(settings.game.seed, Some(9));
        assert_eq!(settings.game.initial_arrows, 2);
        assert!(settings.economy.carry_currency);
    }
}
