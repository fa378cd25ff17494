//! Configuration for the terminal dashboard.
//!
//! Layers, lowest to highest:
//! - built-in defaults
//! - a TOML file (`--config`)
//! - environment variables:
//!   - `MARKET_TICK_MS`       (price tick period)
//!   - `MARKET_LOAD_DELAY_MS` (simulated chart latency)
//!   - `MARKET_BALANCE`       (starting balance)
//!   - `MARKET_SEED`          (fixed RNG seed)
//! - command-line flags (applied in `main`)

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use market_core::SimulationSettings;
use serde::{Deserialize, Serialize};

/// Whole-program configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TerminalConfig {
    pub simulation: SimulationSettings,
    pub logging: LoggingConfig,

    /// Asset id selected on startup; nothing is selected when absent.
    pub initial_asset: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log file. The terminal owns stdout, so logs never go there.
    pub file: Option<PathBuf>,

    /// Filter used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            file: None,
            level: "info".to_string(),
        }
    }
}

impl TerminalConfig {
    /// Defaults, then the file at `path` (if any), then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                Self::from_toml_str(&text)
                    .with_context(|| format!("parsing config file {}", path.display()))?
            }
            None => TerminalConfig::default(),
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Apply `MARKET_*` overrides fetched through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sim = &mut self.simulation;

        if let Some(ms) = read_override(&lookup, "MARKET_TICK_MS")? {
            sim.tick_interval_ms = ms;
        }
        if let Some(ms) = read_override(&lookup, "MARKET_LOAD_DELAY_MS")? {
            sim.chart_load_delay_ms = ms;
        }
        if let Some(balance) = read_override(&lookup, "MARKET_BALANCE")? {
            sim.starting_balance = balance;
        }
        if let Some(seed) = read_override(&lookup, "MARKET_SEED")? {
            sim.seed = Some(seed);
        }

        Ok(())
    }

    /// Check the simulation settings and the startup asset.
    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;

        if let Some(id) = &self.initial_asset {
            if !self.simulation.assets.iter().any(|asset| &asset.id == id) {
                bail!("initial asset `{id}` is not in the asset universe");
            }
        }

        Ok(())
    }
}

fn read_override<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(val) => {
            let parsed = val
                .trim()
                .parse::<T>()
                .with_context(|| format!("invalid value `{val}` for {key}"))?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn file_sections_are_optional() {
        let config = TerminalConfig::from_toml_str("").unwrap();
        assert_eq!(config.simulation, SimulationSettings::default());
        assert_eq!(config.logging.level, "info");
        assert!(config.initial_asset.is_none());
    }

    #[test]
    fn file_overrides_defaults() {
        let config = TerminalConfig::from_toml_str(
            r#"
            initial_asset = "eurusd"

            [simulation]
            tick_interval_ms = 750
            recent_order_cap = 5

            [logging]
            file = "/tmp/market.log"
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.simulation.tick_interval_ms, 750);
        assert_eq!(config.simulation.recent_order_cap, 5);
        assert_eq!(config.logging.file.as_deref(), Some(Path::new("/tmp/market.log")));
        config.validate().unwrap();
    }

    #[test]
    fn env_beats_file() {
        let mut config = TerminalConfig::from_toml_str("[simulation]\nseed = 1").unwrap();
        let env: HashMap<&str, &str> = [("MARKET_SEED", "99"), ("MARKET_BALANCE", "2500.5")].into();

        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.simulation.seed, Some(99));
        assert_eq!(config.simulation.starting_balance, 2500.5);
        assert_eq!(config.simulation.tick_interval_ms, 3_000);
    }

    #[test]
    fn bad_env_value_is_an_error() {
        let mut config = TerminalConfig::default();
        let err = config
            .apply_overrides(|key| (key == "MARKET_TICK_MS").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("MARKET_TICK_MS"));
    }

    #[test]
    fn unknown_initial_asset_fails_validation() {
        let config = TerminalConfig {
            initial_asset: Some("doge".to_string()),
            ..TerminalConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
