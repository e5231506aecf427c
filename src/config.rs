//! Engine configuration, loadable from TOML.
//!
//! Every field is optional in the file; missing fields take the defaults below.
//!
//! ```toml
//! four_probability = 0.2      # chance a spawned tile is a 4 instead of a 2
//! seed = 42                   # fixed RNG seed (omit for entropy)
//! adjacency_scan = "bounded"  # or "flattened"
//! initial_grid = [[0, 0, 0, 2], [4, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]
//! ```

use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::engine::Grid;

/// How `game_over` looks for a remaining merge on a full board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjacencyScan {
    /// Compare neighbours within each row and each column only.
    #[default]
    Bounded,
    /// Compare consecutive cells of the row-major and column-major flattenings.
    /// The last cell of a row is also compared with the first cell of the next
    /// row (likewise for columns), so some stuck boards are reported as playable.
    /// Every consecutive pair is compared, including the final one (cells 14 and 15)
    /// that the classic flattened loop stops short of.
    Flattened,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Probability in [0, 1] that a spawned tile is a 4.
    pub four_probability: f64,
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub adjacency_scan: AdjacencyScan,
    /// Start from this board instead of two random tiles.
    pub initial_grid: Option<Grid>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            four_probability: DEFAULT_FOUR_PROBABILITY,
            seed: None,
            adjacency_scan: AdjacencyScan::default(),
            initial_grid: None,
        }
    }
}

const DEFAULT_FOUR_PROBABILITY: f64 = 0.2;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("four_probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),
}

impl EngineConfig {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = self.four_probability;
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::InvalidProbability(p));
        }
        Ok(())
    }
}
