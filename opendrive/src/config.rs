//! Tunables for queries and junction synthesis, persisted as JSON.

use std::f64::consts::FRAC_PI_6;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Sampling step of the nearest point search. Results are accurate to
    /// within this distance along `s`. Steps finer than a primitive's length
    /// over `MAX_NEAREST_SAMPLES` are widened to that.
    pub sample_step: f64,
    /// `|t|` under which a point resolves to the center lane.
    pub center_epsilon: f64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            sample_step: 1.0,
            center_epsilon: 1e-3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Heading change in radians under which a lane pair counts as straight.
    pub straight_threshold: f64,
    /// Distance from a road end under which `s` counts as touching it.
    pub boundary_epsilon: f64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            straight_threshold: FRAC_PI_6,
            boundary_epsilon: 1e-3,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub query: QueryConfig,
    pub synthesis: SynthesisConfig,
}

pub fn read_config_json(path: impl AsRef<Path>) -> Result<NetworkConfig> {
    let contents = crate::io::read_to_string(path)?;
    let config: NetworkConfig = serde_json::from_str(&contents)?;
    Ok(config)
}

pub fn write_config_json(path: impl AsRef<Path>, config: &NetworkConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    crate::io::write_string(path, &json)?;
    Ok(())
}
