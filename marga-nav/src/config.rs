//! Configuration loading for MargaNav

use crate::error::{MargaError, Result};
use crate::selection::LOOKAHEAD_WPS;
use crate::tracker::MIN_UPDATE_DIST;
use serde::Deserialize;
use std::path::Path;

/// km/h → m/s
const KMH_PER_MPS: f64 = 3.6;

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MargaConfig {
    #[serde(default)]
    pub updater: UpdaterConfig,
    #[serde(default)]
    pub track: TrackConfig,
}

/// Lookahead selection settings
#[derive(Clone, Debug, Deserialize)]
pub struct UpdaterConfig {
    /// Number of waypoints published per window (default: 200)
    #[serde(default = "default_lookahead_wps")]
    pub lookahead_wps: usize,

    /// Minimum travelled distance before a new window is computed, meters (default: 0.01)
    #[serde(default = "default_min_update_distance")]
    pub min_update_distance: f64,

    /// Log per-pose selection details (default: true)
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

/// Track parameters
#[derive(Clone, Debug, Deserialize)]
pub struct TrackConfig {
    /// Maximum track velocity in km/h (default: 40.0)
    #[serde(default = "default_max_velocity_kmh")]
    pub max_velocity_kmh: f64,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            lookahead_wps: default_lookahead_wps(),
            min_update_distance: default_min_update_distance(),
            verbose: default_verbose(),
        }
    }
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            max_velocity_kmh: default_max_velocity_kmh(),
        }
    }
}

// Default value functions
fn default_lookahead_wps() -> usize {
    LOOKAHEAD_WPS
}
fn default_min_update_distance() -> f64 {
    MIN_UPDATE_DIST
}
fn default_verbose() -> bool {
    true
}
fn default_max_velocity_kmh() -> f64 {
    40.0
}

impl TrackConfig {
    /// Maximum track velocity in m/s.
    pub fn max_velocity_mps(&self) -> f64 {
        self.max_velocity_kmh / KMH_PER_MPS
    }
}

impl MargaConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MargaError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: MargaConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the updater cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.updater.lookahead_wps == 0 {
            return Err(MargaError::Config(
                "updater.lookahead_wps must be at least 1".to_string(),
            ));
        }
        if self.updater.min_update_distance.is_nan() || self.updater.min_update_distance < 0.0 {
            return Err(MargaError::Config(format!(
                "updater.min_update_distance must be non-negative, got {}",
                self.updater.min_update_distance
            )));
        }
        if self.track.max_velocity_kmh.is_nan() || self.track.max_velocity_kmh < 0.0 {
            return Err(MargaError::Config(format!(
                "track.max_velocity_kmh must be non-negative, got {}",
                self.track.max_velocity_kmh
            )));
        }
        Ok(())
    }
}
