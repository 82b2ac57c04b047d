//! Error types for MargaNav

use thiserror::Error;

/// MargaNav error type
#[derive(Error, Debug)]
pub enum MargaError {
    #[error("Track waypoints not set (track is empty)")]
    EmptyTrack,

    #[error("Track waypoints not loaded yet")]
    TrackNotLoaded,

    #[error("Track waypoints already loaded")]
    TrackAlreadyLoaded,

    #[error("Invalid waypoint index ({index}), track has {len} waypoints")]
    InvalidWaypointIndex { index: i64, len: usize },

    #[error("Invalid waypoint interval: {from} - {to}")]
    InvalidInterval { from: usize, to: usize },

    #[error("Unsupported shape: {0}")]
    UnsupportedShape(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MargaError {
    /// Index error for a waypoint index that does not fit a track of `len` waypoints.
    pub fn invalid_index(index: i64, len: usize) -> Self {
        MargaError::InvalidWaypointIndex { index, len }
    }
}

impl From<toml::de::Error> for MargaError {
    fn from(e: toml::de::Error) -> Self {
        MargaError::Config(e.to_string())
    }
}

impl From<serde_yaml::Error> for MargaError {
    fn from(e: serde_yaml::Error) -> Self {
        MargaError::Scenario(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MargaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_index_message() {
        let err = MargaError::invalid_index(4, 4);
        assert!(err.to_string().contains("(4)"));
        assert!(err.to_string().contains("4 waypoints"));
    }

    #[test]
    fn test_toml_error_maps_to_config() {
        let err: MargaError = toml::from_str::<toml::Value>("= broken")
            .unwrap_err()
            .into();
        assert!(matches!(err, MargaError::Config(_)));
    }
}
