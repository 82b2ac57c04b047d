//! Traffic light and obstacle waypoint indices.
//!
//! Upstream detectors report the track index of the next red-light stop
//! line and of the next obstacle, or `-1` when there is none. The indices
//! are validated and kept for diagnostics; window construction does not
//! read them.

use std::fmt;

use crate::error::Result;
use crate::track::TrackMap;

/// Raw index value meaning "nothing ahead".
pub const WP_UNDEFINED: i32 = -1;

/// A validated overlay index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlayIndex {
    /// Nothing reported ahead.
    #[default]
    None,
    /// Index of a waypoint on the track.
    At(usize),
}

impl OverlayIndex {
    /// Validate a raw index against `track`.
    ///
    /// [`WP_UNDEFINED`] maps to [`OverlayIndex::None`] without any range
    /// check. Every other value must lie in `[0, N)`.
    pub fn validate(raw: i32, track: &TrackMap) -> Result<Self> {
        if raw == WP_UNDEFINED {
            return Ok(OverlayIndex::None);
        }
        track.check_index(i64::from(raw)).map(OverlayIndex::At)
    }

    /// The waypoint index, if any.
    pub fn index(self) -> Option<usize> {
        match self {
            OverlayIndex::None => None,
            OverlayIndex::At(i) => Some(i),
        }
    }

    pub fn is_none(self) -> bool {
        self == OverlayIndex::None
    }
}

impl fmt::Display for OverlayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayIndex::None => write!(f, "none"),
            OverlayIndex::At(i) => write!(f, "{}", i),
        }
    }
}

/// Which overlay an update refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayKind {
    Traffic,
    Obstacle,
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayKind::Traffic => write!(f, "Traffic light"),
            OverlayKind::Obstacle => write!(f, "Obstacle"),
        }
    }
}

/// Latest traffic light and obstacle indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverlayIndices {
    pub traffic: OverlayIndex,
    pub obstacle: OverlayIndex,
}

impl OverlayIndices {
    /// Validate `raw` and store it for `kind`.
    ///
    /// On error the previously stored value is kept.
    pub fn update(&mut self, kind: OverlayKind, raw: i32, track: &TrackMap) -> Result<OverlayIndex> {
        let index = OverlayIndex::validate(raw, track)?;
        match kind {
            OverlayKind::Traffic => self.traffic = index,
            OverlayKind::Obstacle => self.obstacle = index,
        }
        Ok(index)
    }

    pub fn get(&self, kind: OverlayKind) -> OverlayIndex {
        match kind {
            OverlayKind::Traffic => self.traffic,
            OverlayKind::Obstacle => self.obstacle,
        }
    }
}
