//! The closed-loop reference track.

use crate::core::Waypoint;
use crate::error::{MargaError, Result};

/// Ordered, closed-loop sequence of waypoints (index `len` wraps to 0).
///
/// Built once from the delivered waypoint list and never mutated
/// afterwards. Construction rejects an empty list, so every `TrackMap`
/// holds at least one waypoint.
#[derive(Clone, Debug)]
pub struct TrackMap {
    waypoints: Vec<Waypoint>,
}

impl TrackMap {
    /// Create a track from an ordered waypoint list.
    pub fn new(waypoints: Vec<Waypoint>) -> Result<Self> {
        if waypoints.is_empty() {
            return Err(MargaError::EmptyTrack);
        }
        Ok(Self { waypoints })
    }

    /// Number of waypoints (N ≥ 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// All waypoints in track order.
    #[inline]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Waypoint at `index`, if in range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    /// Index following `index` around the loop.
    #[inline]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.waypoints.len()
    }

    /// Check that a signed index addresses a waypoint of this track.
    pub fn check_index(&self, index: i64) -> Result<usize> {
        match usize::try_from(index) {
            Ok(i) if i < self.waypoints.len() => Ok(i),
            _ => Err(MargaError::invalid_index(index, self.waypoints.len())),
        }
    }

    /// Target forward velocity stored at `index`.
    pub fn waypoint_velocity(&self, index: usize) -> Result<f64> {
        self.waypoints
            .get(index)
            .map(Waypoint::velocity)
            .ok_or_else(|| MargaError::invalid_index(index as i64, self.waypoints.len()))
    }

    /// Path length between two waypoints, summing the straight segments
    /// between consecutive waypoints from `from` up to `to`.
    ///
    /// Requires `from < to`; the query does not wrap around the loop.
    pub fn distance_path(&self, from: usize, to: usize) -> Result<f64> {
        self.check_index(from as i64)?;
        self.check_index(to as i64)?;
        if from >= to {
            return Err(MargaError::InvalidInterval { from, to });
        }

        Ok(self.waypoints[from..=to]
            .windows(2)
            .map(|pair| pair[0].position.distance(&pair[1].position))
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> TrackMap {
        TrackMap::new(vec![
            Waypoint::planar(0.0, 0.0, 0.0, 1.0),
            Waypoint::planar(1.0, 0.0, 0.0, 2.0),
            Waypoint::planar(1.0, 1.0, 0.0, 3.0),
            Waypoint::planar(0.0, 1.0, 0.0, 4.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_track_rejected() {
        assert!(matches!(TrackMap::new(Vec::new()), Err(MargaError::EmptyTrack)));
    }

    #[test]
    fn test_next_index_wraps() {
        let track = square();
        assert_eq!(track.next_index(0), 1);
        assert_eq!(track.next_index(3), 0);
    }

    #[test]
    fn test_check_index() {
        let track = square();
        assert_eq!(track.check_index(0).unwrap(), 0);
        assert_eq!(track.check_index(3).unwrap(), 3);
        assert!(matches!(
            track.check_index(4),
            Err(MargaError::InvalidWaypointIndex { index: 4, len: 4 })
        ));
        assert!(track.check_index(-1).is_err());
        assert!(track.check_index(-7).is_err());
    }

    #[test]
    fn test_waypoint_velocity() {
        let track = square();
        assert_relative_eq!(track.waypoint_velocity(2).unwrap(), 3.0);
        assert!(track.waypoint_velocity(4).is_err());
    }

    #[test]
    fn test_distance_path() {
        let track = square();
        assert_relative_eq!(track.distance_path(0, 1).unwrap(), 1.0);
        assert_relative_eq!(track.distance_path(0, 3).unwrap(), 3.0);
        assert_relative_eq!(track.distance_path(1, 2).unwrap(), 1.0);
    }

    #[test]
    fn test_distance_path_invalid_interval() {
        let track = square();
        assert!(matches!(
            track.distance_path(2, 2),
            Err(MargaError::InvalidInterval { from: 2, to: 2 })
        ));
        assert!(track.distance_path(3, 1).is_err());
        assert!(matches!(
            track.distance_path(0, 9),
            Err(MargaError::InvalidWaypointIndex { .. })
        ));
    }
}
