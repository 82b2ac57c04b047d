//! Closest-waypoint search.

use crate::core::{Point3D, Waypoint};
use crate::error::{MargaError, Result};

/// Result of a closest-waypoint search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nearest {
    /// Index of the closest waypoint.
    pub index: usize,
    /// Euclidean distance to it (meters).
    pub distance: f64,
}

/// Find the waypoint closest to `position` (full 3D distance).
///
/// Linear scan over every waypoint. The first index reaching the minimum
/// distance wins, so ties resolve to the lowest index.
///
/// # Errors
/// [`MargaError::EmptyTrack`] if `waypoints` is empty.
pub fn find_nearest(waypoints: &[Waypoint], position: &Point3D) -> Result<Nearest> {
    // TODO: anchor the scan around the previous head index once the
    // follower is known to stay on the track.
    let mut best: Option<(usize, f64)> = None;
    for (i, wp) in waypoints.iter().enumerate() {
        let d2 = position.distance_squared(&wp.position);
        if best.is_none_or(|(_, best_d2)| d2 < best_d2) {
            best = Some((i, d2));
        }
    }

    best.map(|(index, d2)| Nearest {
        index,
        distance: d2.sqrt(),
    })
    .ok_or(MargaError::EmptyTrack)
}
