//! Ahead/behind disambiguation of the closest waypoint.
//!
//! The closest waypoint may already lie behind the vehicle. Comparing the
//! vehicle yaw with the bearing from the vehicle to that waypoint tells the
//! two cases apart: more than 90° off means the point has been passed and
//! its successor should head the window instead.

use std::f64::consts::FRAC_PI_2;

use crate::core::math::{folded_difference, wrap_positive};
use crate::core::{Point3D, Waypoint};
use crate::error::{MargaError, Result};

/// Which waypoint ended up heading the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeadChoice {
    /// The closest waypoint is ahead of the vehicle.
    Closest,
    /// The closest waypoint is behind; its successor was taken.
    Next,
}

impl HeadChoice {
    /// Short tag used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            HeadChoice::Closest => "(closest)",
            HeadChoice::Next => "(next)",
        }
    }
}

/// Outcome of the heading check, with the angles that drove it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadSelection {
    /// Index of the first waypoint of the window.
    pub head_index: usize,
    /// Index of the closest waypoint the decision started from.
    pub nearest_index: usize,
    /// Bearing vehicle → closest waypoint, wrapped to [0, 2π).
    pub bearing: f64,
    /// Vehicle yaw, wrapped to [0, 2π).
    pub yaw: f64,
    /// Folded difference between yaw and bearing, in [0, π].
    pub angle: f64,
    pub choice: HeadChoice,
}

/// Pick the head index of the lookahead window.
///
/// Only the XY projection is considered. When the folded angle between the
/// vehicle yaw and the bearing to `waypoints[nearest_index]` exceeds π/2 the
/// waypoint is behind the vehicle and `(nearest_index + 1) mod N` is
/// returned; otherwise `nearest_index` itself.
///
/// # Errors
/// - [`MargaError::EmptyTrack`] if `waypoints` is empty
/// - [`MargaError::InvalidWaypointIndex`] if `nearest_index` is out of range
pub fn select_head(
    ego_position: &Point3D,
    ego_yaw: f64,
    waypoints: &[Waypoint],
    nearest_index: usize,
) -> Result<HeadSelection> {
    if waypoints.is_empty() {
        return Err(MargaError::EmptyTrack);
    }
    let nearest = waypoints
        .get(nearest_index)
        .ok_or_else(|| MargaError::invalid_index(nearest_index as i64, waypoints.len()))?;

    let bearing = wrap_positive(ego_position.bearing_to(&nearest.position));
    let yaw = wrap_positive(ego_yaw);
    let angle = folded_difference(yaw, bearing);

    let (head_index, choice) = if angle > FRAC_PI_2 {
        ((nearest_index + 1) % waypoints.len(), HeadChoice::Next)
    } else {
        (nearest_index, HeadChoice::Closest)
    };

    Ok(HeadSelection {
        head_index,
        nearest_index,
        bearing,
        yaw,
        angle,
        choice,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn square() -> Vec<Waypoint> {
        vec![
            Waypoint::planar(0.0, 0.0, 0.0, 0.0),
            Waypoint::planar(1.0, 0.0, 0.0, 0.0),
            Waypoint::planar(1.0, 1.0, 0.0, 0.0),
            Waypoint::planar(0.0, 1.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_waypoint_ahead_keeps_closest() {
        let track = square();
        let sel = select_head(&Point3D::planar(0.9, 0.05), 0.0, &track, 1).unwrap();
        assert_eq!(sel.head_index, 1);
        assert_eq!(sel.choice, HeadChoice::Closest);
        assert_relative_eq!(sel.angle, 0.4636476090008061, epsilon = 1e-9);
    }

    #[test]
    fn test_waypoint_behind_takes_next() {
        let track = square();
        let sel = select_head(&Point3D::planar(1.05, 0.0), 0.0, &track, 1).unwrap();
        assert_eq!(sel.head_index, 2);
        assert_eq!(sel.choice, HeadChoice::Next);
        assert_relative_eq!(sel.bearing, PI, epsilon = 1e-12);
        assert_relative_eq!(sel.angle, PI, epsilon = 1e-12);
    }

    #[test]
    fn test_next_wraps_around() {
        let track = square();
        // Approaching wp3 at (0,1) from above, heading -Y
        let sel = select_head(&Point3D::planar(0.0, 1.2), -FRAC_PI_2, &track, 3).unwrap();
        assert_eq!(sel.choice, HeadChoice::Closest);

        let sel = select_head(&Point3D::planar(-0.1, 0.9), PI, &track, 3).unwrap();
        // bearing ≈ 45°, yaw 180° → 135° off: behind
        assert_eq!(sel.head_index, 0);
        assert_eq!(sel.choice, HeadChoice::Next);
    }

    #[test]
    fn test_yaw_across_seam() {
        let track = square();
        // yaw just below 2π vs bearing just above 0 must not look like 360°
        let ego = Point3D::planar(0.5, -0.01);
        let sel = select_head(&ego, -0.05, &track, 1).unwrap();
        assert!(sel.angle < 0.1);
        assert_eq!(sel.head_index, 1);
    }

    #[test]
    fn test_exactly_perpendicular_is_ahead() {
        let track = vec![
            Waypoint::planar(0.0, 1.0, 0.0, 0.0),
            Waypoint::planar(5.0, 5.0, 0.0, 0.0),
        ];
        let sel = select_head(&Point3D::ZERO, 0.0, &track, 0).unwrap();
        assert_relative_eq!(sel.angle, FRAC_PI_2, epsilon = 1e-12);
        assert_eq!(sel.choice, HeadChoice::Closest);
    }

    #[test]
    fn test_single_waypoint_loops_to_itself() {
        let track = vec![Waypoint::planar(0.0, 0.0, 0.0, 0.0)];
        let sel = select_head(&Point3D::planar(1.0, 0.0), 0.0, &track, 0).unwrap();
        assert_eq!(sel.head_index, 0);
        assert_eq!(sel.choice, HeadChoice::Next);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            select_head(&Point3D::ZERO, 0.0, &[], 0),
            Err(MargaError::EmptyTrack)
        ));
        assert!(matches!(
            select_head(&Point3D::ZERO, 0.0, &square(), 4),
            Err(MargaError::InvalidWaypointIndex { index: 4, len: 4 })
        ));
    }
}
