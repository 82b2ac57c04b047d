//! Track waypoints and the ego pose.
//!
//! Waypoints and poses both carry a position and an orientation, but they
//! are distinct types with their own accessors: callers always know
//! statically which one they hold.

use std::fmt;

use super::geometry::{Point3D, Quaternion, Vector3};

/// Target velocity of a waypoint (linear m/s, angular rad/s).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Twist {
    /// Linear velocity; `x` is the forward target speed.
    pub linear: Vector3,
    /// Angular velocity.
    pub angular: Vector3,
}

impl Twist {
    /// Forward-only twist with the given target speed.
    pub const fn forward(velocity: f64) -> Self {
        Self {
            linear: Vector3::new(velocity, 0.0, 0.0),
            angular: Vector3::ZERO,
        }
    }
}

impl fmt::Display for Twist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (l, a) = (self.linear, self.angular);
        write!(
            f,
            "twist[lin({:.2}, {:.2}, {:.2}), ang({:.2}, {:.2}, {:.2})]",
            l.x, l.y, l.z, a.x, a.y, a.z
        )
    }
}

/// A point on the reference track.
///
/// The selection engine reads only the position; orientation and twist
/// travel through to the published window untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Waypoint {
    pub position: Point3D,
    pub orientation: Quaternion,
    pub twist: Twist,
}

impl Waypoint {
    pub fn new(position: Point3D, orientation: Quaternion, twist: Twist) -> Self {
        Self {
            position,
            orientation,
            twist,
        }
    }

    /// Planar waypoint facing `yaw` with a forward target speed.
    pub fn planar(x: f64, y: f64, yaw: f64, velocity: f64) -> Self {
        Self::new(
            Point3D::planar(x, y),
            Quaternion::from_yaw(yaw),
            Twist::forward(velocity),
        )
    }

    /// Target forward velocity (linear x of the twist).
    #[inline]
    pub fn velocity(&self) -> f64 {
        self.twist.linear.x
    }

    /// Override the target forward velocity.
    #[inline]
    pub fn set_velocity(&mut self, velocity: f64) {
        self.twist.linear.x = velocity;
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.position, self.orientation, self.twist)
    }
}

/// Time-stamped vehicle pose.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EgoPose {
    pub position: Point3D,
    pub orientation: Quaternion,
    /// Timestamp in microseconds.
    pub timestamp_us: u64,
}

impl EgoPose {
    pub fn new(position: Point3D, orientation: Quaternion, timestamp_us: u64) -> Self {
        Self {
            position,
            orientation,
            timestamp_us,
        }
    }

    /// Planar pose at (x, y) with heading `yaw`.
    pub fn planar(x: f64, y: f64, yaw: f64, timestamp_us: u64) -> Self {
        Self::new(Point3D::planar(x, y), Quaternion::from_yaw(yaw), timestamp_us)
    }

    /// Vehicle heading in radians, (-π, π].
    #[inline]
    pub fn yaw(&self) -> f64 {
        self.orientation.yaw()
    }

    /// Display adapter printing the timestamp relative to `start_us`.
    pub fn display_since(&self, start_us: u64) -> PoseDisplay<'_> {
        PoseDisplay {
            pose: self,
            start_us,
        }
    }
}

/// Formats a pose as `t(<s> s) - pos(..) - orient(..)`.
pub struct PoseDisplay<'a> {
    pose: &'a EgoPose,
    start_us: u64,
}

impl fmt::Display for PoseDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.pose.timestamp_us.saturating_sub(self.start_us) as f64 / 1e6;
        write!(
            f,
            "t({:.2} s) - {} - {}",
            secs, self.pose.position, self.pose.orientation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waypoint_velocity() {
        let mut wp = Waypoint::planar(1.0, 2.0, 0.0, 4.5);
        assert_eq!(wp.velocity(), 4.5);
        wp.set_velocity(2.0);
        assert_eq!(wp.velocity(), 2.0);
        assert_eq!(wp.twist.angular, Vector3::ZERO);
    }

    #[test]
    fn test_waypoint_display() {
        let wp = Waypoint::planar(1.0, 0.0, 0.0, 11.11);
        assert_eq!(
            wp.to_string(),
            "pos(1.00, 0.00, 0.00) - orient(0.00, 0.00, 0.00, 1.00) - \
             twist[lin(11.11, 0.00, 0.00), ang(0.00, 0.00, 0.00)]"
        );
    }

    #[test]
    fn test_pose_display_relative_time() {
        let pose = EgoPose::planar(0.5, 0.25, 0.0, 3_500_000);
        let text = pose.display_since(1_000_000).to_string();
        assert!(text.starts_with("t(2.50 s) - pos(0.50, 0.25, 0.00)"));
    }
}
