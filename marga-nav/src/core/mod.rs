//! Core types for MargaNav.
//!
//! Coordinates follow ROS REP-103 (X forward, Y left, Z up, yaw CCW
//! positive from +X).
//!
//! - [`Point3D`], [`Vector3`], [`Quaternion`]: geometric primitives
//! - [`Waypoint`], [`Twist`]: track points with their target velocity
//! - [`EgoPose`]: time-stamped vehicle pose

mod geometry;
pub mod math;
mod waypoint;

pub use geometry::{Point3D, Quaternion, Vector3};
pub use waypoint::{EgoPose, PoseDisplay, Twist, Waypoint};
