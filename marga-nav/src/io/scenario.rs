//! Scenario YAML parsing for replaying event streams.
//!
//! A scenario defines:
//! - An optional track, loaded before any event
//! - A sequence of events (track delivery, poses, traffic / obstacle indices)
//!
//! ```yaml
//! name: square
//! track:
//!   - { x: 0.0, y: 0.0, velocity: 4.0 }
//!   - { x: 1.0, y: 0.0, velocity: 4.0 }
//! events:
//!   - { type: pose, timestamp_us: 1000, x: 0.9, y: 0.05, yaw: 0.0 }
//!   - { type: traffic, index: -1 }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::{EgoPose, Point3D, Quaternion, Twist, Vector3, Waypoint};
use crate::error::{MargaError, Result};

/// A replayable scenario loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    /// Human-readable scenario name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: String,

    /// Track delivered before the first event
    #[serde(default)]
    pub track: Option<Vec<WaypointRecord>>,

    /// Events in arrival order
    #[serde(default)]
    pub events: Vec<Event>,
}

/// Quaternion as written in scenario files
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct QuaternionRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

/// Track waypoint record
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WaypointRecord {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    /// Full orientation (exclusive with `yaw`)
    #[serde(default)]
    pub orientation: Option<QuaternionRecord>,
    /// Heading in radians (exclusive with `orientation`)
    #[serde(default)]
    pub yaw: Option<f64>,
    /// Target forward velocity in m/s (exclusive with `linear`)
    #[serde(default)]
    pub velocity: Option<f64>,
    /// Target linear velocity [x, y, z] in m/s (exclusive with `velocity`)
    #[serde(default)]
    pub linear: Option<[f64; 3]>,
    /// Target angular velocity [x, y, z] in rad/s
    #[serde(default)]
    pub angular: [f64; 3],
}

/// Ego pose record
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoseRecord {
    /// Timestamp in microseconds
    pub timestamp_us: u64,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub orientation: Option<QuaternionRecord>,
    #[serde(default)]
    pub yaw: Option<f64>,
}

/// An input event
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Track waypoint list (delivered once)
    Track { waypoints: Vec<WaypointRecord> },
    /// Ego pose update
    Pose(PoseRecord),
    /// Index of the waypoint at the next red light stop line (-1: none)
    Traffic { index: i32 },
    /// Index of the waypoint at the next obstacle (-1: none)
    Obstacle { index: i32 },
}

impl Scenario {
    /// Load a scenario from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MargaError::Scenario(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a scenario from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

fn position(x: f64, y: f64, z: f64) -> Result<Point3D> {
    let point = Point3D::new(x, y, z);
    if !point.is_finite() {
        return Err(MargaError::UnsupportedShape(format!(
            "position has non-finite coordinates ({}, {}, {})",
            x, y, z
        )));
    }
    Ok(point)
}

fn linear_velocity(velocity: Option<f64>, linear: Option<[f64; 3]>) -> Result<Vector3> {
    match (velocity, linear) {
        (Some(_), Some(_)) => Err(MargaError::UnsupportedShape(
            "velocity given both as forward speed and linear vector".to_string(),
        )),
        (Some(v), None) => Ok(Vector3::new(v, 0.0, 0.0)),
        (None, Some([x, y, z])) => Ok(Vector3::new(x, y, z)),
        (None, None) => Ok(Vector3::ZERO),
    }
}

fn orientation(quat: Option<QuaternionRecord>, yaw: Option<f64>) -> Result<Quaternion> {
    match (quat, yaw) {
        (Some(_), Some(_)) => Err(MargaError::UnsupportedShape(
            "orientation given both as quaternion and yaw".to_string(),
        )),
        (Some(q), None) => {
            let q = Quaternion::new(q.x, q.y, q.z, q.w);
            let norm = q.norm();
            if !norm.is_finite() || norm < 1e-9 {
                return Err(MargaError::UnsupportedShape(format!(
                    "quaternion has no usable orientation (norm {})",
                    norm
                )));
            }
            Ok(q)
        }
        (None, Some(yaw)) => Ok(Quaternion::from_yaw(yaw)),
        (None, None) => Ok(Quaternion::IDENTITY),
    }
}

impl WaypointRecord {
    /// Convert to a track waypoint.
    pub fn to_waypoint(&self) -> Result<Waypoint> {
        let [ax, ay, az] = self.angular;
        Ok(Waypoint::new(
            position(self.x, self.y, self.z)?,
            orientation(self.orientation, self.yaw)?,
            Twist {
                linear: linear_velocity(self.velocity, self.linear)?,
                angular: Vector3::new(ax, ay, az),
            },
        ))
    }
}

impl PoseRecord {
    /// Convert to an ego pose.
    pub fn to_pose(&self) -> Result<EgoPose> {
        Ok(EgoPose::new(
            position(self.x, self.y, self.z)?,
            orientation(self.orientation, self.yaw)?,
            self.timestamp_us,
        ))
    }
}

/// Convert a list of waypoint records, stopping at the first bad one.
pub fn to_waypoints(records: &[WaypointRecord]) -> Result<Vec<Waypoint>> {
    records.iter().map(WaypointRecord::to_waypoint).collect()
}
