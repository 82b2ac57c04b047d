//! Scenario files and event replay.
//!
//! - [`Scenario`]: YAML description of a track and an event stream
//! - [`Replay`]: feeds events through a [`WaypointUpdater`](crate::updater::WaypointUpdater)

mod replay;
mod scenario;

pub use replay::{Replay, ReplayStats};
pub use scenario::{Event, PoseRecord, QuaternionRecord, Scenario, WaypointRecord, to_waypoints};
