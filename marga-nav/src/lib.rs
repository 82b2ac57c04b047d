//! # MargaNav
//!
//! Lookahead waypoint selection over a closed-loop reference track.
//!
//! On every pose update that moved the vehicle far enough, MargaNav finds
//! the track waypoint closest to the vehicle, decides from the vehicle
//! heading whether that waypoint or its successor lies ahead, and
//! publishes the next [`LOOKAHEAD_WPS`](selection::LOOKAHEAD_WPS)
//! waypoints (wrapping around the loop) for the downstream follower.
//!
//! ## Quick Start
//!
//! ```
//! use marga_nav::{EgoPose, MargaConfig, TrackMap, Waypoint, WaypointUpdater};
//!
//! let track = TrackMap::new(vec![
//!     Waypoint::planar(0.0, 0.0, 0.0, 5.0),
//!     Waypoint::planar(1.0, 0.0, 0.0, 5.0),
//!     Waypoint::planar(1.0, 1.0, 0.0, 5.0),
//!     Waypoint::planar(0.0, 1.0, 0.0, 5.0),
//! ])?;
//! let mut updater = WaypointUpdater::new(track, &MargaConfig::default());
//!
//! let window = updater.on_pose(EgoPose::planar(0.9, 0.05, 0.0, 0))?.unwrap();
//! assert_eq!(window.head_index, 1);
//! assert_eq!(window.len(), 200);
//! # Ok::<(), marga_nav::MargaError>(())
//! ```
//!
//! ## Coordinate System
//!
//! ROS REP-103: X forward, Y left, Z up; yaw counter-clockwise from +X.

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod overlay;
pub mod selection;
pub mod track;
pub mod tracker;
pub mod updater;

pub use config::MargaConfig;
pub use core::{EgoPose, Point3D, Quaternion, Twist, Waypoint};
pub use error::{MargaError, Result};
pub use overlay::{OverlayIndex, WP_UNDEFINED};
pub use selection::{LOOKAHEAD_WPS, LookaheadWindow, build_window, find_nearest, select_head};
pub use track::TrackMap;
pub use tracker::PoseTracker;
pub use updater::{LogSink, WaypointUpdater, WindowSink};
