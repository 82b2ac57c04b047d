//! Waypoint updater: the event handlers tying the selection pipeline together.
//!
//! One [`WaypointUpdater`] exists per run, created once the track is known.
//! Every incoming event is handled to completion before the next one:
//!
//! ```text
//! pose ──► PoseTracker ──► find_nearest ──► select_head ──► build_window ──► WindowSink
//!            (debounce)
//! traffic / obstacle ──► OverlayIndices (validated, diagnostic only)
//! ```

use tracing::{debug, info};

use crate::config::MargaConfig;
use crate::core::EgoPose;
use crate::error::{MargaError, Result};
use crate::overlay::{OverlayIndex, OverlayIndices, OverlayKind};
use crate::selection::{HeadChoice, LookaheadWindow, build_window, find_nearest, select_head};
use crate::track::TrackMap;
use crate::tracker::PoseTracker;

/// Consumer of published lookahead windows.
///
/// Delivery is fire-and-forget: the updater neither waits for nor receives
/// any acknowledgement.
pub trait WindowSink {
    fn publish(&mut self, window: &LookaheadWindow);
}

/// Collects every published window.
impl WindowSink for Vec<LookaheadWindow> {
    fn publish(&mut self, window: &LookaheadWindow) {
        self.push(window.clone());
    }
}

/// Logs a one-line summary of each published window.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl WindowSink for LogSink {
    fn publish(&mut self, window: &LookaheadWindow) {
        match window.head() {
            Some(head) => info!(
                "Published {} waypoints from #{} at t={}us, head {}",
                window.len(),
                window.head_index,
                window.timestamp_us,
                head.position
            ),
            None => info!("Published empty window at t={}us", window.timestamp_us),
        }
    }
}

/// Owns the track, the pose state and the overlay indices of one run.
#[derive(Debug)]
pub struct WaypointUpdater {
    track: TrackMap,
    tracker: PoseTracker,
    overlays: OverlayIndices,
    lookahead_wps: usize,
    /// Maximum track velocity (m/s)
    v_max: f64,
    verbose: bool,
    /// Timestamp of the first pose seen, for relative times in logs
    start_us: Option<u64>,
    published: u64,
}

impl WaypointUpdater {
    /// Create the updater for a loaded track.
    pub fn new(track: TrackMap, config: &MargaConfig) -> Self {
        let v_max = config.track.max_velocity_mps();
        info!(
            "Track loaded: {} waypoints, v_max {:.2} m/s ({:.1} km/h)",
            track.len(),
            v_max,
            config.track.max_velocity_kmh
        );

        Self {
            track,
            tracker: PoseTracker::new(config.updater.min_update_distance),
            overlays: OverlayIndices::default(),
            lookahead_wps: config.updater.lookahead_wps,
            v_max,
            verbose: config.updater.verbose,
            start_us: None,
            published: 0,
        }
    }

    /// Handle a pose update.
    ///
    /// Returns the new window when the pose passed the debounce filter,
    /// `None` when it was suppressed. A pose with a non-finite position
    /// is rejected before it reaches the tracker.
    pub fn on_pose(&mut self, pose: EgoPose) -> Result<Option<LookaheadWindow>> {
        if !pose.position.is_finite() {
            return Err(MargaError::UnsupportedShape(format!(
                "ego pose at t={}us has non-finite {}",
                pose.timestamp_us, pose.position
            )));
        }
        let start_us = *self.start_us.get_or_insert(pose.timestamp_us);

        if self.verbose {
            debug!(
                "Ego pose: {} - dist({:.2} m)",
                pose.display_since(start_us),
                self.tracker.distance_travelled(&pose)
            );
        }

        if !self.tracker.accept(pose) {
            return Ok(None);
        }

        let window = self.compute_window()?;
        self.published += 1;
        Ok(Some(window))
    }

    /// Handle a pose update and hand any new window to `sink`.
    ///
    /// Returns whether a window was published.
    pub fn handle_pose(&mut self, pose: EgoPose, sink: &mut dyn WindowSink) -> Result<bool> {
        match self.on_pose(pose)? {
            Some(window) => {
                sink.publish(&window);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Compute the lookahead window for the last accepted pose.
    pub fn compute_window(&self) -> Result<LookaheadWindow> {
        let pose = self.tracker.current();
        let waypoints = self.track.waypoints();

        let nearest = find_nearest(waypoints, &pose.position)?;
        if self.verbose {
            debug!(
                "Closest waypoint ({}/{}) (dist: {:.2} m): {}",
                nearest.index,
                waypoints.len(),
                nearest.distance,
                waypoints[nearest.index]
            );
        }

        let selection = select_head(&pose.position, pose.yaw(), waypoints, nearest.index)?;
        if self.verbose {
            if selection.choice == HeadChoice::Next {
                let next = &waypoints[selection.head_index];
                debug!(
                    "Next waypoint ({}/{}) (dist: {:.2} m): {}",
                    selection.head_index,
                    waypoints.len(),
                    pose.position.distance(&next.position),
                    next
                );
            }
            debug!(
                "First WP: heading({:.2}) <> yaw({:.2}) => {:.2} {}",
                selection.bearing,
                selection.yaw,
                selection.angle,
                selection.choice.label()
            );
        }

        build_window(
            waypoints,
            selection.head_index,
            self.lookahead_wps,
            pose.timestamp_us,
        )
    }

    /// Handle a traffic light index update (`-1`: no red light ahead).
    pub fn on_traffic(&mut self, raw: i32) -> Result<OverlayIndex> {
        self.update_overlay(OverlayKind::Traffic, raw)
    }

    /// Handle an obstacle index update (`-1`: no obstacle ahead).
    pub fn on_obstacle(&mut self, raw: i32) -> Result<OverlayIndex> {
        self.update_overlay(OverlayKind::Obstacle, raw)
    }

    fn update_overlay(&mut self, kind: OverlayKind, raw: i32) -> Result<OverlayIndex> {
        let index = self.overlays.update(kind, raw, &self.track)?;
        if self.verbose
            && let OverlayIndex::At(i) = index
        {
            info!("{} update ({}): {}", kind, i, self.track.waypoints()[i].position);
        }
        Ok(index)
    }

    pub fn track(&self) -> &TrackMap {
        &self.track
    }

    pub fn tracker(&self) -> &PoseTracker {
        &self.tracker
    }

    pub fn overlays(&self) -> &OverlayIndices {
        &self.overlays
    }

    /// Maximum track velocity in m/s.
    pub fn max_velocity(&self) -> f64 {
        self.v_max
    }

    /// Number of windows computed so far.
    pub fn published_count(&self) -> u64 {
        self.published
    }
}
