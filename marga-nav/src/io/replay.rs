//! Event replay through a [`WaypointUpdater`].
//!
//! Stands in for the message transport: events are dispatched one at a
//! time, in order, and the first error stops the replay.

use tracing::{debug, info};

use crate::config::MargaConfig;
use crate::core::Waypoint;
use crate::error::{MargaError, Result};
use crate::io::scenario::{Event, Scenario, to_waypoints};
use crate::overlay::{OverlayIndex, WP_UNDEFINED};
use crate::track::TrackMap;
use crate::updater::{WaypointUpdater, WindowSink};

/// Counters collected during a replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub events: usize,
    pub poses: usize,
    pub published: usize,
    pub suppressed: usize,
    pub overlay_updates: usize,
}

/// Drives one run: the updater exists only once the track has arrived.
pub struct Replay<S: WindowSink> {
    config: MargaConfig,
    updater: Option<WaypointUpdater>,
    sink: S,
    stats: ReplayStats,
}

impl<S: WindowSink> Replay<S> {
    pub fn new(config: MargaConfig, sink: S) -> Self {
        Self {
            config,
            updater: None,
            sink,
            stats: ReplayStats::default(),
        }
    }

    /// Deliver the track. Allowed once per run.
    pub fn load_track(&mut self, waypoints: Vec<Waypoint>) -> Result<()> {
        if self.updater.is_some() {
            return Err(MargaError::TrackAlreadyLoaded);
        }
        let track = TrackMap::new(waypoints)?;
        self.updater = Some(WaypointUpdater::new(track, &self.config));
        Ok(())
    }

    /// Dispatch a single event.
    pub fn handle(&mut self, event: &Event) -> Result<()> {
        self.stats.events += 1;
        match event {
            Event::Track { waypoints } => self.load_track(to_waypoints(waypoints)?),
            Event::Pose(record) => {
                let pose = record.to_pose()?;
                let updater = self.updater.as_mut().ok_or(MargaError::TrackNotLoaded)?;
                self.stats.poses += 1;
                if updater.handle_pose(pose, &mut self.sink)? {
                    self.stats.published += 1;
                } else {
                    self.stats.suppressed += 1;
                }
                Ok(())
            }
            Event::Traffic { index } => self.overlay(*index, WaypointUpdater::on_traffic),
            Event::Obstacle { index } => self.overlay(*index, WaypointUpdater::on_obstacle),
        }
    }

    fn overlay(
        &mut self,
        raw: i32,
        apply: fn(&mut WaypointUpdater, i32) -> Result<OverlayIndex>,
    ) -> Result<()> {
        match self.updater.as_mut() {
            Some(updater) => {
                apply(updater, raw)?;
                self.stats.overlay_updates += 1;
            }
            // Nothing to check against yet; only "none" is meaningful
            None if raw == WP_UNDEFINED => {
                debug!("Overlay reset before track load ignored");
            }
            None => return Err(MargaError::invalid_index(i64::from(raw), 0)),
        }
        Ok(())
    }

    /// Replay a whole scenario: its track first (if any), then every event.
    pub fn run(&mut self, scenario: &Scenario) -> Result<ReplayStats> {
        info!(
            "Replaying scenario '{}' ({} events)",
            scenario.name,
            scenario.events.len()
        );
        if let Some(records) = &scenario.track {
            self.load_track(to_waypoints(records)?)?;
        }
        for event in &scenario.events {
            self.handle(event)?;
        }
        info!(
            "Scenario '{}' done: {} poses, {} windows published, {} suppressed",
            scenario.name, self.stats.poses, self.stats.published, self.stats.suppressed
        );
        Ok(self.stats)
    }

    pub fn stats(&self) -> ReplayStats {
        self.stats
    }

    pub fn updater(&self) -> Option<&WaypointUpdater> {
        self.updater.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
