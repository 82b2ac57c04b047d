//! Test utilities for MargaNav integration tests.
//!
//! Track and pose builders shared across test files.

#![allow(dead_code)]

use std::f64::consts::TAU;

use marga_nav::{MargaConfig, TrackMap, Waypoint};

/// Unit square with corners (0,0), (1,0), (1,1), (0,1), indices 0–3.
pub fn square_track() -> TrackMap {
    TrackMap::new(vec![
        Waypoint::planar(0.0, 0.0, 0.0, 1.0),
        Waypoint::planar(1.0, 0.0, 0.0, 2.0),
        Waypoint::planar(1.0, 1.0, 0.0, 3.0),
        Waypoint::planar(0.0, 1.0, 0.0, 4.0),
    ])
    .unwrap()
}

/// Counter-clockwise circular track of `n` waypoints, each facing along the loop.
pub fn circle_track(radius: f64, n: usize, velocity: f64) -> TrackMap {
    let waypoints = (0..n)
        .map(|i| {
            let a = TAU * i as f64 / n as f64;
            Waypoint::planar(
                radius * a.cos(),
                radius * a.sin(),
                a + TAU / 4.0,
                velocity,
            )
        })
        .collect();
    TrackMap::new(waypoints).unwrap()
}

/// Default configuration with per-pose logging off.
pub fn quiet_config() -> MargaConfig {
    let mut config = MargaConfig::default();
    config.updater.verbose = false;
    config
}
