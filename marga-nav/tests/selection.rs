//! End-to-end selection behavior on reference tracks.

mod common;

use approx::assert_relative_eq;
use std::f64::consts::TAU;

use common::{circle_track, quiet_config, square_track};
use marga_nav::{
    EgoPose, LOOKAHEAD_WPS, LookaheadWindow, MargaError, OverlayIndex, Point3D, Waypoint,
    WaypointUpdater, build_window, find_nearest, select_head,
};

fn assert_window_follows(window: &LookaheadWindow, track: &[Waypoint], head: usize) {
    assert_eq!(window.len(), LOOKAHEAD_WPS);
    assert_eq!(window.head_index, head);
    for (i, wp) in window.waypoints.iter().enumerate() {
        assert_eq!(*wp, track[(head + i) % track.len()], "entry {}", i);
    }
}

#[test]
fn test_nearest_ahead_heads_window() {
    let track = square_track();
    let mut updater = WaypointUpdater::new(track.clone(), &quiet_config());

    let window = updater
        .on_pose(EgoPose::planar(0.9, 0.05, 0.0, 10))
        .unwrap()
        .expect("pose should be accepted");

    assert_window_follows(&window, track.waypoints(), 1);
    assert_eq!(window.waypoints[0], track.waypoints()[1]);
    assert_eq!(window.waypoints[3], track.waypoints()[0]);
    assert_eq!(window.timestamp_us, 10);
}

#[test]
fn test_passed_nearest_moves_to_successor() {
    let track = square_track();
    let mut updater = WaypointUpdater::new(track.clone(), &quiet_config());

    let window = updater
        .on_pose(EgoPose::planar(1.05, 0.0, 0.0, 20))
        .unwrap()
        .unwrap();

    assert_window_follows(&window, track.waypoints(), 2);
    let heads: Vec<f64> = window.waypoints[..4].iter().map(|w| w.velocity()).collect();
    assert_eq!(heads, vec![3.0, 4.0, 1.0, 2.0]);
}

#[test]
fn test_overlay_sentinel_and_range() {
    let mut updater = WaypointUpdater::new(square_track(), &quiet_config());

    assert_eq!(updater.on_traffic(-1).unwrap(), OverlayIndex::None);
    assert!(updater.overlays().traffic.is_none());

    let err = updater.on_traffic(4).unwrap_err();
    assert!(matches!(err, MargaError::InvalidWaypointIndex { index: 4, len: 4 }));
    assert!(updater.on_obstacle(-3).is_err());
}

#[test]
fn test_debounce_never_publishes_twice() {
    let mut updater = WaypointUpdater::new(square_track(), &quiet_config());
    let mut windows: Vec<LookaheadWindow> = Vec::new();

    let poses = [
        EgoPose::planar(0.5, 0.0, 0.0, 1),
        EgoPose::planar(0.503, 0.0, 0.0, 2),
        EgoPose::planar(0.5, 0.009, 0.0, 3),
        EgoPose::planar(0.52, 0.0, 0.0, 4),
    ];
    for pose in poses {
        updater.handle_pose(pose, &mut windows).unwrap();
    }

    let stamps: Vec<u64> = windows.iter().map(|w| w.timestamp_us).collect();
    assert_eq!(stamps, vec![1, 4]);
}

#[test]
fn test_velocity_passthrough_on_circle() {
    let track = circle_track(50.0, 360, 11.1);
    let mut updater = WaypointUpdater::new(track.clone(), &quiet_config());

    let window = updater
        .on_pose(EgoPose::planar(0.0, 50.0, TAU / 2.0, 0))
        .unwrap()
        .unwrap();

    assert_eq!(window.len(), LOOKAHEAD_WPS);
    assert!(window.waypoints.iter().all(|w| w.velocity() == 11.1));
    assert_eq!(window.waypoints[0], track.waypoints()[window.head_index]);
}

#[test]
fn test_driving_around_circle_advances_head() {
    let track = circle_track(20.0, 100, 5.0);
    let mut updater = WaypointUpdater::new(track.clone(), &quiet_config());

    let mut last_head = None;
    // Half a step past each waypoint, driving counter-clockwise
    for step in 0..250u64 {
        let a = TAU * (step as f64 + 0.3) / 100.0;
        let pose = EgoPose::planar(20.0 * a.cos(), 20.0 * a.sin(), a + TAU / 4.0, step);
        let window = updater.on_pose(pose).unwrap().unwrap();

        // Waypoint `step` is behind, so the window must start at the next one
        assert_eq!(window.head_index, (step as usize + 1) % 100);
        if let Some(prev) = last_head {
            assert_eq!(window.head_index, (prev + 1) % 100);
        }
        last_head = Some(window.head_index);
    }
}

#[test]
fn test_pipeline_functions_compose() {
    let track = square_track();
    let position = Point3D::planar(0.2, 0.95);
    let yaw = -TAU / 4.0;

    let nearest = find_nearest(track.waypoints(), &position).unwrap();
    assert_eq!(nearest.index, 3);
    assert_relative_eq!(nearest.distance, (0.04f64 + 0.0025).sqrt(), epsilon = 1e-12);

    // Heading -Y, waypoint #3 at (0,1) is about 104° off: behind
    let selection = select_head(&position, yaw, track.waypoints(), nearest.index).unwrap();
    assert_eq!(selection.head_index, 0);

    let window = build_window(track.waypoints(), selection.head_index, 6, 99).unwrap();
    let xs: Vec<f64> = window.waypoints.iter().map(|w| w.position.x).collect();
    assert_eq!(xs, vec![0.0, 1.0, 1.0, 0.0, 0.0, 1.0]);
}
