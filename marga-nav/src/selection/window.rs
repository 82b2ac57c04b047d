//! Fixed-length circular slice of the track.

use crate::core::Waypoint;
use crate::error::{MargaError, Result};

/// Number of waypoints published ahead of the vehicle.
pub const LOOKAHEAD_WPS: usize = 200;

/// Ordered waypoints ahead of the vehicle, starting at the head index.
///
/// Holds copies of the track waypoints; edits to the window never reach
/// the track.
#[derive(Clone, Debug, PartialEq)]
pub struct LookaheadWindow {
    /// Timestamp of the pose that triggered this window (microseconds).
    pub timestamp_us: u64,
    /// Track index of `waypoints[0]`.
    pub head_index: usize,
    pub waypoints: Vec<Waypoint>,
}

impl LookaheadWindow {
    /// Number of waypoints in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// First waypoint of the window.
    #[inline]
    pub fn head(&self) -> Option<&Waypoint> {
        self.waypoints.first()
    }

    /// Override the target forward velocity of the `i`-th window entry.
    pub fn set_velocity(&mut self, i: usize, velocity: f64) -> Result<()> {
        let len = self.waypoints.len();
        let wp = self
            .waypoints
            .get_mut(i)
            .ok_or_else(|| MargaError::invalid_index(i as i64, len))?;
        wp.set_velocity(velocity);
        Ok(())
    }
}

/// Build a window of exactly `k` waypoints starting at `head_index`.
///
/// `window[i] = waypoints[(head_index + i) mod N]`; entries repeat when
/// `k > N`. The result depends only on its inputs.
///
/// # Errors
/// - [`MargaError::EmptyTrack`] if `waypoints` is empty
/// - [`MargaError::InvalidWaypointIndex`] if `head_index >= N`
pub fn build_window(
    waypoints: &[Waypoint],
    head_index: usize,
    k: usize,
    timestamp_us: u64,
) -> Result<LookaheadWindow> {
    let n = waypoints.len();
    if n == 0 {
        return Err(MargaError::EmptyTrack);
    }
    if head_index >= n {
        return Err(MargaError::invalid_index(head_index as i64, n));
    }

    let slice = waypoints[head_index..]
        .iter()
        .chain(waypoints.iter().cycle())
        .take(k)
        .copied()
        .collect();

    Ok(LookaheadWindow {
        timestamp_us,
        head_index,
        waypoints: slice,
    })
}
