//! Debounced ego pose tracking.
//!
//! Pose updates arrive far more often than the vehicle moves a meaningful
//! distance. [`PoseTracker`] accepts a pose only once the vehicle has
//! travelled at least `min_update_distance` since the last accepted pose,
//! so the lookahead window is recomputed only on real motion.
//!
//! # Example
//!
//! ```
//! use marga_nav::core::EgoPose;
//! use marga_nav::tracker::PoseTracker;
//!
//! let mut tracker = PoseTracker::new(0.01);
//!
//! assert!(tracker.accept(EgoPose::planar(1.0, 0.0, 0.0, 100)));
//! // Moved 5 mm, below the threshold
//! assert!(!tracker.accept(EgoPose::planar(1.005, 0.0, 0.0, 200)));
//! assert_eq!(tracker.history().count(), 1);
//! ```

use crate::core::EgoPose;

/// Minimum distance (meters) the vehicle must travel before a new pose is accepted.
pub const MIN_UPDATE_DIST: f64 = 0.01;

/// Number of accepted poses kept in the history.
pub const POSE_QUEUE_SIZE: usize = 50;

/// Fixed-capacity ring buffer of the most recent accepted poses.
///
/// Once full, each push overwrites the oldest entry.
#[derive(Clone, Debug)]
pub struct PoseHistory {
    slots: [EgoPose; POSE_QUEUE_SIZE],
    /// Slot the next push writes to.
    next: usize,
    len: usize,
}

impl Default for PoseHistory {
    fn default() -> Self {
        Self {
            slots: [EgoPose::default(); POSE_QUEUE_SIZE],
            next: 0,
            len: 0,
        }
    }
}

impl PoseHistory {
    pub const fn capacity(&self) -> usize {
        POSE_QUEUE_SIZE
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&mut self, pose: EgoPose) {
        self.slots[self.next] = pose;
        self.next = (self.next + 1) % POSE_QUEUE_SIZE;
        self.len = (self.len + 1).min(POSE_QUEUE_SIZE);
    }

    /// Most recently pushed pose.
    pub fn latest(&self) -> Option<&EgoPose> {
        if self.len == 0 {
            return None;
        }
        Some(&self.slots[(self.next + POSE_QUEUE_SIZE - 1) % POSE_QUEUE_SIZE])
    }

    /// Poses from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &EgoPose> + '_ {
        let start = (self.next + POSE_QUEUE_SIZE - self.len) % POSE_QUEUE_SIZE;
        (0..self.len).map(move |i| &self.slots[(start + i) % POSE_QUEUE_SIZE])
    }
}

/// Debounce filter holding the latest accepted pose.
///
/// The reference pose starts at the origin, so an initial pose closer than
/// `min_update_distance` to (0, 0, 0) is rejected like any other small move.
#[derive(Clone, Debug)]
pub struct PoseTracker {
    min_update_distance: f64,
    current: EgoPose,
    history: PoseHistory,
    accepted_count: u64,
    rejected_count: u64,
}

impl Default for PoseTracker {
    fn default() -> Self {
        Self::new(MIN_UPDATE_DIST)
    }
}

impl PoseTracker {
    /// Create a tracker with the given displacement threshold (meters).
    pub fn new(min_update_distance: f64) -> Self {
        Self {
            min_update_distance,
            current: EgoPose::default(),
            history: PoseHistory::default(),
            accepted_count: 0,
            rejected_count: 0,
        }
    }

    /// Distance between `pose` and the last accepted pose.
    pub fn distance_travelled(&self, pose: &EgoPose) -> f64 {
        pose.position.distance(&self.current.position)
    }

    /// Offer a new pose.
    ///
    /// Returns `true` if the pose was accepted (stored as current and
    /// pushed to the history); the caller should then recompute. A rejected
    /// pose leaves the tracker unchanged apart from the rejection counter.
    pub fn accept(&mut self, pose: EgoPose) -> bool {
        if self.distance_travelled(&pose) < self.min_update_distance {
            self.rejected_count += 1;
            return false;
        }

        self.current = pose;
        self.history.push(pose);
        self.accepted_count += 1;
        true
    }

    /// Last accepted pose (the origin before any pose was accepted).
    pub fn current(&self) -> &EgoPose {
        &self.current
    }

    /// Accepted poses, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &EgoPose> + '_ {
        self.history.iter()
    }

    pub fn min_update_distance(&self) -> f64 {
        self.min_update_distance
    }

    pub fn accepted_count(&self) -> u64 {
        self.accepted_count
    }

    pub fn rejected_count(&self) -> u64 {
        self.rejected_count
    }
}
