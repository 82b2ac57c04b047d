//! Lookahead selection pipeline.
//!
//! Three stages, each a pure function over the track:
//!
//! 1. [`find_nearest`]: closest waypoint to the vehicle
//! 2. [`select_head`]: closest waypoint or its successor, by heading
//! 3. [`build_window`]: fixed-length circular slice from the head

mod heading;
mod nearest;
mod window;

pub use heading::{HeadChoice, HeadSelection, select_head};
pub use nearest::{Nearest, find_nearest};
pub use window::{LOOKAHEAD_WPS, LookaheadWindow, build_window};
