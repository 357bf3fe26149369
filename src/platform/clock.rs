//! Frame timing
//!
//! Converts display-refresh timestamps (milliseconds) into the per-tick
//! deltas the simulation consumes.

use crate::consts::{MAX_FRAME_DT, NOMINAL_DT};

/// Tracks the previous refresh timestamp
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Forget the previous timestamp (call when the loop restarts)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Seconds since the previous frame, capped at `MAX_FRAME_DT`
    ///
    /// The first frame after a reset reports the nominal 60 Hz delta. A
    /// timestamp that goes backwards yields zero.
    pub fn delta(&mut self, now_ms: f64) -> f64 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).clamp(0.0, MAX_FRAME_DT),
            None => NOMINAL_DT,
        };
        self.last_ms = Some(now_ms);
        dt
    }
}
