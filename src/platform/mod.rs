//! Platform abstraction layer
//!
//! Host-agnostic pieces of the browser/native glue:
//! - Frame timing (refresh timestamps to simulation deltas)
//! - Input translation (key names, pointer coordinates)

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{Direction, InputState};
