//! Time subsystem.
//!
//! Frame timing utilities that do not depend on the runtime:
//! - one `FrameClock` per window (or per render loop)
//! - call `tick()` once per presented frame to obtain `FrameTime`
//! - `FpsCounter` turns frame deltas into a once-per-second rate

mod fps;
mod frame_clock;

pub use fps::FpsCounter;
pub use frame_clock::{FrameClock, FrameTime};
