//! Application layer for the orrery: assembles a [`Simulation`] from config
//! and manifest, owns pause state via [`SimClock`], and drives everything
//! through the fixed-timestep [`FrameLoop`].

mod clock;
mod frame_loop;
mod simulation;

pub use clock::SimClock;
pub use frame_loop::{DEFAULT_TICK_RATE, FrameLoop, MAX_FRAME_TIME};
pub use simulation::{BuildError, Simulation};
