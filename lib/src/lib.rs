//! Warp-speed star field for a 160x80 badge display.
//!
//! Stars drift toward the viewer through a fixed volume and are drawn with
//! a pinhole projection, streaking while the warp factor ramps. The buttons
//! step the warp factor and toggle a diagnostic overlay; each frame is paced
//! to a fixed budget.

mod config;
mod error;
pub mod input;
pub mod load;
pub mod overlay;
mod platform;
pub mod render;
mod scheduler;
mod star;
pub mod warp;

#[cfg(test)]
mod testing;

pub use config::{Config, RecyclePolicy, WarpMode};
pub use error::Error;
pub use input::{Action, Button, ButtonEdgeDetector, ALL_RELEASED};
pub use load::{LoadMonitor, UNAVAILABLE};
pub use platform::{ButtonInput, Clock, Display, FrameGuard, RandomSource, Rgb, RngSource, StdClock};
pub use render::{Projection, ProjectionRenderer, RenderStats};
pub use scheduler::{pace, CycleReport, Phase, Simulation};
pub use star::{Bounds, Star, StarPool};
pub use warp::{WarpController, WarpState};

#[no_mangle]
pub fn step(
    sim: &mut Simulation,
    display: &mut dyn Display,
    clock: &mut dyn Clock,
    buttons: &mut dyn ButtonInput,
    rng: &mut dyn RandomSource,
) -> Result<CycleReport, Error> {
    sim.step(display, clock, buttons, rng)
}
