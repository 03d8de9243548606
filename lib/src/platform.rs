//! Collaborator seams: the display, clock, random source and button reader
//! the simulation is driven through, plus the std-backed implementations.

use crate::Error;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};
use tracing::warn;

/// 24-bit color as the badge display takes it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(c: u8) -> Self {
        Self { r: c, g: c, b: c }
    }
}

/// Drawing surface. Calls between `open` and `update` form one frame.
pub trait Display {
    fn open(&mut self) -> Result<(), Error> {
        Ok(())
    }
    fn clear(&mut self) -> Result<(), Error>;
    fn pixel(&mut self, x: i32, y: i32, color: Rgb) -> Result<(), Error>;
    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) -> Result<(), Error>;
    fn print(&mut self, text: &str, fg: Rgb, x: i32, y: i32, font: u8) -> Result<(), Error>;
    /// Commit everything drawn since `open`.
    fn update(&mut self) -> Result<(), Error>;
}

/// Monotonic millisecond clock with a blocking sleep.
pub trait Clock {
    fn now_ms(&self) -> u64;
    fn sleep_ms(&mut self, ms: u64);
}

/// Inclusive integer generator used for star placement.
pub trait RandomSource {
    fn uniform_int(&mut self, lo: i32, hi: i32) -> i32;
}

/// Reads the queried buttons as an active-low mask (clear bit = pressed).
pub trait ButtonInput {
    fn read(&mut self, mask: u8) -> Result<u8, Error>;
}

/// One open frame on a display.
///
/// Draw calls go through `Deref`. The frame is committed by `commit`, or by
/// `Drop` if the cycle bails out early, so the display never stays half drawn.
pub struct FrameGuard<'a, D: Display + ?Sized> {
    display: &'a mut D,
    committed: bool,
}

impl<'a, D: Display + ?Sized> FrameGuard<'a, D> {
    pub fn open(display: &'a mut D) -> Result<Self, Error> {
        display.open()?;
        Ok(Self {
            display,
            committed: false,
        })
    }

    pub fn commit(mut self) -> Result<(), Error> {
        self.committed = true;
        self.display.update()
    }
}

impl<D: Display + ?Sized> Deref for FrameGuard<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        &*self.display
    }
}

impl<D: Display + ?Sized> DerefMut for FrameGuard<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        &mut *self.display
    }
}

impl<D: Display + ?Sized> Drop for FrameGuard<'_, D> {
    fn drop(&mut self) {
        if !self.committed {
            if let Err(e) = self.display.update() {
                warn!("deferred frame commit failed: {}", e);
            }
        }
    }
}

/// Wall clock backed by `Instant` and `thread::sleep`.
pub struct StdClock {
    origin: Instant,
}

impl StdClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for StdClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn sleep_ms(&mut self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Adapts any `rand` generator to [`RandomSource`].
pub struct RngSource<R>(pub R);

impl RngSource<rand::rngs::ThreadRng> {
    pub fn thread() -> Self {
        RngSource(rand::rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn uniform_int(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.0.random_range(lo..=hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DrawOp, RecordingDisplay};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_guard_commits_once() {
        let mut display = RecordingDisplay::default();
        {
            let mut frame = FrameGuard::open(&mut display).unwrap();
            frame.pixel(1, 2, Rgb::gray(7)).unwrap();
            frame.commit().unwrap();
        }
        assert_eq!(display.opened, 1);
        assert_eq!(display.commits, 1);
        assert_eq!(display.ops, vec![DrawOp::Pixel(1, 2, Rgb::gray(7))]);
    }

    #[test]
    fn test_guard_commits_on_early_exit() {
        fn draw_then_fail(display: &mut RecordingDisplay) -> Result<(), Error> {
            let mut frame = FrameGuard::open(display)?;
            frame.pixel(0, 0, Rgb::BLACK)?;
            frame.line(0, 0, 3, 3, Rgb::BLACK)?;
            frame.commit()
        }

        let mut display = RecordingDisplay {
            fail_lines: true,
            ..Default::default()
        };
        assert!(draw_then_fail(&mut display).is_err());
        assert_eq!(display.commits, 1);
    }

    #[test]
    fn test_rng_source_stays_in_range() {
        let mut rng = RngSource(StdRng::seed_from_u64(7));
        for _ in 0..500 {
            let v = rng.uniform_int(-3, 3);
            assert!((-3..=3).contains(&v));
        }
        assert_eq!(rng.uniform_int(5, 5), 5);
    }
}
