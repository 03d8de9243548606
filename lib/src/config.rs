use crate::{Bounds, Error, Projection};
use serde::{Deserialize, Serialize};

/// How a warp change is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarpMode {
    /// Ramp toward the new factor by `warp_step` per frame
    Smooth,
    /// Jump straight to the new integer factor
    Stepped,
}

/// When a star is sent back to the far plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecyclePolicy {
    /// Only once it has passed the viewer (z underflow)
    OnUnderflow,
    /// Also as soon as it projects outside the screen
    Eager,
}

/// Fixed initialization constants. Built once, never reloaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Frame budget [ms]
    pub cycle_time_ms: u64,
    /// Focal length; smaller means a wider field of view
    pub focal: f64,
    pub z_max: i32,
    pub x_max: i32,
    pub y_max: i32,
    pub n_stars: usize,
    pub initial_warp: u8,
    /// Warp change per frame while ramping
    pub warp_step: f64,
    pub warp_mode: WarpMode,
    /// 0 keeps every star white, 255 fades stars at `z_max` to black
    pub shading: u8,
    pub width: i32,
    pub height: i32,
    pub load_capacity: usize,
    pub recycle: RecyclePolicy,
    /// Spawn the first stars back to front
    pub sort_initial: bool,
    pub overlay: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cycle_time_ms: 40,
            focal: 40.0,
            z_max: 1000,
            x_max: 1000,
            y_max: 1000,
            n_stars: 50,
            initial_warp: 4,
            warp_step: 0.2,
            warp_mode: WarpMode::Smooth,
            shading: 255,
            width: 160,
            height: 80,
            load_capacity: 32,
            recycle: RecyclePolicy::OnUnderflow,
            sort_initial: true,
            overlay: true,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), Error> {
        if self.cycle_time_ms == 0 {
            return Err(Error::config("cycle_time_ms", "must be positive"));
        }
        if !(self.focal > 0.0) {
            return Err(Error::config("focal", "must be positive"));
        }
        if self.z_max <= 0 {
            return Err(Error::config("z_max", "must be positive"));
        }
        if self.x_max < 0 || self.y_max < 0 {
            return Err(Error::config("x_max/y_max", "must not be negative"));
        }
        if self.n_stars == 0 {
            return Err(Error::config("n_stars", "must be positive"));
        }
        if self.initial_warp > 9 {
            return Err(Error::config("initial_warp", "must be within 0..=9"));
        }
        if self.warp_mode == WarpMode::Smooth && !(self.warp_step > 0.0 && self.warp_step <= 1.0) {
            return Err(Error::config("warp_step", "must be within (0, 1]"));
        }
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::config("width/height", "must be positive"));
        }
        if self.load_capacity == 0 {
            return Err(Error::config("load_capacity", "must be positive"));
        }
        Ok(())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            x_max: self.x_max,
            y_max: self.y_max,
            z_max: self.z_max,
        }
    }

    pub fn projection(&self) -> Projection {
        Projection {
            width: self.width,
            height: self.height,
            focal: self.focal,
            shading: self.shading,
            z_max: self.z_max,
        }
    }
}
