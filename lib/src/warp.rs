use crate::WarpMode;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const WARP_MIN: f64 = 0.0;
pub const WARP_MAX: f64 = 9.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WarpState {
    pub warp: f64,
    pub target: f64,
    /// Per-frame change; zero whenever `warp == target`
    pub step: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarpCommand {
    Decrease,
    Increase,
}

/// Owns the warp factor and ramps it toward integer targets.
///
/// A ramp is tracked as its starting value plus the number of frames taken,
/// so the frame that reaches the target is always `ceil(1 / step_size)`
/// frames after the command and never one later because of accumulated
/// rounding.
#[derive(Debug, Clone)]
pub struct WarpController {
    state: WarpState,
    mode: WarpMode,
    step_size: f64,
    ramp_origin: f64,
    ramp_frames: u32,
}

impl WarpController {
    pub fn new(initial: f64, mode: WarpMode, step_size: f64) -> Self {
        let warp = initial.clamp(WARP_MIN, WARP_MAX);
        Self {
            state: WarpState {
                warp,
                target: warp,
                step: 0.0,
            },
            mode,
            step_size,
            ramp_origin: warp,
            ramp_frames: 0,
        }
    }

    pub fn apply(&mut self, command: WarpCommand) {
        let base = self.state.warp.floor();
        let target = match command {
            WarpCommand::Decrease => (base - 1.0).max(WARP_MIN),
            WarpCommand::Increase => (base + 1.0).min(WARP_MAX),
        };
        debug!("warp target {:.1} -> {:.0}", self.state.warp, target);

        self.state.target = target;
        self.ramp_origin = self.state.warp;
        self.ramp_frames = 0;
        match self.mode {
            WarpMode::Stepped => {
                self.state.warp = target;
                self.state.step = 0.0;
            }
            WarpMode::Smooth => {
                // compared against the live value, not the floor, so a
                // clamped command at 0.4 still finishes the ramp to 0
                let warp = self.state.warp;
                self.state.step = if target < warp {
                    -self.step_size
                } else if target > warp {
                    self.step_size
                } else {
                    0.0
                };
            }
        }
    }

    /// Advance a running ramp by one frame, snapping onto the target.
    pub fn tick(&mut self) {
        let step = self.state.step;
        if step == 0.0 {
            return;
        }
        self.ramp_frames += 1;
        let warp = self.ramp_origin + step * self.ramp_frames as f64;
        if (step > 0.0 && warp >= self.state.target) || (step < 0.0 && warp <= self.state.target) {
            self.state.warp = self.state.target;
            self.state.step = 0.0;
        } else {
            self.state.warp = warp;
        }
    }

    /// Distance the stars travel this frame: `2 * warp^2`.
    pub fn z_step(&self) -> f64 {
        2.0 * self.state.warp * self.state.warp
    }

    pub fn is_ramping(&self) -> bool {
        self.state.step != 0.0
    }

    pub fn warp(&self) -> f64 {
        self.state.warp
    }

    pub fn state(&self) -> WarpState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_at_both_ends() {
        let mut warp = WarpController::new(0.0, WarpMode::Smooth, 0.2);
        warp.apply(WarpCommand::Decrease);
        assert_eq!(warp.state(), WarpState { warp: 0.0, target: 0.0, step: 0.0 });

        let mut warp = WarpController::new(9.0, WarpMode::Smooth, 0.2);
        warp.apply(WarpCommand::Increase);
        assert_eq!(warp.state(), WarpState { warp: 9.0, target: 9.0, step: 0.0 });
    }

    #[test]
    fn test_smooth_ramp_up_takes_five_frames() {
        let mut warp = WarpController::new(4.0, WarpMode::Smooth, 0.2);
        warp.apply(WarpCommand::Increase);
        assert_eq!(warp.state().target, 5.0);
        assert_eq!(warp.state().step, 0.2);

        for _ in 0..4 {
            warp.tick();
            assert!(warp.is_ramping());
            assert!(warp.warp() < 5.0);
        }
        warp.tick();
        assert_eq!(warp.state(), WarpState { warp: 5.0, target: 5.0, step: 0.0 });

        warp.tick();
        assert_eq!(warp.warp(), 5.0);
    }

    #[test]
    fn test_every_ramp_is_bounded() {
        for start in 0..=9 {
            for command in [WarpCommand::Decrease, WarpCommand::Increase] {
                let mut warp = WarpController::new(start as f64, WarpMode::Smooth, 0.2);
                warp.apply(command);
                let mut frames = 0;
                let mut last = warp.warp();
                while warp.is_ramping() {
                    warp.tick();
                    frames += 1;
                    let now = warp.warp();
                    match command {
                        WarpCommand::Decrease => assert!(now <= last),
                        WarpCommand::Increase => assert!(now >= last),
                    }
                    last = now;
                }
                assert!(frames <= 5, "{} {:?} took {} frames", start, command, frames);
                assert_eq!(warp.warp(), warp.state().target);
            }
        }
    }

    #[test]
    fn test_ramp_down() {
        let mut warp = WarpController::new(5.0, WarpMode::Smooth, 0.2);
        warp.apply(WarpCommand::Decrease);
        assert_eq!(warp.state().step, -0.2);
        for _ in 0..5 {
            warp.tick();
        }
        assert_eq!(warp.state(), WarpState { warp: 4.0, target: 4.0, step: 0.0 });
    }

    #[test]
    fn test_reversal_mid_ramp() {
        let mut warp = WarpController::new(4.0, WarpMode::Smooth, 0.2);
        warp.apply(WarpCommand::Increase);
        warp.tick();
        warp.tick();
        warp.tick();
        // around 4.6: floor is 4, so decrease heads for 3
        warp.apply(WarpCommand::Decrease);
        assert_eq!(warp.state().target, 3.0);
        assert!(warp.state().step < 0.0);
        while warp.is_ramping() {
            warp.tick();
        }
        assert_eq!(warp.warp(), 3.0);
    }

    #[test]
    fn test_stepped_mode_jumps() {
        let mut warp = WarpController::new(4.0, WarpMode::Stepped, 0.2);
        warp.apply(WarpCommand::Increase);
        assert_eq!(warp.state(), WarpState { warp: 5.0, target: 5.0, step: 0.0 });
        warp.apply(WarpCommand::Decrease);
        warp.apply(WarpCommand::Decrease);
        assert_eq!(warp.warp(), 3.0);
        assert!(!warp.is_ramping());
    }

    #[test]
    fn test_z_step_is_quadratic() {
        assert_eq!(WarpController::new(4.0, WarpMode::Smooth, 0.2).z_step(), 32.0);
        assert_eq!(WarpController::new(8.0, WarpMode::Smooth, 0.2).z_step(), 128.0);
        assert_eq!(WarpController::new(0.0, WarpMode::Smooth, 0.2).z_step(), 0.0);
    }
}
