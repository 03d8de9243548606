use crate::input::{Action, ButtonEdgeDetector};
use crate::load::{self, LoadMonitor};
use crate::overlay::{self, OverlayStats};
use crate::render::{ProjectionRenderer, RenderStats};
use crate::warp::{WarpCommand, WarpController};
use crate::{ButtonInput, Clock, Config, Display, Error, FrameGuard, RandomSource, StarPool};
use std::convert::Infallible;
use tracing::{debug, info, trace};

/// Where a cycle currently is. There is no terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    ReadInput,
    UpdateWarp,
    AdvanceStars,
    Render,
    MeasureLoad,
    Pace,
}

/// Time left in the frame budget, or `None` when the frame overran it.
pub fn pace(elapsed_ms: u64, budget_ms: u64) -> Option<u64> {
    if elapsed_ms < budget_ms {
        Some(budget_ms - elapsed_ms)
    } else {
        None
    }
}

/// What one cycle did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    pub frame: u64,
    pub elapsed_ms: u64,
    pub slept_ms: Option<u64>,
    pub warp: f64,
    pub recycled: usize,
    pub render: RenderStats,
}

/// All mutable state of the star field, owned in one place and advanced
/// exactly once per cycle.
pub struct Simulation {
    config: Config,
    pool: StarPool,
    warp: WarpController,
    buttons: ButtonEdgeDetector,
    load: LoadMonitor,
    renderer: ProjectionRenderer,
    overlay: bool,
    phase: Phase,
    frames: u64,
}

impl Simulation {
    pub fn new<R: RandomSource + ?Sized>(config: Config, rng: &mut R) -> Result<Self, Error> {
        config.validate()?;
        let pool = StarPool::initialize(config.n_stars, config.bounds(), config.sort_initial, rng);
        info!(
            "star field ready: {} stars, warp {}, {}x{}, {}ms budget",
            pool.len(),
            config.initial_warp,
            config.width,
            config.height,
            config.cycle_time_ms
        );
        Ok(Self {
            pool,
            warp: WarpController::new(config.initial_warp as f64, config.warp_mode, config.warp_step),
            buttons: ButtonEdgeDetector::default(),
            load: LoadMonitor::new(config.load_capacity),
            renderer: ProjectionRenderer::new(config.projection(), config.recycle),
            overlay: config.overlay,
            phase: Phase::Start,
            frames: 0,
            config,
        })
    }

    /// Run one full cycle: input, warp, stars, frame, load, then sleep off
    /// whatever is left of the budget.
    pub fn step<D, C, B, R>(
        &mut self,
        display: &mut D,
        clock: &mut C,
        buttons: &mut B,
        rng: &mut R,
    ) -> Result<CycleReport, Error>
    where
        D: Display + ?Sized,
        C: Clock + ?Sized,
        B: ButtonInput + ?Sized,
        R: RandomSource + ?Sized,
    {
        self.phase = Phase::Start;
        let start = clock.now_ms();

        self.phase = Phase::ReadInput;
        let action = self.buttons.read(buttons)?.and_then(|b| b.action());

        self.phase = Phase::UpdateWarp;
        if let Some(action) = action {
            self.apply(action);
        }
        let z_step = self.warp.z_step();
        self.warp.tick();

        self.phase = Phase::AdvanceStars;
        let recycled = self.pool.advance(z_step, rng);

        self.phase = Phase::Render;
        let render = {
            let mut frame = FrameGuard::open(display)?;
            frame.clear()?;
            let stats = self.renderer.render(&mut self.pool, &mut *frame, self.warp.is_ramping(), rng)?;
            if self.overlay {
                let stats = OverlayStats {
                    warp: self.warp.warp(),
                    stars: self.pool.len(),
                    fps: load::fps(clock.now_ms().saturating_sub(start)),
                    load_percent: self.load.average_load_percent(self.config.cycle_time_ms),
                };
                overlay::draw(&mut *frame, &stats, self.config.height)?;
            }
            frame.commit()?;
            stats
        };

        self.phase = Phase::MeasureLoad;
        self.load.record(clock.now_ms().saturating_sub(start));

        self.phase = Phase::Pace;
        let elapsed_ms = clock.now_ms().saturating_sub(start);
        let slept_ms = pace(elapsed_ms, self.config.cycle_time_ms);
        match slept_ms {
            Some(ms) => clock.sleep_ms(ms),
            None => debug!(
                "frame {} overran budget: {}ms > {}ms",
                self.frames, elapsed_ms, self.config.cycle_time_ms
            ),
        }
        trace!(
            "frame {} took {}ms, slept {:?}, warp {:.2}",
            self.frames,
            elapsed_ms,
            slept_ms,
            self.warp.warp()
        );

        let report = CycleReport {
            frame: self.frames,
            elapsed_ms,
            slept_ms,
            warp: self.warp.warp(),
            recycled: recycled + render.recycled,
            render,
        };
        self.frames += 1;
        self.phase = Phase::Start;
        Ok(report)
    }

    /// Cycle forever. Only a collaborator failure ends the loop.
    pub fn run<D, C, B, R>(
        &mut self,
        display: &mut D,
        clock: &mut C,
        buttons: &mut B,
        rng: &mut R,
    ) -> Result<Infallible, Error>
    where
        D: Display + ?Sized,
        C: Clock + ?Sized,
        B: ButtonInput + ?Sized,
        R: RandomSource + ?Sized,
    {
        loop {
            self.step(display, clock, buttons, rng)?;
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::DecreaseWarp => self.warp.apply(WarpCommand::Decrease),
            Action::IncreaseWarp => self.warp.apply(WarpCommand::Increase),
            Action::ToggleOverlay => {
                self.overlay = !self.overlay;
                debug!("overlay {}", if self.overlay { "on" } else { "off" });
            }
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pool(&self) -> &StarPool {
        &self.pool
    }

    pub fn warp(&self) -> &WarpController {
        &self.warp
    }

    pub fn load(&self) -> &LoadMonitor {
        &self.load
    }

    pub fn overlay_enabled(&self) -> bool {
        self.overlay
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
