use crate::{Display, Error, RandomSource, RecyclePolicy, Rgb, StarPool};

/// Pinhole projection onto a `width` x `height` screen centered on the z axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub width: i32,
    pub height: i32,
    pub focal: f64,
    pub shading: u8,
    pub z_max: i32,
}

impl Projection {
    /// Screen position of a point, truncated toward zero. `None` for z <= 0.
    pub fn screen_position(&self, x: i32, y: i32, z: f64) -> Option<(i32, i32)> {
        if z <= 0.0 {
            return None;
        }
        let sx = self.width as f64 / 2.0 + self.focal * x as f64 / z;
        let sy = self.height as f64 / 2.0 + self.focal * y as f64 / z;
        Some((sx as i32, sy as i32))
    }

    pub fn is_visible(&self, sx: i32, sy: i32) -> bool {
        (0..self.width).contains(&sx) && (0..self.height).contains(&sy)
    }

    /// Screen position if the point lands on screen.
    pub fn project(&self, x: i32, y: i32, z: f64) -> Option<(i32, i32)> {
        self.screen_position(x, y, z)
            .filter(|&(sx, sy)| self.is_visible(sx, sy))
    }

    /// Gray level at depth `z`: full white up close, fading with distance.
    pub fn brightness(&self, z: f64) -> u8 {
        let falloff = (self.shading as f64 * z / self.z_max as f64).floor();
        (255.0 - falloff).clamp(0.0, 255.0) as u8
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    pub points: usize,
    pub lines: usize,
    pub hidden: usize,
    pub recycled: usize,
}

/// Draws the star pool as points and streaks.
pub struct ProjectionRenderer {
    projection: Projection,
    policy: RecyclePolicy,
}

impl ProjectionRenderer {
    pub fn new(projection: Projection, policy: RecyclePolicy) -> Self {
        Self { projection, policy }
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Draw every star. A star with an anchor is drawn as a line from it,
    /// a fresh one as a single pixel. While `hold_anchor` is set (warp is
    /// ramping) existing anchors are kept so streaks grow with the ramp.
    pub fn render<D, R>(
        &self,
        pool: &mut StarPool,
        display: &mut D,
        hold_anchor: bool,
        rng: &mut R,
    ) -> Result<RenderStats, Error>
    where
        D: Display + ?Sized,
        R: RandomSource + ?Sized,
    {
        let mut stats = RenderStats::default();
        for i in 0..pool.len() {
            let star = pool.star_mut(i);
            match self.projection.project(star.x, star.y, star.z) {
                Some((sx, sy)) => {
                    let color = Rgb::gray(self.projection.brightness(star.z));
                    match star.prev_screen {
                        Some((px, py)) => {
                            display.line(px, py, sx, sy, color)?;
                            stats.lines += 1;
                            if !hold_anchor {
                                star.prev_screen = Some((sx, sy));
                            }
                        }
                        None => {
                            display.pixel(sx, sy, color)?;
                            stats.points += 1;
                            star.prev_screen = Some((sx, sy));
                        }
                    }
                }
                None => {
                    stats.hidden += 1;
                    if self.policy == RecyclePolicy::Eager {
                        pool.recycle(i, rng);
                        stats.recycled += 1;
                    }
                }
            }
        }
        Ok(stats)
    }
}
