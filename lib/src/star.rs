use crate::RandomSource;
use serde::{Deserialize, Serialize};

/// Extent of the star volume: x in -x_max..=x_max, y likewise, z in (0, z_max].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_max: i32,
    pub y_max: i32,
    pub z_max: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: i32,
    pub y: i32,
    pub z: f64,
    /// Where the star was last drawn; `None` until it has been on screen
    pub prev_screen: Option<(i32, i32)>,
}

impl Star {
    fn spawn<R: RandomSource + ?Sized>(bounds: &Bounds, z: f64, rng: &mut R) -> Self {
        Star {
            x: rng.uniform_int(-bounds.x_max, bounds.x_max),
            y: rng.uniform_int(-bounds.y_max, bounds.y_max),
            z,
            prev_screen: None,
        }
    }
}

/// Fixed-size set of stars. The length never changes after construction.
#[derive(Debug, Clone)]
pub struct StarPool {
    stars: Vec<Star>,
    bounds: Bounds,
}

impl StarPool {
    /// Scatter `n` stars through the volume, optionally ordered back to front.
    /// The order is never restored later on.
    pub fn initialize<R: RandomSource + ?Sized>(
        n: usize,
        bounds: Bounds,
        sort_back_to_front: bool,
        rng: &mut R,
    ) -> Self {
        let mut depths: Vec<i32> = (0..n).map(|_| rng.uniform_int(1, bounds.z_max)).collect();
        if sort_back_to_front {
            depths.sort_unstable_by(|a, b| b.cmp(a));
        }
        let stars = depths
            .into_iter()
            .map(|z| Star::spawn(&bounds, z as f64, rng))
            .collect();
        Self { stars, bounds }
    }

    pub fn from_stars(stars: Vec<Star>, bounds: Bounds) -> Self {
        Self { stars, bounds }
    }

    /// Move every star `z_step` closer. Stars that pass the viewer are
    /// recycled before anything projects them. Returns how many were recycled.
    pub fn advance<R: RandomSource + ?Sized>(&mut self, z_step: f64, rng: &mut R) -> usize {
        let mut recycled = 0;
        for i in 0..self.stars.len() {
            let z = self.stars[i].z - z_step;
            if z <= 0.0 {
                self.recycle(i, rng);
                recycled += 1;
            } else {
                self.stars[i].z = z;
            }
        }
        recycled
    }

    /// Put star `index` back on the far plane at a fresh position.
    pub fn recycle<R: RandomSource + ?Sized>(&mut self, index: usize, rng: &mut R) {
        self.stars[index] = Star::spawn(&self.bounds, self.bounds.z_max as f64, rng);
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub(crate) fn star_mut(&mut self, index: usize) -> &mut Star {
        &mut self.stars[index]
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}
