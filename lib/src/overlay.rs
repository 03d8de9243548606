use crate::{Display, Error, Rgb, UNAVAILABLE};

pub const OVERLAY_COLOR: Rgb = Rgb::gray(192);
const FONT: u8 = 0;
const LINE_HEIGHT: i32 = 10;

/// Numbers shown on the diagnostic overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStats {
    pub warp: f64,
    pub stars: usize,
    pub fps: i32,
    pub load_percent: i32,
}

pub fn status_lines(stats: &OverlayStats) -> [String; 2] {
    let load = if stats.load_percent == UNAVAILABLE {
        "--".to_string()
    } else {
        stats.load_percent.to_string()
    };
    [
        format!("warp {:.1}", stats.warp),
        format!("{}* {}fps {}%", stats.stars, stats.fps, load),
    ]
}

/// Warp factor in the top-left corner, star count, fps and load at the bottom.
pub fn draw<D: Display + ?Sized>(display: &mut D, stats: &OverlayStats, height: i32) -> Result<(), Error> {
    let [top, bottom] = status_lines(stats);
    display.print(&top, OVERLAY_COLOR, 0, 0, FONT)?;
    display.print(&bottom, OVERLAY_COLOR, 0, (height - LINE_HEIGHT).max(0), FONT)
}
