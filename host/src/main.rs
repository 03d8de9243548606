mod framebuffer;
mod sdl;

use sdl::{KeyboardButtons, SdlDisplay};
use starwarp::{Config, RngSource, Simulation, StdClock};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[cfg(feature = "reload")]
use hot_lib::*;
#[cfg(not(feature = "reload"))]
use starwarp::step;

#[cfg(feature = "reload")]
#[hot_lib_reloader::hot_module(dylib = "starwarp", file_watch_debounce = 20, lib_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../target/debug")
)]
mod hot_lib {
    pub use starwarp::{ButtonInput, Clock, CycleReport, Display, Error, RandomSource, Simulation};
    hot_functions_from_file!("../lib/src/lib.rs");
}

/// Window pixels per badge pixel.
const SCALE: u32 = 6;

fn main() -> Result<(), String> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cfg!(debug_assertions) { Level::DEBUG } else { Level::INFO })
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber).map_err(|e| e.to_string())?;

    let config = Config::default();
    info!(
        "starwarp config: {}",
        serde_json::to_string(&config).map_err(|e| e.to_string())?
    );

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    let width = config.width as u32;
    let height = config.height as u32;
    let window = video_subsystem
        .window("starwarp", width * SCALE, height * SCALE)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;
    let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

    let mut display = SdlDisplay::new(canvas, width, height);
    let mut buttons = KeyboardButtons::new(sdl_context.event_pump()?);
    let mut clock = StdClock::new();
    let mut rng = RngSource::thread();

    let mut sim = Simulation::new(config, &mut rng).map_err(|e| e.to_string())?;
    info!("left/right: warp down/up, up: overlay, esc: quit");

    while !buttons.quit_requested() {
        step(&mut sim, &mut display, &mut clock, &mut buttons, &mut rng).map_err(|e| e.to_string())?;
    }

    info!("stopped after {} frames", sim.frames());
    Ok(())
}
