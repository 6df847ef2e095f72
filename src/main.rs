//! Bouncing Balls entry point
//!
//! In the browser this mounts the view for the current URL. Natively there is
//! no display, so the kernel runs headless for a while and reports how the
//! bodies behaved.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    log::info!("Bouncing Balls starting...");
    bouncing_balls::web::app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bouncing_balls::sim::{Container, Simulation};
    use bouncing_balls::{FrameDriver, HeadlessSurface, ManualScheduler, View};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let view = args
        .next()
        .map(|path| View::from_path(&path))
        .filter(|v| *v != View::Home)
        .unwrap_or(View::CanvasBounce);
    let frames: usize = args.next().and_then(|f| f.parse().ok()).unwrap_or(600);

    let Some(mut config) = view.sim_config() else {
        log::error!("{} has no simulation", view.title());
        return;
    };
    if let Some(amount) = std::env::var("BOUNCE_AMOUNT").ok().and_then(|a| a.parse().ok()) {
        config.amount = view.population().map_or(amount, |range| range.clamp(amount));
    }

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!(
        "Bouncing Balls (native) running {} headless: {} balls, {} frames, seed {}",
        view.title(),
        config.amount,
        frames,
        seed
    );

    let container = Container::new(1280.0, 720.0);
    let surface = HeadlessSurface::new(Some(container));
    let mut driver = FrameDriver::new(Simulation::new(config, seed), ManualScheduler::new(), surface);
    driver.start();
    let ran = driver.run_frames(frames);
    driver.dispose();

    let sim = driver.simulation();
    let anchor = sim.anchor();
    let outside = sim
        .bodies()
        .iter()
        .filter(|b| {
            let min = b.top_left(anchor);
            let max = min + glam::Vec2::splat(b.diameter());
            // One frame of overshoot is allowed before the reflection lands
            min.x < -5.0 || min.y < -5.0 || max.x > container.width + 5.0 || max.y > container.height + 5.0
        })
        .count();

    println!(
        "{} frames, {} balls drawn {} times, {} outside the container",
        ran,
        sim.bodies().len(),
        driver.surface().frames_drawn,
        outside
    );
}
