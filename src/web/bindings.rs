//! JS-facing API
//!
//! Lets a page that manages its own canvas and animation loop drive the
//! kernel directly:
//!
//! ```js
//! const balls = new BouncingBalls(10, canvas);
//! balls.init_balls();
//! (function frame() { balls.draw(); requestAnimationFrame(frame); })();
//! ```

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use super::{CanvasSurface, time_seed};
use crate::frame::Surface;
use crate::routes::View;
use crate::settings::Settings;
use crate::sim::Simulation;

#[wasm_bindgen]
pub struct BouncingBalls {
    sim: Simulation,
    surface: CanvasSurface,
}

#[wasm_bindgen]
impl BouncingBalls {
    #[wasm_bindgen(constructor)]
    pub fn new(amount: usize, canvas: HtmlCanvasElement) -> BouncingBalls {
        let mut config = View::WasmBounce.sim_config().unwrap_or_default();
        config.amount = amount;

        BouncingBalls {
            sim: Simulation::new(config, time_seed()),
            // The host sizes the canvas itself
            surface: CanvasSurface::new(canvas, None, &Settings::load()),
        }
    }

    pub fn set_canvas(&mut self, canvas: HtmlCanvasElement) {
        self.surface.set_canvas(canvas);
    }

    /// Scatter a fresh population over the canvas
    ///
    /// Uses the canvas's pixel size even if it is not in the document yet.
    pub fn init_balls(&mut self) {
        if let Some(container) = self.surface.size() {
            self.sim.set_container(container);
            self.sim.resize(self.sim.amount());
        }
    }

    /// Advance one frame against the canvas's current size
    pub fn next_tick(&mut self) {
        if let Some(container) = self.surface.size() {
            self.sim.set_container(container);
        }
        self.sim.step();
    }

    pub fn amount(&self) -> usize {
        self.sim.bodies().len()
    }

    pub fn set_amount(&mut self, amount: usize) {
        self.sim.resize(amount);
    }

    /// Step once and repaint
    pub fn draw(&mut self) {
        self.next_tick();
        self.surface.draw(self.sim.bodies(), self.sim.anchor());
    }
}
