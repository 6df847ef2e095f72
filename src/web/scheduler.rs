//! requestAnimationFrame scheduling
//!
//! The frame callback only holds a `Weak` reference to its driver, so dropping
//! the view's `Rc` ends the loop even if a frame is still queued.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::frame::{FrameDriver, FrameHandle, FrameScheduler, Surface};
use crate::sim::Simulation;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Frames from the browser's per-vsync callback
pub struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl RafScheduler {
    fn new(window: Window, callback: FrameCallback) -> Self {
        Self { window, callback }
    }

    /// Release the frame callback; later requests are refused
    pub fn detach(&self) {
        self.callback.borrow_mut().take();
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let callback = self.callback.borrow();
        let closure = callback.as_ref()?;

        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle.0);
    }
}

/// Rolling frame-rate estimate over the last 60 frames
struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    last_report: f64,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            last_report: 0.0,
        }
    }

    /// Record a frame; returns the fps about once a second
    fn record(&mut self, time: f64) -> Option<u32> {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % 60;

        let oldest = self.frame_times[self.frame_index];
        if oldest <= 0.0 || time - self.last_report < 1000.0 {
            return None;
        }
        self.last_report = time;

        let elapsed = time - oldest;
        (elapsed > 0.0).then(|| (60000.0 / elapsed).round() as u32)
    }
}

/// Wire a simulation and surface to `requestAnimationFrame` and start it
pub fn spawn_loop<R: Surface + 'static>(
    sim: Simulation,
    surface: R,
    log_fps: bool,
) -> Option<Rc<RefCell<FrameDriver<RafScheduler, R>>>> {
    let window = web_sys::window()?;
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let scheduler = RafScheduler::new(window, callback.clone());
    let driver = Rc::new(RefCell::new(FrameDriver::new(sim, scheduler, surface)));

    let weak: Weak<RefCell<FrameDriver<RafScheduler, R>>> = Rc::downgrade(&driver);
    let mut fps = FpsCounter::new();
    *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
        let Some(driver) = weak.upgrade() else {
            return;
        };
        driver.borrow_mut().on_frame();

        if log_fps {
            if let Some(rate) = fps.record(time) {
                log::info!("{} fps, {} balls", rate, driver.borrow().simulation().bodies().len());
            }
        }
    }));

    driver.borrow_mut().start();
    Some(driver)
}

/// Stop a running loop and free its callback
pub fn stop_loop<R: Surface>(driver: &Rc<RefCell<FrameDriver<RafScheduler, R>>>) {
    let mut driver = driver.borrow_mut();
    driver.dispose();
    driver.scheduler().detach();
}
