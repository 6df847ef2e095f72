//! Frame driver
//!
//! One frame = sample the surface size, step every body once, draw, then ask
//! the scheduler for the next frame. The next frame is only requested after
//! the current one has finished, so a slow frame just pushes the next one back.
//!
//! Scheduling and drawing are capabilities so the loop can run against
//! `requestAnimationFrame` and a real canvas in the browser, or be pumped by
//! hand in tests and headless runs.

use std::collections::VecDeque;

use crate::sim::{Anchor, Body, Container, Simulation};

/// Opaque id of a pending frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Source of "run me on the next frame" callbacks
pub trait FrameScheduler {
    /// Ask for one more frame. `None` if the platform refused the request.
    fn request_frame(&mut self) -> Option<FrameHandle>;

    /// Withdraw a request that has not fired yet
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Something bodies can be drawn onto
pub trait Surface {
    /// Current drawable size, or `None` if the surface is not attached yet
    fn size(&self) -> Option<Container>;

    /// Draw the bodies for this frame
    fn draw(&mut self, bodies: &[Body], anchor: Anchor);

    /// The visible container changed size; resync any backing store
    fn resized(&mut self) {}
}

/// Who decides whether a surface can be drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    /// Mounted by a routed view; absent until it is in the document
    Tracked,
    /// Sized and placed by the embedding page; usable even when detached
    HostManaged,
}

impl Attachment {
    /// Drawable size of a `width` x `height` pixel surface
    pub fn size(self, connected: bool, width: u32, height: u32) -> Option<Container> {
        match self {
            Attachment::Tracked if !connected => None,
            _ => Some(Container::new(width as f32, height as f32)),
        }
    }
}

/// Owns a simulation and keeps it running, one step per scheduled frame
pub struct FrameDriver<S: FrameScheduler, R: Surface> {
    sim: Simulation,
    scheduler: S,
    surface: R,
    pending: Option<FrameHandle>,
    disposed: bool,
}

impl<S: FrameScheduler, R: Surface> FrameDriver<S, R> {
    pub fn new(sim: Simulation, scheduler: S, surface: R) -> Self {
        Self {
            sim,
            scheduler,
            surface,
            pending: None,
            disposed: false,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut R {
        &mut self.surface
    }

    /// Handle of the frame currently waiting to fire
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Request the first frame. Calling again while a frame is pending is a no-op.
    pub fn start(&mut self) {
        if self.disposed || self.pending.is_some() {
            return;
        }
        self.schedule_next();
    }

    /// Run one frame and schedule the next
    pub fn on_frame(&mut self) {
        // The request that brought us here has fired
        self.pending = None;
        if self.disposed {
            return;
        }

        self.step();
        self.schedule_next();
    }

    /// Step and draw once, without touching the scheduler
    ///
    /// A detached surface makes this a no-op for the tick.
    pub fn step(&mut self) {
        let Some(container) = self.surface.size() else {
            return;
        };

        self.sim.set_container(container);
        self.sim.step();
        self.surface.draw(self.sim.bodies(), self.sim.anchor());
    }

    /// Replace the population with `amount` freshly spawned bodies
    pub fn resize(&mut self, amount: usize) {
        if let Some(container) = self.surface.size() {
            self.sim.set_container(container);
        }
        self.sim.resize(amount);
    }

    /// Forward a container resize to the surface
    ///
    /// Bodies keep their positions; the next frame reflects against the new walls.
    pub fn surface_resized(&mut self) {
        self.surface.resized();
        if let Some(container) = self.surface.size() {
            log::debug!("Surface resized to {}x{}", container.width, container.height);
        }
    }

    /// Stop the loop: withdraw the pending frame and ignore any late callback
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.disposed = true;
        log::info!("Frame driver disposed after {} frames", self.sim.frame());
    }

    fn schedule_next(&mut self) {
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            log::warn!("Frame request refused, animation stopped");
        }
    }
}

impl<R: Surface> FrameDriver<ManualScheduler, R> {
    /// Fire up to `frames` queued frame requests in order
    ///
    /// Returns how many frames actually ran. Stops early once nothing is pending.
    pub fn run_frames(&mut self, frames: usize) -> usize {
        let mut ran = 0;
        while ran < frames && self.scheduler.fire().is_some() {
            self.on_frame();
            ran += 1;
        }
        ran
    }
}

/// Scheduler whose frames fire only when told to
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    queue: VecDeque<FrameHandle>,
    cancelled: Vec<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the oldest outstanding request, as if the display refreshed
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.queue.pop_front()
    }

    /// Requests that have not fired or been cancelled
    pub fn outstanding(&self) -> usize {
        self.queue.len()
    }

    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.queue.push_back(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.queue.retain(|h| *h != handle);
        self.cancelled.push(handle);
    }
}

/// Surface with no pixels: reports a fixed size and counts draws
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    pub size: Option<Container>,
    pub frames_drawn: u64,
    pub last_drawn: Vec<Body>,
}

impl HeadlessSurface {
    pub fn new(size: Option<Container>) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }
}

impl Surface for HeadlessSurface {
    fn size(&self) -> Option<Container> {
        self.size
    }

    fn draw(&mut self, bodies: &[Body], _anchor: Anchor) {
        self.frames_drawn += 1;
        self.last_drawn.clear();
        self.last_drawn.extend_from_slice(bodies);
    }
}
