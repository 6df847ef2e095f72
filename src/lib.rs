//! Bouncing Balls - bodies reflecting inside a resizable container
//!
//! Core modules:
//! - `sim`: Deterministic bounce kernel (bodies, spawning, reflection, population)
//! - `frame`: Frame driver and the scheduler/surface capabilities it runs on
//! - `routes`: Addressable views and their per-view presets
//! - `settings`: User preferences persisted in LocalStorage
//! - `web`: Browser glue (DOM and canvas surfaces, requestAnimationFrame)

pub mod frame;
pub mod routes;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use frame::{Attachment, FrameDriver, FrameHandle, FrameScheduler, HeadlessSurface, ManualScheduler, Surface};
pub use routes::{PopulationRange, View};
pub use settings::Settings;

/// Simulation constants
pub mod consts {
    /// Ball radius in CSS pixels (diameter 50)
    pub const BALL_RADIUS: f32 = 25.0;

    /// Per-axis speed range in pixels per frame, inclusive
    pub const SLOWEST_VELOCITY: i32 = 1;
    pub const FASTEST_VELOCITY: i32 = 5;

    /// Population slider for the DOM and canvas views
    pub const MIN_BALLS: usize = 25;
    pub const BALL_STEPS: usize = 25;
    pub const MAX_BALLS: usize = 2500;
    pub const DEFAULT_BALL_AMOUNT: usize = 25;

    /// Population slider for the compiled canvas view
    pub const WASM_MIN_BALLS: usize = 1;
    pub const WASM_BALL_STEPS: usize = 1;
    pub const WASM_MAX_BALLS: usize = 25;
    pub const WASM_DEFAULT_BALL_AMOUNT: usize = 1;
}
