//! Deterministic bounce kernel
//!
//! All motion logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - One discrete step per frame, no time-based integration
//! - Seeded RNG only
//! - Bodies only interact with the container walls, never with each other

pub mod body;
pub mod simulation;
pub mod spawn;
pub mod step;

pub use body::{Anchor, Body, Container};
pub use simulation::{SimConfig, Simulation};
pub use spawn::{SpawnArea, random_velocity, spawn_bodies};
pub use step::{reflect_velocity, step_all, step_body};
