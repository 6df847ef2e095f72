//! Random body placement
//!
//! Positions are uniform over the container, velocities are whole pixels per
//! frame with an independent random sign on each axis.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{Body, Container};
use crate::consts::{FASTEST_VELOCITY, SLOWEST_VELOCITY};

/// Region new bodies are placed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpawnArea {
    /// Anywhere in `[0, W] x [0, H]`
    #[default]
    Anywhere,
    /// Inset by the radius so the whole ball starts inside
    Inset,
}

/// Uniform draw in `[lo, hi]`; collapses to `lo` for empty or inverted ranges
fn uniform<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.random_range(lo..=hi)
    } else {
        lo
    }
}

/// Random sign, +1 or -1 with equal probability
pub fn random_sign<R: Rng>(rng: &mut R) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

/// Whole-pixel speed in `[SLOWEST_VELOCITY, FASTEST_VELOCITY]` with a random sign
pub fn random_velocity<R: Rng>(rng: &mut R) -> f32 {
    let speed = rng.random_range(SLOWEST_VELOCITY..=FASTEST_VELOCITY);
    random_sign(rng) * speed as f32
}

/// Create `count` bodies scattered over `container`
pub fn spawn_bodies<R: Rng>(
    rng: &mut R,
    container: Container,
    count: usize,
    radius: f32,
    area: SpawnArea,
) -> Vec<Body> {
    let (x_range, y_range) = match area {
        SpawnArea::Anywhere => ((0.0, container.width), (0.0, container.height)),
        SpawnArea::Inset => (
            inset_range(container.width, radius),
            inset_range(container.height, radius),
        ),
    };

    (0..count)
        .map(|_| {
            let x = uniform(rng, x_range.0, x_range.1);
            let y = uniform(rng, y_range.0, y_range.1);
            let vel = Vec2::new(random_velocity(rng), random_velocity(rng));
            Body::new(Vec2::new(x, y), vel).with_radius(radius)
        })
        .collect()
}

/// `[r, extent - r]`, or the midpoint when the ball is wider than the extent
fn inset_range(extent: f32, radius: f32) -> (f32, f32) {
    if extent >= radius * 2.0 {
        (radius, extent - radius)
    } else {
        let mid = (extent * 0.5).max(0.0);
        (mid, mid)
    }
}
