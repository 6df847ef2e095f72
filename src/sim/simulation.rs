//! Simulation controller
//!
//! Owns the body collection for one view. The collection is only ever
//! replaced wholesale: on first sight of a container and on every population
//! change. Stepping mutates it in place.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Anchor, Body, Container};
use super::spawn::{SpawnArea, spawn_bodies};
use super::step::step_all;
use crate::consts::{BALL_RADIUS, DEFAULT_BALL_AMOUNT};

/// Per-view simulation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub anchor: Anchor,
    pub radius: f32,
    pub spawn: SpawnArea,
    /// Population created once a container is known
    pub amount: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            anchor: Anchor::Center,
            radius: BALL_RADIUS,
            spawn: SpawnArea::Anywhere,
            amount: DEFAULT_BALL_AMOUNT,
        }
    }
}

/// Bodies bouncing inside the most recently seen container
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    bodies: Vec<Body>,
    container: Option<Container>,
    rng: Pcg32,
    /// Number of completed steps since the last reset
    frame: u64,
}

impl Simulation {
    /// Create an empty simulation; bodies appear once a container is set
    pub fn new(config: SimConfig, seed: u64) -> Self {
        Self {
            config,
            bodies: Vec::with_capacity(config.amount),
            container: None,
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
        }
    }

    pub fn anchor(&self) -> Anchor {
        self.config.anchor
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Target population
    pub fn amount(&self) -> usize {
        self.config.amount
    }

    pub fn container(&self) -> Option<Container> {
        self.container
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Record the current container size
    ///
    /// The first container seen populates the simulation. Later sizes only
    /// change the walls; bodies keep their positions.
    pub fn set_container(&mut self, container: Container) {
        let first = self.container.is_none();
        self.container = Some(container);

        if first || self.bodies.len() != self.config.amount {
            self.respawn(container);
        }
    }

    /// Replace every body with a fresh random population of `amount`
    ///
    /// Without a known container the amount is stored and the bodies are
    /// created on the next `set_container`.
    pub fn resize(&mut self, amount: usize) {
        log::debug!("Population {} -> {}", self.config.amount, amount);
        self.config.amount = amount;

        match self.container {
            Some(container) => self.respawn(container),
            None => self.bodies.clear(),
        }
    }

    /// Advance every body one frame against the last known container
    ///
    /// Does nothing until a container has been set.
    pub fn step(&mut self) {
        let Some(container) = self.container else {
            return;
        };
        step_all(&mut self.bodies, container, self.config.anchor);
        self.frame += 1;
    }

    fn respawn(&mut self, container: Container) {
        if container.is_degenerate(self.config.radius) {
            log::warn!(
                "Container {}x{} is smaller than a ball, bodies will jitter",
                container.width,
                container.height
            );
        }

        self.bodies = spawn_bodies(
            &mut self.rng,
            container,
            self.config.amount,
            self.config.radius,
            self.config.spawn,
        );
        self.frame = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim(amount: usize) -> Simulation {
        Simulation::new(
            SimConfig {
                amount,
                ..Default::default()
            },
            12345,
        )
    }

    #[test]
    fn test_empty_until_container() {
        let mut sim = sim(25);
        assert!(sim.bodies().is_empty());

        sim.step();
        assert_eq!(sim.frame(), 0);

        sim.set_container(Container::new(800.0, 600.0));
        assert_eq!(sim.bodies().len(), 25);
    }

    #[test]
    fn test_container_change_keeps_bodies() {
        let mut sim = sim(25);
        sim.set_container(Container::new(800.0, 600.0));
        let before = sim.bodies().to_vec();

        sim.set_container(Container::new(400.0, 300.0));
        assert_eq!(sim.bodies(), before.as_slice());
        assert_eq!(sim.container(), Some(Container::new(400.0, 300.0)));
    }

    #[test]
    fn test_resize_discards_bodies() {
        let mut sim = sim(25);
        sim.set_container(Container::new(800.0, 600.0));
        for _ in 0..10 {
            sim.step();
        }
        let before = sim.bodies().to_vec();

        sim.resize(100);
        assert_eq!(sim.bodies().len(), 100);
        assert_eq!(sim.amount(), 100);
        assert_eq!(sim.frame(), 0);
        // Fresh draws from the advanced RNG share nothing with the old set
        assert!(before.iter().all(|old| !sim.bodies().contains(old)));
        for body in sim.bodies() {
            assert!((0.0..=800.0).contains(&body.pos.x));
            assert!((0.0..=600.0).contains(&body.pos.y));
        }
    }

    #[test]
    fn test_resize_before_container_is_deferred() {
        let mut sim = sim(25);
        sim.resize(50);
        assert!(sim.bodies().is_empty());

        sim.set_container(Container::new(300.0, 300.0));
        assert_eq!(sim.bodies().len(), 50);
    }

    #[test]
    fn test_resize_uses_latest_container() {
        let mut sim = sim(25);
        sim.set_container(Container::new(2000.0, 2000.0));
        sim.set_container(Container::new(100.0, 80.0));

        sim.resize(200);
        for body in sim.bodies() {
            assert!(body.pos.x <= 100.0);
            assert!(body.pos.y <= 80.0);
        }
    }

    #[test]
    fn test_step_counts_frames() {
        let mut sim = sim(3);
        sim.set_container(Container::new(500.0, 500.0));
        let before = sim.bodies().to_vec();

        sim.step();
        assert_eq!(sim.frame(), 1);
        for (old, new) in before.iter().zip(sim.bodies()) {
            assert_eq!(new.vel.abs(), old.vel.abs());
            assert_ne!(new.pos, old.pos);
        }
    }

    #[test]
    fn test_same_seed_same_bodies() {
        let mut a = sim(10);
        let mut b = sim(10);
        a.set_container(Container::new(640.0, 480.0));
        b.set_container(Container::new(640.0, 480.0));
        assert_eq!(a.bodies(), b.bodies());
    }
}
