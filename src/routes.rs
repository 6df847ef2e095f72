//! Addressable views
//!
//! Each bouncing view is reachable at its own path and carries the
//! simulation preset and population slider it runs with.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Anchor, SimConfig, SpawnArea};

/// A page of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum View {
    /// Navigation links to the other views
    #[default]
    Home,
    /// One DOM element per ball
    HtmlBounce,
    /// Balls drawn on a 2D canvas
    CanvasBounce,
    /// Canvas drawn directly by the compiled module, small population
    WasmBounce,
}

impl View {
    /// Every bouncing view, in navigation order
    pub const BOUNCERS: [View; 3] = [View::HtmlBounce, View::CanvasBounce, View::WasmBounce];

    pub fn path(&self) -> &'static str {
        match self {
            View::Home => "/",
            View::HtmlBounce => "/html-bounce",
            View::CanvasBounce => "/canvas-bounce",
            View::WasmBounce => "/wasm-bounce",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::HtmlBounce => "HTML Bounce",
            View::CanvasBounce => "Canvas Bounce",
            View::WasmBounce => "Wasm Bounce",
        }
    }

    /// Resolve a location path; unknown paths land on `Home`
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        Self::BOUNCERS
            .into_iter()
            .find(|v| v.path() == trimmed)
            .unwrap_or(View::Home)
    }

    /// Simulation preset, `None` for pages without balls
    pub fn sim_config(&self) -> Option<SimConfig> {
        let range = self.population()?;
        let (anchor, spawn) = match self {
            View::HtmlBounce => (Anchor::TopLeft, SpawnArea::Anywhere),
            View::CanvasBounce => (Anchor::Center, SpawnArea::Anywhere),
            View::WasmBounce => (Anchor::Center, SpawnArea::Inset),
            View::Home => return None,
        };

        Some(SimConfig {
            anchor,
            radius: BALL_RADIUS,
            spawn,
            amount: range.default,
        })
    }

    /// Population slider, `None` for pages without balls
    pub fn population(&self) -> Option<PopulationRange> {
        match self {
            View::Home => None,
            View::HtmlBounce | View::CanvasBounce => Some(PopulationRange {
                min: MIN_BALLS,
                max: MAX_BALLS,
                step: BALL_STEPS,
                default: DEFAULT_BALL_AMOUNT,
            }),
            View::WasmBounce => Some(PopulationRange {
                min: WASM_MIN_BALLS,
                max: WASM_MAX_BALLS,
                step: WASM_BALL_STEPS,
                default: WASM_DEFAULT_BALL_AMOUNT,
            }),
        }
    }
}

/// Range-input bounds for the population slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationRange {
    pub min: usize,
    pub max: usize,
    pub step: usize,
    pub default: usize,
}

impl PopulationRange {
    /// Clamp into `[min, max]` and snap down onto the step grid from `min`
    pub fn clamp(&self, amount: usize) -> usize {
        let amount = amount.clamp(self.min, self.max);
        if self.step <= 1 {
            return amount;
        }
        self.min + (amount - self.min) / self.step * self.step
    }

    /// Parse a slider value, falling back to the default on garbage
    pub fn parse(&self, value: &str) -> usize {
        match value.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => self.clamp(v.round() as usize),
            _ => self.default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_round_trip() {
        for view in [View::Home, View::HtmlBounce, View::CanvasBounce, View::WasmBounce] {
            assert_eq!(View::from_path(view.path()), view);
        }
    }

    #[test]
    fn test_unknown_path_is_home() {
        assert_eq!(View::from_path("/nope"), View::Home);
        assert_eq!(View::from_path(""), View::Home);
        assert_eq!(View::from_path("/canvas-bounce/"), View::CanvasBounce);
    }

    #[test]
    fn test_presets() {
        let html = View::HtmlBounce.sim_config().unwrap();
        assert_eq!(html.anchor, Anchor::TopLeft);
        assert_eq!(html.amount, 25);

        let canvas = View::CanvasBounce.sim_config().unwrap();
        assert_eq!(canvas.anchor, Anchor::Center);

        let wasm = View::WasmBounce.sim_config().unwrap();
        assert_eq!(wasm.spawn, SpawnArea::Inset);
        assert_eq!(wasm.amount, 1);

        assert!(View::Home.sim_config().is_none());
        assert!(View::Home.population().is_none());
    }

    #[test]
    fn test_population_clamp() {
        let range = View::CanvasBounce.population().unwrap();
        assert_eq!(range.clamp(0), 25);
        assert_eq!(range.clamp(25), 25);
        assert_eq!(range.clamp(60), 50);
        assert_eq!(range.clamp(100), 100);
        assert_eq!(range.clamp(9999), 2500);

        let small = View::WasmBounce.population().unwrap();
        assert_eq!(small.clamp(0), 1);
        assert_eq!(small.clamp(13), 13);
        assert_eq!(small.clamp(26), 25);
    }

    #[test]
    fn test_population_parse() {
        let range = View::HtmlBounce.population().unwrap();
        assert_eq!(range.parse("100"), 100);
        assert_eq!(range.parse(" 2500 "), 2500);
        assert_eq!(range.parse("abc"), 25);
        assert_eq!(range.parse("-5"), 25);
    }
}
