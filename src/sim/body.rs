//! Body and container types shared by every view

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::BALL_RADIUS;

/// Point of a body that its position refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Anchor {
    /// Position is the ball centre (canvas drawing)
    #[default]
    Center,
    /// Position is the top-left corner of the bounding box (DOM layout)
    TopLeft,
}

impl Anchor {
    /// Distance from the anchor to the low edge of the body
    #[inline]
    pub fn lower_margin(self, radius: f32) -> f32 {
        match self {
            Anchor::Center => radius,
            Anchor::TopLeft => 0.0,
        }
    }

    /// Distance from the anchor to the high edge of the body
    #[inline]
    pub fn upper_extent(self, radius: f32) -> f32 {
        match self {
            Anchor::Center => radius,
            Anchor::TopLeft => radius * 2.0,
        }
    }
}

/// Rectangular bounds the bodies move within
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Container {
    pub width: f32,
    pub height: f32,
}

impl Container {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when a body of this radius cannot fit on at least one axis
    pub fn is_degenerate(&self, radius: f32) -> bool {
        let diameter = radius * 2.0;
        self.width < diameter || self.height < diameter
    }
}

/// A single ball: anchor position and per-frame velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub radius: f32,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            radius: BALL_RADIUS,
            pos,
            vel,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    #[inline]
    pub fn diameter(&self) -> f32 {
        self.radius * 2.0
    }

    /// Centre of the ball regardless of anchor
    pub fn center(&self, anchor: Anchor) -> Vec2 {
        match anchor {
            Anchor::Center => self.pos,
            Anchor::TopLeft => self.pos + Vec2::splat(self.radius),
        }
    }

    /// Top-left corner of the bounding box regardless of anchor
    pub fn top_left(&self, anchor: Anchor) -> Vec2 {
        match anchor {
            Anchor::Center => self.pos - Vec2::splat(self.radius),
            Anchor::TopLeft => self.pos,
        }
    }
}
