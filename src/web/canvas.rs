//! 2D canvas surface
//!
//! Balls are filled circles with a thin outline. The canvas backing store is
//! kept equal to the container's client size so one canvas pixel is one CSS
//! pixel.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

use crate::frame::{Attachment, Surface};
use crate::settings::Settings;
use crate::sim::{Anchor, Body, Container};

pub struct CanvasSurface {
    /// Element whose client size the canvas tracks; `None` when the host
    /// page owns the canvas size and placement
    container: Option<HtmlElement>,
    canvas: HtmlCanvasElement,
    context: Option<CanvasRenderingContext2d>,
    fill: String,
    stroke: String,
    line_width: f64,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, container: Option<HtmlElement>, settings: &Settings) -> Self {
        let context = context_2d(&canvas);
        if context.is_none() {
            log::warn!("Canvas has no 2D context, nothing will be drawn");
        }

        let mut surface = Self {
            container,
            canvas,
            context,
            fill: settings.ball_color.clone(),
            stroke: settings.ball_border_color.clone(),
            line_width: settings.border_width,
        };
        surface.resized();
        surface
    }

    /// Draw onto a different canvas from now on
    pub fn set_canvas(&mut self, canvas: HtmlCanvasElement) {
        self.context = context_2d(&canvas);
        self.canvas = canvas;
        self.resized();
    }

    fn clear(&self, context: &CanvasRenderingContext2d) {
        context.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()
}

impl Surface for CanvasSurface {
    fn size(&self) -> Option<Container> {
        let attachment = if self.container.is_some() {
            Attachment::Tracked
        } else {
            Attachment::HostManaged
        };
        attachment.size(
            self.canvas.is_connected(),
            self.canvas.width(),
            self.canvas.height(),
        )
    }

    fn draw(&mut self, bodies: &[Body], anchor: Anchor) {
        let Some(context) = &self.context else {
            return;
        };

        self.clear(context);
        context.set_fill_style_str(&self.fill);
        context.set_stroke_style_str(&self.stroke);
        context.set_line_width(self.line_width);

        for body in bodies {
            let center = body.center(anchor);
            context.begin_path();
            if context
                .arc(center.x as f64, center.y as f64, body.radius as f64, 0.0, TAU)
                .is_err()
            {
                continue;
            }
            context.fill();
            context.stroke();
        }
    }

    fn resized(&mut self) {
        let Some(container) = &self.container else {
            return;
        };
        let width = container.client_width().max(0) as u32;
        let height = container.client_height().max(0) as u32;

        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
    }
}
