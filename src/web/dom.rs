//! DOM surface
//!
//! One absolutely positioned `div.ball` per body, moved with a CSS transform.
//! Elements are reused across frames and only created or removed when the
//! population changes.

use web_sys::{Document, HtmlElement};

use super::{create_html, set_styles};
use crate::frame::Surface;
use crate::settings::Settings;
use crate::sim::{Anchor, Body, Container};

pub struct DomSurface {
    document: Document,
    container: HtmlElement,
    balls: Vec<HtmlElement>,
    color: String,
    border: String,
}

impl DomSurface {
    pub fn new(document: Document, container: HtmlElement, settings: &Settings) -> Self {
        Self {
            document,
            container,
            balls: Vec::new(),
            color: settings.ball_color.clone(),
            border: format!(
                "{}px solid {}",
                settings.border_width, settings.ball_border_color
            ),
        }
    }

    /// Grow or shrink the pool of ball elements to `count`
    fn sync_elements(&mut self, count: usize, diameter: f32) {
        while self.balls.len() > count {
            if let Some(ball) = self.balls.pop() {
                ball.remove();
            }
        }

        let size = format!("{}px", diameter);
        while self.balls.len() < count {
            let Some(ball) = create_html(&self.document, "div") else {
                log::warn!("Could not create ball element");
                return;
            };
            ball.set_class_name("ball");
            set_styles(
                &ball,
                &[
                    ("position", "absolute"),
                    ("left", "0"),
                    ("top", "0"),
                    ("box-sizing", "border-box"),
                    ("border-radius", "50%"),
                    ("width", size.as_str()),
                    ("height", size.as_str()),
                    ("background", self.color.as_str()),
                    ("border", self.border.as_str()),
                ],
            );
            if self.container.append_child(&ball).is_err() {
                return;
            }
            self.balls.push(ball);
        }
    }
}

impl Surface for DomSurface {
    fn size(&self) -> Option<Container> {
        if !self.container.is_connected() {
            return None;
        }
        Some(Container::new(
            self.container.client_width() as f32,
            self.container.client_height() as f32,
        ))
    }

    fn draw(&mut self, bodies: &[Body], anchor: Anchor) {
        let diameter = bodies.first().map(Body::diameter).unwrap_or_default();
        self.sync_elements(bodies.len(), diameter);

        for (ball, body) in self.balls.iter().zip(bodies) {
            let corner = body.top_left(anchor);
            let _ = ball.style().set_property(
                "transform",
                &format!("translateX({}px) translateY({}px)", corner.x, corner.y),
            );
        }
    }
}

impl Drop for DomSurface {
    fn drop(&mut self) {
        for ball in self.balls.drain(..) {
            ball.remove();
        }
    }
}
