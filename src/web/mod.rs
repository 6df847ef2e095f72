//! Browser glue
//!
//! Everything that touches `web_sys` lives here. The kernel and frame driver
//! never see a DOM type.

pub mod app;
pub mod bindings;
pub mod canvas;
pub mod dom;
pub mod listener;
pub mod scheduler;

pub use bindings::BouncingBalls;
pub use canvas::CanvasSurface;
pub use dom::DomSurface;
pub use listener::Listener;
pub use scheduler::{RafScheduler, spawn_loop, stop_loop};

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

/// Create an element and cast it to `HtmlElement`
pub fn create_html(document: &Document, tag: &str) -> Option<HtmlElement> {
    document
        .create_element(tag)
        .ok()?
        .dyn_into::<HtmlElement>()
        .ok()
}

/// Apply `property: value` pairs to an element's inline style
pub fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) {
    let style = element.style();
    for (property, value) in styles {
        let _ = style.set_property(property, value);
    }
}

/// Seed for a fresh simulation
pub fn time_seed() -> u64 {
    js_sys::Date::now() as u64
}
