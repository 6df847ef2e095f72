//! Page shell and client-side routing
//!
//! Exactly one view is mounted under `#app` at a time. Switching views drops
//! the old one, which stops its animation loop and unregisters its listeners
//! before its elements leave the page.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlCanvasElement, HtmlElement, HtmlInputElement, UrlSearchParams,
};

use super::{
    CanvasSurface, DomSurface, Listener, create_html, set_styles, spawn_loop, stop_loop, time_seed,
};
use crate::frame::Surface;
use crate::routes::{PopulationRange, View};
use crate::settings::Settings;
use crate::sim::Simulation;

/// A view currently on the page
struct Mounted {
    view: View,
    element: HtmlElement,
    teardown: Option<Box<dyn FnOnce()>>,
    _listeners: Vec<Listener>,
}

impl Drop for Mounted {
    fn drop(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
        self.element.remove();
        log::info!("Unmounted {}", self.view.title());
    }
}

/// Elements shared by every bouncing view
struct BouncerLayout {
    root: HtmlElement,
    label: HtmlElement,
    slider: HtmlInputElement,
    balls: HtmlElement,
}

pub struct App {
    document: Document,
    root: HtmlElement,
    settings: Settings,
    mounted: Option<Mounted>,
}

impl App {
    pub fn new(document: Document, root: HtmlElement, settings: Settings) -> Self {
        Self {
            document,
            root,
            settings,
            mounted: None,
        }
    }

    pub fn current(&self) -> Option<View> {
        self.mounted.as_ref().map(|m| m.view)
    }

    /// Replace the mounted view
    pub fn navigate(&mut self, view: View) {
        if self.current() == Some(view) {
            return;
        }

        // Old view must be gone before the new one measures its container
        self.mounted = None;

        let mounted = match view {
            View::Home => self.mount_home(),
            View::HtmlBounce => self.mount_html(view),
            View::CanvasBounce | View::WasmBounce => self.mount_canvas(view),
        };

        match mounted {
            Some(mounted) => {
                self.document.set_title(view.title());
                log::info!("Mounted {} at {}", view.title(), view.path());
                self.mounted = Some(mounted);
            }
            None => log::warn!("Failed to mount {}", view.title()),
        }
    }

    fn mount_home(&self) -> Option<Mounted> {
        let nav = create_html(&self.document, "nav")?;
        let list = create_html(&self.document, "ul")?;
        for view in View::BOUNCERS {
            let item = create_html(&self.document, "li")?;
            let link = create_html(&self.document, "a")?;
            link.set_attribute("href", view.path()).ok()?;
            link.set_text_content(Some(view.title()));
            item.append_child(&link).ok()?;
            list.append_child(&item).ok()?;
        }
        nav.append_child(&list).ok()?;
        self.root.append_child(&nav).ok()?;

        Some(Mounted {
            view: View::Home,
            element: nav,
            teardown: None,
            _listeners: Vec::new(),
        })
    }

    fn mount_html(&self, view: View) -> Option<Mounted> {
        let layout = self.bouncer_layout(view.population()?)?;
        self.root.append_child(&layout.root).ok()?;

        let surface = DomSurface::new(self.document.clone(), layout.balls.clone(), &self.settings);
        self.start_bouncer(view, layout, surface)
    }

    fn mount_canvas(&self, view: View) -> Option<Mounted> {
        let layout = self.bouncer_layout(view.population()?)?;
        let canvas: HtmlCanvasElement = self.document.create_element("canvas").ok()?.dyn_into().ok()?;
        set_styles(&canvas, &[("display", "block")]);
        layout.balls.append_child(&canvas).ok()?;
        // Attached first so the container has a client size to copy
        self.root.append_child(&layout.root).ok()?;

        let surface = CanvasSurface::new(canvas, Some(layout.balls.clone()), &self.settings);
        self.start_bouncer(view, layout, surface)
    }

    /// Start the loop for a mounted layout and hook up its controls
    fn start_bouncer<R: Surface + 'static>(
        &self,
        view: View,
        layout: BouncerLayout,
        surface: R,
    ) -> Option<Mounted> {
        let range = view.population()?;
        let sim = Simulation::new(view.sim_config()?, time_seed());
        let Some(driver) = spawn_loop(sim, surface, self.settings.log_fps) else {
            layout.root.remove();
            return None;
        };

        let mut listeners = Vec::new();
        let window = web_sys::window()?;

        {
            let weak = Rc::downgrade(&driver);
            listeners.extend(Listener::new(&window, "resize", move |_event: Event| {
                if let Some(driver) = weak.upgrade() {
                    driver.borrow_mut().surface_resized();
                }
            }));
        }

        {
            let weak = Rc::downgrade(&driver);
            let slider = layout.slider.clone();
            let label = layout.label.clone();
            listeners.extend(Listener::new(&layout.slider, "input", move |_event: Event| {
                let amount = range.parse(&slider.value());
                label.set_text_content(Some(&amount_label(amount)));
                if let Some(driver) = weak.upgrade() {
                    driver.borrow_mut().resize(amount);
                }
            }));
        }

        Some(Mounted {
            view,
            element: layout.root,
            teardown: Some(Box::new(move || stop_loop(&driver))),
            _listeners: listeners,
        })
    }

    /// Controls bar plus an empty ball container filling the rest of the page
    fn bouncer_layout(&self, range: PopulationRange) -> Option<BouncerLayout> {
        let root = create_html(&self.document, "div")?;
        root.set_id("container");
        set_styles(
            &root,
            &[
                ("display", "flex"),
                ("flex-direction", "column"),
                ("height", "100vh"),
            ],
        );

        let controls = create_html(&self.document, "div")?;
        controls.set_id("controls");
        set_styles(&controls, &[("display", "flex"), ("gap", "1em"), ("padding", "0.5em")]);

        let back = create_html(&self.document, "a")?;
        back.set_attribute("href", View::Home.path()).ok()?;
        back.set_text_content(Some("home"));

        let label = create_html(&self.document, "span")?;
        label.set_text_content(Some(&amount_label(range.default)));

        let slider: HtmlInputElement = self.document.create_element("input").ok()?.dyn_into().ok()?;
        slider.set_type("range");
        slider.set_min(&range.min.to_string());
        slider.set_max(&range.max.to_string());
        slider.set_step(&range.step.to_string());
        slider.set_value(&range.default.to_string());

        controls.append_child(&back).ok()?;
        controls.append_child(&label).ok()?;
        controls.append_child(&slider).ok()?;

        let balls = create_html(&self.document, "div")?;
        balls.set_id("ballContainer");
        set_styles(
            &balls,
            &[
                ("position", "relative"),
                ("flex", "1"),
                ("overflow", "hidden"),
            ],
        );

        root.append_child(&controls).ok()?;
        root.append_child(&balls).ok()?;

        Some(BouncerLayout {
            root,
            label,
            slider,
            balls,
        })
    }
}

fn amount_label(amount: usize) -> String {
    format!("amount: {}", amount)
}

/// Intercept same-origin link clicks and back/forward navigation
fn install_router(app: Rc<RefCell<App>>) -> Option<()> {
    let window = web_sys::window()?;
    let root = app.borrow().root.clone();

    {
        let app = app.clone();
        let window = window.clone();
        Listener::new(&root, "click", move |event: Event| {
            let link = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("a").ok().flatten());
            let Some(href) = link.and_then(|a| a.get_attribute("href")) else {
                return;
            };
            if !href.starts_with('/') {
                return;
            }

            event.prevent_default();
            if let Ok(history) = window.history() {
                let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&href));
            }
            app.borrow_mut().navigate(View::from_path(&href));
        })?
        .forget();
    }

    {
        let location = window.location();
        Listener::new(&window, "popstate", move |_event: Event| {
            let path = location.pathname().unwrap_or_default();
            app.borrow_mut().navigate(View::from_path(&path));
        })?
        .forget();
    }

    Some(())
}

/// Settings overrides from the query string, e.g. `?ball_color=teal&log_fps=1`
fn query_overrides(window: &web_sys::Window) -> Vec<(&'static str, String)> {
    let Some(params) = window
        .location()
        .search()
        .ok()
        .and_then(|search| UrlSearchParams::new_with_str(&search).ok())
    else {
        return Vec::new();
    };

    Settings::OVERRIDE_KEYS
        .into_iter()
        .filter_map(|key| params.get(key).map(|value| (key, value)))
        .collect()
}

/// Mount the view for the current location and start routing
pub fn run() {
    let Some(window) = web_sys::window() else {
        log::error!("No window");
        return;
    };
    let Some(document) = window.document() else {
        log::error!("No document");
        return;
    };

    let root = document
        .get_element_by_id("app")
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .or_else(|| document.body());
    let Some(root) = root else {
        log::error!("No #app element or body to mount into");
        return;
    };

    let mut settings = Settings::load();
    let overrides = query_overrides(&window);
    if settings.apply_overrides(overrides.iter().map(|(k, v)| (*k, v.as_str()))) {
        settings.save();
    }
    let app = Rc::new(RefCell::new(App::new(document, root, settings)));

    let path = window.location().pathname().unwrap_or_default();
    app.borrow_mut().navigate(View::from_path(&path));

    if install_router(app).is_none() {
        log::warn!("Router not installed, links will reload the page");
    }
}
