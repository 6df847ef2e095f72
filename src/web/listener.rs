//! Scoped DOM event listeners
//!
//! A `Listener` keeps its closure alive and unregisters it on drop, so a
//! view's listeners disappear with the view.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

pub struct Listener {
    target: EventTarget,
    event: &'static str,
    /// `None` once leaked with `forget`
    closure: Option<Closure<dyn FnMut(Event)>>,
}

impl Listener {
    /// Register `handler` for `event` on `target`
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Option<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        if let Err(e) =
            target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            log::warn!("Failed to listen for '{}': {:?}", event, e);
            return None;
        }

        Some(Self {
            target: target.clone(),
            event,
            closure: Some(closure),
        })
    }

    /// Keep the listener registered for the lifetime of the page
    pub fn forget(mut self) {
        if let Some(closure) = self.closure.take() {
            closure.forget();
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Some(closure) = &self.closure {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.event, closure.as_ref().unchecked_ref());
        }
    }
}
