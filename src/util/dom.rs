//! Thin web-sys glue used by every behavior's browser half.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

/// `document.readyState` value while the HTML is still being parsed.
pub const LOADING_STATE: &str = "loading";

/// Whether a `document.readyState` value means the structure is parsed.
#[must_use]
pub fn is_parsed(ready_state: &str) -> bool {
    ready_state != LOADING_STATE
}

#[cfg(feature = "csr")]
pub use browser::*;

#[cfg(feature = "csr")]
mod browser {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use web_sys::{Document, Element, Event, EventTarget, Window};

    use super::is_parsed;
    use crate::error::EnhanceError;

    pub fn window() -> Result<Window, EnhanceError> {
        web_sys::window().ok_or(EnhanceError::NoWindow)
    }

    pub fn document() -> Result<Document, EnhanceError> {
        window()?.document().ok_or(EnhanceError::NoDocument)
    }

    /// Collect every element matching `selector` that casts to `T`.
    pub fn query_all<T: JsCast>(document: &Document, selector: &str) -> Result<Vec<T>, EnhanceError> {
        let nodes = document.query_selector_all(selector)?;
        Ok((0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<T>().ok())
            .collect())
    }

    /// First descendant of `root` matching `selector`, cast to `T`.
    pub fn query_within<T: JsCast>(root: &Element, selector: &str) -> Result<Option<T>, EnhanceError> {
        Ok(root
            .query_selector(selector)?
            .and_then(|el| el.dyn_into::<T>().ok()))
    }

    /// Attach a listener for the lifetime of the page.
    pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), EnhanceError>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        // Page-lifetime listener; never removed.
        closure.forget();
        Ok(())
    }

    /// Add or remove `class` on `element`.
    pub fn set_class(element: &Element, class: &str, on: bool) {
        let _ = element.class_list().toggle_with_force(class, on);
    }

    /// Run `f` once the document structure is parsed.
    pub fn when_ready<F>(f: F) -> Result<(), EnhanceError>
    where
        F: FnOnce() + 'static,
    {
        let document = document()?;
        if is_parsed(&document.ready_state()) {
            f();
            return Ok(());
        }

        let callback = Closure::once_into_js(f);
        document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())?;
        Ok(())
    }
}
