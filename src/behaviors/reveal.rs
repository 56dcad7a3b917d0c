//! Reveal-on-scroll animations.
//!
//! Elements carrying a marker class (`fade-in`, `slide-up`, `slide-in`) are
//! watched by one `IntersectionObserver`. The first time an element
//! intersects it gains the `animate` class and is unobserved; the reveal is
//! one-shot and never reversed.

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

/// Class that resolves a marker class to its final visible state.
pub const ANIMATE_CLASS: &str = "animate";

/// Tracker key of `target`: its position among the observed elements.
#[must_use]
pub fn key_of<T: PartialEq>(observed: &[T], target: &T) -> Option<usize> {
    observed.iter().position(|el| el == target)
}

/// Comma-joined class selector for the marker classes.
#[must_use]
pub fn marker_selector(classes: &[String]) -> String {
    classes
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(|c| format!(".{c}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Observer root margin that shrinks the viewport's bottom edge.
#[must_use]
pub fn root_margin(bottom_margin_px: u32) -> String {
    format!("0px 0px -{bottom_margin_px}px 0px")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealAction {
    /// Add the animate class and stop observing.
    Reveal,
    /// Nothing to do for this entry.
    Ignore,
}

/// One-shot reveal bookkeeping for observed elements.
#[derive(Debug, Default)]
pub struct RevealTracker {
    revealed: Vec<bool>,
}

impl RevealTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element and return its key.
    pub fn register(&mut self) -> usize {
        self.revealed.push(false);
        self.revealed.len() - 1
    }

    #[must_use]
    pub fn is_revealed(&self, key: usize) -> bool {
        self.revealed.get(key).copied().unwrap_or(false)
    }

    /// Decide what to do with a visibility change for `key`.
    pub fn on_visibility(&mut self, key: usize, intersecting: bool) -> RevealAction {
        let Some(revealed) = self.revealed.get_mut(key) else {
            return RevealAction::Ignore;
        };
        if !intersecting || *revealed {
            return RevealAction::Ignore;
        }
        *revealed = true;
        RevealAction::Reveal
    }
}

#[cfg(feature = "csr")]
pub fn install(config: &crate::config::RevealConfig) -> Result<(), crate::error::EnhanceError> {
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

    use crate::util::dom;

    let document = dom::document()?;
    let elements: Vec<Element> = dom::query_all(&document, &marker_selector(&config.marker_classes))?;
    if elements.is_empty() {
        return Ok(());
    }

    // Keys are registered in `elements` order, so a key is the element's index.
    let mut tracker = RevealTracker::new();
    for _ in &elements {
        tracker.register();
    }
    let elements = Rc::new(elements);
    let observed = Rc::clone(&elements);
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(key) = key_of(&observed, &target) else {
                    continue;
                };
                let action = tracker.on_visibility(key, entry.is_intersecting());
                if action == RevealAction::Reveal {
                    dom::set_class(&target, ANIMATE_CLASS, true);
                    observer.unobserve(&target);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&wasm_bindgen::JsValue::from_f64(config.threshold));
    options.set_root_margin(&root_margin(config.bottom_margin_px));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    // The observer lives for the page.
    callback.forget();

    for element in elements.iter() {
        observer.observe(element);
    }
    log::debug!("reveal observing {} elements", elements.len());
    Ok(())
}
