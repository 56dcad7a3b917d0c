//! Transient toast notifications.
//!
//! A toast is mounted hidden, switched to its shown state on the next tick so
//! the CSS transition runs, hidden again after `visible_ms`, and removed
//! `fade_ms` later. Toasts are not queued or capped; concurrent ones stack.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use std::cell::Cell;
use std::rc::Rc;

use crate::config::ToastTiming;
use crate::util::schedule::{Scheduler, TaskHandle};

/// Class toggled to run the show/hide transition.
pub const SHOWN_CLASS: &str = "show";

/// Visual severity of a toast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

impl Severity {
    /// Parse a severity tag; unrecognized tags get the neutral style.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "success" => Self::Success,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// Full class attribute for a toast node.
    #[must_use]
    pub fn class_name(self) -> String {
        format!("notification {}", self.tag())
    }
}

/// A mounted toast element.
pub trait ToastNode {
    fn set_shown(&self, shown: bool);
    fn remove(&self);
}

/// Where toast nodes are created.
pub trait ToastSurface {
    fn mount(&self, message: &str, severity: Severity) -> Rc<dyn ToastNode>;
}

/// Pending lifecycle tasks of one toast.
pub struct ToastHandle {
    show: TaskHandle,
    hide: TaskHandle,
    remove: Rc<Cell<Option<TaskHandle>>>,
    node: Rc<dyn ToastNode>,
}

/// Shows toasts on a surface, driving their lifecycle through a scheduler.
pub struct Notifier {
    surface: Rc<dyn ToastSurface>,
    scheduler: Rc<dyn Scheduler>,
    timing: ToastTiming,
}

impl Notifier {
    pub fn new(surface: Rc<dyn ToastSurface>, scheduler: Rc<dyn Scheduler>, timing: ToastTiming) -> Self {
        Self { surface, scheduler, timing }
    }

    /// Show `message` and schedule its dismissal.
    pub fn notify(&self, message: &str, severity: Severity) -> ToastHandle {
        log::debug!("toast [{}]: {message}", severity.tag());
        let node = self.surface.mount(message, severity);

        let shown = Rc::clone(&node);
        let show = self
            .scheduler
            .schedule(self.timing.show_delay_ms, Box::new(move || shown.set_shown(true)));

        let remove = Rc::new(Cell::new(None));
        let hide = {
            let node = Rc::clone(&node);
            let remove = Rc::clone(&remove);
            let scheduler = Rc::clone(&self.scheduler);
            let fade_ms = self.timing.fade_ms;
            self.scheduler.schedule(
                self.timing.visible_ms,
                Box::new(move || {
                    node.set_shown(false);
                    let removed = Rc::clone(&node);
                    remove.set(Some(scheduler.schedule(fade_ms, Box::new(move || removed.remove()))));
                }),
            )
        };

        ToastHandle { show, hide, remove, node }
    }

    /// Remove a toast now, cancelling whatever is still pending for it.
    pub fn dismiss(&self, handle: ToastHandle) {
        self.scheduler.cancel(handle.show);
        let hide_pending = self.scheduler.cancel(handle.hide);
        let remove_pending = handle
            .remove
            .take()
            .is_some_and(|task| self.scheduler.cancel(task));
        if hide_pending || remove_pending {
            handle.node.remove();
        }
    }
}

#[cfg(feature = "csr")]
pub use browser::DomToastSurface;

#[cfg(feature = "csr")]
mod browser {
    use std::rc::Rc;

    use web_sys::{Document, Element};

    use super::{SHOWN_CLASS, Severity, ToastNode, ToastSurface};
    use crate::util::dom;

    /// Appends toast `<div>`s to the document body.
    pub struct DomToastSurface {
        document: Document,
    }

    impl DomToastSurface {
        pub fn new(document: Document) -> Self {
            Self { document }
        }
    }

    struct DomToastNode(Option<Element>);

    impl ToastNode for DomToastNode {
        fn set_shown(&self, shown: bool) {
            if let Some(el) = &self.0 {
                dom::set_class(el, SHOWN_CLASS, shown);
            }
        }

        fn remove(&self) {
            if let Some(el) = &self.0 {
                el.remove();
            }
        }
    }

    impl ToastSurface for DomToastSurface {
        fn mount(&self, message: &str, severity: Severity) -> Rc<dyn ToastNode> {
            let element = self.document.create_element("div").ok().and_then(|el| {
                el.set_class_name(&severity.class_name());
                el.set_text_content(Some(message));
                let body = self.document.body()?;
                body.append_child(&el).ok()?;
                Some(el)
            });
            if element.is_none() {
                leptos::logging::warn!("toast could not be mounted: {message}");
            }
            Rc::new(DomToastNode(element))
        }
    }
}
