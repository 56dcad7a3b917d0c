//! Composition root: builds shared services and installs every behavior.
//!
//! SYSTEM CONTEXT
//! ==============
//! `start` (in `lib.rs`) calls `boot`, which waits for the document structure
//! and then installs the stylesheet and the six behaviors. A behavior that
//! fails to install is logged and skipped; the rest still run.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use crate::error::EnhanceError;

/// Log an installation failure. Returns whether the behavior installed.
pub fn report(behavior: &str, result: Result<(), EnhanceError>) -> bool {
    match result {
        Ok(()) => {
            log::debug!("{behavior} installed");
            true
        }
        Err(e) => {
            log::warn!("{behavior} disabled: {e}");
            false
        }
    }
}

#[cfg(feature = "csr")]
pub use browser::{Enhancements, boot};

#[cfg(feature = "csr")]
mod browser {
    use std::rc::Rc;

    use super::report;
    use crate::behaviors::{contact_form, dark_mode, image_fade, reveal, scroll_spy, smooth_scroll};
    use crate::components::toast::{DomToastSurface, Notifier};
    use crate::config::EnhanceConfig;
    use crate::error::EnhanceError;
    use crate::styles;
    use crate::util::dom;
    use crate::util::schedule::{BrowserScheduler, Scheduler};

    /// Shared services plus the configuration every behavior reads.
    pub struct Enhancements {
        config: EnhanceConfig,
        scheduler: Rc<dyn Scheduler>,
        notifier: Rc<Notifier>,
    }

    impl Enhancements {
        pub fn new(config: EnhanceConfig) -> Result<Self, EnhanceError> {
            let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler::new());
            let surface = Rc::new(DomToastSurface::new(dom::document()?));
            let notifier = Rc::new(Notifier::new(surface, Rc::clone(&scheduler), config.toast));
            Ok(Self { config, scheduler, notifier })
        }

        /// Install the stylesheet and every behavior. Returns how many installed.
        pub fn install(&self) -> usize {
            report("styles", styles::inject());
            let results = [
                ("smooth_scroll", smooth_scroll::install()),
                ("scroll_spy", scroll_spy::install(&self.config.scroll_spy)),
                ("reveal", reveal::install(&self.config.reveal)),
                (
                    "contact_form",
                    contact_form::install(&self.config.contact_form, Rc::clone(&self.scheduler), Rc::clone(&self.notifier)),
                ),
                ("dark_mode", dark_mode::install(&self.config.theme)),
                ("image_fade", image_fade::install(&self.config.images)),
            ];
            results
                .into_iter()
                .map(|(name, result)| report(name, result))
                .filter(|installed| *installed)
                .count()
        }
    }

    /// Load config, then install everything once the document is ready.
    pub fn boot() -> Result<(), EnhanceError> {
        let config = EnhanceConfig::load();
        dom::when_ready(move || match Enhancements::new(config) {
            Ok(app) => {
                let installed = app.install();
                log::info!("site enhancements ready ({installed} behaviors)");
            }
            Err(e) => leptos::logging::warn!("site enhancements unavailable: {e}"),
        })
    }
}
