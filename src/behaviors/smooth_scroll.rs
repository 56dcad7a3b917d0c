//! Smooth scrolling for in-page anchor links.
//!
//! Every `a[href^="#"]` click is intercepted: the default jump is always
//! suppressed, and the referenced element (if any) is scrolled into view with
//! smooth behavior, aligned to its top edge.

#[cfg(test)]
#[path = "smooth_scroll_test.rs"]
mod smooth_scroll_test;

/// Anchors handled by smooth scrolling.
pub const ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;

/// Element id referenced by a hash href, if it names one.
///
/// Only same-page references (`#id`) qualify; a bare `#` names nothing.
#[must_use]
pub fn hash_target_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[cfg(feature = "csr")]
pub fn install() -> Result<(), crate::error::EnhanceError> {
    use web_sys::{Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

    use crate::util::dom;

    let document = dom::document()?;
    let anchors: Vec<Element> = dom::query_all(&document, ANCHOR_SELECTOR)?;
    log::debug!("smooth scroll bound to {} anchors", anchors.len());

    for anchor in anchors {
        let target_document = document.clone();
        let source = anchor.clone();
        dom::listen(&anchor, "click", move |event| {
            event.prevent_default();
            let href = source.get_attribute("href").unwrap_or_default();
            let Some(target) = hash_target_id(&href).and_then(|id| target_document.get_element_by_id(id)) else {
                log::debug!("no scroll target for {href:?}");
                return;
            };
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        })?;
    }
    Ok(())
}
