//! Scroll-spy: highlight the nav link for the section currently in view.
//!
//! On every scroll event the last section (in document order) whose top,
//! less a fixed offset, has been scrolled past becomes current. Nav links are
//! then marked `active` by comparing their href with the current section id.
//!
//! TRADE-OFFS
//! ==========
//! `LinkMatch::Substring` keeps the historical loose matching, so a link to
//! `#team-history` also lights up while `#team` is current. Pages that need
//! precise highlighting opt into `LinkMatch::Exact` through config.
//!
//! Above the first section's offset point no section is current and no link
//! is active, rather than every link matching an empty id.

#[cfg(test)]
#[path = "scroll_spy_test.rs"]
mod scroll_spy_test;

use serde::Deserialize;

/// Class applied to the nav link of the current section.
pub const ACTIVE_CLASS: &str = "active";

/// How a nav link href is compared to the current section id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMatch {
    /// The href contains the id anywhere.
    #[default]
    Substring,
    /// The href fragment equals the id.
    Exact,
}

/// A section's id and its offset from the top of the document.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionAnchor {
    pub id: String,
    pub top: f64,
}

/// Id of the last section whose `top - offset` has been scrolled past.
#[must_use]
pub fn current_section(sections: &[SectionAnchor], scroll_y: f64, offset: f64) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|s| scroll_y >= s.top - offset)
        .map(|s| s.id.as_str())
}

/// Whether a nav link with `href` should be marked active.
#[must_use]
pub fn link_is_active(href: &str, current: Option<&str>, mode: LinkMatch) -> bool {
    let Some(current) = current.filter(|id| !id.is_empty()) else {
        return false;
    };
    match mode {
        LinkMatch::Substring => href.contains(current),
        LinkMatch::Exact => href
            .rsplit_once('#')
            .is_some_and(|(_, fragment)| fragment == current),
    }
}

#[cfg(feature = "csr")]
pub fn install(config: &crate::config::ScrollSpyConfig) -> Result<(), crate::error::EnhanceError> {
    use web_sys::{Element, HtmlElement};

    use crate::util::dom;

    let window = dom::window()?;
    let document = dom::document()?;
    let sections: Vec<HtmlElement> = dom::query_all(&document, &config.section_selector)?;
    let links: Vec<Element> = dom::query_all(&document, &config.nav_link_selector)?;
    log::debug!("scroll spy tracking {} sections, {} links", sections.len(), links.len());

    let offset = config.offset_px;
    let mode = config.link_match;
    let scroll_window = window.clone();
    dom::listen(&window, "scroll", move |_| {
        let scroll_y = scroll_window.scroll_y().unwrap_or(0.0);
        let anchors = sections
            .iter()
            .map(|s| SectionAnchor { id: s.id(), top: f64::from(s.offset_top()) })
            .collect::<Vec<_>>();
        let current = current_section(&anchors, scroll_y, offset);
        for link in &links {
            let active = link
                .get_attribute("href")
                .is_some_and(|href| link_is_active(&href, current, mode));
            dom::set_class(link, ACTIVE_CLASS, active);
        }
    })
}
