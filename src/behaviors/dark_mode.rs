//! Dark mode initialization and persistence.
//!
//! Reads the saved preference from `localStorage`, falling back to the
//! platform `prefers-color-scheme`, and applies a theme class to the `<html>`
//! element. The floating toggle control lives in
//! `components::dark_mode_toggle`.
//!
//! The page is reached only through `ThemeHost`; `PageThemeHost` binds it to
//! `localStorage`, `matchMedia` and the `<html>` class list.
//!
//! TRADE-OFFS
//! ==========
//! Preference persistence is best-effort browser-only behavior; non-browser
//! builds treat storage as empty and the platform as light.

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod dark_mode_test;

use crate::config::ThemeConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Value persisted to storage.
    #[must_use]
    pub fn storage_value(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Toggle glyph: the moon while light, the sun while dark.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "🌓",
            Self::Dark => "☀️",
        }
    }

    #[must_use]
    pub fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }
}

/// Resolve the theme to start with.
///
/// A saved `"dark"` wins. Any other saved non-empty value means light. With
/// nothing saved, the platform preference decides.
#[must_use]
pub fn initial_theme(saved: Option<&str>, system_prefers_dark: bool) -> Theme {
    match saved {
        Some("dark") => Theme::Dark,
        Some(value) if !value.is_empty() => Theme::Light,
        _ => Theme::from_dark(system_prefers_dark),
    }
}

/// Page-side theme operations.
pub trait ThemeHost {
    /// Raw saved preference, if any.
    fn saved(&self) -> Option<String>;
    fn persist(&self, value: &str);
    /// Whether the platform reports a dark color-scheme preference.
    fn system_prefers_dark(&self) -> bool;
    /// Whether the document root currently carries the dark class.
    fn is_dark(&self) -> bool;
    fn set_dark(&self, dark: bool);
}

/// Read the saved preference, falling back to the platform preference.
pub fn read_preference(host: &dyn ThemeHost) -> Theme {
    let saved = host.saved();
    initial_theme(saved.as_deref(), host.system_prefers_dark())
}

/// Theme currently shown by the document root.
pub fn current(host: &dyn ThemeHost) -> Theme {
    Theme::from_dark(host.is_dark())
}

/// Resolve the starting theme and show it. Returns the theme.
///
/// Only ever adds the dark class; a light start leaves the markup untouched.
pub fn initialize(host: &dyn ThemeHost) -> Theme {
    let theme = read_preference(host);
    if theme == Theme::Dark {
        host.set_dark(true);
    }
    theme
}

/// Flip the shown theme, persist it and return the new theme.
pub fn toggle(host: &dyn ThemeHost) -> Theme {
    let next = current(host).toggled();
    host.set_dark(next == Theme::Dark);
    host.persist(next.storage_value());
    log::debug!("theme switched to {}", next.storage_value());
    next
}

/// `ThemeHost` over the live page. Off-browser it reads nothing and shows light.
#[derive(Clone, Debug)]
pub struct PageThemeHost {
    config: ThemeConfig,
}

impl PageThemeHost {
    pub fn new(config: ThemeConfig) -> Self {
        Self { config }
    }

    #[cfg(feature = "csr")]
    fn root() -> Option<web_sys::Element> {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
    }
}

impl ThemeHost for PageThemeHost {
    fn saved(&self) -> Option<String> {
        crate::util::storage::get_item(&self.config.storage_key)
    }

    fn persist(&self, value: &str) {
        crate::util::storage::set_item(&self.config.storage_key, value);
    }

    fn system_prefers_dark(&self) -> bool {
        #[cfg(feature = "csr")]
        {
            web_sys::window()
                .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
                .map_or(false, |mq| mq.matches())
        }
        #[cfg(not(feature = "csr"))]
        {
            false
        }
    }

    fn is_dark(&self) -> bool {
        #[cfg(feature = "csr")]
        {
            Self::root().is_some_and(|root| root.class_list().contains(&self.config.dark_class))
        }
        #[cfg(not(feature = "csr"))]
        {
            false
        }
    }

    fn set_dark(&self, dark: bool) {
        #[cfg(feature = "csr")]
        {
            if let Some(root) = Self::root() {
                crate::util::dom::set_class(&root, &self.config.dark_class, dark);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = dark;
        }
    }
}

/// Apply the initial theme and mount the toggle control.
#[cfg(feature = "csr")]
pub fn install(config: &ThemeConfig) -> Result<(), crate::error::EnhanceError> {
    use leptos::prelude::*;

    use crate::components::dark_mode_toggle::DarkModeToggle;

    let host = PageThemeHost::new(config.clone());
    let theme = initialize(&host);
    leptos::mount::mount_to_body(move || view! { <DarkModeToggle initial=theme host=host /> });
    Ok(())
}
