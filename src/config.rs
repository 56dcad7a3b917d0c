//! Enhancement configuration with page-level JSON overrides.
//!
//! Defaults reproduce the stock markup contract (`.contact_form`,
//! `.site_header_nav a`, `section[id]`, ...). A page may override any field
//! by embedding a JSON object:
//!
//! ```html
//! <script type="application/json" id="site-enhance-config">
//!   { "scrollSpy": { "offsetPx": 80, "linkMatch": "exact" } }
//! </script>
//! ```
//!
//! Keys are camelCase and every key is optional.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::behaviors::scroll_spy::LinkMatch;
use crate::error::EnhanceError;

/// Id of the `<script>` element holding JSON overrides.
pub const CONFIG_ELEMENT_ID: &str = "site-enhance-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollSpyConfig {
    pub section_selector: String,
    pub nav_link_selector: String,
    pub offset_px: f64,
    pub link_match: LinkMatch,
}

impl Default for ScrollSpyConfig {
    fn default() -> Self {
        Self {
            section_selector: "section[id]".to_owned(),
            nav_link_selector: ".site_header_nav a".to_owned(),
            offset_px: 60.0,
            link_match: LinkMatch::Substring,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealConfig {
    pub marker_classes: Vec<String>,
    pub threshold: f64,
    pub bottom_margin_px: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            marker_classes: ["fade-in", "slide-up", "slide-in"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            threshold: 0.1,
            bottom_margin_px: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactFormConfig {
    pub form_selector: String,
    pub send_delay_ms: u32,
    pub sending_label: String,
    pub invalid_message: String,
    pub success_message: String,
    pub failure_message: String,
}

impl Default for ContactFormConfig {
    fn default() -> Self {
        Self {
            form_selector: ".contact_form".to_owned(),
            send_delay_ms: 1000,
            sending_label: "Sending…".to_owned(),
            invalid_message: "Please fill in all fields correctly".to_owned(),
            success_message: "Message sent successfully!".to_owned(),
            failure_message: "Failed to send message. Please try again.".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeConfig {
    pub storage_key: String,
    pub dark_class: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self { storage_key: "darkMode".to_owned(), dark_class: "dark-mode".to_owned() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToastTiming {
    pub show_delay_ms: u32,
    pub visible_ms: u32,
    pub fade_ms: u32,
}

impl Default for ToastTiming {
    fn default() -> Self {
        Self { show_delay_ms: 10, visible_ms: 3000, fade_ms: 300 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageFadeConfig {
    pub selector: String,
    pub transition: String,
}

impl Default for ImageFadeConfig {
    fn default() -> Self {
        Self { selector: r#"img[loading="lazy"]"#.to_owned(), transition: "opacity 0.3s ease-in-out".to_owned() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnhanceConfig {
    pub scroll_spy: ScrollSpyConfig,
    pub reveal: RevealConfig,
    pub contact_form: ContactFormConfig,
    pub theme: ThemeConfig,
    pub toast: ToastTiming,
    pub images: ImageFadeConfig,
}

impl EnhanceConfig {
    /// Parse overrides from JSON and validate the merged result.
    pub fn from_json(raw: &str) -> Result<Self, EnhanceError> {
        let config: Self = serde_json::from_str(raw).map_err(|e| EnhanceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EnhanceError> {
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(EnhanceError::Config(format!(
                "reveal.threshold must be within [0, 1], got {}",
                self.reveal.threshold
            )));
        }
        if self.reveal.marker_classes.iter().all(|c| c.trim().is_empty()) {
            return Err(EnhanceError::Config("reveal.markerClasses is empty".into()));
        }

        let selectors = [
            ("scrollSpy.sectionSelector", &self.scroll_spy.section_selector),
            ("scrollSpy.navLinkSelector", &self.scroll_spy.nav_link_selector),
            ("contactForm.formSelector", &self.contact_form.form_selector),
            ("images.selector", &self.images.selector),
            ("theme.storageKey", &self.theme.storage_key),
            ("theme.darkClass", &self.theme.dark_class),
        ];
        if let Some((name, _)) = selectors.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(EnhanceError::Config(format!("{name} must not be empty")));
        }
        Ok(())
    }

    /// Load overrides from the page, falling back to defaults on any problem.
    pub fn load() -> Self {
        #[cfg(feature = "csr")]
        {
            let raw = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
                .and_then(|el| el.text_content());
            let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
                return Self::default();
            };
            match Self::from_json(&raw) {
                Ok(config) => config,
                Err(e) => {
                    leptos::logging::warn!("ignoring page config: {e}");
                    Self::default()
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            Self::default()
        }
    }
}
