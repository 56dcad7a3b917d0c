//! Fade-in for lazily loaded images.
//!
//! Each `img[loading="lazy"]` starts transparent with an opacity transition
//! and turns opaque once loaded. Images that finished loading before the
//! handler attached never fire `load`, so they are faded in at attach time.

#[cfg(test)]
#[path = "image_fade_test.rs"]
mod image_fade_test;

pub const HIDDEN_OPACITY: &str = "0";
pub const VISIBLE_OPACITY: &str = "1";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeStart {
    /// Wait for the `load` event.
    AwaitLoad,
    /// Already decoded; fade in now.
    Immediate,
}

/// Pick the fade trigger from the image's state at attach time.
///
/// A complete image with zero natural width is broken (or has no source) and
/// keeps waiting.
#[must_use]
pub fn fade_start(complete: bool, natural_width: u32) -> FadeStart {
    if complete && natural_width > 0 { FadeStart::Immediate } else { FadeStart::AwaitLoad }
}

#[cfg(feature = "csr")]
pub fn install(config: &crate::config::ImageFadeConfig) -> Result<(), crate::error::EnhanceError> {
    use web_sys::HtmlImageElement;

    use crate::util::dom;

    let document = dom::document()?;
    let images: Vec<HtmlImageElement> = dom::query_all(&document, &config.selector)?;

    let mut immediate = 0_usize;
    for image in images {
        let style = image.style();
        style.set_property("opacity", HIDDEN_OPACITY)?;
        style.set_property("transition", &config.transition)?;

        match fade_start(image.complete(), image.natural_width()) {
            FadeStart::Immediate => {
                style.set_property("opacity", VISIBLE_OPACITY)?;
                immediate += 1;
            }
            FadeStart::AwaitLoad => {
                let loaded = image.clone();
                dom::listen(&image, "load", move |_| {
                    let _ = loaded.style().set_property("opacity", VISIBLE_OPACITY);
                })?;
            }
        }
    }
    log::debug!("image fade: {immediate} already loaded");
    Ok(())
}
