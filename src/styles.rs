//! Stylesheet backing the injected classes.
//!
//! Covers notification variants, the dark-mode toggle, dark theme variables,
//! reveal animation classes, the active nav link and the field error state.

#[cfg(test)]
#[path = "styles_test.rs"]
mod styles_test;

/// Id of the injected `<style>` element; guards against double injection.
pub const STYLE_ELEMENT_ID: &str = "site-enhance-styles";

pub const ENHANCE_CSS: &str = r"
.notification {
    position: fixed;
    bottom: 20px;
    right: 20px;
    padding: 12px 24px;
    border-radius: 4px;
    background: #333;
    color: white;
    font-size: 14px;
    opacity: 0;
    transform: translateY(20px);
    transition: all 0.3s ease;
    z-index: 1000;
}

.notification.show {
    opacity: 1;
    transform: translateY(0);
}

.notification.success {
    background: #4caf50;
}

.notification.error {
    background: #f44336;
}

.dark-mode-toggle {
    position: fixed;
    bottom: 20px;
    left: 20px;
    width: 40px;
    height: 40px;
    border-radius: 50%;
    border: none;
    background: #fff;
    box-shadow: 0 2px 4px rgba(0, 0, 0, 0.1);
    cursor: pointer;
    z-index: 1000;
    display: flex;
    align-items: center;
    justify-content: center;
    font-size: 20px;
    transition: all 0.3s ease;
}

.dark-mode-toggle:hover {
    transform: scale(1.1);
}

.dark-mode {
    --clr-bg: #1a1a1a;
    --clr-text: #f5f5f5;
    --clr-accent: #4caf50;
}

.dark-mode body {
    background: var(--clr-bg);
    color: var(--clr-text);
}

.fade-in {
    opacity: 0;
    transition: opacity 0.6s ease-in-out;
}

.slide-up {
    opacity: 0;
    transform: translateY(20px);
    transition: all 0.6s ease-in-out;
}

.slide-in {
    opacity: 0;
    transform: translateX(-20px);
    transition: all 0.6s ease-in-out;
}

.animate {
    opacity: 1;
    transform: translate(0);
}

.site_header_nav a.active {
    color: var(--clr-primary);
    font-weight: bold;
}

.error {
    border-color: #f44336 !important;
}
";

/// Append the stylesheet to `<head>` unless it is already there.
#[cfg(feature = "csr")]
pub fn inject() -> Result<(), crate::error::EnhanceError> {
    use crate::error::EnhanceError;
    use crate::util::dom;

    let document = dom::document()?;
    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return Ok(());
    }
    let head = document
        .head()
        .ok_or_else(|| EnhanceError::MissingElement("head".into()))?;
    let style = document.create_element("style")?;
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(ENHANCE_CSS));
    head.append_child(&style)?;
    Ok(())
}
