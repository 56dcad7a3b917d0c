//! Error types shared by the enhancement behaviors.
//!
//! Nothing here is fatal to the page: the composition root logs these and
//! moves on to the next behavior.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnhanceError {
    /// No global `window` (not running in a browser).
    #[error("browser window is unavailable")]
    NoWindow,

    /// The window has no document attached.
    #[error("document is unavailable")]
    NoDocument,

    /// A required element was not found.
    #[error("missing element: {0}")]
    MissingElement(String),

    /// Configuration could not be parsed or failed validation.
    #[error("invalid config: {0}")]
    Config(String),

    /// A DOM call threw.
    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(feature = "csr")]
impl From<wasm_bindgen::JsValue> for EnhanceError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Js(message)
    }
}
