//! UI elements synthesized by the crate rather than found in page markup.
//!
//! SYSTEM CONTEXT
//! ==============
//! The dark-mode toggle is a Leptos component mounted onto `<body>`; toasts
//! are imperative nodes driven by the shared scheduler.

pub mod dark_mode_toggle;
pub mod toast;
