//! Page behaviors, each installed once and independent of the others.
//!
//! ARCHITECTURE
//! ============
//! Every module pairs pure decision logic (compiled and tested natively) with
//! an `install` entry point that binds it to the page under the `csr`
//! feature.

pub mod contact_form;
pub mod dark_mode;
pub mod image_fade;
pub mod reveal;
pub mod scroll_spy;
pub mod smooth_scroll;
