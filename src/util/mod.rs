//! Utility helpers shared across behaviors.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from behavior logic
//! so the decision-making code stays testable without a browser.

pub mod dom;
pub mod schedule;
pub mod storage;
