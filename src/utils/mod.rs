//! Utility helpers.
//!
//! - [`progress`] - Spinner abstraction over the optional `indicatif` dependency

pub mod progress;

pub use progress::*;
