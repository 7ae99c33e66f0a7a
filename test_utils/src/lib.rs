//! Test utilities for the navigation + combat-AI simulation core
#![deny(clippy::all, clippy::pedantic)]
#![allow(missing_docs)]

/// Minimal Bevy app for testing
pub mod minimal_app;
/// World helper utilities
pub mod world_helpers;
/// Headless app builder wired with the navigation + combat plugins
pub mod nav_app;
/// Common testing prelude
pub mod prelude;

pub use minimal_app::MinimalBevyApp;
pub use nav_app::*;
pub use world_helpers::*;
pub use prelude::*;
