//! Shared static data model: chunk coordinates, baked node data, and the
//! world singleton configuration. No gameplay logic lives here, only the
//! types every other crate in the workspace needs a copy of.
#![deny(clippy::all, clippy::pedantic)]
#![allow(missing_docs)]

use bevy::prelude::*;
pub use engine_bevy;
pub use engine_core;

pub mod chunk;
pub mod config;
pub mod persistence;
pub mod prelude;
pub mod schedule;

// Only expose via prelude - no direct re-exports
