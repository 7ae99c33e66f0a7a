//! Common imports for game core

pub use bevy::prelude::*;
pub use engine_bevy::prelude::*;
pub use engine_core::prelude::*;

pub use crate::chunk::*;
pub use crate::config::*;
pub use crate::persistence::*;
pub use crate::schedule::*;
