//! Common imports for Bevy-based code

pub use bevy::prelude::*;
pub use engine_core::prelude::*;
pub use crate::adapters::{PhysicsWorld, SaveStorage};
pub use crate::services::*;
