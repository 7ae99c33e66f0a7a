//! All component types the navigation + combat-AI pipeline operates on.

pub mod agent;
pub mod combat;
pub mod flow_field;
pub mod streaming;
