//! Chunk streaming, lifecycle transitions, and static bake.

pub mod anchor_tracker;
pub mod bake;
pub mod chunk_manager;
