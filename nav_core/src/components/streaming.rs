//! Chunk record and streaming-anchor components.

use bevy::prelude::*;
use game_core::chunk::{ChunkCoord, ChunkState, ChunkStaticBlob};

/// Any entity whose world position draws chunks into `Active`/`Ghost` state.
/// Multiple anchors union via `max` over desired chunk state.
#[derive(Component, Debug, Clone, Copy)]
pub struct StreamingAnchor {
    pub current_chunk_coord: ChunkCoord,
    pub priority: i32,
}

impl Default for StreamingAnchor {
    fn default() -> Self {
        Self {
            current_chunk_coord: ChunkCoord::new(0, 0),
            priority: 1,
        }
    }
}

/// Lifecycle record for one chunk. Lives on a dedicated chunk entity,
/// looked up via `ChunkIndex`.
#[derive(Component, Debug, Clone, Copy)]
pub struct ChunkRecord {
    pub coord: ChunkCoord,
    pub state: ChunkState,
    pub static_ready: bool,
}

/// Baked, immutable-once-published static data for a chunk. Present iff
/// `ChunkRecord::static_ready`.
#[derive(Component, Debug, Clone)]
pub struct ChunkStaticData(pub ChunkStaticBlob);

/// Per-cell dynamic occupancy, allocated only while `ChunkRecord::state ==
/// Active`.
#[derive(Component, Debug, Clone, Copy)]
pub struct DynamicNode {
    pub occupancy_count: u8,
    pub dynamic_block_flags: u8,
}

#[derive(Component, Debug, Clone)]
pub struct ChunkDynamicData {
    pub nodes: Vec<DynamicNode>,
}

impl ChunkDynamicData {
    #[must_use]
    pub fn new(cell_count: i32) -> Self {
        Self {
            nodes: vec![
                DynamicNode {
                    occupancy_count: 0,
                    dynamic_block_flags: 0
                };
                (cell_count * cell_count) as usize
            ],
        }
    }
}

/// Queued, budget-limited state change for a chunk (`spec.md` §4.1).
/// Enableable: inserted by the Chunk Manager's desired-state pass and
/// removed once the transition has been applied.
#[derive(Component, Debug, Clone, Copy)]
pub struct ChunkTransitionRequest {
    pub coord: ChunkCoord,
    pub target_state: ChunkState,
}
