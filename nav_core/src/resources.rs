//! World-scoped lookup tables and per-frame scratch resources.
//!
//! Split into a small hot resource (`ChunkIndex`) and a larger bookkeeping
//! resource (`ChunkTables`), separating the per-frame hot lookup from the
//! slower-changing desired-state bookkeeping.

use std::collections::{HashMap, VecDeque};

use bevy::prelude::*;
use game_core::chunk::{ChunkCoord, ChunkState};

/// Hot `ChunkCoord -> Entity` lookup, queried by every stage that needs to
/// resolve a neighbor chunk.
#[derive(Resource, Debug, Default)]
pub struct ChunkIndex {
    pub entities: HashMap<ChunkCoord, Entity>,
}

impl ChunkIndex {
    #[must_use]
    pub fn get(&self, coord: ChunkCoord) -> Option<Entity> {
        self.entities.get(&coord).copied()
    }
}

/// Streaming bookkeeping: per-chunk desired state for this frame, plus a
/// budgeted transition queue so at most N transitions apply per frame.
/// Entries not processed this frame persist to the next rather than being
/// dropped.
#[derive(Resource, Debug, Default)]
pub struct ChunkTables {
    pub desired_state: HashMap<ChunkCoord, ChunkState>,
    pub transition_queue: VecDeque<ChunkCoord>,
}

/// Hot `(destination_hash, chunk_coord) -> Entity` lookup for flow-field
/// records, mirroring `ChunkIndex`'s shape.
#[derive(Resource, Debug, Default)]
pub struct FlowFieldIndex {
    pub entities: HashMap<(u64, ChunkCoord), Entity>,
}

impl FlowFieldIndex {
    #[must_use]
    pub fn get(&self, key: (u64, ChunkCoord)) -> Option<Entity> {
        self.entities.get(&key).copied()
    }
}

/// One propagated target acquisition, consumed by the Ally Ping pass in the
/// same frame it is produced.
#[derive(Debug, Clone, Copy)]
pub struct AllyPing {
    pub pinger_position: Vec3,
    pub ping_radius: f32,
    pub faction_id: u32,
    pub target_entity: Entity,
    pub target_position: Vec3,
}

/// Per-frame scratch queue of pings raised by Threat Scan, drained by Ally
/// Ping. Cleared at the start of every Threat Scan pass.
#[derive(Resource, Debug, Default)]
pub struct AllyPingQueue {
    pub pings: Vec<AllyPing>,
}

/// Per-frame `(scanner, target)` pairs confirmed clear by a line-of-sight
/// ray. Rebuilt every Threat Scan pass.
#[derive(Resource, Debug, Default)]
pub struct LineOfSightSet {
    pub clear_pairs: std::collections::HashSet<(Entity, Entity)>,
}

impl LineOfSightSet {
    #[must_use]
    pub fn is_clear(&self, scanner: Entity, target: Entity) -> bool {
        self.clear_pairs.contains(&(scanner, target))
    }
}

/// Per-frame `Entity -> direction` scratch written by the Flow Field
/// Sampler and read by the flow-field follower. Rebuilt every Flow Sample
/// pass; an absent entry means "no field ready for this agent this frame".
#[derive(Resource, Debug, Default)]
pub struct SampledFlowDirections {
    pub directions: HashMap<Entity, Vec2>,
}
