//! Chunk coordinates, per-cell static bake data, and the terrain cost table.
//!
//! These types are the one piece of long-lived, versionable state the core
//! produces (`ChunkStaticBlob`, see persistence) and are shared by every
//! crate that needs to reason about the grid: the baker, the three A*
//! variants, and the flow field builder all index into the same layout.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Integer chunk coordinate in the streaming grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    #[must_use]
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Quantize a world position into the chunk it falls in.
    #[must_use]
    pub fn from_world_pos(world_pos: Vec3, chunk_size: f32) -> Self {
        Self {
            x: (world_pos.x / chunk_size).floor() as i32,
            z: (world_pos.z / chunk_size).floor() as i32,
        }
    }

    /// World-space center of this chunk.
    #[must_use]
    pub fn to_world_center(&self, chunk_size: f32) -> Vec3 {
        Vec3::new(
            self.x as f32 * chunk_size + chunk_size * 0.5,
            0.0,
            self.z as f32 * chunk_size + chunk_size * 0.5,
        )
    }

    /// Chebyshev distance to another chunk, in chunks.
    #[must_use]
    pub fn chebyshev_distance(&self, other: ChunkCoord) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }

    /// The 8 neighbor coordinates in macro-connectivity order:
    /// N, NE, E, SE, S, SW, W, NW.
    #[must_use]
    pub fn macro_neighbors(&self) -> [ChunkCoord; 8] {
        [
            ChunkCoord::new(self.x, self.z + 1),
            ChunkCoord::new(self.x + 1, self.z + 1),
            ChunkCoord::new(self.x + 1, self.z),
            ChunkCoord::new(self.x + 1, self.z - 1),
            ChunkCoord::new(self.x, self.z - 1),
            ChunkCoord::new(self.x - 1, self.z - 1),
            ChunkCoord::new(self.x - 1, self.z),
            ChunkCoord::new(self.x - 1, self.z + 1),
        ]
    }
}

/// Streaming lifecycle state for a chunk record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkState {
    Unloaded,
    Ghost,
    Active,
}

/// Per-cell static node data (4 bytes).
///
/// `walkable_layer_mask == 0` means the cell is blocked outright; a nonzero
/// mask is tested against an agent's `walkable_layers` permission bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStatic {
    pub walkable_layer_mask: u8,
    pub terrain_cost_mask: u8,
    pub slope_flags: u8,
    pub reserved: u8,
}

impl NodeStatic {
    pub const BLOCKED: NodeStatic = NodeStatic {
        walkable_layer_mask: 0,
        terrain_cost_mask: 0,
        slope_flags: 0,
        reserved: 0,
    };

    pub const TOO_STEEP_FLAG: u8 = 1;
    /// Only flying agents may enter a too-steep cell.
    pub const FLYING_ONLY_MASK: u8 = 0b0000_0010;

    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.walkable_layer_mask == 0
    }

    #[must_use]
    pub fn is_too_steep(&self) -> bool {
        self.slope_flags & Self::TOO_STEEP_FLAG != 0
    }
}

/// Immutable, baked-once static data for one chunk.
///
/// `nodes` is row-major, z-major (`index = z * cell_count + x`).
/// `macro_connectivity` holds the 8 outward edge costs in
/// N, NE, E, SE, S, SW, W, NW order; `0` means blocked, else `10`/`14`
/// straight/diagonal step cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkStaticBlob {
    pub chunk_coord: ChunkCoord,
    pub cell_count: i32,
    pub nodes: Vec<NodeStatic>,
    pub macro_connectivity: [u8; 8],
}

impl ChunkStaticBlob {
    #[must_use]
    pub fn local_index(&self, local_x: i32, local_z: i32) -> usize {
        (local_z * self.cell_count + local_x) as usize
    }

    #[must_use]
    pub fn node_at(&self, local_x: i32, local_z: i32) -> Option<&NodeStatic> {
        if local_x < 0 || local_z < 0 || local_x >= self.cell_count || local_z >= self.cell_count {
            return None;
        }
        self.nodes.get(self.local_index(local_x, local_z))
    }
}

/// Named terrain cost tiers for the 256-entry cost table (`spec.md` §6).
/// The first four indices carry named tiers; every other index defaults to
/// `Baseline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostTier {
    Baseline = 10,
    Grass = 15,
    Mud = 25,
    Road = 5,
}

/// 256-entry terrain cost lookup, indexed by `NodeStatic::terrain_cost_mask`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainCostTable {
    pub costs: Vec<i32>,
}

impl TerrainCostTable {
    #[must_use]
    pub fn cost(&self, terrain_cost_mask: u8) -> i32 {
        self.costs[terrain_cost_mask as usize]
    }
}

impl Default for TerrainCostTable {
    fn default() -> Self {
        let mut costs = vec![CostTier::Baseline as i32; 256];
        costs[0] = CostTier::Baseline as i32;
        costs[1] = CostTier::Grass as i32;
        costs[2] = CostTier::Mud as i32;
        costs[3] = CostTier::Road as i32;
        Self { costs }
    }
}
