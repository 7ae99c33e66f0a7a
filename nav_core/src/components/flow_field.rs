//! Flow-field record component (`spec.md` §3, §4.5).

use bevy::prelude::*;
use game_core::chunk::ChunkCoord;

/// Per-cell Dijkstra integration + gradient vectors for one
/// `(destination_hash, chunk_coord)` pair.
#[derive(Component, Debug, Clone)]
pub struct FlowFieldData {
    pub destination_hash: u64,
    pub chunk_coord: ChunkCoord,
    pub destination: Vec3,
    /// Unit direction toward the next cell, zero where unreachable.
    pub vectors: Vec<Vec2>,
    pub integration: Vec<i32>,
    pub is_ready: bool,
    pub build_time: f32,
}

impl FlowFieldData {
    #[must_use]
    pub fn new(destination_hash: u64, chunk_coord: ChunkCoord, destination: Vec3, cell_count: i32) -> Self {
        let n = (cell_count * cell_count) as usize;
        Self {
            destination_hash,
            chunk_coord,
            destination,
            vectors: vec![Vec2::ZERO; n],
            integration: vec![i32::MAX; n],
            is_ready: false,
            build_time: 0.0,
        }
    }
}

/// Quantize a world-space destination to a `(x<<32) | z` cell-coordinate
/// hash, as the flow-field registry keys on.
#[must_use]
pub fn quantize_destination_hash(destination: Vec3, cell_size: f32) -> u64 {
    let cx = (destination.x / cell_size).floor() as i64 as i32;
    let cz = (destination.z / cell_size).floor() as i64 as i32;
    ((cx as u32 as u64) << 32) | (cz as u32 as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_is_stable_within_same_cell() {
        let a = quantize_destination_hash(Vec3::new(5.1, 0.0, 5.9), 1.0);
        let b = quantize_destination_hash(Vec3::new(5.4, 0.0, 5.2), 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn quantize_differs_across_cells() {
        let a = quantize_destination_hash(Vec3::new(5.1, 0.0, 5.9), 1.0);
        let b = quantize_destination_hash(Vec3::new(6.1, 0.0, 5.9), 1.0);
        assert_ne!(a, b);
    }
}
