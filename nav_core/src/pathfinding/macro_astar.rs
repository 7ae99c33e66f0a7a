//! Macro (chunk-level) A* (`spec.md` §4.4): used when either end-chunk is
//! not loaded. Runs over the 8-way chunk graph using baked
//! `macro_connectivity` edge costs.

use std::collections::HashMap;

use bevy::prelude::*;
use game_core::chunk::ChunkCoord;

use super::common::{octile_heuristic, OpenSet, NEIGHBOR_OFFSETS};

fn assign_id(
    coord: ChunkCoord,
    id_of: &mut HashMap<ChunkCoord, usize>,
    coord_of: &mut HashMap<usize, ChunkCoord>,
    next_id: &mut usize,
) -> usize {
    *id_of.entry(coord).or_insert_with(|| {
        let id = *next_id;
        coord_of.insert(id, coord);
        *next_id += 1;
        id
    })
}

#[derive(Clone, Copy)]
pub struct MacroNode {
    pub coord: ChunkCoord,
    pub macro_connectivity: [u8; 8],
}

/// Edge costs assumed for a chunk coordinate with no baked blob yet (still
/// `Unloaded`). Macro routing has to be able to plan a path *through* a
/// chunk before streaming has baked it — the streaming state machine only
/// promotes a chunk once something actually routes there — so an unbaked
/// chunk is optimistically treated as fully open in every direction rather
/// than excluded from the graph (`spec.md` §8 scenario 3).
const UNBAKED_CONNECTIVITY: [u8; 8] = [10; 8];

/// Hard cap on chunk nodes expanded by one macro search, guarding against
/// unbounded exploration when `end_chunk` is unreachable and every
/// neighbor is optimistically open.
const MAX_EXPANDED_NODES: usize = 4096;

pub struct MacroResult {
    /// Chunk-center world points, excluding the start chunk.
    pub waypoints: Vec<Vec3>,
}

fn node_at(nodes: &HashMap<ChunkCoord, MacroNode>, coord: ChunkCoord) -> MacroNode {
    nodes.get(&coord).copied().unwrap_or(MacroNode {
        coord,
        macro_connectivity: UNBAKED_CONNECTIVITY,
    })
}

/// `nodes` is keyed by chunk coord and holds baked connectivity for every
/// chunk that has been baked so far (both `Active` and `Ghost` qualify,
/// per `spec.md` §4.4). A coordinate absent from `nodes` — still
/// `Unloaded` — is not excluded from the graph: it is looked up via
/// [`node_at`], which treats it as optimistically open.
pub fn find_path_macro(
    nodes: &HashMap<ChunkCoord, MacroNode>,
    start_chunk: ChunkCoord,
    end_chunk: ChunkCoord,
    chunk_world_size: f32,
) -> Option<MacroResult> {
    if start_chunk == end_chunk {
        return Some(MacroResult { waypoints: Vec::new() });
    }

    let mut g_cost: HashMap<ChunkCoord, i32> = HashMap::new();
    let mut parent: HashMap<ChunkCoord, ChunkCoord> = HashMap::new();
    let mut closed: std::collections::HashSet<ChunkCoord> = std::collections::HashSet::new();
    let mut coord_of: HashMap<usize, ChunkCoord> = HashMap::new();
    let mut id_of: HashMap<ChunkCoord, usize> = HashMap::new();
    let mut next_id = 0usize;

    let start_id = assign_id(start_chunk, &mut id_of, &mut coord_of, &mut next_id);
    let _end_id = assign_id(end_chunk, &mut id_of, &mut coord_of, &mut next_id);

    g_cost.insert(start_chunk, 0);
    let mut open = OpenSet::default();
    open.push(
        start_id,
        octile_heuristic(end_chunk.x - start_chunk.x, end_chunk.z - start_chunk.z),
    );

    let mut found = false;
    while let Some(current_id) = open.pop() {
        let current = coord_of[&current_id];
        if closed.contains(&current) {
            continue;
        }
        closed.insert(current);
        if current == end_chunk {
            found = true;
            break;
        }
        if closed.len() > MAX_EXPANDED_NODES {
            break;
        }

        let node = node_at(nodes, current);

        for (edge_idx, (dx, dz)) in NEIGHBOR_OFFSETS.iter().enumerate() {
            let edge_cost = node.macro_connectivity[edge_idx];
            if edge_cost == 0 {
                continue;
            }
            let neighbor = ChunkCoord::new(current.x + dx, current.z + dz);
            if closed.contains(&neighbor) {
                continue;
            }
            let tentative_g = g_cost[&current] + edge_cost as i32;
            if tentative_g < *g_cost.get(&neighbor).unwrap_or(&i32::MAX) {
                g_cost.insert(neighbor, tentative_g);
                parent.insert(neighbor, current);
                let neighbor_id = assign_id(neighbor, &mut id_of, &mut coord_of, &mut next_id);
                let h = octile_heuristic(end_chunk.x - neighbor.x, end_chunk.z - neighbor.z);
                open.push(neighbor_id, tentative_g + h);
            }
        }
    }

    if !found {
        return None;
    }

    let mut chunk_path = Vec::new();
    let mut cursor = end_chunk;
    loop {
        chunk_path.push(cursor);
        if cursor == start_chunk {
            break;
        }
        cursor = parent[&cursor];
    }
    chunk_path.reverse();

    let waypoints = chunk_path[1..]
        .iter()
        .map(|coord| coord.to_world_center(chunk_world_size))
        .collect();

    Some(MacroResult { waypoints })
}
