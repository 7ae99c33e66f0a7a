//! Multi-chunk A* (`spec.md` §4.4): both end-chunks loaded and distinct.
//! Builds a global cell space across every currently loaded chunk so walls
//! in intermediate chunks are respected.

use std::collections::HashMap;

use bevy::prelude::*;
use game_core::chunk::{ChunkCoord, ChunkStaticBlob, TerrainCostTable};

use crate::components::agent::UnitLayerPermissions;

use super::common::{is_cell_walkable, octile_heuristic, snap_to_walkable, step_cost, OpenSet, NEIGHBOR_OFFSETS};

const SNAP_RADIUS: i32 = 4;

pub struct MultiChunkResult {
    pub waypoints: Vec<Vec3>,
}

struct LoadedSnapshot<'a> {
    order: Vec<ChunkCoord>,
    order_of: HashMap<ChunkCoord, usize>,
    blobs: &'a HashMap<ChunkCoord, &'a ChunkStaticBlob>,
    cells_per_chunk: i32,
    cell_size: f32,
    chunk_world_size: f32,
}

impl<'a> LoadedSnapshot<'a> {
    fn new(blobs: &'a HashMap<ChunkCoord, &'a ChunkStaticBlob>, cell_size: f32) -> Option<Self> {
        let cells_per_chunk = blobs.values().next()?.cell_count;
        let chunk_world_size = cell_size * cells_per_chunk as f32;
        let mut order = Vec::with_capacity(blobs.len());
        let mut order_of = HashMap::with_capacity(blobs.len());
        for coord in blobs.keys() {
            order_of.insert(*coord, order.len());
            order.push(*coord);
        }
        Some(Self {
            order,
            order_of,
            blobs,
            cells_per_chunk,
            cell_size,
            chunk_world_size,
        })
    }

    fn chunk_origin(&self, coord: ChunkCoord) -> Vec3 {
        coord.to_world_center(self.chunk_world_size)
            - Vec3::new(self.chunk_world_size * 0.5, 0.0, self.chunk_world_size * 0.5)
    }

    fn world_to_chunk_local(&self, world: Vec3) -> (ChunkCoord, i32, i32) {
        let coord = ChunkCoord::from_world_pos(world, self.chunk_world_size);
        let origin = self.chunk_origin(coord);
        let local_x = ((world.x - origin.x) / self.cell_size).floor() as i32;
        let local_z = ((world.z - origin.z) / self.cell_size).floor() as i32;
        (coord, local_x, local_z)
    }

    fn global_index(&self, coord: ChunkCoord, local_x: i32, local_z: i32) -> Option<usize> {
        let order_idx = *self.order_of.get(&coord)?;
        Some(order_idx * (self.cells_per_chunk * self.cells_per_chunk) as usize
            + (local_z * self.cells_per_chunk + local_x) as usize)
    }

    fn node_at(&self, coord: ChunkCoord, local_x: i32, local_z: i32) -> Option<&game_core::chunk::NodeStatic> {
        self.blobs.get(&coord)?.node_at(local_x, local_z)
    }

    fn cell_center(&self, coord: ChunkCoord, local_x: i32, local_z: i32) -> Vec3 {
        self.chunk_origin(coord) + Vec3::new((local_x as f32 + 0.5) * self.cell_size, 0.0, (local_z as f32 + 0.5) * self.cell_size)
    }

    /// Resolve a local coordinate that may have wandered outside `[0, N)`
    /// into its owning chunk + wrapped local coordinate.
    fn wrap(&self, coord: ChunkCoord, local_x: i32, local_z: i32) -> (ChunkCoord, i32, i32) {
        let n = self.cells_per_chunk;
        let mut chunk = coord;
        let mut x = local_x;
        let mut z = local_z;
        if x < 0 {
            chunk.x -= 1;
            x += n;
        } else if x >= n {
            chunk.x += 1;
            x -= n;
        }
        if z < 0 {
            chunk.z -= 1;
            z += n;
        } else if z >= n {
            chunk.z += 1;
            z -= n;
        }
        (chunk, x, z)
    }
}

pub fn find_path_multi_chunk(
    blobs: &HashMap<ChunkCoord, &ChunkStaticBlob>,
    cell_size: f32,
    start_world: Vec3,
    end_world: Vec3,
    permissions: &UnitLayerPermissions,
    costs: &TerrainCostTable,
) -> Option<MultiChunkResult> {
    let snapshot = LoadedSnapshot::new(blobs, cell_size)?;

    let (start_chunk, start_x, start_z) = snapshot.world_to_chunk_local(start_world);
    let (end_chunk, end_x, end_z) = snapshot.world_to_chunk_local(end_world);
    if !snapshot.order_of.contains_key(&start_chunk) || !snapshot.order_of.contains_key(&end_chunk) {
        return None;
    }

    let walkable_at = |chunk: ChunkCoord, x: i32, z: i32| -> bool {
        snapshot
            .node_at(chunk, x, z)
            .map(|n| is_cell_walkable(n, permissions))
            .unwrap_or(false)
    };

    let (snap_start_x, snap_start_z) = snap_to_walkable(start_x, start_z, SNAP_RADIUS, |x, z| walkable_at(start_chunk, x, z))?;
    let (snap_end_x, snap_end_z) = snap_to_walkable(end_x, end_z, SNAP_RADIUS, |x, z| walkable_at(end_chunk, x, z))?;
    if start_chunk == end_chunk
        && (snap_start_x, snap_start_z) == (snap_end_x, snap_end_z)
        && (start_x, start_z) != (end_x, end_z)
    {
        return None;
    }

    let start_idx = snapshot.global_index(start_chunk, snap_start_x, snap_start_z)?;
    let goal_idx = snapshot.global_index(end_chunk, snap_end_x, snap_end_z)?;

    let total_cells = snapshot.order.len() * (snapshot.cells_per_chunk * snapshot.cells_per_chunk) as usize;
    let mut g_cost = vec![i32::MAX; total_cells];
    let mut parent = vec![usize::MAX; total_cells];
    let mut closed = vec![false; total_cells];

    g_cost[start_idx] = 0;
    let mut open = OpenSet::default();
    let start_chunk_offset = (end_chunk.x - start_chunk.x) * snapshot.cells_per_chunk;
    let start_chunk_offset_z = (end_chunk.z - start_chunk.z) * snapshot.cells_per_chunk;
    open.push(
        start_idx,
        octile_heuristic(
            start_chunk_offset + end_x - start_x,
            start_chunk_offset_z + end_z - start_z,
        ),
    );

    let mut found = false;
    while let Some(current) = open.pop() {
        if closed[current] {
            continue;
        }
        closed[current] = true;
        if current == goal_idx {
            found = true;
            break;
        }

        let order_idx = current / (snapshot.cells_per_chunk * snapshot.cells_per_chunk) as usize;
        let local = current % (snapshot.cells_per_chunk * snapshot.cells_per_chunk) as usize;
        let cx = (local as i32) % snapshot.cells_per_chunk;
        let cz = (local as i32) / snapshot.cells_per_chunk;
        let chunk_coord = snapshot.order[order_idx];

        for (dx, dz) in NEIGHBOR_OFFSETS {
            let (neighbor_chunk, nx, nz) = snapshot.wrap(chunk_coord, cx + dx, cz + dz);
            if !snapshot.order_of.contains_key(&neighbor_chunk) {
                continue;
            }
            let Some(node) = snapshot.node_at(neighbor_chunk, nx, nz) else {
                continue;
            };
            if !is_cell_walkable(node, permissions) {
                continue;
            }
            let Some(neighbor_idx) = snapshot.global_index(neighbor_chunk, nx, nz) else {
                continue;
            };
            if closed[neighbor_idx] {
                continue;
            }
            let terrain_extra = costs.cost(node.terrain_cost_mask) - 10;
            let tentative_g = g_cost[current] + step_cost(dx, dz) + terrain_extra.max(0);
            if tentative_g < g_cost[neighbor_idx] {
                g_cost[neighbor_idx] = tentative_g;
                parent[neighbor_idx] = current;
                let goal_offset_x = (end_chunk.x - neighbor_chunk.x) * snapshot.cells_per_chunk;
                let goal_offset_z = (end_chunk.z - neighbor_chunk.z) * snapshot.cells_per_chunk;
                let h = octile_heuristic(goal_offset_x + end_x - nx, goal_offset_z + end_z - nz);
                open.push(neighbor_idx, tentative_g + h);
            }
        }
    }

    if !found {
        return None;
    }

    let mut path_indices = Vec::new();
    let mut cursor = goal_idx;
    loop {
        path_indices.push(cursor);
        if cursor == start_idx {
            break;
        }
        cursor = parent[cursor];
    }
    path_indices.reverse();

    let cells_per_chunk_sq = (snapshot.cells_per_chunk * snapshot.cells_per_chunk) as usize;
    let decode = |idx: usize| -> Vec3 {
        let order_idx = idx / cells_per_chunk_sq;
        let local = idx % cells_per_chunk_sq;
        let x = (local as i32) % snapshot.cells_per_chunk;
        let z = (local as i32) / snapshot.cells_per_chunk;
        snapshot.cell_center(snapshot.order[order_idx], x, z)
    };

    let mut waypoints: Vec<Vec3> = path_indices[1..].iter().map(|&idx| decode(idx)).collect();
    if let Some(last) = waypoints.last_mut() {
        if walkable_at(end_chunk, end_x, end_z) {
            *last = end_world;
        }
    }

    Some(MultiChunkResult { waypoints })
}
