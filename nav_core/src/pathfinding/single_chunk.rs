//! Single-chunk A* (`spec.md` §4.4): `start_chunk == end_chunk`, chunk loaded.

use bevy::prelude::*;
use game_core::chunk::{ChunkStaticBlob, TerrainCostTable};

use crate::components::agent::UnitLayerPermissions;

use super::common::{is_cell_walkable, octile_heuristic, snap_to_walkable, step_cost, OpenSet, NEIGHBOR_OFFSETS};

const SNAP_RADIUS: i32 = 4;

pub struct SingleChunkResult {
    pub waypoints: Vec<Vec3>,
}

/// Attempt a path entirely within one chunk's flat cell array. Returns
/// `None` on failure (caller enables `PathfindingFailed` and clears
/// waypoints).
pub fn find_path_single_chunk(
    blob: &ChunkStaticBlob,
    chunk_origin: Vec3,
    cell_size: f32,
    start_world: Vec3,
    end_world: Vec3,
    permissions: &UnitLayerPermissions,
    costs: &TerrainCostTable,
) -> Option<SingleChunkResult> {
    let cell_count = blob.cell_count;
    let to_local = |world: Vec3| -> (i32, i32) {
        (
            ((world.x - chunk_origin.x) / cell_size).floor() as i32,
            ((world.z - chunk_origin.z) / cell_size).floor() as i32,
        )
    };

    let (start_x, start_z) = to_local(start_world);
    let (end_x, end_z) = to_local(end_world);

    let walkable_at = |x: i32, z: i32| -> bool {
        blob.node_at(x, z)
            .map(|n| is_cell_walkable(n, permissions))
            .unwrap_or(false)
    };

    let (snapped_start_x, snapped_start_z) = snap_to_walkable(start_x, start_z, SNAP_RADIUS, walkable_at)?;
    let (snapped_end_x, snapped_end_z) = snap_to_walkable(end_x, end_z, SNAP_RADIUS, walkable_at)?;
    if (snapped_start_x, snapped_start_z) == (snapped_end_x, snapped_end_z)
        && (start_x, start_z) != (end_x, end_z)
    {
        // Both endpoints collapsed to the same cell: no distinguishable path.
        return None;
    }

    let index_of = |x: i32, z: i32| -> usize { (z * cell_count + x) as usize };
    let start_idx = index_of(snapped_start_x, snapped_start_z);
    let goal_idx = index_of(snapped_end_x, snapped_end_z);

    let cell_total = (cell_count * cell_count) as usize;
    let mut g_cost = vec![i32::MAX; cell_total];
    let mut parent = vec![usize::MAX; cell_total];
    let mut closed = vec![false; cell_total];

    g_cost[start_idx] = 0;
    let mut open = OpenSet::default();
    open.push(start_idx, octile_heuristic(end_x - start_x, end_z - start_z));

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

        let cx = (current as i32) % cell_count;
        let cz = (current as i32) / cell_count;

        for (dx, dz) in NEIGHBOR_OFFSETS {
            let (nx, nz) = (cx + dx, cz + dz);
            if nx < 0 || nz < 0 || nx >= cell_count || nz >= cell_count {
                continue;
            }
            let Some(node) = blob.node_at(nx, nz) else {
                continue;
            };
            if !is_cell_walkable(node, permissions) {
                continue;
            }
            let neighbor_idx = index_of(nx, nz);
            if closed[neighbor_idx] {
                continue;
            }
            let terrain_extra = costs.cost(node.terrain_cost_mask) - 10;
            let tentative_g = g_cost[current] + step_cost(dx, dz) + terrain_extra.max(0);
            if tentative_g < g_cost[neighbor_idx] {
                g_cost[neighbor_idx] = tentative_g;
                parent[neighbor_idx] = current;
                let h = octile_heuristic(snapped_end_x - nx, snapped_end_z - nz);
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

    let cell_center = |idx: usize| -> Vec3 {
        let x = (idx as i32) % cell_count;
        let z = (idx as i32) / cell_count;
        chunk_origin + Vec3::new((x as f32 + 0.5) * cell_size, 0.0, (z as f32 + 0.5) * cell_size)
    };

    // Drop the starting cell: waypoints describe the remainder of the path.
    let mut waypoints: Vec<Vec3> = path_indices[1..].iter().map(|&idx| cell_center(idx)).collect();

    if let Some(last) = waypoints.last_mut() {
        let end_is_walkable = blob
            .node_at(end_x, end_z)
            .map(|n| is_cell_walkable(n, permissions))
            .unwrap_or(false);
        if end_is_walkable {
            *last = end_world;
        }
    }

    Some(SingleChunkResult { waypoints })
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::chunk::NodeStatic;

    fn open_blob(cell_count: i32, blocked_x: Option<i32>) -> ChunkStaticBlob {
        let mut nodes = vec![NodeStatic {
            walkable_layer_mask: 0xFF,
            terrain_cost_mask: 0,
            slope_flags: 0,
            reserved: 0,
        }; (cell_count * cell_count) as usize];
        if let Some(bx) = blocked_x {
            for z in 0..cell_count {
                let idx = (z * cell_count + bx) as usize;
                nodes[idx] = NodeStatic::BLOCKED;
            }
        }
        ChunkStaticBlob {
            chunk_coord: game_core::chunk::ChunkCoord::new(0, 0),
            cell_count,
            nodes,
            macro_connectivity: [10; 8],
        }
    }

    #[test]
    fn routes_around_a_blocked_column() {
        let blob = open_blob(8, Some(4));
        let permissions = UnitLayerPermissions::default();
        let costs = TerrainCostTable::default();
        let result = find_path_single_chunk(
            &blob,
            Vec3::ZERO,
            1.0,
            Vec3::new(1.5, 0.0, 1.5),
            Vec3::new(6.5, 0.0, 1.5),
            &permissions,
            &costs,
        )
        .expect("path should be found");

        assert_eq!(*result.waypoints.last().unwrap(), Vec3::new(6.5, 0.0, 1.5));
        let detoured = result
            .waypoints
            .iter()
            .any(|w| (w.z - 0.5).abs() < 0.01 || (w.z - 7.5).abs() < 0.01);
        assert!(detoured, "expected a detour through z in {{0, 7}}");
    }

    #[test]
    fn unwalkable_destination_cell_snaps_to_nearest_edge() {
        let mut blob = open_blob(8, None);
        let blocked_idx = blob.local_index(6, 1);
        blob.nodes[blocked_idx] = NodeStatic::BLOCKED;

        let permissions = UnitLayerPermissions::default();
        let costs = TerrainCostTable::default();
        let result = find_path_single_chunk(
            &blob,
            Vec3::ZERO,
            1.0,
            Vec3::new(0.5, 0.0, 1.5),
            Vec3::new(6.5, 0.0, 1.5),
            &permissions,
            &costs,
        )
        .expect("path should be found");

        assert_ne!(*result.waypoints.last().unwrap(), Vec3::new(6.5, 0.0, 1.5));
    }

    #[test]
    fn same_cell_start_and_end_yields_empty_waypoints() {
        let blob = open_blob(8, None);
        let permissions = UnitLayerPermissions::default();
        let costs = TerrainCostTable::default();
        let result = find_path_single_chunk(
            &blob,
            Vec3::ZERO,
            1.0,
            Vec3::new(1.2, 0.0, 1.2),
            Vec3::new(1.8, 0.0, 1.8),
            &permissions,
            &costs,
        )
        .expect("same-cell path should succeed");
        assert!(result.waypoints.is_empty());
    }
}
