//! Builds one `FlowFieldData` record per `(destination_hash, chunk_coord)`
//! pair needed this frame: the destination's own chunk plus its 8
//! neighbors, budgeted and refreshed only while at least one follower still
//! targets that destination (`spec.md` §4.5).

use std::collections::{HashMap, HashSet, VecDeque};

use bevy::prelude::*;
use game_core::chunk::{ChunkCoord, ChunkStaticBlob, TerrainCostTable};
use game_core::config::NavigationConfig;

use crate::components::agent::{AgentNavigation, FlowFieldFollower};
use crate::components::flow_field::FlowFieldData;
use crate::components::streaming::ChunkStaticData;
use crate::pathfinding::common::{step_cost, NEIGHBOR_OFFSETS};
use crate::resources::{ChunkIndex, FlowFieldIndex};

pub fn build_flow_fields_system(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<NavigationConfig>,
    chunk_index: Res<ChunkIndex>,
    chunk_blobs: Query<&ChunkStaticData>,
    mut flow_index: ResMut<FlowFieldIndex>,
    mut fields: Query<&mut FlowFieldData>,
    followers: Query<&AgentNavigation, With<FlowFieldFollower>>,
) {
    let now = time.elapsed_secs();
    let cell_size = config.world.cell_size;
    let chunk_world_size = cell_size * config.world.chunk_cell_count as f32;
    let expiry = config.flow_field.field_expiry_secs;
    let budget = config.flow_field.max_fields_built_per_frame;

    let mut active_destinations: HashMap<u64, Vec3> = HashMap::new();
    for nav in &followers {
        if nav.has_destination {
            active_destinations.entry(nav.destination_hash).or_insert(nav.destination);
        }
    }

    let mut needed: HashSet<(u64, ChunkCoord)> = HashSet::new();
    for (&hash, &destination) in &active_destinations {
        let dest_chunk = ChunkCoord::from_world_pos(destination, chunk_world_size);
        needed.insert((hash, dest_chunk));
        for neighbor in dest_chunk.macro_neighbors() {
            needed.insert((hash, neighbor));
        }
    }

    let mut built_this_frame = 0usize;
    for &(hash, chunk_coord) in &needed {
        if built_this_frame >= budget {
            break;
        }
        let Some(chunk_entity) = chunk_index.get(chunk_coord) else {
            continue;
        };
        let Ok(blob) = chunk_blobs.get(chunk_entity) else {
            continue;
        };
        let destination = active_destinations[&hash];
        let origin = chunk_origin(chunk_coord, chunk_world_size);

        match flow_index.get((hash, chunk_coord)) {
            Some(field_entity) => {
                if let Ok(mut field) = fields.get_mut(field_entity) {
                    if !field.is_ready || now - field.build_time > expiry {
                        build_single_field(&mut field, &blob.0, &config.terrain_costs, origin, cell_size, now);
                        built_this_frame += 1;
                    }
                }
            }
            None => {
                let mut field = FlowFieldData::new(hash, chunk_coord, destination, blob.0.cell_count);
                build_single_field(&mut field, &blob.0, &config.terrain_costs, origin, cell_size, now);
                let field_entity = commands.spawn(field).id();
                flow_index.entities.insert((hash, chunk_coord), field_entity);
                built_this_frame += 1;
            }
        }
    }

    let mut to_remove = Vec::new();
    for (&key, &entity) in &flow_index.entities {
        if needed.contains(&key) {
            continue;
        }
        if let Ok(field) = fields.get(entity) {
            if now - field.build_time > expiry {
                to_remove.push((key, entity));
            }
        }
    }
    for (key, entity) in to_remove {
        commands.entity(entity).despawn();
        flow_index.entities.remove(&key);
    }
}

fn chunk_origin(coord: ChunkCoord, chunk_world_size: f32) -> Vec3 {
    Vec3::new(coord.x as f32 * chunk_world_size, 0.0, coord.z as f32 * chunk_world_size)
}

/// Dijkstra wavefront from the goal cell (destination clamped into this
/// chunk's local grid), followed by a gradient pass that never points a
/// cell into an unwalkable neighbor.
fn build_single_field(
    field: &mut FlowFieldData,
    blob: &ChunkStaticBlob,
    costs: &TerrainCostTable,
    chunk_origin: Vec3,
    cell_size: f32,
    now: f32,
) {
    let cell_count = blob.cell_count;
    let total = (cell_count * cell_count) as usize;
    field.integration = vec![i32::MAX; total];
    field.vectors = vec![Vec2::ZERO; total];

    let local_x = ((field.destination.x - chunk_origin.x) / cell_size).floor() as i32;
    let local_z = ((field.destination.z - chunk_origin.z) / cell_size).floor() as i32;
    let goal_x = local_x.clamp(0, cell_count - 1);
    let goal_z = local_z.clamp(0, cell_count - 1);
    let goal_idx = blob.local_index(goal_x, goal_z);

    field.integration[goal_idx] = 0;
    let mut queue = VecDeque::new();
    queue.push_back(goal_idx);
    let mut queued = vec![false; total];
    queued[goal_idx] = true;

    while let Some(current) = queue.pop_front() {
        queued[current] = false;
        let cx = current as i32 % cell_count;
        let cz = current as i32 / cell_count;
        let current_cost = field.integration[current];

        for (dx, dz) in NEIGHBOR_OFFSETS {
            let (nx, nz) = (cx + dx, cz + dz);
            let Some(node) = blob.node_at(nx, nz) else {
                continue;
            };
            if node.is_blocked() {
                continue;
            }
            let terrain_extra = (costs.cost(node.terrain_cost_mask) - 10).max(0);
            let edge_cost = step_cost(dx, dz) + terrain_extra;
            let neighbor_idx = blob.local_index(nx, nz);
            let tentative = current_cost + edge_cost;
            if tentative < field.integration[neighbor_idx] {
                field.integration[neighbor_idx] = tentative;
                if !queued[neighbor_idx] {
                    queued[neighbor_idx] = true;
                    queue.push_back(neighbor_idx);
                }
            }
        }
    }

    for z in 0..cell_count {
        for x in 0..cell_count {
            let idx = blob.local_index(x, z);
            if field.integration[idx] == i32::MAX {
                continue;
            }
            let mut best: Option<(i32, i32, i32)> = None;
            for (dx, dz) in NEIGHBOR_OFFSETS {
                let (nx, nz) = (x + dx, z + dz);
                let Some(node) = blob.node_at(nx, nz) else {
                    continue;
                };
                if node.is_blocked() {
                    continue;
                }
                let nidx = blob.local_index(nx, nz);
                let cost = field.integration[nidx];
                if cost == i32::MAX {
                    continue;
                }
                if best.map_or(true, |(_, _, best_cost)| cost < best_cost) {
                    best = Some((nx, nz, cost));
                }
            }
            if let Some((nx, nz, cost)) = best {
                field.vectors[idx] = if cost < field.integration[idx] {
                    Vec2::new((nx - x) as f32, (nz - z) as f32).normalize_or_zero()
                } else {
                    Vec2::ZERO
                };
            }
        }
    }

    field.is_ready = true;
    field.build_time = now;
}
