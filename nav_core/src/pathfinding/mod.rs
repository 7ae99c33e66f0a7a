//! Stage 5 (part 2): the A* dispatch system (`spec.md` §4.4). Gathers every
//! agent with a live `PathRequest`, processes the top
//! `PathfindingConfig::max_requests_per_frame` by descending priority, and
//! routes each to the single-chunk, multi-chunk, or macro variant depending
//! on which end-chunks are loaded. Remaining requests persist to next frame.

pub mod common;
pub mod macro_astar;
pub mod multi_chunk;
pub mod single_chunk;

use std::collections::HashMap;

use bevy::prelude::*;
use game_core::chunk::ChunkCoord;
use game_core::config::NavigationConfig;

use crate::components::agent::{
    AgentNavigation, MacroWaypoints, NavMode, PathRequest, PathWaypoints, PathfindingFailed,
    PathfindingSuccess, UnitLayerPermissions,
};
use crate::components::streaming::{ChunkRecord, ChunkStaticData};
use crate::resources::ChunkIndex;

use macro_astar::{find_path_macro, MacroNode};
use multi_chunk::find_path_multi_chunk;
use single_chunk::find_path_single_chunk;

pub fn astar_dispatch_system(
    mut commands: Commands,
    config: Res<NavigationConfig>,
    chunk_index: Res<ChunkIndex>,
    chunk_records: Query<&ChunkRecord>,
    chunk_blobs: Query<&ChunkStaticData>,
    mut requesters: Query<(
        Entity,
        &PathRequest,
        &UnitLayerPermissions,
        &mut AgentNavigation,
    )>,
) {
    let cell_size = config.world.cell_size;
    let chunk_world_size = cell_size * config.world.chunk_cell_count as f32;
    let budget = config.pathfinding.max_requests_per_frame;

    let mut pending: Vec<(Entity, PathRequest)> = requesters
        .iter()
        .map(|(entity, request, _, _)| (entity, *request))
        .collect();
    pending.sort_unstable_by(|a, b| b.1.priority.cmp(&a.1.priority));

    // Macro connectivity graph over every currently loaded chunk, built once
    // per frame and shared across every macro-routed request this frame.
    let macro_nodes: HashMap<ChunkCoord, MacroNode> = chunk_index
        .entities
        .iter()
        .filter_map(|(&coord, &entity)| {
            let blob = chunk_blobs.get(entity).ok()?;
            Some((
                coord,
                MacroNode {
                    coord,
                    macro_connectivity: blob.0.macro_connectivity,
                },
            ))
        })
        .collect();

    for (entity, request) in pending.into_iter().take(budget) {
        let Ok((_, _, permissions, mut nav)) = requesters.get_mut(entity) else {
            continue;
        };

        let start_chunk = ChunkCoord::from_world_pos(request.start, chunk_world_size);
        let end_chunk = ChunkCoord::from_world_pos(request.end, chunk_world_size);

        let start_loaded = chunk_index.get(start_chunk).is_some();
        let end_ready = chunk_index
            .get(end_chunk)
            .and_then(|e| chunk_records.get(e).ok())
            .map(|r| r.static_ready)
            .unwrap_or(false);

        let mut succeeded = false;

        if start_chunk == end_chunk {
            if let Some(entity_id) = chunk_index.get(start_chunk) {
                if let Ok(blob) = chunk_blobs.get(entity_id) {
                    let origin = start_chunk.to_world_center(chunk_world_size)
                        - Vec3::new(chunk_world_size * 0.5, 0.0, chunk_world_size * 0.5);
                    if let Some(result) = find_path_single_chunk(
                        &blob.0,
                        origin,
                        cell_size,
                        request.start,
                        request.end,
                        permissions,
                        &config.terrain_costs,
                    ) {
                        commands.entity(entity).insert(PathWaypoints(result.waypoints));
                        nav.mode = NavMode::AStar;
                        succeeded = true;
                    }
                }
            }
        } else if start_loaded && end_ready {
            let loaded_blobs: HashMap<ChunkCoord, &game_core::chunk::ChunkStaticBlob> = chunk_index
                .entities
                .iter()
                .filter_map(|(&coord, &e)| chunk_blobs.get(e).ok().map(|b| (coord, &b.0)))
                .collect();
            if let Some(result) = find_path_multi_chunk(
                &loaded_blobs,
                cell_size,
                request.start,
                request.end,
                permissions,
                &config.terrain_costs,
            ) {
                commands.entity(entity).insert(PathWaypoints(result.waypoints));
                nav.mode = NavMode::AStar;
                succeeded = true;
            }
        }

        if !succeeded {
            if let Some(result) = find_path_macro(&macro_nodes, start_chunk, end_chunk, chunk_world_size) {
                commands.entity(entity).insert(MacroWaypoints(result.waypoints));
                nav.mode = NavMode::MacroOnly;
                succeeded = true;
            }
        }

        if succeeded {
            commands.entity(entity).insert(PathfindingSuccess);
        } else {
            commands.entity(entity).insert(PathfindingFailed);
        }
        commands.entity(entity).remove::<PathRequest>();
    }
}
