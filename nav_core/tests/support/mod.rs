//! Shared scaffolding for the pathfinding/flow-field integration scenarios
//! in `spec.md` §8. Builds a `World` + `Schedule` directly (the same idiom
//! every module's own `#[cfg(test)]` block already uses) rather than a full
//! `App`, since none of these scenarios need real chunk streaming or
//! physics: every chunk involved is hand-placed as already baked (or, for
//! the Unloaded case, deliberately absent).

use std::time::Duration;

use bevy::prelude::*;
use game_core::chunk::{ChunkCoord, ChunkState, ChunkStaticBlob, NodeStatic};
use game_core::config::NavigationConfig;

use nav_core::components::agent::UnitLayerPermissions;
use nav_core::components::streaming::{ChunkRecord, ChunkStaticData};
use nav_core::dispatcher::{dispatcher_system, repath_system};
use nav_core::flow_field::builder::build_flow_fields_system;
use nav_core::flow_field::sampler::sample_flow_fields_system;
use nav_core::movers::astar_follower::astar_follower_system;
use nav_core::movers::flow_follower::flow_follower_system;
use nav_core::movers::macro_follower::macro_follower_system;
use nav_core::movers::movement_events::movement_events_system;
use nav_core::command_intake::command_intake_system;
use nav_core::late_cleanup::late_cleanup_system;
use nav_core::pathfinding::astar_dispatch_system;
use nav_core::path_success::path_success_handler_system;
use nav_core::resources::ChunkIndex;

pub const CELL_COUNT: i32 = 8;
pub const CELL_SIZE: f32 = 1.0;

#[must_use]
pub fn base_config() -> NavigationConfig {
    let mut config = NavigationConfig::default();
    config.world.chunk_cell_count = CELL_COUNT;
    config.world.cell_size = CELL_SIZE;
    config
}

#[must_use]
pub fn open_blob(coord: ChunkCoord, cell_count: i32) -> ChunkStaticBlob {
    ChunkStaticBlob {
        chunk_coord: coord,
        cell_count,
        nodes: vec![
            NodeStatic {
                walkable_layer_mask: 0xFF,
                terrain_cost_mask: 0,
                slope_flags: 0,
                reserved: 0,
            };
            (cell_count * cell_count) as usize
        ],
        macro_connectivity: [10; 8],
    }
}

#[must_use]
pub fn blob_with_blocked_column(coord: ChunkCoord, cell_count: i32, blocked_x: i32) -> ChunkStaticBlob {
    let mut blob = open_blob(coord, cell_count);
    for z in 0..cell_count {
        let idx = blob.local_index(blocked_x, z);
        blob.nodes[idx] = NodeStatic::BLOCKED;
    }
    blob
}

#[must_use]
pub fn blob_with_blocked_cell(coord: ChunkCoord, cell_count: i32, blocked: (i32, i32)) -> ChunkStaticBlob {
    let mut blob = open_blob(coord, cell_count);
    let idx = blob.local_index(blocked.0, blocked.1);
    blob.nodes[idx] = NodeStatic::BLOCKED;
    blob
}

/// Spawns a fully baked chunk entity and registers it in `index`.
pub fn spawn_baked_chunk(world: &mut World, index: &mut ChunkIndex, coord: ChunkCoord, blob: ChunkStaticBlob) -> Entity {
    let entity = world
        .spawn((
            ChunkRecord {
                coord,
                state: ChunkState::Active,
                static_ready: true,
            },
            ChunkStaticData(blob),
        ))
        .id();
    index.entities.insert(coord, entity);
    entity
}

#[must_use]
pub fn default_permissions() -> UnitLayerPermissions {
    UnitLayerPermissions::default()
}

/// The full command->dispatch->pathfind->follow pipeline, minus Streaming
/// and Bake (every scenario here places already-baked chunks by hand) and
/// minus combat (these scenarios never spawn combat components). Ordered
/// exactly as `game_core::schedule::NavSystemSet` chains them.
#[must_use]
pub fn movement_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            command_intake_system,
            (dispatcher_system, repath_system).chain(),
            astar_dispatch_system,
            path_success_handler_system,
            build_flow_fields_system,
            sample_flow_fields_system,
            (astar_follower_system, macro_follower_system, flow_follower_system),
            movement_events_system,
            late_cleanup_system,
        )
            .chain(),
    );
    schedule
}

/// Advances `Time` by `dt` and runs `schedule` once — one simulated frame.
pub fn tick(world: &mut World, schedule: &mut Schedule, dt: f32) {
    world.resource_mut::<Time>().advance_by(Duration::from_secs_f32(dt));
    schedule.run(world);
}
