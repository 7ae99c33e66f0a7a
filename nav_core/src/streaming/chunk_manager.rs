//! Stage 2: Chunk Manager — desired-state union over anchors, then a
//! budgeted one-step-per-frame transition driver (`spec.md` §4.1).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use game_core::chunk::{ChunkCoord, ChunkState};
use game_core::config::NavigationConfig;

use crate::components::streaming::{
    ChunkDynamicData, ChunkRecord, ChunkStaticData, StreamingAnchor,
};
use crate::resources::{ChunkIndex, ChunkTables};
use crate::streaming::bake::bake_chunk;

fn state_rank(state: ChunkState) -> i8 {
    match state {
        ChunkState::Unloaded => 0,
        ChunkState::Ghost => 1,
        ChunkState::Active => 2,
    }
}

fn rank_state(rank: i8) -> ChunkState {
    match rank {
        r if r <= 0 => ChunkState::Unloaded,
        1 => ChunkState::Ghost,
        _ => ChunkState::Active,
    }
}

/// Recompute the union of every anchor's desired chunk footprint.
pub fn desired_state_system(
    config: Res<NavigationConfig>,
    anchors: Query<&StreamingAnchor>,
    mut tables: ResMut<ChunkTables>,
) {
    tables.desired_state.clear();
    let active_r = config.streaming.active_ring_radius;
    let ghost_r = config.streaming.ghost_ring_radius;

    for anchor in &anchors {
        let priority = anchor.priority.max(1);
        let active_radius = active_r * priority;
        let outer_radius = ghost_r.max(active_radius);
        let base = anchor.current_chunk_coord;

        for dz in -outer_radius..=outer_radius {
            for dx in -outer_radius..=outer_radius {
                let cheb = dx.abs().max(dz.abs());
                let state = if cheb <= active_radius {
                    ChunkState::Active
                } else if cheb <= outer_radius {
                    ChunkState::Ghost
                } else {
                    continue;
                };
                let coord = ChunkCoord::new(base.x + dx, base.z + dz);
                tables
                    .desired_state
                    .entry(coord)
                    .and_modify(|existing| {
                        if state_rank(state) > state_rank(*existing) {
                            *existing = state;
                        }
                    })
                    .or_insert(state);
            }
        }
    }
}

/// Ensure a chunk entity exists for every coord under consideration (desired
/// or currently loaded) and enqueue a transition for any whose state
/// doesn't match yet.
pub fn sync_chunk_existence_system(
    mut commands: Commands,
    mut index: ResMut<ChunkIndex>,
    mut tables: ResMut<ChunkTables>,
    records: Query<&ChunkRecord>,
) {
    let mut coords: Vec<ChunkCoord> = tables.desired_state.keys().copied().collect();
    coords.extend(index.entities.keys().copied());
    coords.sort_unstable_by_key(|c| (c.x, c.z));
    coords.dedup();

    for coord in coords {
        let desired = tables
            .desired_state
            .get(&coord)
            .copied()
            .unwrap_or(ChunkState::Unloaded);

        let entity = match index.get(coord) {
            Some(e) => e,
            None => {
                if desired == ChunkState::Unloaded {
                    continue;
                }
                let e = commands
                    .spawn(ChunkRecord {
                        coord,
                        state: ChunkState::Unloaded,
                        static_ready: false,
                    })
                    .id();
                index.entities.insert(coord, e);
                e
            }
        };

        let current = records
            .get(entity)
            .map(|r| r.state)
            .unwrap_or(ChunkState::Unloaded);

        if current != desired && !tables.transition_queue.contains(&coord) {
            tables.transition_queue.push_back(coord);
        }
    }
}

/// Apply up to `max_chunk_transitions_per_frame` one-step transitions,
/// requeuing coords that haven't yet reached their desired state.
pub fn apply_chunk_transitions_system(
    mut commands: Commands,
    config: Res<NavigationConfig>,
    rapier: ReadRapierContext,
    mut index: ResMut<ChunkIndex>,
    mut tables: ResMut<ChunkTables>,
    mut records: Query<&mut ChunkRecord>,
) {
    let Ok(rapier_context) = rapier.single() else {
        return;
    };

    let budget = config.streaming.max_chunk_transitions_per_frame;
    let mut processed = 0;
    let mut deferred = Vec::new();

    while processed < budget {
        let Some(coord) = tables.transition_queue.pop_front() else {
            break;
        };
        processed += 1;

        let Some(entity) = index.get(coord) else {
            continue;
        };
        let desired = tables
            .desired_state
            .get(&coord)
            .copied()
            .unwrap_or(ChunkState::Unloaded);

        let Ok(mut record) = records.get_mut(entity) else {
            continue;
        };
        if record.state == desired {
            continue;
        }

        let cur_rank = state_rank(record.state);
        let target_rank = state_rank(desired);
        let next_rank = if target_rank > cur_rank {
            cur_rank + 1
        } else {
            cur_rank - 1
        };
        let next_state = rank_state(next_rank);

        match (record.state, next_state) {
            (ChunkState::Unloaded, ChunkState::Ghost) => {
                let blob = bake_chunk(coord, &config, rapier_context);
                commands.entity(entity).insert(ChunkStaticData(blob));
                record.static_ready = true;
                tracing::debug!(?coord, "chunk baked and promoted to Ghost");
            }
            (ChunkState::Ghost, ChunkState::Active) => {
                commands
                    .entity(entity)
                    .insert(ChunkDynamicData::new(config.world.chunk_cell_count));
            }
            (ChunkState::Active, ChunkState::Ghost) => {
                commands.entity(entity).remove::<ChunkDynamicData>();
            }
            (ChunkState::Ghost, ChunkState::Unloaded) => {
                commands.entity(entity).remove::<ChunkStaticData>();
                record.static_ready = false;
                commands.entity(entity).despawn();
                index.entities.remove(&coord);
                tracing::debug!(?coord, "chunk unloaded");
                continue;
            }
            _ => {}
        }
        record.state = next_state;

        if next_state != desired {
            deferred.push(coord);
        }
    }

    for coord in deferred {
        tables.transition_queue.push_back(coord);
    }
}
