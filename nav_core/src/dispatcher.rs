//! Stage 5 (part 1): Navigation Dispatcher — mode selection, macro handoff,
//! and arrival (`spec.md` §4.3). Stuck detection and the repath escalation
//! it feeds run alongside in the same stage.

use std::collections::HashMap;

use bevy::prelude::*;
use game_core::chunk::ChunkCoord;
use game_core::config::NavigationConfig;

use crate::components::agent::{
    AgentNavigation, FlowFieldFollower, MacroWaypoints, NavMode, NeedsRepath, PathRequest,
    PathWaypoints, StuckDetection, UnitMovement,
};
use crate::components::flow_field::quantize_destination_hash;
use crate::components::streaming::ChunkRecord;
use crate::resources::ChunkIndex;

/// Agents sharing a quantized destination cell at or above this count are
/// routed to a shared flow field instead of individual A* (`spec.md` §4.3).
const CROWD_THRESHOLD: usize = 12;

pub fn dispatcher_system(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<NavigationConfig>,
    chunk_index: Res<ChunkIndex>,
    chunk_records: Query<&ChunkRecord>,
    mut agents: Query<(
        Entity,
        &Transform,
        &mut AgentNavigation,
        &mut UnitMovement,
        &mut StuckDetection,
    )>,
) {
    let now = time.elapsed_secs();
    let cell_size = config.world.cell_size;
    let chunk_world_size = cell_size * config.world.chunk_cell_count as f32;

    // First pass: count agents per quantized destination cell, across all
    // agents with a live destination (crowd detection needs the full set
    // before any single agent's mode is decided).
    let mut destination_cell_counts: HashMap<(i32, i32), usize> = HashMap::new();
    for (_, transform, nav, _, _) in &agents {
        let _ = transform;
        if nav.has_destination {
            let cell = quantize_cell(nav.destination, cell_size);
            *destination_cell_counts.entry(cell).or_insert(0) += 1;
        }
    }

    for (entity, transform, mut nav, mut movement, mut stuck) in &mut agents {
        if !nav.has_destination {
            continue;
        }

        let position = transform.translation;
        let arrival_threshold = nav.arrival_threshold.max(1.5);

        if position.distance(nav.destination) <= arrival_threshold {
            nav.has_destination = false;
            nav.mode = NavMode::Idle;
            movement.is_following_path = false;
            commands.entity(entity).remove::<FlowFieldFollower>();
            continue;
        }

        if nav.macro_path_done {
            nav.macro_path_done = false;
            nav.mode = NavMode::AStar;
            commands.entity(entity).insert(PathRequest {
                start: position,
                end: nav.destination,
                priority: 1,
                request_time: now,
            });
            nav.repath_cooldown = now + config.pathfinding.repath_cooldown_secs;
            continue;
        }

        if movement.is_following_path && nav.mode != NavMode::Idle {
            continue;
        }

        let dest_chunk = ChunkCoord::from_world_pos(nav.destination, chunk_world_size);
        let dest_ready = chunk_index
            .get(dest_chunk)
            .and_then(|e| chunk_records.get(e).ok())
            .map(|record| record.static_ready)
            .unwrap_or(false);

        let desired_mode = if !dest_ready {
            NavMode::MacroOnly
        } else {
            let cell = quantize_cell(nav.destination, cell_size);
            let count = destination_cell_counts.get(&cell).copied().unwrap_or(0);
            if count >= CROWD_THRESHOLD {
                NavMode::FlowField
            } else {
                NavMode::AStar
            }
        };

        let mode_changed = desired_mode != nav.mode;
        let cooldown_elapsed = now >= nav.repath_cooldown;

        if mode_changed || (!movement.is_following_path && cooldown_elapsed) {
            nav.mode = desired_mode;
            match desired_mode {
                NavMode::FlowField => {
                    nav.destination_hash = quantize_destination_hash(nav.destination, cell_size);
                    movement.is_following_path = false;
                    commands.entity(entity).insert(FlowFieldFollower);
                }
                NavMode::AStar | NavMode::MacroOnly => {
                    commands.entity(entity).remove::<FlowFieldFollower>();
                    commands.entity(entity).insert(PathRequest {
                        start: position,
                        end: nav.destination,
                        priority: 1,
                        request_time: now,
                    });
                }
                NavMode::Idle => {}
            }
            nav.repath_cooldown = now + config.pathfinding.repath_cooldown_secs;
        }

        // Stuck detection.
        if movement.is_following_path && now >= stuck.next_check_time {
            let moved = position.distance(stuck.last_checked_position);
            if moved < stuck.stuck_distance_threshold {
                stuck.stuck_count += 1;
                if stuck.stuck_count >= stuck.max_stuck_count {
                    commands.entity(entity).remove::<PathWaypoints>();
                    commands.entity(entity).remove::<MacroWaypoints>();
                    commands.entity(entity).insert(NeedsRepath);
                    stuck.stuck_count = 0;
                }
            } else {
                stuck.stuck_count = 0;
            }
            stuck.last_checked_position = position;
            stuck.next_check_time = now + stuck.check_interval;
        }
    }
}

/// Convert `NeedsRepath` into a fresh, elevated-priority `PathRequest`.
pub fn repath_system(
    mut commands: Commands,
    time: Res<Time>,
    repath_needed: Query<(Entity, &Transform, &AgentNavigation), With<NeedsRepath>>,
) {
    let now = time.elapsed_secs();
    for (entity, transform, nav) in &repath_needed {
        commands.entity(entity).insert(PathRequest {
            start: transform.translation,
            end: nav.destination,
            priority: 2,
            request_time: now,
        });
        commands.entity(entity).remove::<NeedsRepath>();
        tracing::debug!(?entity, "repath issued at elevated priority after stuck detection");
    }
}

fn quantize_cell(position: Vec3, cell_size: f32) -> (i32, i32) {
    (
        (position.x / cell_size).floor() as i32,
        (position.z / cell_size).floor() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrival_within_threshold_sets_idle() {
        let mut world = World::new();
        world.insert_resource(Time::default());
        world.insert_resource(NavigationConfig::default());
        world.insert_resource(ChunkIndex::default());
        let entity = world
            .spawn((
                Transform::from_translation(Vec3::new(5.0, 0.0, 5.0)),
                AgentNavigation {
                    destination: Vec3::new(5.5, 0.0, 5.0),
                    has_destination: true,
                    mode: NavMode::AStar,
                    ..Default::default()
                },
                UnitMovement {
                    is_following_path: true,
                    ..Default::default()
                },
                StuckDetection::default(),
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(dispatcher_system);
        schedule.run(&mut world);

        let nav = world.get::<AgentNavigation>(entity).unwrap();
        assert!(!nav.has_destination);
        assert_eq!(nav.mode, NavMode::Idle);
    }
}
