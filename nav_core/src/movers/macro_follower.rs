//! Macro follower: advances an agent chunk-center to chunk-center along
//! `MacroWaypoints` while its destination chunk is still loading
//! (`spec.md` §4.6). Exhausting the buffer hands the agent back to the A*
//! dispatcher next frame via `macro_path_done`.

use bevy::prelude::*;

use crate::components::agent::{AgentNavigation, MacroWaypoints, NavMode, UnitLayerPermissions, UnitMovement};
use crate::movers::{apply_heading, kinematic_step};

const ALIGNMENT_FLOOR: f32 = 0.25;
/// A macro waypoint is a chunk center; reaching within this radius of one is
/// close enough to advance to the next (`spec.md` §4.6).
const CHUNK_REACH_DIST: f32 = 10.0;

pub fn macro_follower_system(
    time: Res<Time>,
    mut agents: Query<(
        &mut Transform,
        &mut UnitMovement,
        &UnitLayerPermissions,
        &mut AgentNavigation,
        &MacroWaypoints,
    )>,
) {
    let dt = time.delta_secs();

    for (mut transform, mut movement, permissions, mut nav, waypoints) in &mut agents {
        if nav.mode != NavMode::MacroOnly {
            continue;
        }

        let Some(&target) = waypoints.0.get(movement.current_waypoint_index) else {
            nav.macro_path_done = true;
            nav.mode = NavMode::AStar;
            movement.is_following_path = false;
            continue;
        };

        let mut to_target = target - transform.translation;
        if !permissions.is_flying {
            to_target.y = 0.0;
        }
        let distance = to_target.length();

        if distance <= CHUNK_REACH_DIST {
            movement.current_waypoint_index += 1;
            if movement.current_waypoint_index >= waypoints.0.len() {
                nav.macro_path_done = true;
                nav.mode = NavMode::AStar;
                movement.is_following_path = false;
            }
            continue;
        }

        let desired_dir = to_target / distance.max(1e-5);
        let step = kinematic_step(
            &transform,
            desired_dir,
            permissions.is_flying,
            movement.turn_speed,
            movement.speed,
            ALIGNMENT_FLOOR,
            1.0,
            dt,
        );
        transform.translation = step.new_position;
        apply_heading(&mut transform, step.new_forward);
    }
}
