//! A* follower: advances an agent along `PathWaypoints` one waypoint at a
//! time, slowing into the final one (`spec.md` §4.6).

use bevy::prelude::*;

use crate::components::agent::{AgentNavigation, NavMode, PathWaypoints, UnitLayerPermissions, UnitMovement};
use crate::movers::{apply_heading, kinematic_step};

const ALIGNMENT_FLOOR: f32 = 0.25;

pub fn astar_follower_system(
    time: Res<Time>,
    mut agents: Query<(
        &mut Transform,
        &mut UnitMovement,
        &UnitLayerPermissions,
        &AgentNavigation,
        &PathWaypoints,
    )>,
) {
    let dt = time.delta_secs();

    for (mut transform, mut movement, permissions, nav, waypoints) in &mut agents {
        if nav.mode != NavMode::AStar || !movement.is_following_path {
            continue;
        }

        let Some(&target) = waypoints.0.get(movement.current_waypoint_index) else {
            movement.is_following_path = false;
            continue;
        };

        let mut to_target = target - transform.translation;
        if !permissions.is_flying {
            to_target.y = 0.0;
        }
        let distance = to_target.length();
        let turn_distance = movement.turn_distance.max(0.0001);
        let is_last = movement.current_waypoint_index + 1 >= waypoints.0.len();

        if distance <= turn_distance {
            if is_last {
                movement.is_following_path = false;
            } else {
                movement.current_waypoint_index += 1;
            }
            continue;
        }

        let desired_dir = to_target / distance.max(1e-5);
        let speed_scale = if is_last {
            (distance / (3.0 * turn_distance)).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let step = kinematic_step(
            &transform,
            desired_dir,
            permissions.is_flying,
            movement.turn_speed,
            movement.speed,
            ALIGNMENT_FLOOR,
            speed_scale,
            dt,
        );
        transform.translation = step.new_position;
        apply_heading(&mut transform, step.new_forward);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaching_final_waypoint_stops_following() {
        let mut world = World::new();
        world.insert_resource(Time::default());

        let agent = world
            .spawn((
                Transform::from_xyz(0.0, 0.0, 0.0),
                UnitMovement {
                    current_waypoint_index: 0,
                    is_following_path: true,
                    turn_distance: 0.5,
                    ..Default::default()
                },
                UnitLayerPermissions::default(),
                AgentNavigation {
                    mode: NavMode::AStar,
                    ..Default::default()
                },
                PathWaypoints(vec![Vec3::new(0.1, 0.0, 0.0)]),
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(astar_follower_system);
        schedule.run(&mut world);

        assert!(!world.get::<UnitMovement>(agent).unwrap().is_following_path);
    }

    #[test]
    fn advances_waypoint_index_when_within_turn_distance() {
        let mut world = World::new();
        world.insert_resource(Time::default());

        let agent = world
            .spawn((
                Transform::from_xyz(0.0, 0.0, 0.0),
                UnitMovement {
                    current_waypoint_index: 0,
                    is_following_path: true,
                    turn_distance: 0.5,
                    ..Default::default()
                },
                UnitLayerPermissions::default(),
                AgentNavigation {
                    mode: NavMode::AStar,
                    ..Default::default()
                },
                PathWaypoints(vec![Vec3::new(0.1, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0)]),
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(astar_follower_system);
        schedule.run(&mut world);

        let movement = world.get::<UnitMovement>(agent).unwrap();
        assert!(movement.is_following_path);
        assert_eq!(movement.current_waypoint_index, 1);
    }
}
