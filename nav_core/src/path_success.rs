//! Stage 6: Path Success Handler — applies a completed A*/macro solve to the
//! requester's waypoint buffer (`spec.md` §4.4). Split out from the A* stage
//! itself so the ordering guarantee ("the first waypoint is consumed no
//! earlier than the following frame") holds regardless of which pathfinder
//! variant produced the result.

use bevy::prelude::*;

use crate::components::agent::{AgentNavigation, NavMode, PathfindingSuccess, UnitMovement};

pub fn path_success_handler_system(
    mut commands: Commands,
    mut agents: Query<(Entity, &AgentNavigation, &mut UnitMovement), With<PathfindingSuccess>>,
) {
    for (entity, nav, mut movement) in &mut agents {
        if matches!(nav.mode, NavMode::AStar | NavMode::MacroOnly) {
            movement.is_following_path = true;
            movement.current_waypoint_index = 0;
        }
        commands.entity(entity).remove::<PathfindingSuccess>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_tag_arms_the_waypoint_buffer() {
        let mut world = World::new();
        let agent = world
            .spawn((
                AgentNavigation {
                    mode: NavMode::AStar,
                    ..Default::default()
                },
                UnitMovement {
                    current_waypoint_index: 7,
                    is_following_path: false,
                    ..Default::default()
                },
                PathfindingSuccess,
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(path_success_handler_system);
        schedule.run(&mut world);

        let movement = world.get::<UnitMovement>(agent).unwrap();
        assert!(movement.is_following_path);
        assert_eq!(movement.current_waypoint_index, 0);
        assert!(world.get::<PathfindingSuccess>(agent).is_none());
    }

    #[test]
    fn idle_mode_leaves_waypoint_buffer_untouched() {
        let mut world = World::new();
        let agent = world
            .spawn((
                AgentNavigation::default(),
                UnitMovement::default(),
                PathfindingSuccess,
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(path_success_handler_system);
        schedule.run(&mut world);

        let movement = world.get::<UnitMovement>(agent).unwrap();
        assert!(!movement.is_following_path);
        assert!(world.get::<PathfindingSuccess>(agent).is_none());
    }
}
