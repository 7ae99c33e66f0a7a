//! Stage 9: Movement Events — detect `is_following_path` transitions and
//! enable the corresponding one-shot tag for exactly one frame
//! (`spec.md` §4.6).

use bevy::prelude::*;

use crate::components::agent::{StartedMoving, StoppedMoving, UnitMovement};

pub fn movement_events_system(mut commands: Commands, mut agents: Query<(Entity, &mut UnitMovement)>) {
    for (entity, mut movement) in &mut agents {
        if !movement.prev_is_following_path && movement.is_following_path {
            commands.entity(entity).insert(StartedMoving);
        } else if movement.prev_is_following_path && !movement.is_following_path {
            commands.entity(entity).insert(StoppedMoving);
        }
        movement.prev_is_following_path = movement.is_following_path;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rising_edge_enables_started_moving() {
        let mut world = World::new();
        let agent = world
            .spawn(UnitMovement {
                is_following_path: true,
                prev_is_following_path: false,
                ..Default::default()
            })
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(movement_events_system);
        schedule.run(&mut world);

        assert!(world.get::<StartedMoving>(agent).is_some());
        assert!(world.get::<UnitMovement>(agent).unwrap().prev_is_following_path);
    }

    #[test]
    fn falling_edge_enables_stopped_moving() {
        let mut world = World::new();
        let agent = world
            .spawn(UnitMovement {
                is_following_path: false,
                prev_is_following_path: true,
                ..Default::default()
            })
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(movement_events_system);
        schedule.run(&mut world);

        assert!(world.get::<StoppedMoving>(agent).is_some());
    }

    #[test]
    fn steady_state_enables_nothing() {
        let mut world = World::new();
        let agent = world
            .spawn(UnitMovement {
                is_following_path: true,
                prev_is_following_path: true,
                ..Default::default()
            })
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(movement_events_system);
        schedule.run(&mut world);

        assert!(world.get::<StartedMoving>(agent).is_none());
        assert!(world.get::<StoppedMoving>(agent).is_none());
    }
}
