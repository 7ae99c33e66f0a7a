//! Flow-field follower: steers by the direction sampled from this agent's
//! current cell this frame, falling back to a straight line toward the
//! destination when no field is ready yet (`spec.md` §4.5–§4.6).

use bevy::prelude::*;

use crate::components::agent::{AgentNavigation, FlowFieldFollower, UnitLayerPermissions, UnitMovement};
use crate::movers::{apply_heading, kinematic_step};
use crate::resources::SampledFlowDirections;

const ALIGNMENT_FLOOR: f32 = 0.5;

pub fn flow_follower_system(
    time: Res<Time>,
    sampled: Res<SampledFlowDirections>,
    mut agents: Query<
        (Entity, &mut Transform, &UnitMovement, &UnitLayerPermissions, &AgentNavigation),
        With<FlowFieldFollower>,
    >,
) {
    let dt = time.delta_secs();

    for (entity, mut transform, movement, permissions, nav) in &mut agents {
        let desired_dir = if let Some(&dir) = sampled.directions.get(&entity) {
            Vec3::new(dir.x, 0.0, dir.y)
        } else {
            let mut to_dest = nav.destination - transform.translation;
            to_dest.y = 0.0;
            if to_dest.length_squared() < 1e-8 {
                continue;
            }
            to_dest.normalize()
        };

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_direct_steering_when_unsampled() {
        let mut world = World::new();
        world.insert_resource(Time::default());
        world.insert_resource(SampledFlowDirections::default());

        let agent = world
            .spawn((
                Transform::from_xyz(0.0, 0.0, 0.0),
                UnitMovement::default(),
                UnitLayerPermissions::default(),
                AgentNavigation {
                    destination: Vec3::new(10.0, 0.0, 0.0),
                    has_destination: true,
                    ..Default::default()
                },
                FlowFieldFollower,
            ))
            .id();

        let mut time = world.resource_mut::<Time>();
        time.advance_by(std::time::Duration::from_millis(16));

        let mut schedule = Schedule::default();
        schedule.add_systems(flow_follower_system);
        schedule.run(&mut world);

        let transform = world.get::<Transform>(agent).unwrap();
        assert!(transform.translation.x > 0.0);
    }

    #[test]
    fn uses_sampled_direction_when_available() {
        let mut world = World::new();
        world.insert_resource(Time::default());
        let mut sampled = SampledFlowDirections::default();

        let agent = world
            .spawn((
                Transform::from_xyz(0.0, 0.0, 0.0),
                UnitMovement::default(),
                UnitLayerPermissions::default(),
                AgentNavigation {
                    destination: Vec3::new(-10.0, 0.0, 0.0),
                    has_destination: true,
                    ..Default::default()
                },
                FlowFieldFollower,
            ))
            .id();
        sampled.directions.insert(agent, Vec2::new(1.0, 0.0));
        world.insert_resource(sampled);

        let mut time = world.resource_mut::<Time>();
        time.advance_by(std::time::Duration::from_millis(16));

        let mut schedule = Schedule::default();
        schedule.add_systems(flow_follower_system);
        schedule.run(&mut world);

        // Sampled direction points +X even though the destination is -X.
        let transform = world.get::<Transform>(agent).unwrap();
        assert!(transform.translation.x > 0.0);
    }
}
