//! Stage 8 (part 2): Flow Field Sampler — reads each follower's current
//! cell out of its field into the per-frame `SampledFlowDirections` scratch
//! (`spec.md` §4.5). Runs on the main thread, after the builder has
//! published this frame's fields (`spec.md` §5 "Shared resources").

use bevy::prelude::*;
use game_core::chunk::ChunkCoord;
use game_core::config::NavigationConfig;

use crate::components::agent::{AgentNavigation, FlowFieldFollower};
use crate::components::flow_field::FlowFieldData;
use crate::resources::{FlowFieldIndex, SampledFlowDirections};

pub fn sample_flow_fields_system(
    config: Res<NavigationConfig>,
    flow_index: Res<FlowFieldIndex>,
    fields: Query<&FlowFieldData>,
    mut sampled: ResMut<SampledFlowDirections>,
    followers: Query<(Entity, &Transform, &AgentNavigation), With<FlowFieldFollower>>,
) {
    sampled.directions.clear();
    let cell_size = config.world.cell_size;
    let chunk_world_size = cell_size * config.world.chunk_cell_count as f32;

    for (entity, transform, nav) in &followers {
        if !nav.has_destination {
            continue;
        }
        let chunk_coord = ChunkCoord::from_world_pos(transform.translation, chunk_world_size);
        let Some(field_entity) = flow_index.get((nav.destination_hash, chunk_coord)) else {
            continue;
        };
        let Ok(field) = fields.get(field_entity) else {
            continue;
        };
        if !field.is_ready {
            continue;
        }

        let cell_count = (field.vectors.len() as f64).sqrt().round() as i32;
        let chunk_origin = Vec3::new(
            chunk_coord.x as f32 * chunk_world_size,
            0.0,
            chunk_coord.z as f32 * chunk_world_size,
        );
        let local_x = ((transform.translation.x - chunk_origin.x) / cell_size).floor() as i32;
        let local_z = ((transform.translation.z - chunk_origin.z) / cell_size).floor() as i32;
        if local_x < 0 || local_z < 0 || local_x >= cell_count || local_z >= cell_count {
            continue;
        }

        let idx = (local_z * cell_count + local_x) as usize;
        let vector = field.vectors[idx];
        if vector.length_squared() > 1e-8 {
            sampled.directions.insert(entity, vector);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::chunk::ChunkCoord as Coord;

    #[test]
    fn samples_the_vector_at_the_agents_cell() {
        let mut world = World::new();
        world.insert_resource(Time::default());
        world.insert_resource(NavigationConfig::default());
        world.insert_resource(SampledFlowDirections::default());

        let mut field = FlowFieldData::new(1, Coord::new(0, 0), Vec3::new(31.5, 0.0, 0.5), 32);
        // Agent sits at world (0.5, 0.5) => local cell (0, 0) => index 0.
        field.is_ready = true;
        field.vectors[0] = Vec2::new(1.0, 0.0);

        let mut index = FlowFieldIndex::default();
        let field_entity = world.spawn(field).id();
        index.entities.insert((1, Coord::new(0, 0)), field_entity);
        world.insert_resource(index);

        let agent = world
            .spawn((
                Transform::from_xyz(0.5, 0.0, 0.5),
                AgentNavigation {
                    destination_hash: 1,
                    has_destination: true,
                    ..Default::default()
                },
                FlowFieldFollower,
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(sample_flow_fields_system);
        schedule.run(&mut world);

        let sampled = world.resource::<SampledFlowDirections>();
        assert_eq!(sampled.directions.get(&agent), Some(&Vec2::new(1.0, 0.0)));
    }
}
