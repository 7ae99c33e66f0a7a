//! Stage 1: Streaming Anchor Tracker — refresh each anchor's current chunk
//! coordinate from its world position.

use bevy::prelude::*;
use game_core::chunk::ChunkCoord;
use game_core::config::NavigationConfig;

use crate::components::streaming::StreamingAnchor;

pub fn anchor_tracker_system(
    config: Res<NavigationConfig>,
    mut anchors: Query<(&Transform, &mut StreamingAnchor)>,
) {
    let cell_size = config.world.cell_size;
    let chunk_world_size = cell_size * config.world.chunk_cell_count as f32;
    for (transform, mut anchor) in &mut anchors {
        anchor.current_chunk_coord =
            ChunkCoord::from_world_pos(transform.translation, chunk_world_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_tracks_chunk_from_transform() {
        let mut world = World::new();
        world.insert_resource(NavigationConfig::default());
        let chunk_world_size = 1.0 * 32.0;
        let entity = world
            .spawn((
                Transform::from_translation(Vec3::new(chunk_world_size * 2.5, 0.0, 0.0)),
                StreamingAnchor::default(),
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(anchor_tracker_system);
        schedule.run(&mut world);

        let anchor = world.get::<StreamingAnchor>(entity).unwrap();
        assert_eq!(anchor.current_chunk_coord, ChunkCoord::new(2, 0));
    }
}
