//! Stage 3: Chunk Baker — per-cell ground + clearance raycasts and 8-way
//! macro connectivity (`spec.md` §4.1).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use game_core::chunk::{ChunkCoord, ChunkStaticBlob, NodeStatic};
use game_core::config::NavigationConfig;

/// Bake one chunk's static data using the physics collaborator's ground ray
/// and clearance sphere check. This is the only bake-time dependency on
/// `bevy_rapier3d` the core has (`spec.md` §1 "Out of scope").
pub fn bake_chunk(
    coord: ChunkCoord,
    config: &NavigationConfig,
    rapier: &RapierContext,
) -> ChunkStaticBlob {
    let cell_count = config.world.chunk_cell_count;
    let cell_size = config.world.cell_size;
    let origin = coord.to_world_center(cell_size * cell_count as f32)
        - Vec3::new(
            cell_size * cell_count as f32 * 0.5,
            0.0,
            cell_size * cell_count as f32 * 0.5,
        );

    let mut nodes = Vec::with_capacity((cell_count * cell_count) as usize);
    let ground_filter = QueryFilter::new().groups(CollisionGroups::new(
        Group::ALL,
        Group::from_bits_truncate(config.world.ground_layer),
    ));
    let unwalkable_filter = QueryFilter::new().groups(CollisionGroups::new(
        Group::ALL,
        Group::from_bits_truncate(config.world.unwalkable_layer),
    ));

    for local_z in 0..cell_count {
        for local_x in 0..cell_count {
            let cell_center = origin
                + Vec3::new(
                    (local_x as f32 + 0.5) * cell_size,
                    0.0,
                    (local_z as f32 + 0.5) * cell_size,
                );
            nodes.push(bake_cell(cell_center, config, rapier, &ground_filter, &unwalkable_filter));
        }
    }

    let macro_connectivity = bake_macro_connectivity(origin, cell_size * cell_count as f32, config, rapier, &ground_filter);

    ChunkStaticBlob {
        chunk_coord: coord,
        cell_count,
        nodes,
        macro_connectivity,
    }
}

fn bake_cell(
    cell_center: Vec3,
    config: &NavigationConfig,
    rapier: &RapierContext,
    ground_filter: &QueryFilter,
    unwalkable_filter: &QueryFilter,
) -> NodeStatic {
    let ray_origin = cell_center + Vec3::new(0.0, config.world.bake_raycast_height, 0.0);
    let ray_length = config.world.bake_raycast_height + 2.0;

    let Some((_entity, intersection)) =
        rapier.cast_ray_and_get_normal(ray_origin, Vec3::NEG_Y, ray_length, true, *ground_filter)
    else {
        return NodeStatic::BLOCKED;
    };

    let hit_point = ray_origin + Vec3::NEG_Y * intersection.time_of_impact;
    let slope_deg = intersection.normal.angle_between(Vec3::Y).to_degrees();

    let (slope_flags, mut walkable_layer_mask) = if slope_deg > config.world.max_slope_angle {
        (NodeStatic::TOO_STEEP_FLAG, NodeStatic::FLYING_ONLY_MASK)
    } else {
        (0u8, 0xFFu8)
    };

    let clearance_origin = hit_point + Vec3::new(0.0, config.world.agent_radius, 0.0);
    let clearance_radius = config.world.agent_radius * 0.9;
    if rapier
        .intersection_with_shape(
            clearance_origin,
            Quat::IDENTITY,
            &Collider::ball(clearance_radius),
            *unwalkable_filter,
        )
        .is_some()
    {
        walkable_layer_mask = 0;
    }

    NodeStatic {
        walkable_layer_mask,
        terrain_cost_mask: 0,
        slope_flags,
        reserved: 0,
    }
}

/// For each of the 8 outward edge midpoints (N, NE, E, SE, S, SW, W, NW),
/// emit `10` if a downward ray finds ground, else `0` (blocked).
fn bake_macro_connectivity(
    origin: Vec3,
    chunk_world_size: f32,
    config: &NavigationConfig,
    rapier: &RapierContext,
    ground_filter: &QueryFilter,
) -> [u8; 8] {
    let half = chunk_world_size * 0.5;
    let center = origin + Vec3::new(half, 0.0, half);
    let offsets = [
        Vec3::new(0.0, 0.0, half),   // N
        Vec3::new(half, 0.0, half),  // NE
        Vec3::new(half, 0.0, 0.0),   // E
        Vec3::new(half, 0.0, -half), // SE
        Vec3::new(0.0, 0.0, -half),  // S
        Vec3::new(-half, 0.0, -half),// SW
        Vec3::new(-half, 0.0, 0.0),  // W
        Vec3::new(-half, 0.0, half), // NW
    ];

    let mut out = [0u8; 8];
    for (i, offset) in offsets.iter().enumerate() {
        let ray_origin = center + *offset + Vec3::new(0.0, config.world.bake_raycast_height, 0.0);
        let ray_length = config.world.bake_raycast_height + 2.0;
        let hit = rapier
            .cast_ray(ray_origin, Vec3::NEG_Y, ray_length, true, *ground_filter)
            .is_some();
        out[i] = if hit { 10 } else { 0 };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_static_blocked_has_zero_mask() {
        assert_eq!(NodeStatic::BLOCKED.walkable_layer_mask, 0);
    }
}
