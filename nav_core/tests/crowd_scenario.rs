//! `spec.md` §8 scenario 4: enough agents converging on the same
//! destination cell collapse from individual A* onto a single shared
//! flow field (`dispatcher.rs`'s `CROWD_THRESHOLD`).

mod support;

use bevy::prelude::*;
use game_core::chunk::ChunkCoord;

use nav_core::components::agent::{AgentNavigation, FlowFieldFollower, NavMode, UnitMovement};
use nav_core::resources::{ChunkIndex, FlowFieldIndex};

use support::*;

#[test]
fn twelve_agents_sharing_a_destination_collapse_onto_one_flow_field() {
    let mut world = World::new();
    world.insert_resource(Time::default());
    world.insert_resource(base_config());
    let mut index = ChunkIndex::default();
    let coord = ChunkCoord::new(0, 0);
    spawn_baked_chunk(&mut world, &mut index, coord, open_blob(coord, CELL_COUNT));
    world.insert_resource(index);

    let destination = Vec3::new(6.5, 0.0, 6.5);
    let agents: Vec<Entity> = (0..12)
        .map(|_| {
            world
                .spawn((
                    Transform::from_translation(Vec3::new(0.5, 0.0, 0.5)),
                    AgentNavigation {
                        destination,
                        has_destination: true,
                        mode: NavMode::AStar,
                        ..Default::default()
                    },
                    UnitMovement {
                        is_following_path: false,
                        ..Default::default()
                    },
                    nav_core::components::agent::StuckDetection::default(),
                    default_permissions(),
                ))
                .id()
        })
        .collect();

    let mut schedule = movement_schedule();
    tick(&mut world, &mut schedule, 0.05);

    for &agent in &agents {
        let nav = world.get::<AgentNavigation>(agent).unwrap();
        assert_eq!(nav.mode, NavMode::FlowField, "agent should have collapsed onto the shared flow field");
        assert!(world.get::<FlowFieldFollower>(agent).is_some());
    }

    let flow_index = world.resource::<FlowFieldIndex>();
    assert_eq!(flow_index.entities.len(), 1, "exactly one flow field record should back every agent in the crowd");

    let hash = world.get::<AgentNavigation>(agents[0]).unwrap().destination_hash;
    assert!(hash != 0 || destination == Vec3::ZERO, "destination hash must actually be derived from the destination");
    for &agent in &agents[1..] {
        assert_eq!(world.get::<AgentNavigation>(agent).unwrap().destination_hash, hash, "every agent sharing the destination must key into the same field");
    }
}
