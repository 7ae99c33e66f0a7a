//! Stage 13: Late Cleanup — disable every one-shot tag that must be visible
//! for exactly one frame, so next frame's readers see it absent
//! (`spec.md` §5). `PathfindingSuccess` is disabled by the Path Success
//! Handler already; `NeedsRepath` by the repath escalation itself. Only the
//! tags nothing downstream consumes need clearing here.

use bevy::prelude::*;

use crate::components::agent::{PathfindingFailed, StartedMoving, StoppedMoving};
use crate::components::combat::{AttackHitEvent, DamageReceivedEvent};

pub fn late_cleanup_system(
    mut commands: Commands,
    started: Query<Entity, With<StartedMoving>>,
    stopped: Query<Entity, With<StoppedMoving>>,
    failed: Query<Entity, With<PathfindingFailed>>,
    attack_hits: Query<Entity, With<AttackHitEvent>>,
    damage_received: Query<Entity, With<DamageReceivedEvent>>,
) {
    for entity in &started {
        commands.entity(entity).remove::<StartedMoving>();
    }
    for entity in &stopped {
        commands.entity(entity).remove::<StoppedMoving>();
    }
    for entity in &failed {
        commands.entity(entity).remove::<PathfindingFailed>();
    }
    for entity in &attack_hits {
        commands.entity(entity).remove::<AttackHitEvent>();
    }
    for entity in &damage_received {
        commands.entity(entity).remove::<DamageReceivedEvent>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clears_every_one_shot_tag() {
        let mut world = World::new();
        let entity = world
            .spawn((
                StartedMoving,
                StoppedMoving,
                PathfindingFailed,
                AttackHitEvent {
                    hit_target: Entity::PLACEHOLDER,
                    damage: 1.0,
                },
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(late_cleanup_system);
        schedule.run(&mut world);

        assert!(world.get::<StartedMoving>(entity).is_none());
        assert!(world.get::<StoppedMoving>(entity).is_none());
        assert!(world.get::<PathfindingFailed>(entity).is_none());
        assert!(world.get::<AttackHitEvent>(entity).is_none());
    }
}
