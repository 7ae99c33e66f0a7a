//! Stages 9-10: Damage, out-of-combat Regen, and Hit Recovery (`spec.md`
//! §4.10). `DamageReceivedEvent`/`AttackHitEvent` are left in place for any
//! same-frame reader and cleared later by Late Cleanup.

use bevy::prelude::*;
use game_core::config::NavigationConfig;

use crate::components::agent::NavigationStopCommand;
use crate::components::combat::{AIState, AIStateKind, CurrentTarget, DamageReceivedEvent, DeadTag, HealthComponent, MeleeSlotAssignment};

pub fn damage_system(
    mut commands: Commands,
    mut agents: Query<(Entity, &mut HealthComponent, &mut AIState, &DamageReceivedEvent), Without<DeadTag>>,
) {
    for (entity, mut health, mut ai_state, damage) in &mut agents {
        health.current = (health.current - damage.damage).max(0.0);
        health.time_since_last_damage = 0.0;

        if health.current <= 0.0 {
            ai_state.transition(AIStateKind::Dead);
            commands
                .entity(entity)
                .insert(DeadTag)
                .insert(NavigationStopCommand)
                .remove::<MeleeSlotAssignment>();
        } else {
            ai_state.transition(AIStateKind::Hit);
        }
    }
}

pub fn regen_system(
    time: Res<Time>,
    config: Res<NavigationConfig>,
    mut agents: Query<&mut HealthComponent, Without<DeadTag>>,
) {
    let dt = time.delta_secs();
    let delay = config.combat.out_of_combat_regen_delay_secs;
    let rate = config.combat.out_of_combat_regen_per_sec;

    for mut health in &mut agents {
        health.time_since_last_damage += dt;
        if health.time_since_last_damage < delay || health.current >= health.max {
            continue;
        }
        health.current = (health.current + (rate * dt).round()).min(health.max);
    }
}

pub fn hit_recovery_system(
    config: Res<NavigationConfig>,
    mut agents: Query<(&mut AIState, &CurrentTarget), Without<DeadTag>>,
) {
    let duration = config.combat.hit_state_duration_secs;

    for (mut ai_state, current_target) in &mut agents {
        if ai_state.state != AIStateKind::Hit {
            continue;
        }
        if ai_state.state_timer < duration {
            continue;
        }
        if current_target.has_target {
            ai_state.transition(AIStateKind::Attacking);
        } else {
            ai_state.transition(AIStateKind::Idle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lethal_damage_enables_dead_tag_and_stop() {
        let mut world = World::new();
        let entity = world
            .spawn((
                HealthComponent::new(30.0),
                AIState {
                    state: AIStateKind::Attacking,
                    state_timer: 0.0,
                },
                DamageReceivedEvent {
                    attacker: Entity::PLACEHOLDER,
                    damage: 40.0,
                },
                MeleeSlotAssignment {
                    target_entity: Entity::PLACEHOLDER,
                    slot_index: 0,
                    total_slots: 4,
                },
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(damage_system);
        schedule.run(&mut world);

        assert_eq!(world.get::<HealthComponent>(entity).unwrap().current, 0.0);
        assert!(world.get::<DeadTag>(entity).is_some());
        assert!(world.get::<NavigationStopCommand>(entity).is_some());
        assert!(world.get::<MeleeSlotAssignment>(entity).is_none());
        assert_eq!(world.get::<AIState>(entity).unwrap().state, AIStateKind::Dead);
    }

    #[test]
    fn survivable_damage_transitions_to_hit() {
        let mut world = World::new();
        let entity = world
            .spawn((
                HealthComponent::new(30.0),
                AIState {
                    state: AIStateKind::Attacking,
                    state_timer: 2.0,
                },
                DamageReceivedEvent {
                    attacker: Entity::PLACEHOLDER,
                    damage: 10.0,
                },
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(damage_system);
        schedule.run(&mut world);

        let health = world.get::<HealthComponent>(entity).unwrap();
        assert_eq!(health.current, 20.0);
        assert_eq!(health.time_since_last_damage, 0.0);
        let ai_state = world.get::<AIState>(entity).unwrap();
        assert_eq!(ai_state.state, AIStateKind::Hit);
        assert_eq!(ai_state.state_timer, 0.0);
    }

    #[test]
    fn regen_only_kicks_in_after_delay() {
        let mut world = World::new();
        let mut time = Time::default();
        time.advance_by(std::time::Duration::from_secs(6));
        world.insert_resource(time);
        world.insert_resource(NavigationConfig::default());

        let entity = world
            .spawn(HealthComponent {
                current: 10.0,
                max: 30.0,
                time_since_last_damage: 5.9,
            })
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(regen_system);
        schedule.run(&mut world);

        let health = world.get::<HealthComponent>(entity).unwrap();
        assert!(health.current > 10.0);
        assert!(health.current <= 30.0);
    }

    #[test]
    fn hit_recovery_returns_to_attacking_with_a_target() {
        let mut world = World::new();
        let mut time = Time::default();
        time.advance_by(std::time::Duration::from_millis(16));
        world.insert_resource(time);
        world.insert_resource(NavigationConfig::default());

        let entity = world
            .spawn((
                AIState {
                    state: AIStateKind::Hit,
                    state_timer: 1.0,
                },
                CurrentTarget {
                    target_entity: Some(Entity::PLACEHOLDER),
                    last_known_position: Vec3::ZERO,
                    has_target: true,
                },
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(hit_recovery_system);
        schedule.run(&mut world);

        assert_eq!(world.get::<AIState>(entity).unwrap().state, AIStateKind::Attacking);
    }
}
