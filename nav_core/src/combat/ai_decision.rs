//! Stage 7: AI Decision — the per-agent combat state machine: target
//! refresh, desired-position computation, attack-range gating, and cooldown-
//! gated damage emission (`spec.md` §4.9).

use bevy::prelude::*;

use crate::components::agent::{NavigationMoveCommand, NavigationStopCommand};
use crate::components::combat::{
    cooldown_seconds, AIState, AIStateKind, AttackComponent, AttackHitEvent, CurrentTarget, DamageReceivedEvent,
    DeadTag, MeleeSlotAssignment, UnitData, Weapon, WeaponKind,
};

/// Snapshot of the fields AI Decision needs from a live target, read before
/// any self-entity mutation so a dead or despawned target is handled the
/// same way as an invalid one.
struct TargetSnapshot {
    position: Vec3,
    radius: f32,
}

pub fn ai_decision_system(
    mut commands: Commands,
    time: Res<Time>,
    targets: Query<(&Transform, &UnitData), Without<DeadTag>>,
    mut agents: Query<
        (
            Entity,
            &Transform,
            &UnitData,
            &Weapon,
            &mut AttackComponent,
            &mut AIState,
            &mut CurrentTarget,
            Option<&MeleeSlotAssignment>,
        ),
        Without<DeadTag>,
    >,
) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();

    for (entity, transform, unit, weapon, mut attack, mut ai_state, mut current_target, slot) in &mut agents {
        ai_state.state_timer += dt;
        if ai_state.state == AIStateKind::Dead {
            continue;
        }

        if !current_target.has_target {
            if ai_state.state != AIStateKind::Idle {
                ai_state.transition(AIStateKind::Idle);
                commands.entity(entity).insert(NavigationStopCommand);
            }
            continue;
        }

        let Some(target_entity) = current_target.target_entity else {
            current_target.has_target = false;
            ai_state.transition(AIStateKind::Idle);
            commands.entity(entity).insert(NavigationStopCommand);
            continue;
        };

        let snapshot = targets
            .get(target_entity)
            .ok()
            .map(|(target_transform, target_unit)| TargetSnapshot {
                position: target_transform.translation,
                radius: target_unit.radius,
            });

        let Some(snapshot) = snapshot else {
            current_target.has_target = false;
            current_target.target_entity = None;
            ai_state.transition(AIStateKind::Idle);
            commands.entity(entity).insert(NavigationStopCommand);
            continue;
        };

        current_target.last_known_position = snapshot.position;
        let effective_range = weapon.range + unit.radius + snapshot.radius;

        let desired_pos = match weapon.kind {
            WeaponKind::Melee => {
                let (slot_index, total_slots) = slot
                    .map(|s| (s.slot_index, s.total_slots.max(1)))
                    .unwrap_or((0, 1));
                let angle = (slot_index as f32 / total_slots as f32) * std::f32::consts::TAU;
                let offset_len = unit.radius + snapshot.radius + weapon.range * 0.5;
                snapshot.position + Vec3::new(angle.cos(), 0.0, angle.sin()) * offset_len
            }
            WeaponKind::Ranged | WeaponKind::RangedAoe => {
                let offset = transform.translation - snapshot.position;
                let mut flat_dir = Vec3::new(offset.x, 0.0, offset.z).normalize_or_zero();
                if flat_dir == Vec3::ZERO {
                    flat_dir = Vec3::X;
                }
                snapshot.position + flat_dir * (effective_range - 0.2).max(0.0)
            }
        };

        let distance = transform.translation.distance(snapshot.position);
        let in_attack_range = match weapon.kind {
            WeaponKind::Melee => distance <= effective_range + 0.5,
            WeaponKind::Ranged | WeaponKind::RangedAoe => distance <= effective_range,
        };

        if in_attack_range {
            ai_state.transition(AIStateKind::Attacking);
            commands.entity(entity).insert(NavigationStopCommand);
        } else {
            ai_state.transition(AIStateKind::Moving);
            commands.entity(entity).insert(NavigationMoveCommand {
                destination: desired_pos,
                priority: 1,
            });
        }

        if ai_state.state == AIStateKind::Attacking {
            let cooldown = cooldown_seconds(attack.base_attack_speed, weapon.speed_mult);
            if now >= attack.last_attack_time + cooldown {
                attack.last_attack_time = now;
                let damage = (attack.base_damage * weapon.damage_mult).round();
                commands.entity(entity).insert(AttackHitEvent {
                    hit_target: target_entity,
                    damage,
                });
                commands.entity(target_entity).insert(DamageReceivedEvent {
                    attacker: entity,
                    damage,
                });
            }
        }
    }
}
