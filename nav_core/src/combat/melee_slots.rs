//! Stage 6: Melee Slot Manager — reserves a ring-orbit slot around each
//! attacker's target, releasing stale reservations before granting new ones
//! (`spec.md` §4.8). Ranged attackers are always admitted against a shared
//! `ranged_slot_total`; melee attackers wait for a free ring slot.

use bevy::prelude::*;
use game_core::config::NavigationConfig;

use crate::components::combat::{CurrentTarget, DeadTag, MeleeSlotAssignment, MeleeSlotComponent, Weapon, WeaponKind};

/// Drop the reservation of anyone whose target changed, was lost, or died.
pub fn release_slots_system(
    mut commands: Commands,
    mut slot_owners: Query<&mut MeleeSlotComponent>,
    holders: Query<(Entity, &MeleeSlotAssignment, &CurrentTarget, &Weapon)>,
) {
    for (entity, assignment, current_target, weapon) in &holders {
        let still_holds = current_target.has_target && current_target.target_entity == Some(assignment.target_entity);
        if still_holds {
            continue;
        }

        if let Ok(mut slots) = slot_owners.get_mut(assignment.target_entity) {
            match weapon.kind {
                WeaponKind::Melee => slots.current_melee = slots.current_melee.saturating_sub(1),
                WeaponKind::Ranged | WeaponKind::RangedAoe => {
                    slots.current_ranged = slots.current_ranged.saturating_sub(1);
                }
            }
        }
        commands.entity(entity).remove::<MeleeSlotAssignment>();
    }
}

/// Grant a slot to every targeted, unassigned attacker that qualifies.
pub fn acquire_slots_system(
    config: Res<NavigationConfig>,
    mut commands: Commands,
    mut slot_owners: Query<&mut MeleeSlotComponent>,
    seekers: Query<(Entity, &CurrentTarget, &Weapon), (Without<MeleeSlotAssignment>, Without<DeadTag>)>,
) {
    let ranged_slot_total = config.combat.ranged_slot_total.max(1);

    for (entity, current_target, weapon) in &seekers {
        if !current_target.has_target {
            continue;
        }
        let Some(target_entity) = current_target.target_entity else {
            continue;
        };
        let Ok(mut slots) = slot_owners.get_mut(target_entity) else {
            continue;
        };

        match weapon.kind {
            WeaponKind::Melee => {
                if slots.current_melee >= slots.max_melee_slots {
                    continue;
                }
                let slot_index = slots.current_melee;
                slots.current_melee += 1;
                commands.entity(entity).insert(MeleeSlotAssignment {
                    target_entity,
                    slot_index,
                    total_slots: slots.max_melee_slots,
                });
            }
            WeaponKind::Ranged | WeaponKind::RangedAoe => {
                let slot_index = slots.current_ranged % ranged_slot_total;
                slots.current_ranged += 1;
                commands.entity(entity).insert(MeleeSlotAssignment {
                    target_entity,
                    slot_index,
                    total_slots: ranged_slot_total,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weapon(kind: WeaponKind) -> Weapon {
        Weapon {
            kind,
            range: 1.5,
            damage_mult: 1.0,
            speed_mult: 1.0,
            detection_range: 15.0,
        }
    }

    #[test]
    fn melee_seeker_waits_when_ring_is_full() {
        let mut world = World::new();
        world.insert_resource(NavigationConfig::default());

        let target = world
            .spawn(MeleeSlotComponent {
                current_melee: 4,
                current_ranged: 0,
                max_melee_slots: 4,
            })
            .id();

        let seeker = world
            .spawn((
                weapon(WeaponKind::Melee),
                CurrentTarget {
                    target_entity: Some(target),
                    last_known_position: Vec3::ZERO,
                    has_target: true,
                },
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(acquire_slots_system);
        schedule.run(&mut world);

        assert!(world.get::<MeleeSlotAssignment>(seeker).is_none());
        assert_eq!(world.get::<MeleeSlotComponent>(target).unwrap().current_melee, 4);
    }

    #[test]
    fn ranged_seeker_is_always_admitted() {
        let mut world = World::new();
        world.insert_resource(NavigationConfig::default());

        let target = world.spawn(MeleeSlotComponent::default()).id();

        let seeker = world
            .spawn((
                weapon(WeaponKind::Ranged),
                CurrentTarget {
                    target_entity: Some(target),
                    last_known_position: Vec3::ZERO,
                    has_target: true,
                },
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(acquire_slots_system);
        schedule.run(&mut world);

        let assignment = world.get::<MeleeSlotAssignment>(seeker).unwrap();
        assert_eq!(assignment.total_slots, 8);
        assert_eq!(world.get::<MeleeSlotComponent>(target).unwrap().current_ranged, 1);
    }

    #[test]
    fn losing_a_target_releases_its_slot() {
        let mut world = World::new();
        world.insert_resource(NavigationConfig::default());

        let target = world
            .spawn(MeleeSlotComponent {
                current_melee: 1,
                current_ranged: 0,
                max_melee_slots: 4,
            })
            .id();

        let holder = world
            .spawn((
                weapon(WeaponKind::Melee),
                CurrentTarget::default(),
                MeleeSlotAssignment {
                    target_entity: target,
                    slot_index: 0,
                    total_slots: 4,
                },
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(release_slots_system);
        schedule.run(&mut world);

        assert!(world.get::<MeleeSlotAssignment>(holder).is_none());
        assert_eq!(world.get::<MeleeSlotComponent>(target).unwrap().current_melee, 0);
    }
}
