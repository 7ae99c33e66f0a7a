//! Stage 5 (part 1): Threat Scan — snapshot live units, resolve line of
//! sight for ranged scanners, then score and (hysteresis-gated) assign
//! targets (`spec.md` §4.7). Split into a main-thread LoS pass and a
//! scoring pass that runs data-parallel over independent agents, per the
//! concurrency model in `spec.md` §5. Ally Ping (also §4.7) lives in its
//! own module since it runs as a separate stage.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use game_core::config::NavigationConfig;

use crate::components::combat::{
    CurrentTarget, DeadTag, DetectionComponent, HealthComponent, MeleeSlotComponent, UnitData, Weapon, WeaponKind,
};
use crate::resources::{AllyPingQueue, LineOfSightSet};

#[derive(Debug, Clone, Copy)]
struct UnitSnapshot {
    entity: Entity,
    position: Vec3,
    faction_id: u32,
    health_frac: f32,
    melee_slots: u32,
    max_melee_slots: u32,
}

fn score(dist: f32, melee_slots: u32, max_melee_slots: u32, health_frac: f32) -> f32 {
    let slot_frac = if max_melee_slots == 0 {
        0.0
    } else {
        melee_slots as f32 / max_melee_slots as f32
    };
    dist - 30.0 * slot_frac - 20.0 * (1.0 - health_frac)
}

/// Main-thread ray casts: clear `(scanner, target)` pairs for every ranged
/// scanner whose `next_scan_time` has elapsed, against every live candidate
/// within `detection_radius`. Also clears the Ally Ping queue, since this is
/// the start of the Threat Scan pass (`spec.md` resource note).
pub fn line_of_sight_system(
    rapier: ReadRapierContext,
    time: Res<Time>,
    mut los: ResMut<LineOfSightSet>,
    mut ally_pings: ResMut<AllyPingQueue>,
    scanners: Query<(Entity, &Transform, &Weapon, &DetectionComponent), Without<DeadTag>>,
    candidates: Query<(Entity, &Transform), Without<DeadTag>>,
) {
    let Ok(rapier) = rapier.single() else {
        return;
    };

    los.clear_pairs.clear();
    ally_pings.pings.clear();
    let now = time.elapsed_secs();

    for (scanner, scanner_transform, weapon, detection) in &scanners {
        if weapon.kind == WeaponKind::Melee {
            continue;
        }
        if now < detection.next_scan_time {
            continue;
        }

        let origin = scanner_transform.translation + Vec3::Y;
        let filter = QueryFilter::new().groups(CollisionGroups::new(
            Group::ALL,
            Group::from_bits_truncate(detection.obstacle_layers),
        ));

        for (candidate, candidate_transform) in &candidates {
            if candidate == scanner {
                continue;
            }
            let offset = candidate_transform.translation - scanner_transform.translation;
            let dist = offset.length();
            if dist > detection.detection_radius || dist < 1e-5 {
                continue;
            }
            let blocked = rapier
                .cast_ray(origin, offset.normalize(), dist, true, filter)
                .is_some();
            if !blocked {
                los.clear_pairs.insert((scanner, candidate));
            }
        }
    }
}

/// Data-parallel scoring pass: picks the best eligible candidate per
/// scanner due to scan this frame, applies the 15-point hysteresis margin,
/// and writes `CurrentTarget`.
pub fn score_targets_system(
    time: Res<Time>,
    config: Res<NavigationConfig>,
    los: Res<LineOfSightSet>,
    snapshot_query: Query<
        (Entity, &Transform, &UnitData, &HealthComponent, &MeleeSlotComponent),
        Without<DeadTag>,
    >,
    mut scanners: Query<
        (
            Entity,
            &Transform,
            &UnitData,
            &Weapon,
            &mut DetectionComponent,
            &mut CurrentTarget,
        ),
        Without<DeadTag>,
    >,
) {
    let now = time.elapsed_secs();
    let hysteresis = config.combat.target_switch_hysteresis;

    let snapshot: Vec<UnitSnapshot> = snapshot_query
        .iter()
        .map(|(entity, transform, unit, health, slots)| UnitSnapshot {
            entity,
            position: transform.translation,
            faction_id: unit.faction_id,
            health_frac: health.health_frac(),
            melee_slots: slots.current_melee,
            max_melee_slots: slots.max_melee_slots.max(1),
        })
        .collect();

    scanners.par_iter_mut().for_each(
        |(scanner, transform, unit, weapon, mut detection, mut current_target)| {
            if now < detection.next_scan_time {
                return;
            }

            let requires_los = weapon.kind != WeaponKind::Melee;
            let mut best: Option<(UnitSnapshot, f32)> = None;
            for candidate in &snapshot {
                if candidate.entity == scanner || candidate.faction_id == unit.faction_id {
                    continue;
                }
                let dist = transform.translation.distance(candidate.position);
                if dist > detection.detection_radius {
                    continue;
                }
                if requires_los && !los.clear_pairs.contains(&(scanner, candidate.entity)) {
                    continue;
                }
                let candidate_score = score(dist, candidate.melee_slots, candidate.max_melee_slots, candidate.health_frac);
                if best.map_or(true, |(_, best_score)| candidate_score < best_score) {
                    best = Some((*candidate, candidate_score));
                }
            }

            let current_score = current_target
                .target_entity
                .filter(|_| current_target.has_target)
                .and_then(|target_entity| snapshot.iter().find(|s| s.entity == target_entity))
                .filter(|target| transform.translation.distance(target.position) <= detection.chase_range)
                .map(|target| {
                    score(
                        transform.translation.distance(target.position),
                        target.melee_slots,
                        target.max_melee_slots,
                        target.health_frac,
                    )
                });

            match (current_score, best) {
                (None, Some((candidate, _))) => {
                    current_target.target_entity = Some(candidate.entity);
                    current_target.last_known_position = candidate.position;
                    current_target.has_target = true;
                }
                (None, None) => {
                    current_target.has_target = false;
                    current_target.target_entity = None;
                }
                (Some(cur), Some((candidate, candidate_score))) => {
                    if candidate_score <= cur - hysteresis {
                        current_target.target_entity = Some(candidate.entity);
                        current_target.last_known_position = candidate.position;
                        current_target.has_target = true;
                    }
                }
                (Some(_), None) => {
                    // Current target is still valid and nothing else qualifies; keep it.
                }
            }

            detection.next_scan_time = now + detection.scan_interval;
        },
    );
}
