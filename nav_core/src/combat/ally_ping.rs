//! Stage 5 (part 2): Ally Ping — a unit that just acquired a target
//! broadcasts it to same-faction units within `ping_radius` (`spec.md`
//! §4.7). The queue itself is cleared at the start of the Threat Scan pass
//! (see `threat_scan::line_of_sight_system`).

use bevy::prelude::*;

use crate::components::combat::{AIState, CurrentTarget, DeadTag, DetectionComponent, UnitData};
use crate::resources::{AllyPing, AllyPingQueue};

/// A unit whose state timer is still within 1.5 frames counts as having
/// "just acquired" its target this frame.
pub fn enqueue_ally_pings_system(
    time: Res<Time>,
    mut ally_pings: ResMut<AllyPingQueue>,
    units: Query<(&Transform, &UnitData, &DetectionComponent, &AIState, &CurrentTarget), Without<DeadTag>>,
) {
    let dt = time.delta_secs();
    for (transform, unit, detection, ai_state, current_target) in &units {
        if !current_target.has_target {
            continue;
        }
        let Some(target_entity) = current_target.target_entity else {
            continue;
        };
        if ai_state.state_timer >= 1.5 * dt.max(f32::EPSILON) {
            continue;
        }

        ally_pings.pings.push(AllyPing {
            pinger_position: transform.translation,
            ping_radius: detection.ping_radius,
            faction_id: unit.faction_id,
            target_entity,
            target_position: current_target.last_known_position,
        });
    }
}

/// Every targetless unit within a same-faction ping's radius adopts that
/// ping's target, unless it is the ping's own target.
pub fn adopt_ally_pings_system(
    ally_pings: Res<AllyPingQueue>,
    mut units: Query<(Entity, &Transform, &UnitData, &mut CurrentTarget), Without<DeadTag>>,
) {
    if ally_pings.pings.is_empty() {
        return;
    }

    for (entity, transform, unit, mut current_target) in &mut units {
        if current_target.has_target {
            continue;
        }
        for ping in &ally_pings.pings {
            if ping.faction_id != unit.faction_id || ping.target_entity == entity {
                continue;
            }
            if transform.translation.distance(ping.pinger_position) <= ping.ping_radius {
                current_target.target_entity = Some(ping.target_entity);
                current_target.last_known_position = ping.target_position;
                current_target.has_target = true;
                break;
            }
        }
    }
}
