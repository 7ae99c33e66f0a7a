//! Optional combat-capable-agent components (`spec.md` §3, §4.7–§4.10).

use bevy::prelude::*;

#[derive(Component, Debug, Clone)]
pub struct UnitData {
    pub name: String,
    pub radius: f32,
    pub faction_id: u32,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct HealthComponent {
    pub current: f32,
    pub max: f32,
    /// Seconds since this unit last took damage; drives out-of-combat regen.
    pub time_since_last_damage: f32,
}

impl HealthComponent {
    #[must_use]
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            time_since_last_damage: f32::INFINITY,
        }
    }

    #[must_use]
    pub fn health_frac(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponKind {
    Melee,
    Ranged,
    RangedAoe,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub range: f32,
    pub damage_mult: f32,
    pub speed_mult: f32,
    pub detection_range: f32,
}

/// Attack cadence and damage bookkeeping.
#[derive(Component, Debug, Clone, Copy)]
pub struct AttackComponent {
    pub base_damage: f32,
    pub base_attack_speed: f32,
    pub last_attack_time: f32,
}

impl AttackComponent {
    #[must_use]
    pub fn new(base_damage: f32, base_attack_speed: f32) -> Self {
        Self {
            base_damage,
            base_attack_speed,
            // Initial value lets a freshly spawned unit attack immediately.
            last_attack_time: -cooldown_seconds(base_attack_speed, 1.0),
        }
    }

    #[must_use]
    pub fn cooldown(&self, speed_mult: f32) -> f32 {
        cooldown_seconds(self.base_attack_speed, speed_mult)
    }
}

#[must_use]
pub fn cooldown_seconds(base_attack_speed: f32, speed_mult: f32) -> f32 {
    1.0 / (base_attack_speed * speed_mult).max(0.01)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AIStateKind {
    #[default]
    Idle,
    Moving,
    Attacking,
    Hit,
    Dead,
}

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct AIState {
    pub state: AIStateKind,
    pub state_timer: f32,
}

impl AIState {
    pub fn transition(&mut self, next: AIStateKind) {
        if self.state != next {
            self.state = next;
            self.state_timer = 0.0;
        }
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct DetectionComponent {
    pub detection_radius: f32,
    pub chase_range: f32,
    pub ping_radius: f32,
    pub obstacle_layers: u32,
    pub scan_interval: f32,
    pub next_scan_time: f32,
}

impl Default for DetectionComponent {
    fn default() -> Self {
        Self {
            detection_radius: 15.0,
            chase_range: 25.0,
            ping_radius: 10.0,
            obstacle_layers: 0x0002,
            scan_interval: 0.2,
            next_scan_time: 0.0,
        }
    }
}

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct CurrentTarget {
    pub target_entity: Option<Entity>,
    pub last_known_position: Vec3,
    pub has_target: bool,
}

/// Per-target ring-slot counters (`spec.md` §4.8).
#[derive(Component, Debug, Clone, Copy)]
pub struct MeleeSlotComponent {
    pub current_melee: u32,
    pub current_ranged: u32,
    pub max_melee_slots: u32,
}

impl Default for MeleeSlotComponent {
    fn default() -> Self {
        Self {
            current_melee: 0,
            current_ranged: 0,
            max_melee_slots: 4,
        }
    }
}

/// Enableable: an attacker's reserved orbit slot around a target.
#[derive(Component, Debug, Clone, Copy)]
pub struct MeleeSlotAssignment {
    pub target_entity: Entity,
    pub slot_index: u32,
    pub total_slots: u32,
}

/// One-shot: this agent landed an attack this frame.
#[derive(Component, Debug, Clone, Copy)]
pub struct AttackHitEvent {
    pub hit_target: Entity,
    pub damage: f32,
}

/// One-shot: this agent received damage this frame.
#[derive(Component, Debug, Clone, Copy)]
pub struct DamageReceivedEvent {
    pub attacker: Entity,
    pub damage: f32,
}

/// Persistent once enabled; never removed.
#[derive(Component, Debug, Clone, Copy)]
pub struct DeadTag;
