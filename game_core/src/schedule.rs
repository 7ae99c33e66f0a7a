//! Global system scheduling and ordering
//!
//! Defines the per-frame stage chain every navigation and combat system
//! belongs to. All systems must be assigned to exactly one of these sets,
//! `.chain()`-ordered once at startup.

use bevy::prelude::*;

/// Authoritative per-frame stage order (`spec.md` §5):
/// `Streaming → Bake → CommandIntake → ThreatScan → AllyPing → MeleeSlots
/// → AiDecision → Dispatch → AStar → PathSuccess → FlowField → FlowSample
/// → Movers → MovementEvents → Damage → HitRecovery → LateCleanup`.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum NavSystemSet {
    /// Streaming Anchor Tracker + Chunk Manager desired-state pass.
    Streaming,
    /// Bake static data for chunks transitioning into `Active`/`Ghost`.
    Bake,
    /// Consume `NavigationMoveCommand` / `NavigationStopCommand`.
    CommandIntake,
    /// Snapshot live units, score candidates, apply LoS + hysteresis.
    ThreatScan,
    /// Propagate ally-ping adoption of a shared target.
    AllyPing,
    /// Acquire/release ring-slots around targets.
    MeleeSlots,
    /// Derive desired position, issue move/stop, fire attack events.
    AiDecision,
    /// Navigation dispatcher: stuck detection, macro handoff, repath.
    Dispatch,
    /// Single-chunk / multi-chunk / macro A* solve.
    AStar,
    /// Apply a completed path to the requester's waypoint queue.
    PathSuccess,
    /// Build or refresh flow fields for registered destinations.
    FlowField,
    /// Sample an agent's current cell vector from its flow field.
    FlowSample,
    /// Advance A*, macro, and flow-field followers.
    Movers,
    /// Emit `StartedMoving` / `StoppedMoving`.
    MovementEvents,
    /// Apply `DamageReceivedEvent`, transition health/state.
    Damage,
    /// Clear expired `Hit` state, drive out-of-combat regen.
    HitRecovery,
    /// Disable one-shot tags that lived for exactly one frame.
    LateCleanup,
}

impl NavSystemSet {
    /// Configure the global ordering for an app's `Update` schedule.
    pub fn configure_sets(app: &mut App) {
        app.configure_sets(
            Update,
            (
                NavSystemSet::Streaming,
                NavSystemSet::Bake,
                NavSystemSet::CommandIntake,
                NavSystemSet::ThreatScan,
                NavSystemSet::AllyPing,
                NavSystemSet::MeleeSlots,
                NavSystemSet::AiDecision,
                NavSystemSet::Dispatch,
                NavSystemSet::AStar,
                NavSystemSet::PathSuccess,
                NavSystemSet::FlowField,
                NavSystemSet::FlowSample,
                NavSystemSet::Movers,
                NavSystemSet::MovementEvents,
                NavSystemSet::Damage,
                NavSystemSet::HitRecovery,
                NavSystemSet::LateCleanup,
            )
                .chain(),
        );
    }
}

/// Re-export for convenience at call sites (`.in_set(Streaming)`).
pub use NavSystemSet::{
    AStar, AiDecision, AllyPing, Bake, CommandIntake, Damage, Dispatch, FlowField, FlowSample,
    HitRecovery, LateCleanup, MeleeSlots, MovementEvents, Movers, PathSuccess, Streaming,
    ThreatScan,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configure_sets_builds_without_panicking() {
        let mut app = App::new();
        NavSystemSet::configure_sets(&mut app);
        app.update();
    }
}
