//! Navigation + combat-AI pipeline: a deterministic, data-oriented frame
//! loop over a streamable, chunked 2.5-D world (`spec.md` §1).
#![deny(clippy::all, clippy::pedantic)]
#![allow(missing_docs)]

use bevy::prelude::*;
use game_core::config::NavigationConfig;
use game_core::schedule::NavSystemSet;

pub mod combat;
pub mod command_intake;
pub mod components;
pub mod dispatcher;
pub mod flow_field;
pub mod late_cleanup;
pub mod movers;
pub mod path_success;
pub mod pathfinding;
pub mod resources;
pub mod streaming;

pub mod prelude {
    pub use crate::components::agent::*;
    pub use crate::components::combat::*;
    pub use crate::components::flow_field::*;
    pub use crate::components::streaming::*;
    pub use crate::resources::*;
    pub use crate::NavigationPlugin;
}

use combat::{ai_decision, ally_ping, damage, melee_slots, threat_scan};
use flow_field::{builder, sampler};
use movers::{astar_follower, flow_follower, macro_follower, movement_events};
use resources::{AllyPingQueue, ChunkIndex, ChunkTables, FlowFieldIndex, LineOfSightSet, SampledFlowDirections};
use streaming::{anchor_tracker, chunk_manager};

/// Wires every stage of the navigation + combat-AI pipeline into a single
/// `NavSystemSet`-ordered chain, one system group per subsystem
/// (`spec.md` §5 "Per-frame order").
pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NavigationConfig>()
            .init_resource::<ChunkIndex>()
            .init_resource::<ChunkTables>()
            .init_resource::<FlowFieldIndex>()
            .init_resource::<AllyPingQueue>()
            .init_resource::<LineOfSightSet>()
            .init_resource::<SampledFlowDirections>();

        NavSystemSet::configure_sets(app);

        app.add_systems(
            Update,
            (anchor_tracker::anchor_tracker_system, chunk_manager::desired_state_system, chunk_manager::sync_chunk_existence_system)
                .chain()
                .in_set(NavSystemSet::Streaming),
        )
        .add_systems(Update, chunk_manager::apply_chunk_transitions_system.in_set(NavSystemSet::Bake))
        .add_systems(Update, command_intake::command_intake_system.in_set(NavSystemSet::CommandIntake))
        .add_systems(
            Update,
            (threat_scan::line_of_sight_system, threat_scan::score_targets_system)
                .chain()
                .in_set(NavSystemSet::ThreatScan),
        )
        .add_systems(
            Update,
            (ally_ping::enqueue_ally_pings_system, ally_ping::adopt_ally_pings_system)
                .chain()
                .in_set(NavSystemSet::AllyPing),
        )
        .add_systems(
            Update,
            (melee_slots::release_slots_system, melee_slots::acquire_slots_system)
                .chain()
                .in_set(NavSystemSet::MeleeSlots),
        )
        .add_systems(Update, ai_decision::ai_decision_system.in_set(NavSystemSet::AiDecision))
        .add_systems(
            Update,
            (dispatcher::dispatcher_system, dispatcher::repath_system)
                .chain()
                .in_set(NavSystemSet::Dispatch),
        )
        .add_systems(Update, pathfinding::astar_dispatch_system.in_set(NavSystemSet::AStar))
        .add_systems(Update, path_success::path_success_handler_system.in_set(NavSystemSet::PathSuccess))
        .add_systems(Update, builder::build_flow_fields_system.in_set(NavSystemSet::FlowField))
        .add_systems(Update, sampler::sample_flow_fields_system.in_set(NavSystemSet::FlowSample))
        .add_systems(
            Update,
            (
                astar_follower::astar_follower_system,
                macro_follower::macro_follower_system,
                flow_follower::flow_follower_system,
            )
                .in_set(NavSystemSet::Movers),
        )
        .add_systems(Update, movement_events::movement_events_system.in_set(NavSystemSet::MovementEvents))
        .add_systems(Update, damage::damage_system.in_set(NavSystemSet::Damage))
        .add_systems(
            Update,
            (damage::regen_system, damage::hit_recovery_system).in_set(NavSystemSet::HitRecovery),
        )
        .add_systems(Update, late_cleanup::late_cleanup_system.in_set(NavSystemSet::LateCleanup));
    }
}
