use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::chunk::TerrainCostTable;

impl config_core::Config for NavigationConfig {
    const FILE_NAME: &'static str = "navigation.ron";
}

/// Singleton navigation + combat-AI tuning data, loaded once at startup and
/// immutable thereafter. Grouped into named sub-configs hung off one
/// `Resource`, rather than one flat struct.
#[derive(Debug, Clone, Serialize, Deserialize, Resource)]
pub struct NavigationConfig {
    pub world: WorldConfig,
    pub streaming: StreamingConfig,
    pub pathfinding: PathfindingConfig,
    pub flow_field: FlowFieldConfig,
    pub combat: CombatConfig,
    pub terrain_costs: TerrainCostTable,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            streaming: StreamingConfig::default(),
            pathfinding: PathfindingConfig::default(),
            flow_field: FlowFieldConfig::default(),
            combat: CombatConfig::default(),
            terrain_costs: TerrainCostTable::default(),
        }
    }
}

/// World constants named in `spec.md` §3 ("World constants").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub cell_size: f32,
    pub chunk_cell_count: i32,
    pub agent_radius: f32,
    pub ground_layer: u32,
    pub unwalkable_layer: u32,
    pub max_slope_angle: f32,
    pub bake_raycast_height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            chunk_cell_count: 32,
            agent_radius: 0.4,
            ground_layer: 0x0001,
            unwalkable_layer: 0x0002,
            max_slope_angle: 45.0,
            bake_raycast_height: 10.0,
        }
    }
}

/// Streaming ring radii and per-frame transition budget (`spec.md` §4.1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingConfig {
    pub active_ring_radius: i32,
    pub ghost_ring_radius: i32,
    pub max_chunk_transitions_per_frame: usize,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            active_ring_radius: 2,
            ghost_ring_radius: 4,
            max_chunk_transitions_per_frame: 4,
        }
    }
}

/// A* queueing, stuck-detection, and repath tuning (`spec.md` §4.3–§4.4,
/// §9 hysteresis constants).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathfindingConfig {
    pub max_requests_per_frame: usize,
    pub repath_cooldown_secs: f32,
    pub stuck_distance_threshold: f32,
    pub max_stuck_count: u32,
    pub stuck_check_interval_secs: f32,
    pub arrival_threshold: f32,
}

impl Default for PathfindingConfig {
    fn default() -> Self {
        Self {
            max_requests_per_frame: 8,
            repath_cooldown_secs: 0.5,
            stuck_distance_threshold: 0.1,
            max_stuck_count: 3,
            stuck_check_interval_secs: 0.5,
            arrival_threshold: 0.25,
        }
    }
}

/// Flow field lifetime and registry tuning (`spec.md` §4.5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowFieldConfig {
    pub field_expiry_secs: f32,
    pub max_fields_built_per_frame: usize,
}

impl Default for FlowFieldConfig {
    fn default() -> Self {
        Self {
            field_expiry_secs: 10.0,
            max_fields_built_per_frame: 2,
        }
    }
}

/// Threat scan, slot, and attack tuning (`spec.md` §4.7–§4.10).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConfig {
    pub target_switch_hysteresis: f32,
    pub ranged_slot_total: u32,
    pub scan_interval_default_secs: f32,
    pub out_of_combat_regen_delay_secs: f32,
    pub out_of_combat_regen_per_sec: f32,
    pub hit_state_duration_secs: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            target_switch_hysteresis: 15.0,
            ranged_slot_total: 8,
            scan_interval_default_secs: 0.2,
            out_of_combat_regen_delay_secs: 5.0,
            out_of_combat_regen_per_sec: 2.0,
            hit_state_duration_secs: 0.3,
        }
    }
}
