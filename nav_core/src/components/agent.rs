//! Navigation-only agent components: movement, permissions, path state, and
//! the one-shot request/result tags that thread between stages.

use bevy::prelude::*;

/// Kinematic movement tuning + follower bookkeeping (`spec.md` §3).
#[derive(Component, Debug, Clone, Copy)]
pub struct UnitMovement {
    pub speed: f32,
    pub turn_speed: f32,
    pub turn_distance: f32,
    pub current_waypoint_index: usize,
    pub is_following_path: bool,
    pub prev_is_following_path: bool,
}

impl Default for UnitMovement {
    fn default() -> Self {
        Self {
            speed: 4.0,
            turn_speed: 8.0,
            turn_distance: 0.5,
            current_waypoint_index: 0,
            is_following_path: false,
            prev_is_following_path: false,
        }
    }
}

/// Which terrain layers an agent may walk on and whether it ignores slope.
#[derive(Component, Debug, Clone, Copy)]
pub struct UnitLayerPermissions {
    pub walkable_layers: u8,
    pub cost_layer_weights: u8,
    pub is_flying: bool,
}

impl Default for UnitLayerPermissions {
    fn default() -> Self {
        Self {
            walkable_layers: 0xFF,
            cost_layer_weights: 0,
            is_flying: false,
        }
    }
}

/// The navigation mode an agent is currently operating under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavMode {
    #[default]
    Idle,
    AStar,
    FlowField,
    MacroOnly,
}

/// Destination intent and dispatcher bookkeeping.
#[derive(Component, Debug, Clone, Copy)]
pub struct AgentNavigation {
    pub destination: Vec3,
    pub last_known_position: Vec3,
    pub mode: NavMode,
    /// Quantized destination hash this agent's flow field (if any) is keyed
    /// on. Only meaningful while `mode == FlowField`.
    pub destination_hash: u64,
    /// Absolute simulation time (seconds) before which a repath is withheld.
    pub repath_cooldown: f32,
    pub stuck_timer: f32,
    pub arrival_threshold: f32,
    pub has_destination: bool,
    pub macro_path_done: bool,
}

impl Default for AgentNavigation {
    fn default() -> Self {
        Self {
            destination: Vec3::ZERO,
            last_known_position: Vec3::ZERO,
            mode: NavMode::Idle,
            destination_hash: 0,
            repath_cooldown: 0.0,
            stuck_timer: 0.0,
            arrival_threshold: 1.5,
            has_destination: false,
            macro_path_done: false,
        }
    }
}

/// Poor-man's cycle detector: if an agent nominally following a path hasn't
/// moved between checks, count it as stuck.
#[derive(Component, Debug, Clone, Copy)]
pub struct StuckDetection {
    pub last_checked_position: Vec3,
    pub next_check_time: f32,
    pub check_interval: f32,
    pub stuck_distance_threshold: f32,
    pub stuck_count: u32,
    pub max_stuck_count: u32,
}

impl Default for StuckDetection {
    fn default() -> Self {
        Self {
            last_checked_position: Vec3::ZERO,
            next_check_time: 0.0,
            check_interval: 0.5,
            stuck_distance_threshold: 0.1,
            stuck_count: 0,
            max_stuck_count: 3,
        }
    }
}

/// Ordered single-chunk/multi-chunk A* waypoints, world-space cell centers.
/// Non-empty iff `is_following_path && mode == AStar`.
#[derive(Component, Debug, Clone, Default)]
pub struct PathWaypoints(pub Vec<Vec3>);

/// Ordered macro (chunk-center) waypoints, non-empty iff `mode ==
/// MacroOnly`.
#[derive(Component, Debug, Clone, Default)]
pub struct MacroWaypoints(pub Vec<Vec3>);

/// A pending pathfinding request. Inserted by Command Intake or the
/// Dispatcher, consumed and removed by the A* stage.
#[derive(Component, Debug, Clone, Copy)]
pub struct PathRequest {
    pub start: Vec3,
    pub end: Vec3,
    pub priority: i32,
    pub request_time: f32,
}

/// One-shot: A* produced a usable path this frame.
#[derive(Component, Debug, Clone, Copy)]
pub struct PathfindingSuccess;

/// One-shot: A* could not produce a path this frame.
#[derive(Component, Debug, Clone, Copy)]
pub struct PathfindingFailed;

/// One-shot: stuck detection requests an elevated-priority repath.
#[derive(Component, Debug, Clone, Copy)]
pub struct NeedsRepath;

/// External move order. Removed once Command Intake has consumed it.
#[derive(Component, Debug, Clone, Copy)]
pub struct NavigationMoveCommand {
    pub destination: Vec3,
    pub priority: i32,
}

/// External stop order. Removed once Command Intake has consumed it.
#[derive(Component, Debug, Clone, Copy)]
pub struct NavigationStopCommand;

/// Marks an agent as sampling a shared flow field for movement each frame.
#[derive(Component, Debug, Clone, Copy)]
pub struct FlowFieldFollower;

/// One-shot, visible for exactly one frame after `is_following_path` goes
/// `0 -> 1`.
#[derive(Component, Debug, Clone, Copy)]
pub struct StartedMoving;

/// One-shot, visible for exactly one frame after `is_following_path` goes
/// `1 -> 0`.
#[derive(Component, Debug, Clone, Copy)]
pub struct StoppedMoving;
