//! Stage 4: Command Intake — translate external move/stop orders into
//! navigation intent and an initial `PathRequest` (`spec.md` §4.2).

use bevy::prelude::*;

use crate::components::agent::{
    AgentNavigation, FlowFieldFollower, NavMode, NavigationMoveCommand, NavigationStopCommand,
    PathRequest, UnitMovement,
};

pub fn command_intake_system(
    mut commands: Commands,
    time: Res<Time>,
    mut moves: Query<
        (Entity, &Transform, &mut AgentNavigation, &NavigationMoveCommand),
        Without<NavigationStopCommand>,
    >,
    mut stops: Query<(Entity, &mut AgentNavigation, &mut UnitMovement), With<NavigationStopCommand>>,
) {
    let now = time.elapsed_secs();

    for (entity, transform, mut nav, cmd) in &mut moves {
        nav.destination = cmd.destination;
        nav.has_destination = true;
        nav.mode = NavMode::AStar;
        nav.repath_cooldown = 0.0;
        nav.macro_path_done = false;

        let mut entity_commands = commands.entity(entity);
        entity_commands.remove::<FlowFieldFollower>();
        entity_commands.insert(PathRequest {
            start: transform.translation,
            end: cmd.destination,
            priority: cmd.priority,
            request_time: now,
        });
        entity_commands.remove::<NavigationMoveCommand>();
    }

    for (entity, mut nav, mut movement) in &mut stops {
        nav.has_destination = false;
        nav.mode = NavMode::Idle;
        movement.is_following_path = false;
        movement.current_waypoint_index = 0;

        let mut entity_commands = commands.entity(entity);
        entity_commands.remove::<FlowFieldFollower>();
        entity_commands.remove::<PathRequest>();
        entity_commands.remove::<NavigationStopCommand>();
        entity_commands.remove::<NavigationMoveCommand>();
    }
}
