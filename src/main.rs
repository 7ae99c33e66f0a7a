#![deny(unsafe_code)]
#![deny(clippy::expect_used)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use config_core::ConfigLoader;
use game_core::config::NavigationConfig;
use nav_core::NavigationPlugin;

/// Headless navigation + combat-AI simulation core.
///
/// Loads `navigation.ron` from the working directory or the user config
/// directory if present, falling back to built-in defaults, then runs the
/// pipeline under `MinimalPlugins`' default schedule-runner pacing.
fn main() {
    let config = ConfigLoader::new().load::<NavigationConfig>().unwrap_or_else(|err| {
        tracing::warn!(%err, "no navigation.ron found, using built-in defaults");
        NavigationConfig::default()
    });

    App::new()
        .add_plugins((MinimalPlugins, LogPlugin::default()))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .insert_resource(config)
        .add_plugins(NavigationPlugin)
        .run();
}
