use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use game_core::config::NavigationConfig;
use nav_core::NavigationPlugin;

/// Headless app wired with the full navigation + combat-AI pipeline, the
/// same minimal plugin set `MinimalBevyApp` uses plus `TimePlugin` (the
/// pipeline reads `Res<Time>` every stage) and `TransformPlugin`.
#[must_use]
pub fn create_test_app() -> App {
    let mut app = App::new();

    app.add_plugins((
        TaskPoolPlugin::default(),
        TimePlugin,
        TransformPlugin,
        AssetPlugin::default(),
        ScheduleRunnerPlugin::run_once(),
        RapierPhysicsPlugin::<NoUserData>::default(),
    ));

    app.insert_resource(NavigationConfig::default());
    app.add_plugins(NavigationPlugin);

    app
}
