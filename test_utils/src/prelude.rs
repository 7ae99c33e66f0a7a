// Re-export commonly used testing utilities
pub use crate::minimal_app::MinimalBevyApp;
pub use crate::nav_app::create_test_app;
pub use crate::world_helpers::{
    create_test_ground, spawn_test_world, validate_world_state, EntityBuilder, ScenarioBuilder,
    TestRng,
};

// Re-export commonly used Bevy types for testing
pub use bevy::prelude::*;
pub use bevy_rapier3d::prelude::*;
pub use rand::prelude::*;

// Disambiguate Real type to use Bevy's version
pub use bevy::time::Real;

/// Default test seed for reproducible tests
pub const DEFAULT_TEST_SEED: u64 = 42;
/// Default tolerance for float comparisons
pub const DEFAULT_TOLERANCE: f32 = 0.01;

/// Macro for creating simple deterministic-world test scenarios
#[macro_export]
macro_rules! test_scenario {
    ($name:ident, $seed:expr, $setup:expr) => {
        #[test]
        fn $name() {
            let mut world = spawn_test_world($seed);
            let _entities = $setup(&mut world);
            validate_world_state(&mut world).expect("World validation failed");
        }
    };
}

/// Helper for creating deterministic test environments
pub fn create_deterministic_test_env(seed: u64) -> MinimalBevyApp {
    let mut app = MinimalBevyApp::with_physics();
    app.app
        .world_mut()
        .insert_resource(TestRng(rand::rngs::StdRng::seed_from_u64(seed)));
    app
}

/// Common test assertions
pub mod assertions {
    use super::*;

    /// Assert that an entity exists and has the expected component
    pub fn assert_entity_has_component<T: Component>(world: &World, entity: Entity) {
        assert!(
            world.entity(entity).contains::<T>(),
            "Entity {:?} missing component {}",
            entity,
            std::any::type_name::<T>()
        );
    }

    /// Assert that a transform is within expected bounds
    pub fn assert_transform_in_bounds(transform: &Transform, min: Vec3, max: Vec3) {
        assert!(
            transform.translation.x >= min.x && transform.translation.x <= max.x,
            "Transform X {} not in bounds [{}, {}]",
            transform.translation.x,
            min.x,
            max.x
        );
        assert!(
            transform.translation.z >= min.z && transform.translation.z <= max.z,
            "Transform Z {} not in bounds [{}, {}]",
            transform.translation.z,
            min.z,
            max.z
        );
    }

    /// Assert that two Vec3 values are approximately equal
    pub fn assert_vec3_approx_eq(a: Vec3, b: Vec3, tolerance: f32) {
        let diff = (a - b).length();
        assert!(
            diff <= tolerance,
            "Vec3 values not approximately equal: {a:?} vs {b:?} (diff: {diff})"
        );
    }
}
