//! Stage 8: Movers — A*, macro, and flow-field followers (`spec.md` §4.6),
//! plus the movement-event transition detector that rides alongside them.
//! All three followers share the kinematic stepping below: turn toward the
//! desired direction at `turn_speed`, scale forward speed by how well
//! aligned the unit already is, flatten onto the ground plane unless the
//! unit flies.

pub mod astar_follower;
pub mod flow_follower;
pub mod macro_follower;
pub mod movement_events;

use bevy::prelude::*;

pub(crate) fn transform_forward(transform: &Transform) -> Vec3 {
    transform.rotation * Vec3::NEG_Z
}

pub(crate) fn ground_flatten(v: Vec3, is_flying: bool) -> Vec3 {
    if is_flying {
        v
    } else {
        Vec3::new(v.x, 0.0, v.z)
    }
}

pub(crate) fn rotate_toward(current: Vec3, desired: Vec3, turn_speed: f32, dt: f32) -> Vec3 {
    if desired.length_squared() < 1e-10 {
        return current;
    }
    let desired = desired.normalize();
    let current = if current.length_squared() < 1e-10 {
        desired
    } else {
        current.normalize()
    };
    let t = (turn_speed * dt).clamp(0.0, 1.0);
    current.slerp(desired, t)
}

pub(crate) struct KinematicStep {
    pub new_position: Vec3,
    pub new_forward: Vec3,
}

/// Shared per-frame kinematics for all three followers.
///
/// `alignment_floor` is `0.25` for A*/macro followers and `0.5` for the
/// flow-field follower (`spec.md` §4.6); `speed_scale` lets the A* follower
/// slow into its final waypoint.
pub(crate) fn kinematic_step(
    transform: &Transform,
    desired_dir: Vec3,
    is_flying: bool,
    turn_speed: f32,
    speed: f32,
    alignment_floor: f32,
    speed_scale: f32,
    dt: f32,
) -> KinematicStep {
    let current_forward = ground_flatten(transform_forward(transform), is_flying);
    let desired_dir = ground_flatten(desired_dir, is_flying);
    let new_forward = rotate_toward(current_forward, desired_dir, turn_speed, dt);

    let alignment = if new_forward.length_squared() > 1e-10 && desired_dir.length_squared() > 1e-10 {
        new_forward
            .normalize()
            .dot(desired_dir.normalize())
            .clamp(alignment_floor, 1.0)
    } else {
        alignment_floor
    };

    let new_position = transform.translation + new_forward * speed * alignment * speed_scale * dt;
    KinematicStep {
        new_position,
        new_forward,
    }
}

pub(crate) fn apply_heading(transform: &mut Transform, new_forward: Vec3) {
    if new_forward.length_squared() > 1e-8 {
        transform.rotation = Quat::from_rotation_arc(Vec3::NEG_Z, new_forward.normalize());
    }
}
