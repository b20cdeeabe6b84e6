//! World-matrix composition.
//!
//! Column-vector convention: for a body with ancestors `root … parent`,
//!
//! `M = P_root · … · P_parent · R_orbit · T(radius · X) · R_spin · S`
//!
//! where `P = R_orbit · T` is an ancestor's orbital placement. Ancestor spin and
//! scale never reach the children.

use glam::{Mat4, Vec3};

use crate::body::{Body, BodyId};
use crate::world::World;

/// Rotation by the body's orbit angle followed by translation along local +X.
pub fn orbital_placement(body: &Body) -> Mat4 {
    body.orbit_axis.rotation(body.orbit_angle)
        * Mat4::from_translation(Vec3::new(body.orbit_radius, 0.0, 0.0))
}

/// Composed model matrix for `id`, or identity for an id not in `world`.
pub fn world_matrix(world: &World, id: BodyId) -> Mat4 {
    let Some(body) = world.get(id) else {
        return Mat4::IDENTITY;
    };

    // Parents precede children, so this walk terminates.
    let mut chain = Vec::new();
    let mut cursor = body.parent;
    while let Some(pid) = cursor {
        let Some(parent) = world.get(pid) else { break };
        chain.push(parent);
        cursor = parent.parent;
    }

    let ancestors = chain
        .iter()
        .rev()
        .fold(Mat4::IDENTITY, |acc, p| acc * orbital_placement(p));

    ancestors
        * orbital_placement(body)
        * body.spin_axis.rotation(body.spin_angle)
        * Mat4::from_scale(body.scale)
}
