use crate::world::World;

/// Advances every body's spin and orbit angle by `rate * dt`.
///
/// Rates are read on each call, so a rate changed between frames takes effect on
/// the next one.
pub fn advance(world: &mut World, dt: f32) {
    for body in world.bodies_mut() {
        body.spin_angle += body.spin_rate * dt;
        body.orbit_angle += body.orbit_rate * dt;
    }
}
