//! Nuke blast expansion.

use hecs::World;

use stardrift_core::components::{Collider, Expander};

/// Grow each blast's radius toward its final size.
/// The interpolation factor saturates at 1.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (expander, collider)) in world.query_mut::<(&Expander, &mut Collider)>() {
        let t = (expander.rate * dt).clamp(0.0, 1.0);
        collider.radius += (expander.final_radius - collider.radius) * t;
    }
}
