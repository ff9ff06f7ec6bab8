//! Pet-pet collision detection and response
//!
//! Every pet collides as a circle centered on its bounding box with radius
//! (width + height) / 4. Response is an equal-split impulse along the contact
//! normal followed by a positional push that removes the overlap.

use glam::DVec2;

use super::state::Pet;
use crate::consts::COLLISION_TRIGGER_FACTOR;

/// Normal used when two centers coincide exactly
const COINCIDENT_NORMAL: DVec2 = DVec2::new(0.0, -1.0);

/// The slice of a pet the resolver works on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Top-left of the bounding box
    pub position: DVec2,
    pub size: DVec2,
    pub velocity: DVec2,
}

impl Body {
    pub fn center(&self) -> DVec2 {
        self.position + self.size * 0.5
    }

    pub fn radius(&self) -> f64 {
        (self.size.x + self.size.y) / 4.0
    }
}

/// Geometry of an overlapping pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from the first center toward the second
    pub normal: DVec2,
    pub distance: f64,
    /// Sum of radii minus center distance
    pub overlap: f64,
}

/// Check whether two bodies are close enough to collide
pub fn detect(a: &Body, b: &Body) -> Option<Contact> {
    let delta = b.center() - a.center();
    let distance = delta.length();
    let radii = a.radius() + b.radius();

    if distance >= radii * COLLISION_TRIGGER_FACTOR {
        return None;
    }

    let normal = if distance > 0.0 {
        delta / distance
    } else {
        COINCIDENT_NORMAL
    };

    Some(Contact {
        normal,
        distance,
        overlap: radii - distance,
    })
}

/// Resolve a pair. Returns the corrected bodies, or `None` when they do not
/// touch or are already separating.
pub fn resolve_collision(a: &Body, b: &Body, bounce: f64) -> Option<(Body, Body)> {
    let contact = detect(a, b)?;
    let n = contact.normal;

    let vel_along_normal = (b.velocity - a.velocity).dot(n);
    if vel_along_normal > 0.0 {
        return None;
    }

    let impulse = -(1.0 + bounce) * vel_along_normal / 2.0;
    let push = n * (contact.overlap / 2.0);

    let a_out = Body {
        position: a.position - push,
        velocity: a.velocity - n * impulse,
        ..*a
    };
    let b_out = Body {
        position: b.position + push,
        velocity: b.velocity + n * impulse,
        ..*b
    };
    Some((a_out, b_out))
}

fn body_of(pet: &Pet) -> Option<Body> {
    Some(Body {
        position: pet.position,
        size: pet.size(),
        velocity: pet.velocity()?,
    })
}

/// Collide two live pets in place. Returns true when a response was applied.
pub fn collide_pets(a: &mut Pet, b: &mut Pet, bounce: f64) -> bool {
    let (Some(body_a), Some(body_b)) = (body_of(a), body_of(b)) else {
        return false;
    };
    let Some((out_a, out_b)) = resolve_collision(&body_a, &body_b, bounce) else {
        return false;
    };

    a.position = out_a.position;
    a.set_velocity(out_a.velocity);
    b.position = out_b.position;
    b.set_velocity(out_b.velocity);
    true
}
