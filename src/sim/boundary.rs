//! Screen-edge clamping and reflection
//!
//! Pets are axis-aligned boxes here. Each axis is handled on its own: a box
//! leaving the screen is clamped to the edge and that axis's velocity is
//! reflected (bounce on) or zeroed (bounce off).

use glam::DVec2;

use crate::consts::{FLOOR_SETTLE_SPEED, IMPACT_SPEED_THRESHOLD};
use crate::ports::Rect;

/// Inputs that do not change between pets within a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryParams {
    pub screen: Rect,
    /// Restitution, or `None` to stop dead on the clamped axis
    pub bounce: Option<f64>,
    /// Floor and ceiling checks; when off pets can leave vertically
    pub vertical: bool,
}

/// Corrected state after boundary resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryResult {
    pub position: DVec2,
    pub velocity: DVec2,
    /// A clamped axis was hit faster than the impact threshold
    pub impact: bool,
    /// The floor was touched this tick
    pub on_floor: bool,
}

/// Which edge of an axis was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Min,
    Max,
}

/// Clamp one axis. Returns the hit edge, if any.
fn clamp_axis(pos: &mut f64, extent: f64, min: f64, max: f64) -> Option<Edge> {
    let mut hit = None;
    if *pos + extent > max {
        *pos = max - extent;
        hit = Some(Edge::Max);
    }
    // Taller/wider than the screen: pin to the min edge
    if *pos < min {
        *pos = min;
        hit = Some(Edge::Min);
    }
    hit
}

fn reflect(v: f64, bounce: Option<f64>) -> f64 {
    match bounce {
        Some(k) => -v * k,
        None => 0.0,
    }
}

/// Resolve a proposed position against the screen rectangle.
pub fn resolve_boundary(
    position: DVec2,
    size: DVec2,
    velocity: DVec2,
    params: &BoundaryParams,
) -> BoundaryResult {
    let mut pos = position;
    let mut vel = velocity;
    let mut impact = false;
    let mut on_floor = false;

    if clamp_axis(&mut pos.x, size.x, params.screen.min.x, params.screen.max.x).is_some() {
        impact |= velocity.x.abs() > IMPACT_SPEED_THRESHOLD;
        vel.x = reflect(velocity.x, params.bounce);
    }

    if params.vertical {
        if let Some(edge) = clamp_axis(&mut pos.y, size.y, params.screen.min.y, params.screen.max.y)
        {
            impact |= velocity.y.abs() > IMPACT_SPEED_THRESHOLD;
            vel.y = reflect(velocity.y, params.bounce);
            if edge == Edge::Max {
                on_floor = true;
                if vel.y.abs() < FLOOR_SETTLE_SPEED {
                    vel.y = 0.0;
                }
            }
        }
    }

    BoundaryResult {
        position: pos,
        velocity: vel,
        impact,
        on_floor,
    }
}
