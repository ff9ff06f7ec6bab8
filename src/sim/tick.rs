//! Fixed-interval simulation tick
//!
//! One call advances every free pet by one tick: forces, integration, screen
//! edges, pairwise collisions, feedback, and finally compaction.

use glam::DVec2;

use super::boundary::{BoundaryParams, resolve_boundary};
use super::collision::collide_pets;
use super::effects::Impact;
use super::state::{PetHandle, PetId};
use super::world::World;
use crate::audio::AudioManager;
use crate::ports::{Desktop, PetListSink};
use crate::settings::Settings;

/// External moves smaller than this are host rounding, not the user
const EXTERNAL_MOVE_TOLERANCE: f64 = 1.0;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Pets alive after compaction
    pub live: usize,
    /// Pets compacted away this tick
    pub removed: Vec<PetId>,
    pub boundary_impacts: u32,
    pub collisions: u32,
}

/// Advance the world by one tick
pub fn tick<D: Desktop, L: PetListSink>(
    world: &mut World,
    settings: &Settings,
    desktop: &mut D,
    audio: &mut AudioManager,
    listing: &mut L,
) -> TickReport {
    world.ticks += 1;
    let mut report = TickReport::default();

    // Windows closed behind our back
    for handle in world.store.handles() {
        let Some(pet) = world.store.get(handle) else {
            continue;
        };
        if pet.is_alive() && !desktop.surface_exists(pet.id) {
            log::info!("Window for pet {} is gone", pet.id);
            world.store.mark_dead(handle);
        }
    }

    let params = BoundaryParams {
        screen: desktop.screen_rect(settings.multi_monitor),
        bounce: settings.bounce_enabled.then_some(settings.bounce),
        vertical: settings.vertical_boundary_enabled,
    };

    let active: Vec<PetHandle> = world
        .store
        .handles()
        .filter(|&h| world.store.get(h).is_some_and(|p| p.is_simulated()))
        .collect();

    for &handle in &active {
        let impact = {
            let Some(pet) = world.store.get_mut(handle) else {
                continue;
            };
            let Some(velocity) = pet.velocity() else {
                continue;
            };

            if let Some(origin) = desktop.surface_origin(pet.id) {
                if origin.distance(pet.position) > EXTERNAL_MOVE_TOLERANCE {
                    pet.position = origin;
                }
            }

            let velocity = apply_forces(velocity, settings);

            let result = resolve_boundary(pet.position + velocity, pet.size(), velocity, &params);
            pet.position = result.position;
            pet.last_position = result.position;
            pet.set_velocity(result.velocity);
            result.impact
        };

        if impact {
            report.boundary_impacts += 1;
            world.effects.dispatch(
                Impact::Boundary(handle),
                settings,
                &mut world.store,
                desktop,
                audio,
                &mut world.rng,
            );
        }

    }

    if settings.collisions_enabled {
        let bounce = settings.collision_bounce();
        for (i, &a) in active.iter().enumerate() {
            for &b in &active[i + 1..] {
                let hit = match world.store.pair_mut(a, b) {
                    Some((pa, pb)) if pa.is_simulated() && pb.is_simulated() => {
                        collide_pets(pa, pb, bounce)
                    }
                    _ => false,
                };
                if hit {
                    report.collisions += 1;
                    world.effects.dispatch(
                        Impact::Collision(a, b),
                        settings,
                        &mut world.store,
                        desktop,
                        audio,
                        &mut world.rng,
                    );
                }
            }
        }
    }

    // After collisions, so warps started by either kind of impact count this tick
    for &handle in &active {
        if let Some(pet) = world.store.get_mut(handle) {
            world.effects.tick_warp(pet, desktop);
        }
    }

    for pet in world.store.iter().filter(|p| p.is_alive()) {
        desktop.move_surface(pet.id, pet.position);
    }

    let removed = world.store.compact();
    for pet in &removed {
        desktop.destroy_surface(pet.id);
    }
    if !removed.is_empty() || world.listing_dirty {
        listing.pets_changed(&world.store.listing());
        world.listing_dirty = false;
    }

    report.removed = removed.iter().map(|p| p.id).collect();
    report.live = world.store.live_count();
    log::trace!(
        "tick {}: live={} impacts={} collisions={}",
        world.ticks,
        report.live,
        report.boundary_impacts,
        report.collisions
    );
    report
}

/// Velocity a free pet would have after forces, before edges and collisions
pub fn apply_forces(velocity: DVec2, settings: &Settings) -> DVec2 {
    DVec2::new(velocity.x, velocity.y + settings.effective_gravity()) * settings.effective_friction()
}
