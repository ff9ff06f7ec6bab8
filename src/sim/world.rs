//! Simulation world: the entity store plus the per-run state around it
//!
//! Everything that mutates pets outside a tick (spawning, pointer input, menu
//! commands, reset) goes through here.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::effects::EffectsDispatcher;
use super::interaction::{self, MenuEntry, PointerEvent, PointerResponse};
use super::state::{Pet, PetId, PetStore};
use crate::consts::{SPAWN_VELOCITY_X, SPAWN_VELOCITY_Y, SPRITE_PADDING};
use crate::error::{PetError, PetResult};
use crate::ports::{Desktop, PetListSink, Rect};
use crate::settings::SIZE_SCALE_RANGE;
use crate::sprite::{Sprite, SpriteImage};

pub struct World {
    pub store: PetStore,
    pub effects: EffectsDispatcher,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub ticks: u64,
    /// Pet list changed outside compaction (spawn)
    pub(crate) listing_dirty: bool,
}

impl World {
    pub fn new(seed: u64) -> Self {
        Self {
            store: PetStore::new(),
            effects: EffectsDispatcher::new(),
            rng: Pcg32::seed_from_u64(seed),
            ticks: 0,
            listing_dirty: false,
        }
    }

    /// Create a pet from a base image at a random spot with a small random drift.
    ///
    /// On failure the host has already been told via `report_error`; live pets
    /// are unaffected.
    pub fn spawn<D: Desktop>(
        &mut self,
        base: &SpriteImage,
        size_scale: f64,
        multi_monitor: bool,
        desktop: &mut D,
    ) -> PetResult<PetId> {
        if !SIZE_SCALE_RANGE.contains(&size_scale) {
            return Err(PetError::InvalidSetting {
                name: "size_scale",
                value: size_scale,
                range: "[0.5, 2.0]",
            });
        }

        let image = base.scaled(size_scale);
        let size = DVec2::new(
            image.width() as f64 + SPRITE_PADDING,
            image.height() as f64 + SPRITE_PADDING,
        );

        let screen = desktop.screen_rect(multi_monitor);
        let room = (screen.size() - size).max(DVec2::ZERO);
        let position = screen.min
            + DVec2::new(
                self.rng.random_range(0.0..=room.x).floor(),
                self.rng.random_range(0.0..=room.y).floor(),
            );
        let velocity = DVec2::new(
            self.rng
                .random_range(SPAWN_VELOCITY_X.0..=SPAWN_VELOCITY_X.1),
            self.rng
                .random_range(SPAWN_VELOCITY_Y.0..=SPAWN_VELOCITY_Y.1),
        );

        let id = self.store.next_pet_id();
        if !desktop.create_surface(id, Rect::from_origin_size(position, size), &image) {
            let message = format!("Failed to create pet {id}");
            log::error!("{message}");
            desktop.report_error(&message);
            return Err(PetError::Spawn(message));
        }

        self.store
            .add(Pet::new(id, position, velocity, size, Sprite::new(image)));
        self.listing_dirty = true;
        log::info!(
            "Pet {id} launched at ({:.0}, {:.0}), {}x{}",
            position.x,
            position.y,
            size.x,
            size.y
        );
        Ok(id)
    }

    /// Remove every pet and its window immediately
    pub fn remove_all<D: Desktop, L: PetListSink>(&mut self, desktop: &mut D, listing: &mut L) {
        let removed = self.store.remove_all();
        for pet in &removed {
            desktop.destroy_surface(pet.id);
        }
        self.listing_dirty = false;
        listing.pets_changed(&[]);
        log::info!("All pets removed ({})", removed.len());
    }

    pub fn pointer(&mut self, id: PetId, event: PointerEvent) -> Option<PointerResponse> {
        interaction::handle_pointer(&mut self.store, id, event)
    }

    pub fn menu(&mut self, id: PetId, entry: MenuEntry) -> bool {
        interaction::apply_menu_entry(&mut self.store, id, entry, &mut self.rng)
    }

    pub fn live_count(&self) -> usize {
        self.store.live_count()
    }
}
