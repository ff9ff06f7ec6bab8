//! Impact feedback: bounce sounds and the transient sprite warp
//!
//! [`plan`] is the pure decision; [`EffectsDispatcher`] carries it out against
//! the audio manager and the host, and remembers feature downgrades.

use rand::Rng;

use super::state::{Pet, PetHandle, PetStore};
use crate::audio::AudioManager;
use crate::consts::WARP_FRAMES;
use crate::ports::Desktop;
use crate::settings::Settings;

/// Something hit something
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    /// A significant screen-edge hit
    Boundary(PetHandle),
    /// Two pets collided
    Collision(PetHandle, PetHandle),
}

impl Impact {
    fn pets(&self) -> impl Iterator<Item = PetHandle> {
        let (a, b) = match *self {
            Impact::Boundary(a) => (a, None),
            Impact::Collision(a, b) => (a, Some(b)),
        };
        std::iter::once(a).chain(b)
    }
}

/// Feedback requested for one impact
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EffectPlan {
    pub play_sound: bool,
    pub warp: Vec<PetHandle>,
}

/// Decide the feedback for an impact given the feature toggles
pub fn plan(impact: Impact, sound_enabled: bool, warp_enabled: bool) -> EffectPlan {
    EffectPlan {
        play_sound: sound_enabled,
        warp: if warp_enabled {
            impact.pets().collect()
        } else {
            Vec::new()
        },
    }
}

/// Feedback counters for one dispatcher lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectStats {
    pub sounds: u64,
    pub warps: u64,
}

/// Executes effect plans and tracks the warp downgrade
#[derive(Debug, Default)]
pub struct EffectsDispatcher {
    warp_failed: bool,
    stats: EffectStats,
}

impl EffectsDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> EffectStats {
        self.stats
    }

    /// Whether the host has refused a sprite swap this run
    pub fn warp_disabled(&self) -> bool {
        self.warp_failed
    }

    pub fn dispatch<D: Desktop, R: Rng>(
        &mut self,
        impact: Impact,
        settings: &Settings,
        store: &mut PetStore,
        desktop: &mut D,
        audio: &mut AudioManager,
        rng: &mut R,
    ) {
        let plan = plan(
            impact,
            settings.sound_enabled,
            settings.warp_enabled && !self.warp_failed,
        );

        if plan.play_sound && audio.play_random(rng) {
            self.stats.sounds += 1;
        }

        for handle in plan.warp {
            if let Some(pet) = store.get_mut(handle) {
                self.start_warp(pet, desktop);
            }
        }
    }

    /// A pet already warped keeps its running countdown; a new impact does not restart it.
    fn start_warp<D: Desktop>(&mut self, pet: &mut Pet, desktop: &mut D) {
        if !pet.is_alive() || pet.warp.active || self.warp_failed {
            return;
        }
        let id = pet.id;
        if desktop.replace_sprite(id, pet.sprite_mut().warped()) {
            pet.warp.start(WARP_FRAMES);
            self.stats.warps += 1;
        } else {
            log::warn!("Sprite swap failed for pet {id}, disabling warp effect");
            self.warp_failed = true;
        }
    }

    /// Advance a pet's warp countdown, restoring the original sprite on expiry
    pub fn tick_warp<D: Desktop>(&mut self, pet: &mut Pet, desktop: &mut D) {
        if !pet.warp.tick() {
            return;
        }
        if !desktop.replace_sprite(pet.id, pet.sprite().original()) {
            log::warn!(
                "Could not restore sprite for pet {}, disabling warp effect",
                pet.id
            );
            self.warp_failed = true;
        }
    }
}
