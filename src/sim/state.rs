//! Pet records and the entity store
//!
//! Each pet is one cohesive record; the store is the sole owner of all of them.

use glam::DVec2;
use serde::Serialize;

use crate::ports::PetListing;
use crate::sprite::Sprite;

/// Stable identity of a pet (and of its host window) for its whole life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PetId(pub u64);

impl std::fmt::Display for PetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position of a pet in the store.
///
/// Valid only until the next [`PetStore::compact`]; re-resolve through
/// [`PetStore::resolve`] instead of keeping one across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PetHandle(pub usize);

/// Pointer interaction state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    /// Physics drives the pet
    Free,
    /// Pointer is holding the pet at `anchor` (offset from its origin)
    Dragging { anchor: DVec2 },
}

/// Transient impact deformation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Warp {
    pub active: bool,
    pub frames_remaining: u32,
}

impl Warp {
    pub fn start(&mut self, frames: u32) {
        self.active = true;
        self.frames_remaining = frames;
    }

    /// Count down one tick. Returns true on the tick the warp expires.
    pub fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.frames_remaining = self.frames_remaining.saturating_sub(1);
        if self.frames_remaining == 0 {
            self.active = false;
            return true;
        }
        false
    }
}

/// A live pet
#[derive(Debug, Clone)]
pub struct Pet {
    pub id: PetId,
    /// Top-left of the bounding box (screen px)
    pub position: DVec2,
    /// Origin at the end of the previous tick or drag event
    pub last_position: DVec2,
    pub drag: DragState,
    pub warp: Warp,
    velocity: DVec2,
    size: DVec2,
    alive: bool,
    sprite: Sprite,
}

impl Pet {
    pub fn new(id: PetId, position: DVec2, velocity: DVec2, size: DVec2, sprite: Sprite) -> Self {
        Self {
            id,
            position,
            last_position: position,
            drag: DragState::Free,
            warp: Warp::default(),
            velocity,
            size,
            alive: true,
            sprite,
        }
    }

    /// Velocity in px/tick; `None` once the pet is marked dead
    pub fn velocity(&self) -> Option<DVec2> {
        self.alive.then_some(self.velocity)
    }

    /// Overwrite the velocity. Ignored for dead pets.
    pub fn set_velocity(&mut self, velocity: DVec2) {
        if self.alive {
            self.velocity = velocity;
        }
    }

    /// Width and height, fixed at spawn
    pub fn size(&self) -> DVec2 {
        self.size
    }

    pub fn center(&self) -> DVec2 {
        self.position + self.size * 0.5
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Alive and not held by the pointer
    pub fn is_simulated(&self) -> bool {
        self.alive && !self.is_dragging()
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    fn kill(&mut self) {
        self.alive = false;
        self.velocity = DVec2::ZERO;
        self.drag = DragState::Free;
    }
}

/// Owns every pet; order is spawn order.
#[derive(Debug, Default)]
pub struct PetStore {
    pets: Vec<Pet>,
    next_id: u64,
}

impl PetStore {
    pub fn new() -> Self {
        Self {
            pets: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate an id for a pet about to be created
    pub fn next_pet_id(&mut self) -> PetId {
        let id = PetId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        id
    }

    pub fn add(&mut self, pet: Pet) -> PetHandle {
        self.pets.push(pet);
        PetHandle(self.pets.len() - 1)
    }

    pub fn get(&self, handle: PetHandle) -> Option<&Pet> {
        self.pets.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: PetHandle) -> Option<&mut Pet> {
        self.pets.get_mut(handle.0)
    }

    /// Two distinct pets mutably at once
    pub fn pair_mut(&mut self, a: PetHandle, b: PetHandle) -> Option<(&mut Pet, &mut Pet)> {
        if a.0 == b.0 || a.0 >= self.pets.len() || b.0 >= self.pets.len() {
            return None;
        }
        if a.0 < b.0 {
            let (left, right) = self.pets.split_at_mut(b.0);
            Some((&mut left[a.0], &mut right[0]))
        } else {
            let (left, right) = self.pets.split_at_mut(a.0);
            Some((&mut right[0], &mut left[b.0]))
        }
    }

    /// Current handle of a pet, if it is still stored (alive or pending removal)
    pub fn resolve(&self, id: PetId) -> Option<PetHandle> {
        self.pets.iter().position(|p| p.id == id).map(PetHandle)
    }

    /// Mark a pet for removal at the end of the tick.
    /// Returns false for stale handles and already-dead pets.
    pub fn mark_dead(&mut self, handle: PetHandle) -> bool {
        match self.pets.get_mut(handle.0) {
            Some(pet) if pet.alive => {
                pet.kill();
                true
            }
            _ => false,
        }
    }

    /// Drop every dead pet, keeping survivors in order.
    ///
    /// The only place handles shift; call once per tick after all per-pet work.
    pub fn compact(&mut self) -> Vec<Pet> {
        if self.pets.iter().all(|p| p.alive) {
            return Vec::new();
        }
        let (alive, dead): (Vec<Pet>, Vec<Pet>) =
            std::mem::take(&mut self.pets).into_iter().partition(|p| p.alive);
        self.pets = alive;
        dead
    }

    /// Remove everything immediately (reset)
    pub fn remove_all(&mut self) -> Vec<Pet> {
        std::mem::take(&mut self.pets)
    }

    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.pets.iter().filter(|p| p.alive).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pet> {
        self.pets.iter()
    }

    pub fn handles(&self) -> impl Iterator<Item = PetHandle> + use<> {
        (0..self.pets.len()).map(PetHandle)
    }

    /// Ordered rows for the active-pets list
    pub fn listing(&self) -> Vec<PetListing> {
        self.pets
            .iter()
            .filter(|p| p.alive)
            .map(|p| PetListing {
                id: p.id,
                width: p.size.x,
                height: p.size.y,
            })
            .collect()
    }
}
