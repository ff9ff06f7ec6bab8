//! Pointer interaction: drag, throw, jump and the context menu
//!
//! Events address pets by [`PetId`] (the window they arrived on) and are resolved
//! against the store on arrival, so events for removed or dying pets fall through
//! as no-ops.

use glam::DVec2;
use rand::Rng;

use super::state::{DragState, PetId, PetStore};
use crate::consts::{JUMP_VELOCITY, MENU_THROW_X, MENU_THROW_Y, THROW_AMPLIFICATION};

/// Raw pointer input on a pet's window, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button down
    Press { pointer: DVec2 },
    /// Pointer moved with the primary button held
    Move { pointer: DVec2 },
    /// Primary button up
    Release,
    DoubleClick,
    SecondaryClick,
}

/// Context menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Remove,
    ThrowAround,
    /// Bring the control panel forward (host-side only)
    ShowSettings,
}

pub const CONTEXT_MENU: [MenuEntry; 3] = [
    MenuEntry::Remove,
    MenuEntry::ThrowAround,
    MenuEntry::ShowSettings,
];

impl MenuEntry {
    pub fn label(&self) -> &'static str {
        match self {
            MenuEntry::Remove => "Remove This Pet",
            MenuEntry::ThrowAround => "Throw Around",
            MenuEntry::ShowSettings => "Adjust Settings",
        }
    }
}

/// What the host should do after an event was applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerResponse {
    /// State updated; nothing to show
    Handled,
    /// The pet was dragged; move its window here now
    MoveTo(DVec2),
    /// Show this context menu at the pointer
    ShowMenu(&'static [MenuEntry]),
}

/// Apply a pointer event. Returns `None` when the pet is gone or dying.
pub fn handle_pointer(
    store: &mut PetStore,
    id: PetId,
    event: PointerEvent,
) -> Option<PointerResponse> {
    let handle = store.resolve(id)?;
    let pet = store.get_mut(handle).filter(|p| p.is_alive())?;

    let response = match event {
        PointerEvent::Press { pointer } => {
            pet.drag = DragState::Dragging {
                anchor: pointer - pet.position,
            };
            pet.last_position = pet.position;
            pet.set_velocity(DVec2::ZERO);
            log::debug!("Pet {id} picked up");
            PointerResponse::Handled
        }
        PointerEvent::Move { pointer } => {
            let DragState::Dragging { anchor } = pet.drag else {
                return Some(PointerResponse::Handled);
            };
            let new_position = pointer - anchor;
            // Per-event displacement, so fast flicks throw harder than a tick could
            pet.set_velocity(new_position - pet.last_position);
            pet.last_position = new_position;
            pet.position = new_position;
            PointerResponse::MoveTo(new_position)
        }
        PointerEvent::Release => {
            if pet.is_dragging() {
                pet.drag = DragState::Free;
                if let Some(v) = pet.velocity() {
                    pet.set_velocity(v * THROW_AMPLIFICATION);
                }
                log::debug!("Pet {id} thrown with {:?}", pet.velocity());
            }
            PointerResponse::Handled
        }
        PointerEvent::DoubleClick => {
            // The press that opened the double-click left the pet held; a jump
            // ends the drag so the following release does not throw it.
            pet.drag = DragState::Free;
            if let Some(v) = pet.velocity() {
                pet.set_velocity(DVec2::new(v.x, JUMP_VELOCITY));
            }
            PointerResponse::Handled
        }
        PointerEvent::SecondaryClick => PointerResponse::ShowMenu(&CONTEXT_MENU),
    };
    Some(response)
}

/// Apply a context-menu choice. Returns false for stale pets.
pub fn apply_menu_entry<R: Rng>(
    store: &mut PetStore,
    id: PetId,
    entry: MenuEntry,
    rng: &mut R,
) -> bool {
    let Some(handle) = store.resolve(id) else {
        return false;
    };
    if !store.get(handle).is_some_and(|p| p.is_alive()) {
        return false;
    }

    match entry {
        MenuEntry::Remove => {
            log::info!("Pet {id} removed");
            store.mark_dead(handle)
        }
        MenuEntry::ThrowAround => {
            let velocity = DVec2::new(
                rng.random_range(MENU_THROW_X.0..=MENU_THROW_X.1) as f64,
                rng.random_range(MENU_THROW_Y.0..=MENU_THROW_Y.1) as f64,
            );
            if let Some(pet) = store.get_mut(handle) {
                pet.set_velocity(velocity);
            }
            true
        }
        MenuEntry::ShowSettings => true,
    }
}
