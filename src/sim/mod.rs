//! Pet simulation module
//!
//! Everything that moves pets lives here. It is single-threaded and
//! host-agnostic:
//! - Fixed interval, velocities in px/tick
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - The host is reached only through `crate::ports`

pub mod boundary;
pub mod collision;
pub mod effects;
pub mod interaction;
pub mod scheduler;
pub mod state;
pub mod tick;
pub mod world;

pub use boundary::{BoundaryParams, BoundaryResult, resolve_boundary};
pub use collision::{Body, Contact, collide_pets, detect, resolve_collision};
pub use effects::{EffectPlan, EffectsDispatcher, Impact, plan};
pub use interaction::{CONTEXT_MENU, MenuEntry, PointerEvent, PointerResponse};
pub use scheduler::TickScheduler;
pub use state::{DragState, Pet, PetHandle, PetId, PetStore, Warp};
pub use tick::{TickReport, apply_forces, tick};
pub use world::World;
