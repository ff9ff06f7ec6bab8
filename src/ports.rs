//! Port traits - the boundary between the simulation and the windowing host.
//!
//! ```text
//!   host event loop ──▶ PetApp ──▶ sim (store, step, resolvers)
//!          ▲                          │
//!          └──── Desktop / PetListSink / AudioBackend ◀──┘
//! ```
//!
//! The host implements these traits over its toolkit of choice (one borderless,
//! transparent, top-most window per pet). Everything here is called on the
//! single thread that also delivers pointer events and ticks.

use glam::DVec2;
use serde::Serialize;

use crate::sim::PetId;
use crate::sprite::SpriteImage;

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

impl Rect {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Rectangle from an origin and a size
    pub fn from_origin_size(origin: DVec2, size: DVec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }
}

/// Windowing side of the host.
pub trait Desktop {
    /// Bounds of the primary monitor, or of the whole virtual desktop when
    /// `multi_monitor` is set.
    fn screen_rect(&self, multi_monitor: bool) -> Rect;

    /// Create the window for a new pet. `false` means the host could not.
    fn create_surface(&mut self, id: PetId, geometry: Rect, sprite: &SpriteImage) -> bool;

    /// Destroy a pet's window. Unknown ids are ignored.
    fn destroy_surface(&mut self, id: PetId);

    /// Whether the pet's window still exists (the user or OS may have closed it).
    fn surface_exists(&self, id: PetId) -> bool;

    /// Current on-screen origin; the window manager may have moved it.
    fn surface_origin(&self, id: PetId) -> Option<DVec2>;

    /// Move the pet's window to the corrected origin.
    fn move_surface(&mut self, id: PetId, origin: DVec2);

    /// Swap the rendered sprite. `false` reports a failed swap.
    fn replace_sprite(&mut self, id: PetId, image: &SpriteImage) -> bool;

    /// Tell the user something went wrong (e.g. a failed spawn).
    fn report_error(&mut self, message: &str);
}

/// One row of the active-pets list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PetListing {
    pub id: PetId,
    pub width: f64,
    pub height: f64,
}

impl PetListing {
    /// Display label for the `index`-th (0-based) row
    pub fn label(&self, index: usize) -> String {
        format!("Pet {}: {}x{}", index + 1, self.width, self.height)
    }
}

/// Receives the ordered pet list whenever it changes.
pub trait PetListSink {
    /// Called after a tick's compaction only when the list changed (a pet was
    /// spawned or removed), and once with an empty list on reset. There is no
    /// per-tick refresh.
    fn pets_changed(&mut self, pets: &[PetListing]);
}

/// Sink that drops every update
impl PetListSink for () {
    fn pets_changed(&mut self, _pets: &[PetListing]) {}
}
