//! Plinko Pets - bouncing desktop pets
//!
//! Core modules:
//! - `sim`: Per-tick simulation (entity store, boundaries, collisions, drag/throw, effects)
//! - `ports`: Traits the host windowing layer implements
//! - `sprite`: Owned sprite buffers and the impact warp variant
//! - `audio`: Bounce clip pool and playback downgrade
//! - `settings`: Live-readable configuration snapshot
//! - `app`: Single-threaded owner the host event loop drives

pub mod app;
pub mod audio;
pub mod error;
pub mod ports;
pub mod settings;
pub mod sim;
pub mod sprite;

pub use app::PetApp;
pub use error::{PetError, PetResult};
pub use settings::Settings;

/// Fixed tuning values
pub mod consts {
    /// Interval between ticks (~66 Hz). Velocities are in pixels per tick.
    pub const TICK_INTERVAL_MS: u64 = 15;

    /// Pre-bounce speed on a clamped axis above which a wall hit counts as an impact
    pub const IMPACT_SPEED_THRESHOLD: f64 = 2.0;
    /// Vertical speed below which a floor bounce comes to rest
    pub const FLOOR_SETTLE_SPEED: f64 = 0.5;

    /// Collision triggers when center distance < (r1 + r2) * this
    pub const COLLISION_TRIGGER_FACTOR: f64 = 0.8;
    /// Restitution used for pet-pet collisions while bounce is disabled
    pub const FALLBACK_COLLISION_BOUNCE: f64 = 0.2;

    /// Release velocity multiplier after a drag
    pub const THROW_AMPLIFICATION: f64 = 5.0;
    /// Vertical velocity applied on double-click
    pub const JUMP_VELOCITY: f64 = -20.0;
    /// "Throw around" horizontal velocity range
    pub const MENU_THROW_X: (i32, i32) = (-30, 30);
    /// "Throw around" vertical velocity range
    pub const MENU_THROW_Y: (i32, i32) = (-35, -15);

    /// Initial horizontal velocity range for a fresh pet
    pub const SPAWN_VELOCITY_X: (f64, f64) = (-3.0, 3.0);
    /// Initial vertical velocity range for a fresh pet
    pub const SPAWN_VELOCITY_Y: (f64, f64) = (-4.0, 0.0);

    /// Ticks a warped sprite stays deformed
    pub const WARP_FRAMES: u32 = 5;

    /// Transparent margin added around the sprite on each axis
    pub const SPRITE_PADDING: f64 = 20.0;
    /// Uploaded images are fitted inside a square of this edge
    pub const MAX_UPLOAD_EDGE: u32 = 200;
}
