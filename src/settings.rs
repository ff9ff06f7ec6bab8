//! Physics and feedback settings
//!
//! A plain snapshot the host owns and hands to the simulation each tick.
//! Persisted as JSON next to the executable.

use std::fs;
use std::io::ErrorKind;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PetError, PetResult};

/// Accepted ranges (matching the control panel sliders)
pub const GRAVITY_RANGE: RangeInclusive<f64> = 0.1..=2.0;
pub const FRICTION_RANGE: RangeInclusive<f64> = 0.5..=1.0;
pub const BOUNCE_RANGE: RangeInclusive<f64> = 0.1..=0.95;
pub const SIZE_SCALE_RANGE: RangeInclusive<f64> = 0.5..=2.0;
pub const VOLUME_RANGE: RangeInclusive<f64> = 0.0..=1.0;

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Forces ===
    pub gravity_enabled: bool,
    /// Added to vertical velocity each tick (px/tick²)
    pub gravity_strength: f64,
    pub friction_enabled: bool,
    /// Multiplicative velocity decay per tick
    pub friction: f64,
    pub bounce_enabled: bool,
    /// Restitution for wall and pet-pet bounces
    pub bounce: f64,

    // === Spawning ===
    /// Applied to the base image when a pet spawns; existing pets keep their size
    pub size_scale: f64,

    // === Feedback ===
    pub sound_enabled: bool,
    pub warp_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f64,

    // === World ===
    /// Bound pets by the virtual desktop instead of the primary monitor
    pub multi_monitor: bool,
    pub collisions_enabled: bool,
    /// When off, pets may fall through the floor and out of the top
    pub vertical_boundary_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity_enabled: true,
            gravity_strength: 0.7,
            friction_enabled: true,
            friction: 0.95,
            bounce_enabled: true,
            bounce: 0.6,

            size_scale: 1.0,

            sound_enabled: true,
            warp_enabled: true,
            master_volume: 0.8,

            multi_monitor: false,
            collisions_enabled: true,
            vertical_boundary_enabled: true,
        }
    }
}

impl Settings {
    /// Reject values outside the tuned ranges.
    ///
    /// The simulation assumes every value it reads has passed through here.
    pub fn validate(&self) -> PetResult<()> {
        check("gravity_strength", self.gravity_strength, GRAVITY_RANGE, "[0.1, 2.0]")?;
        check("friction", self.friction, FRICTION_RANGE, "[0.5, 1.0]")?;
        check("bounce", self.bounce, BOUNCE_RANGE, "[0.1, 0.95]")?;
        check("size_scale", self.size_scale, SIZE_SCALE_RANGE, "[0.5, 2.0]")?;
        check("master_volume", self.master_volume, VOLUME_RANGE, "[0.0, 1.0]")?;
        Ok(())
    }

    /// Friction factor actually applied this tick (1.0 when disabled)
    pub fn effective_friction(&self) -> f64 {
        if self.friction_enabled { self.friction } else { 1.0 }
    }

    /// Gravity actually applied this tick (0.0 when disabled)
    pub fn effective_gravity(&self) -> f64 {
        if self.gravity_enabled {
            self.gravity_strength
        } else {
            0.0
        }
    }

    /// Restitution for pet-pet collisions
    pub fn collision_bounce(&self) -> f64 {
        if self.bounce_enabled {
            self.bounce
        } else {
            crate::consts::FALLBACK_COLLISION_BOUNCE
        }
    }

    /// Load settings from a JSON file.
    ///
    /// A missing file yields defaults; anything unreadable, malformed or out of
    /// range is an error.
    pub fn load(path: &Path) -> PetResult<Self> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(PetError::SettingsIo {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let settings: Self =
            serde_json::from_str(&json).map_err(|source| PetError::SettingsFormat {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> PetResult<()> {
        let json =
            serde_json::to_string_pretty(self).map_err(|source| PetError::SettingsFormat {
                path: path.to_path_buf(),
                source,
            })?;
        fs::write(path, json).map_err(|source| PetError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

fn check(
    name: &'static str,
    value: f64,
    range: RangeInclusive<f64>,
    label: &'static str,
) -> PetResult<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(PetError::InvalidSetting {
            name,
            value,
            range: label,
        })
    }
}
