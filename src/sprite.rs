//! Owned sprite buffers
//!
//! Decoding and displaying images is the host's job; the core only needs the
//! pixels it hands back for sprite swaps, plus the handful of transforms that
//! decide a pet's size and its warped look.

use crate::error::{PetError, PetResult};

/// Exponent of the radial bulge (>1 magnifies the center)
const BULGE_POWER: f64 = 1.6;

/// Straight RGBA8 image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl SpriteImage {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> PetResult<Self> {
        if width == 0 || height == 0 {
            return Err(PetError::InvalidSprite(format!(
                "zero-sized image {width}x{height}"
            )));
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(PetError::InvalidSprite(format!(
                "{width}x{height} needs {expected} bytes, got {}",
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Single-color image, handy for hosts without a decoder and for tests
    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> PetResult<Self> {
        let rgba = color
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self::new(width, height, rgba)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.rgba
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.rgba[i],
            self.rgba[i + 1],
            self.rgba[i + 2],
            self.rgba[i + 3],
        ]
    }

    /// Shrink proportionally so neither edge exceeds `max_edge`.
    /// Images already small enough are returned unchanged.
    pub fn fit_within(&self, max_edge: u32) -> Self {
        if self.width <= max_edge && self.height <= max_edge {
            return self.clone();
        }
        let ratio = (max_edge as f64 / self.width as f64).min(max_edge as f64 / self.height as f64);
        self.resample(
            scaled_edge(self.width, ratio),
            scaled_edge(self.height, ratio),
        )
    }

    /// Scale by the user size factor (nearest neighbour)
    pub fn scaled(&self, factor: f64) -> Self {
        if factor == 1.0 {
            return self.clone();
        }
        self.resample(
            scaled_edge(self.width, factor),
            scaled_edge(self.height, factor),
        )
    }

    fn resample(&self, width: u32, height: u32) -> Self {
        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            let sy = (y as u64 * self.height as u64 / height as u64) as u32;
            for x in 0..width {
                let sx = (x as u64 * self.width as u64 / width as u64) as u32;
                rgba.extend_from_slice(&self.pixel(sx, sy));
            }
        }
        Self {
            width,
            height,
            rgba,
        }
    }

    /// Radial bulge around the image center, used while a pet is squashed by an impact
    pub fn bulged(&self) -> Self {
        let cx = self.width as f64 / 2.0;
        let cy = self.height as f64 / 2.0;
        let radius = cx.min(cy);
        let mut rgba = Vec::with_capacity(self.rgba.len());

        for y in 0..self.height {
            for x in 0..self.width {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                let dist = (dx * dx + dy * dy).sqrt();

                let (sx, sy) = if dist > 0.0 && dist < radius {
                    let t = (dist / radius).powf(BULGE_POWER) * radius / dist;
                    (cx + dx * t, cy + dy * t)
                } else {
                    (x as f64 + 0.5, y as f64 + 0.5)
                };
                let sx = (sx.floor() as i64).clamp(0, self.width as i64 - 1) as u32;
                let sy = (sy.floor() as i64).clamp(0, self.height as i64 - 1) as u32;
                rgba.extend_from_slice(&self.pixel(sx, sy));
            }
        }

        Self {
            width: self.width,
            height: self.height,
            rgba,
        }
    }
}

fn scaled_edge(edge: u32, factor: f64) -> u32 {
    ((edge as f64 * factor) as u32).max(1)
}

/// A pet's sprite: the original plus its lazily built warped variant.
///
/// Owned by the pet record and dropped with it.
#[derive(Debug, Clone)]
pub struct Sprite {
    original: SpriteImage,
    warped: Option<SpriteImage>,
}

impl Sprite {
    pub fn new(original: SpriteImage) -> Self {
        Self {
            original,
            warped: None,
        }
    }

    pub fn original(&self) -> &SpriteImage {
        &self.original
    }

    /// Warped variant, built on first use
    pub fn warped(&mut self) -> &SpriteImage {
        self.warped.get_or_insert_with(|| self.original.bulged())
    }
}
