//! Bounce sounds
//!
//! The manager owns the clip pool and decides what to play; the host's
//! [`AudioBackend`] does the actual output. A backend that fails once is
//! considered gone for the rest of the run.

use rand::Rng;

/// Default clip pitches (Hz)
pub const DEFAULT_TONES_HZ: [f64; 4] = [220.0, 330.0, 440.0, 550.0];
/// Default clip length
pub const DEFAULT_TONE_MS: u32 = 100;
pub const SAMPLE_RATE: u32 = 44_100;

/// Mono 16-bit PCM clip
#[derive(Debug, Clone, PartialEq)]
pub struct SoundClip {
    pub name: String,
    pub sample_rate: u32,
    pub samples: Vec<i16>,
}

impl SoundClip {
    /// Sine tone with a linear fade to silence
    pub fn tone(freq: f64, duration_ms: u32, sample_rate: u32) -> Self {
        let count = (duration_ms as u64 * sample_rate as u64 / 1000) as usize;
        let duration = duration_ms as f64 / 1000.0;
        let samples = (0..count)
            .map(|s| {
                let t = s as f64 / sample_rate as f64;
                let fade = 1.0 - t / duration;
                (32767.0 * (std::f64::consts::TAU * freq * t).sin() * fade) as i16
            })
            .collect();
        Self {
            name: format!("bounce_{freq:.0}hz"),
            sample_rate,
            samples,
        }
    }

    /// The generated pool used until the user supplies clips
    pub fn defaults() -> Vec<Self> {
        DEFAULT_TONES_HZ
            .iter()
            .map(|&f| Self::tone(f, DEFAULT_TONE_MS, SAMPLE_RATE))
            .collect()
    }
}

/// Host audio output
pub trait AudioBackend {
    /// Start playing a clip without blocking. `false` reports a failure.
    fn play(&mut self, clip: &SoundClip, volume: f32) -> bool;

    /// Release the device.
    fn shutdown(&mut self);
}

/// Clip pool plus playback policy
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    clips: Vec<SoundClip>,
    master_volume: f32,
    muted: bool,
    /// Set after the first backend failure
    failed: bool,
    shut_down: bool,
}

impl AudioManager {
    /// `None` means the device could not be opened; sounds are then skipped.
    pub fn new(backend: Option<Box<dyn AudioBackend>>) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend - bounce sounds disabled");
        }
        Self {
            backend,
            clips: SoundClip::defaults(),
            master_volume: 0.8,
            muted: false,
            failed: false,
            shut_down: false,
        }
    }

    /// Manager with no output at all
    pub fn silent() -> Self {
        Self::new(None)
    }

    /// Replace the pool with user clips. An empty set restores the defaults.
    pub fn set_clips(&mut self, clips: Vec<SoundClip>) {
        if clips.is_empty() {
            log::info!("No usable clips supplied, using default sounds");
            self.clips = SoundClip::defaults();
        } else {
            log::info!("Loaded {} sound clips", clips.len());
            self.clips = clips;
        }
    }

    pub fn clips(&self) -> &[SoundClip] {
        &self.clips
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Whether playback requests can still reach a device
    pub fn is_available(&self) -> bool {
        self.backend.is_some() && !self.failed && !self.shut_down
    }

    /// Play a random clip from the pool. Returns true if a clip was started.
    pub fn play_random<R: Rng>(&mut self, rng: &mut R) -> bool {
        let vol = self.effective_volume();
        if vol <= 0.0 || self.clips.is_empty() || !self.is_available() {
            return false;
        }
        let clip = &self.clips[rng.random_range(0..self.clips.len())];
        let Some(backend) = self.backend.as_mut() else {
            return false;
        };

        if backend.play(clip, vol) {
            true
        } else {
            log::warn!("Error playing '{}', disabling sounds", clip.name);
            self.failed = true;
            false
        }
    }

    /// Release the device. Safe to call any number of times.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        if let Some(backend) = self.backend.as_mut() {
            backend.shutdown();
            log::info!("Audio shut down");
        }
    }
}

impl Drop for AudioManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}
