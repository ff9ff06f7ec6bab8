//! Application shell
//!
//! [`PetApp`] owns the world, the settings snapshot, the audio manager and the
//! tick registration. The host event loop drives it from a single thread: it
//! forwards pointer events and menu choices, polls [`PetApp::run_due_tick`]
//! whenever it wakes, and calls [`PetApp::shutdown`] on exit.

use std::time::{Duration, Instant};

use crate::audio::{AudioManager, SoundClip};
use crate::consts::{MAX_UPLOAD_EDGE, TICK_INTERVAL_MS};
use crate::error::{PetError, PetResult};
use crate::ports::{Desktop, PetListSink};
use crate::settings::Settings;
use crate::sim::{
    MenuEntry, PetId, PointerEvent, PointerResponse, TickReport, TickScheduler, World, tick,
};
use crate::sprite::SpriteImage;

pub struct PetApp {
    world: World,
    settings: Settings,
    audio: AudioManager,
    scheduler: TickScheduler,
    /// Image new pets are cut from
    base_image: Option<SpriteImage>,
    running: bool,
}

impl PetApp {
    pub fn new(settings: Settings, mut audio: AudioManager, seed: u64) -> PetResult<Self> {
        settings.validate()?;
        audio.set_master_volume(settings.master_volume as f32);
        Ok(Self {
            world: World::new(seed),
            settings,
            audio,
            scheduler: TickScheduler::new(Duration::from_millis(TICK_INTERVAL_MS)),
            base_image: None,
            running: true,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings snapshot. Takes effect on the next tick; existing
    /// pets keep their size.
    pub fn set_settings(&mut self, settings: Settings) -> PetResult<()> {
        settings.validate()?;
        self.audio.set_master_volume(settings.master_volume as f32);
        self.settings = settings;
        Ok(())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Use `image` for every pet spawned from now on, shrunk to fit the upload limit
    pub fn set_base_image(&mut self, image: SpriteImage) {
        let fitted = image.fit_within(MAX_UPLOAD_EDGE);
        log::info!(
            "Base image set: {}x{} (uploaded {}x{})",
            fitted.width(),
            fitted.height(),
            image.width(),
            image.height()
        );
        self.base_image = Some(fitted);
    }

    pub fn base_image(&self) -> Option<&SpriteImage> {
        self.base_image.as_ref()
    }

    /// Replace the bounce clip pool (empty restores the generated tones)
    pub fn set_clips(&mut self, clips: Vec<SoundClip>) {
        self.audio.set_clips(clips);
    }

    /// Spawn a pet from the base image and make sure the animation is running
    pub fn spawn<D: Desktop>(&mut self, desktop: &mut D, now: Instant) -> PetResult<PetId> {
        if !self.running {
            return Err(PetError::Spawn("application is shutting down".into()));
        }
        let Some(base) = self.base_image.as_ref() else {
            let message = "Please upload an image first";
            desktop.report_error(message);
            return Err(PetError::Spawn(message.into()));
        };

        let id = self.world.spawn(
            base,
            self.settings.size_scale,
            self.settings.multi_monitor,
            desktop,
        )?;
        self.scheduler.start(now);
        Ok(id)
    }

    /// Remove every pet now. The tick stops on its next run.
    pub fn remove_all<D: Desktop, L: PetListSink>(&mut self, desktop: &mut D, listing: &mut L) {
        self.world.remove_all(desktop, listing);
    }

    pub fn pointer(&mut self, id: PetId, event: PointerEvent) -> Option<PointerResponse> {
        self.world.pointer(id, event)
    }

    pub fn menu(&mut self, id: PetId, entry: MenuEntry) -> bool {
        self.world.menu(id, entry)
    }

    /// How long the host may sleep before calling [`Self::run_due_tick`]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_due(now)
    }

    /// Run one tick if it is due, then re-arm or cancel the registration
    pub fn run_due_tick<D: Desktop, L: PetListSink>(
        &mut self,
        desktop: &mut D,
        listing: &mut L,
        now: Instant,
    ) -> Option<TickReport> {
        if !self.running || !self.scheduler.is_due(now) {
            return None;
        }
        let report = self.step(desktop, listing);
        if report.live == 0 {
            self.scheduler.stop();
        } else {
            self.scheduler.rearm(now, Instant::now());
        }
        Some(report)
    }

    /// Advance one tick regardless of the schedule
    pub fn step<D: Desktop, L: PetListSink>(
        &mut self,
        desktop: &mut D,
        listing: &mut L,
    ) -> TickReport {
        tick(
            &mut self.world,
            &self.settings,
            desktop,
            &mut self.audio,
            listing,
        )
    }

    /// Stop ticking, destroy every pet and release audio. Safe to call again.
    pub fn shutdown<D: Desktop, L: PetListSink>(&mut self, desktop: &mut D, listing: &mut L) {
        if !self.running {
            return;
        }
        self.running = false;
        self.scheduler.stop();
        self.world.remove_all(desktop, listing);
        self.audio.shutdown();
        log::info!("Shut down after {} ticks", self.world.ticks);
    }
}
