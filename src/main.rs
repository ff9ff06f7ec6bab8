//! Plinko Pets headless runner
//!
//! Drives the simulation against an in-memory desktop so the physics can be
//! watched from the log without a windowing host:
//!
//! ```text
//! RUST_LOG=debug plinko-pets [settings.json] [ticks]
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use glam::DVec2;

use plinko_pets::audio::{AudioBackend, AudioManager, SoundClip};
use plinko_pets::ports::{Desktop, PetListSink, PetListing, Rect};
use plinko_pets::sim::PetId;
use plinko_pets::sprite::SpriteImage;
use plinko_pets::{PetApp, PetResult, Settings};

const DEFAULT_TICKS: u64 = 400;
const PET_COUNT: usize = 4;
const PRIMARY: DVec2 = DVec2::new(1920.0, 1080.0);

/// One primary monitor plus a second one to its right
#[derive(Default)]
struct HeadlessDesktop {
    windows: BTreeMap<PetId, DVec2>,
}

impl Desktop for HeadlessDesktop {
    fn screen_rect(&self, multi_monitor: bool) -> Rect {
        if multi_monitor {
            Rect::new(DVec2::ZERO, DVec2::new(PRIMARY.x * 2.0, PRIMARY.y))
        } else {
            Rect::new(DVec2::ZERO, PRIMARY)
        }
    }

    fn create_surface(&mut self, id: PetId, geometry: Rect, _sprite: &SpriteImage) -> bool {
        self.windows.insert(id, geometry.min);
        true
    }

    fn destroy_surface(&mut self, id: PetId) {
        self.windows.remove(&id);
    }

    fn surface_exists(&self, id: PetId) -> bool {
        self.windows.contains_key(&id)
    }

    fn surface_origin(&self, id: PetId) -> Option<DVec2> {
        self.windows.get(&id).copied()
    }

    fn move_surface(&mut self, id: PetId, origin: DVec2) {
        if let Some(pos) = self.windows.get_mut(&id) {
            *pos = origin;
        }
    }

    fn replace_sprite(&mut self, _id: PetId, _image: &SpriteImage) -> bool {
        true
    }

    fn report_error(&mut self, message: &str) {
        log::error!("{message}");
    }
}

/// Logs each clip instead of playing it
struct LogAudio;

impl AudioBackend for LogAudio {
    fn play(&mut self, clip: &SoundClip, volume: f32) -> bool {
        log::debug!("♪ {} at {:.0}%", clip.name, volume * 100.0);
        true
    }

    fn shutdown(&mut self) {}
}

struct LogListing;

impl PetListSink for LogListing {
    fn pets_changed(&mut self, pets: &[PetListing]) {
        for (i, row) in pets.iter().enumerate() {
            log::info!("{}", row.label(i));
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Plinko Pets (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> PetResult<()> {
    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(&PathBuf::from(path))?,
        None => Settings::default(),
    };
    let ticks = args
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut desktop = HeadlessDesktop::default();
    let mut listing = LogListing;
    let mut app = PetApp::new(settings, AudioManager::new(Some(Box::new(LogAudio))), seed)?;
    app.set_base_image(SpriteImage::solid(64, 64, [255, 160, 0, 255])?);

    for _ in 0..PET_COUNT {
        app.spawn(&mut desktop, Instant::now())?;
    }

    let mut ran = 0;
    while ran < ticks {
        let Some(wait) = app.time_until_due(Instant::now()) else {
            break;
        };
        std::thread::sleep(wait);
        if let Some(report) = app.run_due_tick(&mut desktop, &mut listing, Instant::now()) {
            ran += 1;
            if report.boundary_impacts + report.collisions > 0 {
                log::debug!(
                    "tick {ran}: {} wall hits, {} collisions",
                    report.boundary_impacts,
                    report.collisions
                );
            }
        }
    }

    let rows = app.world().store.listing();
    match serde_json::to_string_pretty(&rows) {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("Could not serialize pet list: {e}"),
    }
    log::info!(
        "{} overrun ticks, {:?}",
        app.scheduler().overruns(),
        app.world().effects.stats()
    );

    app.shutdown(&mut desktop, &mut listing);
    Ok(())
}
