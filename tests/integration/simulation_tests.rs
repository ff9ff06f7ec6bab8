//! Tick-level behavior against the recording ports.

use std::time::Instant;

use glam::DVec2;
use plinko_pets::audio::AudioManager;
use plinko_pets::ports::Desktop;
use plinko_pets::sim::{Impact, MenuEntry, PointerEvent, PointerResponse, World, tick};
use plinko_pets::sprite::SpriteImage;
use plinko_pets::{PetApp, PetError, Settings};

use crate::mock_desktop::{
    MockDesktop, RecordingListing, gradient, place, recording_audio,
};

const EPS: f64 = 1e-9;

fn assert_close(actual: DVec2, expected: DVec2) {
    assert!(
        (actual - expected).abs().max_element() < EPS,
        "expected {expected:?}, got {actual:?}"
    );
}

/// Gravity only: friction off so velocities are easy to follow
fn no_friction() -> Settings {
    Settings {
        friction_enabled: false,
        ..Settings::default()
    }
}

/// No forces at all
fn drifting() -> Settings {
    Settings {
        gravity_enabled: false,
        friction_enabled: false,
        ..Settings::default()
    }
}

struct Rig {
    world: World,
    desktop: MockDesktop,
    audio: AudioManager,
    listing: RecordingListing,
}

impl Rig {
    fn new() -> Self {
        Self {
            world: World::new(7),
            desktop: MockDesktop::new(),
            audio: AudioManager::silent(),
            listing: RecordingListing::default(),
        }
    }

    fn place(&mut self, position: DVec2, velocity: DVec2, size: f64) -> plinko_pets::sim::PetId {
        place(&mut self.world, &mut self.desktop, position, velocity, size)
    }

    fn tick(&mut self, settings: &Settings) -> plinko_pets::sim::TickReport {
        tick(
            &mut self.world,
            settings,
            &mut self.desktop,
            &mut self.audio,
            &mut self.listing,
        )
    }

    fn pet(&self, id: plinko_pets::sim::PetId) -> &plinko_pets::sim::Pet {
        let handle = self.world.store.resolve(id).expect("pet is stored");
        self.world.store.get(handle).expect("handle is valid")
    }
}

// ── Forces and integration ────────────────────────────────────

#[test]
fn test_free_fall_first_tick() {
    let mut rig = Rig::new();
    let id = rig.place(DVec2::new(100.0, 100.0), DVec2::ZERO, 50.0);

    let report = rig.tick(&no_friction());

    assert_eq!(report.live, 1);
    assert_eq!(report.boundary_impacts, 0);
    let pet = rig.pet(id);
    assert_close(pet.velocity().unwrap(), DVec2::new(0.0, 0.7));
    assert_close(pet.position, DVec2::new(100.0, 100.7));
    assert_close(rig.desktop.surface_origin(id).unwrap(), pet.position);
}

#[test]
fn test_gravity_change_applies_next_tick() {
    let mut rig = Rig::new();
    let id = rig.place(DVec2::new(100.0, 100.0), DVec2::ZERO, 50.0);

    rig.tick(&no_friction());
    let heavier = Settings {
        gravity_strength: 1.4,
        ..no_friction()
    };
    rig.tick(&heavier);

    assert_close(rig.pet(id).velocity().unwrap(), DVec2::new(0.0, 2.1));
}

#[test]
fn test_friction_after_gravity() {
    let mut rig = Rig::new();
    let id = rig.place(DVec2::new(100.0, 100.0), DVec2::new(10.0, 0.0), 50.0);

    rig.tick(&Settings::default());

    let expected = DVec2::new(10.0, 0.7) * 0.95;
    assert_close(rig.pet(id).velocity().unwrap(), expected);
    assert_close(rig.pet(id).position, DVec2::new(100.0, 100.0) + expected);
}

#[test]
fn test_external_move_is_adopted() {
    let mut rig = Rig::new();
    let id = rig.place(DVec2::new(100.0, 100.0), DVec2::ZERO, 50.0);

    rig.desktop.drag_window(id, DVec2::new(400.0, 100.0));
    rig.tick(&no_friction());

    assert_close(rig.pet(id).position, DVec2::new(400.0, 100.7));
}

// ── Boundaries ────────────────────────────────────────────────

#[test]
fn test_floor_bounce_on_contact_tick_only() {
    let mut rig = Rig::new();
    let id = rig.place(DVec2::new(100.0, 549.0), DVec2::new(0.0, 5.0), 50.0);

    let report = rig.tick(&no_friction());
    assert_eq!(report.boundary_impacts, 1);
    assert_close(rig.pet(id).position, DVec2::new(100.0, 550.0));
    assert_close(rig.pet(id).velocity().unwrap(), DVec2::new(0.0, -5.7 * 0.6));

    // Airborne again: plain gravity
    let report = rig.tick(&no_friction());
    assert_eq!(report.boundary_impacts, 0);
    assert_close(
        rig.pet(id).velocity().unwrap(),
        DVec2::new(0.0, -5.7 * 0.6 + 0.7),
    );
}

#[test]
fn test_wall_without_bounce_stops_axis() {
    let mut rig = Rig::new();
    let (audio, log) = recording_audio(false);
    rig.audio = audio;
    let id = rig.place(DVec2::new(745.0, 300.0), DVec2::new(10.0, 0.0), 50.0);

    let settings = Settings {
        bounce_enabled: false,
        ..drifting()
    };
    let report = rig.tick(&settings);

    assert_eq!(report.boundary_impacts, 1);
    assert_close(rig.pet(id).position, DVec2::new(750.0, 300.0));
    assert_close(rig.pet(id).velocity().unwrap(), DVec2::ZERO);
    assert_eq!(log.borrow().played.len(), 1);
}

#[test]
fn test_multi_monitor_widens_bounds() {
    let mut rig = Rig::new();
    let id = rig.place(DVec2::new(740.0, 300.0), DVec2::new(5.0, 0.0), 50.0);

    let settings = Settings {
        multi_monitor: true,
        ..drifting()
    };
    rig.tick(&settings);

    assert_close(rig.pet(id).position, DVec2::new(745.0, 300.0));
    assert_close(rig.pet(id).velocity().unwrap(), DVec2::new(5.0, 0.0));
}

#[test]
fn test_vertical_boundary_disabled_falls_through() {
    let mut rig = Rig::new();
    let id = rig.place(DVec2::new(100.0, 560.0), DVec2::new(0.0, 5.0), 50.0);

    let settings = Settings {
        vertical_boundary_enabled: false,
        ..drifting()
    };
    for _ in 0..10 {
        rig.tick(&settings);
    }

    assert_close(rig.pet(id).position, DVec2::new(100.0, 610.0));
    assert_close(rig.pet(id).velocity().unwrap(), DVec2::new(0.0, 5.0));
}

// ── Effects ───────────────────────────────────────────────────

#[test]
fn test_impact_warp_restores_after_five_ticks() {
    let mut rig = Rig::new();
    let (audio, log) = recording_audio(false);
    rig.audio = audio;
    let id = rig.place(DVec2::new(100.0, 549.0), DVec2::new(0.0, 5.0), 50.0);
    let original = rig.pet(id).sprite().original().clone();

    rig.tick(&no_friction());
    assert_eq!(log.borrow().played.len(), 1);
    let swaps = rig.desktop.sprite_swaps(id);
    assert_eq!(swaps.len(), 1);
    assert_ne!(swaps[0], &original);
    assert!(rig.pet(id).warp.active);

    for _ in 0..3 {
        rig.tick(&no_friction());
    }
    assert!(rig.pet(id).warp.active);
    assert_eq!(rig.desktop.sprite_swaps(id).len(), 1);

    rig.tick(&no_friction());
    assert!(!rig.pet(id).warp.active);
    let swaps = rig.desktop.sprite_swaps(id);
    assert_eq!(swaps.len(), 2);
    assert_eq!(swaps[1], &original);
}

#[test]
fn test_second_impact_keeps_running_warp() {
    let mut rig = Rig::new();
    let id = rig.place(DVec2::new(100.0, 549.0), DVec2::new(0.0, 5.0), 50.0);
    let settings = no_friction();

    rig.tick(&settings);
    rig.tick(&settings);
    let handle = rig.world.store.resolve(id).unwrap();
    rig.world.effects.dispatch(
        Impact::Boundary(handle),
        &settings,
        &mut rig.world.store,
        &mut rig.desktop,
        &mut rig.audio,
        &mut rig.world.rng,
    );
    assert_eq!(rig.pet(id).warp.frames_remaining, 3);
    assert_eq!(rig.desktop.sprite_swaps(id).len(), 1);

    for _ in 0..3 {
        rig.tick(&settings);
    }
    assert!(!rig.pet(id).warp.active);
    assert_eq!(rig.desktop.sprite_swaps(id).len(), 2);
}

#[test]
fn test_sound_failure_disables_sound_only() {
    let mut rig = Rig::new();
    let (audio, log) = recording_audio(true);
    rig.audio = audio;
    let a = rig.place(DVec2::new(100.0, 549.0), DVec2::new(0.0, 5.0), 50.0);
    let b = rig.place(DVec2::new(400.0, 549.0), DVec2::new(0.0, 5.0), 50.0);

    let report = rig.tick(&no_friction());

    assert_eq!(report.boundary_impacts, 2);
    assert_eq!(log.borrow().attempts, 1);
    assert!(!rig.audio.is_available());
    // Warp is unaffected
    assert_eq!(rig.desktop.sprite_swaps(a).len(), 1);
    assert_eq!(rig.desktop.sprite_swaps(b).len(), 1);
}

#[test]
fn test_sprite_swap_failure_disables_warp() {
    let mut rig = Rig::new();
    rig.desktop.refuse_sprite = true;
    let id = rig.place(DVec2::new(100.0, 549.0), DVec2::new(0.0, 5.0), 50.0);

    let report = rig.tick(&no_friction());

    assert_eq!(report.boundary_impacts, 1);
    assert!(rig.world.effects.warp_disabled());
    assert!(!rig.pet(id).warp.active);
    assert_eq!(report.live, 1);
}

#[test]
fn test_effects_respect_toggles() {
    let mut rig = Rig::new();
    let (audio, log) = recording_audio(false);
    rig.audio = audio;
    let id = rig.place(DVec2::new(100.0, 549.0), DVec2::new(0.0, 5.0), 50.0);

    let settings = Settings {
        sound_enabled: false,
        warp_enabled: false,
        ..no_friction()
    };
    let report = rig.tick(&settings);

    assert_eq!(report.boundary_impacts, 1);
    assert_eq!(log.borrow().attempts, 0);
    assert!(rig.desktop.sprite_swaps(id).is_empty());
}

// ── Collisions ────────────────────────────────────────────────

#[test]
fn test_head_on_collision() {
    let mut rig = Rig::new();
    let (audio, log) = recording_audio(false);
    rig.audio = audio;
    let a = rig.place(DVec2::new(100.0, 300.0), DVec2::new(3.0, 0.0), 40.0);
    let b = rig.place(DVec2::new(130.0, 300.0), DVec2::new(-3.0, 0.0), 40.0);

    let report = rig.tick(&drifting());

    assert_eq!(report.collisions, 1);
    // Moved to 103 / 127, centers 24 apart, overlap 16 split evenly
    assert_close(rig.pet(a).position, DVec2::new(95.0, 300.0));
    assert_close(rig.pet(b).position, DVec2::new(135.0, 300.0));
    assert_close(rig.pet(a).velocity().unwrap(), DVec2::new(-1.8, 0.0));
    assert_close(rig.pet(b).velocity().unwrap(), DVec2::new(1.8, 0.0));

    assert_eq!(log.borrow().played.len(), 1);
    assert_eq!(rig.desktop.sprite_swaps(a).len(), 1);
    assert_eq!(rig.desktop.sprite_swaps(b).len(), 1);
    assert_close(rig.desktop.surface_origin(a).unwrap(), rig.pet(a).position);
}

#[test]
fn test_collision_fallback_bounce() {
    let mut rig = Rig::new();
    let a = rig.place(DVec2::new(100.0, 300.0), DVec2::new(3.0, 0.0), 40.0);
    let b = rig.place(DVec2::new(130.0, 300.0), DVec2::new(-3.0, 0.0), 40.0);

    let settings = Settings {
        bounce_enabled: false,
        ..drifting()
    };
    rig.tick(&settings);

    assert_close(rig.pet(a).velocity().unwrap(), DVec2::new(-0.6, 0.0));
    assert_close(rig.pet(b).velocity().unwrap(), DVec2::new(0.6, 0.0));
}

#[test]
fn test_collisions_disabled_pass_through() {
    let mut rig = Rig::new();
    let a = rig.place(DVec2::new(100.0, 300.0), DVec2::new(3.0, 0.0), 40.0);
    let b = rig.place(DVec2::new(130.0, 300.0), DVec2::new(-3.0, 0.0), 40.0);

    let settings = Settings {
        collisions_enabled: false,
        ..drifting()
    };
    let report = rig.tick(&settings);

    assert_eq!(report.collisions, 0);
    assert_close(rig.pet(a).velocity().unwrap(), DVec2::new(3.0, 0.0));
    assert_close(rig.pet(b).velocity().unwrap(), DVec2::new(-3.0, 0.0));
}

#[test]
fn test_collision_warp_restores_after_five_ticks() {
    let mut rig = Rig::new();
    let a = rig.place(DVec2::new(100.0, 300.0), DVec2::new(3.0, 0.0), 40.0);
    let b = rig.place(DVec2::new(130.0, 300.0), DVec2::new(-3.0, 0.0), 40.0);
    let original_a = rig.pet(a).sprite().original().clone();

    let mut restored_on = None;
    for tick in 1..=6 {
        let report = rig.tick(&drifting());
        if tick == 1 {
            assert_eq!(report.collisions, 1);
        } else {
            assert_eq!(report.collisions, 0);
        }
        if restored_on.is_none() && rig.desktop.sprite_swaps(a).len() == 2 {
            restored_on = Some(tick);
        }
    }

    assert_eq!(restored_on, Some(5));
    assert_eq!(rig.desktop.sprite_swaps(a)[1], &original_a);
    assert_eq!(rig.desktop.sprite_swaps(b).len(), 2);
    assert!(!rig.pet(b).warp.active);
}

#[test]
fn test_held_pet_is_not_collided() {
    let mut rig = Rig::new();
    let held = rig.place(DVec2::new(100.0, 300.0), DVec2::ZERO, 40.0);
    rig.world.pointer(
        held,
        PointerEvent::Press {
            pointer: DVec2::new(110.0, 310.0),
        },
    );
    let free = rig.place(DVec2::new(130.0, 300.0), DVec2::new(-3.0, 0.0), 40.0);

    let report = rig.tick(&drifting());

    assert_eq!(report.collisions, 0);
    assert_close(rig.pet(held).position, DVec2::new(100.0, 300.0));
    assert_close(rig.pet(held).velocity().unwrap(), DVec2::ZERO);
    assert_close(rig.pet(free).position, DVec2::new(127.0, 300.0));
    assert_close(rig.pet(free).velocity().unwrap(), DVec2::new(-3.0, 0.0));
    assert!(rig.desktop.sprite_swaps(held).is_empty());
}

#[test]
fn test_double_click_during_drag_is_not_thrown() {
    let mut rig = Rig::new();
    let id = rig.place(DVec2::new(200.0, 300.0), DVec2::new(2.0, 0.0), 50.0);
    let press = PointerEvent::Press {
        pointer: DVec2::new(220.0, 320.0),
    };

    // Press, release, press, double-click, release: what a host delivers
    for event in [
        press,
        PointerEvent::Release,
        press,
        PointerEvent::DoubleClick,
        PointerEvent::Release,
    ] {
        assert!(rig.world.pointer(id, event).is_some());
    }

    assert!(!rig.pet(id).is_dragging());
    assert_close(rig.pet(id).velocity().unwrap(), DVec2::new(0.0, -20.0));
}

// ── Interaction ───────────────────────────────────────────────

#[test]
fn test_drag_then_throw() {
    let mut rig = Rig::new();
    let id = rig.place(DVec2::new(200.0, 200.0), DVec2::new(4.0, 4.0), 50.0);

    let pressed = rig.world.pointer(
        id,
        PointerEvent::Press {
            pointer: DVec2::new(210.0, 210.0),
        },
    );
    assert_eq!(pressed, Some(PointerResponse::Handled));

    // Held pets ignore physics
    rig.tick(&Settings::default());
    assert_close(rig.pet(id).position, DVec2::new(200.0, 200.0));
    assert_close(rig.pet(id).velocity().unwrap(), DVec2::ZERO);

    let moved = rig.world.pointer(
        id,
        PointerEvent::Move {
            pointer: DVec2::new(220.0, 215.0),
        },
    );
    let Some(PointerResponse::MoveTo(origin)) = moved else {
        panic!("expected a move, got {moved:?}");
    };
    assert_close(origin, DVec2::new(210.0, 205.0));
    rig.desktop.drag_window(id, origin);
    assert_close(rig.pet(id).velocity().unwrap(), DVec2::new(10.0, 5.0));

    rig.world.pointer(id, PointerEvent::Release);
    assert_close(rig.pet(id).velocity().unwrap(), DVec2::new(50.0, 25.0));

    rig.tick(&Settings::default());
    let v = DVec2::new(50.0, 25.7) * 0.95;
    assert_close(rig.pet(id).velocity().unwrap(), v);
    assert_close(rig.pet(id).position, origin + v);
}

#[test]
fn test_double_click_jumps() {
    let mut rig = Rig::new();
    let id = rig.place(DVec2::new(200.0, 550.0), DVec2::new(2.0, 0.0), 50.0);

    rig.world.pointer(id, PointerEvent::DoubleClick);
    assert_close(rig.pet(id).velocity().unwrap(), DVec2::new(2.0, -20.0));

    rig.tick(&no_friction());
    assert!(rig.pet(id).position.y < 550.0);
}

#[test]
fn test_secondary_click_shows_menu() {
    let mut rig = Rig::new();
    let id = rig.place(DVec2::new(200.0, 200.0), DVec2::ZERO, 50.0);

    let Some(PointerResponse::ShowMenu(entries)) =
        rig.world.pointer(id, PointerEvent::SecondaryClick)
    else {
        panic!("expected the context menu");
    };
    let labels: Vec<_> = entries.iter().map(|e| e.label()).collect();
    assert_eq!(labels, ["Remove This Pet", "Throw Around", "Adjust Settings"]);
}

#[test]
fn test_throw_around_ranges() {
    let mut rig = Rig::new();
    let id = rig.place(DVec2::new(200.0, 200.0), DVec2::ZERO, 50.0);

    for _ in 0..50 {
        assert!(rig.world.menu(id, MenuEntry::ThrowAround));
        let v = rig.pet(id).velocity().unwrap();
        assert!((-30.0..=30.0).contains(&v.x));
        assert!((-35.0..=-15.0).contains(&v.y));
        assert_eq!(v.x.fract(), 0.0);
        assert_eq!(v.y.fract(), 0.0);
    }
}

#[test]
fn test_events_for_removed_pet_are_ignored() {
    let mut rig = Rig::new();
    let id = rig.place(DVec2::new(200.0, 200.0), DVec2::ZERO, 50.0);

    assert!(rig.world.menu(id, MenuEntry::Remove));
    // Dying but not yet compacted
    assert_eq!(rig.world.pointer(id, PointerEvent::DoubleClick), None);
    assert!(!rig.world.menu(id, MenuEntry::Remove));

    let report = rig.tick(&Settings::default());
    assert_eq!(report.removed, vec![id]);
    assert_eq!(rig.world.pointer(id, PointerEvent::Release), None);
    assert!(!rig.world.menu(id, MenuEntry::ThrowAround));
}

// ── Lifecycle ─────────────────────────────────────────────────

#[test]
fn test_closed_window_is_compacted() {
    let mut rig = Rig::new();
    let a = rig.place(DVec2::new(100.0, 100.0), DVec2::ZERO, 50.0);
    let b = rig.place(DVec2::new(300.0, 100.0), DVec2::ZERO, 60.0);

    rig.desktop.close_window(a);
    let report = rig.tick(&Settings::default());

    assert_eq!(report.removed, vec![a]);
    assert_eq!(report.live, 1);
    assert_eq!(rig.world.store.len(), 1);
    assert!(rig.desktop.destroyed().contains(&a));
    assert!(rig.world.store.resolve(b).is_some());
    assert_eq!(rig.listing.last_labels(), vec!["Pet 1: 60x60".to_string()]);
}

#[test]
fn test_spawn_and_listing_updates() {
    let mut rig = Rig::new();
    let base = SpriteImage::solid(30, 30, [0, 128, 255, 255]).unwrap();
    let a = rig
        .world
        .spawn(&base, 1.0, false, &mut rig.desktop)
        .unwrap();
    let b = rig
        .world
        .spawn(&base, 2.0, false, &mut rig.desktop)
        .unwrap();

    for id in [a, b] {
        let pet = rig.pet(id);
        assert!(pet.position.x >= 0.0 && pet.position.x + pet.size().x <= 800.0);
        assert!(pet.position.y >= 0.0 && pet.position.y + pet.size().y <= 600.0);
        assert_eq!(pet.position.fract(), DVec2::ZERO);
        let v = pet.velocity().unwrap();
        assert!((-3.0..=3.0).contains(&v.x));
        assert!((-4.0..=0.0).contains(&v.y));
    }

    let settings = Settings {
        collisions_enabled: false,
        ..Settings::default()
    };
    rig.tick(&settings);
    assert_eq!(rig.listing.updates.len(), 1);
    assert_eq!(
        rig.listing.last_labels(),
        vec!["Pet 1: 50x50".to_string(), "Pet 2: 80x80".to_string()]
    );

    // Nothing changed
    rig.tick(&settings);
    assert_eq!(rig.listing.updates.len(), 1);

    rig.world.menu(a, MenuEntry::Remove);
    rig.tick(&settings);
    assert_eq!(rig.listing.updates.len(), 2);
    assert_eq!(rig.listing.last_labels(), vec!["Pet 1: 80x80".to_string()]);
}

#[test]
fn test_spawn_failure_is_reported() {
    let mut rig = Rig::new();
    let survivor = rig.place(DVec2::new(100.0, 100.0), DVec2::ZERO, 50.0);
    rig.desktop.refuse_create = true;

    let result = rig.world.spawn(&gradient(20, 20), 1.0, false, &mut rig.desktop);

    assert!(matches!(result, Err(PetError::Spawn(_))));
    let errors = rig.desktop.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Failed to create pet"));
    assert_eq!(rig.world.live_count(), 1);
    assert!(rig.world.store.resolve(survivor).is_some());
}

#[test]
fn test_spawn_rejects_bad_scale() {
    let mut rig = Rig::new();
    let result = rig.world.spawn(&gradient(20, 20), 3.0, false, &mut rig.desktop);
    assert!(matches!(
        result,
        Err(PetError::InvalidSetting {
            name: "size_scale",
            ..
        })
    ));
    assert_eq!(rig.desktop.window_count(), 0);
}

#[test]
fn test_remove_all() {
    let mut rig = Rig::new();
    let a = rig.place(DVec2::new(100.0, 100.0), DVec2::ZERO, 50.0);
    let b = rig.place(DVec2::new(300.0, 100.0), DVec2::ZERO, 50.0);

    rig.world.remove_all(&mut rig.desktop, &mut rig.listing);

    assert!(rig.world.store.is_empty());
    assert_eq!(rig.desktop.window_count(), 0);
    assert_eq!(rig.desktop.destroyed(), vec![a, b]);
    assert_eq!(rig.listing.updates, vec![Vec::new()]);
    assert_eq!(rig.tick(&Settings::default()).live, 0);
}

// ── Application shell ─────────────────────────────────────────

#[test]
fn test_app_reset_stops_animation() {
    let (audio, log) = recording_audio(false);
    let mut app = PetApp::new(Settings::default(), audio, 3).unwrap();
    let mut desktop = MockDesktop::new();
    let mut listing = RecordingListing::default();
    app.set_base_image(gradient(24, 24));

    let now = Instant::now();
    app.spawn(&mut desktop, now).unwrap();
    app.spawn(&mut desktop, now).unwrap();
    assert!(app.run_due_tick(&mut desktop, &mut listing, now).is_some());
    assert!(app.scheduler().is_running());

    app.remove_all(&mut desktop, &mut listing);
    let later = now + app.scheduler().interval() * 10;
    let report = app.run_due_tick(&mut desktop, &mut listing, later).unwrap();
    assert_eq!(report.live, 0);
    assert!(!app.scheduler().is_running());
    assert_eq!(app.time_until_due(later), None);

    app.shutdown(&mut desktop, &mut listing);
    app.shutdown(&mut desktop, &mut listing);
    drop(app);
    assert_eq!(log.borrow().shutdowns, 1);
}

#[test]
fn test_app_volume_follows_settings() {
    let (audio, log) = recording_audio(false);
    let mut app = PetApp::new(Settings::default(), audio, 3).unwrap();
    let muted = Settings {
        master_volume: 0.0,
        ..Settings::default()
    };
    app.set_settings(muted).unwrap();

    let mut desktop = MockDesktop::new();
    let mut listing = RecordingListing::default();
    app.set_base_image(gradient(24, 24));
    app.spawn(&mut desktop, Instant::now()).unwrap();
    for _ in 0..200 {
        app.step(&mut desktop, &mut listing);
    }
    assert_eq!(log.borrow().attempts, 0);
}
