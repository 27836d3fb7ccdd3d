/*
 * Application Module
 *
 * This module defines the nannou model for the starfield backdrop and wires
 * window events into it.
 *
 * Frame flow:
 * - Input callbacks only record state (pointer target, gestures, resizes)
 * - Each display-synchronised update fires the scheduler's armed tick, which
 *   advances the field and then renders it into the surface, strictly in
 *   that order
 * - The view callback presents the finished surface and the egui overlay
 *
 * Everything runs on the event loop thread, so no state is shared across
 * threads and no locking is needed.
 */

use nannou::prelude::*;
use nannou::winit::event::WindowEvent as RawWindowEvent;
use nannou_egui::Egui;

use crate::audio::{AudioToggle, MediaElement};
use crate::config::AppConfig;
use crate::debug::DebugInfo;
use crate::media::open_media;
use crate::profile::ProfileView;
use crate::renderer::FieldRenderer;
use crate::scheduler::{ArmedTick, FrameScheduler};
use crate::simulation::ParticleField;
use crate::surface::NannouSurface;
use crate::ui::{self, DebugControls};
use crate::viewport::Viewport;

// Main model for the application
pub struct Model {
    pub window_id: WindowId,
    pub egui: Egui,
    pub field: ParticleField,
    pub renderer: FieldRenderer,
    pub surface: NannouSurface,
    pub scheduler: FrameScheduler<ArmedTick>,
    pub profile: ProfileView,
    pub audio: AudioToggle,
    pub media: Box<dyn MediaElement>,
    pub debug_info: DebugInfo,
    pub show_debug: bool,
    pub paused: bool,
    // Set once the window is closing; input is ignored from then on
    pub detached: bool,
}

impl Model {
    // Stop scheduling frames and stop reacting to input
    pub fn teardown(&mut self) {
        if self.detached {
            return;
        }
        self.detached = true;
        self.scheduler.stop();
        self.media.pause();
        log::info!("Background torn down after {} frames", self.debug_info.ticks);
    }
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    app.set_loop_mode(LoopMode::RefreshSync);

    // nannou's model hook cannot return an error and there is nothing to draw
    // without a window, so setup failures abort startup
    let window_id = app
        .new_window()
        .title(&config.window.title)
        .size(config.window.width, config.window.height)
        .view(view)
        .mouse_moved(mouse_moved)
        .mouse_pressed(mouse_pressed)
        .mouse_exited(mouse_exited)
        .touch(touch)
        .key_pressed(key_pressed)
        .resized(resized)
        .closed(closed)
        .raw_event(raw_window_event)
        .build()
        .expect("Failed to create the main window");

    let (egui, viewport) = {
        let window = app.window(window_id).expect("Main window disappeared during setup");
        let rect = window.rect();
        (
            Egui::from_window(&window),
            Viewport::new(rect.w(), rect.h(), window.scale_factor()),
        )
    };

    let params = config.field.clone();
    let mut rng = rand::thread_rng();
    let field = ParticleField::new(params, viewport, &mut rng);

    let mut renderer = FieldRenderer::new();
    let mut surface = NannouSurface::new(&viewport, field.params().background_rgba());
    renderer.resize(&mut surface, &viewport);

    let profile = ProfileView::from_config(&config.profile);
    let media = open_media(&profile);
    log::info!(
        "Profile '{}' with {} social links, music {}",
        profile.name,
        profile.visible_links().count(),
        if profile.has_music() { "on" } else { "off" }
    );

    let mut scheduler = FrameScheduler::new(
        ArmedTick::new(),
        field.params().target_frame_ms,
        field.params().max_delta_frames,
    );
    scheduler.start(app.duration.since_start.as_secs_f64() * 1000.0);

    Model {
        window_id,
        egui,
        field,
        renderer,
        surface,
        scheduler,
        profile,
        audio: AudioToggle::new(),
        media,
        debug_info: DebugInfo::default(),
        show_debug: config.debug.show_overlay,
        paused: false,
        detached: false,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;
    model.egui.set_elapsed_time(update.since_start);

    let debug = if model.show_debug {
        Some(DebugControls {
            params: model.field.params_mut(),
            info: &model.debug_info,
            paused: &mut model.paused,
        })
    } else {
        None
    };
    let actions = ui::update_ui(&mut model.egui, &model.profile, &model.audio, debug);

    if actions.toggle_audio {
        model.audio.toggle(model.media.as_mut());
    }
    model.audio.sync(model.media.as_mut());

    // Run the frame only if the scheduler armed a tick for it
    let Some(id) = model.scheduler.source_mut().fire() else {
        return;
    };
    let now_ms = update.since_start.as_secs_f64() * 1000.0;

    let Model {
        field,
        renderer,
        surface,
        scheduler,
        debug_info,
        paused,
        ..
    } = model;

    scheduler.tick(id, now_ms, |delta| {
        if !*paused {
            field.advance(delta);
        }
        let stats = renderer.draw(surface, &field.simulator.particles, field.params(), &field.viewport);
        debug_info.record_frame(delta, stats);
    });
}

// Present the frame built during update, then the overlay
pub fn view(app: &App, model: &Model, frame: Frame) {
    if let Err(err) = model.surface.draw().to_frame(app, &frame) {
        log::error!("Failed to present particle field: {:?}", err);
    }

    if let Err(err) = model.egui.draw_to_frame(&frame) {
        log::error!("Failed to draw overlay: {:?}", err);
    }
}

pub fn exit(_app: &App, mut model: Model) {
    model.teardown();
}

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    if model.detached {
        return;
    }
    let position = model.field.viewport.from_window(pos);
    model.field.pointer_moved(position);
}

// Pointer left the window: parallax eases back to neutral
pub fn mouse_exited(_app: &App, model: &mut Model) {
    if model.detached {
        return;
    }
    model.field.pointer_left();
}

// Mouse pressed event handler
pub fn mouse_pressed(_app: &App, model: &mut Model, _button: MouseButton) {
    if model.detached {
        return;
    }
    // Presses on the overlay are handled by its own widgets
    if !model.egui.ctx().is_pointer_over_area() {
        model.audio.on_pointer_down(model.media.as_mut());
    }
}

// Touch behaves like a pointer: start/move track, end/cancel leave
pub fn touch(_app: &App, model: &mut Model, touch: TouchEvent) {
    if model.detached {
        return;
    }
    match touch.phase {
        TouchPhase::Started => {
            let position = model.field.viewport.from_window(touch.position);
            model.field.pointer_moved(position);
            if !model.egui.ctx().is_pointer_over_area() {
                model.audio.on_pointer_down(model.media.as_mut());
            }
        }
        TouchPhase::Moved => {
            let position = model.field.viewport.from_window(touch.position);
            model.field.pointer_moved(position);
        }
        TouchPhase::Ended | TouchPhase::Cancelled => model.field.pointer_left(),
    }
}

pub fn key_pressed(app: &App, model: &mut Model, key: Key) {
    if model.detached {
        return;
    }
    let mods = app.keys.mods;
    model.audio.on_key_down(model.media.as_mut(), mods.ctrl() || mods.logo());

    if key == Key::F3 {
        model.show_debug = !model.show_debug;
        log::debug!("Debug overlay {}", if model.show_debug { "shown" } else { "hidden" });
    }
}

// Re-apply the surface scale on every resize
pub fn resized(app: &App, model: &mut Model, size: Vec2) {
    let scale_factor = app
        .window(model.window_id)
        .map(|window| window.scale_factor())
        .unwrap_or(1.0);

    let mut viewport = model.field.viewport;
    viewport.resize(size.x, size.y, scale_factor);

    model.field.resize(viewport);
    model.renderer.resize(&mut model.surface, &viewport);
}

pub fn closed(_app: &App, model: &mut Model) {
    model.teardown();
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &RawWindowEvent) {
    model.egui.handle_raw_event(event);
}
