/*
 * Application Module
 *
 * This module defines the nannou application model and the host side of
 * the starfield: window creation, the per-frame update callback and the
 * wiring of pointer, key and click events into the input controller.
 */

use std::sync::OnceLock;

use log::{error, info};
use nannou::prelude::*;
use nannou::winit::event::DeviceEvent;
use nannou_egui::Egui;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

use crate::audio::{AudioTrigger, CommandAudio};
use crate::debug::DebugInfo;
use crate::detail::DetailLevel;
use crate::error::PointerLockError;
use crate::input::{InputController, InputKey, KeyAction};
use crate::params::StarfieldParams;
use crate::renderer::{self, Skybox};
use crate::simulation::Starfield;
use crate::ui;

// nannou builds the model from a plain fn, so launch parameters are parked here
static LAUNCH_PARAMS: OnceLock<StarfieldParams> = OnceLock::new();

// Main model for the application
pub struct Model {
    pub window_id: WindowId,
    pub starfield: Starfield,
    pub skybox: Skybox,
    pub input: InputController,
    pub audio: AudioTrigger,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub show_debug: bool,
}

// Run the starfield window with the given parameters
pub fn launch(params: StarfieldParams) {
    if LAUNCH_PARAMS.set(params).is_err() {
        error!("Starfield already launched");
        return;
    }
    nannou::app(model).update(update).event(event).run();
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let params = LAUNCH_PARAMS.get().cloned().unwrap_or_default();

    // Size the window relative to the primary monitor when one is reported
    let (window_width, window_height) = match app.primary_monitor() {
        Some(monitor) => {
            let size = monitor.size();
            (
                (size.width as f32 * params.view.window_scale) as u32,
                (size.height as f32 * params.view.window_scale) as u32,
            )
        }
        None => (1280, 720),
    };

    let window_id = app
        .new_window()
        .title("Starfield")
        .size(window_width, window_height)
        .view(renderer::view)
        .mouse_pressed(mouse_pressed)
        .key_pressed(key_pressed)
        .unfocused(unfocused)
        .raw_event(raw_window_event)
        .build()
        .expect("Failed to build window");

    let window = app.window(window_id).expect("Window missing after build");
    let egui = Egui::from_window(&window);

    // Skybox points follow the field seed when one is given
    let mut sky_rng = match params.seed {
        Some(seed) => Pcg64Mcg::seed_from_u64(seed ^ 0x5EED_5EED),
        None => Pcg64Mcg::from_entropy(),
    };
    let skybox = Skybox::generate(params.view.skybox_points, &mut sky_rng);

    let audio = AudioTrigger::new(Box::new(CommandAudio::new(&params.audio)));
    let show_debug = params.view.show_debug;
    let start_basic = params.view.start_basic;

    let mut starfield = Starfield::new(params);
    if start_basic {
        starfield.set_detail(DetailLevel::Basic);
    }
    info!("{}", starfield.status_text());

    Model {
        window_id,
        starfield,
        skybox,
        input: InputController::new(),
        audio,
        egui,
        debug_info: DebugInfo::default(),
        show_debug,
    }
}

// Update the model once per display frame
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    if model.starfield.advance(update.since_last.as_secs_f64()).is_none() {
        app.quit();
        return;
    }

    model.egui.set_elapsed_time(update.since_start);
    ui::update_ui(
        &mut model.egui,
        &model.starfield,
        &model.debug_info,
        model.input.pointer_locked(),
        model.show_debug,
    );
}

// Raw device motion keeps arriving while the cursor is grabbed
pub fn event(_app: &App, model: &mut Model, event: Event) {
    if let Event::DeviceEvent(_, DeviceEvent::MouseMotion { delta: (dx, dy) }) = event {
        model.input.on_pointer_motion(model.starfield.camera_mut(), dx, dy);
    }
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left || model.egui.ctx().is_pointer_over_area() {
        return;
    }

    let actions = model.input.on_click();
    if actions.start_audio {
        model.audio.start_once();
    }
    if actions.request_pointer_lock {
        let result = grab_pointer(app, model.window_id, true);
        model.input.on_pointer_lock_result(result);
    }
}

fn key_pressed(app: &App, model: &mut Model, key: Key) {
    let input_key = match key {
        Key::Escape => InputKey::Escape,
        Key::F3 => InputKey::F3,
        Key::D => InputKey::Char('d'),
        _ => return,
    };

    match model.input.on_key(input_key) {
        Some(KeyAction::ToggleDetail) => {
            model.starfield.toggle_detail();
        }
        Some(KeyAction::ReleasePointer) => release_pointer(app, model),
        Some(KeyAction::ToggleDebug) => model.show_debug = !model.show_debug,
        None => {}
    }
}

fn unfocused(app: &App, model: &mut Model) {
    release_pointer(app, model);
}

fn release_pointer(app: &App, model: &mut Model) {
    if !model.input.pointer_locked() {
        return;
    }
    if let Err(e) = grab_pointer(app, model.window_id, false) {
        error!("Failed to release pointer: {}", e);
    }
    model.input.set_pointer_locked(false);
}

// Grab or release the cursor and hide it while grabbed
fn grab_pointer(app: &App, window_id: WindowId, grab: bool) -> Result<(), PointerLockError> {
    let window = app
        .window(window_id)
        .ok_or_else(|| PointerLockError::Rejected("window closed".to_string()))?;
    window
        .set_cursor_grab(grab)
        .map_err(|e| PointerLockError::Rejected(e.to_string()))?;
    window.set_cursor_visible(!grab);
    Ok(())
}

// Handle raw window events for egui
fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
