/*
 * UI Module
 *
 * This module builds the egui overlay using nannou_egui: the detail status
 * indicator, a hint while the pointer is free, and the debug panel.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::simulation::Starfield;

// Build the overlay for this frame
pub fn update_ui(egui: &mut Egui, starfield: &Starfield, debug_info: &DebugInfo, pointer_locked: bool, show_debug: bool) {
    let ctx = egui.begin_frame();

    egui::Window::new("mode-indicator")
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::LEFT_BOTTOM, [10.0, -10.0])
        .show(&ctx, |ui| {
            ui.label(starfield.status_text());
            if !pointer_locked {
                ui.label("Click to look around (Esc to release)");
            }
        });

    if show_debug {
        let camera = starfield.camera();
        egui::Window::new("Debug")
            .default_pos([10.0, 10.0])
            .show(&ctx, |ui| {
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!(
                    "Particles: {} stars, {} dust",
                    starfield.stars().len(),
                    starfield.dust().len()
                ));
                ui.label(format!("Visible particles: {}", debug_info.visible_particles.get()));
                ui.label(format!("Near stars: {}", debug_info.near_stars.get()));
                ui.separator();
                ui.label(format!(
                    "Angles: ({:.1}, {:.1}, {:.1})",
                    camera.angle_x, camera.angle_y, camera.angle_z
                ));
                ui.label(format!("Pointer deltas: ({:.2}, {:.2})", camera.yaw_delta, camera.pitch_delta));
                ui.label(format!("Speed multiplier: {:.2}", camera.speed_multiplier));
                ui.label(format!("Frames: {}", starfield.frame_count()));
            });
    }
}
