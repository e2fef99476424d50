/*
 * Renderer Module
 *
 * This module draws the three layers of the starfield: skybox, dust and
 * stars. Every layer is rotated by the same layer transform, then projected
 * with a pinhole camera that sits in front of the field's near boundary
 * looking along +z.
 *
 * Full detail adds halos around bright stars and streaks on stars inside
 * the proximity shell; basic detail draws plain dots.
 */

use glam::{DQuat, DVec3};
use nannou::prelude::*;
use rand::Rng;

use crate::app::Model;
use crate::field::Population;
use crate::params::ViewParams;
use crate::particle::ParticleLook;

// Points closer than this to the camera plane are culled
const MIN_VIEW_DEPTH: f64 = 1.0;
// Skybox directions this close to the camera plane are culled
const MIN_SKY_FACING: f64 = 0.05;

/// Screen position and scale of a projected point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

// Project a particle position in a population with the given half depth span
pub fn project_particle(position: DVec3, rotation: DQuat, half_distribution: f64, view: &ViewParams) -> Option<Projected> {
    let rotated = rotation * position;
    let depth = rotated.z + half_distribution + view.camera_offset;
    if depth < MIN_VIEW_DEPTH {
        return None;
    }

    let scale = view.focal_length / depth;
    // Screen y grows upward in nannou
    Some(Projected { x: rotated.x * scale, y: -rotated.y * scale, scale })
}

// Project a skybox direction, which sits at infinity
pub fn project_direction(direction: DVec3, rotation: DQuat, view: &ViewParams) -> Option<(f64, f64)> {
    let rotated = rotation * direction;
    if rotated.z < MIN_SKY_FACING {
        return None;
    }
    Some((rotated.x / rotated.z * view.focal_length, -rotated.y / rotated.z * view.focal_length))
}

/// Faint background points on the unit sphere.
pub struct Skybox {
    pub directions: Vec<DVec3>,
    pub brightness: Vec<f32>,
}

impl Skybox {
    pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let mut directions = Vec::with_capacity(count);
        let mut brightness = Vec::with_capacity(count);

        for _ in 0..count {
            // Uniform on the sphere
            let z = rng.gen_range(-1.0..1.0);
            let theta = rng.gen_range(0.0..std::f64::consts::TAU);
            let r = (1.0f64 - z * z).sqrt();
            directions.push(DVec3::new(r * theta.cos(), r * theta.sin(), z));
            brightness.push(rng.gen_range(0.1..0.35));
        }

        Self { directions, brightness }
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let view = &model.starfield.params().view;
    let rotation = model.starfield.layer_transform().rotation;
    let full_detail = model.starfield.detail().is_full();

    // Skybox
    for (direction, brightness) in model.skybox.directions.iter().zip(&model.skybox.brightness) {
        if let Some((x, y)) = project_direction(*direction, rotation, view) {
            let (x, y) = (x as f32, y as f32);
            if window_rect.contains(pt2(x, y)) {
                draw.ellipse().x_y(x, y).radius(0.6).color(rgba(0.7, 0.75, 0.9, *brightness));
            }
        }
    }

    let dust_drawn = draw_population(&draw, model.starfield.dust(), rotation, view, window_rect, full_detail);
    let stars_drawn = draw_population(&draw, model.starfield.stars(), rotation, view, window_rect, full_detail);

    model.debug_info.visible_particles.set(dust_drawn + stars_drawn);
    model.debug_info.near_stars.set(
        model
            .starfield
            .stars()
            .particles
            .iter()
            .filter(|p| p.star_look().map_or(false, |look| look.near))
            .count(),
    );

    if let Err(e) = draw.to_frame(app, &frame) {
        log::error!("Failed to draw frame: {:?}", e);
    }

    if let Err(e) = model.egui.draw_to_frame(&frame) {
        log::error!("Failed to draw UI: {:?}", e);
    }
}

// Draw one population and return how many particles were on screen
fn draw_population(
    draw: &Draw,
    population: &Population,
    rotation: DQuat,
    view: &ViewParams,
    window_rect: Rect,
    full_detail: bool,
) -> usize {
    let half = population.half_distribution();
    let mut drawn = 0;

    for particle in &population.particles {
        let position = DVec3::new(particle.x, particle.y, particle.z);
        let projected = match project_particle(position, rotation, half, view) {
            Some(projected) => projected,
            None => continue,
        };

        let x = projected.x as f32;
        let y = projected.y as f32;
        let radius = (particle.size * projected.scale * 0.5).max(0.3) as f32;

        // Margin so large near stars fade in at the edges
        let margin = radius * 4.0;
        if x.abs() > window_rect.w() / 2.0 + margin || y.abs() > window_rect.h() / 2.0 + margin {
            continue;
        }
        drawn += 1;

        match &particle.look {
            ParticleLook::Dust => {
                draw.ellipse().x_y(x, y).radius(radius).color(rgba(0.6, 0.6, 0.7, 0.35));
            }
            ParticleLook::Star(look) => {
                let r = look.color.r as f32 / 255.0;
                let g = look.color.g as f32 / 255.0;
                let b = look.color.b as f32 / 255.0;
                let alpha = look.opacity as f32;

                if full_detail && look.bright {
                    draw.ellipse().x_y(x, y).radius(radius * 3.0).color(rgba(r, g, b, alpha * 0.25));
                }

                if full_detail && look.near {
                    // Streak away from the screen center
                    let length = (x * x + y * y).sqrt();
                    if length > 0.0 {
                        let streak = radius * 6.0;
                        let end = pt2(x + x / length * streak, y + y / length * streak);
                        draw.line()
                            .start(pt2(x, y))
                            .end(end)
                            .weight(radius)
                            .color(rgba(r, g, b, alpha * 0.6));
                    }
                }

                draw.ellipse().x_y(x, y).radius(radius).color(rgba(r, g, b, alpha));
            }
        }
    }

    drawn
}
