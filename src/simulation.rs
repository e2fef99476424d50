/*
 * Simulation Module
 *
 * This module defines the Starfield struct, which owns the camera state and
 * both particle populations and advances them once per display frame.
 *
 * Frame order:
 * - Integrate the camera angles from base rates and pointer deltas
 * - Decay the pointer deltas
 * - Derive the layer rotation shared by skybox, stars and dust
 * - Move every particle in depth, wrap it, refresh the star look
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::{DQuat, DVec3};
use log::{info, trace, warn};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

use crate::camera::CameraState;
use crate::detail::DetailLevel;
use crate::field::{ParticleField, Population};
use crate::params::StarfieldParams;
use crate::particle::wrap_depth;

/// Rotation applied identically to the skybox, star and dust layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerTransform {
    /// Angles in degrees about x, y and z.
    pub angles: DVec3,
    pub rotation: DQuat,
}

/// Cancellation handle for the frame loop.
///
/// Clones share the same flag; stopping any of them stops the starfield.
#[derive(Debug, Clone)]
pub struct RunHandle {
    running: Arc<AtomicBool>,
}

impl RunHandle {
    fn new() -> Self {
        Self { running: Arc::new(AtomicBool::new(true)) }
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

pub struct Starfield {
    params: StarfieldParams,
    camera: CameraState,
    stars: Population,
    dust: Population,
    detail: DetailLevel,
    handle: RunHandle,
    frame_count: u64,
}

impl Starfield {
    /// Build a starfield, seeding the generator from `params.seed` or the clock.
    pub fn new(params: StarfieldParams) -> Self {
        let seed = params.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        info!("Seeded RNG with {}", seed);

        let field = ParticleField::generate(&params, &mut rng);
        info!(
            "Generated {} stars and {} dust particles",
            field.stars.len(),
            field.dust.len()
        );

        Self::from_populations(params, field.stars, field.dust)
    }

    /// Build a starfield from populations supplied by the caller.
    pub fn from_populations(params: StarfieldParams, stars: Population, dust: Population) -> Self {
        let mut starfield = Self {
            params,
            camera: CameraState::new(),
            stars,
            dust,
            detail: DetailLevel::default(),
            handle: RunHandle::new(),
            frame_count: 0,
        };

        fold_into_span(&mut starfield.stars);
        fold_into_span(&mut starfield.dust);

        // Derived star attributes are valid before the first frame
        let threshold = starfield.params.proximity_threshold;
        let distribution = starfield.stars.distribution;
        for star in &mut starfield.stars.particles {
            star.refresh_look(distribution, threshold);
        }

        starfield
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Returns the layer transform for this frame, or `None` once the
    /// starfield has been stopped.
    pub fn advance(&mut self, dt: f64) -> Option<LayerTransform> {
        if !self.handle.is_running() {
            return None;
        }

        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!("Ignoring invalid frame delta {}", dt);
            0.0
        };

        let angular_speed = DVec3::new(
            self.params.angular_speed_x,
            self.params.angular_speed_y,
            self.params.angular_speed_z,
        );
        self.camera.integrate(angular_speed, dt);
        self.camera.decay_deltas(dt);

        let transform = self.layer_transform();

        let multiplier = self.camera.speed_multiplier;
        let threshold = self.params.proximity_threshold;
        advance_population(&mut self.stars, dt, multiplier, threshold);
        advance_population(&mut self.dust, dt, multiplier, threshold);

        self.frame_count += 1;
        trace!(
            "frame {} dt {:.4} angles ({:.2}, {:.2}, {:.2})",
            self.frame_count,
            dt,
            transform.angles.x,
            transform.angles.y,
            transform.angles.z
        );

        Some(transform)
    }

    /// Current layer transform, derived from the camera angles.
    pub fn layer_transform(&self) -> LayerTransform {
        LayerTransform {
            angles: self.camera.angles(),
            rotation: self.camera.rotation(),
        }
    }

    pub fn run_handle(&self) -> RunHandle {
        self.handle.clone()
    }

    pub fn stop(&self) {
        if self.handle.is_running() {
            info!("Stopping starfield after {} frames", self.frame_count);
        }
        self.handle.stop();
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    pub fn toggle_detail(&mut self) -> DetailLevel {
        self.detail = self.detail.toggled();
        info!("Detail level: {}", self.detail.label());
        self.detail
    }

    pub fn set_detail(&mut self, detail: DetailLevel) {
        self.detail = detail;
    }

    pub fn detail(&self) -> DetailLevel {
        self.detail
    }

    pub fn status_text(&self) -> String {
        self.detail.status_text()
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f64) {
        self.camera.speed_multiplier = if multiplier.is_finite() { multiplier.max(0.0) } else { 1.0 };
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraState {
        &mut self.camera
    }

    pub fn stars(&self) -> &Population {
        &self.stars
    }

    pub fn dust(&self) -> &Population {
        &self.dust
    }

    pub fn params(&self) -> &StarfieldParams {
        &self.params
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

// Move one population in depth and refresh the star look
fn advance_population(population: &mut Population, dt: f64, multiplier: f64, proximity_threshold: f64) {
    let speed = population.base_speed * dt * multiplier;
    let distribution = population.distribution;

    for particle in &mut population.particles {
        particle.advance_depth(speed, distribution);
        particle.refresh_look(distribution, proximity_threshold);
    }
}

// Bring caller-supplied depths into [-half, half)
fn fold_into_span(population: &mut Population) {
    let half = population.half_distribution();
    let distribution = population.distribution;
    let mut folded = 0;

    for particle in &mut population.particles {
        if !(-half..half).contains(&particle.z) {
            particle.z = wrap_depth(particle.z, distribution);
            folded += 1;
        }
    }

    if folded > 0 {
        warn!("Folded {} {:?} depths into the span of {}", folded, population.kind, distribution);
    }
}
