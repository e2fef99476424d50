/*
 * Starfield - Module Definitions
 *
 * This file defines the module structure for the starfield application.
 * The simulation core (field, particle, camera, simulation, input, audio)
 * does not depend on a window; the nannou host lives in app, renderer
 * and ui.
 */

// Re-export key components for easier access
pub use camera::CameraState;
pub use detail::DetailLevel;
pub use field::{ParticleField, ParticleKind, Population, PopulationShape};
pub use params::StarfieldParams;
pub use particle::{Particle, ParticleLook, StarColor, StarLook};
pub use simulation::{LayerTransform, RunHandle, Starfield};

// Define modules
pub mod app;
pub mod audio;
pub mod camera;
pub mod debug;
pub mod detail;
pub mod error;
pub mod field;
pub mod input;
pub mod params;
pub mod particle;
pub mod renderer;
pub mod simulation;
pub mod ui;
