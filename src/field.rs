/*
 * Particle Field Module
 *
 * Builds the two particle populations, stars and dust, from counts and
 * spans. Every random draw goes through the injected generator so a field
 * can be reproduced from its seed.
 */

use rand::Rng;

use crate::params::StarfieldParams;
use crate::particle::{Particle, STAR_PALETTE};

// Size ranges for each population
pub const STAR_SIZE_BASE: f64 = 1.0;
pub const STAR_SIZE_RANGE: f64 = 5.0;
pub const DUST_SIZE_BASE: f64 = 0.5;
pub const DUST_SIZE_RANGE: f64 = 2.0;

// Stars above this size may be bright
pub const BRIGHT_SIZE: f64 = 2.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Star,
    Dust,
}

/// One population of particles sharing a depth span and travel speed.
#[derive(Debug, Clone)]
pub struct Population {
    pub kind: ParticleKind,
    pub distribution: f64,
    pub base_speed: f64,
    pub particles: Vec<Particle>,
}

/// Shape of a population to generate.
#[derive(Debug, Clone, Copy)]
pub struct PopulationShape {
    pub count: usize,
    pub depth_span: f64,
    pub lateral_x: f64,
    pub lateral_y: f64,
    pub size_base: f64,
    pub size_range: f64,
}

impl Population {
    pub fn new(kind: ParticleKind, distribution: f64, base_speed: f64, particles: Vec<Particle>) -> Self {
        Self { kind, distribution, base_speed, particles }
    }

    /// Generate `shape.count` particles of the given kind.
    ///
    /// Draw order per particle is size, then (stars only) color, base
    /// opacity and the bright check, then x, y, z.
    pub fn generate<R: Rng + ?Sized>(kind: ParticleKind, shape: PopulationShape, base_speed: f64, rng: &mut R) -> Self {
        let mut particles = Vec::with_capacity(shape.count);

        for _ in 0..shape.count {
            let size = shape.size_base + rng.gen::<f64>() * shape.size_range;

            let star = match kind {
                ParticleKind::Star => {
                    let index = (rng.gen::<f64>() * STAR_PALETTE.len() as f64) as usize;
                    let color = STAR_PALETTE[index.min(STAR_PALETTE.len() - 1)];
                    let base_opacity = 0.6 + rng.gen::<f64>() * 0.4;
                    // Only larger stars roll for brightness
                    let bright = size > BRIGHT_SIZE && rng.gen::<f64>() > 0.5;
                    Some((color, base_opacity, bright))
                }
                ParticleKind::Dust => None,
            };

            let x = (rng.gen::<f64>() - 0.5) * shape.lateral_x;
            let y = (rng.gen::<f64>() - 0.5) * shape.lateral_y;
            let z = (rng.gen::<f64>() - 0.5) * shape.depth_span;

            particles.push(match star {
                Some((color, base_opacity, bright)) => Particle::star(x, y, z, size, color, base_opacity, bright),
                None => Particle::dust(x, y, z, size),
            });
        }

        Self::new(kind, shape.depth_span, base_speed, particles)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn half_distribution(&self) -> f64 {
        self.distribution / 2.0
    }
}

/// Both populations of the starfield.
#[derive(Debug, Clone)]
pub struct ParticleField {
    pub stars: Population,
    pub dust: Population,
}

impl ParticleField {
    pub fn generate<R: Rng + ?Sized>(params: &StarfieldParams, rng: &mut R) -> Self {
        let stars = Population::generate(
            ParticleKind::Star,
            PopulationShape {
                count: params.star_count,
                depth_span: params.star_distribution,
                lateral_x: params.spread_x(),
                lateral_y: params.spread_y(),
                size_base: STAR_SIZE_BASE,
                size_range: STAR_SIZE_RANGE,
            },
            params.base_star_speed,
            rng,
        );

        // Dust shares the star field's lateral spread
        let dust = Population::generate(
            ParticleKind::Dust,
            PopulationShape {
                count: params.dust_count,
                depth_span: params.dust_distribution,
                lateral_x: params.spread_x(),
                lateral_y: params.spread_y(),
                size_base: DUST_SIZE_BASE,
                size_range: DUST_SIZE_RANGE,
            },
            params.base_dust_speed,
            rng,
        );

        Self { stars, dust }
    }
}
