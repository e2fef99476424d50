/*
 * Particle Module
 *
 * This module defines the Particle struct and the per-particle depth
 * behavior shared by both populations:
 * 1. Travel: move toward the near boundary at a constant rate
 * 2. Wraparound: reappear at the far boundary after passing the near one
 * 3. Depth look: stars recompute opacity and the near-camera flag
 */

// Star colors, picked uniformly at creation
pub const STAR_PALETTE: [StarColor; 5] = [
    StarColor::from_hex(0xFFFFFF),
    StarColor::from_hex(0xFFE484),
    StarColor::from_hex(0xB3DFFF),
    StarColor::from_hex(0xFFD1A1),
    StarColor::from_hex(0xCAD8FF),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl StarColor {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }
}

// Visual attributes only stars carry
#[derive(Debug, Clone, PartialEq)]
pub struct StarLook {
    pub color: StarColor,
    pub base_opacity: f64,
    pub bright: bool,
    // Recomputed every frame from depth
    pub opacity: f64,
    pub near: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParticleLook {
    Star(StarLook),
    Dust,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub size: f64,
    pub look: ParticleLook,
}

impl Particle {
    pub fn dust(x: f64, y: f64, z: f64, size: f64) -> Self {
        Self { x, y, z, size, look: ParticleLook::Dust }
    }

    pub fn star(x: f64, y: f64, z: f64, size: f64, color: StarColor, base_opacity: f64, bright: bool) -> Self {
        Self {
            x,
            y,
            z,
            size,
            look: ParticleLook::Star(StarLook {
                color,
                base_opacity,
                bright,
                opacity: base_opacity,
                near: false,
            }),
        }
    }

    pub fn star_look(&self) -> Option<&StarLook> {
        match &self.look {
            ParticleLook::Star(look) => Some(look),
            ParticleLook::Dust => None,
        }
    }

    // Move toward the near boundary and wrap back to the far one
    pub fn advance_depth(&mut self, speed: f64, distribution: f64) {
        self.z = wrap_depth(self.z - speed, distribution);
    }

    // Refresh the depth-derived look; dust has none
    pub fn refresh_look(&mut self, distribution: f64, proximity_threshold: f64) {
        if let ParticleLook::Star(look) = &mut self.look {
            let half = distribution / 2.0;
            let norm_z = (self.z + half) / distribution;
            look.opacity = star_opacity(norm_z, look.base_opacity);
            look.near = is_near(self.z, distribution, proximity_threshold);
        }
    }
}

// Fold a depth back into [-half, half)
pub fn wrap_depth(z: f64, distribution: f64) -> f64 {
    let half = distribution / 2.0;
    if (-half..half).contains(&z) {
        return z;
    }

    // Passing the near boundary by less than one span moves back exactly one span
    let wrapped = z + distribution;
    if z < -half && wrapped >= -half {
        return wrapped;
    }

    // Several spans in one step, or a depth past the far boundary
    (z + half).rem_euclid(distribution) - half
}

// Opacity by normalized depth: 0 at the near boundary, 1 at the far one
pub fn star_opacity(norm_z: f64, base_opacity: f64) -> f64 {
    ((0.2 + norm_z * 0.8) * base_opacity).min(1.0)
}

// True inside the proximity shell just past the wrap point
pub fn is_near(z: f64, distribution: f64, proximity_threshold: f64) -> bool {
    z < -distribution / 2.0 + proximity_threshold
}
