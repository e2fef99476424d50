/*
 * Camera Module
 *
 * This module defines the CameraState struct that tracks the cumulative
 * rotation of the scene and the decaying look-around contribution from the
 * pointer. The camera never moves; the three layers rotate around it.
 */

use glam::{DQuat, DVec3, EulerRot};

// Pointer deltas keep this fraction per nominal 60 Hz frame
pub const DELTA_DECAY: f64 = 0.92;
pub const DECAY_REFERENCE_HZ: f64 = 60.0;

#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    // Degrees, unbounded
    pub angle_x: f64,
    pub angle_y: f64,
    pub angle_z: f64,
    pub yaw_delta: f64,
    pub pitch_delta: f64,
    pub speed_multiplier: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraState {
    pub fn new() -> Self {
        Self {
            angle_x: 0.0,
            angle_y: 0.0,
            angle_z: 0.0,
            yaw_delta: 0.0,
            pitch_delta: 0.0,
            speed_multiplier: 1.0,
        }
    }

    // Advance angles by the base rates plus the pointer contribution
    pub fn integrate(&mut self, angular_speed: DVec3, dt: f64) {
        self.angle_y += (angular_speed.y + self.yaw_delta) * dt;
        self.angle_x += (angular_speed.x + self.pitch_delta) * dt;
        self.angle_z += angular_speed.z * dt;
    }

    // Frame-rate independent exponential decay of the pointer deltas
    pub fn decay_deltas(&mut self, dt: f64) {
        let decay = DELTA_DECAY.powf(dt * DECAY_REFERENCE_HZ);
        self.yaw_delta *= decay;
        self.pitch_delta *= decay;
    }

    pub fn add_pointer_delta(&mut self, yaw: f64, pitch: f64) {
        self.yaw_delta += yaw;
        self.pitch_delta += pitch;
    }

    pub fn angles(&self) -> DVec3 {
        DVec3::new(self.angle_x, self.angle_y, self.angle_z)
    }

    // Combined Rx * Ry * Rz rotation shared by every layer
    pub fn rotation(&self) -> DQuat {
        DQuat::from_euler(
            EulerRot::XYZ,
            self.angle_x.to_radians(),
            self.angle_y.to_radians(),
            self.angle_z.to_radians(),
        )
    }
}
