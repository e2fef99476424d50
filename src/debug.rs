/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * shown in the debug panel.
 *
 * Includes metrics for:
 * - FPS (frames per second)
 * - Frame time
 * - Number of particles drawn last frame
 * - Number of stars inside the proximity shell
 */

use std::cell::Cell;
use std::time::Duration;

// Debug information to display
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    // Written by the renderer, which only sees the model immutably
    pub visible_particles: Cell<usize>,
    pub near_stars: Cell<usize>,
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: Duration::ZERO,
            visible_particles: Cell::new(0),
            near_stars: Cell::new(0),
        }
    }
}
