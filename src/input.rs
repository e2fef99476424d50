/*
 * Input Module
 *
 * This module turns raw user input into starfield actions.
 *
 * Features:
 * - Pointer look-around, only while the pointer is locked to the window
 * - Click to start ambient audio and request the pointer lock
 * - 'D' toggles the detail level, Escape releases the pointer
 * - F3 toggles the debug panel
 *
 * The controller never talks to the windowing system itself. It tells the
 * host what to do and the host reports back whether the lock was acquired,
 * the same way a browser reports a lock-change event.
 */

use log::{error, info};

use crate::camera::CameraState;
use crate::error::PointerLockError;

// Degrees per second of rotation added per pixel of pointer motion
pub const POINTER_SENSITIVITY: f64 = 0.1;

/// Keys the controller cares about, independent of the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Char(char),
    Escape,
    F3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ToggleDetail,
    ReleasePointer,
    ToggleDebug,
}

/// What the host should do in response to a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickActions {
    pub start_audio: bool,
    pub request_pointer_lock: bool,
}

#[derive(Debug, Default)]
pub struct InputController {
    pointer_locked: bool,
}

impl InputController {
    pub fn new() -> Self {
        Self { pointer_locked: false }
    }

    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    pub fn on_click(&self) -> ClickActions {
        ClickActions {
            start_audio: true,
            request_pointer_lock: !self.pointer_locked,
        }
    }

    // Outcome of a lock request made by the host
    pub fn on_pointer_lock_result(&mut self, result: Result<(), PointerLockError>) {
        match result {
            Ok(()) => self.set_pointer_locked(true),
            Err(e) => {
                // Look-around stays off until the next click
                error!("Pointer lock failed: {}", e);
                self.set_pointer_locked(false);
            }
        }
    }

    pub fn set_pointer_locked(&mut self, locked: bool) {
        if locked != self.pointer_locked {
            info!("Pointer {}", if locked { "locked" } else { "released" });
        }
        self.pointer_locked = locked;
    }

    // Feed raw pointer motion into the camera's look-around deltas
    pub fn on_pointer_motion(&self, camera: &mut CameraState, dx: f64, dy: f64) -> bool {
        if !self.pointer_locked {
            return false;
        }
        camera.add_pointer_delta(dx * POINTER_SENSITIVITY, dy * POINTER_SENSITIVITY);
        true
    }

    pub fn on_key(&self, key: InputKey) -> Option<KeyAction> {
        match key {
            InputKey::Char(c) if c.eq_ignore_ascii_case(&'d') => Some(KeyAction::ToggleDetail),
            InputKey::Escape => Some(KeyAction::ReleasePointer),
            InputKey::F3 => Some(KeyAction::ToggleDebug),
            InputKey::Char(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_ignored_until_locked() {
        let mut input = InputController::new();
        let mut camera = CameraState::new();

        assert!(!input.on_pointer_motion(&mut camera, 50.0, 20.0));
        assert_eq!(camera.yaw_delta, 0.0);

        input.on_pointer_lock_result(Ok(()));
        assert!(input.on_pointer_motion(&mut camera, 50.0, 20.0));
        assert!((camera.yaw_delta - 5.0).abs() < 1e-12);
        assert!((camera.pitch_delta - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_click_requests_lock_only_when_unlocked() {
        let mut input = InputController::new();
        assert!(input.on_click().request_pointer_lock);
        assert!(input.on_click().start_audio);

        input.set_pointer_locked(true);
        assert!(!input.on_click().request_pointer_lock);
    }

    #[test]
    fn test_failed_lock_allows_retry() {
        let mut input = InputController::new();
        input.on_pointer_lock_result(Err(PointerLockError::Rejected("no focus".to_string())));
        assert!(!input.pointer_locked());
        assert!(input.on_click().request_pointer_lock);
    }

    #[test]
    fn test_key_mapping() {
        let input = InputController::new();
        assert_eq!(input.on_key(InputKey::Char('d')), Some(KeyAction::ToggleDetail));
        assert_eq!(input.on_key(InputKey::Char('D')), Some(KeyAction::ToggleDetail));
        assert_eq!(input.on_key(InputKey::Escape), Some(KeyAction::ReleasePointer));
        assert_eq!(input.on_key(InputKey::F3), Some(KeyAction::ToggleDebug));
        assert_eq!(input.on_key(InputKey::Char('x')), None);
    }
}
