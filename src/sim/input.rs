//! Input snapshot consumed by the simulation
//!
//! Raw key/pointer capture happens outside the core; this is just the
//! pressed-state map plus pointer and viewport positions for one frame.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical controls and their fixed key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Up,
    Left,
    Down,
    Right,
    Shoot,
}

impl Control {
    /// Key code bound to this control (W, A, S, D, Space)
    pub const fn code(self) -> u32 {
        match self {
            Control::Up => 87,
            Control::Left => 65,
            Control::Down => 83,
            Control::Right => 68,
            Control::Shoot => 32,
        }
    }
}

/// Pressed state per key code
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: HashMap<u32, bool>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input with the given controls held
    pub fn holding(controls: &[Control]) -> Self {
        let mut input = Self::new();
        for control in controls {
            input.set(control.code(), true);
        }
        input
    }

    pub fn set(&mut self, code: u32, pressed: bool) {
        self.keys.insert(code, pressed);
    }

    pub fn press(&mut self, control: Control) {
        self.set(control.code(), true);
    }

    pub fn release(&mut self, control: Control) {
        self.set(control.code(), false);
    }

    pub fn is_down(&self, code: u32) -> bool {
        self.keys.get(&code).copied().unwrap_or(false)
    }

    pub fn held(&self, control: Control) -> bool {
        self.is_down(control.code())
    }
}

/// Everything the orchestrator reads from the outside world for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub keys: InputState,
    /// Pointer offset from the viewport center, in world units
    pub pointer: Vec2,
    /// Current viewport center as reported by the camera
    pub viewport_center: Vec2,
}

impl FrameInput {
    /// Pointer position in world space
    pub fn aim(&self) -> Vec2 {
        self.viewport_center + self.pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_keys_are_released() {
        let input = InputState::new();
        assert!(!input.held(Control::Shoot));
        assert!(!input.is_down(999));
    }

    #[test]
    fn test_press_release() {
        let mut input = InputState::holding(&[Control::Up, Control::Shoot]);
        assert!(input.held(Control::Up));
        assert!(input.is_down(32));
        input.release(Control::Up);
        assert!(!input.held(Control::Up));
        assert!(input.held(Control::Shoot));
    }

    #[test]
    fn test_aim_is_viewport_relative() {
        let input = FrameInput {
            pointer: Vec2::new(10.0, -5.0),
            viewport_center: Vec2::new(200.0, 200.0),
            ..Default::default()
        };
        assert_eq!(input.aim(), Vec2::new(210.0, 195.0));
    }
}
