//! Speed integration shared by the avatar and projectiles

use serde::{Deserialize, Serialize};

use crate::clamp;

/// Scalar speed with acceleration and a per-ms cap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub speed: f32,
    pub speed_cap: f32,
    pub accel: f32,
}

impl Kinematics {
    pub fn new(speed_cap: f32, accel: f32) -> Self {
        Self {
            speed: 0.0,
            speed_cap,
            accel,
        }
    }

    /// Integrate acceleration over `dt` and clamp to `±speed_cap·dt`
    ///
    /// Returns the clamped speed (also stored).
    pub fn integrate(&mut self, dt: f32) -> f32 {
        self.speed += self.accel * dt;
        self.speed = clamp(-self.speed_cap * dt, self.speed, self.speed_cap * dt);
        self.speed
    }
}
