//! Polyfighter - simulation core of a top-down arcade shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (avatar, items, projectiles, bullet effects)
//! - `renderer`: Draw-command interface consumed by an external backend
//! - `settings`: Session configuration
//! - `error`: Error type for name lookups and settings loading

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::Settings;

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
///
/// Times are in milliseconds, matching the frame timestamps fed to the orchestrator.
pub mod consts {
    use std::f32::consts::FRAC_PI_3;

    /// Screen layer dimensions (starfield wraps at these bounds)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Soft cap on live projectiles (oldest evicted first)
    pub const MAX_PROJECTILES: usize = 200;
    /// Background stars created at session start
    pub const STAR_COUNT: usize = 100;

    /// Avatar defaults
    pub const PLAYER_START_X: f32 = 200.0;
    pub const PLAYER_START_Y: f32 = 200.0;
    pub const PLAYER_SPEED_CAP: f32 = 10.0;
    /// Speed set instantly by a strafe input
    pub const PLAYER_STRAFE_SPEED: f32 = 3.0;
    /// Forward acceleration while thrust is held
    pub const PLAYER_THRUST: f32 = 0.01;
    /// Per-frame speed retention (2% friction)
    pub const PLAYER_FRICTION: f32 = 0.98;
    /// Blend factor used for facing and heading easing
    pub const TURN_BLEND: f32 = 0.1;
    pub const SHOOT_COOLDOWN_MS: f64 = 100.0;
    /// Max random heading jitter added to every shot (radians)
    pub const SHOT_JITTER: f32 = 0.1;

    /// Projectile defaults
    pub const BULLET_SPEED_CAP: f32 = 2.0;
    pub const BULLET_ACCEL: f32 = 0.1;
    pub const BULLET_INTENSITY: f32 = 0.2;

    /// MatterCondenser homing
    pub const HOMING_DELAY_MS: f64 = 100.0;
    pub const HOMING_BLEND: f32 = 0.1;
    pub const HOMING_RELEASE_DISTANCE: f32 = 50.0;

    /// Mitosis split
    pub const MITOSIS_DELAY_MS: f64 = 200.0;
    pub const MITOSIS_ANGLE: f32 = FRAC_PI_3;
    pub const MITOSIS_SPEED_FACTOR: f32 = 0.8;

    /// ImpactDetonator
    pub const DETONATOR_SPEED_DIVISOR: f32 = 1.2;

    /// EMP gadget
    pub const EMP_SEGMENTS: usize = 30;
    pub const EMP_BASE_RADIUS: f32 = 20.0;
    pub const EMP_CHARGE_RATE: f32 = 0.002;
    pub const EMP_DISCHARGE_RATE: f32 = 0.003;
    pub const EMP_PULSES: u32 = 3;
    pub const EMP_PULSE_DELAY_MS: f64 = 200.0;
    /// Shockwave radius as a multiple of the base radius
    pub const EMP_SHOCKWAVE_FACTOR: f32 = 10.0;
    pub const EMP_FADE_BLEND: f32 = 0.05;

    /// Barrier and Tesla Coil rings
    pub const RING_SEGMENTS: usize = 15;
    pub const BARRIER_RADIUS: f32 = 15.0;
    /// Extra radius per stacked barrier (also widens the EMP)
    pub const BARRIER_STEP: f32 = 3.0;
    pub const TESLA_RADIUS: f32 = 45.0;

    /// Cursor offset from the avatar, with and without a barrier equipped
    pub const CURSOR_RADIUS: f32 = 30.0;
    pub const CURSOR_RADIUS_SHIELDED: f32 = 50.0;

    /// Drones
    pub const DRONE_ORBIT_RADIUS: f32 = 35.0;
    pub const DRONE_SCALE: f32 = 0.5;

    /// Camera anchor easing toward the player/aim midpoint
    pub const CAMERA_BLEND: f32 = 0.1;
    /// Radius of the red reference circle drawn at the world origin
    pub const ORIGIN_MARKER_RADIUS: f32 = 100.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Component-wise linear interpolation between two points
#[inline]
pub fn lerp_vec(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    Vec2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

/// Interpolate between two angles along the shortest arc
///
/// Never rotates by more than π for `t` in [0, 1].
#[inline]
pub fn angle_lerp(a: f32, b: f32, t: f32) -> f32 {
    use std::f32::consts::TAU;
    let d = (b - a) % TAU;
    a + (((2.0 * d) % TAU) - d) * t
}

/// Clamp `val` into `[min, max]`
///
/// Total for all inputs: when `min > max` the result is `max`.
#[inline]
pub fn clamp(min: f32, val: f32, max: f32) -> f32 {
    max.min(min.max(val))
}

/// Wrap a value that left `[min, max]` back to the opposite bound
#[inline]
pub fn wrap_clamp(min: f32, val: f32, max: f32) -> f32 {
    if val > max {
        min
    } else if val < min {
        max
    } else {
        val
    }
}

/// Offset a point by a small random amount in each axis, up to `amount`
#[inline]
pub fn wiggle<R: Rng>(point: Vec2, amount: f32, rng: &mut R) -> Vec2 {
    use std::f32::consts::PI;
    let jx = (rng.random::<f32>() * PI).cos();
    let jy = (rng.random::<f32>() * PI).cos();
    point + Vec2::new(jx, jy) * amount
}

/// Euclidean distance between two points
#[inline]
pub fn dist(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if !angle.is_finite() {
        return angle;
    }
    angle %= TAU;
    while angle >= PI {
        angle -= TAU;
    }
    while angle < -PI {
        angle += TAU;
    }
    angle
}

/// Screen-space heading (0 = up, clockwise positive) pointing from `from` to `to`
#[inline]
pub fn aim_angle(from: Vec2, to: Vec2) -> f32 {
    std::f32::consts::FRAC_PI_2 + (to.y - from.y).atan2(to.x - from.x)
}

/// Unit vector for a screen-space heading (0 = up, clockwise positive)
#[inline]
pub fn heading(direction: f32) -> Vec2 {
    Vec2::new(direction.sin(), -direction.cos())
}
