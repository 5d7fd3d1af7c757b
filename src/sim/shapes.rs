//! Shape templates and procedural point generation
//!
//! Templates are local-frame offsets; entities transform them into
//! world-frame points every frame.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::wiggle;

pub const BULLET: [Vec2; 4] = [
    Vec2::new(-4.0, 0.0),
    Vec2::new(0.0, 8.0),
    Vec2::new(4.0, 0.0),
    Vec2::new(0.0, -8.0),
];

pub const CURSOR: [Vec2; 6] = [
    Vec2::new(-16.0, 8.0),
    Vec2::new(-8.0, 0.0),
    Vec2::new(0.0, -16.0),
    Vec2::new(8.0, 0.0),
    Vec2::new(16.0, 8.0),
    Vec2::new(0.0, 0.0),
];

pub const PLAYER: [Vec2; 3] = [
    Vec2::new(-8.0, 16.0),
    Vec2::new(8.0, 16.0),
    Vec2::new(0.0, -16.0),
];

/// Point count of the procedural bomb ring
pub const BOMB_SEGMENTS: usize = 20;

/// Named shape templates that effects can swap in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Bullet,
    /// Ring whose points are generated each frame
    Bomb,
    Cursor,
    Player,
}

impl ShapeKind {
    pub fn template(self) -> Vec<Vec2> {
        match self {
            ShapeKind::Bullet => BULLET.to_vec(),
            ShapeKind::Bomb => vec![Vec2::ZERO; BOMB_SEGMENTS],
            ShapeKind::Cursor => CURSOR.to_vec(),
            ShapeKind::Player => PLAYER.to_vec(),
        }
    }
}

/// Rotate and scale `shape` about `origin`, writing into `points`
///
/// `points` is resized to match `shape`.
pub fn transform_shape(shape: &[Vec2], points: &mut Vec<Vec2>, origin: Vec2, rotation: f32, scale: f32) {
    points.resize(shape.len(), Vec2::ZERO);
    let (s, c) = rotation.sin_cos();
    for (p, local) in points.iter_mut().zip(shape) {
        let px = scale * local.x;
        let py = scale * local.y;
        *p = origin + Vec2::new(px * c - py * s, py * c + px * s);
    }
}

/// Evenly spaced ring around `center`, rotated by `rotation`, each point jittered by up to `jitter`
pub fn fill_ring<R: Rng>(
    points: &mut [Vec2],
    center: Vec2,
    radius: f32,
    rotation: f32,
    jitter: f32,
    rng: &mut R,
) {
    let segments = points.len().max(1) as f32;
    for (i, p) in points.iter_mut().enumerate() {
        let a = rotation + std::f32::consts::TAU * i as f32 / segments;
        let offset = Vec2::new(radius * a.sin(), radius * a.cos());
        *p = center + wiggle(offset, jitter, rng);
    }
}
