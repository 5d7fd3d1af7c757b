//! Per-frame entity contract
//!
//! Every simulated thing (avatar, drones, items, projectiles) exposes the same
//! two operations: a physics `step` and a procedural `animate` that rebuilds
//! its geometry and emits draw commands.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::input::InputState;
use super::projectile::Projectile;
use crate::renderer::Renderer;

/// Context for the physics half of a frame
pub struct StepCtx<'a> {
    pub input: &'a InputState,
    /// Milliseconds since the previous frame
    pub dt: f32,
    /// Current frame timestamp (ms)
    pub now: f64,
    /// Pointer position in world space
    pub aim: Vec2,
    pub rng: &'a mut Pcg32,
    /// Projectiles created during this step, inserted by the orchestrator
    pub spawned: &'a mut Vec<Projectile>,
}

/// Context for the geometry/draw half of a frame
pub struct AnimateCtx<'a> {
    /// Avatar position the gadgets are centered on
    pub player_pos: Vec2,
    /// Pointer position in world space
    pub aim: Vec2,
    /// Current frame timestamp (ms)
    pub time: f64,
    /// Number of Barrier items equipped
    pub barriers: usize,
    pub rng: &'a mut Pcg32,
}

impl AnimateCtx<'_> {
    /// Shared oscillator used for stroke shading, `sin(time / 60)`
    pub fn shimmer(&self) -> f32 {
        (self.time / 60.0).sin() as f32
    }

    /// Slow ring rotation, `time / 360` radians
    pub fn spin(&self) -> f32 {
        (self.time / 360.0) as f32
    }
}

pub trait Entity {
    fn step(&mut self, ctx: &mut StepCtx<'_>);
    fn animate(&mut self, ctx: &mut AnimateCtx<'_>, out: &mut dyn Renderer);
}
