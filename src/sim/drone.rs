//! Attack drones
//!
//! Small white hulls orbiting the avatar. They chase their orbit slot, copy the
//! avatar's facing and fire the avatar's bullet pool on the shoot key.

use glam::Vec2;

use super::effects::EffectKind;
use super::entity::{AnimateCtx, Entity, StepCtx};
use super::input::Control;
use super::player::{draw_hull, shot_jitter};
use super::projectile::Projectile;
use super::shapes::PLAYER;
use super::timer::Cooldown;
use crate::consts::*;
use crate::renderer::palette::WHITE;
use crate::renderer::{Color, Renderer};
use crate::{angle_lerp, lerp_vec};

#[derive(Debug, Clone)]
pub struct Drone {
    pub pos: Vec2,
    pub rotation: f32,
    pub gate: Cooldown,
    /// Copy of the avatar's pool, refreshed by [`Drone::follow`]
    pub bullet_pool: Vec<EffectKind>,
    pub tint: Color,
    pub scale: f32,
    points: Vec<Vec2>,
}

impl Default for Drone {
    fn default() -> Self {
        Self::new()
    }
}

impl Drone {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            rotation: 0.0,
            gate: Cooldown::default(),
            bullet_pool: Vec::new(),
            tint: WHITE,
            scale: DRONE_SCALE,
            points: PLAYER.to_vec(),
        }
    }

    /// Orbit slot `index` of `count` around `leader` at frame `time`
    pub fn orbit_target(leader: Vec2, index: usize, count: usize, time: f64) -> Vec2 {
        let n = count.max(1) as f32;
        let rot = std::f32::consts::TAU * index as f32 / n + (time / 360.0) as f32;
        let radius = DRONE_ORBIT_RADIUS + count as f32;
        leader - radius * Vec2::new(rot.cos(), rot.sin())
    }

    /// Ease toward the orbit slot and the leader's facing
    pub fn follow(
        &mut self,
        leader_pos: Vec2,
        leader_rotation: f32,
        leader_pool: &[EffectKind],
        index: usize,
        count: usize,
        time: f64,
    ) {
        let target = Self::orbit_target(leader_pos, index, count, time);
        self.pos = lerp_vec(self.pos, target, TURN_BLEND);
        self.rotation = angle_lerp(self.rotation, leader_rotation, TURN_BLEND);
        if self.bullet_pool != leader_pool {
            self.bullet_pool = leader_pool.to_vec();
        }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }
}

impl Entity for Drone {
    /// Drones never move on their own; only the shoot key matters
    fn step(&mut self, ctx: &mut StepCtx<'_>) {
        if ctx.input.held(Control::Shoot) && self.gate.try_fire(ctx.now, SHOOT_COOLDOWN_MS) {
            let direction = self.rotation + shot_jitter(&mut *ctx.rng);
            let bullet = Projectile::fire(self.pos, direction, &self.bullet_pool, &mut *ctx.rng, ctx.now);
            ctx.spawned.push(bullet);
        }
    }

    fn animate(&mut self, ctx: &mut AnimateCtx<'_>, out: &mut dyn Renderer) {
        draw_hull(&mut self.points, self.pos, self.rotation, self.scale, self.tint, ctx, out);
    }
}
