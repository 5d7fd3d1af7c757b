//! Live bullets
//!
//! A projectile carries its kinematic state, its outline, the names of the
//! effects it rolled and the per-frame behaviours those effects attached.
//! Delayed effect actions (homing arm, Mitosis split) are timers owned by the
//! projectile itself, so they vanish with it.

use glam::Vec2;
use rand::Rng;

use super::effects::{Behaviour, EffectKind};
use super::entity::{AnimateCtx, Entity, StepCtx};
use super::kinematics::Kinematics;
use super::shapes::{BULLET, ShapeKind, transform_shape};
use super::timer::Timers;
use crate::consts::*;
use crate::renderer::palette::WHITE;
use crate::renderer::{Color, LineStyle, Renderer};
use crate::{SimError, heading};

/// Delayed actions a projectile can schedule on itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileAction {
    /// MatterCondenser: start steering toward the aim point
    ArmHoming,
    /// Mitosis: split into two diverging projectiles
    Split,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub damage: f32,
    pub homing: bool,
    pub can_be_homing: bool,
    pub explosive: bool,
    pub kin: Kinematics,
    pub speed_multiplier: f32,
    /// Heading in radians (0 = up, clockwise positive)
    pub direction: f32,
    /// Local-frame outline
    pub shape: Vec<Vec2>,
    /// World-frame outline, same length as `shape`
    pub points: Vec<Vec2>,
    /// Attached effect names, no duplicates
    pub effects: Vec<EffectKind>,
    /// Per-frame mutators, run in attachment order
    pub behaviours: Vec<Behaviour>,
    pub timers: Timers<ProjectileAction>,
    pub tint: Color,
    pub scale: f32,
    /// Stroke pulsation strength
    pub intensity: f32,
    dead: bool,
}

impl Default for Projectile {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            damage: 0.0,
            homing: false,
            can_be_homing: false,
            explosive: false,
            kin: Kinematics::new(BULLET_SPEED_CAP, BULLET_ACCEL),
            speed_multiplier: 1.0,
            direction: 0.0,
            shape: BULLET.to_vec(),
            points: BULLET.to_vec(),
            effects: Vec::new(),
            behaviours: Vec::new(),
            timers: Timers::new(),
            tint: WHITE,
            scale: 1.0,
            intensity: BULLET_INTENSITY,
            dead: false,
        }
    }
}

impl Projectile {
    pub fn new(pos: Vec2, direction: f32) -> Self {
        Self {
            pos,
            direction,
            ..Self::default()
        }
    }

    /// New projectile with every pool effect rolled independently
    pub fn fire<R: Rng>(pos: Vec2, direction: f32, pool: &[EffectKind], rng: &mut R, now: f64) -> Self {
        let mut bullet = Self::new(pos, direction);
        for kind in pool {
            bullet.roll_effect(*kind, rng, now);
        }
        bullet
    }

    /// Swap the outline template, keeping `points` the same length
    pub fn set_shape(&mut self, kind: ShapeKind) {
        self.shape = kind.template();
        self.points = self.shape.clone();
    }

    pub fn has_effect(&self, kind: EffectKind) -> bool {
        self.effects.contains(&kind)
    }

    /// Apply an effect if `roll` does not exceed its chance
    ///
    /// On activation the name is recorded once, every override is written and
    /// the modifier hook runs. Returns whether the effect activated.
    pub fn apply_effect(&mut self, kind: EffectKind, roll: f32, now: f64) -> bool {
        let desc = kind.descriptor();
        if !desc.activates(roll) {
            return false;
        }
        if !self.has_effect(kind) {
            self.effects.push(kind);
        }
        for o in desc.overrides {
            o.apply(self);
        }
        desc.modify(self, now);
        true
    }

    /// Apply an effect by catalog name
    pub fn apply_named(&mut self, name: &str, roll: f32, now: f64) -> Result<bool, SimError> {
        let kind: EffectKind = name.parse()?;
        Ok(self.apply_effect(kind, roll, now))
    }

    /// Apply an effect with a fresh uniform roll in [0, 1)
    pub fn roll_effect<R: Rng>(&mut self, kind: EffectKind, rng: &mut R, now: f64) -> bool {
        let roll = rng.random::<f32>();
        self.apply_effect(kind, roll, now)
    }

    /// Ask to be removed from the live set at the end of the frame
    ///
    /// Pending actions are dropped immediately, so a split that was due
    /// later this frame never happens.
    pub fn kill(&mut self) {
        self.dead = true;
        self.timers.clear();
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Mitosis: spawn a sibling at -60°, turn self +60°, slow both
    ///
    /// The sibling receives every remaining effect deterministically.
    pub fn split(&mut self, now: f64) -> Projectile {
        self.effects.retain(|e| *e != EffectKind::Mitosis);

        let mut sibling = Projectile::new(self.pos, self.direction - MITOSIS_ANGLE);
        for kind in self.effects.clone() {
            sibling.apply_effect(kind, 0.0, now);
        }
        self.direction += MITOSIS_ANGLE;

        sibling.speed_multiplier *= MITOSIS_SPEED_FACTOR;
        self.speed_multiplier *= MITOSIS_SPEED_FACTOR;

        log::debug!(
            "Mitosis split at ({:.1}, {:.1}) carrying {} effects",
            self.pos.x,
            self.pos.y,
            self.effects.len()
        );
        sibling
    }
}

impl Entity for Projectile {
    fn step(&mut self, ctx: &mut StepCtx<'_>) {
        if self.dead {
            return;
        }
        for action in self.timers.take_due(ctx.now) {
            match action {
                ProjectileAction::ArmHoming => self.homing = true,
                ProjectileAction::Split => {
                    let sibling = self.split(ctx.now);
                    ctx.spawned.push(sibling);
                }
            }
        }

        let speed = self.kin.integrate(ctx.dt);
        self.kin.speed = speed * self.speed_multiplier;
        self.pos += heading(self.direction) * self.kin.speed;
    }

    fn animate(&mut self, ctx: &mut AnimateCtx<'_>, out: &mut dyn Renderer) {
        if self.dead {
            return;
        }
        transform_shape(&self.shape, &mut self.points, self.pos, self.direction, self.scale);

        let mut behaviours = std::mem::take(&mut self.behaviours);
        for b in &mut behaviours {
            b.on_frame(self, ctx, out);
        }
        self.behaviours = behaviours;

        out.line_style(LineStyle::new(2.0, self.tint.darken(self.intensity * ctx.shimmer())));
        out.begin_fill(self.tint, 0.25);
        out.draw_polygon(&self.points);
        out.end_fill();
    }
}
