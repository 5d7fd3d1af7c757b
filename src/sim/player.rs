//! Player avatar
//!
//! Strafe/thrust movement with friction, facing eased toward the cursor, a
//! cooldown-gated gun and the equipped loadout.

use glam::Vec2;
use rand::Rng;

use super::drone::Drone;
use super::effects::EffectKind;
use super::entity::{AnimateCtx, Entity, StepCtx};
use super::input::Control;
use super::items::{EquippedItem, Item, ItemKind};
use super::kinematics::Kinematics;
use super::projectile::Projectile;
use super::shapes::{PLAYER, transform_shape};
use super::timer::Cooldown;
use crate::consts::*;
use crate::renderer::palette::PINK;
use crate::renderer::{Color, LineStyle, Renderer};
use crate::{aim_angle, angle_lerp, heading, lerp, wiggle};

/// Random heading offset added to every shot, in `[-SHOT_JITTER, SHOT_JITTER]`
pub fn shot_jitter<R: Rng>(rng: &mut R) -> f32 {
    SHOT_JITTER * (rng.random::<f32>() * std::f32::consts::PI).cos()
}

/// Draw the triangular hull shared by the avatar and its drones
///
/// Each point wobbles around the `(sin, cos)` offset of the facing.
pub fn draw_hull(
    points: &mut Vec<Vec2>,
    pos: Vec2,
    rotation: f32,
    scale: f32,
    tint: Color,
    ctx: &mut AnimateCtx<'_>,
    out: &mut dyn Renderer,
) {
    out.line_style(LineStyle::new(2.0, tint.darken(0.2 * ctx.shimmer())));
    out.begin_fill(tint, 0.15);

    transform_shape(&PLAYER, points, pos, rotation, scale);
    let (s, c) = rotation.sin_cos();
    for p in points.iter_mut() {
        *p += wiggle(Vec2::new(s, c), 0.5, &mut *ctx.rng);
    }

    out.draw_polygon(points);
    out.end_fill();
}

#[derive(Debug)]
pub struct Player {
    pub pos: Vec2,
    /// Facing in radians (0 = up, clockwise positive)
    pub rotation: f32,
    pub kin: Kinematics,
    /// Direction of travel, separate from facing
    pub accel_direction: f32,
    pub gate: Cooldown,
    /// Equipped items in loadout order
    pub items: Vec<EquippedItem>,
    pub drones: Vec<Drone>,
    /// Effects rolled on every shot, no duplicates
    pub bullet_pool: Vec<EffectKind>,
    pub tint: Color,
    pub scale: f32,
    points: Vec<Vec2>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            rotation: 0.0,
            kin: Kinematics::new(PLAYER_SPEED_CAP, 0.0),
            accel_direction: 0.0,
            gate: Cooldown::default(),
            items: Vec::new(),
            drones: Vec::new(),
            bullet_pool: Vec::new(),
            tint: PINK,
            scale: 1.0,
            points: PLAYER.to_vec(),
        }
    }
}

impl Player {
    /// Avatar equipped with `loadout`, in order
    pub fn with_loadout(loadout: &[ItemKind]) -> Self {
        let mut player = Self::default();
        for &kind in loadout {
            let item = Item::create(kind, &mut player.bullet_pool, &mut player.drones);
            player.items.push(EquippedItem { kind, item });
        }
        log::debug!(
            "Equipped {} items, {} drones, bullet pool {:?}",
            player.items.len(),
            player.drones.len(),
            player.bullet_pool
        );
        player
    }

    pub fn has_item(&self, kind: ItemKind) -> bool {
        self.items.iter().any(|e| e.kind == kind)
    }

    pub fn count_items(&self, kind: ItemKind) -> usize {
        self.items.iter().filter(|e| e.kind == kind).count()
    }

    /// Orientation of the first equipped item, if it has one
    pub fn lead_orientation(&self) -> Option<f32> {
        self.items.first().and_then(|e| e.item.orientation())
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }
}

impl Entity for Player {
    fn step(&mut self, ctx: &mut StepCtx<'_>) {
        let lead = self.lead_orientation();
        if let Some(target) = lead {
            self.rotation = angle_lerp(self.rotation, target, TURN_BLEND);
        }
        let rot = lead.unwrap_or(self.rotation);

        let input = ctx.input;
        if input.held(Control::Left) {
            self.accel_direction = rot - std::f32::consts::FRAC_PI_2;
            self.kin.speed = PLAYER_STRAFE_SPEED;
        }
        if input.held(Control::Right) {
            self.accel_direction = rot + std::f32::consts::FRAC_PI_2;
            self.kin.speed = PLAYER_STRAFE_SPEED;
        }
        let thrust = input.held(Control::Up);
        self.kin.accel = if thrust { PLAYER_THRUST } else { 0.0 };

        if thrust || input.held(Control::Left) || input.held(Control::Right) {
            self.accel_direction = lerp(self.accel_direction, self.rotation, TURN_BLEND);
        }

        let speed = self.kin.integrate(ctx.dt);
        self.pos += heading(self.accel_direction) * speed;
        self.kin.speed *= PLAYER_FRICTION;

        if input.held(Control::Shoot) && self.gate.try_fire(ctx.now, SHOOT_COOLDOWN_MS) {
            let aim = if self.has_item(ItemKind::Cursor) {
                aim_angle(self.pos, ctx.aim)
            } else {
                self.rotation
            };
            let direction = aim + shot_jitter(&mut *ctx.rng);
            let bullet = Projectile::fire(self.pos, direction, &self.bullet_pool, &mut *ctx.rng, ctx.now);
            ctx.spawned.push(bullet);
        }
    }

    fn animate(&mut self, ctx: &mut AnimateCtx<'_>, out: &mut dyn Renderer) {
        draw_hull(&mut self.points, self.pos, self.rotation, self.scale, self.tint, ctx, out);
    }
}
