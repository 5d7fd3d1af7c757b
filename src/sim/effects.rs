//! Bullet effect catalog
//!
//! Each effect has an activation chance, a set of property overrides written
//! onto the projectile when it activates, and a modifier hook that may arm
//! timers or attach a per-frame [`Behaviour`].

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::AnimateCtx;
use super::projectile::{Projectile, ProjectileAction};
use super::shapes::{BOMB_SEGMENTS, ShapeKind, fill_ring};
use crate::consts::*;
use crate::renderer::palette::{GREEN, PINK, PURPLE};
use crate::renderer::{Color, LineStyle, Renderer};
use crate::{SimError, angle_lerp, aim_angle, dist, normalize_angle};

/// Named bullet effects, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    MatterCondenser,
    ImpactDetonator,
    Mitosis,
    BetaDecay,
}

impl EffectKind {
    pub const ALL: [EffectKind; 4] = [
        EffectKind::MatterCondenser,
        EffectKind::ImpactDetonator,
        EffectKind::Mitosis,
        EffectKind::BetaDecay,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EffectKind::MatterCondenser => "MatterCondenser",
            EffectKind::ImpactDetonator => "ImpactDetonator",
            EffectKind::Mitosis => "Mitosis",
            EffectKind::BetaDecay => "BetaDecay",
        }
    }

    pub fn descriptor(self) -> &'static EffectDescriptor {
        &CATALOG[self as usize]
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EffectKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EffectKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| SimError::UnknownEffect(s.to_string()))
    }
}

/// A projectile property set unconditionally when an effect activates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyOverride {
    CanBeHoming(bool),
    Explosive(bool),
    Intensity(f32),
    Scale(f32),
    SpeedCap(f32),
    Tint(Color),
    Shape(ShapeKind),
}

impl PropertyOverride {
    pub fn apply(&self, p: &mut Projectile) {
        match *self {
            PropertyOverride::CanBeHoming(v) => p.can_be_homing = v,
            PropertyOverride::Explosive(v) => p.explosive = v,
            PropertyOverride::Intensity(v) => p.intensity = v,
            PropertyOverride::Scale(v) => p.scale = v,
            PropertyOverride::SpeedCap(v) => p.kin.speed_cap = v,
            PropertyOverride::Tint(c) => p.tint = c,
            PropertyOverride::Shape(kind) => p.set_shape(kind),
        }
    }
}

/// Static description of one catalog entry
#[derive(Debug)]
pub struct EffectDescriptor {
    pub kind: EffectKind,
    /// Activation probability in [0, 1]
    pub chance: f32,
    pub overrides: &'static [PropertyOverride],
}

impl EffectDescriptor {
    /// A roll activates the effect when it does not exceed the chance
    pub fn activates(&self, roll: f32) -> bool {
        roll <= self.chance
    }

    /// Modifier hook, run once per activation
    pub fn modify(&self, p: &mut Projectile, now: f64) {
        match self.kind {
            EffectKind::MatterCondenser => {
                p.timers.schedule(now, HOMING_DELAY_MS, ProjectileAction::ArmHoming);
                p.behaviours.push(Behaviour::Homing);
            }
            EffectKind::ImpactDetonator => {
                p.speed_multiplier /= DETONATOR_SPEED_DIVISOR;
                p.scale += 1.0;
                p.behaviours.push(Behaviour::Bomb);
            }
            EffectKind::Mitosis => {
                p.timers.schedule(now, MITOSIS_DELAY_MS, ProjectileAction::Split);
            }
            EffectKind::BetaDecay => {
                p.behaviours.push(Behaviour::DecayRing {
                    points: vec![Vec2::ZERO; BOMB_SEGMENTS],
                });
            }
        }
    }
}

pub static CATALOG: [EffectDescriptor; 4] = [
    EffectDescriptor {
        kind: EffectKind::MatterCondenser,
        chance: 0.25,
        overrides: &[
            PropertyOverride::CanBeHoming(true),
            PropertyOverride::Intensity(0.8),
            PropertyOverride::Scale(2.0),
            PropertyOverride::SpeedCap(1.0),
        ],
    },
    EffectDescriptor {
        kind: EffectKind::ImpactDetonator,
        chance: 0.25,
        overrides: &[
            PropertyOverride::Explosive(true),
            PropertyOverride::Intensity(5.0),
            PropertyOverride::Tint(PINK),
            PropertyOverride::Shape(ShapeKind::Bomb),
        ],
    },
    EffectDescriptor {
        kind: EffectKind::Mitosis,
        chance: 0.25,
        overrides: &[],
    },
    EffectDescriptor {
        kind: EffectKind::BetaDecay,
        chance: 0.25,
        overrides: &[],
    },
];

/// Look up a catalog entry by name
pub fn lookup(name: &str) -> Result<&'static EffectDescriptor, SimError> {
    let kind: EffectKind = name.parse()?;
    Ok(kind.descriptor())
}

/// Per-frame mutator attached to a projectile by an effect
#[derive(Debug, Clone, PartialEq)]
pub enum Behaviour {
    /// Steer toward the aim point while armed
    Homing,
    /// Pulsing ring replacing the bullet outline
    Bomb,
    /// Cosmetic ring drawn around the projectile
    DecayRing { points: Vec<Vec2> },
}

impl Behaviour {
    /// Runs after the projectile's points are rebuilt, before it is drawn
    pub fn on_frame(&mut self, p: &mut Projectile, ctx: &mut AnimateCtx<'_>, out: &mut dyn Renderer) {
        match self {
            Behaviour::Homing => {
                p.tint = PURPLE.brighten(1.0);
                let target = aim_angle(p.pos, ctx.aim);
                let distance = dist(p.pos, ctx.aim);
                let deviation = normalize_angle(target - p.direction).abs();
                if p.homing && deviation < std::f32::consts::FRAC_PI_2 {
                    p.direction = angle_lerp(p.direction, target, HOMING_BLEND);
                    if distance < HOMING_RELEASE_DISTANCE {
                        p.homing = false;
                    }
                }
            }
            Behaviour::Bomb => {
                p.scale += 0.1 * (0.1 * ctx.shimmer());
                let radius = p.scale * 3.0;
                let (center, spin) = (p.pos, ctx.spin());
                fill_ring(&mut p.points, center, radius, spin, 3.0, &mut *ctx.rng);
            }
            Behaviour::DecayRing { points } => {
                let tint = GREEN.darken((3.0 * ctx.shimmer()).abs());
                out.line_style(LineStyle::new(2.0, tint));
                out.begin_fill(tint, 0.15);
                fill_ring(points, p.pos, p.scale * 15.0, ctx.spin(), 3.0, &mut *ctx.rng);
                out.draw_polygon(points);
                out.end_fill();
            }
        }
    }
}
