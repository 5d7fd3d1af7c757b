//! Equippable items
//!
//! The item catalog, the static loadout, and the per-item gadgets. Passive
//! gadgets (Cursor, Barrier, Tesla Coil) only rebuild their geometry around the
//! avatar; granters register a bullet effect once at construction; the drone
//! bay adds a satellite to the avatar instead of doing anything per frame.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::drone::Drone;
use super::effects::EffectKind;
use super::emp::Emp;
use super::entity::{AnimateCtx, Entity, StepCtx};
use super::shapes::{CURSOR, fill_ring};
use crate::consts::*;
use crate::renderer::palette::{CYAN, PURPLE, WHITE};
use crate::renderer::{LineStyle, Renderer};
use crate::{SimError, aim_angle};

/// Item catalog, in id order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Cursor,
    Barrier,
    TeslaCoil,
    Emp,
    MatterCondenser,
    ImpactDetonator,
    Mitosis,
    BetaDecay,
    AttackDrone,
}

/// The fixed equipment list, in slot order
pub const LOADOUT: [ItemKind; 15] = [
    ItemKind::Cursor,
    ItemKind::Barrier,
    ItemKind::Barrier,
    ItemKind::Barrier,
    ItemKind::TeslaCoil,
    ItemKind::Emp,
    ItemKind::MatterCondenser,
    ItemKind::ImpactDetonator,
    ItemKind::Mitosis,
    ItemKind::BetaDecay,
    ItemKind::AttackDrone,
    ItemKind::AttackDrone,
    ItemKind::AttackDrone,
    ItemKind::AttackDrone,
    ItemKind::AttackDrone,
];

impl ItemKind {
    pub const ALL: [ItemKind; 9] = [
        ItemKind::Cursor,
        ItemKind::Barrier,
        ItemKind::TeslaCoil,
        ItemKind::Emp,
        ItemKind::MatterCondenser,
        ItemKind::ImpactDetonator,
        ItemKind::Mitosis,
        ItemKind::BetaDecay,
        ItemKind::AttackDrone,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            ItemKind::Cursor => "Cursor",
            ItemKind::Barrier => "Barrier",
            ItemKind::TeslaCoil => "Tesla Coil",
            ItemKind::Emp => "EMP",
            ItemKind::MatterCondenser => "Matter Condenser",
            ItemKind::ImpactDetonator => "Impact Detonator",
            ItemKind::Mitosis => "Mitosis",
            ItemKind::BetaDecay => "Beta Decay",
            ItemKind::AttackDrone => "Attack Drone",
        }
    }

    /// Bullet effect this item adds to the avatar's pool, if any
    pub fn granted_effect(self) -> Option<EffectKind> {
        match self {
            ItemKind::MatterCondenser => Some(EffectKind::MatterCondenser),
            ItemKind::ImpactDetonator => Some(EffectKind::ImpactDetonator),
            ItemKind::Mitosis => Some(EffectKind::Mitosis),
            ItemKind::BetaDecay => Some(EffectKind::BetaDecay),
            _ => None,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ItemKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| SimError::UnknownItem(s.to_string()))
    }
}

/// Aim arrow held at a fixed distance from the avatar
#[derive(Debug, Clone)]
pub struct Cursor {
    pub pos: Vec2,
    /// Heading toward the aim point; the avatar turns to face it
    pub rotation: f32,
    pub radius: f32,
    points: Vec<Vec2>,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            rotation: 0.0,
            radius: CURSOR_RADIUS,
            points: CURSOR.to_vec(),
        }
    }
}

impl Cursor {
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    fn animate(&mut self, ctx: &AnimateCtx<'_>, out: &mut dyn Renderer) {
        self.pos = ctx.player_pos;
        self.radius = if ctx.barriers > 0 {
            CURSOR_RADIUS_SHIELDED
        } else {
            CURSOR_RADIUS
        };
        self.rotation = aim_angle(self.pos, ctx.aim);

        let (s, c) = self.rotation.sin_cos();
        for (p, local) in self.points.iter_mut().zip(CURSOR) {
            let px = local.x;
            let py = local.y - self.radius;
            *p = self.pos + Vec2::new(px * c - py * s, py * c + px * s);
        }

        out.line_style(LineStyle::new(2.0, WHITE.darken(0.2 * ctx.shimmer())));
        out.begin_fill(WHITE, 0.15);
        out.draw_polygon(&self.points);
        out.end_fill();
    }
}

/// Jittery ring slowly counter-rotating around the avatar
#[derive(Debug, Clone)]
pub struct Barrier {
    pub radius: f32,
    points: Vec<Vec2>,
}

impl Default for Barrier {
    fn default() -> Self {
        Self {
            radius: BARRIER_RADIUS,
            points: vec![Vec2::ZERO; RING_SEGMENTS],
        }
    }
}

impl Barrier {
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    fn animate(&mut self, ctx: &mut AnimateCtx<'_>, out: &mut dyn Renderer) {
        let rotation = -(ctx.time / 1440.0) as f32;
        fill_ring(&mut self.points, ctx.player_pos, self.radius, rotation, 1.5, &mut *ctx.rng);

        out.line_style(LineStyle::new(2.0, CYAN.darken(0.2 * ctx.shimmer())));
        out.begin_fill(CYAN, 0.15);
        out.draw_polygon(&self.points);
        out.end_fill();
    }
}

/// Crackling double-stroked ring
#[derive(Debug, Clone)]
pub struct TeslaCoil {
    pub radius: f32,
    points: Vec<Vec2>,
}

impl Default for TeslaCoil {
    fn default() -> Self {
        Self {
            radius: TESLA_RADIUS,
            points: vec![Vec2::ZERO; RING_SEGMENTS],
        }
    }
}

impl TeslaCoil {
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    fn animate(&mut self, ctx: &mut AnimateCtx<'_>, out: &mut dyn Renderer) {
        let shade = 0.2 * ctx.shimmer();
        fill_ring(&mut self.points, ctx.player_pos, self.radius, ctx.spin(), 4.0, &mut *ctx.rng);

        out.line_style(LineStyle::new(3.0, PURPLE.darken(shade)));
        out.draw_polygon(&self.points);
        out.line_style(LineStyle::new(1.0, WHITE.darken(shade)));
        out.draw_polygon(&self.points);
    }
}

/// An equipped item instance
#[derive(Debug)]
pub enum Item {
    Cursor(Cursor),
    Barrier(Barrier),
    TeslaCoil(TeslaCoil),
    Emp(Emp),
    /// Registered its effect at construction; inert afterwards
    Granter(EffectKind),
    /// Added a drone at construction; inert afterwards
    DroneBay,
}

impl Item {
    /// Build the item for `kind`
    ///
    /// Granters push their effect into `pool` unless it is already there, and
    /// the drone bay appends a satellite to `drones`.
    pub fn create(kind: ItemKind, pool: &mut Vec<EffectKind>, drones: &mut Vec<Drone>) -> Item {
        match kind {
            ItemKind::Cursor => Item::Cursor(Cursor::default()),
            ItemKind::Barrier => Item::Barrier(Barrier::default()),
            ItemKind::TeslaCoil => Item::TeslaCoil(TeslaCoil::default()),
            ItemKind::Emp => Item::Emp(Emp::new()),
            ItemKind::AttackDrone => {
                drones.push(Drone::new());
                Item::DroneBay
            }
            ItemKind::MatterCondenser => Item::grant(EffectKind::MatterCondenser, pool),
            ItemKind::ImpactDetonator => Item::grant(EffectKind::ImpactDetonator, pool),
            ItemKind::Mitosis => Item::grant(EffectKind::Mitosis, pool),
            ItemKind::BetaDecay => Item::grant(EffectKind::BetaDecay, pool),
        }
    }

    fn grant(effect: EffectKind, pool: &mut Vec<EffectKind>) -> Item {
        if !pool.contains(&effect) {
            pool.push(effect);
        }
        Item::Granter(effect)
    }

    /// Facing the avatar should turn toward, for items that have one
    pub fn orientation(&self) -> Option<f32> {
        match self {
            Item::Cursor(cursor) => Some(cursor.rotation),
            _ => None,
        }
    }
}

impl Entity for Item {
    fn step(&mut self, ctx: &mut StepCtx<'_>) {
        if let Item::Emp(emp) = self {
            emp.step(ctx);
        }
    }

    fn animate(&mut self, ctx: &mut AnimateCtx<'_>, out: &mut dyn Renderer) {
        match self {
            Item::Cursor(cursor) => cursor.animate(ctx, out),
            Item::Barrier(barrier) => barrier.animate(ctx, out),
            Item::TeslaCoil(coil) => coil.animate(ctx, out),
            Item::Emp(emp) => emp.animate(ctx, out),
            Item::Granter(_) | Item::DroneBay => {}
        }
    }
}

/// An item in its loadout slot
#[derive(Debug)]
pub struct EquippedItem {
    pub kind: ItemKind,
    pub item: Item,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn animate_ctx(rng: &mut Pcg32, barriers: usize) -> AnimateCtx<'_> {
        AnimateCtx {
            player_pos: Vec2::new(100.0, 100.0),
            aim: Vec2::new(100.0, 0.0),
            time: 720.0,
            barriers,
            rng,
        }
    }

    #[test]
    fn test_item_ids_round_trip() {
        for kind in ItemKind::ALL {
            assert_eq!(ItemKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(ItemKind::from_id(9), None);
        assert_eq!(ItemKind::TeslaCoil.id(), 2);
        assert_eq!(ItemKind::AttackDrone.id(), 8);
    }

    #[test]
    fn test_item_names() {
        assert_eq!("Tesla Coil".parse::<ItemKind>().ok(), Some(ItemKind::TeslaCoil));
        assert_eq!(ItemKind::Emp.to_string(), "EMP");
        assert!(matches!(
            "Railgun".parse::<ItemKind>(),
            Err(SimError::UnknownItem(ref name)) if name == "Railgun"
        ));
    }

    #[test]
    fn test_loadout_matches_ids() {
        let ids: Vec<u8> = LOADOUT.iter().map(|k| k.id()).collect();
        assert_eq!(ids, vec![0, 1, 1, 1, 2, 3, 4, 5, 6, 7, 8, 8, 8, 8, 8]);
    }

    #[test]
    fn test_granters_dedupe_pool() {
        let mut pool = Vec::new();
        let mut drones = Vec::new();
        Item::create(ItemKind::Mitosis, &mut pool, &mut drones);
        Item::create(ItemKind::Mitosis, &mut pool, &mut drones);
        Item::create(ItemKind::BetaDecay, &mut pool, &mut drones);
        assert_eq!(pool, vec![EffectKind::Mitosis, EffectKind::BetaDecay]);
        assert!(drones.is_empty());
    }

    #[test]
    fn test_drone_bay_adds_drone() {
        let mut pool = Vec::new();
        let mut drones = Vec::new();
        let item = Item::create(ItemKind::AttackDrone, &mut pool, &mut drones);
        assert!(matches!(item, Item::DroneBay));
        assert_eq!(drones.len(), 1);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_every_kind_builds_its_own_item() {
        let mut pool = Vec::new();
        let mut drones = Vec::new();
        for kind in ItemKind::ALL {
            let item = Item::create(kind, &mut pool, &mut drones);
            match item {
                Item::Granter(effect) => assert_eq!(kind.granted_effect(), Some(effect)),
                Item::DroneBay => assert_eq!(kind, ItemKind::AttackDrone),
                Item::Cursor(_) => assert_eq!(kind, ItemKind::Cursor),
                Item::Barrier(_) => assert_eq!(kind, ItemKind::Barrier),
                Item::TeslaCoil(_) => assert_eq!(kind, ItemKind::TeslaCoil),
                Item::Emp(_) => assert_eq!(kind, ItemKind::Emp),
            }
        }
        // Only the drone bay adds a drone, and each granter adds one effect
        assert_eq!(drones.len(), 1);
        assert_eq!(pool, EffectKind::ALL.to_vec());
    }

    #[test]
    fn test_cursor_points_toward_aim() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut out = DrawList::new();
        let mut cursor = Cursor::default();

        // Aim straight up from the avatar
        cursor.animate(&animate_ctx(&mut rng, 0), &mut out);
        assert!(cursor.rotation.abs() < 1e-6);
        assert_eq!(cursor.radius, CURSOR_RADIUS);
        // Arrow tip sits radius + 16 above the avatar
        let tip = cursor.points()[2];
        assert!((tip - Vec2::new(100.0, 100.0 - 46.0)).length() < 1e-4);

        cursor.animate(&animate_ctx(&mut rng, 3), &mut out);
        assert_eq!(cursor.radius, CURSOR_RADIUS_SHIELDED);
        assert_eq!(out.polygons().count(), 2);
    }

    #[test]
    fn test_cursor_orientation_feeds_facing() {
        let mut item = Item::Cursor(Cursor::default());
        assert_eq!(item.orientation(), Some(0.0));
        if let Item::Cursor(c) = &mut item {
            c.rotation = 1.25;
        }
        assert_eq!(item.orientation(), Some(1.25));
        assert_eq!(Item::Barrier(Barrier::default()).orientation(), None);
    }

    #[test]
    fn test_rings_stay_near_radius() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut out = DrawList::new();
        let mut barrier = Barrier {
            radius: 21.0,
            ..Barrier::default()
        };
        let mut coil = TeslaCoil::default();
        let mut ctx = animate_ctx(&mut rng, 1);
        barrier.animate(&mut ctx, &mut out);
        coil.animate(&mut ctx, &mut out);

        let center = Vec2::new(100.0, 100.0);
        for p in barrier.points() {
            // Jitter is at most 1.5 per axis
            assert!((p.distance(center) - 21.0).abs() <= 1.5 * 2f32.sqrt() + 1e-3);
        }
        for p in coil.points() {
            assert!((p.distance(center) - 45.0).abs() <= 4.0 * 2f32.sqrt() + 1e-3);
        }
        // Barrier fill + coil double stroke
        assert_eq!(out.polygons().count(), 3);
    }

    #[test]
    fn test_inert_items_draw_nothing() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut out = DrawList::new();
        let mut ctx = animate_ctx(&mut rng, 0);
        Item::Granter(EffectKind::Mitosis).animate(&mut ctx, &mut out);
        Item::DroneBay.animate(&mut ctx, &mut out);
        assert!(out.is_empty());
    }
}
