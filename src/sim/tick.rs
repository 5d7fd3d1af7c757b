//! Frame orchestrator
//!
//! Advances the whole session by one display frame. Traversal order is fixed:
//! camera and stars, avatar, items, drones, avatar drawing, derived item
//! sizes, then every live projectile.

use glam::Vec2;

use super::entity::{AnimateCtx, Entity, StepCtx};
use super::input::{Control, FrameInput, InputState};
use super::items::{Item, ItemKind};
use super::projectile::Projectile;
use super::state::Session;
use crate::consts::*;
use crate::lerp_vec;
use crate::renderer::palette::RED;
use crate::renderer::{LineStyle, Renderer};

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Milliseconds since the previous frame
    pub dt: f32,
    /// Projectiles fired by the avatar and drones
    pub fired: usize,
    /// Siblings created by Mitosis splits
    pub split: usize,
    /// Oldest projectiles dropped by the soft cap
    pub evicted: usize,
    /// Projectiles that asked to be removed
    pub removed: usize,
}

/// Advance the session to timestamp `time` (ms)
///
/// `world` receives viewport-space drawing, `screen` the fixed star layer.
/// Both are cleared first, so they hold exactly this frame's commands.
pub fn frame(
    session: &mut Session,
    input: &FrameInput,
    time: f64,
    world: &mut dyn Renderer,
    screen: &mut dyn Renderer,
) -> FrameStats {
    world.clear();
    screen.clear();

    let dt = session.last_time.map_or(0.0, |last| (time - last) as f32);
    let mut stats = FrameStats {
        dt,
        ..FrameStats::default()
    };
    let aim = input.aim();
    let keys = &input.keys;

    // Camera leads slightly toward the pointer
    let focus = (session.player.pos * 3.0 + aim) / 4.0;
    session.camera_anchor = lerp_vec(session.camera_anchor, focus, CAMERA_BLEND);

    world.begin_fill(RED, 0.3);
    world.line_style(LineStyle::new(2.0, RED));
    world.draw_circle(Vec2::ZERO, ORIGIN_MARKER_RADIUS);
    world.end_fill();

    let camera_offset = session.camera_anchor - session.player.pos;
    session.stars.update(
        session.player.kin.speed,
        session.player.accel_direction,
        camera_offset,
        &mut session.rng,
        screen,
    );

    let mut spawned: Vec<Projectile> = Vec::new();
    let player = &mut session.player;
    let barriers = player.count_items(ItemKind::Barrier);

    player.step(&mut StepCtx {
        input: keys,
        dt,
        now: time,
        aim,
        rng: &mut session.rng,
        spawned: &mut spawned,
    });

    let player_pos = player.pos;
    for equipped in &mut player.items {
        equipped.item.step(&mut StepCtx {
            input: keys,
            dt,
            now: time,
            aim,
            rng: &mut session.rng,
            spawned: &mut spawned,
        });
        equipped.item.animate(
            &mut AnimateCtx {
                player_pos,
                aim,
                time,
                barriers,
                rng: &mut session.rng,
            },
            world,
        );
    }

    // Drones only see the shoot key
    let drone_keys = if keys.held(Control::Shoot) {
        InputState::holding(&[Control::Shoot])
    } else {
        InputState::new()
    };
    let count = player.drones.len();
    for (i, drone) in player.drones.iter_mut().enumerate() {
        drone.follow(player.pos, player.rotation, &player.bullet_pool, i, count, time);
        drone.step(&mut StepCtx {
            input: &drone_keys,
            dt,
            now: time,
            aim,
            rng: &mut session.rng,
            spawned: &mut spawned,
        });
        drone.animate(
            &mut AnimateCtx {
                player_pos,
                aim,
                time,
                barriers,
                rng: &mut session.rng,
            },
            world,
        );
    }

    player.animate(
        &mut AnimateCtx {
            player_pos,
            aim,
            time,
            barriers,
            rng: &mut session.rng,
        },
        world,
    );

    // Stacked barriers widen each other and the EMP
    let mut barrier_index = 0;
    for equipped in &mut player.items {
        match &mut equipped.item {
            Item::Barrier(barrier) => {
                barrier.radius = BARRIER_RADIUS + BARRIER_STEP * barrier_index as f32;
                barrier_index += 1;
            }
            Item::Emp(emp) => emp.set_base_radius(EMP_BASE_RADIUS + BARRIER_STEP * barriers as f32),
            _ => {}
        }
    }

    stats.fired = spawned.len();
    for projectile in spawned.drain(..) {
        session.projectiles.insert(projectile);
    }
    stats.evicted = session.projectiles.evict_overflow();
    if stats.evicted > 0 {
        log::debug!("Projectile cap reached, evicted {} oldest", stats.evicted);
    }

    // Siblings split off this frame join after the pass; killed entries are not revisited
    for handle in session.projectiles.handles() {
        let Some(projectile) = session.projectiles.get_mut(handle) else {
            continue;
        };
        if projectile.is_dead() {
            continue;
        }
        projectile.step(&mut StepCtx {
            input: keys,
            dt,
            now: time,
            aim,
            rng: &mut session.rng,
            spawned: &mut spawned,
        });
        projectile.animate(
            &mut AnimateCtx {
                player_pos,
                aim,
                time,
                barriers,
                rng: &mut session.rng,
            },
            world,
        );
    }
    stats.split = spawned.len();
    for projectile in spawned {
        session.projectiles.insert(projectile);
    }
    stats.removed = session.projectiles.remove_where(Projectile::is_dead);

    log::trace!(
        "frame {} dt={:.2} live={} fired={} split={}",
        session.frame_count,
        dt,
        session.projectiles.len(),
        stats.fired,
        stats.split
    );
    session.last_time = Some(time);
    session.frame_count += 1;
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::renderer::DrawList;
    use crate::sim::effects::EffectKind;
    use crate::sim::emp::EmpStage;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn session_with(loadout: &[ItemKind]) -> Session {
        Session::new(Settings {
            loadout: loadout.to_vec(),
            ..Settings::with_seed(1234)
        })
    }

    fn run(session: &mut Session, input: &FrameInput, time: f64) -> FrameStats {
        let mut world = DrawList::new();
        let mut screen = DrawList::new();
        frame(session, input, time, &mut world, &mut screen)
    }

    fn shooting() -> FrameInput {
        FrameInput {
            keys: InputState::holding(&[Control::Shoot]),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_frame_has_zero_dt() {
        let mut session = Session::default();
        let stats = run(&mut session, &FrameInput::default(), 5000.0);
        assert_eq!(stats.dt, 0.0);
        let stats = run(&mut session, &FrameInput::default(), 5016.0);
        assert_eq!(stats.dt, 16.0);
        assert_eq!(session.frame_count, 2);
    }

    #[test]
    fn test_layers_hold_one_frame() {
        let mut session = Session::default();
        let mut world = DrawList::new();
        let mut screen = DrawList::new();
        frame(&mut session, &FrameInput::default(), 0.0, &mut world, &mut screen);
        let first = (world.len(), screen.len());
        frame(&mut session, &FrameInput::default(), FRAME_MS, &mut world, &mut screen);
        assert_eq!((world.len(), screen.len()), first);
        assert_eq!(screen.circle_count(), 100);
        // Origin marker
        assert_eq!(world.circle_count(), 1);
    }

    #[test]
    fn test_mitosis_adds_exactly_one() {
        let mut session = session_with(&[]);
        let mut bullet = Projectile::new(Vec2::new(0.0, 0.0), 0.3);
        bullet.apply_effect(EffectKind::Mitosis, 0.0, 0.0);
        let handle = session.spawn(bullet);

        run(&mut session, &FrameInput::default(), 0.0);
        run(&mut session, &FrameInput::default(), 100.0);
        assert_eq!(session.projectiles.len(), 1);
        let before = session.projectiles.get(handle).map(|p| (p.direction, p.speed_multiplier));

        let stats = run(&mut session, &FrameInput::default(), MITOSIS_DELAY_MS);
        assert_eq!(stats.split, 1);
        assert_eq!(session.projectiles.len(), 2);

        let Some((dir, mult)) = before else {
            panic!("parent projectile missing");
        };
        let parent = session.projectiles.get(handle).expect("still live");
        assert!((parent.direction - (dir + MITOSIS_ANGLE)).abs() < 1e-6);
        assert!((parent.speed_multiplier - mult * 0.8).abs() < 1e-6);
        let (_, sibling) = session.projectiles.iter().last().expect("sibling");
        assert!((sibling.direction - (dir - MITOSIS_ANGLE)).abs() < 1e-6);
        assert!((sibling.speed_multiplier - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_evicted_projectile_never_splits() {
        let mut session = Session::new(Settings {
            loadout: Vec::new(),
            max_projectiles: 1,
            ..Settings::default()
        });
        let mut doomed = Projectile::default();
        doomed.apply_effect(EffectKind::Mitosis, 0.0, 0.0);
        let doomed = session.spawn(doomed);
        session.spawn(Projectile::default());

        run(&mut session, &FrameInput::default(), 0.0);
        assert!(!session.projectiles.contains(doomed));
        let stats = run(&mut session, &FrameInput::default(), 1000.0);
        assert_eq!(stats.split, 0);
        assert_eq!(session.projectiles.len(), 1);
    }

    #[test]
    fn test_killed_projectile_never_splits() {
        let mut session = session_with(&[]);
        let mut bullet = Projectile::new(Vec2::new(0.0, 0.0), 0.3);
        bullet.apply_effect(EffectKind::Mitosis, 0.0, 0.0);
        let handle = session.spawn(bullet);

        run(&mut session, &FrameInput::default(), 0.0);
        run(&mut session, &FrameInput::default(), 100.0);
        session.projectiles.get_mut(handle).expect("live").kill();

        let mut world = DrawList::new();
        let mut screen = DrawList::new();
        let stats = frame(&mut session, &FrameInput::default(), MITOSIS_DELAY_MS, &mut world, &mut screen);
        assert_eq!(stats.split, 0);
        assert_eq!(stats.removed, 1);
        assert!(session.projectiles.is_empty());
        // Avatar hull only; the killed projectile is not drawn
        assert_eq!(world.polygons().count(), 1);
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut session = session_with(&[]);
        for _ in 0..MAX_PROJECTILES {
            session.spawn(Projectile::default());
        }
        let oldest = session.projectiles.oldest().expect("full pool");

        let stats = run(&mut session, &shooting(), 0.0);
        assert_eq!(stats.fired, 1);
        assert_eq!(stats.evicted, 1);
        assert_eq!(session.projectiles.len(), MAX_PROJECTILES);
        assert!(!session.projectiles.contains(oldest));
    }

    #[test]
    fn test_killed_projectiles_are_removed() {
        let mut session = session_with(&[]);
        let mut p = Projectile::default();
        p.kill();
        session.spawn(p);
        session.spawn(Projectile::default());
        let stats = run(&mut session, &FrameInput::default(), 0.0);
        assert_eq!(stats.removed, 1);
        assert_eq!(session.projectiles.len(), 1);
    }

    #[test]
    fn test_drones_fire_with_avatar() {
        let mut session = Session::default();
        let stats = run(&mut session, &shooting(), 0.0);
        // Avatar plus five drones
        assert_eq!(stats.fired, 6);
        let stats = run(&mut session, &shooting(), 50.0);
        assert_eq!(stats.fired, 0);
    }

    #[test]
    fn test_barriers_scale_rings_and_emp() {
        let mut session = Session::default();
        run(&mut session, &FrameInput::default(), 0.0);
        let radii: Vec<f32> = session
            .player
            .items
            .iter()
            .filter_map(|e| match &e.item {
                Item::Barrier(b) => Some(b.radius),
                _ => None,
            })
            .collect();
        assert_eq!(radii, vec![15.0, 18.0, 21.0]);
        let emp = session.emp().expect("emp equipped");
        assert_eq!(emp.state().base_radius, 29.0);
    }

    #[test]
    fn test_camera_eases_toward_lead_point() {
        let mut session = session_with(&[]);
        let input = FrameInput {
            pointer: Vec2::new(200.0, 200.0),
            ..Default::default()
        };
        run(&mut session, &input, 0.0);
        // Focus is (3 * (200, 200) + (200, 200)) / 4
        assert!((session.camera_anchor - Vec2::new(20.0, 20.0)).length() < 1e-4);
    }

    #[test]
    fn test_emp_charges_through_frames() {
        let mut session = Session::default();
        let input = shooting();
        let mut time = 0.0;
        let mut last = FrameStats::default();
        for _ in 0..500 {
            last = run(&mut session, &input, time);
            time += FRAME_MS;
        }
        let emp = session.emp().expect("emp equipped");
        assert_eq!(emp.stage(), EmpStage::Pulsing);
        // The avatar and drones kept firing; only this frame's splits exceed the cap
        assert!(!session.projectiles.is_empty());
        assert!(session.projectiles.len() <= MAX_PROJECTILES + last.split);
    }

    #[test]
    fn test_determinism() {
        let mut a = Session::with_seed(99);
        let mut b = Session::with_seed(99);
        let inputs = [
            FrameInput {
                keys: InputState::holding(&[Control::Up, Control::Shoot]),
                pointer: Vec2::new(50.0, -20.0),
                ..Default::default()
            },
            FrameInput {
                keys: InputState::holding(&[Control::Left]),
                pointer: Vec2::new(-30.0, 10.0),
                ..Default::default()
            },
            shooting(),
        ];

        let mut time = 0.0;
        for _ in 0..40 {
            for input in &inputs {
                let sa = run(&mut a, input, time);
                let sb = run(&mut b, input, time);
                assert_eq!(sa, sb);
                time += FRAME_MS;
            }
        }

        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.projectiles.len(), b.projectiles.len());
        let pa: Vec<(Vec2, Vec<EffectKind>)> = a.projectiles.iter().map(|(_, p)| (p.pos, p.effects.clone())).collect();
        let pb: Vec<(Vec2, Vec<EffectKind>)> = b.projectiles.iter().map(|(_, p)| (p.pos, p.effects.clone())).collect();
        assert_eq!(pa, pb);
    }
}
