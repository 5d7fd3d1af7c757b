//! EMP gadget
//!
//! A ring that charges while shoot is held, pulses a few times, detonates into
//! an expanding shockwave and fades out before starting over. The stages run on
//! a looping [`Timeline`]; pulse windows are owned deadline timers.

use glam::Vec2;

use super::entity::{AnimateCtx, Entity, StepCtx};
use super::input::Control;
use super::shapes::fill_ring;
use super::timeline::{PhaseStep, Timeline};
use super::timer::Timers;
use crate::consts::*;
use crate::renderer::palette::{CYAN, PINK, PURPLE};
use crate::renderer::{Color, LineStyle, Renderer};
use crate::{clamp, lerp};

/// Named view of the timeline index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmpStage {
    Charging,
    Pulsing,
    Detonating,
    Shockwave,
    Fading,
    /// Between the last stage and the loop restart
    Finished,
}

impl EmpStage {
    fn from_phase(phase: Option<usize>) -> Self {
        match phase {
            Some(0) => EmpStage::Charging,
            Some(1) => EmpStage::Pulsing,
            Some(2) => EmpStage::Detonating,
            Some(3) => EmpStage::Shockwave,
            Some(4) => EmpStage::Fading,
            _ => EmpStage::Finished,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PulseEvent {
    /// Active half of the pulse window ends
    End,
    /// Next pulse may start
    Ready,
}

/// Per-tick input for the EMP stages
#[derive(Debug, Clone, Copy)]
pub struct EmpCtx {
    pub shoot_held: bool,
    /// Current frame timestamp (ms)
    pub now: f64,
}

/// Transient EMP fields mutated by the stages
#[derive(Debug, Clone)]
pub struct EmpState {
    pub center: Vec2,
    /// Charge level in [0, 1]
    pub charge: f32,
    /// Set externally from the barrier count
    pub base_radius: f32,
    pub radius: f32,
    pub thickness: f32,
    pub opacity: f32,
    /// Center is frozen while set
    pub detonating: bool,
    pub tint: Color,
    pub pulses_fired: u32,
    pub can_pulse: bool,
    pub sending_pulse: bool,
    timers: Timers<PulseEvent>,
}

impl Default for EmpState {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            charge: 0.0,
            base_radius: EMP_BASE_RADIUS,
            radius: EMP_BASE_RADIUS,
            thickness: 2.0,
            opacity: 1.0,
            detonating: false,
            tint: PURPLE,
            pulses_fired: 0,
            can_pulse: true,
            sending_pulse: false,
            timers: Timers::new(),
        }
    }
}

impl EmpState {
    /// Back to a fresh charge cycle; the base radius and center are kept
    fn reset(&mut self) {
        self.charge = 0.0;
        self.radius = self.base_radius;
        self.pulses_fired = 0;
        self.can_pulse = true;
        self.sending_pulse = false;
        self.thickness = 2.0;
        self.opacity = 1.0;
        self.detonating = false;
        self.timers.clear();
    }

    fn drain_pulse_timers(&mut self, now: f64) {
        for event in self.timers.take_due(now) {
            match event {
                PulseEvent::End => self.sending_pulse = false,
                PulseEvent::Ready => self.can_pulse = true,
            }
        }
    }
}

fn charging(s: &mut EmpState, ctx: &EmpCtx) -> PhaseStep {
    if ctx.shoot_held {
        s.charge += EMP_CHARGE_RATE;
    } else {
        s.charge -= EMP_DISCHARGE_RATE;
    }
    s.charge = clamp(0.0, s.charge, 1.0);
    // Absorb f32 drift so a steady hold is full after exactly 1/rate ticks
    if 1.0 - s.charge < 1e-4 {
        s.charge = 1.0;
    }
    s.tint = PINK.mix(PURPLE, 1.0 - s.charge);
    s.radius = s.base_radius;
    (s.charge >= 1.0).into()
}

fn pulsing(s: &mut EmpState, ctx: &EmpCtx) -> PhaseStep {
    let (radius, thickness) = if s.sending_pulse {
        (s.base_radius * 1.5, s.base_radius / 10.0 * 2.5)
    } else {
        (s.base_radius, s.base_radius / 10.0)
    };
    s.radius = lerp(s.radius, radius, 0.2);
    s.thickness = lerp(s.thickness, thickness, 0.2);

    if s.can_pulse {
        s.can_pulse = false;
        s.sending_pulse = true;
        s.timers.schedule(ctx.now, EMP_PULSE_DELAY_MS / 2.0, PulseEvent::End);
        s.timers.schedule(ctx.now, EMP_PULSE_DELAY_MS, PulseEvent::Ready);
        s.pulses_fired = (s.pulses_fired + 1).min(EMP_PULSES);
    }
    (s.pulses_fired == EMP_PULSES).into()
}

fn detonating(s: &mut EmpState, _ctx: &EmpCtx) -> PhaseStep {
    s.detonating = true;
    log::debug!("EMP detonated at ({:.1}, {:.1})", s.center.x, s.center.y);
    PhaseStep::Advance
}

fn shockwave(s: &mut EmpState, _ctx: &EmpCtx) -> PhaseStep {
    let target = s.base_radius * EMP_SHOCKWAVE_FACTOR;
    s.thickness = lerp(s.thickness, s.base_radius, 0.1);
    s.radius = lerp(s.radius, target, 0.1);
    s.tint = PINK.mix(CYAN, s.radius / target);
    (s.radius > target - 1.0).into()
}

fn fading(s: &mut EmpState, _ctx: &EmpCtx) -> PhaseStep {
    s.opacity = lerp(s.opacity, 0.0, EMP_FADE_BLEND);
    (s.opacity < 0.05).into()
}

#[derive(Debug)]
pub struct Emp {
    state: EmpState,
    timeline: Timeline<EmpState, EmpCtx>,
    points: Vec<Vec2>,
}

impl Default for Emp {
    fn default() -> Self {
        Self::new()
    }
}

impl Emp {
    pub fn new() -> Self {
        let mut timeline = Timeline::looping(EmpState::reset);
        timeline
            .add(charging)
            .add(pulsing)
            .add(detonating)
            .add(shockwave)
            .add(fading);
        Self {
            state: EmpState::default(),
            timeline,
            points: vec![Vec2::ZERO; EMP_SEGMENTS],
        }
    }

    pub fn state(&self) -> &EmpState {
        &self.state
    }

    pub fn stage(&self) -> EmpStage {
        EmpStage::from_phase(self.timeline.phase())
    }

    pub fn set_base_radius(&mut self, radius: f32) {
        self.state.base_radius = radius;
    }

    /// Run one tick of the stage machine
    pub fn tick(&mut self, shoot_held: bool, now: f64) {
        self.state.drain_pulse_timers(now);
        let ctx = EmpCtx { shoot_held, now };
        self.timeline.execute(&mut self.state, &ctx);
    }

    /// Ring segments drawn this frame (the charged fraction of the ring)
    pub fn visible_segments(&self) -> usize {
        ((EMP_SEGMENTS as f32 * self.state.charge).floor() as usize).min(EMP_SEGMENTS)
    }
}

impl Entity for Emp {
    fn step(&mut self, ctx: &mut StepCtx<'_>) {
        self.tick(ctx.input.held(Control::Shoot), ctx.now);
    }

    fn animate(&mut self, ctx: &mut AnimateCtx<'_>, out: &mut dyn Renderer) {
        let s = &mut self.state;
        if !s.detonating {
            s.center = ctx.player_pos;
        }
        let rotation = -(ctx.time / 1440.0) as f32;
        fill_ring(&mut self.points, s.center, s.radius, rotation, 1.5, &mut *ctx.rng);

        let color = s.tint.darken(0.2 * ctx.shimmer());
        out.line_style(LineStyle::new(s.thickness, color).with_alpha(s.opacity).rounded());

        let n = self.points.len();
        for i in 0..self.visible_segments() {
            out.draw_line(self.points[i], self.points[(i + 1) % n]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[test]
    fn test_full_charge_takes_500_ticks() {
        let mut emp = Emp::new();
        let mut now = 0.0;
        for _ in 0..499 {
            emp.tick(true, now);
            now += FRAME_MS;
        }
        assert_eq!(emp.stage(), EmpStage::Charging);
        assert!(emp.state().charge < 1.0);

        emp.tick(true, now);
        assert_eq!(emp.state().charge, 1.0);
        // Advanced on the same tick the charge filled up
        assert_eq!(emp.stage(), EmpStage::Pulsing);
    }

    #[test]
    fn test_charge_decays_without_input() {
        let mut emp = Emp::new();
        for i in 0..10 {
            emp.tick(true, i as f64);
        }
        let charged = emp.state().charge;
        emp.tick(false, 10.0);
        assert!((emp.state().charge - (charged - 0.003)).abs() < 1e-6);
        for i in 0..100 {
            emp.tick(false, 11.0 + i as f64);
        }
        assert_eq!(emp.state().charge, 0.0);
        assert_eq!(emp.stage(), EmpStage::Charging);
    }

    #[test]
    fn test_pulses_are_spaced_by_delay() {
        let mut emp = Emp::new();
        emp.state.charge = 1.0 - EMP_CHARGE_RATE;
        let mut now = 0.0;
        emp.tick(true, now);
        assert_eq!(emp.stage(), EmpStage::Pulsing);

        // First pulse fires immediately, the next two each after a full delay
        emp.tick(false, now);
        assert_eq!(emp.state().pulses_fired, 1);
        assert!(emp.state().sending_pulse);

        now += EMP_PULSE_DELAY_MS / 2.0;
        emp.tick(false, now);
        assert!(!emp.state().sending_pulse);
        assert_eq!(emp.state().pulses_fired, 1);

        now += EMP_PULSE_DELAY_MS / 2.0;
        emp.tick(false, now);
        assert_eq!(emp.state().pulses_fired, 2);

        now += EMP_PULSE_DELAY_MS;
        emp.tick(false, now);
        assert_eq!(emp.state().pulses_fired, 3);
        assert_eq!(emp.stage(), EmpStage::Detonating);
    }

    #[test]
    fn test_full_cycle_loops_back_to_charging() {
        let mut emp = Emp::new();
        let mut now = 0.0;
        let mut saw = Vec::new();
        for _ in 0..5000 {
            emp.tick(true, now);
            now += FRAME_MS;
            let stage = emp.stage();
            if saw.last() != Some(&stage) {
                saw.push(stage);
            }
            if saw.len() > 1 && stage == EmpStage::Charging {
                break;
            }
        }
        assert_eq!(
            saw,
            vec![
                EmpStage::Charging,
                EmpStage::Pulsing,
                EmpStage::Detonating,
                EmpStage::Shockwave,
                EmpStage::Fading,
                EmpStage::Finished,
                EmpStage::Charging,
            ]
        );
        // Loop reset cleared the transient fields, then one charge tick ran
        let s = emp.state();
        assert!(!s.detonating);
        assert_eq!(s.opacity, 1.0);
        assert_eq!(s.pulses_fired, 0);
        assert!((s.charge - EMP_CHARGE_RATE).abs() < 1e-6);
    }

    #[test]
    fn test_center_frozen_while_detonating() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut out = DrawList::new();
        let mut emp = Emp::new();
        let mut ctx = AnimateCtx {
            player_pos: Vec2::new(10.0, 10.0),
            aim: Vec2::ZERO,
            time: 0.0,
            barriers: 0,
            rng: &mut rng,
        };
        emp.animate(&mut ctx, &mut out);
        assert_eq!(emp.state().center, Vec2::new(10.0, 10.0));
        // No charge yet, so nothing is stroked
        assert_eq!(out.line_count(), 0);

        emp.state.detonating = true;
        emp.state.charge = 1.0;
        ctx.player_pos = Vec2::new(99.0, 99.0);
        emp.animate(&mut ctx, &mut out);
        assert_eq!(emp.state().center, Vec2::new(10.0, 10.0));
        assert_eq!(out.line_count(), EMP_SEGMENTS);
    }
}
