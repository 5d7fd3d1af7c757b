//! Parallax background stars on the screen layer

use glam::Vec2;
use rand::Rng;

use crate::heading;
use crate::renderer::Renderer;
use crate::renderer::palette::WHITE;
use crate::wrap_clamp;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    /// Parallax factor, roughly 0.08..0.12
    pub speed: f32,
    pub pos: Vec2,
}

#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
    size: Vec2,
}

impl Starfield {
    pub fn new<R: Rng>(count: usize, width: f32, height: f32, rng: &mut R) -> Self {
        let stars = (0..count)
            .map(|_| {
                let speed = 0.1 + (std::f32::consts::TAU * rng.random::<f32>()).sin() / 50.0;
                let pos = Vec2::new(width * rng.random::<f32>(), height * rng.random::<f32>());
                Star { speed, pos }
            })
            .collect();
        Self {
            stars,
            size: Vec2::new(width, height),
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    fn wrap(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            wrap_clamp(0.0, p.x, self.size.x),
            wrap_clamp(0.0, p.y, self.size.y),
        )
    }

    /// Drift against the avatar's travel and draw with camera parallax
    ///
    /// `camera_offset` is the camera anchor minus the avatar position.
    pub fn update<R: Rng>(
        &mut self,
        player_speed: f32,
        accel_direction: f32,
        camera_offset: Vec2,
        rng: &mut R,
        out: &mut dyn Renderer,
    ) {
        out.begin_fill(WHITE, 0.2 + 0.2 * rng.random::<f32>());
        let drift = -heading(accel_direction);
        for i in 0..self.stars.len() {
            let star = self.stars[i];
            let pos = self.wrap(star.pos + drift * (player_speed * star.speed));
            self.stars[i].pos = pos;
            out.draw_circle(self.wrap(camera_offset * star.speed + pos), 1.0);
        }
        out.end_fill();
    }
}
