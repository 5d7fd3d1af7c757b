//! Session state
//!
//! Everything one play session owns: the avatar with its items and drones,
//! the live projectiles, the starfield, the camera anchor and the RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::items::{Item, ItemKind};
use super::player::Player;
use super::pool::{Handle, Pool};
use super::projectile::Projectile;
use super::starfield::Starfield;
use crate::Settings;

#[derive(Debug)]
pub struct Session {
    pub settings: Settings,
    /// Single source of randomness for the whole session
    pub rng: Pcg32,
    pub player: Player,
    /// Live projectiles, oldest first
    pub projectiles: Pool<Projectile>,
    pub stars: Starfield,
    /// Point the external viewport follows
    pub camera_anchor: Vec2,
    /// Timestamp of the previous frame (ms)
    pub last_time: Option<f64>,
    pub frame_count: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let player = Player::with_loadout(&settings.loadout);
        let stars = Starfield::new(settings.star_count, settings.width, settings.height, &mut rng);
        log::info!(
            "New session: seed={}, {} items, {} drones, {} stars",
            settings.seed,
            player.items.len(),
            player.drones.len(),
            stars.len()
        );
        Self {
            rng,
            player,
            projectiles: Pool::with_max_len(settings.max_projectiles),
            stars,
            camera_anchor: Vec2::ZERO,
            last_time: None,
            frame_count: 0,
            settings,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(Settings::with_seed(seed))
    }

    /// Add a projectile as the newest live entry
    pub fn spawn(&mut self, projectile: Projectile) -> Handle {
        self.projectiles.insert(projectile)
    }

    pub fn barrier_count(&self) -> usize {
        self.player.count_items(ItemKind::Barrier)
    }

    /// The first equipped EMP, if any
    pub fn emp(&self) -> Option<&super::emp::Emp> {
        self.player.items.iter().find_map(|e| match &e.item {
            Item::Emp(emp) => Some(emp),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_from_settings() {
        let session = Session::default();
        assert_eq!(session.player.items.len(), 15);
        assert_eq!(session.player.drones.len(), 5);
        assert_eq!(session.stars.len(), 100);
        assert_eq!(session.projectiles.max_len(), 200);
        assert_eq!(session.barrier_count(), 3);
        assert!(session.emp().is_some());
        assert_eq!(session.last_time, None);
    }

    #[test]
    fn test_same_seed_same_stars() {
        let a = Session::with_seed(7);
        let b = Session::with_seed(7);
        let c = Session::with_seed(8);
        assert_eq!(a.stars.stars(), b.stars.stars());
        assert_ne!(a.stars.stars(), c.stars.stars());
    }
}
