//! Frame-driven simulation
//!
//! All gameplay logic lives here. The simulation is deterministic for a given
//! seed, input sequence and timestamp sequence:
//! - One seeded RNG owned by the session
//! - Delayed actions are timers owned by the entity that scheduled them
//! - Stable traversal order (avatar, items, drones, projectiles oldest first)
//! - Drawing goes through the `Renderer` trait only

pub mod drone;
pub mod effects;
pub mod emp;
pub mod entity;
pub mod input;
pub mod items;
pub mod kinematics;
pub mod player;
pub mod pool;
pub mod projectile;
pub mod shapes;
pub mod starfield;
pub mod state;
pub mod tick;
pub mod timeline;
pub mod timer;

pub use drone::Drone;
pub use effects::{Behaviour, EffectDescriptor, EffectKind, PropertyOverride, lookup};
pub use emp::{Emp, EmpStage};
pub use entity::{AnimateCtx, Entity, StepCtx};
pub use input::{Control, FrameInput, InputState};
pub use items::{EquippedItem, Item, ItemKind, LOADOUT};
pub use kinematics::Kinematics;
pub use player::Player;
pub use pool::{Handle, Pool};
pub use projectile::{Projectile, ProjectileAction};
pub use starfield::{Star, Starfield};
pub use state::Session;
pub use tick::{FrameStats, frame};
pub use timeline::{PhaseStep, Timeline};
pub use timer::{Cooldown, Timers};
