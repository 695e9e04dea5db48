//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Driven by caller-supplied wall-clock timestamps, one step per frame
//! - Seeded RNG only
//! - Iterate-then-filter removals, never mid-iteration
//! - No rendering or platform dependencies

pub mod collision;
pub mod schedule;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::rects_overlap;
pub use schedule::Timer;
pub use spawn::{VARIANT_WEIGHTS, fire_projectile, sample_variant, spawn_burst, spawn_enemy};
pub use state::{
    Enemy, EnemyVariant, GameEvent, GameState, Particle, Player, Projectile, Rect, Star,
};
pub use tick::{FrameInput, advance, ramp_difficulty};
