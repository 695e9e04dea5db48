//! Entity construction: projectiles, enemies, explosion bursts
//!
//! All randomness flows through the session RNG so a seeded run spawns
//! the same waves every time.

use rand::Rng;

use super::state::{Enemy, EnemyVariant, GameState, Particle, Projectile, Rect};
use crate::consts::*;
use glam::Vec2;

/// Spawn-weight table for enemy variants. Weights sum to 1; the draw walks
/// the cumulative distribution once per spawn.
pub const VARIANT_WEIGHTS: [(EnemyVariant, f32); 3] = [
    (EnemyVariant::Normal, 0.60),
    (EnemyVariant::Zigzag, 0.25),
    (EnemyVariant::Heavy, 0.15),
];

/// Draw one variant from [`VARIANT_WEIGHTS`]
pub fn sample_variant(rng: &mut impl Rng) -> EnemyVariant {
    let roll: f32 = rng.random();
    let mut acc = 0.0;
    for &(variant, weight) in &VARIANT_WEIGHTS {
        acc += weight;
        if roll < acc {
            return variant;
        }
    }
    // Float accumulation can land the total a hair under 1.0.
    VARIANT_WEIGHTS[VARIANT_WEIGHTS.len() - 1].0
}

/// Append one projectile at the player's horizontal center.
/// No-op once the session is over.
pub fn fire_projectile(state: &mut GameState) {
    if state.game_over {
        return;
    }
    let center_x = state.player.rect.x + state.player.rect.w / 2.0;
    state.projectiles.push(Projectile {
        rect: Rect::new(
            center_x - PROJECTILE_WIDTH / 2.0,
            state.player.rect.y,
            PROJECTILE_WIDTH,
            PROJECTILE_HEIGHT,
        ),
    });
}

/// Construct one enemy fully off-screen above the playfield.
/// No-op once the session is over.
pub fn spawn_enemy(state: &mut GameState) {
    if state.game_over {
        return;
    }

    let variant = sample_variant(&mut state.rng);
    let size = variant.size();

    let mut speed = state.base_enemy_speed + state.rng.random_range(0.0..ENEMY_SPEED_JITTER);
    let mut dx = 0.0;
    match variant {
        EnemyVariant::Zigzag => {
            speed += ZIGZAG_SPEED_BONUS;
            // Independent coin flip for the initial drift direction.
            dx = if state.rng.random_bool(0.5) {
                ZIGZAG_DRIFT
            } else {
                -ZIGZAG_DRIFT
            };
        }
        EnemyVariant::Heavy => speed -= HEAVY_SPEED_PENALTY,
        EnemyVariant::Normal => {}
    }

    let max_x = (state.bounds.x - size).max(0.0);
    let x = state.rng.random_range(0.0..=max_x);

    state.enemies.push(Enemy {
        rect: Rect::new(x, ENEMY_SPAWN_Y, size, size),
        variant,
        speed,
        dx,
    });
}

/// Emit a fixed-size burst of particles with independently randomized
/// velocities, centered on a destroyed enemy.
pub fn spawn_burst(state: &mut GameState, center: Vec2) {
    for _ in 0..BURST_SIZE {
        let vel = Vec2::new(
            (state.rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
            (state.rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
        );
        state.particles.push(Particle {
            pos: center,
            vel,
            life: PARTICLE_LIFE,
        });
    }
}
