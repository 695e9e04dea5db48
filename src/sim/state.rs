//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in one owned [`GameState`];
//! there are no module-level singletons. The web shell and the renderer
//! only ever see `&GameState` or pass it by `&mut` into [`crate::sim::advance`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::schedule::Timer;
use crate::consts::*;

/// Axis-aligned bounding box, the only collision shape in the game
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Center point of the box
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Enemy subtype, fixed at spawn time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyVariant {
    /// Falls straight down
    Normal,
    /// Faster, drifts sideways and bounces off the playfield edges
    Zigzag,
    /// Bigger, slower, worth double
    Heavy,
}

impl EnemyVariant {
    /// Bounding box edge length for this variant
    pub fn size(self) -> f32 {
        match self {
            EnemyVariant::Heavy => HEAVY_SIZE,
            _ => ENEMY_SIZE,
        }
    }

    /// Score awarded when a projectile destroys this variant
    pub fn score(self) -> u64 {
        match self {
            EnemyVariant::Heavy => SCORE_HEAVY,
            _ => SCORE_NORMAL,
        }
    }
}

/// The player's ship. Exactly one per session; x follows the pointer,
/// y is pinned above the bottom edge every frame.
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
}

/// An upward-moving player shot
#[derive(Debug, Clone)]
pub struct Projectile {
    pub rect: Rect,
}

/// A descending enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub rect: Rect,
    pub variant: EnemyVariant,
    /// Downward speed, fixed at spawn (base + jitter + variant delta)
    pub speed: f32,
    /// Horizontal drift, nonzero only for zigzag; only its sign ever changes
    pub dx: f32,
}

/// One fragment of an explosion burst
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in frames
    pub life: i32,
}

/// Background decoration, purely visual
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub speed: f32,
    pub size: f32,
}

/// Things that happened during a frame that the platform shell reacts to
/// (sound playback, high-score persistence). The sim itself never touches
/// the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A projectile destroyed an enemy
    EnemyDestroyed { variant: EnemyVariant, center: Vec2 },
    /// The player collided with an enemy; emitted exactly once per session
    GameOver { score: u64, new_best: bool },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Playfield size in CSS pixels (resized with the viewport)
    pub bounds: Vec2,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    /// Monotone while the session is live, frozen after game over
    pub score: u64,
    /// Best score ever seen, loaded once at startup
    pub high_score: u64,
    pub game_over: bool,
    /// Difficulty ticks applied so far
    pub difficulty: u32,
    /// Current spawn period; monotone non-increasing, floored
    pub spawn_interval_ms: f64,
    pub base_enemy_speed: f32,
    pub projectile_speed: f32,
    /// Emission scheduler (also gates manual fire)
    pub fire_timer: Timer,
    /// Enemy spawn scheduler; replaced (not stacked) when the ramp shortens it
    pub spawn_timer: Timer,
    /// Difficulty ramp; body no-ops after game over, so it is never canceled
    pub difficulty_timer: Timer,
    pub rng: Pcg32,
    /// Run seed, kept for logging/reproduction
    pub seed: u64,
}

impl GameState {
    /// Fresh session: player centered at the bottom, empty collections,
    /// all three timers armed at `now_ms`.
    pub fn new(bounds: Vec2, high_score: u64, seed: u64, now_ms: f64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..bounds.x.max(1.0)),
                    rng.random_range(0.0..bounds.y.max(1.0)),
                ),
                speed: rng.random_range(0.5..2.0),
                size: rng.random_range(1.0..2.5),
            })
            .collect();

        let player = Player {
            rect: Rect::new(
                bounds.x / 2.0 - PLAYER_SIZE / 2.0,
                bounds.y - PLAYER_SIZE - PLAYER_BOTTOM_MARGIN,
                PLAYER_SIZE,
                PLAYER_SIZE,
            ),
        };

        Self {
            bounds,
            player,
            projectiles: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            stars,
            score: 0,
            high_score,
            game_over: false,
            difficulty: 0,
            spawn_interval_ms: SPAWN_START_MS,
            base_enemy_speed: ENEMY_START_SPEED,
            projectile_speed: PROJECTILE_START_SPEED,
            fire_timer: Timer::new(FIRE_PERIOD_MS, now_ms),
            spawn_timer: Timer::new(SPAWN_START_MS, now_ms),
            difficulty_timer: Timer::new(DIFFICULTY_PERIOD_MS, now_ms),
            rng,
            seed,
        }
    }

    /// Viewport changed: adopt the new bounds and keep the player inside them
    pub fn resize(&mut self, bounds: Vec2) {
        self.bounds = bounds;
        self.pin_player();
        self.clamp_player();
    }

    /// Pin the player's y a fixed margin above the bottom edge
    pub fn pin_player(&mut self) {
        self.player.rect.y = self.bounds.y - self.player.rect.h - PLAYER_BOTTOM_MARGIN;
    }

    /// Keep the player fully inside the playfield horizontally
    pub fn clamp_player(&mut self) {
        let max_x = self.bounds.x - self.player.rect.w;
        self.player.rect.x = self.player.rect.x.clamp(0.0, max_x.max(0.0));
    }
}
