//! UFO Blitz - a touch-controlled arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, difficulty)
//! - `render`: Canvas 2D projection of the game state (wasm only)
//! - `highscore`: Single persisted best score (LocalStorage on web)
//! - `settings`: Player preferences (SFX volume, particles, FPS counter)
//! - `audio`: Procedural explosion sound via Web Audio

pub mod audio;
pub mod highscore;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod settings;
pub mod sim;

pub use highscore::HighScore;
pub use settings::Settings;

/// Game tuning constants
///
/// All distances are in CSS pixels, all speeds in pixels per rendered frame
/// (the game is tuned for a ~60 Hz display).
pub mod consts {
    /// Player ship bounding box (square)
    pub const PLAYER_SIZE: f32 = 64.0;
    /// Gap between the player and the bottom edge of the playfield
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;

    /// Projectile bounding box
    pub const PROJECTILE_WIDTH: f32 = 6.0;
    pub const PROJECTILE_HEIGHT: f32 = 18.0;
    /// Initial upward projectile speed
    pub const PROJECTILE_START_SPEED: f32 = 12.0;
    /// Projectile speed gain per difficulty tick
    pub const PROJECTILE_SPEED_STEP: f32 = 0.3;

    /// Standard enemy bounding box (square)
    pub const ENEMY_SIZE: f32 = 60.0;
    /// Heavy enemy bounding box (square)
    pub const HEAVY_SIZE: f32 = 80.0;
    /// Enemies spawn fully off-screen above the playfield
    pub const ENEMY_SPAWN_Y: f32 = -80.0;
    /// Initial base downward enemy speed
    pub const ENEMY_START_SPEED: f32 = 3.5;
    /// Random per-enemy speed bonus is uniform in [0, this)
    pub const ENEMY_SPEED_JITTER: f32 = 2.0;
    /// Enemy speed gain per difficulty tick
    pub const ENEMY_SPEED_STEP: f32 = 0.6;
    /// Zigzag enemies fly this much faster...
    pub const ZIGZAG_SPEED_BONUS: f32 = 2.0;
    /// ...and drift sideways at this magnitude
    pub const ZIGZAG_DRIFT: f32 = 2.5;
    /// Heavy enemies are slower than the base speed
    pub const HEAVY_SPEED_PENALTY: f32 = 1.0;
    /// Enemies fully below `bounds.y + this` are culled without scoring
    pub const ENEMY_CULL_MARGIN: f32 = 120.0;

    /// Score for a heavy kill
    pub const SCORE_HEAVY: u64 = 30;
    /// Score for any other kill
    pub const SCORE_NORMAL: u64 = 15;

    /// Particles per explosion burst
    pub const BURST_SIZE: usize = 20;
    /// Explosion particle lifetime in frames
    pub const PARTICLE_LIFE: i32 = 28;
    /// Particle velocity components are uniform in (-this/2, this/2)
    pub const PARTICLE_SPREAD: f32 = 9.0;

    /// Background starfield size
    pub const STAR_COUNT: usize = 60;

    /// Emission cadence (also the manual-fire debounce period)
    pub const FIRE_PERIOD_MS: f64 = 160.0;
    /// Initial enemy spawn period
    pub const SPAWN_START_MS: f64 = 420.0;
    /// Spawn period never drops below this
    pub const SPAWN_FLOOR_MS: f64 = 160.0;
    /// Spawn period reduction per difficulty tick
    pub const SPAWN_STEP_MS: f64 = 35.0;
    /// Difficulty ramp cadence
    pub const DIFFICULTY_PERIOD_MS: f64 = 9000.0;
}
