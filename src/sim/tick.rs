//! Per-frame simulation step
//!
//! One call to [`advance`] per rendered frame. The step order is
//! load-bearing: projectiles move before enemies, both move before any
//! collision test, and collision removals only become visible to the next
//! frame's iteration. Reordering changes which grazing shots connect.

use glam::Vec2;
use rand::Rng;

use super::collision::rects_overlap;
use super::spawn::{fire_projectile, spawn_burst, spawn_enemy};
use super::state::{EnemyVariant, GameEvent, GameState};
use crate::consts::*;

/// Input sampled by the platform shell, applied at the top of each frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Latest pointer/touch x in playfield coordinates. Sticky across
    /// frames; `None` until the first move event.
    pub pointer_x: Option<f32>,
    /// Manual fire request (tap). Debounced by the emission timer, so a
    /// burst of taps can never exceed the scheduled cadence. One-shot:
    /// the shell clears it after the frame.
    pub fire: bool,
}

/// Advance the session by one display frame at wall-clock `now_ms`.
///
/// Returns the frame's events for the shell to react to (sound,
/// persistence). Returns nothing and changes nothing once the session is
/// over; the shell also stops scheduling frames at that point.
pub fn advance(state: &mut GameState, input: &FrameInput, now_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.game_over {
        return events;
    }

    // Input sample: follow the pointer, stay inside the playfield,
    // stay pinned above the bottom edge.
    if let Some(px) = input.pointer_x {
        state.player.rect.x = px - state.player.rect.w / 2.0;
        state.clamp_player();
    }
    state.pin_player();

    // Schedulers, driven by wall-clock time so cadence is frame-rate
    // independent.
    for _ in 0..state.fire_timer.fire(now_ms) {
        fire_projectile(state);
    }
    if input.fire && state.fire_timer.consume(now_ms) {
        fire_projectile(state);
    }
    for _ in 0..state.spawn_timer.fire(now_ms) {
        spawn_enemy(state);
    }
    for _ in 0..state.difficulty_timer.fire(now_ms) {
        ramp_difficulty(state, now_ms);
    }

    // Projectiles climb; anything past the top edge is gone.
    let projectile_speed = state.projectile_speed;
    for p in &mut state.projectiles {
        p.rect.y -= projectile_speed;
    }
    state.projectiles.retain(|p| p.rect.y >= 0.0);

    // Enemies descend; zigzags drift and reflect off the side edges.
    let field_w = state.bounds.x;
    for e in &mut state.enemies {
        e.rect.y += e.speed;
        if e.variant == EnemyVariant::Zigzag {
            e.rect.x += e.dx;
            if e.rect.x <= 0.0 || e.rect.x + e.rect.w >= field_w {
                e.dx = -e.dx;
            }
        }
    }

    // Projectile vs enemy. Survivors are computed first, then the
    // collections are replaced; nothing is removed mid-iteration.
    let mut dead_projectiles = vec![false; state.projectiles.len()];
    let mut dead_enemies = vec![false; state.enemies.len()];
    let mut kills: Vec<(EnemyVariant, Vec2)> = Vec::new();
    let mut score_gain: u64 = 0;

    for (ei, enemy) in state.enemies.iter().enumerate() {
        for (pi, projectile) in state.projectiles.iter().enumerate() {
            if dead_enemies[ei] || dead_projectiles[pi] {
                continue;
            }
            if rects_overlap(&projectile.rect, &enemy.rect) {
                dead_enemies[ei] = true;
                dead_projectiles[pi] = true;
                score_gain += enemy.variant.score();
                kills.push((enemy.variant, enemy.rect.center()));
            }
        }
    }

    let mut i = 0;
    state.projectiles.retain(|_| {
        let keep = !dead_projectiles[i];
        i += 1;
        keep
    });
    let mut i = 0;
    state.enemies.retain(|_| {
        let keep = !dead_enemies[i];
        i += 1;
        keep
    });

    state.score += score_gain;
    for (variant, center) in kills {
        spawn_burst(state, center);
        events.push(GameEvent::EnemyDestroyed { variant, center });
    }

    // Surviving enemy vs player ends the session.
    let player_hit = state
        .enemies
        .iter()
        .any(|e| rects_overlap(&state.player.rect, &e.rect));
    if player_hit {
        events.push(end_game(state));
    }

    // Explosion debris.
    for p in &mut state.particles {
        p.pos += p.vel;
        p.life -= 1;
    }
    state.particles.retain(|p| p.life > 0);

    // Background stars drift down and wrap to a fresh column.
    let field_h = state.bounds.y;
    for i in 0..state.stars.len() {
        state.stars[i].pos.y += state.stars[i].speed;
        if state.stars[i].pos.y > field_h {
            state.stars[i].pos.y = 0.0;
            state.stars[i].pos.x = state.rng.random_range(0.0..field_w.max(1.0));
        }
    }

    // Enemies that fell well past the bottom are culled without scoring.
    let cull_y = state.bounds.y + ENEMY_CULL_MARGIN;
    state.enemies.retain(|e| e.rect.y <= cull_y);

    events
}

/// One difficulty tick: faster enemies, faster shots, shorter spawn
/// period (floor-clamped). Replacing the spawn schedule cancels the old
/// one; nothing stacks. Guarded on game over even though the frame loop
/// stops calling it.
pub fn ramp_difficulty(state: &mut GameState, now_ms: f64) {
    if state.game_over {
        return;
    }
    state.difficulty += 1;
    state.base_enemy_speed += ENEMY_SPEED_STEP;
    state.projectile_speed += PROJECTILE_SPEED_STEP;
    if state.spawn_interval_ms > SPAWN_FLOOR_MS {
        state.spawn_interval_ms = (state.spawn_interval_ms - SPAWN_STEP_MS).max(SPAWN_FLOOR_MS);
        state
            .spawn_timer
            .restart(state.spawn_interval_ms, now_ms);
    }
}

/// Terminate the session. Fires exactly once: the emission and spawn
/// schedules are canceled, the score freezes, and the best score is
/// updated for the shell to persist.
fn end_game(state: &mut GameState) -> GameEvent {
    state.game_over = true;
    state.fire_timer.cancel();
    state.spawn_timer.cancel();
    let new_best = state.score > state.high_score;
    if new_best {
        state.high_score = state.score;
    }
    log::info!("game over: score {} (best {})", state.score, state.high_score);
    GameEvent::GameOver {
        score: state.score,
        new_best,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, Particle, Projectile, Rect};

    const W: f32 = 800.0;
    const H: f32 = 600.0;

    fn state() -> GameState {
        GameState::new(Vec2::new(W, H), 0, 42, 0.0)
    }

    /// State with every scheduler silenced, for isolating motion logic.
    fn quiet_state() -> GameState {
        let mut s = state();
        s.fire_timer.cancel();
        s.spawn_timer.cancel();
        s.difficulty_timer.cancel();
        s
    }

    fn enemy(x: f32, y: f32, variant: EnemyVariant, speed: f32, dx: f32) -> Enemy {
        let size = variant.size();
        Enemy {
            rect: Rect::new(x, y, size, size),
            variant,
            speed,
            dx,
        }
    }

    fn no_input() -> FrameInput {
        FrameInput::default()
    }

    // ── input sampling ──────────────────────────────────────────────────

    #[test]
    fn pointer_centers_player_on_position() {
        let mut s = quiet_state();
        let input = FrameInput {
            pointer_x: Some(300.0),
            fire: false,
        };
        advance(&mut s, &input, 1.0);
        assert_eq!(s.player.rect.x, 300.0 - PLAYER_SIZE / 2.0);
    }

    #[test]
    fn player_clamped_at_both_edges() {
        let mut s = quiet_state();
        advance(
            &mut s,
            &FrameInput {
                pointer_x: Some(-500.0),
                fire: false,
            },
            1.0,
        );
        assert_eq!(s.player.rect.x, 0.0);

        advance(
            &mut s,
            &FrameInput {
                pointer_x: Some(W + 500.0),
                fire: false,
            },
            2.0,
        );
        assert_eq!(s.player.rect.x, W - PLAYER_SIZE);
    }

    #[test]
    fn player_y_stays_pinned() {
        let mut s = quiet_state();
        s.player.rect.y = 0.0;
        advance(&mut s, &no_input(), 1.0);
        assert_eq!(s.player.rect.y, H - PLAYER_SIZE - PLAYER_BOTTOM_MARGIN);
    }

    #[test]
    fn pointer_ignored_after_game_over() {
        let mut s = quiet_state();
        s.game_over = true;
        let x_before = s.player.rect.x;
        advance(
            &mut s,
            &FrameInput {
                pointer_x: Some(50.0),
                fire: false,
            },
            1.0,
        );
        assert_eq!(s.player.rect.x, x_before);
    }

    // ── projectiles ─────────────────────────────────────────────────────

    #[test]
    fn projectile_climbs_by_current_speed() {
        let mut s = quiet_state();
        s.projectiles.push(Projectile {
            rect: Rect::new(100.0, 300.0, PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
        });
        advance(&mut s, &no_input(), 1.0);
        assert_eq!(s.projectiles[0].rect.y, 300.0 - PROJECTILE_START_SPEED);
    }

    #[test]
    fn projectile_dropped_once_above_top_edge() {
        let mut s = quiet_state();
        s.projectiles.push(Projectile {
            rect: Rect::new(100.0, 5.0, PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
        });
        advance(&mut s, &no_input(), 1.0);
        // Moved to y = -7, which is past the top edge.
        assert!(s.projectiles.is_empty());
    }

    // ── enemy motion ────────────────────────────────────────────────────

    #[test]
    fn enemies_descend_by_their_own_speed() {
        let mut s = quiet_state();
        s.enemies.push(enemy(100.0, 0.0, EnemyVariant::Normal, 3.0, 0.0));
        s.enemies.push(enemy(300.0, 0.0, EnemyVariant::Heavy, 2.5, 0.0));
        advance(&mut s, &no_input(), 1.0);
        assert_eq!(s.enemies[0].rect.y, 3.0);
        assert_eq!(s.enemies[1].rect.y, 2.5);
    }

    #[test]
    fn zigzag_drifts_without_flipping_mid_field() {
        let mut s = quiet_state();
        s.enemies
            .push(enemy(400.0, 100.0, EnemyVariant::Zigzag, 5.0, ZIGZAG_DRIFT));
        advance(&mut s, &no_input(), 1.0);
        assert_eq!(s.enemies[0].rect.x, 400.0 + ZIGZAG_DRIFT);
        assert_eq!(s.enemies[0].dx, ZIGZAG_DRIFT);
    }

    #[test]
    fn zigzag_reflects_at_left_edge_keeping_magnitude() {
        let mut s = quiet_state();
        s.enemies
            .push(enemy(1.0, 100.0, EnemyVariant::Zigzag, 5.0, -ZIGZAG_DRIFT));
        advance(&mut s, &no_input(), 1.0);
        // Drifted past the edge this frame; the sign flips, nothing clamps.
        assert_eq!(s.enemies[0].rect.x, 1.0 - ZIGZAG_DRIFT);
        assert_eq!(s.enemies[0].dx, ZIGZAG_DRIFT);
    }

    #[test]
    fn zigzag_reflects_at_right_edge() {
        let mut s = quiet_state();
        let x = W - ENEMY_SIZE - 1.0;
        s.enemies
            .push(enemy(x, 100.0, EnemyVariant::Zigzag, 5.0, ZIGZAG_DRIFT));
        advance(&mut s, &no_input(), 1.0);
        assert_eq!(s.enemies[0].dx, -ZIGZAG_DRIFT);
        // Magnitude constant across the lifetime.
        advance(&mut s, &no_input(), 2.0);
        assert_eq!(s.enemies[0].dx.abs(), ZIGZAG_DRIFT);
    }

    #[test]
    fn enemies_below_the_field_are_culled_without_scoring() {
        let mut s = quiet_state();
        s.enemies
            .push(enemy(100.0, H + ENEMY_CULL_MARGIN + 1.0, EnemyVariant::Normal, 3.0, 0.0));
        advance(&mut s, &no_input(), 1.0);
        assert!(s.enemies.is_empty());
        assert_eq!(s.score, 0);
    }

    // ── projectile vs enemy ─────────────────────────────────────────────

    #[test]
    fn kill_removes_both_scores_and_bursts() {
        let mut s = quiet_state();
        s.enemies.push(enemy(100.0, 200.0, EnemyVariant::Normal, 0.0, 0.0));
        s.projectiles.push(Projectile {
            rect: Rect::new(120.0, 230.0, PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
        });
        let events = advance(&mut s, &no_input(), 1.0);
        assert!(s.enemies.is_empty());
        assert!(s.projectiles.is_empty());
        assert_eq!(s.score, SCORE_NORMAL);
        // Burst spawned this frame, then aged once.
        assert_eq!(s.particles.len(), BURST_SIZE);
        assert!(matches!(
            events[0],
            GameEvent::EnemyDestroyed {
                variant: EnemyVariant::Normal,
                ..
            }
        ));
    }

    #[test]
    fn one_projectile_kills_at_most_one_enemy() {
        let mut s = quiet_state();
        // Two enemies stacked on the same spot.
        s.enemies.push(enemy(100.0, 200.0, EnemyVariant::Normal, 0.0, 0.0));
        s.enemies.push(enemy(100.0, 200.0, EnemyVariant::Normal, 0.0, 0.0));
        s.projectiles.push(Projectile {
            rect: Rect::new(120.0, 230.0, PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
        });
        advance(&mut s, &no_input(), 1.0);
        assert_eq!(s.enemies.len(), 1);
        assert_eq!(s.score, SCORE_NORMAL);
    }

    #[test]
    fn heavy_kill_scenario() {
        // Heavy enemy at (100, -80) sized 95x95 falling at 2.5;
        // projectile at (130, 50) climbing at 8. They meet on the 4th step.
        let mut s = quiet_state();
        s.projectile_speed = 8.0;
        s.enemies.push(Enemy {
            rect: Rect::new(100.0, -80.0, 95.0, 95.0),
            variant: EnemyVariant::Heavy,
            speed: 2.5,
            dx: 0.0,
        });
        s.projectiles.push(Projectile {
            rect: Rect::new(130.0, 50.0, 6.0, 18.0),
        });

        let mut killed_at = None;
        for step in 1..=20 {
            let events = advance(&mut s, &no_input(), step as f64);
            if events
                .iter()
                .any(|e| matches!(e, GameEvent::EnemyDestroyed { .. }))
            {
                killed_at = Some(step);
                break;
            }
        }

        assert_eq!(killed_at, Some(4));
        assert!(s.enemies.is_empty());
        assert!(s.projectiles.is_empty());
        assert_eq!(s.score, SCORE_HEAVY);
        assert_eq!(s.particles.len(), BURST_SIZE);
        // All particles start at the enemy's center as of the kill frame:
        // x = 100 + 47.5, y = -80 + 4 * 2.5 + 47.5, each then aged one frame.
        for p in &s.particles {
            assert!((p.pos.x - p.vel.x - 147.5).abs() < 1e-3);
            assert!((p.pos.y - p.vel.y - (-22.5)).abs() < 1e-3);
        }
    }

    // ── termination ─────────────────────────────────────────────────────

    #[test]
    fn player_collision_ends_game_and_records_best() {
        let mut s = quiet_state();
        s.score = 45;
        s.high_score = 0;
        // Drop an enemy right on the player.
        let px = s.player.rect.x;
        let py = s.player.rect.y;
        s.enemies.push(enemy(px, py - 1.0, EnemyVariant::Normal, 0.0, 0.0));

        let events = advance(&mut s, &no_input(), 1.0);
        assert!(s.game_over);
        assert_eq!(s.high_score, 45);
        assert!(matches!(
            events.last(),
            Some(GameEvent::GameOver {
                score: 45,
                new_best: true
            })
        ));
        assert!(!s.fire_timer.is_armed());
        assert!(!s.spawn_timer.is_armed());
    }

    #[test]
    fn existing_best_is_kept_when_not_beaten() {
        let mut s = quiet_state();
        s.score = 30;
        s.high_score = 100;
        let px = s.player.rect.x;
        let py = s.player.rect.y;
        s.enemies.push(enemy(px, py - 1.0, EnemyVariant::Normal, 0.0, 0.0));

        let events = advance(&mut s, &no_input(), 1.0);
        assert_eq!(s.high_score, 100);
        assert!(matches!(
            events.last(),
            Some(GameEvent::GameOver {
                score: 30,
                new_best: false
            })
        ));
    }

    #[test]
    fn nothing_grows_after_game_over() {
        let mut s = state();
        s.score = 15;
        let px = s.player.rect.x;
        let py = s.player.rect.y;
        s.enemies.push(enemy(px, py - 1.0, EnemyVariant::Normal, 0.0, 0.0));
        advance(&mut s, &no_input(), 1.0);
        assert!(s.game_over);

        let enemies = s.enemies.len();
        let projectiles = s.projectiles.len();
        let score = s.score;
        // Many more scheduled-tick opportunities; nothing may appear.
        for i in 0..20 {
            let events = advance(&mut s, &no_input(), 1000.0 * (i + 1) as f64);
            assert!(events.is_empty());
        }
        assert_eq!(s.enemies.len(), enemies);
        assert_eq!(s.projectiles.len(), projectiles);
        assert_eq!(s.score, score);
    }

    #[test]
    fn difficulty_ramp_noops_after_game_over() {
        let mut s = quiet_state();
        s.game_over = true;
        let speed = s.base_enemy_speed;
        let interval = s.spawn_interval_ms;
        ramp_difficulty(&mut s, 9000.0);
        assert_eq!(s.difficulty, 0);
        assert_eq!(s.base_enemy_speed, speed);
        assert_eq!(s.spawn_interval_ms, interval);
    }

    // ── schedulers ──────────────────────────────────────────────────────

    #[test]
    fn emission_fires_on_cadence() {
        let mut s = state();
        s.spawn_timer.cancel();
        s.difficulty_timer.cancel();
        advance(&mut s, &no_input(), 10.0);
        assert!(s.projectiles.is_empty());
        advance(&mut s, &no_input(), FIRE_PERIOD_MS);
        assert_eq!(s.projectiles.len(), 1);
        advance(&mut s, &no_input(), FIRE_PERIOD_MS + 10.0);
        assert_eq!(s.projectiles.len(), 1);
        advance(&mut s, &no_input(), 2.0 * FIRE_PERIOD_MS);
        assert_eq!(s.projectiles.len(), 2);
    }

    #[test]
    fn manual_fire_burst_cannot_beat_the_cadence() {
        let mut s = state();
        s.spawn_timer.cancel();
        s.difficulty_timer.cancel();
        let tap = FrameInput {
            pointer_x: None,
            fire: true,
        };
        // Hammer the trigger well inside the debounce window.
        for i in 1..16 {
            advance(&mut s, &tap, i as f64 * 10.0); // 10..150 ms
        }
        assert!(s.projectiles.is_empty());
        advance(&mut s, &tap, FIRE_PERIOD_MS);
        assert_eq!(s.projectiles.len(), 1);
        advance(&mut s, &tap, FIRE_PERIOD_MS + 5.0);
        assert_eq!(s.projectiles.len(), 1);
    }

    #[test]
    fn spawner_fires_on_cadence() {
        let mut s = state();
        s.fire_timer.cancel();
        s.difficulty_timer.cancel();
        advance(&mut s, &no_input(), SPAWN_START_MS - 1.0);
        assert!(s.enemies.is_empty());
        advance(&mut s, &no_input(), SPAWN_START_MS);
        assert_eq!(s.enemies.len(), 1);
    }

    #[test]
    fn spawn_interval_hits_the_floor_after_eight_ramps() {
        let mut s = state();
        s.fire_timer.cancel();
        s.spawn_timer.cancel();
        for tick in 1..=8 {
            advance(&mut s, &no_input(), tick as f64 * DIFFICULTY_PERIOD_MS);
        }
        // max(160, 420 - 8 * 35) = 160: clamped, not 140.
        assert_eq!(s.spawn_interval_ms, SPAWN_FLOOR_MS);
        assert_eq!(s.difficulty, 8);
        assert!((s.base_enemy_speed - (ENEMY_START_SPEED + 8.0 * ENEMY_SPEED_STEP)).abs() < 1e-4);
        assert!(
            (s.projectile_speed - (PROJECTILE_START_SPEED + 8.0 * PROJECTILE_SPEED_STEP)).abs()
                < 1e-4
        );

        // A ninth tick must not push the interval below the floor.
        advance(&mut s, &no_input(), 9.0 * DIFFICULTY_PERIOD_MS);
        assert_eq!(s.spawn_interval_ms, SPAWN_FLOOR_MS);
        assert_eq!(s.difficulty, 9);
    }

    #[test]
    fn spawn_interval_is_monotone_non_increasing() {
        let mut s = state();
        s.fire_timer.cancel();
        s.spawn_timer.cancel();
        let mut last = s.spawn_interval_ms;
        for tick in 1..=12 {
            advance(&mut s, &no_input(), tick as f64 * DIFFICULTY_PERIOD_MS);
            assert!(s.spawn_interval_ms <= last);
            assert!(s.spawn_interval_ms >= SPAWN_FLOOR_MS);
            last = s.spawn_interval_ms;
        }
    }

    // ── particles & stars ───────────────────────────────────────────────

    #[test]
    fn particles_drift_and_expire() {
        let mut s = quiet_state();
        s.particles.push(Particle {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::new(2.0, -1.0),
            life: 3,
        });
        advance(&mut s, &no_input(), 1.0);
        assert_eq!(s.particles[0].pos, Vec2::new(102.0, 99.0));
        assert_eq!(s.particles[0].life, 2);
        advance(&mut s, &no_input(), 2.0);
        advance(&mut s, &no_input(), 3.0);
        assert!(s.particles.is_empty());
    }

    #[test]
    fn stars_wrap_to_the_top() {
        let mut s = quiet_state();
        s.stars.truncate(1);
        s.stars[0].pos.y = H + 1.0;
        advance(&mut s, &no_input(), 1.0);
        assert_eq!(s.stars[0].pos.y, 0.0);
        assert!(s.stars[0].pos.x >= 0.0 && s.stars[0].pos.x <= W);
    }

    // ── determinism ─────────────────────────────────────────────────────

    #[test]
    fn same_seed_same_run() {
        let run = |seed: u64| {
            let mut s = GameState::new(Vec2::new(W, H), 0, seed, 0.0);
            for frame in 1..600u32 {
                advance(&mut s, &no_input(), frame as f64 * 16.0);
            }
            (s.score, s.enemies.len(), s.projectiles.len(), s.difficulty)
        };
        assert_eq!(run(123), run(123));
    }
}
