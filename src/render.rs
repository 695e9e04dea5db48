//! Canvas 2D projection of the game state
//!
//! Strictly read-only: consumes entity positions/sizes/variants and the
//! HUD values, feeds nothing back into the simulation.

use web_sys::CanvasRenderingContext2d;

use crate::Settings;
use crate::sim::{EnemyVariant, GameState};

/// Per-variant fill colors; flat shapes read fine at arcade speed
fn variant_color(variant: EnemyVariant) -> &'static str {
    match variant {
        EnemyVariant::Normal => "#7ed957",
        EnemyVariant::Zigzag => "#5ac8fa",
        EnemyVariant::Heavy => "#b04be0",
    }
}

pub struct Renderer {
    ctx: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Draw one full frame
    pub fn draw(&self, state: &GameState, settings: &Settings, fps: u32) {
        let w = state.bounds.x as f64;
        let h = state.bounds.y as f64;
        let ctx = &self.ctx;

        // Background
        ctx.set_fill_style_str("#05060f");
        ctx.fill_rect(0.0, 0.0, w, h);

        // Starfield
        ctx.set_fill_style_str("#c8d0e8");
        for star in &state.stars {
            ctx.fill_rect(
                star.pos.x as f64,
                star.pos.y as f64,
                star.size as f64,
                star.size as f64,
            );
        }

        // Projectiles
        ctx.set_fill_style_str("red");
        for p in &state.projectiles {
            ctx.fill_rect(
                p.rect.x as f64,
                p.rect.y as f64,
                p.rect.w as f64,
                p.rect.h as f64,
            );
        }

        // Enemies
        for e in &state.enemies {
            ctx.set_fill_style_str(variant_color(e.variant));
            ctx.fill_rect(
                e.rect.x as f64,
                e.rect.y as f64,
                e.rect.w as f64,
                e.rect.h as f64,
            );
        }

        // Player ship: saucer body with a dome
        let p = &state.player.rect;
        ctx.set_fill_style_str("#e8e8f0");
        ctx.fill_rect(
            p.x as f64,
            (p.y + p.h / 2.0) as f64,
            p.w as f64,
            (p.h / 3.0) as f64,
        );
        ctx.set_fill_style_str("#8ab4ff");
        ctx.fill_rect(
            (p.x + p.w / 4.0) as f64,
            (p.y + p.h / 6.0) as f64,
            (p.w / 2.0) as f64,
            (p.h / 2.0) as f64,
        );

        // Explosion debris
        if settings.particles {
            ctx.set_fill_style_str("orange");
            for particle in &state.particles {
                ctx.fill_rect(particle.pos.x as f64, particle.pos.y as f64, 4.0, 4.0);
            }
        }

        // HUD
        ctx.set_fill_style_str("white");
        ctx.set_font("20px Arial");
        ctx.set_text_align("left");
        let _ = ctx.fill_text(&format!("Score: {}", state.score), 20.0, 30.0);
        ctx.set_text_align("right");
        let _ = ctx.fill_text(&format!("High: {}", state.high_score), w - 20.0, 30.0);
        if settings.show_fps {
            ctx.set_text_align("left");
            let _ = ctx.fill_text(&format!("{} fps", fps), 20.0, 55.0);
        }

        if state.game_over {
            self.draw_game_over(state, w, h);
        }
    }

    /// Terminal summary view
    fn draw_game_over(&self, state: &GameState, w: f64, h: f64) {
        let ctx = &self.ctx;

        ctx.set_fill_style_str("rgba(0,0,0,0.8)");
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.set_fill_style_str("white");
        ctx.set_text_align("center");

        ctx.set_font("bold 52px Arial");
        let _ = ctx.fill_text("GAME OVER", w / 2.0, h / 2.0 - 90.0);

        ctx.set_font("30px Arial");
        let _ = ctx.fill_text(&format!("Score: {}", state.score), w / 2.0, h / 2.0 - 20.0);
        let _ = ctx.fill_text(
            &format!("High Score: {}", state.high_score),
            w / 2.0,
            h / 2.0 + 25.0,
        );

        ctx.set_font("20px Arial");
        let _ = ctx.fill_text("Tap to Restart", w / 2.0, h / 2.0 + 85.0);
    }
}
