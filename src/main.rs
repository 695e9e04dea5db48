//! UFO Blitz entry point
//!
//! Wasm builds wire the simulation to the browser (canvas, pointer/touch,
//! LocalStorage, Web Audio); native builds run a short headless session as
//! a smoke test.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use ufo_blitz::audio::AudioManager;
    use ufo_blitz::render::Renderer;
    use ufo_blitz::sim::{FrameInput, GameEvent, GameState, advance};
    use ufo_blitz::{HighScore, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Renderer,
        input: FrameInput,
        audio: AudioManager,
        settings: Settings,
        high_score: HighScore,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        /// False once the frame loop stopped rescheduling (game over)
        loop_running: bool,
    }

    impl Game {
        fn new(
            bounds: Vec2,
            renderer: Renderer,
            settings: Settings,
            high_score: HighScore,
            seed: u64,
            now_ms: f64,
        ) -> Self {
            let audio = AudioManager::new(settings.effective_sfx_volume());
            Self {
                state: GameState::new(bounds, high_score.best, seed, now_ms),
                renderer,
                input: FrameInput::default(),
                audio,
                settings,
                high_score,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                loop_running: true,
            }
        }

        /// One display frame: step the sim, react to events, redraw
        fn frame(&mut self, time: f64) {
            let events = advance(&mut self.state, &self.input, time);
            // Clear one-shot inputs after processing
            self.input.fire = false;

            for event in &events {
                match event {
                    GameEvent::EnemyDestroyed { .. } => self.audio.play_explosion(),
                    GameEvent::GameOver { score, new_best } => {
                        if *new_best && self.high_score.record(*score) {
                            self.high_score.save();
                        }
                    }
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 {
                let elapsed = time - oldest;
                if elapsed > 0.0 {
                    self.fps = (60_000.0 / elapsed).round() as u32;
                }
            }

            self.renderer.draw(&self.state, &self.settings, self.fps);
        }

        /// Full reset: rebuild the session from scratch with a fresh seed
        fn restart(&mut self, seed: u64, now_ms: f64) {
            let bounds = self.state.bounds;
            self.state = GameState::new(bounds, self.high_score.best, seed, now_ms);
            self.input = FrameInput::default();
            log::info!("Game restarted with seed: {}", seed);
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    fn viewport_bounds(window: &web_sys::Window) -> Vec2 {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        Vec2::new(w as f32, h as f32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("UFO Blitz starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Playfield fills the viewport
        let bounds = viewport_bounds(&window);
        canvas.set_width(bounds.x as u32);
        canvas.set_height(bounds.y as u32);

        let ctx: web_sys::CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let settings = Settings::load();
        let high_score = HighScore::load();
        let seed = js_sys::Date::now() as u64;

        let game = Rc::new(RefCell::new(Game::new(
            bounds,
            Renderer::new(ctx),
            settings,
            high_score,
            seed,
            now_ms(),
        )));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_resize_handler(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("UFO Blitz running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Desktop: drag with the button held
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.buttons() == 1 {
                    game.borrow_mut().input.pointer_x = Some(event.offset_x() as f32);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mobile: follow the finger
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                // A touchmove with no touch points is ignored outright.
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    game.borrow_mut().input.pointer_x = Some(x);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click: manual fire, or restart from the game-over screen
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                handle_trigger(&game);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: same, plus the mobile audio unlock
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow().audio.resume();
                handle_trigger(&game);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Shared mousedown/touchstart behavior
    fn handle_trigger(game: &Rc<RefCell<Game>>) {
        let game_over = game.borrow().state.game_over;
        if game_over {
            let seed = js_sys::Date::now() as u64;
            let mut g = game.borrow_mut();
            g.restart(seed, now_ms());
            let resume = !g.loop_running;
            g.loop_running = true;
            drop(g);
            if resume {
                request_animation_frame(game.clone());
            }
        } else {
            game.borrow_mut().input.fire = true;
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let window = web_sys::window().unwrap();
            let bounds = viewport_bounds(&window);
            canvas.set_width(bounds.x as u32);
            canvas.set_height(bounds.y as u32);
            game.borrow_mut().state.resize(bounds);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_running = {
            let mut g = game.borrow_mut();
            g.frame(time);
            // The terminal screen is drawn; the loop stops rescheduling
            // itself and a tap on the overlay starts a fresh session.
            let running = !g.state.game_over;
            g.loop_running = running;
            running
        };
        if keep_running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use ufo_blitz::HighScore;
    use ufo_blitz::sim::{FrameInput, GameEvent, GameState, advance};

    env_logger::init();
    log::info!("UFO Blitz (native) starting headless session...");

    // Fixed seed, idle player, 60 Hz timestamps. The ship sits center
    // bottom until an enemy reaches it, exercising the full sim.
    let mut state = GameState::new(Vec2::new(800.0, 600.0), HighScore::load().best, 7, 0.0);
    let input = FrameInput::default();

    let mut frames: u64 = 0;
    while !state.game_over && frames < 120 * 60 {
        frames += 1;
        let now = frames as f64 * (1000.0 / 60.0);
        for event in advance(&mut state, &input, now) {
            if let GameEvent::GameOver { score, .. } = event {
                log::info!("run ended at frame {} with score {}", frames, score);
            }
        }
    }

    println!(
        "headless run: {} frames, score {}, difficulty {}, {} enemies live",
        frames,
        state.score,
        state.difficulty,
        state.enemies.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
