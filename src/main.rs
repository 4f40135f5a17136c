//! Brick Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop.
//! On the web: one animation-frame task ticks the engine and renders, a
//! one-second interval task advances the game timer. Natively: a headless
//! autopilot demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::KeyboardEvent;

    use brick_breaker::GameConfig;
    use brick_breaker::consts::SIM_DT;
    use brick_breaker::platform::{Command, FixedStep, InputTracker};
    use brick_breaker::renderer::DomRenderer;
    use brick_breaker::sim::{GamePhase, GameState, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: DomRenderer,
        input: InputTracker,
        clock: FixedStep,
        last_time: f64,
    }

    impl Game {
        fn new(state: GameState, renderer: DomRenderer) -> Self {
            Self {
                state,
                renderer,
                input: InputTracker::new(),
                clock: FixedStep::default(),
                last_time: 0.0,
            }
        }

        /// Run simulation ticks for one animation frame
        fn update(&mut self, dt: f32) {
            if self.state.phase != GamePhase::Playing {
                // Paused or finished: no ticks, and no backlog on resume
                self.clock.reset();
                return;
            }

            let substeps = self.clock.advance(dt);
            for _ in 0..substeps {
                let events = tick(&mut self.state, &self.input.tick_input());
                for &idx in &events.bricks_destroyed {
                    self.renderer.hide_brick(idx);
                }
                if events.won || events.lost {
                    break;
                }
            }
        }

        fn render(&mut self) {
            self.renderer.render(&self.state.snapshot());
        }

        fn handle_key_down(&mut self, key: &str) {
            let Some(command) = self.input.key_down(key) else {
                return;
            };
            if !command.apply(&mut self.state) {
                return;
            }

            match command {
                Command::Start => self.renderer.build_bricks(&self.state),
                Command::Reset => {
                    self.renderer.clear_bricks();
                    self.input.release_all();
                }
                Command::TogglePause => {}
            }
            self.clock.reset();
            self.render();
        }

        fn auto_pause(&mut self, reason: &str) {
            self.input.release_all();
            if self.state.phase == GamePhase::Playing && self.state.toggle_pause() {
                log::info!("Auto-paused ({})", reason);
                self.render();
            }
        }
    }

    fn load_config(renderer: &DomRenderer) -> GameConfig {
        let Some(json) = renderer.config_attribute() else {
            return GameConfig::default();
        };
        match GameConfig::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded config override from page");
                config
            }
            Err(e) => {
                log::warn!("Ignoring config override: {}", e);
                GameConfig::default()
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Brick Breaker starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let Some(renderer) = DomRenderer::new(&document) else {
            log::error!("Page is missing #game-area, #paddle or #ball");
            return;
        };

        let config = load_config(&renderer);
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(
            GameState::new(config, seed),
            renderer,
        )));
        game.borrow_mut().render();

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_auto_pause(game.clone());
        start_timer(game.clone());

        request_animation_frame(game);

        log::info!("Brick Breaker running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        // Key down: held flags and phase commands
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().handle_key_down(&event.key());
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up: release held flags
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().auto_pause("tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside); keyup events will not arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().auto_pause("window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// One-second interval task for the game clock
    fn start_timer(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut()>::new(move || {
            game.borrow_mut().state.on_second_elapsed();
        });
        if window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                1000,
            )
            .is_err()
        {
            log::error!("Failed to start game timer");
        }
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
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Ten minutes of logical time at 60 ticks per second
#[cfg(not(target_arch = "wasm32"))]
const DEMO_MAX_TICKS: u32 = 60 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use brick_breaker::GameConfig;
    use brick_breaker::consts::SIM_DT;
    use brick_breaker::renderer::format_timer;
    use brick_breaker::sim::{GameState, autopilot_input, tick};

    env_logger::init();
    log::info!("Brick Breaker (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - serve the wasm build for the web version");

    let seed = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<u64>() {
            Ok(seed) => seed,
            Err(_) => {
                eprintln!("usage: brick-breaker [seed]");
                std::process::exit(2);
            }
        },
        None => 1,
    };

    let mut state = GameState::new(GameConfig::default(), seed);
    state.start();

    let ticks_per_second = (1.0 / SIM_DT).round() as u32;
    for n in 1..=DEMO_MAX_TICKS {
        let input = autopilot_input(&state);
        let events = tick(&mut state, &input);
        if n % ticks_per_second == 0 {
            state.on_second_elapsed();
        }
        if events.won || events.lost {
            break;
        }
    }

    println!(
        "seed {}: {} | score {} | lives {} | bricks left {} | time {} ({} ticks)",
        seed,
        state.phase.as_str(),
        state.score,
        state.lives,
        state.alive_bricks(),
        format_timer(state.game_time),
        state.time_ticks,
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
