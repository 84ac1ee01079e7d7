//! Basket Catch entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{MouseEvent, TouchEvent};

    use basket_catch::audio::web::AudioManager;
    use basket_catch::consts::*;
    use basket_catch::platform::Storage;
    use basket_catch::platform::web::LocalStorage;
    use basket_catch::renderer::HudView;
    use basket_catch::renderer::dom::DomRenderer;
    use basket_catch::sim::{GameEvent, GameState, PlayArea, TickInput, tick};
    use basket_catch::{HighScore, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: DomRenderer,
        audio: AudioManager,
        settings: Settings,
        storage: LocalStorage,
        accumulator: f64,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        /// Keep the play area in sync with the container (window resizes)
        fn sync_play_area(&mut self) {
            let (w, h) = self.renderer.container_size();
            let area = self.state.play_area;
            if w > 0.0 && h > 0.0 && (area.width != w || area.height != h) {
                self.state.resize(w, h);
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt_ms: f64) {
            self.sync_play_area();
            self.accumulator += dt_ms.min(MAX_FRAME_DT_MS);

            let mut substeps = 0;
            while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input, SIM_DT_MS);
                self.accumulator -= SIM_DT_MS;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.restart = false;
            }

            self.handle_events();
        }

        /// Sounds and persistence for everything the ticks reported
        fn handle_events(&mut self) {
            let events = self.state.drain_events();
            for cue in self.audio.gate().cues(&events) {
                self.audio.play(cue);
            }
            for event in &events {
                if let GameEvent::GameOver {
                    new_high_score: true,
                    ..
                } = event
                {
                    self.state.high_score.save(&mut self.storage);
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let hud = HudView::from_state(&self.state, self.settings.effective_sparkles());
            self.renderer.render(&self.state, &hud);
        }
    }

    fn load_tuning(storage: &impl Storage) -> Tuning {
        let Some(json) = storage.get_item(Tuning::STORAGE_KEY) else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Using tuning override from storage");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Tuning::default()
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Basket Catch starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let renderer = DomRenderer::new(&document).expect("game markup missing");
        let storage = LocalStorage::new();
        let settings = Settings::load(&storage);
        let tuning = load_tuning(&storage);
        let high_score = HighScore::load(&storage);

        let (w, h) = renderer.container_size();
        let play_area = if w > 0.0 && h > 0.0 {
            PlayArea { width: w, height: h }
        } else {
            PlayArea::default()
        };

        let seed = basket_catch::platform::now_ms() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, play_area, tuning, high_score),
            renderer,
            audio: AudioManager::new(settings.effective_volume()),
            settings,
            storage,
            accumulator: 0.0,
            last_time: 0.0,
            input: TickInput::default(),
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&document, game.clone());
        setup_restart_button(&document, game.clone());

        // Draw the initial HUD before the first frame
        game.borrow_mut().render();

        request_animation_frame(game);

        log::info!("Basket Catch running!");
    }

    fn setup_input_handlers(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        // Mouse move - basket follows the pointer; first move also unlocks audio
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.unlock();
                let x = g.renderer.to_container_x(event.client_x() as f32);
                g.input.pointer_x = Some(x);
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click - unlock audio
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().audio.unlock();
            });
            let _ = document
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start / move - same as mouse
        for event_name in ["touchstart", "touchmove"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    g.audio.unlock();
                    let x = g.renderer.to_container_x(touch.client_x() as f32);
                    g.input.pointer_x = Some(x);
                }
            });
            let _ = document
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.restart = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No #restart-btn; restart disabled");
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
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
            let dt_ms = if g.last_time > 0.0 {
                time - g.last_time
            } else {
                SIM_DT_MS
            };
            g.last_time = time;

            g.update(dt_ms);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Five minutes of play at 60 Hz
#[cfg(not(target_arch = "wasm32"))]
const AUTOPLAY_TICK_CAP: u64 = 5 * 60 * 60;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use basket_catch::consts::SIM_DT_MS;
    use basket_catch::platform::MemoryStorage;
    use basket_catch::sim::{GameEvent, GameState, PlayArea, TickInput, tick};
    use basket_catch::{HighScore, Tuning};

    env_logger::init();
    log::info!("Basket Catch (native) starting...");
    log::info!("Native mode runs a headless autoplay session - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| basket_catch::platform::now_ms() as u64);

    let mut storage = MemoryStorage::new();
    let high_score = HighScore::load(&storage);
    let mut state = GameState::new(seed, PlayArea::default(), Tuning::default(), high_score);
    let mut input = TickInput::default();

    log::info!("Autoplay seed: {}", seed);

    while state.is_running() && state.time_ticks < AUTOPLAY_TICK_CAP {
        input.pointer_x = autopilot_target(&state);
        tick(&mut state, &input, SIM_DT_MS);

        for event in state.drain_events() {
            match event {
                GameEvent::GameOver {
                    new_high_score: true,
                    ..
                } => state.high_score.save(&mut storage),
                GameEvent::Caught { kind, .. } => log::debug!("Caught {:?}", kind),
                GameEvent::Missed { kind, .. } => log::debug!("Missed {:?}", kind),
                _ => {}
            }
        }
    }

    println!(
        "seed {}: score {} | level {} | lives {} | {} ticks{}",
        seed,
        state.score,
        state.level(),
        state.lives,
        state.time_ticks,
        if state.is_running() { " (tick cap reached)" } else { "" }
    );
}

/// Steer under the lowest object worth catching
#[cfg(not(target_arch = "wasm32"))]
fn autopilot_target(state: &basket_catch::sim::GameState) -> Option<f32> {
    use basket_catch::sim::EntityKind;

    let size = state.tuning.entity_size;
    state
        .entities
        .iter()
        .filter(|e| e.kind != EntityKind::Harmful)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|e| e.center(size).x)
}
