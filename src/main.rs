//! Pixel Flapper entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use pixel_flapper::consts::*;
    use pixel_flapper::leaderboard::{self, Leaderboard};
    use pixel_flapper::renderer::{RenderState, SpriteStatus, build_frame};
    use pixel_flapper::settings::Settings;
    use pixel_flapper::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    /// Bird sprite served next to the page
    const BIRD_SPRITE_URL: &str = "/bird.png";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        sprite: SpriteStatus,
        input: TickInput,
        last_time: f64,
        settings: Settings,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                render_state: None,
                sprite: SpriteStatus::Loading,
                input: TickInput::default(),
                last_time: 0.0,
                settings: Settings::load(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run one simulation step from the frame timestamp
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (((time - self.last_time) / NOMINAL_FRAME_MS) as f32).min(MAX_TIME_SCALE)
            } else {
                1.0
            };
            self.last_time = time;

            // Outside the playing phase only particles age, on a fixed step
            let dt = if self.state.phase == GamePhase::Playing {
                dt
            } else {
                1.0
            };

            let input = self.input;
            tick(&mut self.state, &input, dt, time);

            // Clear one-shot inputs after processing
            self.input = TickInput::default();

            for event in self.state.take_events() {
                apply_event(event);
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60_000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            let frame = build_frame(&self.state, time, self.sprite, &self.settings);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&frame) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in the DOM, when the host page has them
        fn update_hud(&self) {
            if self.settings.show_fps {
                set_text("hud-fps", &self.fps.to_string());
            }
        }
    }

    /// React to a drained simulation event
    fn apply_event(event: GameEvent) {
        match event {
            GameEvent::Started => {
                set_visible("game-overlay", false);
                set_visible("game-over-controls", false);
                set_text("hud-score", "0");
            }
            GameEvent::Scored { total } => {
                set_text("hud-score", &total.to_string());
            }
            GameEvent::Died => {
                log::debug!("Bird down, game-over pending");
            }
            GameEvent::GameOver { score } => {
                set_text("final-score", &score.to_string());
                set_visible("overlay-ready", false);
                set_visible("game-overlay", true);
                set_visible("game-over-controls", true);
            }
        }
    }

    fn set_visible(id: &str, visible: bool) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn set_text(id: &str, text: &str) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn show_ready_overlay() {
        set_visible("game-overlay", true);
        set_visible("overlay-ready", true);
        set_visible("game-over-controls", false);
    }

    /// Tell the dashboard to refresh itself
    fn notify_returned() {
        if let Some(window) = web_sys::window() {
            if let Ok(event) = web_sys::Event::new("returnedFromGame") {
                let _ = window.dispatch_event(&event);
            }
        }
    }

    /// Navigate back to the dashboard route
    fn exit_to_dashboard() {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_hash("#/");
        }
        notify_returned();
    }

    /// Dashboard's displayed login name, if the element is on the page
    fn displayed_username() -> Option<String> {
        let document = web_sys::window()?.document()?;
        let el = document.query_selector("#current-user-name").ok().flatten()?;
        el.text_content()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Submit the finished run's score under the resolved username
    fn submit_score(score: u32) {
        let username = leaderboard::resolve_username(
            leaderboard::current_user(),
            displayed_username(),
            &leaderboard::load_users(),
        );

        let Some(username) = username else {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(
                    "No user logged in. Please sign up or log in on the Dashboard before submitting a score.",
                );
            }
            return;
        };

        let mut board = Leaderboard::load();
        board.record(&username, score);
        board.save();
        notify_returned();

        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&format!("Score submitted: {username} - {score}"));
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pixel Flapper starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Logical canvas size is fixed; CSS may scale the element
        canvas.set_width(CANVAS_W as u32);
        canvas.set_height(CANVAS_H as u32);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, CANVAS_W as u32, CANVAS_H as u32).await;
        game.borrow_mut().render_state = Some(render_state);

        load_sprite(game.clone());
        setup_input_handlers(&canvas, game.clone());
        setup_overlay_buttons(game.clone());
        show_ready_overlay();

        // Start game loop
        request_animation_frame(game);

        log::info!("Pixel Flapper running!");
    }

    /// Fetch and decode the bird sprite in the background. The game keeps
    /// running with the fallback bird until (unless) this succeeds.
    fn load_sprite(game: Rc<RefCell<Game>>) {
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_sprite().await {
                Ok(img) => {
                    let mut g = game.borrow_mut();
                    if let Some(ref mut render_state) = g.render_state {
                        render_state.set_sprite(&img);
                    }
                    g.sprite = SpriteStatus::Ready;
                    log::info!("Bird sprite loaded ({}x{})", img.width(), img.height());
                }
                Err(e) => {
                    game.borrow_mut().sprite = SpriteStatus::Failed;
                    log::warn!(
                        "Bird sprite failed to load from {BIRD_SPRITE_URL}. \
                         Falling back to rectangle when playing. {e:?}"
                    );
                }
            }
        });
    }

    async fn fetch_sprite() -> Result<image::RgbaImage, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let response: web_sys::Response =
            JsFuture::from(window.fetch_with_str(BIRD_SPRITE_URL))
                .await?
                .dyn_into()?;
        if !response.ok() {
            return Err(JsValue::from_str("sprite request failed"));
        }
        let buffer = JsFuture::from(response.array_buffer()?).await?;
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
        let img =
            image::load_from_memory(&bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(img.to_rgba8())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard: space flaps, R retries, Escape exits to the dashboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                    game.borrow_mut().input.flap = true;
                }
                match event.key().as_str() {
                    "r" | "R" => game.borrow_mut().input.retry = true,
                    "Escape" => exit_to_dashboard(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click to flap
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.flap = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch to flap
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.flap = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_overlay_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.start = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("retry-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.retry = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("submit-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let score = {
                    let g = game.borrow();
                    if g.state.phase != GamePhase::GameOver {
                        return;
                    }
                    g.state.score
                };
                submit_score(score);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
            g.update(time);
            g.render(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pixel_flapper::consts::NOMINAL_FRAME_MS;
    use pixel_flapper::sim::{GameState, TickInput, tick};

    env_logger::init();
    log::info!("Pixel Flapper (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Deterministic smoke run: flap on a fixed cadence for ten simulated seconds
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let mut state = GameState::new(seed);
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
        1.0,
        0.0,
    );
    for k in 1..=600u32 {
        let input = TickInput {
            flap: k % 12 == 0,
            ..Default::default()
        };
        tick(&mut state, &input, 1.0, f64::from(k) * NOMINAL_FRAME_MS);
    }
    println!(
        "seed {seed}: phase {:?}, score {}, pipes {}, ticks {}",
        state.phase,
        state.score,
        state.pipes.len(),
        state.time_ticks
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
