//! Falling Squares entry point
//!
//! The browser build drives the game from `requestAnimationFrame`; the native
//! build runs a headless simulation and prints the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use falling_squares::consts::*;
    use falling_squares::platform::{Direction, FrameClock, InputState};
    use falling_squares::renderer::{RenderState, build_scene};
    use falling_squares::sim::{GameEvent, GamePhase, GameState, tick};
    use falling_squares::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        clock: FrameClock,
        input: InputState,
        settings: Settings,
        /// Pending animation frame, if the loop is scheduled
        frame_id: Option<i32>,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: GameState::new(Tuning::default(), seed),
                render_state: None,
                clock: FrameClock::new(),
                input: InputState::new(),
                settings,
                frame_id: None,
            }
        }

        fn field_size(&self) -> Vec2 {
            Vec2::new(self.state.field.width(), self.state.field.height())
        }

        /// Advance one frame and react to what happened in it
        fn update(&mut self, time: f64) {
            let dt = self.clock.delta(time);
            let input = self.input.take_tick_input();
            tick(&mut self.state, &input, dt);

            for event in self.state.drain_events() {
                match event {
                    GameEvent::LevelUp { level } => {
                        show_level_up(level);
                        if self.settings.screen_shake && level >= HIGH_DIFFICULTY_LEVEL {
                            set_canvas_shake(true);
                        }
                    }
                    GameEvent::EnemyIncoming => schedule_enemy_warning(),
                    GameEvent::GameOver { score } => show_game_over(score),
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            let vertices = build_scene(&self.state, &self.settings, time);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
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

        /// Update the score line
        fn update_hud(&self) {
            let Some(document) = document() else {
                return;
            };
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&format!(
                    "{} | Difficulty: {} | Time: {}s",
                    self.state.score,
                    self.state.level(),
                    self.state.elapsed_secs.floor() as u64
                )));
            }
        }

        /// Begin a fresh run; any previous loop is cancelled first
        fn begin_run(&mut self) {
            self.cancel_frame();
            self.state.reseed(js_sys::Date::now() as u64);
            self.state.restart();
            self.clock.reset();
            self.input.clear();
            log::info!("Run started with seed: {}", self.state.seed);
        }

        fn cancel_frame(&mut self) {
            if let Some(id) = self.frame_id.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_display(id: &str, display: &str) {
        if let Some(el) = document()
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        {
            let _ = el.style().set_property("display", display);
        }
    }

    fn set_canvas_shake(on: bool) {
        if let Some(canvas) = document().and_then(|d| d.get_element_by_id("gameCanvas")) {
            let classes = canvas.class_list();
            let _ = if on {
                classes.add_1("high-difficulty")
            } else {
                classes.remove_1("high-difficulty")
            };
        }
    }

    /// Show a transient banner, removed after `duration_ms`
    fn show_banner(class: &str, html: &str, duration_ms: i32) {
        let Some(document) = document() else {
            return;
        };
        let Some(body) = document.body() else {
            return;
        };
        let Ok(banner) = document.create_element("div") else {
            return;
        };
        let _ = banner.set_attribute("class", class);
        banner.set_inner_html(html);
        if body.append_child(&banner).is_err() {
            return;
        }

        let closure = Closure::once(move || banner.remove());
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                duration_ms,
            );
        }
        closure.forget();
    }

    fn show_level_up(level: u32) {
        show_banner(
            "banner level-up",
            &format!("Difficulty increased to level {}!", level),
            2000,
        );
        if let Some(el) = document().and_then(|d| d.get_element_by_id("score")) {
            let _ = el.class_list().add_1("difficulty-change");
            let closure = Closure::once(move || {
                let _ = el.class_list().remove_1("difficulty-change");
            });
            if let Some(window) = web_sys::window() {
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    500,
                );
            }
            closure.forget();
        }
    }

    fn schedule_enemy_warning() {
        let closure = Closure::once(|| {
            show_banner(
                "banner enemy-warning",
                "WARNING<br><span>ENEMY FIGHTER INCOMING!</span>",
                3000,
            );
        });
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                ENEMY_WARNING_DELAY_MS,
            );
        }
        closure.forget();
    }

    fn show_game_over(score: u64) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id("finalScore")) {
            el.set_text_content(Some(&score.to_string()));
        }
        set_display("gameOverScreen", "block");
        set_display("startButton", "inline-block");
        set_display("restartButton", "none");
    }

    fn show_running() {
        set_canvas_shake(false);
        set_display("startButton", "none");
        set_display("restartButton", "inline-block");
        set_display("gameOverScreen", "none");
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Falling Squares starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let search = window.location().search().unwrap_or_default();
        let settings = Settings::from_query(&search);
        log::info!("Quality preset: {}", settings.quality.as_str());

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));

        // Backing store matches the field; CSS may scale the element
        let field = game.borrow().field_size();
        let width = field.x as u32;
        let height = field.y as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, (field.x, field.y))
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());

        // Draw the idle field once so the canvas isn't blank before start
        game.borrow_mut().render(js_sys::Date::now());

        log::info!("Falling Squares ready");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if !g.state.is_running() {
                    return;
                }
                let rect = canvas_clone.get_bounding_client_rect();
                let pos = Vec2::new(
                    (event.client_x() as f64 - rect.left()) as f32,
                    (event.client_y() as f64 - rect.top()) as f32,
                );
                let size = Vec2::new(rect.width() as f32, rect.height() as f32);
                let field = g.field_size();
                g.input.pointer_moved(pos, size, field);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                if !g.state.is_running() {
                    return;
                }
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let pos = Vec2::new(
                        (touch.client_x() as f64 - rect.left()) as f32,
                        (touch.client_y() as f64 - rect.top()) as f32,
                    );
                    let size = Vec2::new(rect.width() as f32, rect.height() as f32);
                    let field = g.field_size();
                    g.input.pointer_moved(pos, size, field);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let Some(document) = document() else {
            return;
        };

        // Arrow keys, held until released
        for (kind, held) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(direction) = Direction::from_key(&event.key()) {
                    // Keep the page from scrolling
                    event.prevent_default();
                    game.borrow_mut().input.set_key(direction, held);
                }
            });
            let _ =
                document.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else {
            return;
        };

        for id in ["startButton", "restartButton"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().begin_run();
                    show_running();
                    request_animation_frame(game.clone());
                });
                let _ = btn
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let game_clone = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(game_clone, time);
        });
        if let Ok(id) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            game.borrow_mut().frame_id = Some(id);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            g.frame_id = None;

            g.update(time);
            g.render(time);
            g.update_hud();

            g.state.phase == GamePhase::Running
        };

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use falling_squares::Tuning;
    use falling_squares::consts::NOMINAL_DT;
    use falling_squares::sim::{GameEvent, GameState, SimulationResult, TickInput, tick};

    #[derive(Parser, Debug, Clone)]
    #[command(name = "falling-squares")]
    #[command(about = "Headless Falling Squares run; prints the final result as JSON")]
    pub struct Cli {
        /// RNG seed for the run
        #[arg(long, default_value_t = 1)]
        pub seed: u64,

        /// Simulated seconds before the run is cut off
        #[arg(long, default_value_t = 30.0)]
        pub seconds: f64,

        /// JSON tuning document; omitted fields keep their defaults
        #[arg(long)]
        pub tuning: Option<PathBuf>,
    }

    impl Cli {
        /// Tuning from `--tuning`, or the defaults
        pub fn load_tuning(&self) -> Result<Tuning> {
            let Some(path) = &self.tuning else {
                return Ok(Tuning::default());
            };
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading tuning from {}", path.display()))?;
            Tuning::from_json(&json)
                .with_context(|| format!("parsing tuning from {}", path.display()))
        }
    }

    /// Play one run with no input until it ends or `seconds` pass
    pub fn simulate(tuning: Tuning, seed: u64, seconds: f64) -> SimulationResult {
        let mut state = GameState::new(tuning, seed);
        state.start();

        let input = TickInput::default();
        while state.is_running() && state.elapsed_secs < seconds {
            tick(&mut state, &input, NOMINAL_DT);
            for event in state.drain_events() {
                match event {
                    GameEvent::LevelUp { level } => {
                        log::debug!("level {} at tick {}", level, state.score)
                    }
                    GameEvent::EnemyIncoming => {
                        log::debug!("enemy incoming at tick {}", state.score)
                    }
                    GameEvent::GameOver { score } => {
                        log::debug!("game over with score {}", score)
                    }
                }
            }
        }
        state.result()
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();

    let cli = headless::Cli::parse();
    let tuning = cli.load_tuning()?;

    log::info!(
        "Falling Squares (headless): seed {}, up to {}s",
        cli.seed,
        cli.seconds
    );
    let result = headless::simulate(tuning, cli.seed, cli.seconds);

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
