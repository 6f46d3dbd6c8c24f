//! Wisdom Wings entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use wisdom_wings::persistence::LocalStorage;
    use wisdom_wings::platform::{InputEvent, dispatch};
    use wisdom_wings::renderer::{Renderer, scene};
    use wisdom_wings::session::Session;
    use wisdom_wings::sim::{GameEvent, GamePhase, Viewport};

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorage>,
        renderer: Option<Renderer>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, viewport: Viewport) -> Self {
            Self {
                session: Session::new(seed, viewport, LocalStorage::open()),
                renderer: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// One simulation tick per displayed frame
        fn update(&mut self, time: f64) {
            for event in self.session.advance() {
                match event {
                    GameEvent::Started => log::info!("Run started"),
                    GameEvent::Crashed { score, new_best } => {
                        log::info!("Run over: {} (new best: {})", score, new_best)
                    }
                    _ => {}
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let snapshot = self.session.snapshot();
            let segments = self.session.settings().quality.particle_segments();
            if let Some(ref mut renderer) = self.renderer {
                let vertices = scene(&snapshot, segments);
                match renderer.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => renderer.reconfigure(),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let snapshot = self.session.snapshot();

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&snapshot.score.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
                el.set_text_content(Some(&snapshot.high_score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.session.settings().show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten()
                    {
                        val.set_text_content(Some(&self.fps.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            show_if(document, "start-screen", snapshot.phase == GamePhase::Start);
            show_if(document, "game-over", snapshot.phase == GamePhase::GameOver);
            if snapshot.phase == GamePhase::GameOver {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&snapshot.score.to_string()));
                }
                if let Some(el) = document.get_element_by_id("final-best") {
                    el.set_text_content(Some(&snapshot.display_best().to_string()));
                }
            }
        }
    }

    fn show_if(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Canvas size in CSS pixels and device pixels
    fn canvas_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> ((f32, f32), (u32, u32)) {
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        (
            (client_w as f32, client_h as f32),
            (
                (client_w as f64 * dpr) as u32,
                (client_h as f64 * dpr) as u32,
            ),
        )
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Wisdom Wings starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let (logical, physical) = canvas_size(&window, &canvas);
        canvas.set_width(physical.0);
        canvas.set_height(physical.1);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(
            seed,
            Viewport::new(logical.0, logical.1),
        )));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let renderer = Renderer::new(surface, &adapter, physical, logical)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().renderer = Some(renderer);

        setup_input_handlers(&window, &canvas, game.clone());
        setup_resize(&window, &canvas, game.clone());

        show_if(&document, "hud", true);

        request_animation_frame(game);

        log::info!("Wisdom Wings running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let Some(input) = InputEvent::from_dom(&event.type_(), &event.code()) else {
                    return;
                };
                if dispatch(&mut game.borrow_mut().session, &input) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse, pen and touch share one listener so a tap counts once
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                if !event.is_primary() {
                    return;
                }
                let Some(input) = InputEvent::from_dom(&event.type_(), "") else {
                    return;
                };
                if dispatch(&mut game.borrow_mut().session, &input) {
                    event.prevent_default();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(window: &web_sys::Window, canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (logical, physical) = canvas_size(&window, &canvas);
            canvas.set_width(physical.0);
            canvas.set_height(physical.1);

            let mut g = game.borrow_mut();
            g.session.resize(Viewport::new(logical.0, logical.1));
            if let Some(ref mut renderer) = g.renderer {
                renderer.resize(physical, logical);
            }
            log::debug!("Resized to {}x{}", logical.0, logical.1);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
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
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

/// Headless demo: the autopilot plays a few runs and reports the scores
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use wisdom_wings::persistence::MemoryStore;
    use wisdom_wings::session::Session;
    use wisdom_wings::sim::{GameEvent, Viewport};

    env_logger::init();
    log::info!("Wisdom Wings (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let ticks: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(10_000);
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut session = Session::new(seed, Viewport::default(), MemoryStore::new());
    session.set_autopilot(true);
    session.request_start();

    let mut runs = 0;
    for _ in 0..ticks {
        for event in session.advance() {
            if let GameEvent::Crashed { score, .. } = event {
                runs += 1;
                println!("Run {}: {} shelves", runs, score);
                session.request_restart();
            }
            if event == GameEvent::Restarted {
                session.request_start();
            }
        }
    }

    println!(
        "\n{} ticks, {} finished runs, best {}",
        ticks,
        runs,
        session.high_score()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
