//! Duel Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use duel_pong::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
    use duel_pong::input::pointer_to_playfield;
    use duel_pong::renderer::RenderState;
    use duel_pong::{QualityPreset, ScoreDisplay, Session, Settings};

    thread_local! {
        /// Handle for the page-callable functions
        static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    /// The page's two score fields
    struct DomScores {
        human: Option<Element>,
        follower: Option<Element>,
    }

    impl DomScores {
        fn find(document: &Document) -> Self {
            let human = document.get_element_by_id("playerScore");
            let follower = document.get_element_by_id("computerScore");
            if human.is_none() || follower.is_none() {
                log::warn!("Score elements missing, scores will not be shown");
            }
            Self { human, follower }
        }
    }

    impl ScoreDisplay for DomScores {
        fn show_scores(&mut self, human: u32, follower: u32) {
            if let Some(el) = &self.human {
                el.set_text_content(Some(&human.to_string()));
            }
            if let Some(el) = &self.follower {
                el.set_text_content(Some(&follower.to_string()));
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        render_state: Option<RenderState>,
        settings: Settings,
        scores: DomScores,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        /// One display refresh: step then draw
        fn frame(&mut self, time: f64) {
            self.session.frame(time, &mut self.scores);
            self.render();
        }

        fn render(&mut self) {
            if let Some(render_state) = self.render_state.as_mut() {
                match render_state.draw(self.session.state(), &self.settings) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Pointer at client-space `client_y`
        fn pointer_at(&mut self, client_y: f64) {
            let rect = self.canvas.get_bounding_client_rect();
            let y = pointer_to_playfield(client_y as f32, rect.top() as f32, rect.height() as f32);
            self.session.input_mut().pointer_moved(y);
        }

        /// Match the canvas backing store to its laid-out size
        fn fit_canvas(&mut self) {
            let (width, height) = backing_size(&self.canvas);
            if (width, height) == (self.canvas.width(), self.canvas.height()) {
                return;
            }
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(width, height);
            }
            log::debug!("Canvas resized to {}x{}", width, height);
        }

        fn start_match(&mut self) {
            self.session.start_match(&mut self.scores);
        }
    }

    /// Zero both scores and serve
    #[wasm_bindgen(js_name = pongStart)]
    pub fn pong_start() {
        GAME.with(|slot| match slot.borrow().as_ref() {
            Some(game) => {
                game.borrow_mut().start_match();
                log::info!("Match restarted");
            }
            None => log::warn!("pongStart called before the game was ready"),
        });
    }

    /// Switch quality preset and remember it
    #[wasm_bindgen(js_name = pongSetQuality)]
    pub fn pong_set_quality(name: &str) {
        let Some(preset) = QualityPreset::parse(name) else {
            log::warn!("Unknown quality preset: {}", name);
            return;
        };
        GAME.with(|slot| {
            if let Some(game) = slot.borrow().as_ref() {
                let mut g = game.borrow_mut();
                g.settings.apply_preset(preset);
                g.settings.save();
                log::info!("Quality set to {}", preset.as_str());
            }
        });
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&format!("Failed to init logger: {}", e)))?;

        log::info!("Duel Pong starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("#canvas is not a canvas"))?;

        let (width, height) = backing_size(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let mut settings = Settings::load();
        if let Ok(search) = window.location().search() {
            settings.apply_query(&search);
        }
        log::info!("Quality preset: {}", settings.quality.as_str());

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(seed),
            render_state: None,
            settings,
            scores: DomScores::find(&document),
            canvas: canvas.clone(),
        }));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {}", e)))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get device: {}", e)))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone())?;

        // Window resize (layout or zoom changes the canvas size)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().fit_canvas();
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        GAME.with(|slot| *slot.borrow_mut() = Some(game.clone()));

        // Start game loop
        request_animation_frame(game);

        log::info!("Duel Pong running!");
        Ok(())
    }

    /// Canvas backing size at device resolution; the scene always spans it
    fn backing_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let (client_w, client_h) = match (canvas.client_width(), canvas.client_height()) {
            (w, h) if w > 0 && h > 0 => (w as f64, h as f64),
            _ => (PLAYFIELD_WIDTH as f64, PLAYFIELD_HEIGHT as f64),
        };
        ((client_w * dpr) as u32, (client_h * dpr) as u32)
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().pointer_at(event.client_y() as f64);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Click starts or resumes a paused match
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().session.input_mut().activate();
            });
            canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().pointer_at(touch.client_y() as f64);
                }
            });
            canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start: activate, and the finger is also a pointer
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.session.input_mut().activate();
                if let Some(touch) = event.touches().get(0) {
                    g.pointer_at(touch.client_y() as f64);
                }
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        for (kind, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().session.input_mut().key_event(&event.key(), pressed) {
                    // Arrow keys would otherwise scroll the page
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, game loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Duel Pong (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let (human, follower) = headless::rally(seed, headless::RALLY_FRAMES);
    println!(
        "Final score after {} frames: human {} - follower {}",
        headless::RALLY_FRAMES,
        human,
        follower
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless rally: the follower against a scripted, slightly sloppy human
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use duel_pong::{ScoreDisplay, Session};

    /// One minute at 60 Hz
    pub const RALLY_FRAMES: u32 = 3600;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    struct LogScores;

    impl ScoreDisplay for LogScores {
        fn show_scores(&mut self, human: u32, follower: u32) {
            log::info!("Score: human {} - follower {}", human, follower);
        }
    }

    /// Play `frames` frames and return the final scores
    pub fn rally(seed: u64, frames: u32) -> (u32, u32) {
        let mut session = Session::new(seed);
        let mut display = LogScores;

        for frame in 0..frames {
            // Aim off-center by a drifting amount so points do get scored
            if frame % 3 == 0 {
                let ball_y = session.state().ball.pos.y;
                let drift = (frame as f32 / 90.0).sin() * 70.0;
                session.input_mut().pointer_moved(ball_y + drift);
            }
            session.frame(frame as f64 * FRAME_MS, &mut display);
        }

        session.state().scores()
    }
}
