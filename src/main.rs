//! Skyflap entry point
//!
//! Handles platform-specific initialization and wires the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use skyflap::app::{FrameHandle, FrameScheduler, InputEvent, Session};
    use skyflap::audio::AudioManager;
    use skyflap::render::{OverlayLayout, Renderer};
    use skyflap::sim::{GameEvent, GamePhase};

    const PROJECT_URL: &str = "https://github.com/skyflap/skyflap";

    /// Frame scheduling via requestAnimationFrame.
    ///
    /// The callback slot is filled once after the session is built, since
    /// the closure needs the game instance the session lives in.
    struct RafScheduler {
        callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
    }

    impl FrameScheduler for RafScheduler {
        fn request_frame(&mut self) -> Option<FrameHandle> {
            let slot = self.callback.borrow();
            let closure = slot.as_ref()?;
            let window = web_sys::window()?;
            window
                .request_animation_frame(closure.as_ref().unchecked_ref())
                .ok()
                .map(FrameHandle)
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle.0);
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session<RafScheduler>,
        renderer: Renderer,
        audio: AudioManager,
        overlay: Option<OverlayLayout>,
    }

    impl Game {
        /// Advance one frame and redraw
        fn on_frame(&mut self, time_ms: f64) {
            let events = self.session.frame();
            for event in events {
                if event == GameEvent::Crashed {
                    self.audio.play_crash();
                }
            }

            self.renderer
                .draw_frame(&self.session.state, &self.session.best);
            if self.session.state.phase == GamePhase::GameOver {
                self.overlay = self.renderer.draw_game_over(
                    &self.session.state,
                    &self.session.best,
                    time_ms / 1000.0,
                );
            }
        }

        /// Start a fresh run with a wall-clock seed
        fn begin_run(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.audio.resume();
            self.overlay = None;
            self.session.start(seed);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("Skyflap starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (width, height) = window_size();
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> =
            Rc::new(RefCell::new(None));
        let scheduler = RafScheduler {
            callback: callback.clone(),
        };

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(width as f32, height as f32, seed, scheduler);
        let mut renderer = Renderer::new(ctx);
        renderer.rebuild_strips(&session.state);

        let game = Rc::new(RefCell::new(Game {
            session,
            renderer,
            audio: AudioManager::new(),
            overlay: None,
        }));

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                game.borrow_mut().on_frame(time);
            });
            *callback.borrow_mut() = Some(closure);
        }

        setup_input_handlers(&canvas, game.clone());
        setup_resize_handler(canvas.clone(), game.clone());

        // Idle screen until the first start action
        {
            let g = game.borrow();
            g.renderer.draw_frame(&g.session.state, &g.session.best);
            g.renderer.draw_start_screen(&g.session.state);
        }

        log::info!("Skyflap ready (seed {seed})");
    }

    fn window_size() -> (f64, f64) {
        let window = web_sys::window().expect("no window");
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        (width, height)
    }

    /// Route a click or tap by phase: start, flap, or overlay button
    fn on_pointer(game: &Rc<RefCell<Game>>, x: f64, y: f64) {
        let phase = game.borrow().session.state.phase;
        match phase {
            GamePhase::Idle => game.borrow_mut().begin_run(),
            GamePhase::Running => game.borrow_mut().session.queue_event(InputEvent::Flap),
            GamePhase::GameOver => {
                let Some(layout) = game.borrow().overlay else {
                    return;
                };
                if layout.play_again.contains(x, y) {
                    game.borrow_mut().begin_run();
                } else if layout.project.contains(x, y) {
                    if let Some(window) = web_sys::window() {
                        let _ = window.open_with_url_and_target(PROJECT_URL, "_blank");
                    }
                } else if layout.share.contains(x, y) {
                    share_score(game.clone(), layout);
                }
            }
        }
    }

    /// Copy a shareable `?score=N` link, with transient button feedback
    fn share_score(game: Rc<RefCell<Game>>, layout: OverlayLayout) {
        let score = game.borrow().session.state.score;
        let Some(window) = web_sys::window() else {
            return;
        };
        let location = window.location();
        let (Ok(origin), Ok(path)) = (location.origin(), location.pathname()) else {
            return;
        };
        let url = format!("{origin}{path}?score={score}");

        let promise = window.navigator().clipboard().write_text(&url);
        wasm_bindgen_futures::spawn_local(async move {
            match wasm_bindgen_futures::JsFuture::from(promise).await {
                Ok(_) => {
                    game.borrow().renderer.draw_share_feedback(&layout, true);
                    schedule_share_reset(game, layout);
                }
                Err(e) => log::warn!("clipboard write failed: {e:?}"),
            }
        });
    }

    /// Restore the share button label after two seconds
    fn schedule_share_reset(game: Rc<RefCell<Game>>, layout: OverlayLayout) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move || {
            let g = game.borrow();
            if g.session.state.phase == GamePhase::GameOver {
                g.renderer.draw_share_feedback(&layout, false);
            }
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            2000,
        );
        closure.forget();
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard: Space starts, flaps, or restarts
        {
            let game = game.clone();
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() != " " {
                    return;
                }
                event.prevent_default();
                let phase = game.borrow().session.state.phase;
                match phase {
                    GamePhase::Running => {
                        game.borrow_mut().session.queue_event(InputEvent::Flap);
                    }
                    GamePhase::Idle | GamePhase::GameOver => game.borrow_mut().begin_run(),
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                on_pointer(&game, event.offset_x() as f64, event.offset_y() as f64);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f64 - rect.left();
                    let y = touch.client_y() as f64 - rect.top();
                    on_pointer(&game, x, y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = window_size();
            canvas.set_width(width as u32);
            canvas.set_height(height as u32);

            let mut g = game.borrow_mut();
            let g = &mut *g;
            g.session.resize(width as f32, height as f32);
            g.renderer.rebuild_strips(&g.session.state);

            // A paused-by-phase surface still needs a repaint
            match g.session.state.phase {
                GamePhase::Idle => {
                    g.renderer.draw_frame(&g.session.state, &g.session.best);
                    g.renderer.draw_start_screen(&g.session.state);
                }
                GamePhase::Running => {}
                GamePhase::GameOver => {
                    g.renderer.draw_frame(&g.session.state, &g.session.best);
                    g.overlay =
                        g.renderer
                            .draw_game_over(&g.session.state, &g.session.best, 0.0);
                }
            }
        });
        let _ =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use skyflap::app::{FakeScheduler, InputEvent, Session};
    use skyflap::sim::GamePhase;

    env_logger::init();
    log::info!("Skyflap (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Scripted demo run with a simple autopilot
    let mut session = Session::new(800.0, 600.0, 42, FakeScheduler::new());
    session.start(42);
    let mut frames = 0u32;
    while session.state.phase == GamePhase::Running && frames < 600 {
        if session.state.bird.velocity > 7.0 {
            session.queue_event(InputEvent::Flap);
        }
        session.frame();
        frames += 1;
    }
    println!(
        "Demo run ended after {frames} frames with score {}",
        session.state.score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
