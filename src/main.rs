//! Fruit Slash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use fruit_slash::sim::{
        GameEvent, GameState, frame, pointer_down, pointer_leave, pointer_move, pointer_up,
        start_session,
    };
    use fruit_slash::{Snapshot, Tuning, Viewport};

    // Bridge to the page's renderer (three.js or similar)
    #[wasm_bindgen(inline_js = "
        export function present_frame(json) {
            if (window.fruitSlashRender) {
                window.fruitSlashRender(JSON.parse(json));
            }
        }

        export function present_trail(x1, y1, x2, y2) {
            if (window.fruitSlashTrail) {
                window.fruitSlashTrail(x1, y1, x2, y2);
            }
        }

        export function tuning_override() {
            return window.fruitSlashTuning ? JSON.stringify(window.fruitSlashTuning) : null;
        }

        export function is_mobile_device() {
            const ua = navigator.userAgent || navigator.vendor || '';
            return /iPad|iPhone|iPod|android/i.test(ua);
        }
    ")]
    extern "C" {
        fn present_frame(json: &str);
        fn present_trail(x1: f64, y1: f64, x2: f64, y2: f64);
        fn tuning_override() -> Option<String>;
        fn is_mobile_device() -> bool;
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        canvas: HtmlCanvasElement,
        /// A frame callback is already scheduled
        loop_running: bool,
    }

    impl Game {
        /// Convert a client-space pointer position to normalized canvas coordinates
        fn normalize(&self, client_x: f64, client_y: f64) -> (f64, f64) {
            let rect = self.canvas.get_bounding_client_rect();
            let w = rect.width().max(1.0);
            let h = rect.height().max(1.0);
            ((client_x - rect.left()) / w, (client_y - rect.top()) / h)
        }

        /// Forward queued events to the HUD and trail renderer
        fn flush_events(&mut self) {
            let document = match web_sys::window().and_then(|w| w.document()) {
                Some(d) => d,
                None => return,
            };

            for event in self.state.drain_events() {
                match event {
                    GameEvent::ScoreChanged { score } => {
                        set_text(&document, "score", &score.to_string());
                    }
                    GameEvent::LivesChanged { lives } => {
                        set_text(&document, "lives", &lives.to_string());
                    }
                    GameEvent::SessionStarted { .. } => {
                        set_visible(&document, "start-screen", false);
                        set_visible(&document, "game-over", false);
                    }
                    GameEvent::SessionEnded { final_score } => {
                        set_text(&document, "final-score", &final_score.to_string());
                        set_visible(&document, "game-over", true);
                    }
                    GameEvent::TrailSegment { x1, y1, x2, y2 } => {
                        present_trail(x1, y1, x2, y2);
                    }
                    GameEvent::FruitSpawned { .. }
                    | GameEvent::FruitSliced { .. }
                    | GameEvent::FruitMissed { .. } => {}
                }
            }
        }
    }

    fn set_text(document: &web_sys::Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            if let Ok(el) = el.dyn_into::<web_sys::HtmlElement>() {
                let display = if visible { "flex" } else { "none" };
                let _ = el.style().set_property("display", display);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Fruit Slash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let canvas = document
            .get_element_by_id("game-canvas")
            .expect("no game-canvas element")
            .dyn_into::<HtmlCanvasElement>()
            .expect("game-canvas is not a canvas");

        let tuning = tuning_override()
            .map(|json| Tuning::from_json_or_default(&json))
            .unwrap_or_default();
        let width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(1024.0);
        let viewport = Viewport::from_screen(is_mobile_device(), width);

        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        log::info!("Game initialized with seed: {} ({:?})", seed, viewport);

        let game = Rc::new(RefCell::new(Game {
            state: GameState::with_tuning(seed, tuning, viewport),
            canvas: canvas.clone(),
            loop_running: false,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_start_buttons(&document, game);

        log::info!("Fruit Slash ready!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let _ = canvas.style().set_property("cursor", "crosshair");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |e: MouseEvent| {
                let mut g = game.borrow_mut();
                let (x, y) = g.normalize(e.client_x() as f64, e.client_y() as f64);
                pointer_down(&mut g.state, x, y, e.time_stamp() as i64);
                g.flush_events();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |e: MouseEvent| {
                let mut g = game.borrow_mut();
                let (x, y) = g.normalize(e.client_x() as f64, e.client_y() as f64);
                pointer_move(&mut g.state, x, y, e.time_stamp() as i64);
                g.flush_events();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |_e: MouseEvent| {
                pointer_up(&mut game.borrow_mut().state);
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |_e: MouseEvent| {
                pointer_leave(&mut game.borrow_mut().state);
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_buttons(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        for id in ["start-button", "restart-button"] {
            let Some(button) = document.get_element_by_id(id) else {
                log::warn!("Missing #{id}");
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                let schedule = {
                    let mut g = game.borrow_mut();
                    start_session(&mut g.state);
                    g.flush_events();
                    let schedule = !g.loop_running;
                    g.loop_running = true;
                    schedule
                };
                if schedule {
                    request_animation_frame(game.clone());
                }
            });
            let _ = button
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Some(window) = web_sys::window() {
            let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_running = {
            let mut g = game.borrow_mut();
            let keep_running = frame(&mut g.state, time);
            g.flush_events();
            present_frame(&Snapshot::capture(&g.state, time).to_json());
            g.loop_running = keep_running;
            keep_running
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

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use fruit_slash::Tuning;
    use fruit_slash::sim::{Autopilot, GameEvent, GameState, frame, start_session};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Fruit Slash (native) starting...");
    log::info!("Native mode runs a headless autopilot session - run with `trunk serve` to play");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Cannot read tuning file {path}: {e}; using defaults");
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let mut state = GameState::with_tuning(seed, tuning, fruit_slash::Viewport::desktop());
    let mut bot = Autopilot::new(350.0);
    start_session(&mut state);

    // 60 Hz host clock, capped at ten simulated minutes
    let frame_ms = 1000.0 / 60.0;
    let mut now = 0.0;
    let (mut sliced, mut missed) = (0u32, 0u32);
    loop {
        let running = frame(&mut state, now);
        if running {
            bot.act(&mut state, now);
        }
        for event in state.drain_events() {
            match event {
                GameEvent::FruitSliced { .. } => sliced += 1,
                GameEvent::FruitMissed { .. } => missed += 1,
                _ => {}
            }
        }
        if !running || now >= 600_000.0 {
            break;
        }
        now += frame_ms;
    }

    log::info!(
        "Autopilot finished after {:.1}s: score {}, {} sliced, {} missed, final interval {}ms",
        now / 1000.0,
        state.final_score.unwrap_or(state.score),
        sliced,
        missed,
        state.spawn_interval_ms()
    );
}
