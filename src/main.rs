//! Trail Pong entry point
//!
//! Browser: creates the canvas, wires keyboard and teardown, and runs the
//! frame loop on requestAnimationFrame. Native: runs the loop headless with
//! the autopilot for a fixed number of frames.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, KeyboardEvent};

    use trail_pong::audio::WebAudio;
    use trail_pong::consts::SHAKE_MS;
    use trail_pong::input::KeyQueue;
    use trail_pong::renderer::CanvasSurface;
    use trail_pong::sim::GameEvent;
    use trail_pong::{FrameLoop, FrameOutcome, GameConfig, Settings, StartError, Subscription};

    type Game = FrameLoop<CanvasSurface, KeyQueue, WebAudio>;

    /// LocalStorage key for an optional config override
    const CONFIG_KEY: &str = "trail_pong_config";

    fn load_config() -> GameConfig {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|s| s.get_item(CONFIG_KEY).ok())
            .flatten();

        let mut config = match stored {
            Some(json) => GameConfig::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring stored config: {}", e);
                GameConfig::default()
            }),
            None => GameConfig::default(),
        };
        if config.seed == 0 {
            config.seed = js_sys::Date::now() as u64;
        }
        config
    }

    fn create_canvas(
        document: &Document,
        config: &GameConfig,
    ) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), StartError> {
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|_| StartError::NoCanvas)?
            .dyn_into()
            .map_err(|_| StartError::NoCanvas)?;
        canvas.set_id("gameCanvas");
        canvas.set_width(config.arena_width as u32);
        canvas.set_height(config.arena_height as u32);

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or(StartError::MissingContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| StartError::MissingContext)?;

        Ok((canvas, ctx))
    }

    /// Briefly add the `vibrating` class to the container
    fn shake(container: &Element) {
        if container.class_list().add_1("vibrating").is_err() {
            return;
        }
        let Some(window) = web_sys::window() else { return };

        let el = container.clone();
        let closure = Closure::once(move || {
            let _ = el.class_list().remove_1("vibrating");
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            SHAKE_MS,
        );
        closure.forget();
    }

    pub fn run() -> Result<(), StartError> {
        let window = web_sys::window().ok_or(StartError::NoWindow)?;
        let document = window.document().ok_or(StartError::NoDocument)?;

        let settings = Settings::load();
        let config = load_config();
        let (canvas, ctx) = create_canvas(&document, &config)?;

        let container = document.get_element_by_id("gameContainer");
        let parent = container
            .clone()
            .or_else(|| document.body().map(Element::from));
        if let Some(parent) = &parent {
            let _ = parent.append_child(&canvas);
        }

        let game = Rc::new(RefCell::new(FrameLoop::new(
            &config,
            &settings,
            CanvasSurface::new(ctx),
            KeyQueue::new(),
            WebAudio::new(settings.sfx_mix()),
        )));
        log::info!(
            "Game initialized: {}x{} arena, seed {}",
            config.arena_width,
            config.arena_height,
            config.seed
        );

        let shake_target = container.filter(|_| settings.effective_screen_shake());
        let subscription = shake_target.clone().map(|el| {
            game.borrow()
                .restart_signal()
                .subscribe(move || shake(&el))
        });

        setup_keyboard(&window, game.clone(), settings);
        setup_teardown(&window, &game, subscription);
        request_animation_frame(game, shake_target);

        log::info!("Trail Pong running!");
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>, mut settings: Settings) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            if key == "m" || key == "M" {
                settings.sound = !settings.sound;
                game.borrow_mut().set_sound(settings.effective_volume() > 0.0);
                settings.save();
                log::info!("Sound: {}", settings.sound);
            } else if game.borrow_mut().input_mut().push_key(&key) {
                event.prevent_default();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Stop the loop and drop the restart consumer when the page goes away
    fn setup_teardown(
        window: &web_sys::Window,
        game: &Rc<RefCell<Game>>,
        subscription: Option<Subscription>,
    ) {
        let token = game.borrow().cancel_token();
        let mut subscription = subscription;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            token.cancel();
            subscription.take();
            log::info!("Session ended");
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, shake_target: Option<Element>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, shake_target, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, shake_target: Option<Element>, time: f64) {
        let outcome = {
            let mut g = game.borrow_mut();
            let outcome = g.frame(time);
            if let Some(el) = &shake_target {
                if g.events().contains(&GameEvent::TopWallImpact) {
                    shake(el);
                }
            }
            outcome
        };

        match outcome {
            FrameOutcome::Continue => request_animation_frame(game, shake_target),
            FrameOutcome::Cancelled => log::info!("Frame loop stopped"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    log::info!("Trail Pong starting...");
    if let Err(e) = wasm_game::run() {
        log::error!("Game not started: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::Cell;
    use std::rc::Rc;

    use trail_pong::audio::NullAudio;
    use trail_pong::input::Autopilot;
    use trail_pong::renderer::RecordingSurface;
    use trail_pong::{FrameLoop, GameConfig, Settings};

    /// 60 Hz refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;

    pub fn run(config: &GameConfig, frames: u64) {
        let mut game = FrameLoop::new(
            config,
            &Settings::default(),
            RecordingSurface::new(),
            Autopilot::new(),
            NullAudio,
        );

        let restarts = Rc::new(Cell::new(0u32));
        let counter = restarts.clone();
        let subscription = game
            .restart_signal()
            .subscribe(move || counter.set(counter.get() + 1));

        let ran = game.run_frames(frames, FRAME_MS);
        drop(subscription);

        let state = game.state();
        log::info!(
            "Ran {} frames ({} ticks), {} restarts, ball speed {:.1}",
            ran,
            state.time_ticks,
            restarts.get(),
            state.ball.speed()
        );
        match serde_json::to_string(&state.ball) {
            Ok(json) => println!("{}", json),
            Err(e) => log::warn!("Could not serialize ball: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use trail_pong::GameConfig;

    env_logger::init();
    log::info!("Trail Pong (native, headless) starting...");

    // Usage: trail-pong [config.json] [frames]
    let mut frames = 600;
    let mut config = GameConfig::default();
    for arg in std::env::args().skip(1) {
        if let Ok(n) = arg.parse::<u64>() {
            frames = n;
        } else {
            config = GameConfig::load_from_path(&arg).unwrap_or_else(|e| {
                log::warn!("{}; using defaults", e);
                GameConfig::default()
            });
        }
    }

    headless::run(&config, frames);
}
