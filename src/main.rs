//! Snake Canvas entry point
//!
//! Handles platform-specific initialization and wires browser events into
//! the lifecycle.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::WasmClosure;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        Document, Element, EventTarget, HtmlCanvasElement, HtmlImageElement, HtmlInputElement,
        KeyboardEvent, MouseEvent, TouchEvent, Window,
    };

    use snake_canvas::lifecycle::{Lifecycle, LifecycleEvent, Schedule, TimerKind};
    use snake_canvas::persistence::{KeyValueStore, LocalStore, MemoryStore};
    use snake_canvas::platform::dom::ids;
    use snake_canvas::platform::{DomUi, Interval, Scheduler};
    use snake_canvas::renderer::{CanvasSurface, draw_scene};
    use snake_canvas::sim::{Direction, SwipeTracker, classify_dpad, is_arrow_key};
    use snake_canvas::{Layout, ScoreStore, Settings};

    /// Background image loaded before the first countdown
    const BACKGROUND_SRC: &str = "pelialue.png";

    /// Game instance holding all state
    struct Game {
        lifecycle: Lifecycle<Box<dyn KeyValueStore>>,
        surface: CanvasSurface,
        ui: DomUi,
        scheduler: Scheduler,
        swipe: SwipeTracker,
    }

    type SharedGame = Rc<RefCell<Game>>;

    /// Feed one event to the lifecycle and carry out its response
    fn dispatch(game: &SharedGame, event: LifecycleEvent) {
        let resized = matches!(event, LifecycleEvent::Resize { .. });
        let mut guard = game.borrow_mut();
        let g = &mut *guard;

        let response = g.lifecycle.handle(event);

        if resized {
            g.surface.apply_layout(g.lifecycle.layout());
        }
        if let Some(scene) = response.scene {
            draw_scene(
                &mut g.surface,
                scene,
                g.lifecycle.state(),
                g.lifecycle.layout(),
                g.lifecycle.settings().show_instructions,
            );
        }
        g.lifecycle.apply_ui(&response.ui, &mut g.ui);

        match response.schedule {
            Schedule::Keep => {}
            Schedule::Stop => g.scheduler.replace(None),
            Schedule::Start { kind, interval_ms } => {
                let tick_event = match kind {
                    TimerKind::Countdown => LifecycleEvent::CountdownTick,
                    TimerKind::Simulation => LifecycleEvent::SimTick,
                };
                let handle = game.clone();
                let callback = move || dispatch(&handle, tick_event.clone());
                match Interval::start(interval_ms, callback) {
                    Ok(interval) => g.scheduler.replace(Some((kind, interval))),
                    Err(e) => log::error!("Failed to start {:?} timer: {:?}", kind, e),
                }
            }
        }
    }

    fn viewport_size(window: &Window) -> (f32, f32) {
        let width = window.inner_width().ok().and_then(|v| v.as_f64());
        let height = window.inner_height().ok().and_then(|v| v.as_f64());
        (
            width.unwrap_or(920.0) as f32,
            height.unwrap_or(720.0) as f32,
        )
    }

    /// Resolve once the image has loaded
    async fn load_image(src: &str) -> Result<HtmlImageElement, JsValue> {
        let image = HtmlImageElement::new()?;
        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            image.set_onload(Some(&resolve));
            image.set_onerror(Some(&reject));
        });
        image.set_src(src);
        JsFuture::from(promise).await?;
        image.set_onload(None);
        image.set_onerror(None);
        Ok(image)
    }

    fn open_store() -> Box<dyn KeyValueStore> {
        match LocalStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{}; scores will not persist", e);
                Box::new(MemoryStore::new())
            }
        }
    }

    fn element(document: &Document, id: &str) -> Result<Element, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{}", id)))
    }

    /// Attach a listener for the lifetime of the page
    fn listen<T>(target: &EventTarget, kind: &str, closure: Closure<T>) -> Result<(), JsValue>
    where
        T: ?Sized + WasmClosure,
    {
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Position of the first touch relative to `el`
    fn touch_pos(event: &TouchEvent, el: &Element) -> Option<Vec2> {
        let touch = event.touches().get(0)?;
        let rect = el.get_bounding_client_rect();
        Some(Vec2::new(
            (touch.client_x() as f64 - rect.left()) as f32,
            (touch.client_y() as f64 - rect.top()) as f32,
        ))
    }

    fn typing_in_input(event: &KeyboardEvent) -> bool {
        event
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .is_some()
    }

    fn submit_name(game: &SharedGame) {
        let name = game.borrow().ui.player_name();
        dispatch(game, LifecycleEvent::SubmitScore(name));
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
        }

        log::info!("Snake Canvas starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = element(&document, ids::CANVAS)?.dyn_into()?;

        let store = open_store();
        let settings = Settings::load(&*store);
        let swipe = SwipeTracker::new(settings.swipe_threshold);
        let scores = ScoreStore::load(store);

        let (width, height) = viewport_size(&window);
        let layout = Layout::from_viewport(width, height);
        let surface = CanvasSurface::new(canvas.clone())?;
        surface.apply_layout(&layout);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            lifecycle: Lifecycle::new(seed, settings, scores, layout),
            surface,
            ui: DomUi::new(document.clone()),
            scheduler: Scheduler::new(),
            swipe,
        }));
        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(&window, game.clone())?;
        setup_resize(&window, game.clone())?;
        setup_dpad(&document, game.clone())?;
        setup_swipe(&canvas, game.clone())?;
        setup_buttons(&document, game.clone())?;

        match load_image(BACKGROUND_SRC).await {
            Ok(image) => game.borrow_mut().surface.set_background(Some(image)),
            Err(e) => log::error!("Background '{}' failed to load: {:?}", BACKGROUND_SRC, e),
        }
        dispatch(&game, LifecycleEvent::AssetsLoaded);

        log::info!("Snake Canvas running!");
        Ok(())
    }

    fn setup_keyboard(window: &Window, game: SharedGame) -> Result<(), JsValue> {
        listen(window, "keydown", Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            if typing_in_input(&event) {
                if key == "Enter" {
                    submit_name(&game);
                }
                return;
            }
            if is_arrow_key(&key) {
                event.prevent_default();
            }
            if let Some(dir) = Direction::from_key(&key) {
                dispatch(&game, LifecycleEvent::Steer(dir));
            }
        }))
    }

    fn setup_resize(window: &Window, game: SharedGame) -> Result<(), JsValue> {
        let win = window.clone();
        listen(window, "resize", Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = viewport_size(&win);
            dispatch(&game, LifecycleEvent::Resize { width, height });
        }))
    }

    /// On-screen direction pad
    fn setup_dpad(document: &Document, game: SharedGame) -> Result<(), JsValue> {
        let Some(pad) = document.get_element_by_id(ids::TOUCH_AREA) else {
            log::info!("No #{} element, direction pad disabled", ids::TOUCH_AREA);
            return Ok(());
        };
        for kind in ["touchstart", "touchmove"] {
            let game = game.clone();
            let pad_el = pad.clone();
            listen(&pad, kind, Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(dir) = touch_pos(&event, &pad_el).and_then(classify_dpad) {
                    dispatch(&game, LifecycleEvent::Steer(dir));
                }
            }))?;
        }
        Ok(())
    }

    /// Swipes on the canvas itself
    fn setup_swipe(canvas: &HtmlCanvasElement, game: SharedGame) -> Result<(), JsValue> {
        {
            let game = game.clone();
            let el: Element = canvas.clone().into();
            listen(canvas, "touchstart", Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(pos) = touch_pos(&event, &el) {
                    game.borrow_mut().swipe.begin(pos);
                }
            }))?;
        }
        {
            let game = game.clone();
            let el: Element = canvas.clone().into();
            listen(canvas, "touchmove", Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let Some(pos) = touch_pos(&event, &el) else {
                    return;
                };
                let swiped = game.borrow_mut().swipe.update(pos);
                if let Some(dir) = swiped {
                    dispatch(&game, LifecycleEvent::Steer(dir));
                }
            }))?;
        }
        for kind in ["touchend", "touchcancel"] {
            let game = game.clone();
            listen(canvas, kind, Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().swipe.end();
            }))?;
        }
        Ok(())
    }

    fn setup_buttons(document: &Document, game: SharedGame) -> Result<(), JsValue> {
        {
            let game = game.clone();
            let button = element(document, ids::SAVE_SCORE_BTN)?;
            listen(&button, "click", Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| submit_name(&game)))?;
        }
        let button = element(document, ids::NEW_GAME_BTN)?;
        listen(&button, "click", Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            dispatch(&game, LifecycleEvent::NewGame);
        }))
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Snake Canvas (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    println!("\nRunning headless autopilot round...");
    headless_round(2024, 5_000);
}

/// Play one round with the autopilot
#[cfg(not(target_arch = "wasm32"))]
fn headless_round(seed: u64, max_ticks: u32) {
    use snake_canvas::lifecycle::{LifecycleEvent, Phase};
    use snake_canvas::persistence::MemoryStore;
    use snake_canvas::{Layout, Lifecycle, ScoreStore, Settings};

    let mut game = Lifecycle::new(
        seed,
        Settings::default(),
        ScoreStore::load(MemoryStore::new()),
        Layout::default(),
    );
    game.handle(LifecycleEvent::AssetsLoaded);
    game.handle(LifecycleEvent::ToggleAutopilot);
    while game.phase() == Phase::Countdown {
        game.handle(LifecycleEvent::CountdownTick);
    }

    let mut ticks = 0;
    while game.phase() == Phase::Running && ticks < max_ticks {
        game.handle(LifecycleEvent::SimTick);
        ticks += 1;
    }

    let state = game.state();
    log::info!(
        "Stopped after {} ticks: score {}, length {}",
        ticks,
        state.score,
        state.len()
    );
    // Self-played rounds never reach the board
    game.handle(LifecycleEvent::SubmitScore("autopilot".into()));
    println!("  {} saved scores", game.scores().board().len());
    println!("✓ Headless round finished with score {}", game.state().score);
}
