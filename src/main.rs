//! Starfield Gate entry point
//!
//! Handles platform-specific initialization. On the web, starts the scene on
//! `#particleCanvas` and the access gate on `#accessBtn`, each only if present.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlButtonElement, HtmlCanvasElement, HtmlElement};

    use starfield_gate::gate::{Boot, Channel, GateEffect, GateSession};
    use starfield_gate::platform::{Interval, dom, storage};
    use starfield_gate::renderer::CanvasSurface;
    use starfield_gate::scene::Scene;
    use starfield_gate::{AppConfig, GateConfig, Result, SceneConfig};

    /// Scene plus the canvas it draws on
    struct SceneApp {
        scene: Scene,
        surface: CanvasSurface,
    }

    /// Gate session plus the DOM it drives
    struct GateApp {
        session: GateSession,
        button: HtmlButtonElement,
        status: HtmlElement,
        tick_interval_ms: u32,
        timer: Option<Interval>,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Starfield Gate starting...");

        let config = AppConfig::load();

        // The gate may leave the page, so it goes first
        if let Err(e) = start_gate(&config.gate) {
            log::error!("Access gate not started: {}", e);
        }
        if let Err(e) = start_scene(&config.scene) {
            log::error!("Scene not started: {}", e);
        }
    }

    fn start_scene(config: &SceneConfig) -> Result<()> {
        let document = dom::document()?;
        if document.get_element_by_id(&config.canvas_id).is_none() {
            log::info!("No #{} on this page, scene disabled", config.canvas_id);
            return Ok(());
        }
        let canvas: HtmlCanvasElement = dom::element_by_id(&document, &config.canvas_id, "canvas")?;
        let surface = CanvasSurface::fit_to_window(&canvas)?;
        let bounds = surface.bounds();

        let seed = js_sys::Date::now() as u64;
        let scene = Scene::new(config, bounds, seed);
        log::info!(
            "Scene initialized ({}x{}, {} stars, {} planets, {} asteroids, seed {})",
            bounds.width,
            bounds.height,
            scene.state.stars.len(),
            scene.state.planets.len(),
            scene.state.asteroids.len(),
            seed
        );

        let app = Rc::new(RefCell::new(SceneApp { scene, surface }));
        request_animation_frame(app);
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<SceneApp>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            scene_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn scene_loop(app: Rc<RefCell<SceneApp>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            let SceneApp { scene, surface } = &mut *a;
            scene.frame(time, surface);
        }

        request_animation_frame(app);
    }

    fn start_gate(config: &GateConfig) -> Result<()> {
        let document = dom::document()?;
        if document.get_element_by_id(&config.button_id).is_none() {
            log::info!("No #{} on this page, gate disabled", config.button_id);
            return Ok(());
        }

        let session = match GateSession::boot(config, storage::open_default()) {
            Boot::Redirect(destination) => return dom::navigate(&destination),
            Boot::Run(session) => session,
        };

        let button: HtmlButtonElement = dom::element_by_id(&document, &config.button_id, "button")?;
        let status: HtmlElement = dom::element_by_id(&document, &config.status_id, "element")?;
        let channel_links: [HtmlElement; 2] = [
            dom::element_by_id(&document, &config.channel_ids[0], "element")?,
            dom::element_by_id(&document, &config.channel_ids[1], "element")?,
        ];

        button.set_disabled(!session.gate().action_enabled());

        let app = Rc::new(RefCell::new(GateApp {
            session,
            button: button.clone(),
            status,
            tick_interval_ms: config.tick_interval_ms,
            timer: None,
        }));

        // Channel links
        for (link, channel) in channel_links.iter().zip([Channel::First, Channel::Second]) {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let effects = app.borrow_mut().session.join(channel);
                apply_effects(&app, effects);
            });
            let _ = link.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Access button
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let effects = app.borrow_mut().session.request_access();
                apply_effects(&app, effects);
            });
            let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        Ok(())
    }

    fn apply_effects(app: &Rc<RefCell<GateApp>>, effects: Vec<GateEffect>) {
        for effect in effects {
            match effect {
                GateEffect::EnableAction => app.borrow().button.set_disabled(false),
                GateEffect::DisableAction => app.borrow().button.set_disabled(true),
                GateEffect::RevealStatus => {
                    let _ = app.borrow().status.style().set_property("display", "block");
                }
                GateEffect::ShowStatus(text) => {
                    app.borrow().status.set_text_content(Some(&text));
                }
                GateEffect::StartTimer => start_countdown(app),
                GateEffect::CancelTimer => {
                    // Cancel in place; dropping the handle here would free the
                    // closure that is currently running
                    if let Some(timer) = app.borrow_mut().timer.as_mut() {
                        timer.cancel();
                    }
                }
                GateEffect::PersistCompletion => {}
                GateEffect::Navigate(destination) => {
                    log::info!("Redirecting to {}", destination);
                    if let Err(e) = dom::navigate(&destination) {
                        log::error!("Navigation failed: {}", e);
                    }
                }
            }
        }
    }

    fn start_countdown(app: &Rc<RefCell<GateApp>>) {
        let period = app.borrow().tick_interval_ms;
        let weak = Rc::downgrade(app);
        let timer = Interval::start(period, move || {
            if let Some(app) = weak.upgrade() {
                let effects = app.borrow_mut().session.tick();
                apply_effects(&app, effects);
            }
        });
        match timer {
            Ok(timer) => app.borrow_mut().timer = Some(timer),
            Err(e) => log::error!("Countdown timer failed to start: {}", e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Starfield Gate (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    native_demo::run_scene(300);
    native_demo::run_gate();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless walk-through of both components
#[cfg(not(target_arch = "wasm32"))]
mod native_demo {
    use starfield_gate::gate::{Boot, Channel, GateSession};
    use starfield_gate::platform::MemoryStore;
    use starfield_gate::renderer::RecordingSurface;
    use starfield_gate::scene::Scene;
    use starfield_gate::{AppConfig, Bounds};

    /// Drive the scene with a simulated 60 Hz display
    pub fn run_scene(callbacks: u32) {
        let config = AppConfig::load();
        let mut scene = Scene::new(&config.scene, Bounds::new(1280.0, 720.0), 1);
        let mut surface = RecordingSurface::new();

        let mut executed = 0;
        for i in 0..callbacks {
            surface.reset();
            if scene.frame(i as f64 * 1000.0 / 60.0, &mut surface) {
                executed += 1;
            }
        }
        log::info!(
            "Scene: {} callbacks, {} frames run, {} shooting stars spawned, {} alive, {} circles last frame",
            callbacks,
            executed,
            scene.state.spawned,
            scene.state.shooting_stars.len(),
            surface.circle_count()
        );
    }

    /// Walk the gate from Locked to Unlocked against an in-memory store
    pub fn run_gate() {
        let config = AppConfig::load().gate;
        let Boot::Run(mut session) = GateSession::boot(&config, Box::new(MemoryStore::new())) else {
            return;
        };

        let mut effects = session.join(Channel::First);
        effects.extend(session.join(Channel::Second));
        effects.extend(session.request_access());
        for _ in 0..config.countdown_start {
            effects.extend(session.tick());
        }
        for effect in &effects {
            log::info!("Gate effect: {:?}", effect);
        }
        log::info!("Gate completed: {}", session.completed());
    }
}
