//! Fortune Wheel entry point
//!
//! Handles platform-specific initialization and wires browser events to the
//! wheel session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::TransitionEvent;

    use fortune_wheel::Settings;
    use fortune_wheel::platform::WheelDom;
    use fortune_wheel::wheel::{Session, WheelEvent, WheelInput};

    /// App instance holding the session and its view
    struct App {
        session: Session,
        dom: WheelDom,
        /// rAF timestamp of the first frame of the current spin
        spin_started_at: Option<f64>,
        /// Whether a frame callback is already scheduled
        frame_pending: bool,
    }

    impl App {
        /// Feed one input to the session and render its effects
        fn dispatch(&mut self, input: WheelInput) {
            let events = self.session.handle(input);
            if events
                .iter()
                .any(|e| matches!(e, WheelEvent::SpinStarted { .. }))
            {
                self.spin_started_at = None;
            }
            self.dom.apply(&events);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Fortune Wheel starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document, nothing to bind to");
            return;
        };

        let settings = Settings::load();
        let Some(dom) = WheelDom::bind(&document, &settings) else {
            log::error!("Wheel markup not found, widget disabled");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let session = Session::with_settings(settings, seed);
        let app = Rc::new(RefCell::new(App {
            session,
            dom,
            spin_started_at: None,
            frame_pending: false,
        }));
        {
            let mut a = app.borrow_mut();
            let events = a.session.initial_events();
            a.dom.apply(&events);
        }
        log::info!("Session initialized with seed: {}", seed);

        setup_bet_input(app.clone());
        setup_buttons(app.clone());
        setup_spin_complete(app);

        log::info!("Fortune Wheel running!");
    }

    fn setup_bet_input(app: Rc<RefCell<App>>) {
        let input = app.borrow().dom.bet_input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut a = app.borrow_mut();
            let raw = a.dom.bet_input.value();
            a.dispatch(WheelInput::BetChanged(raw));
        });
        let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Ok(buttons) = document.query_selector_all(".button") else {
            return;
        };

        // Start button
        if let Some(btn) = buttons.get(0) {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let spinning = {
                    let mut a = app.borrow_mut();
                    a.dom.resume_audio();
                    a.dispatch(WheelInput::StartSpin);
                    a.session.is_spinning() && !a.frame_pending
                };
                if spinning {
                    request_animation_frame(app.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Withdraw button
        if let Some(btn) = buttons.get(1) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().dispatch(WheelInput::Withdraw);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_spin_complete(app: Rc<RefCell<App>>) {
        let wheel = app.borrow().dom.wheel.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TransitionEvent| {
            if event.property_name() != "transform" {
                return;
            }
            let mut a = app.borrow_mut();
            a.dispatch(WheelInput::SpinComplete);
            a.spin_started_at = None;
        });
        let _ = wheel
            .add_event_listener_with_callback("transitionend", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        app.borrow_mut().frame_pending = true;
        let closure = Closure::once(move |time: f64| {
            spin_frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Per-frame tick loop; stops once the session leaves Spinning
    fn spin_frame(app: Rc<RefCell<App>>, time: f64) {
        let spinning = {
            let mut a = app.borrow_mut();
            a.frame_pending = false;
            if a.session.is_spinning() {
                let started = *a.spin_started_at.get_or_insert(time);
                a.dispatch(WheelInput::Tick {
                    elapsed_ms: time - started,
                });
                true
            } else {
                false
            }
        };
        if spinning {
            request_animation_frame(app);
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
    use fortune_wheel::wheel::{Session, WheelInput};

    env_logger::init();
    log::info!("Fortune Wheel (native) starting...");
    log::info!("Native mode has no wheel view - build for wasm32 to play in the browser");

    // Headless demo round against the session
    let mut session = Session::with_settings(fortune_wheel::Settings::load(), 1);
    session.handle(WheelInput::BetChanged("100".into()));
    session.handle(WheelInput::StartSpin);
    session.handle(WheelInput::SpinComplete);
    println!(
        "Bet 100 landed x{} -> bet {}, {}",
        session.last_multiplier().unwrap_or(0),
        session.bet(),
        session.balance_text()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
