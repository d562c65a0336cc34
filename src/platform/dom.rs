//! DOM view of the wheel widget
//!
//! Looks up the widget's elements once and mirrors session events onto them.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use super::audio::AudioManager;
use crate::settings::Settings;
use crate::wheel::{Controls, WheelEvent, format_balance};

/// CSS class marking a button as disabled
const DISABLED_CLASS: &str = "disabled";
/// CSS class applied to the wheel and logo while spinning
const BLUR_CLASS: &str = "blur";

/// Elements the widget drives
pub struct WheelDom {
    pub wheel: HtmlElement,
    logo: Option<HtmlElement>,
    start_button: HtmlElement,
    withdraw_button: HtmlElement,
    pub bet_input: HtmlInputElement,
    bet_display: Option<Element>,
    balance_display: Option<Element>,
    audio: AudioManager,
    blur: bool,
}

impl WheelDom {
    /// Bind to the widget markup; `None` if a required element is missing
    pub fn bind(document: &Document, settings: &Settings) -> Option<Self> {
        let wheel = query_html(document, ".wheel")?;
        let buttons = document.query_selector_all(".button").ok()?;
        let start_button = buttons.get(0)?.dyn_into::<HtmlElement>().ok()?;
        let withdraw_button = buttons.get(1)?.dyn_into::<HtmlElement>().ok()?;
        let bet_input = document
            .get_element_by_id("betAmount")?
            .dyn_into::<HtmlInputElement>()
            .ok()?;

        let logo = query_html(document, ".logo");
        if logo.is_none() {
            log::warn!("No .logo element, spin blur applies to the wheel only");
        }

        Some(Self {
            wheel,
            logo,
            start_button,
            withdraw_button,
            bet_input,
            bet_display: document.get_element_by_id("betValue"),
            balance_display: document.get_element_by_id("winningsDisplay"),
            audio: AudioManager::new(settings),
            blur: settings.effective_blur(),
        })
    }

    /// Resume audio after the first user gesture
    pub fn resume_audio(&self) {
        self.audio.resume();
    }

    /// Apply session events in order
    pub fn apply(&mut self, events: &[WheelEvent]) {
        for event in events {
            match event {
                WheelEvent::ControlsChanged(controls) => self.set_controls(controls),
                WheelEvent::BalanceChanged(balance) => {
                    set_text(self.balance_display.as_ref(), &format_balance(*balance));
                }
                WheelEvent::BetChanged(bet) => {
                    set_text(self.bet_display.as_ref(), &bet.to_string());
                }
                WheelEvent::BetInputReset => self.bet_input.set_value("0"),
                WheelEvent::SpinStarted {
                    target_deg,
                    duration_ms,
                } => self.spin_to(*target_deg, *duration_ms),
                WheelEvent::SpinResolved { rest_deg, .. } => self.snap_to(*rest_deg),
                WheelEvent::TickCue => self.audio.play_tick(),
            }
        }
    }

    fn set_controls(&self, controls: &Controls) {
        set_button_enabled(&self.start_button, controls.start_enabled);
        set_button_enabled(&self.withdraw_button, controls.withdraw_enabled);
        self.bet_input.set_disabled(!controls.bet_input_enabled);
    }

    fn spin_to(&self, target_deg: u32, duration_ms: f64) {
        let style = self.wheel.style();
        // Only transform is animated, so transitionend fires once per spin
        let _ = style.set_property("transition", &format!("transform {}ms ease-out", duration_ms));
        let _ = style.set_property("transform", &format!("rotate({}deg)", target_deg));
        if self.blur {
            self.set_blurred(true);
        }
    }

    fn snap_to(&self, rest_deg: f64) {
        self.set_blurred(false);
        let style = self.wheel.style();
        let _ = style.set_property("transition", "none");
        let _ = style.set_property("transform", &format!("rotate({}deg)", rest_deg));
    }

    fn set_blurred(&self, blurred: bool) {
        let targets = std::iter::once(&self.wheel).chain(self.logo.as_ref());
        for el in targets {
            let classes = el.class_list();
            let result = if blurred {
                classes.add_1(BLUR_CLASS)
            } else {
                classes.remove_1(BLUR_CLASS)
            };
            if result.is_err() {
                log::warn!("Could not toggle blur class");
            }
        }
    }
}

fn query_html(document: &Document, selector: &str) -> Option<HtmlElement> {
    let el = document.query_selector(selector).ok().flatten();
    if el.is_none() {
        log::warn!("Missing element {}", selector);
    }
    el?.dyn_into::<HtmlElement>().ok()
}

fn set_button_enabled(button: &HtmlElement, enabled: bool) {
    let classes = button.class_list();
    let _ = if enabled {
        classes.remove_1(DISABLED_CLASS)
    } else {
        classes.add_1(DISABLED_CLASS)
    };
    let _ = button
        .style()
        .set_property("pointer-events", if enabled { "auto" } else { "none" });
}

fn set_text(el: Option<&Element>, text: &str) {
    if let Some(el) = el {
        el.set_text_content(Some(text));
    }
}
