//! Session settings
//!
//! Read once at startup from an inline JSON block in the host page; never
//! written back.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Element id of the optional `<script type="application/json">` settings block
pub const SETTINGS_ELEMENT_ID: &str = "wheel-settings";

/// Widget settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Session ===
    /// Funds the session starts with
    pub initial_balance: u64,

    // === Spin ===
    /// Lower bound of the sampled target rotation (inclusive, degrees)
    pub spin_min_deg: u32,
    /// Upper bound of the sampled target rotation (exclusive, degrees)
    pub spin_max_deg: u32,
    /// Spin animation length in milliseconds
    pub spin_duration_ms: f64,
    /// Rotation between tick cues (degrees)
    pub tick_step_deg: f64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no blur while spinning)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_balance: INITIAL_BALANCE,

            spin_min_deg: SPIN_MIN_DEG,
            spin_max_deg: SPIN_MAX_DEG,
            spin_duration_ms: SPIN_DURATION_MS,
            tick_step_deg: TICK_STEP_DEG,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Clamp out-of-range values into something the session can run with
    pub fn sanitized(mut self) -> Self {
        if self.spin_min_deg > self.spin_max_deg {
            std::mem::swap(&mut self.spin_min_deg, &mut self.spin_max_deg);
        }
        if self.spin_min_deg == self.spin_max_deg {
            // The range is half-open, so it needs room above the lower bound
            match self.spin_max_deg.checked_add(1) {
                Some(max) => self.spin_max_deg = max,
                None => self.spin_min_deg -= 1,
            }
        }
        if !(self.spin_duration_ms.is_finite() && self.spin_duration_ms > 0.0) {
            self.spin_duration_ms = SPIN_DURATION_MS;
        }
        if !(self.tick_step_deg.is_finite() && self.tick_step_deg > 0.0) {
            self.tick_step_deg = TICK_STEP_DEG;
        }
        self.master_volume = clamp_volume(self.master_volume);
        self.sfx_volume = clamp_volume(self.sfx_volume);
        self
    }

    /// Effective sound effects volume (respects mute)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective blur while spinning (respects reduced_motion)
    pub fn effective_blur(&self) -> bool {
        !self.reduced_motion
    }

    /// Load settings from the host page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(SETTINGS_ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from #{}", SETTINGS_ELEMENT_ID);
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

fn clamp_volume(vol: f32) -> f32 {
    if vol.is_nan() { 0.0 } else { vol.clamp(0.0, 1.0) }
}
