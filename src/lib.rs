//! Fortune Wheel - a wheel of fortune betting widget
//!
//! Core modules:
//! - `wheel`: Bet/spin/payout state machine (pure, no browser dependencies)
//! - `platform`: Browser adapter (DOM controls, wheel animation, audio)
//! - `settings`: Data-driven session configuration

pub mod platform;
pub mod settings;
pub mod wheel;

pub use settings::Settings;

/// Widget configuration constants
pub mod consts {
    /// Starting funds for a new session
    pub const INITIAL_BALANCE: u64 = 5000;

    /// Spin target range in degrees (at least 13 full turns)
    pub const SPIN_MIN_DEG: u32 = 5000;
    pub const SPIN_MAX_DEG: u32 = 10000;

    /// Fixed spin animation length
    pub const SPIN_DURATION_MS: f64 = 5000.0;

    /// Wheel layout: 20 segments of 18 degrees
    pub const SEGMENT_COUNT: usize = 20;
    pub const SEGMENT_DEG: f64 = 360.0 / SEGMENT_COUNT as f64;
    /// Pointer offset into the segment table (pointer sits just inside segment 0)
    pub const LANDING_OFFSET_DEG: f64 = 8.2;

    /// Rotation the wheel must advance between two tick cues
    pub const TICK_STEP_DEG: f64 = 100.0;
}

/// Reduce an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if d >= 360.0 { 0.0 } else { d }
}
