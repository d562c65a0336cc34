//! Session state and message types
//!
//! Everything the widget mutates lives in one owned [`Session`]; the browser
//! glue only feeds it [`WheelInput`]s and mirrors the [`WheelEvent`]s it emits.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::animation::SpinAnimation;
use super::segments::SegmentTable;
use crate::settings::Settings;

/// Whether a spin is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinPhase {
    /// Waiting for a bet, a spin start or a withdrawal
    #[default]
    Idle,
    /// Wheel animating toward its target rotation
    Spinning,
}

/// Enable state of the widget's controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub start_enabled: bool,
    pub withdraw_enabled: bool,
    pub bet_input_enabled: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            start_enabled: false,
            withdraw_enabled: false,
            bet_input_enabled: true,
        }
    }
}

/// Messages delivered to the session by the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum WheelInput {
    /// Bet field text changed
    BetChanged(String),
    /// Start button clicked
    StartSpin,
    /// Wheel rotation transition finished
    SpinComplete,
    /// Animation frame; milliseconds since the spin started
    Tick { elapsed_ms: f64 },
    /// Withdraw button clicked
    Withdraw,
}

/// Side effects for the UI layer to apply, in order
#[derive(Debug, Clone, PartialEq)]
pub enum WheelEvent {
    ControlsChanged(Controls),
    /// Balance display text changed
    BalanceChanged(u64),
    /// Bet display changed
    BetChanged(u64),
    /// Bet field text should read "0"
    BetInputReset,
    /// Animate the wheel to `target_deg` over `duration_ms` (ease-out)
    SpinStarted { target_deg: u32, duration_ms: f64 },
    /// Spin landed; snap the wheel to `rest_deg` without animation
    SpinResolved {
        rest_deg: f64,
        segment: usize,
        multiplier: u32,
        bet: u64,
    },
    /// One-shot tick cue
    TickCue,
}

/// Tick cue tracking for the spin in flight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveSpin {
    pub animation: SpinAnimation,
    /// Rotation target as sampled (integer degrees)
    pub target_deg: u32,
    /// Rest-normalized angle at which the last cue fired
    pub last_tick_deg: f64,
    /// Whether the stake was deducted when this spin started
    pub fresh_stake: bool,
}

/// The wheel session: balance, bet and spin bookkeeping
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) settings: Settings,
    pub(crate) table: SegmentTable,
    pub(crate) balance: u64,
    pub(crate) bet: u64,
    pub(crate) phase: SpinPhase,
    pub(crate) controls: Controls,
    pub(crate) spin: Option<ActiveSpin>,
    /// Target of the most recent spin
    pub(crate) last_rotation_deg: Option<u32>,
    /// Multiplier the most recent spin resolved with
    pub(crate) last_multiplier: Option<u32>,
    pub(crate) rng: Pcg32,
}

impl Session {
    /// Create a session with default settings and the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self::with_settings(Settings::default(), seed)
    }

    pub fn with_settings(settings: Settings, seed: u64) -> Self {
        let settings = settings.sanitized();
        Self {
            table: SegmentTable::default(),
            balance: settings.initial_balance,
            bet: 0,
            phase: SpinPhase::Idle,
            controls: Controls::default(),
            spin: None,
            last_rotation_deg: None,
            last_multiplier: None,
            rng: Pcg32::seed_from_u64(seed),
            settings,
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn is_spinning(&self) -> bool {
        self.phase == SpinPhase::Spinning
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn table(&self) -> &SegmentTable {
        &self.table
    }

    pub fn active_spin(&self) -> Option<&ActiveSpin> {
        self.spin.as_ref()
    }

    pub fn last_rotation_deg(&self) -> Option<u32> {
        self.last_rotation_deg
    }

    pub fn last_multiplier(&self) -> Option<u32> {
        self.last_multiplier
    }

    /// Balance display text
    pub fn balance_text(&self) -> String {
        format_balance(self.balance)
    }

    /// Events that bring a freshly mounted view in line with the session
    pub fn initial_events(&self) -> Vec<WheelEvent> {
        vec![
            WheelEvent::ControlsChanged(self.controls),
            WheelEvent::BalanceChanged(self.balance),
            WheelEvent::BetChanged(self.bet),
        ]
    }
}

/// Format a balance the way the widget displays it
pub fn format_balance(amount: u64) -> String {
    format!("Balance: R{}", amount)
}
