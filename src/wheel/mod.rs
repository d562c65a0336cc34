//! Wheel session state machine
//!
//! All betting logic lives here. This module is platform independent:
//! - Seeded RNG only
//! - Time arrives as explicit `Tick` messages
//! - No DOM, animation or audio dependencies

pub mod animation;
pub mod bet;
mod controller;
pub mod segments;
pub mod state;

pub use animation::{SpinAnimation, ease_out};
pub use bet::{ParsedInt, normalize_bet, parse_leading_int};
pub use segments::{MULTIPLIERS, SegmentTable};
pub use state::{
    ActiveSpin, Controls, Session, SpinPhase, WheelEvent, WheelInput, format_balance,
};
