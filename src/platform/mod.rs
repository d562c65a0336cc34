//! Browser platform layer
//!
//! Binds the wheel session to the page:
//! - DOM controls and displays
//! - Wheel rotation via CSS transitions
//! - Tick cue (Web Audio)

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod dom;

#[cfg(target_arch = "wasm32")]
pub use dom::WheelDom;
