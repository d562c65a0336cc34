//! Tick cue using the Web Audio API
//!
//! The cue is synthesized, so no audio asset has to be fetched.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;

/// Pitch of the ratchet click
const TICK_FREQ: f32 = 1800.0;
/// Click length in seconds
const TICK_LENGTH: f64 = 0.04;

/// Owns the audio context and the single tick cue
pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// Cue volume after master/sfx scaling and mute
    volume: f32,
    /// Cue still sounding from the previous tick, if any
    playing: Option<OscillatorNode>,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - tick cue disabled");
        }
        Self {
            ctx,
            volume: settings.effective_volume(),
            playing: None,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play the tick cue from the start, cutting off one still sounding
    pub fn play_tick(&mut self) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        if let Some(previous) = self.playing.take() {
            previous.stop().ok();
        }

        let Some((osc, gain)) = create_osc(ctx, TICK_FREQ, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + TICK_LENGTH)
            .ok();
        osc.frequency().set_value_at_time(TICK_FREQ, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(TICK_FREQ * 0.5, t + TICK_LENGTH)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + TICK_LENGTH + 0.01).ok();
        self.playing = Some(osc);
    }
}

/// Create an oscillator routed through a gain node to the output
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}
