//! Optional crash sound via the Web Audio API.
//!
//! Procedurally synthesized - no external files. Audio is strictly optional:
//! a missing or failed AudioContext disables the effect and gameplay carries
//! on untouched.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, OscillatorType};

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context or before a user gesture
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("failed to create AudioContext - audio disabled");
        }
        Self { ctx }
    }

    /// Resume the context (browsers suspend it until a user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play the crash thud; every failure path is a silent no-op
    pub fn play_crash(&self) {
        let Some(ctx) = &self.ctx else { return };
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        if let Err(e) = self.synth_crash(ctx) {
            log::debug!("crash sound failed: {e:?}");
        }
    }

    /// Short descending square-wave thud
    fn synth_crash(&self, ctx: &AudioContext) -> Result<(), wasm_bindgen::JsValue> {
        let now = ctx.current_time();
        let osc = ctx.create_oscillator()?;
        let gain = ctx.create_gain()?;

        osc.set_type(OscillatorType::Square);
        osc.frequency().set_value(220.0);
        osc.frequency()
            .exponential_ramp_to_value_at_time(55.0, now + 0.25)?;

        gain.gain().set_value(0.4);
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, now + 0.3)?;

        osc.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;
        osc.start()?;
        osc.stop_with_when(now + 0.3)?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AudioManager {
    pub fn new() -> Self {
        Self {}
    }

    pub fn resume(&self) {}

    pub fn play_crash(&self) {}
}
