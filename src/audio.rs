//! Sound cues
//!
//! The simulation never plays sound. Hosts translate [`GameEvent`]s into
//! [`SoundEffect`]s and hand them to an [`AudioSink`]. Sinks are
//! fire-and-forget: they swallow their own failures.
//!
//! On wasm32 the cues are procedurally generated with Web Audio oscillators,
//! no sample files needed.

use crate::settings::AudioSettings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Body flapped
    Flap,
    /// Round ended on an obstacle or the ground
    Collision,
    /// A score threshold was crossed
    Milestone { threshold: u32 },
}

impl SoundEffect {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match *event {
            GameEvent::Flap => Some(SoundEffect::Flap),
            GameEvent::Collision { .. } => Some(SoundEffect::Collision),
            GameEvent::Milestone { threshold } => Some(SoundEffect::Milestone { threshold }),
            _ => None,
        }
    }
}

/// Anything that can play cues
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);

    /// Apply updated preferences
    fn apply_settings(&mut self, _settings: &AudioSettings) {}
}

/// Sink that discards every cue (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Play the cue for every event that has one
pub fn dispatch<A: AudioSink + ?Sized>(sink: &mut A, events: &[GameEvent]) {
    for effect in events.iter().filter_map(SoundEffect::for_event) {
        sink.play(effect);
    }
}

/// Volume bookkeeping shared by real sinks
#[derive(Debug, Clone, Copy, Default)]
pub struct Mixer {
    settings: AudioSettings,
}

impl Mixer {
    pub fn new(settings: AudioSettings) -> Self {
        Self {
            settings: settings.sanitized(),
        }
    }

    pub fn set_settings(&mut self, settings: &AudioSettings) {
        self.settings = settings.sanitized();
    }

    /// Get effective sound effect volume
    pub fn effective_volume(&self) -> f32 {
        if self.settings.muted {
            0.0
        } else {
            self.settings.master_volume * self.settings.sfx_volume
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web_audio::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web_audio {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, Mixer, SoundEffect};
    use crate::settings::AudioSettings;

    /// Web Audio oscillator synth
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        mixer: Mixer,
    }

    impl WebAudio {
        pub fn new(settings: AudioSettings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                mixer: Mixer::new(settings),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
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

        /// Flap - quick upward chirp
        fn play_flap(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(400.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(800.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.12).ok();
        }

        /// Collision - falling sawtooth thud
        fn play_collision(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(60.0, t + 0.4)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
        }

        /// Milestone - rising two-note chime, higher for bigger thresholds
        fn play_milestone(&self, ctx: &AudioContext, vol: f32, threshold: u32) {
            let lift = 1.0 + (threshold as f32).log10().max(0.0) * 0.25;
            let notes = [523.25 * lift, 659.25 * lift];
            let t = ctx.current_time();

            for (i, &freq) in notes.iter().enumerate() {
                let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) else {
                    continue;
                };
                let start = t + i as f64 * 0.1;

                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().set_value_at_time(vol * 0.4, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.2)
                    .ok();

                osc.start_with_when(start).ok();
                osc.stop_with_when(start + 0.25).ok();
            }
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.mixer.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Flap => self.play_flap(ctx, vol),
                SoundEffect::Collision => self.play_collision(ctx, vol),
                SoundEffect::Milestone { threshold } => self.play_milestone(ctx, vol, threshold),
            }
        }

        fn apply_settings(&mut self, settings: &AudioSettings) {
            self.mixer.set_settings(settings);
        }
    }
}
