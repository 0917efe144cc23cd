//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects, no external files. Which effect an
//! event plays is decided here for every target; playback only exists in the
//! browser build.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Key or other item picked up
    Pickup,
    /// Roof door key turning
    DoorUnlock,
    /// Room door swinging open
    DoorCreak,
    /// Locked door rattle
    Locked,
    /// Drawer with nothing in it
    DrawerRattle,
    /// Cable box repaired
    CableSpark,
    /// Walked down to the next floor
    Footsteps,
    /// Electrical exit opened
    Escape,
    /// Chaser contact
    Scream,
    /// Wanderer contact
    Sting,
}

impl SoundEffect {
    /// Effect for a session event, if it has one.
    /// `GameOver` is silent: it always follows a scream or a sting.
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ItemAcquired(_) => Some(SoundEffect::Pickup),
            GameEvent::DoorUnlocking => Some(SoundEffect::DoorUnlock),
            GameEvent::DoorOpened => Some(SoundEffect::DoorCreak),
            GameEvent::DoorLocked => Some(SoundEffect::Locked),
            GameEvent::DrawerEmpty => Some(SoundEffect::DrawerRattle),
            GameEvent::CableFixed { .. } => Some(SoundEffect::CableSpark),
            GameEvent::FloorDescended(_) => Some(SoundEffect::Footsteps),
            GameEvent::Escaped => Some(SoundEffect::Escape),
            GameEvent::Jumpscare => Some(SoundEffect::Scream),
            GameEvent::Caught => Some(SoundEffect::Sting),
            GameEvent::ItemSpent(_)
            | GameEvent::LevelChanged(_)
            | GameEvent::GameOver
            | GameEvent::Reset => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Fails outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: 0.8,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Master volume from the settings screen (0.0 - 1.0)
        pub fn set_volume(&mut self, vol: f32) {
            self.volume = vol.clamp(0.0, 1.0);
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Pickup => self.play_pickup(ctx, vol),
                SoundEffect::DoorUnlock => self.play_door_unlock(ctx, vol),
                SoundEffect::DoorCreak => self.play_door_creak(ctx, vol),
                SoundEffect::Locked => self.play_locked(ctx, vol),
                SoundEffect::DrawerRattle => self.play_drawer_rattle(ctx, vol),
                SoundEffect::CableSpark => self.play_cable_spark(ctx, vol),
                SoundEffect::Footsteps => self.play_footsteps(ctx, vol),
                SoundEffect::Escape => self.play_escape(ctx, vol),
                SoundEffect::Scream => self.play_scream(ctx, vol),
                SoundEffect::Sting => self.play_sting(ctx, vol),
            }
        }

        // === Sound generators ===

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

        /// Jumpscare scream: sawtooth diving 400 -> 100 Hz over half a second
        fn play_scream(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(400.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(100.0, t + 0.5)
                .ok();
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
        }

        /// Ghost contact: low detuned drone
        fn play_sting(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            for freq in [55.0, 58.0] {
                if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sawtooth) {
                    gain.gain().set_value_at_time(vol * 0.35, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 1.2)
                        .ok();
                    osc.start().ok();
                    osc.stop_with_when(t + 1.3).ok();
                }
            }
        }

        /// Item pickup: two quiet glints
        fn play_pickup(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [900.0, 1350.0].iter().enumerate() {
                let delay = i as f64 * 0.07;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.2, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.2).ok();
                }
            }
        }

        /// Key turning in the roof door
        fn play_door_unlock(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [700.0, 500.0].iter().enumerate() {
                let delay = i as f64 * 0.12;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Square) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.15, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.05)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.06).ok();
                }
            }
        }

        /// Hinge creak: slow wobbling triangle
        fn play_door_creak(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(0.01, t).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(vol * 0.25, t + 0.15)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.7)
                .ok();
            osc.frequency().set_value_at_time(180.0, t).ok();
            osc.frequency().set_value_at_time(230.0, t + 0.15).ok();
            osc.frequency().set_value_at_time(160.0, t + 0.3).ok();
            osc.frequency().set_value_at_time(260.0, t + 0.45).ok();
            osc.frequency().set_value_at_time(140.0, t + 0.6).ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.75).ok();
        }

        /// Handle rattling against the lock
        fn play_locked(&self, ctx: &AudioContext, vol: f32) {
            for i in 0..3 {
                let delay = i as f64 * 0.06;
                if let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Square) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.2, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.04)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.05).ok();
                }
            }
        }

        /// Wooden drawer sliding on its runners
        fn play_drawer_rattle(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 90.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.frequency().set_value_at_time(90.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(60.0, t + 0.25)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }

        /// Cable box repaired: electric zap plus mains hum
        fn play_cable_spark(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                    .ok();
                osc.frequency().set_value_at_time(120.0, t).ok();
                osc.frequency().set_value_at_time(400.0, t + 0.02).ok();
                osc.frequency().set_value_at_time(150.0, t + 0.04).ok();
                osc.frequency().set_value_at_time(350.0, t + 0.06).ok();
                osc.frequency().set_value_at_time(80.0, t + 0.1).ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.25).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 50.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.2, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.6)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.65).ok();
            }
        }

        /// Four soft thuds down the stairs
        fn play_footsteps(&self, ctx: &AudioContext, vol: f32) {
            for i in 0..4 {
                let delay = i as f64 * 0.18;
                if let Some((osc, gain)) = self.create_osc(ctx, 70.0, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.35, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.12).ok();
                }
            }
        }

        /// Escape: a rising minor arpeggio
        fn play_escape(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [220.0, 262.0, 330.0, 440.0].iter().enumerate() {
                let delay = i as f64 * 0.15;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.6).ok();
                }
            }
        }
    }
}
