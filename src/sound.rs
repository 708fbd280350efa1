#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Sample rates and sample clocks comfortably fit in f32/f64 for synthesis
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use anyhow::Result;
use bevy_ecs::prelude::Resource;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use crossbeam_channel::{Receiver, Sender, bounded};
use log::{debug, error, warn};
use std::f32::consts::TAU;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crate::settings::Settings;

// Sound effects types that can be played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Gunshot,
    Hit,
    SheriffHit,
    Ricochet,
    CountdownBeep,
    GameOver,
    NewHighScore,
    MenuSelect,
}

impl SoundEffect {
    /// Seconds after which the effect is silent.
    #[must_use]
    pub fn duration(self) -> f32 {
        match self {
            SoundEffect::Gunshot => 0.35,
            SoundEffect::Hit => 0.4,
            SoundEffect::SheriffHit => 0.7,
            SoundEffect::Ricochet => 0.45,
            SoundEffect::CountdownBeep => 0.1,
            SoundEffect::GameOver => 1.5,
            SoundEffect::NewHighScore => 1.0,
            SoundEffect::MenuSelect => 0.05,
        }
    }
}

// Command to control the audio thread
pub(crate) enum AudioCommand {
    PlaySound(SoundEffect),
    PlayMusic(bool),
    SetVolumes { sfx: f32, music: f32 },
    Quit,
}

// Mixer parameters forwarded from the control thread to the stream callback
#[derive(Debug, Clone, Copy)]
struct MixState {
    music_enabled: bool,
    sfx_volume: f32,
    music_volume: f32,
}

/// Handle to the audio thread. Every call is fire-and-forget: a full queue
/// or a missing device just means silence.
#[derive(Resource)]
pub struct AudioState {
    sender: Option<Sender<AudioCommand>>,
    available: Arc<AtomicBool>,
    music_enabled: bool,
    sfx_volume: f32,
    music_volume: f32,
}

impl AudioState {
    /// Starts the audio thread with the volumes from `settings`.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        let (sender, receiver) = bounded(64);
        let available = Arc::new(AtomicBool::new(true));
        let mix = MixState {
            music_enabled: false,
            sfx_volume: settings.sfx_gain(),
            music_volume: settings.music_gain(),
        };

        let thread_available = Arc::clone(&available);
        let spawned = thread::Builder::new()
            .name("audio".into())
            .spawn(move || {
                if let Err(e) = run_audio_thread(&receiver, mix) {
                    error!("Audio thread error: {e}");
                    thread_available.store(false, Ordering::Relaxed);
                }
            });

        let sender = match spawned {
            Ok(_) => Some(sender),
            Err(e) => {
                error!("Failed to start audio thread: {e}");
                available.store(false, Ordering::Relaxed);
                None
            }
        };

        Self {
            sender,
            available,
            music_enabled: false,
            sfx_volume: mix.sfx_volume,
            music_volume: mix.music_volume,
        }
    }

    /// An audio state that never makes a sound.
    #[must_use]
    pub fn silent() -> Self {
        Self {
            sender: None,
            available: Arc::new(AtomicBool::new(false)),
            music_enabled: false,
            sfx_volume: 0.0,
            music_volume: 0.0,
        }
    }

    /// A state wired to a queue of `capacity` with no audio thread behind it.
    #[cfg(test)]
    pub(crate) fn detached(capacity: usize) -> (Self, Receiver<AudioCommand>) {
        let (sender, receiver) = bounded(capacity);
        let audio = Self {
            sender: Some(sender),
            available: Arc::new(AtomicBool::new(true)),
            music_enabled: false,
            sfx_volume: 1.0,
            music_volume: 1.0,
        };
        (audio, receiver)
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.sender.is_some() && self.available.load(Ordering::Relaxed)
    }

    /// Queues `effect`. Returns false when it was not sent.
    pub fn play_sound(&self, effect: SoundEffect) -> bool {
        if self.sfx_volume <= 0.0 {
            return false;
        }
        self.send(AudioCommand::PlaySound(effect))
    }

    #[must_use]
    pub fn is_music_enabled(&self) -> bool {
        self.music_enabled
    }

    pub fn set_music_playing(&mut self, playing: bool) {
        if self.music_enabled == playing {
            return;
        }
        // Only track what the audio thread actually received
        if self.send(AudioCommand::PlayMusic(playing)) {
            self.music_enabled = playing;
        }
    }

    #[must_use]
    pub fn sfx_volume(&self) -> f32 {
        self.sfx_volume
    }

    #[must_use]
    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    /// Picks up changed volumes from the settings panel.
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_volume = settings.sfx_gain();
        self.music_volume = settings.music_gain();
        debug!(
            "Audio volumes: sfx {:.2}, music {:.2}",
            self.sfx_volume, self.music_volume
        );
        self.send(AudioCommand::SetVolumes {
            sfx: self.sfx_volume,
            music: self.music_volume,
        });
    }

    fn send(&self, command: AudioCommand) -> bool {
        match &self.sender {
            Some(sender) => sender.try_send(command).is_ok(),
            None => false,
        }
    }
}

impl Drop for AudioState {
    fn drop(&mut self) {
        self.send(AudioCommand::Quit);
    }
}

fn run_audio_thread(receiver: &Receiver<AudioCommand>, initial: MixState) -> Result<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("No audio output device found"))?;
    let config = device.default_output_config()?;

    let mut mix = initial;

    // Channels into the stream callback, which must never block
    let (sound_sender, sound_receiver) = bounded::<SoundEffect>(64);
    let (mix_sender, mix_receiver) = bounded::<MixState>(16);

    let _stream = match config.sample_format() {
        cpal::SampleFormat::F32 => {
            run_audio_stream::<f32>(&device, &config.into(), sound_receiver, mix_receiver, mix)?
        }
        cpal::SampleFormat::I16 => {
            run_audio_stream::<i16>(&device, &config.into(), sound_receiver, mix_receiver, mix)?
        }
        cpal::SampleFormat::U16 => {
            run_audio_stream::<u16>(&device, &config.into(), sound_receiver, mix_receiver, mix)?
        }
        format => return Err(anyhow::anyhow!("Unsupported audio format {format:?}")),
    };

    // Keep the thread alive and process commands
    while let Ok(command) = receiver.recv() {
        match command {
            AudioCommand::PlaySound(effect) => {
                let _ = sound_sender.try_send(effect);
            }
            AudioCommand::PlayMusic(enabled) => {
                mix.music_enabled = enabled;
                let _ = mix_sender.try_send(mix);
            }
            AudioCommand::SetVolumes { sfx, music } => {
                mix.sfx_volume = sfx;
                mix.music_volume = music;
                let _ = mix_sender.try_send(mix);
            }
            AudioCommand::Quit => break,
        }
    }

    Ok(())
}

fn run_audio_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    sound_receiver: Receiver<SoundEffect>,
    mix_receiver: Receiver<MixState>,
    initial: MixState,
) -> Result<cpal::Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let sample_rate = f64::from(config.sample_rate.0);
    let channels = usize::from(config.channels);

    let mut mix = initial;
    let mut active_sounds: Vec<(SoundEffect, f64)> = Vec::new();
    let mut current_time = 0.0;
    let mut music_started_at = 0.0;

    let mut next_value = move || {
        while let Ok(new_mix) = mix_receiver.try_recv() {
            if new_mix.music_enabled && !mix.music_enabled {
                music_started_at = current_time;
            }
            mix = new_mix;
        }

        while let Ok(effect) = sound_receiver.try_recv() {
            active_sounds.push((effect, current_time));
        }

        let mut left = 0.0;
        let mut right = 0.0;

        active_sounds
            .retain(|&(effect, start)| (current_time - start) as f32 <= effect.duration());
        for (effect, start_time) in &active_sounds {
            let sample = generate_sound_sample(*effect, current_time - start_time);
            left += sample.0 * mix.sfx_volume;
            right += sample.1 * mix.sfx_volume;
        }

        if mix.music_enabled {
            let sample = music_sample(current_time - music_started_at) * mix.music_volume;
            left += sample;
            right += sample;
        }

        current_time += 1.0 / sample_rate;

        (left.clamp(-1.0, 1.0), right.clamp(-1.0, 1.0))
    };

    let err_fn = |err| error!("Error in audio stream: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            for frame in data.chunks_mut(channels) {
                let sample = next_value();
                let left = T::from_sample(sample.0);
                let right = T::from_sample(sample.1);

                for (channel, sample) in frame.iter_mut().enumerate() {
                    if channel & 1 == 0 {
                        *sample = left;
                    } else {
                        *sample = right;
                    }
                }
            }
        },
        err_fn,
        None,
    )?;

    stream.play()?;
    if channels < 2 {
        warn!("Mono output device, stereo effects will be folded");
    }

    Ok(stream)
}

fn tone(t: f32, freq: f32) -> f32 {
    (t * freq * TAU).sin()
}

/// One stereo sample of `effect`, `t` seconds after it started.
#[must_use]
pub fn generate_sound_sample(effect: SoundEffect, t: f64) -> (f32, f32) {
    let t = t as f32;

    if t < 0.0 || t > effect.duration() {
        return (0.0, 0.0);
    }

    match effect {
        SoundEffect::Gunshot => {
            // Noise crack over a low thump
            let crack = (fastrand::f32() * 2.0 - 1.0) * (-25.0 * t).exp() * 0.6;
            let thump = tone(t, 70.0) * (-12.0 * t).exp() * 0.5;
            let sample = crack + thump;
            (sample, sample)
        }
        SoundEffect::Hit => {
            // Metallic ding
            let env = (-9.0 * t).exp();
            let sample = (tone(t, 1320.0) * 0.6 + tone(t, 1980.0) * 0.3) * env * 0.4;
            (sample * 1.1, sample * 0.9)
        }
        SoundEffect::SheriffHit => {
            // Sad descending trombone
            let freq = 392.0 - 220.0 * (t / 0.7);
            let wobble = 1.0 + 0.03 * tone(t, 6.0);
            let sample = tone(t, freq * wobble) * (0.7 - t).max(0.0) * 0.5;
            (sample, sample)
        }
        SoundEffect::Ricochet => {
            // Falling whistle, panned right
            let freq = 2400.0 - 1600.0 * (t / 0.45);
            let sample = tone(t, freq) * (-6.0 * t).exp() * 0.25;
            (sample * 0.6, sample * 1.4)
        }
        SoundEffect::CountdownBeep => {
            let sample = tone(t, 880.0) * 0.3;
            (sample, sample)
        }
        SoundEffect::GameOver => {
            // Three falling notes
            let (freq, start) = if t < 0.4 {
                (392.0, 0.0)
            } else if t < 0.8 {
                (330.0, 0.4)
            } else {
                (262.0, 0.8)
            };
            let sample = tone(t, freq) * (-3.0 * (t - start)).exp() * 0.35;
            (sample, sample)
        }
        SoundEffect::NewHighScore => {
            // Rising arpeggio
            let step = ((t / 0.2) as usize).min(4);
            let freq = [523.25, 659.25, 783.99, 1046.5, 1046.5][step];
            let local = t - step as f32 * 0.2;
            let sample = tone(t, freq) * (-5.0 * local).exp() * 0.35;
            (sample, sample)
        }
        SoundEffect::MenuSelect => {
            let sample = tone(t, 660.0) * 0.2;
            (sample, sample)
        }
    }
}

// E minor pentatonic, one octave
const MUSIC_SCALE: [f32; 6] = [164.81, 196.0, 220.0, 246.94, 293.66, 329.63];
const MUSIC_PATTERN: [usize; 16] = [0, 2, 3, 2, 4, 3, 2, 0, 1, 2, 3, 5, 4, 3, 1, 0];
const MUSIC_STEP: f32 = 0.25;

/// Slow plucked melody over a root bass note.
#[must_use]
pub fn music_sample(t: f64) -> f32 {
    let t = t as f32;
    let step = (t / MUSIC_STEP) as usize;
    let local = t - step as f32 * MUSIC_STEP;

    let note = MUSIC_SCALE[MUSIC_PATTERN[step % MUSIC_PATTERN.len()]];
    let melody = tone(t, note) * (-6.0 * local).exp() * 0.08;

    // Bass on every fourth step
    let bar_local = t - (step / 4 * 4) as f32 * MUSIC_STEP;
    let bass = tone(t, 82.41) * (-2.0 * bar_local).exp() * 0.06;

    melody + bass
}
