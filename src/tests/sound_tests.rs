#[cfg(test)]
mod tests {
    use crate::settings::{CrosshairStyle, Settings};
    use crate::sound::{AudioState, SoundEffect, generate_sound_sample, music_sample};

    const ALL_EFFECTS: [SoundEffect; 8] = [
        SoundEffect::Gunshot,
        SoundEffect::Hit,
        SoundEffect::SheriffHit,
        SoundEffect::Ricochet,
        SoundEffect::CountdownBeep,
        SoundEffect::GameOver,
        SoundEffect::NewHighScore,
        SoundEffect::MenuSelect,
    ];

    #[test]
    fn test_effects_are_silent_outside_their_span() {
        for effect in ALL_EFFECTS {
            assert_eq!(generate_sound_sample(effect, -0.01), (0.0, 0.0));
            let after = f64::from(effect.duration()) + 0.01;
            assert_eq!(generate_sound_sample(effect, after), (0.0, 0.0));
        }
    }

    #[test]
    fn test_samples_stay_in_range() {
        for effect in ALL_EFFECTS {
            let steps = 200;
            for i in 0..=steps {
                let t = f64::from(effect.duration()) * f64::from(i) / f64::from(steps);
                let (left, right) = generate_sound_sample(effect, t);
                assert!(left.abs() <= 1.5, "{effect:?} left {left} at {t}");
                assert!(right.abs() <= 1.5, "{effect:?} right {right} at {t}");
            }
        }

        for i in 0..1000 {
            assert!(music_sample(f64::from(i) * 0.01).abs() <= 1.0);
        }
    }

    #[test]
    fn test_music_flag_follows_delivered_commands() {
        let (mut audio, receiver) = AudioState::detached(1);
        assert!(audio.play_sound(SoundEffect::Gunshot));

        // The queue is full
        audio.set_music_playing(true);
        assert!(!audio.is_music_enabled());

        assert!(receiver.try_recv().is_ok());
        audio.set_music_playing(true);
        assert!(audio.is_music_enabled());

        assert!(receiver.try_recv().is_ok());
        audio.set_music_playing(false);
        assert!(!audio.is_music_enabled());
    }

    #[test]
    fn test_silent_audio_state() {
        let mut audio = AudioState::silent();
        assert!(!audio.is_available());
        assert!(!audio.play_sound(SoundEffect::Gunshot));

        // Nothing received the request, so music stays off
        audio.set_music_playing(true);
        assert!(!audio.is_music_enabled());

        audio.apply_settings(&Settings {
            sfx_volume: 50,
            music_volume: 20,
            crosshair_style: CrosshairStyle::Classic,
        });
        assert!((audio.sfx_volume() - 0.5).abs() < f32::EPSILON);
        assert!((audio.music_volume() - 0.2).abs() < f32::EPSILON);

        // Still no device to play on
        assert!(!audio.play_sound(SoundEffect::Hit));
    }
}
