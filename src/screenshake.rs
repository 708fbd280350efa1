#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::ScreenShake;

// Duration the fade-out is measured against
const SHAKE_FADE: f32 = 0.3;

/// Triggers a screen shake effect with the specified intensity and duration.
/// A weaker shake never cuts a stronger one short.
pub fn trigger_screen_shake(world: &mut World, intensity: f32, duration: f32) {
    let Some(mut screen_shake) = world.get_resource_mut::<ScreenShake>() else {
        return;
    };
    if screen_shake.is_active && screen_shake.intensity > intensity {
        return;
    }
    screen_shake.intensity = intensity;
    screen_shake.duration = duration;
    screen_shake.is_active = true;
    trace!("Screen shake triggered with intensity {intensity}");
}

/// Updates the screen shake state based on elapsed time
pub fn update_screen_shake(world: &mut World, delta_seconds: f32) {
    let Some(mut screen_shake) = world.get_resource_mut::<ScreenShake>() else {
        return;
    };
    if screen_shake.duration <= 0.0 {
        return;
    }

    screen_shake.duration -= delta_seconds;
    if screen_shake.duration <= 0.0 {
        *screen_shake = ScreenShake::default();
        return;
    }

    let intensity = screen_shake.intensity * (screen_shake.duration / SHAKE_FADE).min(1.0);
    #[allow(clippy::cast_possible_truncation)]
    let max_offset = (intensity * 2.0) as i16;

    // Terminal cells are twice as tall as wide, so shake less vertically
    screen_shake.current_offset = (
        fastrand::i16(0..=max_offset) - max_offset / 2,
        fastrand::i16(0..=max_offset / 2) - max_offset / 4,
    );
}
