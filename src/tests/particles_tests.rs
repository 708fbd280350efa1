#[cfg(test)]
mod tests {
    use bevy_ecs::prelude::*;

    use crate::components::{Particle, ScreenShake, TargetKind};
    use crate::particles::{
        clear_particles, spawn_hit_sparks, spawn_muzzle_flash, spawn_ricochet_dust,
        spawn_sheriff_smoke, update_particles,
    };
    use crate::screenshake::{trigger_screen_shake, update_screen_shake};
    use crate::tests::test_utils::create_test_world;

    fn particle_count(world: &mut World) -> usize {
        world.query::<&Particle>().iter(world).count()
    }

    #[test]
    fn test_hit_sparks_shake_the_screen() {
        let mut world = create_test_world();
        spawn_hit_sparks(&mut world, (300.0, 200.0), TargetKind::Bandit, 400);

        assert!(particle_count(&mut world) >= 10);
        let shake = world.resource::<ScreenShake>();
        assert!(shake.is_active);
        assert!(shake.intensity > 0.8);
    }

    #[test]
    fn test_bigger_awards_throw_more_sparks() {
        let mut small = create_test_world();
        spawn_hit_sparks(&mut small, (0.0, 0.0), TargetKind::Bottle, 50);
        let mut big = create_test_world();
        spawn_hit_sparks(&mut big, (0.0, 0.0), TargetKind::Bandit, 600);

        assert!(particle_count(&mut big) > particle_count(&mut small));
    }

    #[test]
    fn test_particles_expire() {
        let mut world = create_test_world();
        spawn_muzzle_flash(&mut world, 10.0, 10.0);
        spawn_sheriff_smoke(&mut world, (50.0, 50.0));
        spawn_ricochet_dust(&mut world, 90.0, 90.0);
        assert!(particle_count(&mut world) > 0);

        update_particles(&mut world, 0.01);
        assert!(particle_count(&mut world) > 0);

        // Longer than any particle lives
        update_particles(&mut world, 2.0);
        assert_eq!(particle_count(&mut world), 0);
    }

    #[test]
    fn test_particles_fall() {
        let mut world = create_test_world();
        spawn_sheriff_smoke(&mut world, (100.0, 100.0));
        let before: Vec<f32> = world
            .query::<&Particle>()
            .iter(&world)
            .map(|p| p.velocity.1)
            .collect();

        update_particles(&mut world, 0.05);

        let after: Vec<f32> = world
            .query::<&Particle>()
            .iter(&world)
            .map(|p| p.velocity.1)
            .collect();
        assert_eq!(before.len(), after.len());
        for (old, new) in before.iter().zip(&after) {
            assert!(new > &(old * 0.92));
        }
    }

    #[test]
    fn test_clear_particles() {
        let mut world = create_test_world();
        spawn_ricochet_dust(&mut world, 0.0, 0.0);
        clear_particles(&mut world);
        assert_eq!(particle_count(&mut world), 0);
    }

    #[test]
    fn test_weaker_shake_keeps_stronger() {
        let mut world = create_test_world();
        trigger_screen_shake(&mut world, 2.0, 0.3);
        trigger_screen_shake(&mut world, 1.0, 0.1);

        let shake = world.resource::<ScreenShake>();
        assert!((shake.intensity - 2.0).abs() < f32::EPSILON);
        assert!((shake.duration - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_shake_wears_off() {
        let mut world = create_test_world();
        trigger_screen_shake(&mut world, 2.0, 0.25);

        update_screen_shake(&mut world, 0.1);
        assert!(world.resource::<ScreenShake>().is_active);

        update_screen_shake(&mut world, 0.2);
        let shake = world.resource::<ScreenShake>();
        assert!(!shake.is_active);
        assert_eq!(shake.current_offset, (0, 0));
    }
}
