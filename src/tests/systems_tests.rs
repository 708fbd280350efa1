#[cfg(test)]
mod tests {
    use bevy_ecs::prelude::*;
    use std::time::Duration;

    use crate::components::{Heading, TargetKind, TargetSpec};
    use crate::game::{Difficulty, REFERENCE_FRAME};
    use crate::session::{Session, SessionPhase, SessionUpdate};
    use crate::store::TargetStore;
    use crate::systems::{
        GameEvent, GameEvents, ShotOutcome, advance_targets, end_session, frame_scale,
        game_tick_system, quit_to_menu, resolve_shot, start_session, toggle_pause,
    };
    use crate::tests::test_utils::{create_test_world, place_target, target_at};
    use crate::timers::SessionTimers;

    fn drain(world: &mut World) -> Vec<GameEvent> {
        world.resource_mut::<GameEvents>().drain()
    }

    fn set_time(world: &mut World, seconds: u32) {
        world.resource_mut::<Session>().apply_update(SessionUpdate {
            time_remaining: Some(seconds),
            ..SessionUpdate::default()
        });
    }

    #[test]
    fn test_start_session() {
        let mut world = create_test_world();
        place_target(&mut world, TargetSpec::default(), Duration::ZERO);

        start_session(&mut world, Difficulty::Hard);

        let state = world.resource::<Session>().state();
        assert_eq!(state.phase(), SessionPhase::Playing);
        assert_eq!(state.time_remaining(), 45);
        assert!(world.contains_resource::<SessionTimers>());
        assert!(world.resource::<TargetStore>().is_empty());
        assert_eq!(drain(&mut world), vec![GameEvent::SessionStarted(Difficulty::Hard)]);
    }

    #[test]
    fn test_nothing_runs_before_start() {
        let mut world = create_test_world();
        game_tick_system(&mut world, Duration::from_secs(5));

        assert!(world.resource::<TargetStore>().is_empty());
        assert_eq!(world.resource::<Session>().state().time_remaining(), 60);
        assert!(drain(&mut world).is_empty());
    }

    #[test]
    fn test_spawns_after_one_interval() {
        let mut world = create_test_world();
        start_session(&mut world, Difficulty::Medium);
        drain(&mut world);

        game_tick_system(&mut world, Duration::from_millis(1499));
        assert!(world.resource::<TargetStore>().is_empty());

        game_tick_system(&mut world, Duration::from_millis(1));
        assert_eq!(world.resource::<TargetStore>().len(), 1);

        let spawned = drain(&mut world)
            .into_iter()
            .filter(|e| matches!(e, GameEvent::TargetSpawned { .. }))
            .count();
        assert_eq!(spawned, 1);
    }

    #[test]
    fn test_hard_spawns_every_second() {
        let mut world = create_test_world();
        start_session(&mut world, Difficulty::Hard);

        for _ in 0..3 {
            game_tick_system(&mut world, Duration::from_secs(1));
        }

        assert_eq!(world.resource::<TargetStore>().len(), 3);
        assert_eq!(world.resource::<Session>().state().time_remaining(), 42);
    }

    #[test]
    fn test_frame_scale() {
        assert!((frame_scale(REFERENCE_FRAME) - 2.0).abs() < 1e-4);
        assert!((frame_scale(Duration::from_secs(1)) - 120.0).abs() < 1e-2);
        assert!(frame_scale(Duration::ZERO).abs() < f32::EPSILON);
    }

    #[test]
    fn test_targets_move_by_heading() {
        let mut world = create_test_world();
        let right = place_target(&mut world, target_at(TargetKind::Outlaw, 100.0, 200.0, 100), Duration::ZERO);
        let left = place_target(
            &mut world,
            TargetSpec {
                direction: Some(Heading::Left),
                speed: Some(1.5),
                ..target_at(TargetKind::Bandit, 600.0, 200.0, 200)
            },
            Duration::ZERO,
        );

        advance_targets(&mut world, 2.0, Duration::from_millis(16));

        let store = world.resource::<TargetStore>();
        assert!((store.get(right.id).unwrap().x - 102.0).abs() < f32::EPSILON);
        assert!((store.get(left.id).unwrap().x - 597.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_offscreen_targets_are_evicted() {
        let mut world = create_test_world();
        let leaving = place_target(&mut world, target_at(TargetKind::Outlaw, 1299.0, 200.0, 100), Duration::ZERO);
        let on_edge = place_target(&mut world, target_at(TargetKind::Outlaw, 1298.0, 200.0, 100), Duration::ZERO);

        advance_targets(&mut world, 2.0, Duration::ZERO);

        let store = world.resource::<TargetStore>();
        assert!(store.get(leaving.id).is_none());
        // Exactly on the edge is still in range
        assert!(store.get(on_edge.id).is_some());
    }

    #[test]
    fn test_old_targets_are_evicted() {
        let mut world = create_test_world();
        let target = place_target(&mut world, target_at(TargetKind::Poster, 500.0, 200.0, 100), Duration::ZERO);

        advance_targets(&mut world, 0.0, Duration::from_millis(8000));
        assert!(world.resource::<TargetStore>().get(target.id).is_some());

        advance_targets(&mut world, 0.0, Duration::from_millis(8001));
        assert!(world.resource::<TargetStore>().get(target.id).is_none());
    }

    #[test]
    fn test_hit_targets_linger_for_grace_period() {
        let mut world = create_test_world();
        let target = place_target(&mut world, target_at(TargetKind::Bottle, 500.0, 200.0, 50), Duration::ZERO);
        world
            .resource_mut::<TargetStore>()
            .mark_hit(target.id, Duration::from_secs(1));

        advance_targets(&mut world, 2.0, Duration::from_millis(1100));
        let lingering = world.resource::<TargetStore>().get(target.id).cloned().unwrap();
        // Dying targets stop moving
        assert!((lingering.x - 500.0).abs() < f32::EPSILON);

        advance_targets(&mut world, 2.0, Duration::from_millis(1200));
        assert!(world.resource::<TargetStore>().get(target.id).is_none());
    }

    #[test]
    fn test_hit_scores_and_marks_target() {
        let mut world = create_test_world();
        start_session(&mut world, Difficulty::Medium);
        drain(&mut world);
        let target = place_target(&mut world, target_at(TargetKind::Outlaw, 100.0, 100.0, 150), Duration::ZERO);

        let outcome = resolve_shot(&mut world, 110.0, 110.0);

        assert_eq!(
            outcome,
            ShotOutcome::Hit {
                id: target.id,
                kind: TargetKind::Outlaw,
                award: 150
            }
        );
        let state = world.resource::<Session>().state();
        assert_eq!(state.score(), 150);
        assert_eq!(state.combo(), 1);
        assert_eq!(state.shots_hit(), 1);
        assert_eq!(state.shots_fired(), 1);
        assert!(world.resource::<TargetStore>().get(target.id).unwrap().is_hit);

        match drain(&mut world).as_slice() {
            [GameEvent::TargetHit { id, award, combo, .. }] => {
                assert_eq!(*id, target.id);
                assert_eq!(*award, 150);
                assert_eq!(*combo, 1);
            }
            other => panic!("Unexpected events: {other:?}"),
        }
    }

    #[test]
    fn test_second_shot_at_dying_target_misses() {
        let mut world = create_test_world();
        start_session(&mut world, Difficulty::Medium);
        place_target(&mut world, target_at(TargetKind::Outlaw, 100.0, 100.0, 150), Duration::ZERO);

        resolve_shot(&mut world, 110.0, 110.0);
        let outcome = resolve_shot(&mut world, 110.0, 110.0);

        assert_eq!(outcome, ShotOutcome::Miss);
        let state = world.resource::<Session>().state();
        assert_eq!(state.score(), 150);
        assert_eq!(state.combo(), 0);
        assert_eq!(state.shots_fired(), 2);
        assert_eq!(state.shots_hit(), 1);
        assert_eq!(state.accuracy(), 50);
    }

    #[test]
    fn test_shooting_the_sheriff() {
        let mut world = create_test_world();
        start_session(&mut world, Difficulty::Hard);
        world.resource_mut::<Session>().apply_update(SessionUpdate {
            score: Some(500),
            combo: Some(3),
            ..SessionUpdate::default()
        });
        drain(&mut world);
        place_target(&mut world, target_at(TargetKind::Sheriff, 300.0, 300.0, -100), Duration::ZERO);

        resolve_shot(&mut world, 320.0, 320.0);

        let state = world.resource::<Session>().state();
        assert_eq!(state.score(), 200);
        assert_eq!(state.combo(), 0);
        assert_eq!(state.shots_hit(), 0);
        assert_eq!(state.shots_fired(), 1);
        assert!(matches!(
            drain(&mut world).as_slice(),
            [GameEvent::SheriffShot { penalty: -300, .. }]
        ));
    }

    #[test]
    fn test_miss_resets_combo() {
        let mut world = create_test_world();
        start_session(&mut world, Difficulty::Easy);
        world.resource_mut::<Session>().apply_update(SessionUpdate {
            combo: Some(4),
            ..SessionUpdate::default()
        });
        drain(&mut world);

        assert_eq!(resolve_shot(&mut world, 600.0, 300.0), ShotOutcome::Miss);

        let state = world.resource::<Session>().state();
        assert_eq!(state.combo(), 0);
        assert_eq!(state.shots_fired(), 1);
        assert_eq!(state.accuracy(), 0);
        assert_eq!(drain(&mut world), vec![GameEvent::Miss { x: 600.0, y: 300.0 }]);
    }

    #[test]
    fn test_shots_ignored_without_running_session() {
        let mut world = create_test_world();
        place_target(&mut world, target_at(TargetKind::Outlaw, 100.0, 100.0, 100), Duration::ZERO);
        assert_eq!(resolve_shot(&mut world, 110.0, 110.0), ShotOutcome::Ignored);

        start_session(&mut world, Difficulty::Medium);
        assert!(toggle_pause(&mut world));
        assert_eq!(resolve_shot(&mut world, 110.0, 110.0), ShotOutcome::Ignored);
        assert_eq!(world.resource::<Session>().state().shots_fired(), 0);
    }

    #[test]
    fn test_pause_stops_only_the_countdown() {
        let mut world = create_test_world();
        start_session(&mut world, Difficulty::Hard);
        let target = place_target(&mut world, target_at(TargetKind::Outlaw, 400.0, 200.0, 100), Duration::ZERO);

        assert!(toggle_pause(&mut world));
        for _ in 0..3 {
            game_tick_system(&mut world, Duration::from_secs(1));
        }

        // Spawning and movement carry on while the countdown holds
        let timers = world.resource::<SessionTimers>();
        assert_eq!(timers.clock, Duration::from_secs(3));
        assert_eq!(timers.countdown_clock, Duration::ZERO);
        assert_eq!(world.resource::<Session>().state().time_remaining(), 45);
        let store = world.resource::<TargetStore>();
        assert_eq!(store.len(), 4);
        let moved = store.get(target.id).unwrap().x;
        assert!((moved - (400.0 + 3.0 * frame_scale(Duration::from_secs(1)))).abs() < 0.1);

        // Shots are still refused until the pause lifts
        assert_eq!(resolve_shot(&mut world, moved, 200.0), ShotOutcome::Ignored);

        assert!(!toggle_pause(&mut world));
        game_tick_system(&mut world, Duration::from_secs(1));
        assert_eq!(world.resource::<Session>().state().time_remaining(), 44);
        assert_eq!(world.resource::<SessionTimers>().countdown_clock, Duration::from_secs(1));
    }

    #[test]
    fn test_toggle_pause_without_session() {
        let mut world = create_test_world();
        assert!(!toggle_pause(&mut world));
        assert_eq!(world.resource::<Session>().state().phase(), SessionPhase::Idle);
        assert!(drain(&mut world).is_empty());
    }

    #[test]
    fn test_countdown_warnings() {
        let mut world = create_test_world();
        start_session(&mut world, Difficulty::Easy);
        set_time(&mut world, 12);
        drain(&mut world);

        game_tick_system(&mut world, Duration::from_secs(1));
        assert!(
            !drain(&mut world)
                .iter()
                .any(|e| matches!(e, GameEvent::CountdownWarning(_)))
        );

        game_tick_system(&mut world, Duration::from_secs(1));
        assert!(drain(&mut world).contains(&GameEvent::CountdownWarning(10)));
    }

    #[test]
    fn test_countdown_expiry_ends_session() {
        let mut world = create_test_world();
        start_session(&mut world, Difficulty::Hard);

        for _ in 0..45 {
            game_tick_system(&mut world, Duration::from_secs(1));
        }

        let state = world.resource::<Session>().state();
        assert_eq!(state.phase(), SessionPhase::Ended);
        assert_eq!(state.time_remaining(), 0);
        assert!(!world.contains_resource::<SessionTimers>());
        assert!(world.resource::<TargetStore>().is_empty());
        assert!(drain(&mut world).iter().any(|e| matches!(e, GameEvent::SessionEnded { .. })));

        // Nothing fires once the session is over
        game_tick_system(&mut world, Duration::from_secs(10));
        assert!(world.resource::<TargetStore>().is_empty());
        assert!(drain(&mut world).is_empty());
    }

    #[test]
    fn test_end_session_reports_new_high_score() {
        let mut world = create_test_world();
        start_session(&mut world, Difficulty::Medium);
        world.resource_mut::<Session>().apply_update(SessionUpdate {
            score: Some(1200),
            ..SessionUpdate::default()
        });
        drain(&mut world);

        end_session(&mut world);

        assert_eq!(
            drain(&mut world),
            vec![GameEvent::SessionEnded {
                score: 1200,
                new_high_score: true
            }]
        );
        assert_eq!(world.resource::<Session>().state().high_score(), 1200);
    }

    #[test]
    fn test_restart_discards_previous_range() {
        let mut world = create_test_world();
        start_session(&mut world, Difficulty::Hard);
        for _ in 0..3 {
            game_tick_system(&mut world, Duration::from_secs(1));
        }
        assert_eq!(world.resource::<TargetStore>().len(), 3);

        start_session(&mut world, Difficulty::Easy);

        assert!(world.resource::<TargetStore>().is_empty());
        assert_eq!(world.resource::<SessionTimers>().clock, Duration::ZERO);
        assert_eq!(world.resource::<Session>().state().time_remaining(), 90);
    }

    #[test]
    fn test_quit_to_menu() {
        let mut world = create_test_world();
        start_session(&mut world, Difficulty::Medium);
        game_tick_system(&mut world, Duration::from_millis(1500));

        quit_to_menu(&mut world);

        assert_eq!(world.resource::<Session>().state().phase(), SessionPhase::Idle);
        assert!(!world.contains_resource::<SessionTimers>());
        assert!(world.resource::<TargetStore>().is_empty());
    }
}
