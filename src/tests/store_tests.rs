#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::components::{Heading, TargetId, TargetKind, TargetSpec};
    use crate::game::Playfield;
    use crate::store::TargetStore;
    use crate::tests::test_utils::target_at;

    fn seeded_store() -> TargetStore {
        TargetStore::with_rng(Playfield::default(), fastrand::Rng::with_seed(42))
    }

    #[test]
    fn test_create_fills_defaults() {
        let mut store = seeded_store();
        let now = Duration::from_millis(1234);

        let target = store.create(TargetSpec::default(), now);

        assert_eq!(target.id, TargetId(1));
        assert_eq!(target.kind, TargetKind::Outlaw);
        assert!((target.speed - 1.0).abs() < f32::EPSILON);
        assert_eq!(target.points, 100);
        assert!(!target.is_hit);
        assert_eq!(target.hit_at, None);
        assert_eq!(target.created_at, now);
        assert!((0.0..1200.0).contains(&target.x));
        assert!((0.0..600.0).contains(&target.y));
    }

    #[test]
    fn test_create_keeps_explicit_fields() {
        let mut store = seeded_store();
        let spec = TargetSpec {
            kind: Some(TargetKind::Sheriff),
            x: Some(-100.0),
            y: Some(200.0),
            speed: Some(1.2),
            points: Some(-100),
            direction: Some(Heading::Left),
            created_at: Some(Duration::from_secs(3)),
        };

        let target = store.create(spec, Duration::from_secs(10));

        assert_eq!(target.kind, TargetKind::Sheriff);
        assert!((target.x + 100.0).abs() < f32::EPSILON);
        assert!((target.y - 200.0).abs() < f32::EPSILON);
        assert_eq!(target.points, -100);
        assert_eq!(target.direction, Heading::Left);
        assert_eq!(target.created_at, Duration::from_secs(3));
        assert_eq!(store.get(target.id), Some(&target));
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut store = seeded_store();
        let first = store.create(TargetSpec::default(), Duration::ZERO).id;
        let second = store.create(TargetSpec::default(), Duration::ZERO).id;
        assert!(second > first);

        store.clear();
        assert!(store.is_empty());

        let third = store.create(TargetSpec::default(), Duration::ZERO).id;
        assert!(third > second);
    }

    #[test]
    fn test_list_is_ordered_by_id() {
        let mut store = seeded_store();
        for _ in 0..5 {
            store.create(TargetSpec::default(), Duration::ZERO);
        }

        let ids: Vec<u64> = store.list().iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_update_position() {
        let mut store = seeded_store();
        let target = store.create(target_at(TargetKind::Bottle, 10.0, 200.0, 50), Duration::ZERO);

        let moved = store.update_position(target.id, 42.0).expect("target exists");
        assert!((moved.x - 42.0).abs() < f32::EPSILON);
        assert!((moved.y - 200.0).abs() < f32::EPSILON);

        assert_eq!(store.update_position(TargetId(999), 1.0), None);
    }

    #[test]
    fn test_mark_hit_only_once() {
        let mut store = seeded_store();
        let target = store.create(TargetSpec::default(), Duration::ZERO);
        let now = Duration::from_millis(500);

        let hit = store.mark_hit(target.id, now).expect("first hit lands");
        assert!(hit.is_hit);
        assert_eq!(hit.hit_at, Some(now));

        // A dying target can't be scored again
        assert_eq!(store.mark_hit(target.id, Duration::from_millis(600)), None);
        assert_eq!(store.get(target.id).and_then(|t| t.hit_at), Some(now));

        assert_eq!(store.mark_hit(TargetId(999), now), None);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut store = seeded_store();
        let target = store.create(TargetSpec::default(), Duration::ZERO);

        assert!(store.remove(target.id));
        assert!(!store.remove(target.id));
        assert!(store.get(target.id).is_none());
    }

    #[test]
    fn test_retain_reports_removed_ids() {
        let mut store = seeded_store();
        let keep = store.create(target_at(TargetKind::Outlaw, 100.0, 200.0, 100), Duration::ZERO);
        let drop = store.create(target_at(TargetKind::Bottle, 900.0, 200.0, 50), Duration::ZERO);

        let removed = store.retain(|target| {
            target.x += 1.0;
            target.x < 500.0
        });

        assert_eq!(removed, vec![drop.id]);
        let kept = store.get(keep.id).expect("kept target");
        assert!((kept.x - 101.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_target_at_prefers_newest_live_target() {
        let mut store = seeded_store();
        let older = store.create(target_at(TargetKind::Outlaw, 100.0, 100.0, 100), Duration::ZERO);
        let newer = store.create(target_at(TargetKind::Bottle, 120.0, 110.0, 50), Duration::ZERO);

        // Inside both hit boxes
        assert_eq!(store.target_at(130.0, 120.0), Some(newer.id));
        // Only inside the older one
        assert_eq!(store.target_at(105.0, 105.0), Some(older.id));

        store.mark_hit(newer.id, Duration::ZERO);
        assert_eq!(store.target_at(130.0, 120.0), Some(older.id));

        assert_eq!(store.target_at(1000.0, 500.0), None);
    }

    #[test]
    fn test_hit_box_edges() {
        let mut store = seeded_store();
        store.create(target_at(TargetKind::Outlaw, 100.0, 100.0, 100), Duration::ZERO);

        assert!(store.target_at(100.0, 100.0).is_some());
        assert!(store.target_at(147.9, 147.9).is_some());
        assert!(store.target_at(148.0, 120.0).is_none());
        assert!(store.target_at(99.9, 120.0).is_none());
    }
}
