use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use motion_core::geometry::{
    infer_y_from_x, normalize_angle, snap_to_cardinals, snapped_components,
};
use motion_core::{Direction, MotionConfig, MotionError, MovementType, Mover, Position};
use proptest::prelude::*;

// -- Strategy helpers --

fn arb_movement_type() -> impl Strategy<Value = MovementType> {
    prop_oneof![Just(MovementType::Stairstep), Just(MovementType::Smooth)]
}

fn arb_magnitude() -> impl Strategy<Value = f64> {
    prop_oneof![
        1 => Just(0.0),
        1 => Just(1.0),
        6 => 0.0..=1.0f64,
    ]
}

/// Frames that mostly turn gently, with occasional sharp turns and stops.
fn arb_frames() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-10.0..10.0f64, arb_magnitude()), 1..200)
}

fn arb_config() -> impl Strategy<Value = MotionConfig> {
    (2.0..8.0f64, 0.75..1.5f64).prop_map(|(ramp, threshold)| {
        MotionConfig::new()
            .with_correction_ramp(ramp)
            .with_drift_threshold(threshold)
    })
}

fn mover(kind: MovementType, config: MotionConfig) -> Mover {
    let mut mover = Mover::with_config(0.0, 0.0, config).unwrap();
    mover.set_movement_type(kind);
    mover
}

proptest! {
    #[test]
    fn consecutive_positions_never_skip_a_pixel(
        kind in arb_movement_type(),
        config in arb_config(),
        frames in arb_frames(),
    ) {
        let mut mover = mover(kind, config);
        let mut previous = mover.position();
        for (angle, magnitude) in frames {
            mover.move_by_vector(angle, magnitude).unwrap();
            let current = mover.position();
            prop_assert!(
                current.chebyshev_distance(previous) <= 1,
                "{previous} -> {current} moving {magnitude} at {angle}"
            );
            previous = current;
        }
    }

    #[test]
    fn gentle_turns_never_skip_a_pixel(
        config in arb_config(),
        start in 0.0..TAU,
        turns in prop::collection::vec((-0.3..0.3f64, 0.0..=1.0f64), 1..200),
    ) {
        let mut mover = mover(MovementType::Smooth, config);
        let mut previous = mover.position();
        let mut angle = start;
        for (turn, magnitude) in turns {
            angle += turn;
            mover.move_by_vector(angle, magnitude).unwrap();
            let current = mover.position();
            prop_assert!(current.chebyshev_distance(previous) <= 1);
            previous = current;
        }
    }

    #[test]
    fn straight_runs_never_staircase(
        angle in 0.0..TAU,
        magnitudes in prop::collection::vec(0.01..=1.0f64, 1..200),
    ) {
        let mut mover = mover(MovementType::Smooth, MotionConfig::default());
        let snapped = snap_to_cardinals(normalize_angle(angle));
        let mut secondary: BTreeMap<i32, i32> = BTreeMap::new();

        for magnitude in magnitudes {
            mover.move_by_vector(angle, magnitude).unwrap();
            let Position { x, y } = mover.position();
            let (dominant, inferred) = if infer_y_from_x(snapped) {
                (x, y)
            } else {
                (y, x)
            };
            let seen = *secondary.entry(dominant).or_insert(inferred);
            prop_assert_eq!(seen, inferred, "two values at {}", dominant);
        }
    }

    #[test]
    fn movement_within_a_quadrant_is_monotonic(
        kind in arb_movement_type(),
        config in arb_config(),
        quadrant in 0u8..4,
        frames in prop::collection::vec((0.01..FRAC_PI_2 - 0.01, 0.0..=1.0f64), 1..150),
    ) {
        let base = f64::from(quadrant) * FRAC_PI_2;
        let (sign_x, sign_y) = match quadrant {
            0 => (1, 1),
            1 => (-1, 1),
            2 => (-1, -1),
            _ => (1, -1),
        };

        let mut mover = mover(kind, config);
        let mut previous = mover.position();
        for (offset, magnitude) in frames {
            mover.move_by_vector(base + offset, magnitude).unwrap();
            let current = mover.position();
            let (dx, dy) = (current.x - previous.x, current.y - previous.y);
            prop_assert!(dx * sign_x >= 0, "x reversed: {previous} -> {current}");
            prop_assert!(dy * sign_y >= 0, "y reversed: {previous} -> {current}");
            previous = current;
        }
    }

    #[test]
    fn fixed_angle_never_backtracks(
        kind in arb_movement_type(),
        angle in 0.0..TAU,
        magnitudes in prop::collection::vec(0.0..=1.0f64, 1..200),
    ) {
        let (cos, sin) = snapped_components(snap_to_cardinals(normalize_angle(angle)));
        let mut mover = mover(kind, MotionConfig::default());
        let mut previous = mover.position();
        for magnitude in magnitudes {
            mover.move_by_vector(angle, magnitude).unwrap();
            let current = mover.position();
            prop_assert!(f64::from(current.x - previous.x) * cos >= 0.0);
            prop_assert!(f64::from(current.y - previous.y) * sin >= 0.0);
            previous = current;
        }
    }

    #[test]
    fn predicted_positions_match_moves(
        kind in arb_movement_type(),
        frames in prop::collection::vec((-2.0..2.0f64, -2.0..2.0f64, any::<bool>()), 1..100),
    ) {
        let mut mover = mover(kind, MotionConfig::default());
        for (a, b, as_vector) in frames {
            if as_vector {
                let px = mover.x_if_moved_by_vector(a, b).unwrap();
                let py = mover.y_if_moved_by_vector(a, b).unwrap();
                mover.move_by_vector(a, b).unwrap();
                prop_assert_eq!((mover.x(), mover.y()), (px, py));
            } else {
                let px = mover.x_if_moved_by_magnitudes(a, b).unwrap();
                let py = mover.y_if_moved_by_magnitudes(a, b).unwrap();
                mover.move_by_magnitudes(a, b).unwrap();
                prop_assert_eq!((mover.x(), mover.y()), (px, py));
            }
        }
    }

    #[test]
    fn moves_near_the_range_edge_fail_cleanly(
        kind in arb_movement_type(),
        gap in 0..16i32,
        frames in arb_frames(),
    ) {
        let start = f64::from(i32::MAX - gap);
        let mut mover = Mover::new(start, -start).unwrap();
        mover.set_movement_type(kind);
        for (angle, magnitude) in frames {
            let before = mover.snapshot();
            if let Err(err) = mover.move_by_vector(angle, 4.0 * magnitude) {
                prop_assert!(matches!(err, MotionError::OutOfRange { .. }), "expected OutOfRange, got {:?}", err);
                prop_assert_eq!(mover.snapshot(), before);
            }
            let Position { x, y } = mover.position();
            let inside = i32::MIN + 1..i32::MAX;
            prop_assert!(inside.contains(&x) && inside.contains(&y));
        }
    }

    #[test]
    fn zero_moves_hold_position(
        kind in arb_movement_type(),
        frames in arb_frames(),
        angles in prop::collection::vec(-10.0..10.0f64, 1..10),
    ) {
        let mut mover = mover(kind, MotionConfig::default());
        for (angle, magnitude) in frames {
            mover.move_by_vector(angle, magnitude).unwrap();
        }
        let settled = mover.position();
        for angle in angles {
            mover.move_by_vector(angle, 0.0).unwrap();
            prop_assert_eq!(mover.position(), settled);
        }
    }

    #[test]
    fn cardinal_exactness_is_insensitive_to_tuning(
        config in arb_config(),
        dir_index in 0usize..8,
    ) {
        let dir = Direction::ALL[dir_index];
        let mut mover = mover(MovementType::Smooth, config);
        for _ in 0..300 {
            mover.move_by_vector(dir.angle(), 1.0).unwrap();
        }
        let (dx, dy) = dir.delta();
        let reach = if dx != 0 && dy != 0 { 212 } else { 300 };
        prop_assert_eq!(mover.position(), Position::new(dx * reach, dy * reach));
    }
}
