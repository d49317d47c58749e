use super::*;
use cardswipe_core::ManualClock;

fn predictor() -> GesturePredictor {
    GesturePredictor::new(Rc::new(ManualClock::new()))
}

/// Linear drag from the origin to `(dx, 0)` in `steps` samples spaced `step_ms`.
fn drag(predictor: &mut GesturePredictor, dx: f32, steps: u32, step_ms: f64) -> f64 {
    predictor.start_at(0.0, 0.0, 0.0);
    for step in 1..=steps {
        let t = step as f64 * step_ms;
        predictor.update_at(dx * step as f32 / steps as f32, 0.0, t);
    }
    steps as f64 * step_ms
}

#[test]
fn end_without_gesture_is_none() {
    let mut predictor = predictor();
    assert_eq!(predictor.end_at(10.0), None);

    predictor.start_at(0.0, 0.0, 0.0);
    assert!(predictor.end_at(5.0).is_some());
    assert_eq!(predictor.end_at(6.0), None);
    assert!(!predictor.is_active());
}

#[test]
fn update_reports_deltas_with_provisional_cancel() {
    let mut predictor = predictor();
    predictor.start_at(10.0, 20.0, 0.0);
    let state = predictor.update_at(40.0, 15.0, 16.0);
    assert_eq!(state.delta_x, 30.0);
    assert_eq!(state.delta_y, -5.0);
    assert_eq!(state.intent, GestureIntent::Cancel);
    assert!(state.velocity_x > 0.0);
    assert!(state.velocity_y < 0.0);
}

#[test]
fn short_quick_press_is_a_tap() {
    let mut predictor = predictor();
    predictor.start_at(0.0, 0.0, 0.0);
    predictor.update_at(5.0, 3.0, 50.0);
    let state = predictor.end_at(120.0).expect("active gesture");
    assert_eq!(state.intent, GestureIntent::Tap);
}

#[test]
fn wandering_press_is_not_a_tap() {
    let mut predictor = predictor();
    predictor.start_at(0.0, 0.0, 0.0);
    predictor.update_at(45.0, 0.0, 40.0);
    predictor.update_at(2.0, 0.0, 80.0);
    // Back near the origin, but the path already ruled out a tap.
    let state = predictor.end_at(200.0).expect("active gesture");
    assert_ne!(state.intent, GestureIntent::Tap);
}

#[test]
fn long_press_without_movement_cancels() {
    let mut predictor = predictor();
    predictor.start_at(0.0, 0.0, 0.0);
    predictor.update_at(2.0, 0.0, 200.0);
    let state = predictor.end_at(400.0).expect("active gesture");
    assert_eq!(state.intent, GestureIntent::Cancel);
    assert_eq!(state.velocity(), Velocity::ZERO);
}

#[test]
fn slow_long_drag_swipes_by_distance() {
    let mut predictor = predictor();
    // 150px over 600ms is 250px/s, below the velocity threshold.
    let released = drag(&mut predictor, 150.0, 30, 20.0);
    let state = predictor.end_at(released).expect("active gesture");
    assert!(state.speed() < SWIPE_VELOCITY_THRESHOLD);
    assert_eq!(state.delta_x, 150.0);
    assert_eq!(state.intent, GestureIntent::Swipe);
}

#[test]
fn short_fast_flick_swipes_by_velocity() {
    let mut predictor = predictor();
    // 60px in 50ms is 1200px/s.
    let released = drag(&mut predictor, 60.0, 5, 10.0);
    let state = predictor.end_at(released + 5.0).expect("active gesture");
    assert!((state.velocity_x - 1_200.0).abs() < 1.0, "got {}", state.velocity_x);
    assert_eq!(state.intent, GestureIntent::Swipe);
}

#[test]
fn pause_before_release_zeroes_velocity() {
    let mut predictor = predictor();
    let released = drag(&mut predictor, 60.0, 5, 10.0);
    let state = predictor
        .end_at(released + ASSUME_STOPPED_MS + 10.0)
        .expect("active gesture");
    assert_eq!(state.velocity(), Velocity::ZERO);
    assert_eq!(state.delta_x, 60.0);
    assert_eq!(state.intent, GestureIntent::Cancel);
}

#[test]
fn deltas_survive_a_long_pause() {
    let mut predictor = predictor();
    let released = drag(&mut predictor, 150.0, 10, 10.0);
    let state = predictor.end_at(released + 1_000.0).expect("active gesture");
    assert_eq!(state.delta_x, 150.0);
    assert_eq!(state.intent, GestureIntent::Swipe);
}

#[test]
fn velocity_is_capped() {
    let mut predictor = predictor();
    // 200px per 10ms is 20000px/s.
    predictor.start_at(0.0, 0.0, 0.0);
    let state = predictor.update_at(200.0, 0.0, 10.0);
    assert_eq!(state.velocity_x, MAX_FLING_VELOCITY);
}

#[test]
fn window_keeps_only_recent_samples() {
    let mut predictor = predictor();
    drag(&mut predictor, 300.0, 30, 10.0);
    let newest = 300.0;
    let window: Vec<f64> = predictor.window().map(|s| s.timestamp_ms).collect();
    assert!(window.iter().all(|t| newest - t <= HORIZON_MS));
    assert_eq!(window.first().copied(), Some(200.0));
    assert_eq!(window.last().copied(), Some(newest));
}

#[test]
fn cancel_discards_the_gesture() {
    let mut predictor = predictor();
    drag(&mut predictor, 200.0, 5, 10.0);
    predictor.cancel();
    assert!(!predictor.is_active());
    assert_eq!(predictor.window().count(), 0);
    assert_eq!(predictor.end_at(60.0), None);
}

#[test]
fn update_without_start_begins_a_gesture() {
    let mut predictor = predictor();
    let state = predictor.update_at(12.0, 4.0, 0.0);
    assert_eq!(state, GestureState::default());
    assert_eq!(predictor.origin(), Some(GestureSample::new(12.0, 4.0, 0.0)));
}

#[test]
fn clock_timestamps_samples() {
    let clock = ManualClock::new();
    let mut predictor = GesturePredictor::new(Rc::new(clock.clone()));
    predictor.start(0.0, 0.0);
    clock.advance(10.0);
    predictor.update(8.0, 0.0);
    clock.advance(10.0);
    let state = predictor.update(16.0, 0.0);
    assert!((state.velocity_x - 800.0).abs() < 1.0, "got {}", state.velocity_x);

    clock.advance(60.0);
    let state = predictor.end().expect("active gesture");
    assert_eq!(state.intent, GestureIntent::Tap);
}

#[test]
fn custom_thresholds_apply() {
    let thresholds = PredictorThresholds::default().with_swipe_distance(40.0);
    let mut predictor = predictor().with_thresholds(thresholds);
    let released = drag(&mut predictor, 50.0, 20, 20.0);
    let state = predictor.end_at(released + 100.0).expect("active gesture");
    assert_eq!(state.intent, GestureIntent::Swipe);
}

#[test]
fn classification_is_monotonic_in_distance_and_speed() {
    let thresholds = PredictorThresholds::default();
    let distances = [0.0, 50.0, 99.0, 100.0, 101.0, 250.0, 600.0];
    let speeds = [0.0, 200.0, 499.0, 500.0, 501.0, 3_000.0];
    // Outside the tap window so only the swipe rule is in play.
    let elapsed = 400.0;

    for (i, &distance) in distances.iter().enumerate() {
        for (j, &speed) in speeds.iter().enumerate() {
            if thresholds.classify(distance, speed, elapsed) != GestureIntent::Swipe {
                continue;
            }
            for &larger_distance in &distances[i..] {
                for &larger_speed in &speeds[j..] {
                    assert_eq!(
                        thresholds.classify(larger_distance, larger_speed, elapsed),
                        GestureIntent::Swipe,
                        "({larger_distance}, {larger_speed}) dominates ({distance}, {speed})"
                    );
                }
            }
        }
    }

    // Out to 150px and back to 10px: 290px travelled, 10px net.
    let mut predictor = predictor();
    predictor.start_at(0.0, 0.0, 0.0);
    let mut t = 0.0;
    let outward = (1..=15).map(|step| step as f32 * 10.0);
    let inward = (1..=14).rev().map(|step| step as f32 * 10.0);
    for x in outward.chain(inward) {
        t += 100.0;
        predictor.update_at(x, 0.0, t);
    }
    assert!((predictor.path_length() - 290.0).abs() < 1e-3);
    let state = predictor.end_at(t).expect("active gesture");
    assert_eq!(state.delta_x, 10.0);
    assert!(state.speed() < SWIPE_VELOCITY_THRESHOLD);
    assert_eq!(state.intent, GestureIntent::Swipe);
}

#[test]
fn path_length_accumulates_every_segment() {
    let mut predictor = predictor();
    predictor.start_at(0.0, 0.0, 0.0);
    predictor.update_at(3.0, 4.0, 10.0);
    predictor.update_at(0.0, 0.0, 20.0);
    assert_eq!(predictor.path_length(), 10.0);

    predictor.start_at(0.0, 0.0, 30.0);
    assert_eq!(predictor.path_length(), 0.0);
}

#[test]
fn faster_releases_never_downgrade_a_swipe() {
    let mut seen_swipe = false;
    for steps in (2..=20).rev() {
        let mut predictor = predictor();
        // Same 80px path, shorter duration each time.
        let released = drag(&mut predictor, 80.0, steps, 10.0);
        let intent = predictor
            .end_at(released)
            .expect("active gesture")
            .intent;
        if seen_swipe {
            assert_eq!(intent, GestureIntent::Swipe, "downgraded at {steps} steps");
        }
        seen_swipe |= intent == GestureIntent::Swipe;
    }
    assert!(seen_swipe);
}
