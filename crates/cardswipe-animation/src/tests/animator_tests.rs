use super::*;
use crate::factory::{create_exit_animator, create_snap_back_animator, ExitParams, SwipeDirection};
use crate::state::DEFAULT_EXIT_DISTANCE;
use cardswipe_core::{DefaultScheduler, Runtime};
use std::cell::Cell;
use std::sync::Arc;

const FRAME_NANOS: u64 = 16_000_000;

fn runtime() -> Runtime {
    Runtime::new(Arc::new(DefaultScheduler))
}

/// Drain frames while the animator runs. Returns the number of frames drained.
fn pump(runtime: &Runtime, animator: &InertialAnimator, max_frames: u64) -> u64 {
    let mut frame = 0;
    while animator.is_running() && frame < max_frames {
        frame += 1;
        runtime.drain_frame_callbacks(frame * FRAME_NANOS);
    }
    frame
}

fn counter() -> (Rc<Cell<u32>>, impl Fn()) {
    let count = Rc::new(Cell::new(0));
    let bump = {
        let count = Rc::clone(&count);
        move || count.set(count.get() + 1)
    };
    (count, bump)
}

#[test]
fn snap_back_completes_once_at_neutral() {
    let runtime = runtime();
    let animator =
        create_snap_back_animator(runtime.frame_clock(), Point::new(60.0, 0.0), Velocity::ZERO);
    let (completions, bump) = counter();
    animator.on_complete(bump);
    let frames = Rc::new(Cell::new(0));
    {
        let frames = Rc::clone(&frames);
        animator.on_frame(move |_| frames.set(frames.get() + 1));
    }

    let drained = pump(&runtime, &animator, 300);
    assert!(drained < 300);
    assert_eq!(completions.get(), 1);
    assert_eq!(frames.get() as u64, drained);
    assert_eq!(animator.phase(), AnimatorPhase::Stopped);
    assert_eq!(animator.state(), AnimationState::NEUTRAL);

    runtime.drain_frame_callbacks((drained + 1) * FRAME_NANOS);
    assert_eq!(completions.get(), 1);
    assert!(!runtime.handle().has_frame_callbacks());
}

#[test]
fn exit_crosses_threshold_before_completing() {
    let runtime = runtime();
    let animator = create_exit_animator(
        runtime.frame_clock(),
        Point::new(40.0, 0.0),
        Velocity::ZERO,
        SwipeDirection::Right,
        &ExitParams::default(),
    );
    let order = Rc::new(RefCell::new(Vec::new()));
    {
        let order = Rc::clone(&order);
        animator.on_threshold(move || order.borrow_mut().push("threshold"));
    }
    {
        let order = Rc::clone(&order);
        let animator_for_check = animator.clone();
        animator.on_complete(move || {
            assert!(animator_for_check.state().x >= DEFAULT_EXIT_DISTANCE);
            order.borrow_mut().push("complete");
        });
    }

    pump(&runtime, &animator, 200);
    assert_eq!(order.borrow().as_slice(), &["threshold", "complete"]);
}

#[test]
fn stop_suppresses_completion_and_frames() {
    let runtime = runtime();
    let animator =
        create_snap_back_animator(runtime.frame_clock(), Point::new(120.0, 0.0), Velocity::ZERO);
    let (completions, bump) = counter();
    animator.on_complete(bump);
    let frames = Rc::new(Cell::new(0));
    {
        let frames = Rc::clone(&frames);
        animator.on_frame(move |_| frames.set(frames.get() + 1));
    }

    runtime.drain_frame_callbacks(FRAME_NANOS);
    runtime.drain_frame_callbacks(2 * FRAME_NANOS);
    assert!(animator.stop());
    let position = animator.state().x;

    for frame in 3..20 {
        runtime.drain_frame_callbacks(frame * FRAME_NANOS);
    }
    assert_eq!(frames.get(), 2);
    assert_eq!(completions.get(), 0);
    assert_eq!(animator.state().x, position);
    assert_eq!(animator.phase(), AnimatorPhase::Stopped);
    assert!(!animator.stop());
}

#[test]
fn frame_listener_may_stop_the_animator() {
    let runtime = runtime();
    let animator =
        create_snap_back_animator(runtime.frame_clock(), Point::new(100.0, 0.0), Velocity::ZERO);
    let (completions, bump) = counter();
    animator.on_complete(bump);
    {
        let handle = animator.clone();
        animator.on_frame(move |state| {
            if state.x < 50.0 {
                handle.stop();
            }
        });
    }

    let drained = pump(&runtime, &animator, 300);
    assert!(drained < 300);
    assert_eq!(completions.get(), 0);
    assert!(animator.state().x < 50.0);
    assert!(animator.state().x > 0.0);
}

#[test]
fn completion_listener_may_start_the_next_run() {
    let runtime = runtime();
    let animator =
        create_snap_back_animator(runtime.frame_clock(), Point::new(30.0, 0.0), Velocity::ZERO);
    let (second_completions, bump) = counter();
    {
        let handle = animator.clone();
        animator.on_complete(move || {
            handle.on_complete(bump);
            handle.start(Point::new(-30.0, 0.0), Velocity::ZERO);
        });
    }

    pump(&runtime, &animator, 600);
    assert_eq!(second_completions.get(), 1);
    assert_eq!(animator.state().position(), Point::ZERO);
}

#[test]
fn manual_ticks_dispatch_listeners() {
    let runtime = runtime();
    let animator = InertialAnimator::new(runtime.frame_clock(), AnimationConfig::exit(100.0));
    let (completions, bump) = counter();
    animator.on_complete(bump);
    animator.start(Point::ZERO, Velocity::new(2_000.0, 0.0));

    let mut ticks = 0;
    while animator.is_running() && ticks < 50 {
        animator.tick(16.0);
        ticks += 1;
    }
    assert_eq!(completions.get(), 1);
    assert!(animator.state().x >= 100.0);
    assert!(!runtime.handle().has_frame_callbacks());
}

#[test]
fn launch_applies_config_before_starting() {
    let runtime = runtime();
    let animator = InertialAnimator::new(runtime.frame_clock(), AnimationConfig::inertia());
    let launch = crate::factory::exit_animation(
        Point::ZERO,
        Velocity::ZERO,
        SwipeDirection::Left,
        &ExitParams::default().with_exit_distance(200.0),
    );
    animator.launch(launch);
    assert_eq!(animator.config().exit_distance, Some(200.0));
    pump(&runtime, &animator, 200);
    assert!(animator.state().x <= -200.0);
}

#[test]
fn dropping_the_animator_cancels_its_frame_callback() {
    let runtime = runtime();
    let animator =
        create_snap_back_animator(runtime.frame_clock(), Point::new(80.0, 0.0), Velocity::ZERO);
    assert!(runtime.handle().has_frame_callbacks());
    drop(animator);
    assert!(!runtime.handle().has_frame_callbacks());
}
