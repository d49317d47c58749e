use cardswipe_animation::{
    apply_friction_decay, exit_animation, integrate_spring, snap_back_animation, AnimationRun,
    ExitParams, SpringParams, SwipeDirection,
};
use cardswipe_ui_graphics::{Point, Velocity};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn friction_step(c: &mut Criterion) {
    c.bench_function("friction_step", |b| {
        b.iter(|| apply_friction_decay(black_box(120.0), black_box(1_800.0), 16.0, 0.998));
    });
}

fn spring_step(c: &mut Criterion) {
    let params = SpringParams::SNAP_BACK;
    c.bench_function("spring_step_16ms", |b| {
        b.iter(|| integrate_spring(black_box(60.0), black_box(-300.0), 0.0, &params, 16.0));
    });
}

fn full_runs(c: &mut Criterion) {
    c.bench_function("snap_back_run_to_rest", |b| {
        b.iter(|| {
            let launch =
                snap_back_animation(Point::new(60.0, 0.0), Velocity::ZERO, SpringParams::SNAP_BACK);
            let mut run = AnimationRun::new(launch.config);
            run.start(launch.from, launch.velocity);
            while !run.tick(16.0).finished {}
            black_box(*run.state())
        });
    });

    c.bench_function("exit_run_to_edge", |b| {
        b.iter(|| {
            let launch = exit_animation(
                Point::new(140.0, 0.0),
                Velocity::new(900.0, 0.0),
                SwipeDirection::Right,
                &ExitParams::default(),
            );
            let mut run = AnimationRun::new(launch.config);
            run.start(launch.from, launch.velocity);
            while !run.tick(16.0).finished {}
            black_box(*run.state())
        });
    });
}

criterion_group!(benches, friction_step, spring_step, full_runs);
criterion_main!(benches);
