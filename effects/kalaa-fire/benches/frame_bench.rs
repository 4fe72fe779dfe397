use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kalaa_fire::{
    FireConfig, FireEngine, FrameClock, ManualScheduler, RasterSurface, RecordingSurface,
    SurfaceSize,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

fn bench_recorded_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("recorded_frame");
    for (width, height) in [(640, 480), (1920, 1080)] {
        let size = SurfaceSize::new(width, height);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut engine = FireEngine::attach(
                Some(RecordingSurface::default()),
                size,
                ManualScheduler::new(),
                StdRng::seed_from_u64(1),
                FireConfig::default(),
            )
            .unwrap();
            let mut clock = FrameClock::default();
            b.iter(|| {
                engine.surface_mut().take_commands();
                black_box(engine.frame(clock.tick()));
            })
        });
    }
    group.finish();
}

fn bench_raster_frames(c: &mut Criterion) {
    let size = SurfaceSize::new(640, 480);
    let mut engine = FireEngine::attach(
        Some(RasterSurface::new(size)),
        size,
        ManualScheduler::new(),
        StdRng::seed_from_u64(1),
        FireConfig::default(),
    )
    .unwrap();
    let mut clock = FrameClock::default();
    // Let the pool rise into view first
    engine.run_pending(&mut clock, 120);

    c.bench_function("raster_frame_640x480", |b| {
        b.iter(|| black_box(engine.frame(clock.tick())))
    });
}

criterion_group!(benches, bench_recorded_frames, bench_raster_frames);
criterion_main!(benches);
