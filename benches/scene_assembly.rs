use bedroom_viewer::config::OrbitConfig;
use bedroom_viewer::core::{OrbitController, Viewport};
use bedroom_viewer::scenes::{assemble, build_camera, preset, PRESET_NAMES};
use bedroom_viewer::{AppContext, DrawList};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Benchmark: build every preset from its config
fn bench_assemble_presets(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");

    for name in PRESET_NAMES {
        let Ok(config) = preset(name) else { continue };
        group.bench_with_input(BenchmarkId::new("preset", name), &config, |b, config| {
            b.iter(|| black_box(assemble(black_box(config))))
        });
    }

    group.finish();
}

/// Benchmark: per-frame draw list for each preset
fn bench_draw_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_list");

    for name in PRESET_NAMES {
        let Ok(config) = preset(name) else { continue };
        let Ok(scene) = assemble(&config) else { continue };
        let camera = build_camera(&config.camera, 16.0 / 9.0);

        group.bench_with_input(BenchmarkId::new("preset", name), &scene, |b, scene| {
            b.iter(|| black_box(DrawList::build(black_box(scene), black_box(&camera))))
        });
    }

    group.finish();
}

/// Benchmark: one damped orbit step after a drag
fn bench_orbit_update(c: &mut Criterion) {
    let Ok(config) = preset("orbit") else { return };
    let Ok(ctx) = AppContext::new(&config, Viewport::new(1280, 720)) else { return };

    c.bench_function("orbit_update", |b| {
        b.iter(|| {
            let mut camera = ctx.camera.clone();
            let mut orbit = OrbitController::new(OrbitConfig::default());
            orbit.rotate_left(0.3);
            orbit.rotate_up(0.1);
            black_box(orbit.update(&mut camera))
        })
    });
}

criterion_group!(
    benches,
    bench_assemble_presets,
    bench_draw_list,
    bench_orbit_update
);
criterion_main!(benches);
