use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::{DVec3, Vec3};
use skyshade_sky::*;

/// A star plus `n` planets on a ring in front of the camera.
fn catalog(n: usize) -> Vec<CelestialBody> {
    let mut bodies = vec![CelestialBody::new(DVec3::new(1e11, 0.0, 0.0), 2.6e8)];
    for i in 0..n {
        let angle = i as f64 / n as f64 * std::f64::consts::TAU;
        let position = DVec3::new(angle.cos() * 3e7, angle.sin() * 3e7, 2e7);
        bodies.push(CelestialBody::new(position, 1e6 + i as f64 * 1e5));
    }
    bodies
}

fn bench_stock_system(c: &mut Criterion) {
    let camera = CameraState::new(DVec3::ZERO, DVec3::Z, 60.0);
    let light = LightSource::new(DVec3::new(1e11, 0.0, 0.0));
    let bodies = catalog(16);
    c.bench_function("attenuation_17_bodies", |b| {
        b.iter(|| {
            black_box(compute_attenuated_color(
                black_box(&camera),
                black_box(&light),
                Vec3::splat(0.25),
                black_box(&bodies),
            ))
        })
    });
}

fn bench_large_system(c: &mut Criterion) {
    let camera = CameraState::new(DVec3::ZERO, DVec3::Z, 60.0);
    let light = LightSource::new(DVec3::new(1e11, 0.0, 0.0));
    let bodies = catalog(256);
    c.bench_function("attenuation_257_bodies", |b| {
        b.iter(|| black_box(attenuation_scalar(&camera, &light, black_box(&bodies))))
    });
}

criterion_group!(benches, bench_stock_system, bench_large_system);
criterion_main!(benches);
