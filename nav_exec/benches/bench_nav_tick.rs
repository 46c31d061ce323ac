//! # NavCtrl Tick Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use comms_if::eqpt::perception::{MissionStats, Snapshot};
use nalgebra::Point2;
use nav_lib::{NavCtrl, NavCtrlParams, NavModeKind};

fn nav_tick_benchmark(c: &mut Criterion) {
    // ---- Build a representative snapshot ----

    // A full view of navigable terrain fanned across the camera's field of view
    let nav_angles_rad: Vec<f64> = (0..1000)
        .map(|i| -0.7 + 1.4 * (i as f64) / 1000.0)
        .collect();

    let snapshot = Snapshot {
        position_m: Some(Point2::new(99.7, 85.6)),
        velocity_ms: 1.2,
        yaw_deg: 56.2,
        nav_angles_rad: Some(nav_angles_rad),
        stats: MissionStats {
            percent_mapped: 42.0,
            fidelity: 68.0,
            elapsed_s: 310.0,
            samples_collected: 2,
            samples_total: 6,
        },
        ..Default::default()
    };

    let mut nav_ctrl = NavCtrl::new(NavCtrlParams::default());
    nav_ctrl.tick(&snapshot);
    assert_eq!(nav_ctrl.mode_kind(), NavModeKind::WallFollow);

    // ---- Run the benchmark ----

    c.bench_function("nav_ctrl_tick", |b| {
        b.iter(|| nav_ctrl.tick(black_box(&snapshot)))
    });
}

criterion_group!(benches, nav_tick_benchmark);
criterion_main!(benches);
