//! Benchmarks for per-frame CPU work: one flow-field frame, noise sampling
//! and a full picker render.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use driftfield::prelude::*;

fn bench_flow_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("flow_frame");

    for count in [100usize, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut canvas = PixelCanvas::new(960, 540).unwrap();
            let mut flow = FlowField::new()
                .with_particle_count(count)
                .build(Bounds::new(960.0, 540.0));
            flow.setup(&mut canvas);
            let mut t = 0.0;
            b.iter(|| {
                t += 1.0 / 60.0;
                black_box(flow.update(t, &mut canvas))
            })
        });
    }

    group.finish();
}

fn bench_noise(c: &mut Criterion) {
    let field = NoiseField::new(1234);
    let bounds = Bounds::new(960.0, 540.0);
    c.bench_function("heading_at", |b| {
        b.iter(|| black_box(field.heading_at(black_box(DVec2::new(320.0, 200.0)), bounds, 3.5)))
    });
}

fn bench_picker(c: &mut Criterion) {
    let mut group = c.benchmark_group("picker");
    let layout = PickerLayout::new(50.0);
    let (w, h) = layout.canvas_size();

    group.bench_function("render", |b| {
        let mut picker = PalettePicker::new(layout);
        let mut canvas = PixelCanvas::new(w, h).unwrap();
        b.iter(|| picker.render(&mut canvas))
    });

    group.bench_function("row_extent", |b| {
        let picker = PalettePicker::new(layout);
        b.iter(|| black_box(picker.swatch_row_extent(black_box(200.0))))
    });

    group.finish();
}

criterion_group!(benches, bench_flow_frame, bench_noise, bench_picker);
criterion_main!(benches);
