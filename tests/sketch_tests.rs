//! Integration tests driving both sketches through the headless runner.
//!
//! These run whole frames end to end: config, builder, runner, canvas and
//! PNG export, the way the binary does.

use driftfield::prelude::*;
use driftfield::simulation::color_bias_at;

// ============================================================================
// Flow field
// ============================================================================

fn flow_runner(count: usize, seed: u32) -> Runner<FlowFieldState> {
    let flow = FlowField::new()
        .with_particle_count(count)
        .with_seed(seed)
        .build(Bounds::new(160.0, 120.0));
    let canvas = PixelCanvas::new(160, 120).unwrap();
    Runner::new(flow, canvas, Time::fixed_step(1.0 / 60.0))
}

#[test]
fn test_flow_draws_every_frame() {
    let mut runner = flow_runner(200, 1);
    assert_eq!(runner.run_frames(45), 45);
    assert_eq!(runner.time().frame(), 45);
}

#[test]
fn test_flow_particles_stay_bounded() {
    let mut runner = flow_runner(300, 2);
    runner.run_frames(120);
    let flow = runner.sketch();
    let max_age = flow.lifecycle().max_age;
    for p in flow.particles() {
        assert!(p.position.is_finite());
        assert!(p.age <= max_age);
    }
}

#[test]
fn test_flow_bias_follows_elapsed_time() {
    let mut runner = flow_runner(10, 3);
    runner.run_frames(600);
    let expected = color_bias_at(runner.time().elapsed(), 40.0);
    assert!((runner.sketch().color_bias() - expected).abs() < 1e-9);
    assert!((expected - 90.0).abs() < 1e-6);
}

#[test]
fn test_flow_is_reproducible() {
    let render = || {
        let mut runner = flow_runner(150, 77);
        runner.run_frames(20);
        let (_, canvas) = runner.into_parts();
        canvas.pixels().to_vec()
    };
    assert_eq!(render(), render());
}

#[test]
fn test_flow_resize_changes_canvas() {
    let mut runner = flow_runner(50, 4);
    runner.run_frames(2);
    runner.input_mut().resize(400.0, 200.0);
    runner.step();
    assert_eq!(runner.canvas().size(), (300, 150));
    assert_eq!(runner.sketch().bounds(), Bounds::new(300.0, 150.0));
}

#[test]
fn test_flow_from_config() {
    let config = SketchConfig::from_json_str(
        r#"{ "viewport_width": 200, "viewport_height": 100, "flow": { "particle_count": 64, "max_age": 10 } }"#,
    )
    .unwrap();
    let flow = FlowField::from_config(&config.flow).build(config.canvas_bounds());
    assert_eq!(flow.particles().len(), 64);
    assert_eq!(flow.lifecycle(), Lifecycle::new(10));
    assert_eq!(flow.bounds(), Bounds::new(150.0, 75.0));
}

// ============================================================================
// Palette picker
// ============================================================================

fn picker_runner() -> Runner<PalettePicker> {
    let layout = PickerLayout::for_viewport_width(500.0);
    let (w, h) = layout.canvas_size();
    let canvas = PixelCanvas::new(w, h).unwrap();
    Runner::new(PalettePicker::new(layout), canvas, Time::fixed_step(1.0 / 60.0))
}

#[test]
fn test_picker_draws_on_demand() {
    let mut runner = picker_runner();
    assert_eq!(runner.run_frames(10), 1);

    runner.input_mut().click(210.0, 20.0);
    assert!(runner.step());
    assert_eq!(runner.sketch().hue(), 0.0);
    assert!(!runner.sketch().needs_redraw());
    assert_eq!(runner.run_frames(10), 0);
}

#[test]
fn test_picker_ignores_swatch_clicks() {
    let mut runner = picker_runner();
    runner.step();
    runner.input_mut().click(100.0, 100.0);
    assert!(!runner.step());
    assert_eq!(runner.sketch().hue(), 240.0);
}

#[test]
fn test_picker_redraw_moves_marker() {
    let mut runner = picker_runner();
    runner.step();
    runner.input_mut().click(210.0, 180.0);
    runner.step();

    // Hue 360 puts the marker on the bottom edge of the bar
    let marker = runner.canvas().pixel(210, 180).unwrap();
    assert_eq!(marker, Rgba::WHITE);
    // The old marker row shows the bar color again
    let old = runner.canvas().pixel(210, 126).unwrap();
    assert_ne!(old, Rgba::WHITE);
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn test_png_export() {
    let mut runner = picker_runner();
    runner.step();
    let (_, canvas) = runner.into_parts();

    let path = std::env::temp_dir().join(format!("driftfield-picker-{}.png", std::process::id()));
    canvas.save_png(&path).unwrap();
    let decoded = image::open(&path).unwrap().to_rgba8();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(decoded.dimensions(), (240, 200));
    assert_eq!(decoded.get_pixel(5, 5).0, [0, 0, 0, 255]);
}
