//! Integration tests: drawing capture and crop (sigil-editor).

use pretty_assertions::assert_eq;
use sigil_core::{Color, PixelBounds};
use sigil_editor::capture::{BrushSettings, CaptureEngine};
use sigil_render::raster::{Raster, crop_to_opaque, new_surface};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn armed(width: u32, height: u32) -> CaptureEngine {
    let mut engine = CaptureEngine::default();
    engine.begin(width, height, BrushSettings::default()).unwrap();
    engine
}

fn snapshot(engine: &CaptureEngine) -> Vec<u8> {
    engine.surface().unwrap().data().to_vec()
}

// ─── Crop correctness ────────────────────────────────────────────────────

#[test]
fn crop_of_synthetic_rectangle() {
    init_logs();
    let mut surface: Raster = new_surface(100, 100).unwrap();
    let mut paint = tiny_skia::Paint::default();
    paint.set_color_rgba8(0, 0, 0, 255);
    let rect = tiny_skia::Rect::from_xywh(10.0, 20.0, 30.0, 40.0).unwrap();
    surface.fill_rect(rect, &paint, tiny_skia::Transform::identity(), None);

    let (image, bounds) = crop_to_opaque(&surface).unwrap();
    assert_eq!(
        bounds,
        PixelBounds {
            x: 10,
            y: 20,
            width: 30,
            height: 40
        }
    );
    assert_eq!((image.width(), image.height()), (30, 40));
}

#[test]
fn finish_reports_offset_of_drawn_strokes() {
    init_logs();
    let mut engine = armed(200, 120);
    engine.update_brush(4.0, Color::BLACK);
    // An L-shaped signature spanning (50, 30)..(150, 90).
    engine.stroke_start(50.0, 30.0);
    engine.stroke_move(50.0, 90.0);
    engine.stroke_move(150.0, 90.0);
    engine.stroke_end();

    let captured = engine.finish().unwrap();
    let b = captured.bounds;
    // Round caps reach two pixels past each endpoint; allow one more for AA.
    assert!((47..=48).contains(&b.x), "x = {}", b.x);
    assert!((27..=28).contains(&b.y), "y = {}", b.y);
    assert!((151..=153).contains(&(b.x + b.width - 1)), "right = {}", b.x + b.width - 1);
    assert!((91..=93).contains(&(b.y + b.height - 1)), "bottom = {}", b.y + b.height - 1);
    assert_eq!(captured.image.width(), b.width);
    assert_eq!(captured.image.height(), b.height);
}

#[test]
fn strokes_accumulate_across_segments() {
    let mut engine = armed(100, 100);
    engine.stroke_start(10.0, 10.0);
    engine.stroke_move(20.0, 10.0);
    engine.stroke_end();
    engine.stroke_start(80.0, 80.0);
    engine.stroke_move(90.0, 90.0);
    engine.stroke_end();

    let b = engine.finish().unwrap().bounds;
    assert!(b.x <= 10 && b.y <= 10);
    assert!(b.x + b.width >= 90 && b.y + b.height >= 90);
}

// ─── Empty drawing ───────────────────────────────────────────────────────

#[test]
fn finish_without_strokes_produces_nothing() {
    init_logs();
    let mut engine = armed(64, 64);
    assert!(engine.finish().is_none());
    assert!(!engine.is_armed());
}

#[test]
fn start_without_move_produces_nothing() {
    let mut engine = armed(64, 64);
    assert!(engine.stroke_start(30.0, 30.0));
    engine.stroke_end();
    assert!(engine.finish().is_none());
}

// ─── Out-of-bounds samples ───────────────────────────────────────────────

#[test]
fn off_surface_samples_are_dropped() {
    init_logs();
    let (w, h) = (120.0, 80.0);
    let mut engine = armed(120, 80);
    assert!(engine.stroke_start(60.0, 40.0));
    engine.stroke_move(70.0, 40.0);
    let before = snapshot(&engine);

    assert!(!engine.stroke_move(-5.0, 10.0));
    assert!(!engine.stroke_move(w + 1.0, h + 1.0));
    assert!(!engine.stroke_move(f64::NAN, 10.0));
    assert!(!engine.stroke_move(10.0, f64::INFINITY));
    assert_eq!(snapshot(&engine), before);

    // The stroke continues from the last accepted sample.
    assert!(engine.stroke_move(w, h));
    assert_ne!(snapshot(&engine), before);
}

#[test]
fn off_surface_start_begins_nothing() {
    let mut engine = armed(50, 50);
    assert!(!engine.stroke_start(-1.0, 5.0));
    assert!(!engine.is_stroking());
    assert!(!engine.stroke_move(10.0, 10.0));
    assert!(engine.finish().is_none());
}

// ─── Brush ───────────────────────────────────────────────────────────────

#[test]
fn brush_changes_apply_to_next_stroke() {
    let mut engine = armed(100, 100);
    engine.update_brush(20.0, Color::from_hex("#ff0000").unwrap());
    engine.stroke_start(20.0, 50.0);
    engine.stroke_move(80.0, 50.0);
    let b = engine.finish().unwrap().bounds;
    assert!(b.height >= 20, "height = {}", b.height);
}
