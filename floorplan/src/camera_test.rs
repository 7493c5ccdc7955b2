#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Unit conversion ---

#[test]
fn display_is_real_times_scale() {
    assert_eq!(to_display(250.0, 0.8), 200.0);
}

#[test]
fn real_is_display_over_scale() {
    assert_eq!(to_real(200.0, 0.8), 250.0);
}

#[test]
fn conversion_round_trips_across_scales() {
    for scale in [0.25, 0.5, 0.8, 1.0, 1.6, 3.0] {
        for real in [0.0, 1.0, 37.5, 100.0, 999.0] {
            assert!(approx_eq(to_real(to_display(real, scale), scale), real));
        }
    }
}

#[test]
fn millimeters_round_half_away() {
    assert_eq!(to_millimeters(12.34), 123);
    assert_eq!(to_millimeters(12.25), 123);
    assert_eq!(to_millimeters(0.0), 0);
    assert_eq!(to_millimeters(-3.2), -32);
}

// --- Fit scale ---

#[test]
fn fit_scale_takes_tighter_axis() {
    // (800-80)/720 = 1.0 ; (600-80)/260 = 2.0
    assert_eq!(fit_scale(800.0, 600.0, 720.0, 260.0), 1.0);
}

#[test]
fn fit_scale_ignores_degenerate_axis() {
    assert_eq!(fit_scale(800.0, 600.0, 0.0, 260.0), 2.0);
}

#[test]
fn fit_scale_empty_scene_is_identity() {
    assert_eq!(fit_scale(800.0, 600.0, 0.0, 0.0), 1.0);
}

// --- Camera ---

#[test]
fn editor_camera_has_no_translation() {
    let cam = Camera::with_scale(2.0);
    let s = cam.world_to_screen(Point::new(10.0, 20.0));
    assert!(point_approx_eq(s, Point::new(20.0, 40.0)));
}

#[test]
fn camera_round_trip() {
    let cam = Camera::fit(100.0, 50.0, 400.0, 300.0, 800.0, 600.0);
    let p = Point::new(123.0, 456.0);
    assert!(point_approx_eq(cam.screen_to_world(cam.world_to_screen(p)), p));
}

#[test]
fn fitted_camera_centers_bounds() {
    // scale = min(720/400, 520/300) = 1.7333..
    let cam = Camera::fit(100.0, 50.0, 400.0, 300.0, 800.0, 600.0);
    let tl = cam.world_to_screen(Point::new(100.0, 50.0));
    let br = cam.world_to_screen(Point::new(500.0, 350.0));
    assert!(approx_eq(tl.x + br.x, 800.0));
    assert!(approx_eq(tl.y + br.y, 600.0));
    assert!(approx_eq(tl.y, 40.0));
}

#[test]
fn screen_dist_divides_by_scale() {
    let cam = Camera::with_scale(4.0);
    assert_eq!(cam.screen_dist_to_world(20.0), 5.0);
}
