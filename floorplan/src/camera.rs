//! Real ↔ display coordinate conversion.
//!
//! Real coordinates are centimeters and are the only thing ever persisted.
//! Display coordinates are `real * scale`, shifted by an optional origin and
//! offset when a floorplan is fitted into a viewport.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{FIT_PADDING_PX, MM_PER_CM};

/// A point in either real or display space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Convert a real length (cm) to display pixels.
#[must_use]
pub fn to_display(real: f64, scale: f64) -> f64 {
    real * scale
}

/// Convert a display length (pixels) back to real centimeters.
#[must_use]
pub fn to_real(display: f64, scale: f64) -> f64 {
    display / scale
}

/// Convert centimeters to whole millimeters.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn to_millimeters(cm: f64) -> i64 {
    (cm * MM_PER_CM).round() as i64
}

/// Largest scale at which a `scene_w × scene_h` floorplan fits the viewport
/// with [`FIT_PADDING_PX`] on every side.
///
/// Degenerate scene extents are ignored on their axis; a fully degenerate
/// scene fits at `1.0`.
#[must_use]
pub fn fit_scale(viewport_w: f64, viewport_h: f64, scene_w: f64, scene_h: f64) -> f64 {
    let sx = (scene_w > 0.0).then(|| (viewport_w - 2.0 * FIT_PADDING_PX) / scene_w);
    let sy = (scene_h > 0.0).then(|| (viewport_h - 2.0 * FIT_PADDING_PX) / scene_h);
    match (sx, sy) {
        (Some(a), Some(b)) => a.min(b),
        (Some(s), None) | (None, Some(s)) => s,
        (None, None) => 1.0,
    }
}

/// Camera state mapping real coordinates onto the screen.
///
/// `screen = (real - origin) * scale + offset`. The editor uses a zero
/// origin and offset; the dashboard fits the floorplan bounds and centers it.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub scale: f64,
    pub origin: Point,
    pub offset: Point,
}

impl Default for Camera {
    fn default() -> Self {
        Self { scale: 1.0, origin: Point::new(0.0, 0.0), offset: Point::new(0.0, 0.0) }
    }
}

impl Camera {
    /// An editor camera: pure scaling, no translation.
    #[must_use]
    pub fn with_scale(scale: f64) -> Self {
        Self { scale, ..Self::default() }
    }

    /// A camera that fits the real rectangle `(min_x, min_y, width, height)`
    /// into the viewport and centers it.
    #[must_use]
    pub fn fit(min_x: f64, min_y: f64, width: f64, height: f64, viewport_w: f64, viewport_h: f64) -> Self {
        let scale = fit_scale(viewport_w, viewport_h, width, height);
        Self {
            scale,
            origin: Point::new(min_x, min_y),
            offset: Point::new(
                (viewport_w - width * scale) / 2.0,
                (viewport_h - height * scale) / 2.0,
            ),
        }
    }

    /// Convert a screen-space point to real coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: to_real(screen.x - self.offset.x, self.scale) + self.origin.x,
            y: to_real(screen.y - self.offset.y, self.scale) + self.origin.y,
        }
    }

    /// Convert a real point to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: to_display(world.x - self.origin.x, self.scale) + self.offset.x,
            y: to_display(world.y - self.origin.y, self.scale) + self.offset.y,
        }
    }

    /// Convert a screen-space distance to a real distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        to_real(screen_dist, self.scale)
    }
}
