//! Hit-testing: which entity, and which part of it, lies under the pointer.
//!
//! Entities stack in a fixed order, topmost first: devices, stickers, areas,
//! rooms. Within a kind the most recently added entity wins. The selected
//! entity's handles sit above everything.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::consts::{HANDLE_RADIUS_PX, ROTATE_HANDLE_OFFSET_PX};
use crate::doc::{DocStore, Entity, EntityId};
use crate::geom::{Rect, point_in_rect};
use crate::layout::{min_size_cm, rotatable};

/// Which part of an entity was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    /// Bottom-right corner handle.
    ResizeHandle,
    /// Handle above the top edge.
    RotateHandle,
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub id: EntityId,
    pub part: HitPart,
}

/// Screen position of the resize handle of `entity`.
#[must_use]
pub fn resize_handle(entity: &Entity, camera: &Camera) -> Point {
    let r = entity.rect();
    camera.world_to_screen(Point::new(r.right(), r.bottom()))
}

/// Screen position of the rotate handle of `entity`.
#[must_use]
pub fn rotate_handle(entity: &Entity, camera: &Camera) -> Point {
    let r = entity.rect();
    let top = camera.world_to_screen(Point::new(r.center().x, r.top));
    Point::new(top.x, top.y - ROTATE_HANDLE_OFFSET_PX)
}

fn near(a: Point, b: Point) -> bool {
    (a.x - b.x).hypot(a.y - b.y) <= HANDLE_RADIUS_PX
}

/// Whether `world_pt` falls inside `rect` turned by `rotation` degrees about
/// its center.
fn inside_rotated(world_pt: Point, rect: &Rect, rotation: f64) -> bool {
    let c = rect.center();
    let (sin, cos) = (-rotation.to_radians()).sin_cos();
    let (dx, dy) = (world_pt.x - c.x, world_pt.y - c.y);
    let local = Point::new(c.x + dx * cos - dy * sin, c.y + dx * sin + dy * cos);
    point_in_rect(local, rect)
}

fn selected_handle(screen_pt: Point, doc: &DocStore, camera: &Camera, selected: &EntityId) -> Option<Hit> {
    let entity = doc.get(selected)?;
    if min_size_cm(&entity).is_some() && near(screen_pt, resize_handle(&entity, camera)) {
        return Some(Hit { id: selected.clone(), part: HitPart::ResizeHandle });
    }
    if rotatable(&entity) && near(screen_pt, rotate_handle(&entity, camera)) {
        return Some(Hit { id: selected.clone(), part: HitPart::RotateHandle });
    }
    None
}

/// Test which entity (if any) is under `screen_pt`, checking the handles of
/// the selected entity first.
#[must_use]
pub fn hit_test(screen_pt: Point, doc: &DocStore, camera: &Camera, selected: Option<&EntityId>) -> Option<Hit> {
    if let Some(hit) = selected.and_then(|id| selected_handle(screen_pt, doc, camera, id)) {
        return Some(hit);
    }

    let p = camera.screen_to_world(screen_pt);
    let body = |id: EntityId| Some(Hit { id, part: HitPart::Body });

    if let Some(d) = doc.devices().iter().rev().find(|d| inside_rotated(p, &d.rect(), d.rotation)) {
        return body(EntityId::Device(d.id.clone()));
    }
    if let Some(s) = doc.stickers().iter().rev().find(|s| inside_rotated(p, &s.geom.rect(), s.geom.rotation)) {
        return body(EntityId::Sticker(s.id));
    }
    if let Some(a) = doc.areas().iter().rev().find(|a| point_in_rect(p, &a.geom.rect())) {
        return body(EntityId::Area(a.id));
    }
    doc.rooms()
        .iter()
        .rev()
        .find(|r| point_in_rect(p, &r.geom.rect()))
        .and_then(|r| body(EntityId::Room(r.id)))
}
