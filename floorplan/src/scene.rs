//! Scene composition for the live dashboard.
//!
//! The dashboard draws the saved floorplan read-only: floors tinted by their
//! lights, walls merged where rooms touch, gaps cut for valid doors, and
//! areas, furniture, devices and people placed through a camera fitted to
//! the floorplan bounds. This module produces that picture as plain data;
//! the host paints it.
//!
//! All geometry in a [`Scene`] is in screen pixels.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Point};
use crate::catalog::StickerKind;
use crate::consts::{SHARED_WALL_EPSILON_CM, WALL_THICKNESS_PX};
use crate::doc::{AreaId, AreaKind, DeviceKind, DocStore, Room, RoomId, StickerId};
use crate::geom::{Orientation, Rect, WallSide, door_wall_side};
use crate::status::{DeviceStates, FLOOR_PLAIN};

// =============================================================================
// BOUNDS
// =============================================================================

/// Axis-aligned extent of a floorplan in real cm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Camera that fits these bounds into the viewport, centered.
    #[must_use]
    pub fn camera(&self, viewport_w: f64, viewport_h: f64) -> Camera {
        Camera::fit(self.min_x, self.min_y, self.width, self.height, viewport_w, viewport_h)
    }
}

/// Union of every entity's extent, or `None` for an empty floorplan.
///
/// Devices have no stored size and contribute only their anchor point.
#[must_use]
pub fn compute_bounds(doc: &DocStore) -> Option<Bounds> {
    let rects = doc
        .rooms()
        .iter()
        .map(|r| r.geom.rect())
        .chain(doc.areas().iter().map(|a| a.geom.rect()))
        .chain(doc.stickers().iter().map(|s| s.geom.rect()))
        .chain(doc.devices().iter().map(|d| Rect::new(d.left, d.top, 0.0, 0.0)));

    let mut acc: Option<(f64, f64, f64, f64)> = None;
    for r in rects {
        let (min_x, min_y, max_x, max_y) = acc.unwrap_or((r.left, r.top, r.right(), r.bottom()));
        acc = Some((min_x.min(r.left), min_y.min(r.top), max_x.max(r.right()), max_y.max(r.bottom())));
    }
    acc.map(|(min_x, min_y, max_x, max_y)| Bounds { min_x, min_y, width: max_x - min_x, height: max_y - min_y })
}

// =============================================================================
// WALLS
// =============================================================================

/// A straight wall stroke in real cm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSegment {
    pub from: Point,
    pub to: Point,
    /// Stroke width in px.
    pub thickness: f64,
}

/// Segments where two rooms touch, redrawn at half thickness.
///
/// Rooms touch on a vertical wall when one's left edge is within
/// [`SHARED_WALL_EPSILON_CM`] of the other's right edge; the merged stroke
/// spans both rooms. Horizontal walls are analogous.
#[must_use]
pub fn shared_walls(rooms: &[Room]) -> Vec<WallSegment> {
    let thickness = WALL_THICKNESS_PX / 2.0;
    let mut out = Vec::new();
    for (i, a) in rooms.iter().enumerate() {
        let a = a.geom.rect();
        for b in &rooms[i + 1..] {
            let b = b.geom.rect();
            if (a.left - b.right()).abs() < SHARED_WALL_EPSILON_CM || (b.left - a.right()).abs() < SHARED_WALL_EPSILON_CM {
                let x = a.right().min(b.right());
                out.push(WallSegment {
                    from: Point::new(x, a.top.min(b.top)),
                    to: Point::new(x, a.bottom().max(b.bottom())),
                    thickness,
                });
            }
            if (a.top - b.bottom()).abs() < SHARED_WALL_EPSILON_CM || (b.top - a.bottom()).abs() < SHARED_WALL_EPSILON_CM {
                let y = a.bottom().min(b.bottom());
                out.push(WallSegment {
                    from: Point::new(a.left.min(b.left), y),
                    to: Point::new(a.right().max(b.right()), y),
                    thickness,
                });
            }
        }
    }
    out
}

/// Which edges of `room` (top, right, bottom, left) another room touches.
///
/// A touched edge is drawn once, by [`shared_walls`], and is left out of
/// the room's own outline.
fn covered_edges(rooms: &[Room], room: &Room) -> [bool; 4] {
    let near = |a: f64, b: f64| (a - b).abs() < SHARED_WALL_EPSILON_CM;
    let r = room.geom.rect();
    let mut covered = [false; 4];
    for other in rooms.iter().filter(|o| o.id != room.id) {
        let o = other.geom.rect();
        covered[0] |= near(r.top, o.bottom());
        covered[1] |= near(o.left, r.right());
        covered[2] |= near(o.top, r.bottom());
        covered[3] |= near(r.left, o.right());
    }
    covered
}

/// Opening cut into a wall by a valid door, in real cm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorGap {
    pub room_id: RoomId,
    pub door_id: StickerId,
    pub from: Point,
    pub to: Point,
}

/// Gaps for every valid door sitting on a room wall.
///
/// The gap is as long as the door's height and centered on the door along
/// the wall.
#[must_use]
pub fn door_gaps(doc: &DocStore) -> Vec<DoorGap> {
    let mut out = Vec::new();
    for room in doc.rooms() {
        let r = room.geom.rect();
        for door in doc.stickers().iter().filter(|s| s.kind.is_door() && s.is_valid) {
            let d = door.geom.rect();
            let Some(side) = door_wall_side(&d, &r) else {
                continue;
            };
            let c = d.center();
            let half = d.height / 2.0;
            let (from, to) = match side.orientation() {
                Orientation::Vertical => {
                    let x = if side == WallSide::Left { r.left } else { r.right() };
                    (Point::new(x, c.y - half), Point::new(x, c.y + half))
                }
                Orientation::Horizontal => {
                    let y = if side == WallSide::Top { r.top } else { r.bottom() };
                    (Point::new(c.x - half, y), Point::new(c.x + half, y))
                }
            };
            out.push(DoorGap { room_id: room.id, door_id: door.id, from, to });
        }
    }
    out
}

// =============================================================================
// PEOPLE
// =============================================================================

/// One tracked person as reported by a radar, in real cm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonPosition {
    pub x: f64,
    pub y: f64,
    pub id: u32,
}

/// A push from the host: every person a radar currently sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonPositions {
    #[serde(rename = "deviceId", alias = "device_id")]
    pub device_id: String,
    pub positions: Vec<PersonPosition>,
}

/// Latest person positions per radar. Overlay only; never persisted.
pub type PersonOverlay = BTreeMap<String, Vec<PersonPosition>>;

// =============================================================================
// SCENE
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SceneRoom {
    pub id: RoomId,
    pub name: String,
    pub rect: Rect,
    pub fill: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneWall {
    pub from: Point,
    pub to: Point,
    pub thickness: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneGap {
    pub from: Point,
    pub to: Point,
    pub thickness: f64,
    /// Floor color of the room the gap opens into.
    pub fill: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneArea {
    pub id: AreaId,
    pub kind: AreaKind,
    pub name: String,
    pub rect: Rect,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneSticker {
    pub id: StickerId,
    pub kind: StickerKind,
    pub rect: Rect,
    pub rotation: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneDevice {
    pub id: String,
    pub kind: DeviceKind,
    pub center: Point,
    pub rotation: f64,
    pub active: bool,
    pub unavailable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneMarker {
    pub device_id: String,
    pub person_id: u32,
    pub at: Point,
}

/// Everything the dashboard draws, back to front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub rooms: Vec<SceneRoom>,
    pub walls: Vec<SceneWall>,
    pub gaps: Vec<SceneGap>,
    pub areas: Vec<SceneArea>,
    pub stickers: Vec<SceneSticker>,
    pub devices: Vec<SceneDevice>,
    pub people: Vec<SceneMarker>,
}

fn screen_rect(camera: &Camera, r: &Rect) -> Rect {
    Rect::from_corners(
        camera.world_to_screen(Point::new(r.left, r.top)),
        camera.world_to_screen(Point::new(r.right(), r.bottom())),
    )
}

fn wall(camera: &Camera, from: Point, to: Point, thickness: f64) -> SceneWall {
    SceneWall { from: camera.world_to_screen(from), to: camera.world_to_screen(to), thickness }
}

/// Compose the dashboard scene through `camera`.
///
/// Each room is outlined at full thickness except where it touches another
/// room; those edges get a single half-thickness stroke instead.
///
/// Areas are drawn only when visible, valid and centered in a room;
/// furniture and devices only when centered in a room. Doors are not drawn
/// as furniture; their gaps stand in for them.
#[must_use]
pub fn compose(doc: &DocStore, states: &DeviceStates, people: &PersonOverlay, camera: &Camera) -> Scene {
    let in_any_room = |p: Point| doc.room_containing(p).is_some();
    let mut scene = Scene::default();

    for room in doc.rooms() {
        let r = room.geom.rect();
        scene.rooms.push(SceneRoom {
            id: room.id,
            name: room.name.clone(),
            rect: screen_rect(camera, &r),
            fill: states.room_tint(doc, room),
        });
        let corners = [
            Point::new(r.left, r.top),
            Point::new(r.right(), r.top),
            Point::new(r.right(), r.bottom()),
            Point::new(r.left, r.bottom()),
        ];
        let covered = covered_edges(doc.rooms(), room);
        for (i, &from) in corners.iter().enumerate() {
            if !covered[i] {
                scene.walls.push(wall(camera, from, corners[(i + 1) % 4], WALL_THICKNESS_PX));
            }
        }
    }
    for seg in shared_walls(doc.rooms()) {
        scene.walls.push(wall(camera, seg.from, seg.to, seg.thickness));
    }

    for gap in door_gaps(doc) {
        let fill = doc.room(gap.room_id).map_or(FLOOR_PLAIN, |room| states.room_tint(doc, room));
        scene.gaps.push(SceneGap {
            from: camera.world_to_screen(gap.from),
            to: camera.world_to_screen(gap.to),
            thickness: WALL_THICKNESS_PX + 2.0,
            fill,
        });
    }

    scene.areas = doc
        .areas()
        .iter()
        .filter(|a| a.visible && a.is_valid && in_any_room(a.geom.center()))
        .map(|a| SceneArea {
            id: a.id,
            kind: a.kind,
            name: a.name.clone(),
            rect: screen_rect(camera, &a.geom.rect()),
            color: a.color.clone(),
        })
        .collect();

    scene.stickers = doc
        .stickers()
        .iter()
        .filter(|s| !s.kind.is_door() && in_any_room(s.geom.center()))
        .map(|s| SceneSticker {
            id: s.id,
            kind: s.kind,
            rect: screen_rect(camera, &s.geom.rect()),
            rotation: s.geom.rotation,
        })
        .collect();

    scene.devices = doc
        .devices()
        .iter()
        .filter(|d| d.visible && in_any_room(d.center()))
        .map(|d| SceneDevice {
            id: d.id.clone(),
            kind: d.kind,
            center: camera.world_to_screen(d.center()),
            rotation: d.rotation,
            active: states.is_active(d),
            unavailable: states.is_unavailable(d),
        })
        .collect();

    for (device_id, positions) in people {
        for p in positions {
            scene.people.push(SceneMarker {
                device_id: device_id.clone(),
                person_id: p.id,
                at: camera.world_to_screen(Point::new(p.x, p.y)),
            });
        }
    }

    scene
}

/// Fit the floorplan into the viewport and compose it. An empty floorplan
/// yields an empty scene.
#[must_use]
pub fn dashboard(doc: &DocStore, states: &DeviceStates, people: &PersonOverlay, viewport_w: f64, viewport_h: f64) -> Scene {
    match compute_bounds(doc) {
        Some(bounds) => compose(doc, states, people, &bounds.camera(viewport_w, viewport_h)),
        None => Scene::default(),
    }
}
