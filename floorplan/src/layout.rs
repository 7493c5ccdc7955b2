//! Placement rules: what may be drawn, dropped, moved, resized or rotated,
//! and where it lands.
//!
//! DESIGN
//! ======
//! Gesture math runs in display pixels so the snapping thresholds match what
//! the user sees; capacity and on-wall checks run in real centimeters against
//! the stored geometry. Functions here read the store and return values; the
//! engine decides what to commit.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here fails. A rejected placement is `None` (logged at debug), an
//! over-capacity placement is flagged invalid, and the two capacity rules
//! also surface a [`Notice`] for the user.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use tracing::debug;

use crate::camera::{Point, to_real};
use crate::catalog::{AreaType, StickerKind};
use crate::consts::{
    ALIGN_SNAP_PX, DEFAULT_AREA_CM, DOOR_SNAP_PX, MAX_DOORS_PER_ROOM, MAX_MONITOR_AREAS_PER_ROOM, MIN_AREA_CM,
    MIN_ROOM_CM, MIN_STICKER_CM, WALL_OWNER_TOLERANCE_CM,
};
use crate::doc::{
    Area, AreaId, AreaKind, Device, DeviceKind, DocStore, Entity, EntityId, Geometry, Room, RoomId, RoomKind,
    Sticker, StickerId,
};
use crate::geom::{
    DoorPlacement, Rect, Wall, align_door_to_wall, door_on_room_wall, entity_overlap, nearest_wall,
    normalize_degrees, point_in_rect, wall_belongs_to,
};

/// A user-facing message raised by a capacity rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The target room already holds the maximum number of monitor areas.
    MaxMonitorAreas,
    /// The target room already has the maximum number of doors.
    MaxDoors,
    /// Every room id is in use.
    RoomIdsExhausted,
}

impl Notice {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::MaxMonitorAreas => "each room can hold at most 30 monitor areas",
            Self::MaxDoors => "each room can have at most 5 doors",
            Self::RoomIdsExhausted => "no room ids left; delete a room first",
        }
    }
}

// =============================================================================
// ROOMS
// =============================================================================

/// Round a display length to whole centimeters.
#[must_use]
pub fn to_real_cm(display: f64, scale: f64) -> f64 {
    to_real(display, scale).round()
}

/// The real rectangle spanned by two display corners, rounded to whole
/// centimeters. `None` if either side is under the minimum room size.
#[must_use]
pub fn room_from_corners(a: Point, b: Point, scale: f64) -> Option<Rect> {
    let d = Rect::from_corners(a, b);
    let real = Rect::new(
        to_real_cm(d.left, scale),
        to_real_cm(d.top, scale),
        to_real_cm(d.width, scale),
        to_real_cm(d.height, scale),
    );
    if real.width < MIN_ROOM_CM || real.height < MIN_ROOM_CM {
        debug!(width = real.width, height = real.height, "room below minimum size discarded");
        return None;
    }
    Some(real)
}

#[must_use]
pub fn new_room(id: RoomId, rect: Rect) -> Room {
    Room { id, kind: RoomKind::Regular, name: format!("Room {id}"), geom: Geometry::from_rect(rect), color: None }
}

// =============================================================================
// AREAS
// =============================================================================

/// A default-sized area centered on `center` (display px).
#[must_use]
pub fn area_at(id: AreaId, kind: AreaKind, center: Point, scale: f64) -> Area {
    let half = DEFAULT_AREA_CM / 2.0;
    Area {
        id,
        kind,
        name: kind.default_name(id),
        geom: Geometry {
            left: (to_real(center.x, scale) - half).round(),
            top: (to_real(center.y, scale) - half).round(),
            width: DEFAULT_AREA_CM,
            height: DEFAULT_AREA_CM,
            rotation: 0.0,
        },
        color: kind.default_color().to_string(),
        area_type: AreaType::NONE,
        report_events: false,
        visible: true,
        is_valid: true,
    }
}

/// Whether `area` overlaps another monitor area. Interference areas never
/// conflict with anything.
#[must_use]
pub fn monitor_conflict(doc: &DocStore, area: &Area) -> bool {
    if area.kind != AreaKind::Monitor {
        return false;
    }
    let rect = area.geom.rect();
    doc.areas()
        .iter()
        .filter(|other| other.kind == AreaKind::Monitor)
        .any(|other| entity_overlap(&area.id, &rect, &other.id, &other.geom.rect()))
}

/// Valid monitor areas centered inside `room`, not counting `exclude`.
#[must_use]
pub fn valid_monitors_in_room(doc: &DocStore, room: &Rect, exclude: Option<AreaId>) -> usize {
    doc.areas()
        .iter()
        .filter(|a| Some(a.id) != exclude && a.kind == AreaKind::Monitor && a.is_valid)
        .filter(|a| point_in_rect(a.geom.center(), room))
        .count()
}

/// Outcome of revalidating an area at its current geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaCheck {
    pub overlapping: bool,
    pub over_capacity: bool,
}

impl AreaCheck {
    #[must_use]
    pub fn is_valid(self) -> bool {
        !self.overlapping && !self.over_capacity
    }

    #[must_use]
    pub fn notice(self) -> Option<Notice> {
        self.over_capacity.then_some(Notice::MaxMonitorAreas)
    }
}

/// Overlap and per-room capacity for `area` where it currently sits.
#[must_use]
pub fn check_area(doc: &DocStore, area: &Area) -> AreaCheck {
    let over_capacity = area.kind == AreaKind::Monitor
        && doc
            .room_containing(area.geom.center())
            .is_some_and(|room| valid_monitors_in_room(doc, &room.geom.rect(), Some(area.id)) >= MAX_MONITOR_AREAS_PER_ROOM);
    AreaCheck { overlapping: monitor_conflict(doc, area), over_capacity }
}

/// Whether dropping a `kind` area centered on `center` (real cm) is refused.
#[must_use]
pub fn area_drop_refused(doc: &DocStore, kind: AreaKind, center: Point) -> Option<Notice> {
    if kind != AreaKind::Monitor {
        return None;
    }
    let room = doc.room_containing(center)?;
    let count = valid_monitors_in_room(doc, &room.geom.rect(), None);
    (count >= MAX_MONITOR_AREAS_PER_ROOM).then(|| {
        debug!(room_id = room.id, count, "monitor area drop refused");
        Notice::MaxMonitorAreas
    })
}

// =============================================================================
// STICKERS / DOORS
// =============================================================================

/// A catalogue-sized sticker centered on `center` (display px).
#[must_use]
pub fn sticker_at(id: StickerId, kind: StickerKind, center: Point, scale: f64) -> Sticker {
    let (width, height) = kind.default_size();
    Sticker {
        id,
        kind,
        geom: Geometry {
            left: to_real(center.x, scale) - width / 2.0,
            top: to_real(center.y, scale) - height / 2.0,
            width,
            height,
            rotation: 0.0,
        },
        is_valid: true,
    }
}

/// Doors sitting on any wall of `room`.
pub fn doors_on_room_walls(doc: &DocStore, room: Rect) -> impl Iterator<Item = &Sticker> {
    doc.stickers()
        .iter()
        .filter(move |s| s.kind.is_door() && door_on_room_wall(&s.geom.rect(), s.geom.rotation, &room))
}

/// Where a dragged door lands and whether that spot is allowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorSnap {
    /// Snapped position in display px, `None` when no wall is close enough.
    pub placement: Option<DoorPlacement>,
    pub is_valid: bool,
}

/// Snap a door being dragged to `candidate` (display px) onto the nearest
/// wall, and check the owning room's door capacity.
///
/// A door away from every wall is valid.
#[must_use]
pub fn snap_door(doc: &DocStore, door_id: StickerId, candidate: &Rect, scale: f64) -> DoorSnap {
    let rooms = doc.rooms().iter().map(|r| (r.id, r.geom.rect().scaled(scale)));
    let Some(wall) = nearest_wall(candidate, rooms, DOOR_SNAP_PX) else {
        return DoorSnap { placement: None, is_valid: true };
    };
    let placement = align_door_to_wall(candidate, &wall);
    let is_valid = !door_capacity_reached(doc, door_id, candidate, &wall, scale);
    DoorSnap { placement: Some(placement), is_valid }
}

fn door_capacity_reached(doc: &DocStore, door_id: StickerId, candidate: &Rect, wall: &Wall, scale: f64) -> bool {
    let real_wall = Wall {
        x1: to_real_cm(wall.x1, scale),
        y1: to_real_cm(wall.y1, scale),
        x2: to_real_cm(wall.x2, scale),
        y2: to_real_cm(wall.y2, scale),
        ..*wall
    };
    let door_center = Rect::new(
        to_real_cm(candidate.left, scale),
        to_real_cm(candidate.top, scale),
        to_real_cm(candidate.width, scale),
        to_real_cm(candidate.height, scale),
    )
    .center();

    doc.rooms()
        .iter()
        .filter(|room| wall_belongs_to(&real_wall, &room.geom.rect(), door_center, WALL_OWNER_TOLERANCE_CM))
        .any(|room| {
            let others = doors_on_room_walls(doc, room.geom.rect())
                .filter(|d| d.id != door_id && d.is_valid)
                .count();
            if others >= MAX_DOORS_PER_ROOM {
                debug!(room_id = room.id, others, "door capacity reached");
            }
            others >= MAX_DOORS_PER_ROOM
        })
}

// =============================================================================
// DEVICES
// =============================================================================

/// A device centered on `center` (display px), rounded to whole centimeters.
#[must_use]
pub fn device_at(id: &str, kind: DeviceKind, center: Point, scale: f64) -> Device {
    Device {
        id: id.to_string(),
        kind,
        left: to_real_cm(center.x, scale),
        top: to_real_cm(center.y, scale),
        rotation: 0.0,
        install_height: 0.0,
        install_angle: 0,
        visible: true,
    }
}

// =============================================================================
// DRAG
// =============================================================================

/// Keep `rect` (display px) inside a `canvas_w × canvas_h` canvas. Returns
/// the clamped top-left.
#[must_use]
pub fn clamp_to_canvas(rect: &Rect, canvas_w: f64, canvas_h: f64) -> Point {
    Point::new(
        rect.left.min(canvas_w - rect.width).max(0.0),
        rect.top.min(canvas_h - rect.height).max(0.0),
    )
}

/// Alignment guides against every room other than `moving`.
///
/// Per axis the first match of edge, opposite edge, then center wins within
/// one room; later rooms override earlier ones.
#[must_use]
pub fn align_to_rooms(doc: &DocStore, moving: &EntityId, candidate: &Rect, scale: f64) -> (Option<f64>, Option<f64>) {
    let mut align_x = None;
    let mut align_y = None;
    let c = candidate.center();

    for room in doc.rooms() {
        if *moving == EntityId::Room(room.id) {
            continue;
        }
        let other = room.geom.rect().scaled(scale);
        let oc = other.center();

        if (candidate.left - other.left).abs() < ALIGN_SNAP_PX {
            align_x = Some(other.left);
        } else if (candidate.right() - other.right()).abs() < ALIGN_SNAP_PX {
            align_x = Some(other.right() - candidate.width);
        } else if (c.x - oc.x).abs() < ALIGN_SNAP_PX {
            align_x = Some(oc.x - candidate.width / 2.0);
        }

        if (candidate.top - other.top).abs() < ALIGN_SNAP_PX {
            align_y = Some(other.top);
        } else if (candidate.bottom() - other.bottom()).abs() < ALIGN_SNAP_PX {
            align_y = Some(other.bottom() - candidate.height);
        } else if (c.y - oc.y).abs() < ALIGN_SNAP_PX {
            align_y = Some(oc.y - candidate.height / 2.0);
        }
    }
    (align_x, align_y)
}

// =============================================================================
// RESIZE / ROTATE
// =============================================================================

/// Smallest side an entity may be resized to, in cm. Devices and doors have
/// a fixed footprint and cannot be resized.
#[must_use]
pub fn min_size_cm(entity: &Entity) -> Option<f64> {
    match entity {
        Entity::Room(_) => Some(MIN_ROOM_CM),
        Entity::Area(_) => Some(MIN_AREA_CM),
        Entity::Sticker(s) if s.kind.is_door() => None,
        Entity::Sticker(_) => Some(MIN_STICKER_CM),
        Entity::Device(_) => None,
    }
}

/// New display size after dragging the resize handle by `(dx, dy)`.
#[must_use]
pub fn resized(start_w: f64, start_h: f64, dx: f64, dy: f64, min_display: f64) -> (f64, f64) {
    ((start_w + dx).max(min_display), (start_h + dy).max(min_display))
}

/// Devices and non-door stickers can be rotated.
#[must_use]
pub fn rotatable(entity: &Entity) -> bool {
    match entity {
        Entity::Device(_) => true,
        Entity::Sticker(s) => !s.kind.is_door(),
        Entity::Room(_) | Entity::Area(_) => false,
    }
}

/// Rotation after turning the pointer from `start` to `current` around
/// `center`, added to `orig` and folded into `[0, 360)`.
#[must_use]
pub fn rotation_from_drag(center: Point, start: Point, current: Point, orig: f64) -> f64 {
    let a0 = (start.y - center.y).atan2(start.x - center.x);
    let a1 = (current.y - center.y).atan2(current.x - center.x);
    normalize_degrees(orig + (a1 - a0).to_degrees())
}
