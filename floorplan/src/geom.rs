//! Pure geometry over axis-aligned rectangles and room walls.
//!
//! Nothing here knows about entity kinds or the document store; callers pass
//! plain rectangles in whichever space they work in (display pixels during
//! gestures, real centimeters for the wire format). All functions are total
//! over finite input.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use crate::camera::Point;
use crate::consts::{DOOR_ON_WALL_TOLERANCE_CM, DOOR_THICKNESS_RATIO};

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Normalized rectangle spanned by two opposite corners.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Every coordinate multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            left: self.left * factor,
            top: self.top * factor,
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// Inclusive containment: points on the boundary are inside.
#[must_use]
pub fn point_in_rect(p: Point, r: &Rect) -> bool {
    p.x >= r.left && p.x <= r.right() && p.y >= r.top && p.y <= r.bottom()
}

/// Separating-axis overlap. Rectangles that only share an edge do not overlap.
#[must_use]
pub fn rect_overlap(a: &Rect, b: &Rect) -> bool {
    !(a.right() <= b.left || a.left >= b.right() || a.bottom() <= b.top || a.top >= b.bottom())
}

/// [`rect_overlap`] between two identified entities; an entity never
/// overlaps itself.
#[must_use]
pub fn entity_overlap<I: PartialEq>(a_id: &I, a: &Rect, b_id: &I, b: &Rect) -> bool {
    a_id != b_id && rect_overlap(a, b)
}

/// Corners of a `2hw × 2hh` rectangle rotated `angle` radians around
/// `center`, in TL, TR, BR, BL order of the unrotated shape.
#[must_use]
pub fn rotated_corners(center: Point, hw: f64, hh: f64, angle: f64) -> [Point; 4] {
    let (sin, cos) = angle.sin_cos();
    [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)].map(|(dx, dy)| {
        Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos)
    })
}

/// Fold any angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    if d >= 360.0 { 0.0 } else { d }
}

// =============================================================================
// WALLS
// =============================================================================

/// Direction a wall runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Which edge of a room a wall is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl WallSide {
    #[must_use]
    pub fn orientation(self) -> Orientation {
        match self {
            Self::Top | Self::Bottom => Orientation::Horizontal,
            Self::Left | Self::Right => Orientation::Vertical,
        }
    }
}

/// One edge of a room as a segment from `(x1, y1)` to `(x2, y2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub room_id: u32,
    pub side: WallSide,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Wall {
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.side.orientation()
    }
}

/// The four walls of a room: top, bottom, left, right.
#[must_use]
pub fn room_walls(room_id: u32, r: &Rect) -> [Wall; 4] {
    let (l, t, rt, b) = (r.left, r.top, r.right(), r.bottom());
    [
        Wall { room_id, side: WallSide::Top, x1: l, y1: t, x2: rt, y2: t },
        Wall { room_id, side: WallSide::Bottom, x1: l, y1: b, x2: rt, y2: b },
        Wall { room_id, side: WallSide::Left, x1: l, y1: t, x2: l, y2: b },
        Wall { room_id, side: WallSide::Right, x1: rt, y1: t, x2: rt, y2: b },
    ]
}

/// Thickness of a door, measured from its leading edge.
#[must_use]
pub fn door_thickness(door: &Rect) -> f64 {
    door.width * DOOR_THICKNESS_RATIO
}

/// Perpendicular distance from the door's leading edge to `wall`, or
/// infinity when the door is outside the wall's span.
#[must_use]
pub fn distance_to_wall(door: &Rect, wall: &Wall) -> f64 {
    let thickness = door_thickness(door);
    let lead_x = door.left + thickness / 2.0;
    let mid_y = door.top + door.height / 2.0;

    match wall.orientation() {
        Orientation::Horizontal if lead_x >= wall.x1 && lead_x <= wall.x2 => (mid_y - wall.y1).abs(),
        Orientation::Vertical if mid_y >= wall.y1 && mid_y <= wall.y2 => (lead_x - wall.x1).abs(),
        _ => f64::INFINITY,
    }
}

/// Closest room wall strictly under `threshold`. Ties keep the earlier wall.
#[must_use]
pub fn nearest_wall<I>(door: &Rect, rooms: I, threshold: f64) -> Option<Wall>
where
    I: IntoIterator<Item = (u32, Rect)>,
{
    let mut best: Option<Wall> = None;
    let mut best_distance = threshold;
    for (room_id, rect) in rooms {
        for wall in room_walls(room_id, &rect) {
            let distance = distance_to_wall(door, &wall);
            if distance < best_distance {
                best_distance = distance;
                best = Some(wall);
            }
        }
    }
    best
}

/// Where a door lands once snapped onto a wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorPlacement {
    pub left: f64,
    pub top: f64,
    pub rotation: f64,
}

/// Snap `door` onto `wall`.
///
/// Horizontal walls turn the door 90° and clamp it along the wall; vertical
/// walls keep it upright and clamp it vertically.
#[must_use]
pub fn align_door_to_wall(door: &Rect, wall: &Wall) -> DoorPlacement {
    let thickness = door_thickness(door);
    match wall.orientation() {
        Orientation::Horizontal => DoorPlacement {
            left: door.left.min(wall.x2 - thickness).max(wall.x1),
            top: wall.y1 - door.height / 2.0,
            rotation: 90.0,
        },
        Orientation::Vertical => DoorPlacement {
            left: wall.x1 - door.width / 2.0,
            top: door.top.min(wall.y2 - thickness).max(wall.y1),
            rotation: 0.0,
        },
    }
}

/// Whether `wall` is one of `room`'s edges: the wall coordinate lies within
/// `tolerance` of a matching room edge and `door_center` is inside the room's
/// extent along the wall.
#[must_use]
pub fn wall_belongs_to(wall: &Wall, room: &Rect, door_center: Point, tolerance: f64) -> bool {
    match wall.orientation() {
        Orientation::Horizontal => {
            let matches = (wall.y1 - room.top).abs() < tolerance || (wall.y1 - room.bottom()).abs() < tolerance;
            matches && door_center.x >= room.left && door_center.x <= room.right()
        }
        Orientation::Vertical => {
            let matches = (wall.x1 - room.left).abs() < tolerance || (wall.x1 - room.right()).abs() < tolerance;
            matches && door_center.y >= room.top && door_center.y <= room.bottom()
        }
    }
}

/// Whether a door (real cm) sits on one of `room`'s walls.
///
/// The door center must be within [`DOOR_ON_WALL_TOLERANCE_CM`] of an edge.
/// Along the wall the accepted range is widened by half the door width, on
/// the axis the door's rotation points along.
#[must_use]
pub fn door_on_room_wall(door: &Rect, rotation: f64, room: &Rect) -> bool {
    let tol = DOOR_ON_WALL_TOLERANCE_CM;
    let c = door.center();
    let half = door.width / 2.0;

    let on_horizontal = (c.y - room.top).abs() <= tol || (c.y - room.bottom()).abs() <= tol;
    let on_vertical = (c.x - room.left).abs() <= tol || (c.x - room.right()).abs() <= tol;

    let in_range = if is_quarter_turned(rotation) {
        c.x >= room.left - tol && c.x <= room.right() + tol && c.y >= room.top - half && c.y <= room.bottom() + half
    } else {
        c.x >= room.left - half && c.x <= room.right() + half && c.y >= room.top - tol && c.y <= room.bottom() + tol
    };

    (on_horizontal || on_vertical) && in_range
}

/// Which wall of `room` a door sits on for drawing purposes: strictly within
/// tolerance of the edge and inside the wall's span.
#[must_use]
pub fn door_wall_side(door: &Rect, room: &Rect) -> Option<WallSide> {
    let tol = DOOR_ON_WALL_TOLERANCE_CM;
    let c = door.center();
    let in_x = c.x >= room.left && c.x <= room.right();
    let in_y = c.y >= room.top && c.y <= room.bottom();

    if in_y && (c.x - room.left).abs() < tol {
        Some(WallSide::Left)
    } else if in_y && (c.x - room.right()).abs() < tol {
        Some(WallSide::Right)
    } else if in_x && (c.y - room.top).abs() < tol {
        Some(WallSide::Top)
    } else if in_x && (c.y - room.bottom()).abs() < tol {
        Some(WallSide::Bottom)
    } else {
        None
    }
}

/// True for rotations of exactly 90° or 270°.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn is_quarter_turned(rotation: f64) -> bool {
    let r = normalize_degrees(rotation);
    r == 90.0 || r == 270.0
}
