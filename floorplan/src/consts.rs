//! Shared numeric constants for the floorplan crate.
//!
//! Lengths suffixed `_CM` are real centimeters; `_PX` are display pixels.

// ── Units ───────────────────────────────────────────────────────

/// Millimeters per centimeter, used by the radar wire format.
pub const MM_PER_CM: f64 = 10.0;

/// Blank margin around a fitted floorplan, per side.
pub const FIT_PADDING_PX: f64 = 40.0;

// ── Minimum sizes ───────────────────────────────────────────────

/// Smallest room that may be drawn or resized to, per side.
pub const MIN_ROOM_CM: f64 = 100.0;

/// Smallest area after a resize, per side.
pub const MIN_AREA_CM: f64 = 50.0;

/// Smallest sticker after a resize, per side.
pub const MIN_STICKER_CM: f64 = 10.0;

// ── Default footprints ──────────────────────────────────────────

/// Side of a freshly dropped area.
pub const DEFAULT_AREA_CM: f64 = 100.0;

/// Fixed footprint side of every device.
pub const DEVICE_SIZE_CM: f64 = 10.0;

// ── Capacities ──────────────────────────────────────────────────

/// Valid monitor areas allowed inside a single room.
pub const MAX_MONITOR_AREAS_PER_ROOM: usize = 30;

/// Valid doors allowed on the walls of a single room.
pub const MAX_DOORS_PER_ROOM: usize = 5;

// ── Snapping ────────────────────────────────────────────────────

/// Distance under which a dragged door snaps onto a wall.
pub const DOOR_SNAP_PX: f64 = 20.0;

/// Distance under which a dragged element aligns with a sibling room.
pub const ALIGN_SNAP_PX: f64 = 5.0;

/// Door thickness as a fraction of its display width.
pub const DOOR_THICKNESS_RATIO: f64 = 0.4;

/// A wall belongs to a room when its coordinate is this close to a room edge.
pub const WALL_OWNER_TOLERANCE_CM: f64 = 10.0;

/// Door-center distance from a room edge still counted as on that wall.
pub const DOOR_ON_WALL_TOLERANCE_CM: f64 = 5.0;

// ── Scene ───────────────────────────────────────────────────────

/// Stroke width of an exterior wall.
pub const WALL_THICKNESS_PX: f64 = 8.0;

/// Facing edges closer than this are treated as one shared wall.
pub const SHARED_WALL_EPSILON_CM: f64 = 1.0;

// ── Sender data ─────────────────────────────────────────────────

/// Mounting height reported when a radar has none configured.
pub const DEFAULT_INSTALL_HEIGHT_MM: i64 = 1600;

/// Door region inflation along the wall.
pub const DOOR_REGION_ALONG_CM: f64 = 100.0;

/// Door region inflation across the wall.
pub const DOOR_REGION_ACROSS_CM: f64 = 10.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for the resize and rotate handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Distance above the bounding box to the rotate handle, in screen pixels.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 24.0;
