//! Sender data: the per-radar wire format consumed by the radar firmware.
//!
//! One record is produced for every listed radar placed inside a room. Each
//! record carries the room outline, the valid monitor/interference areas and
//! doors of that room as detection regions, and the furniture footprints, all
//! in whole millimeters.
//!
//! Compilation is pure over the store; only the version token varies
//! between runs.

#[cfg(test)]
#[path = "sender_test.rs"]
mod sender_test;

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::camera::{Point, to_millimeters};
use crate::catalog::paster_type;
use crate::consts::{DEFAULT_INSTALL_HEIGHT_MM, DOOR_REGION_ACROSS_CM, DOOR_REGION_ALONG_CM};
use crate::doc::{Area, AreaKind, Device, DeviceKind, DocStore, Room, Sticker};
use crate::geom::{Rect, is_quarter_turned, point_in_rect, rotated_corners};
use crate::input::DeviceEntry;
use crate::layout::doors_on_room_walls;
use crate::status::DeviceStates;

/// Region attribute codes.
pub const ATTR_INTERFERENCE: u8 = 1;
pub const ATTR_DOOR: u8 = 2;
pub const ATTR_MONITOR: u8 = 4;

/// A point in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MmPoint {
    pub x: i64,
    pub y: i64,
}

impl MmPoint {
    #[must_use]
    pub fn from_cm(p: Point) -> Self {
        Self { x: to_millimeters(p.x), y: to_millimeters(p.y) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Radar {
    pub position: Position,
    /// Firmware heading in degrees.
    pub angle: i64,
    pub install_angle: u8,
}

/// A detection region: an area or a door opening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    #[serde(rename = "area-attribute")]
    pub attribute: u8,
    #[serde(rename = "area-type")]
    pub area_type: u8,
    #[serde(rename = "area-id")]
    pub area_id: u32,
    #[serde(rename = "area-sensitivity")]
    pub sensitivity: u8,
    pub points: [MmPoint; 4],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Furniture {
    #[serde(rename = "paster-type")]
    pub paster_type: u8,
    /// 1-based position among the room's furniture.
    #[serde(rename = "paster-id")]
    pub paster_id: usize,
    pub points: [MmPoint; 4],
}

/// Everything one radar needs to know about its room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderRecord {
    pub version: String,
    pub room_id: u32,
    pub apartment_id: String,
    pub radar: Radar,
    #[serde(rename = "roomRegion")]
    pub room_region: [MmPoint; 4],
    pub region: Vec<Region>,
    pub furniture: Vec<Furniture>,
}

/// Sender data for a whole floorplan, keyed by radar device id.
pub type SenderData = BTreeMap<String, SenderRecord>;

/// `HASS_<6 digits>_<apartment>_<unix seconds>`.
#[must_use]
pub fn version_token(code: u32, apartment_id: &str, unix_secs: i64) -> String {
    format!("HASS_{:06}_{apartment_id}_{unix_secs}", code % 1_000_000)
}

/// A fresh version token stamped with the current time.
#[must_use]
pub fn fresh_version(apartment_id: &str) -> String {
    let code = rand::rng().random_range(0..1_000_000);
    let now = time::OffsetDateTime::now_utc().unix_timestamp();
    version_token(code, apartment_id, now)
}

/// Firmware heading for a device rotation.
///
/// 0° → -90, 90° → -180, 180° → 90, 270° → 0.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn radar_angle(rotation: f64) -> i64 {
    let mut angle = (-90.0 - rotation.round()) % 360.0;
    if angle <= -360.0 {
        angle += 360.0;
    } else if angle > 360.0 {
        angle -= 360.0;
    }
    if angle <= -270.0 {
        angle += 360.0;
    }
    angle as i64
}

fn axis_corners(r: &Rect) -> [MmPoint; 4] {
    [
        Point::new(r.left, r.top),
        Point::new(r.right(), r.top),
        Point::new(r.right(), r.bottom()),
        Point::new(r.left, r.bottom()),
    ]
    .map(MmPoint::from_cm)
}

fn area_region(area: &Area) -> Region {
    Region {
        attribute: match area.kind {
            AreaKind::Monitor => ATTR_MONITOR,
            AreaKind::Interference => ATTR_INTERFERENCE,
        },
        area_type: area.area_type.code(),
        area_id: area.id,
        sensitivity: 1,
        points: axis_corners(&area.geom.rect()),
    }
}

/// Door opening inflated across and along the wall, centered on the door.
fn door_region(door: &Sticker) -> Region {
    let g = &door.geom;
    let (w, h) = if is_quarter_turned(g.rotation) {
        (g.height + DOOR_REGION_ACROSS_CM, g.width + DOOR_REGION_ALONG_CM)
    } else {
        (g.width + DOOR_REGION_ALONG_CM, g.height + DOOR_REGION_ACROSS_CM)
    };
    let c = g.center();
    Region {
        attribute: ATTR_DOOR,
        area_type: 0,
        area_id: door.id,
        sensitivity: 1,
        points: axis_corners(&Rect::new(c.x - w / 2.0, c.y - h / 2.0, w, h)),
    }
}

fn furniture(index: usize, sticker: &Sticker) -> Furniture {
    let g = &sticker.geom;
    let corners = rotated_corners(g.center(), g.width / 2.0, g.height / 2.0, g.rotation.to_radians());
    Furniture {
        paster_type: paster_type(sticker.kind.as_str()),
        paster_id: index + 1,
        points: corners.map(MmPoint::from_cm),
    }
}

/// Build the record for `radar` inside `room`.
#[must_use]
pub fn compile_record(doc: &DocStore, radar: &Device, room: &Room, apartment_id: &str, version: String) -> SenderRecord {
    let room_rect = room.geom.rect();
    let contains = |p: Point| point_in_rect(p, &room_rect);

    let areas = doc
        .areas()
        .iter()
        .filter(|a| a.is_valid && contains(a.geom.center()))
        .map(area_region);
    let doors = doors_on_room_walls(doc, room_rect)
        .filter(|d| d.is_valid)
        .map(door_region);

    let furniture = doc
        .stickers()
        .iter()
        .filter(|s| !s.kind.is_door() && contains(s.geom.center()))
        .enumerate()
        .map(|(i, s)| furniture(i, s))
        .collect();

    let z = match to_millimeters(radar.install_height) {
        0 => DEFAULT_INSTALL_HEIGHT_MM,
        z => z,
    };

    SenderRecord {
        version,
        room_id: room.id,
        apartment_id: apartment_id.to_string(),
        radar: Radar {
            position: Position { x: to_millimeters(radar.left), y: to_millimeters(radar.top), z },
            angle: radar_angle(radar.rotation),
            install_angle: radar.install_angle,
        },
        room_region: axis_corners(&room_rect),
        region: areas.chain(doors).collect(),
        furniture,
    }
}

/// Compile sender data for every radar inside a room.
///
/// Only radars present in the host's device list `listed` get a record.
/// Radars outside every room, and radars the host reports as unavailable,
/// are skipped too. `version` is called once per record.
pub fn compile(
    doc: &DocStore,
    states: &DeviceStates,
    listed: &[DeviceEntry],
    apartment_id: &str,
    mut version: impl FnMut() -> String,
) -> SenderData {
    let mut out = SenderData::new();
    for radar in doc.devices().iter().filter(|d| d.kind == DeviceKind::Radar) {
        if !listed.iter().any(|entry| entry.id == radar.id) {
            debug!(device_id = %radar.id, "radar missing from device list skipped");
            continue;
        }
        if states.is_unavailable(radar) {
            debug!(device_id = %radar.id, "unavailable radar skipped");
            continue;
        }
        let Some(room) = doc.room_containing(radar.center()) else {
            debug!(device_id = %radar.id, "radar outside every room skipped");
            continue;
        };
        out.insert(radar.id.clone(), compile_record(doc, radar, room, apartment_id, version()));
    }
    out
}
