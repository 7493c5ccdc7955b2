//! Persistence codec: the stored floorplan document.
//!
//! Entities are stored in real units together with the id counters and
//! recycle sets, so a reload allocates exactly what the previous session
//! would have. Display coordinates are never stored; the editor re-derives
//! them from the current scale after load.
//!
//! ERROR HANDLING
//! ==============
//! A document that is not a JSON object fails as a whole. Inside a valid
//! document, individual entries that fail to decode (an unknown sticker
//! type, a device of a kind this build does not know) are skipped with a
//! warning; the rest of the floorplan still loads.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::doc::{Area, Device, DeviceId, DocStore, Room, Snapshot, Sticker};
use crate::geom::point_in_rect;
use crate::ids::IdPool;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("invalid floorplan json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("floorplan document is not an object")]
    NotAnObject,
}

/// A room as stored, with the devices centered inside it at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRoom {
    #[serde(flatten)]
    pub room: Room,
    /// Derived on save; ignored on load.
    #[serde(default)]
    pub devices: Vec<DeviceId>,
}

/// The stored floorplan document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFloorplan {
    pub rooms: Vec<StoredRoom>,
    pub areas: Vec<Area>,
    pub stickers: Vec<Sticker>,
    pub devices: Vec<Device>,
    pub next_room_id: u32,
    pub next_area_id: u32,
    pub next_sticker_id: u32,
    pub available_room_ids: Vec<u32>,
    pub available_area_ids: Vec<u32>,
    pub available_sticker_ids: Vec<u32>,
}

/// Decode-side mirror of [`StoredFloorplan`] with lenient collections.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFloorplan {
    #[serde(default)]
    rooms: Vec<Value>,
    #[serde(default)]
    areas: Vec<Value>,
    #[serde(default)]
    stickers: Vec<Value>,
    #[serde(default)]
    devices: Vec<Value>,
    #[serde(default = "first_id")]
    next_room_id: u32,
    #[serde(default = "first_id")]
    next_area_id: u32,
    #[serde(default = "first_id")]
    next_sticker_id: u32,
    #[serde(default)]
    available_room_ids: Vec<u32>,
    #[serde(default)]
    available_area_ids: Vec<u32>,
    #[serde(default)]
    available_sticker_ids: Vec<u32>,
}

fn first_id() -> u32 {
    1
}

/// Build the stored document for the current floorplan.
///
/// Sticker and device anchors are rounded to whole cm; non-door stickers
/// are always stored as valid.
#[must_use]
pub fn encode(doc: &DocStore) -> StoredFloorplan {
    let rooms = doc
        .rooms()
        .iter()
        .map(|room| {
            let rect = room.geom.rect();
            StoredRoom {
                room: room.clone(),
                devices: doc
                    .devices()
                    .iter()
                    .filter(|d| point_in_rect(d.center(), &rect))
                    .map(|d| d.id.clone())
                    .collect(),
            }
        })
        .collect();

    let stickers = doc
        .stickers()
        .iter()
        .map(|s| {
            let mut s = s.clone();
            s.geom.left = s.geom.left.round();
            s.geom.top = s.geom.top.round();
            if !s.kind.is_door() {
                s.is_valid = true;
            }
            s
        })
        .collect();

    let devices = doc
        .devices()
        .iter()
        .map(|d| Device { left: d.left.round(), top: d.top.round(), ..d.clone() })
        .collect();

    StoredFloorplan {
        rooms,
        areas: doc.areas().to_vec(),
        stickers,
        devices,
        next_room_id: doc.room_ids().next(),
        next_area_id: doc.area_ids().next(),
        next_sticker_id: doc.sticker_ids().next(),
        available_room_ids: doc.room_ids().available(),
        available_area_ids: doc.area_ids().available(),
        available_sticker_ids: doc.sticker_ids().available(),
    }
}

/// Encode straight to a JSON value for the persistence collaborator.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails.
pub fn encode_value(doc: &DocStore) -> Result<Value, CodecError> {
    Ok(serde_json::to_value(encode(doc))?)
}

fn decode_each<T: DeserializeOwned>(values: Vec<Value>, what: &'static str) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|v| match serde_json::from_value::<T>(v) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(error = %e, what, "skipping undecodable entry");
                None
            }
        })
        .collect()
}

/// Decode a stored document. `null` is the empty floorplan.
///
/// # Errors
///
/// Returns [`CodecError`] if the document is not an object or its id
/// fields are malformed.
pub fn decode_value(value: Value) -> Result<Snapshot, CodecError> {
    match value {
        Value::Null => return Ok(Snapshot::default()),
        Value::Object(_) => {}
        _ => return Err(CodecError::NotAnObject),
    }
    let raw: RawFloorplan = serde_json::from_value(value)?;

    let rooms = decode_each::<StoredRoom>(raw.rooms, "room").into_iter().map(|r| r.room).collect();
    let defaults = Snapshot::default();
    Ok(Snapshot {
        rooms,
        areas: decode_each(raw.areas, "area"),
        stickers: decode_each(raw.stickers, "sticker"),
        devices: decode_each(raw.devices, "device"),
        room_ids: IdPool::restore(defaults.room_ids.policy(), raw.next_room_id, raw.available_room_ids),
        area_ids: IdPool::restore(defaults.area_ids.policy(), raw.next_area_id, raw.available_area_ids),
        sticker_ids: IdPool::restore(defaults.sticker_ids.policy(), raw.next_sticker_id, raw.available_sticker_ids),
    })
}

/// Decode a stored document from text.
///
/// # Errors
///
/// Returns [`CodecError`] on malformed JSON or a malformed document.
pub fn decode(text: &str) -> Result<Snapshot, CodecError> {
    decode_value(serde_json::from_str(text)?)
}
