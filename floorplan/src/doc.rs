//! Document model: rooms, areas, stickers and devices, and the in-memory store.
//!
//! Every entity keeps its geometry in real centimeters. Display positions are
//! derived from the camera on demand and never stored. Containment ("which
//! room is this in?") is recomputed from center points on every query; the
//! store holds no parent links, so deleting a room never cascades.
//!
//! Mutations replace whole entities. Collections are small (tens of items),
//! so lookups are linear scans over insertion-ordered vectors.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::catalog::{AreaType, StickerKind};
use crate::consts::DEVICE_SIZE_CM;
use crate::geom::{Rect, point_in_rect};
use crate::ids::IdPool;

pub type RoomId = u32;
pub type AreaId = u32;
pub type StickerId = u32;
/// Devices are keyed by their host entity id (e.g. `sensor.airibes_radar_ab12`).
pub type DeviceId = String;

// =============================================================================
// GEOMETRY
// =============================================================================

/// Position, size and rotation shared by rooms, areas and stickers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise degrees around the center.
    #[serde(default)]
    pub rotation: f64,
}

impl Geometry {
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.width, self.height)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.rect().center()
    }

    #[must_use]
    pub fn from_rect(r: Rect) -> Self {
        Self { left: r.left, top: r.top, width: r.width, height: r.height, rotation: 0.0 }
    }
}

// =============================================================================
// ENTITIES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
    #[default]
    Regular,
}

/// A drawn room. Always axis-aligned and at least 100 cm per side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    #[serde(rename = "type", default)]
    pub kind: RoomKind,
    pub name: String,
    #[serde(flatten)]
    pub geom: Geometry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Whether an area is watched for presence or masked out as interference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaKind {
    #[serde(rename = "monitor-area")]
    Monitor,
    #[serde(rename = "interference-source", alias = "interference-area")]
    Interference,
}

impl AreaKind {
    #[must_use]
    pub fn default_color(self) -> &'static str {
        match self {
            Self::Monitor => "#00ff00",
            Self::Interference => "#ff0000",
        }
    }

    #[must_use]
    pub fn default_name(self, id: AreaId) -> String {
        match self {
            Self::Monitor => format!("Monitor area {id}"),
            Self::Interference => format!("Interference area {id}"),
        }
    }
}

/// A rectangular monitor or interference region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: AreaId,
    #[serde(rename = "type")]
    pub kind: AreaKind,
    pub name: String,
    #[serde(flatten)]
    pub geom: Geometry,
    pub color: String,
    #[serde(default)]
    pub area_type: AreaType,
    #[serde(default)]
    pub report_events: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_true")]
    pub is_valid: bool,
}

/// A furniture or door marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sticker {
    pub id: StickerId,
    #[serde(rename = "type")]
    pub kind: StickerKind,
    #[serde(flatten)]
    pub geom: Geometry,
    /// Only doors can be invalid; every other sticker is always valid.
    #[serde(default = "default_true")]
    pub is_valid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Radar,
    Light,
    Climate,
}

/// A placed sensor or appliance. `left`/`top` are its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: DeviceId,
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    pub left: f64,
    pub top: f64,
    #[serde(default)]
    pub rotation: f64,
    /// Mounting height in cm; zero means unset.
    #[serde(default)]
    pub install_height: f64,
    /// Mounting orientation code, `0..=3`.
    #[serde(default)]
    pub install_angle: u8,
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl Device {
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Fixed footprint centered on the device.
    #[must_use]
    pub fn rect(&self) -> Rect {
        let half = DEVICE_SIZE_CM / 2.0;
        Rect::new(self.left - half, self.top - half, DEVICE_SIZE_CM, DEVICE_SIZE_CM)
    }
}

fn default_true() -> bool {
    true
}

/// Identifies one entity in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityId {
    Room(RoomId),
    Area(AreaId),
    Sticker(StickerId),
    Device(DeviceId),
}

/// Any entity, by value.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Room(Room),
    Area(Area),
    Sticker(Sticker),
    Device(Device),
}

impl Entity {
    #[must_use]
    pub fn id(&self) -> EntityId {
        match self {
            Self::Room(r) => EntityId::Room(r.id),
            Self::Area(a) => EntityId::Area(a.id),
            Self::Sticker(s) => EntityId::Sticker(s.id),
            Self::Device(d) => EntityId::Device(d.id.clone()),
        }
    }

    /// Real-space bounding rectangle before rotation.
    #[must_use]
    pub fn rect(&self) -> Rect {
        match self {
            Self::Room(r) => r.geom.rect(),
            Self::Area(a) => a.geom.rect(),
            Self::Sticker(s) => s.geom.rect(),
            Self::Device(d) => d.rect(),
        }
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        match self {
            Self::Room(r) => r.geom.rotation,
            Self::Area(a) => a.geom.rotation,
            Self::Sticker(s) => s.geom.rotation,
            Self::Device(d) => d.rotation,
        }
    }

    /// Move the entity so its bounding rectangle's top-left is `(left, top)`.
    pub fn move_to(&mut self, left: f64, top: f64) {
        match self {
            Self::Room(Room { geom, .. }) | Self::Area(Area { geom, .. }) | Self::Sticker(Sticker { geom, .. }) => {
                geom.left = left;
                geom.top = top;
            }
            Self::Device(d) => {
                let half = DEVICE_SIZE_CM / 2.0;
                d.left = left + half;
                d.top = top + half;
            }
        }
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Everything a floorplan consists of, as loaded from or saved to storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub rooms: Vec<Room>,
    pub areas: Vec<Area>,
    pub stickers: Vec<Sticker>,
    pub devices: Vec<Device>,
    pub room_ids: IdPool,
    pub area_ids: IdPool,
    pub sticker_ids: IdPool,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            rooms: Vec::new(),
            areas: Vec::new(),
            stickers: Vec::new(),
            devices: Vec::new(),
            room_ids: IdPool::rooms(),
            area_ids: IdPool::areas(),
            sticker_ids: IdPool::stickers(),
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

/// In-memory store of one floorplan.
#[derive(Debug, Clone)]
pub struct DocStore {
    rooms: Vec<Room>,
    areas: Vec<Area>,
    stickers: Vec<Sticker>,
    devices: Vec<Device>,
    room_ids: IdPool,
    area_ids: IdPool,
    sticker_ids: IdPool,
}

impl DocStore {
    /// Create an empty store with fresh id pools.
    #[must_use]
    pub fn new() -> Self {
        Self::from_snapshot(Snapshot::default())
    }

    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut store = Self {
            rooms: Vec::new(),
            areas: Vec::new(),
            stickers: Vec::new(),
            devices: Vec::new(),
            room_ids: IdPool::rooms(),
            area_ids: IdPool::areas(),
            sticker_ids: IdPool::stickers(),
        };
        store.load_snapshot(snapshot);
        store
    }

    /// Replace every collection and pool with `snapshot`.
    pub fn load_snapshot(&mut self, snapshot: Snapshot) {
        self.rooms.clear();
        self.areas.clear();
        self.stickers.clear();
        self.devices.clear();
        self.rooms.extend(snapshot.rooms);
        self.areas.extend(snapshot.areas);
        self.stickers.extend(snapshot.stickers);
        self.devices.extend(snapshot.devices);
        self.room_ids = snapshot.room_ids;
        self.area_ids = snapshot.area_ids;
        self.sticker_ids = snapshot.sticker_ids;
    }

    /// A copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            rooms: self.rooms.clone(),
            areas: self.areas.clone(),
            stickers: self.stickers.clone(),
            devices: self.devices.clone(),
            room_ids: self.room_ids.clone(),
            area_ids: self.area_ids.clone(),
            sticker_ids: self.sticker_ids.clone(),
        }
    }

    // --- Collections ---

    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    #[must_use]
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    #[must_use]
    pub fn stickers(&self) -> &[Sticker] {
        &self.stickers
    }

    #[must_use]
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    #[must_use]
    pub fn room_ids(&self) -> &IdPool {
        &self.room_ids
    }

    #[must_use]
    pub fn area_ids(&self) -> &IdPool {
        &self.area_ids
    }

    #[must_use]
    pub fn sticker_ids(&self) -> &IdPool {
        &self.sticker_ids
    }

    // --- Lookup ---

    #[must_use]
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn area(&self, id: AreaId) -> Option<&Area> {
        self.areas.iter().find(|a| a.id == id)
    }

    #[must_use]
    pub fn sticker(&self, id: StickerId) -> Option<&Sticker> {
        self.stickers.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn device(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    /// Clone out any entity by id.
    #[must_use]
    pub fn get(&self, id: &EntityId) -> Option<Entity> {
        match id {
            EntityId::Room(id) => self.room(*id).cloned().map(Entity::Room),
            EntityId::Area(id) => self.area(*id).cloned().map(Entity::Area),
            EntityId::Sticker(id) => self.sticker(*id).cloned().map(Entity::Sticker),
            EntityId::Device(id) => self.device(id).cloned().map(Entity::Device),
        }
    }

    /// First room whose rectangle contains `p`, inclusive of its edges.
    #[must_use]
    pub fn room_containing(&self, p: Point) -> Option<&Room> {
        self.rooms.iter().find(|r| point_in_rect(p, &r.geom.rect()))
    }

    // --- Mutation ---

    /// Insert an entity, replacing any existing entity with the same id.
    pub fn insert(&mut self, entity: Entity) {
        match entity {
            Entity::Room(room) => upsert(&mut self.rooms, room, |a, b| a.id == b.id),
            Entity::Area(area) => upsert(&mut self.areas, area, |a, b| a.id == b.id),
            Entity::Sticker(sticker) => upsert(&mut self.stickers, sticker, |a, b| a.id == b.id),
            Entity::Device(device) => upsert(&mut self.devices, device, |a, b| a.id == b.id),
        }
    }

    /// Remove an entity and recycle its id. Nothing else is touched.
    pub fn remove(&mut self, id: &EntityId) -> Option<Entity> {
        match id {
            EntityId::Room(id) => {
                let room = take(&mut self.rooms, |r| r.id == *id)?;
                self.room_ids.recycle(room.id);
                Some(Entity::Room(room))
            }
            EntityId::Area(id) => {
                let area = take(&mut self.areas, |a| a.id == *id)?;
                self.area_ids.recycle(area.id);
                Some(Entity::Area(area))
            }
            EntityId::Sticker(id) => {
                let sticker = take(&mut self.stickers, |s| s.id == *id)?;
                self.sticker_ids.recycle(sticker.id);
                Some(Entity::Sticker(sticker))
            }
            EntityId::Device(id) => take(&mut self.devices, |d| d.id == *id).map(Entity::Device),
        }
    }

    // --- Ids ---

    /// Next room id, or `None` when all 100 are taken.
    pub fn allocate_room_id(&mut self) -> Option<RoomId> {
        let live: BTreeSet<u32> = self.rooms.iter().map(|r| r.id).collect();
        self.room_ids.allocate(&live)
    }

    pub fn allocate_area_id(&mut self) -> Option<AreaId> {
        let live: BTreeSet<u32> = self.areas.iter().map(|a| a.id).collect();
        self.area_ids.allocate(&live)
    }

    pub fn allocate_sticker_id(&mut self) -> Option<StickerId> {
        let live: BTreeSet<u32> = self.stickers.iter().map(|s| s.id).collect();
        self.sticker_ids.allocate(&live)
    }

    // --- Size ---

    /// Total number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len() + self.areas.len() + self.stickers.len() + self.devices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DocStore {
    fn default() -> Self {
        Self::new()
    }
}

fn upsert<T>(items: &mut Vec<T>, item: T, same: impl Fn(&T, &T) -> bool) {
    if let Some(slot) = items.iter_mut().find(|existing| same(existing, &item)) {
        *slot = item;
    } else {
        items.push(item);
    }
}

fn take<T>(items: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> Option<T> {
    let index = items.iter().position(pred)?;
    Some(items.remove(index))
}

// =============================================================================
// TEST HELPERS
// =============================================================================
