//! Live device states pushed by the host, and what they mean for the plan.

#[cfg(test)]
#[path = "status_test.rs"]
mod status_test;

use std::collections::HashMap;

use crate::doc::{Device, DeviceKind, DocStore, Room};
use crate::geom::point_in_rect;

/// Radar sensors report this when the device is online.
pub const RADAR_ONLINE: &str = "在线";

/// Host state string for an entity that cannot be reached.
pub const UNAVAILABLE: &str = "unavailable";

/// Floor tint of a room with at least one light on.
pub const FLOOR_LIT: &str = "#F5F5F5";
/// Floor tint of a room whose lights are all off.
pub const FLOOR_DARK: &str = "#E0E0E0";
/// Floor tint of a room without lights.
pub const FLOOR_PLAIN: &str = "#E8EAF6";

/// Host entity whose state describes `device`.
///
/// Radars are tracked through a derived sensor entity; lights and climate
/// devices are placed under their own entity id.
#[must_use]
pub fn state_entity_id(device_id: &str, kind: DeviceKind) -> String {
    match kind {
        DeviceKind::Radar => format!("sensor.airibes_radar_{}", device_id.to_lowercase()),
        DeviceKind::Light | DeviceKind::Climate => device_id.to_string(),
    }
}

/// Latest known state string per host entity id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceStates {
    states: HashMap<String, String>,
}

impl DeviceStates {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a state; returns true when it changed.
    pub fn set(&mut self, entity_id: impl Into<String>, state: impl Into<String>) -> bool {
        let state = state.into();
        let entry = self.states.entry(entity_id.into()).or_default();
        if *entry == state {
            return false;
        }
        *entry = state;
        true
    }

    #[must_use]
    pub fn get(&self, entity_id: &str) -> Option<&str> {
        self.states.get(entity_id).map(String::as_str)
    }

    /// State of the entity backing `device`.
    #[must_use]
    pub fn of(&self, device: &Device) -> Option<&str> {
        self.get(&state_entity_id(&device.id, device.kind))
    }

    /// Whether `device` counts as active: radar online, light on, climate running.
    #[must_use]
    pub fn is_active(&self, device: &Device) -> bool {
        match (device.kind, self.of(device)) {
            (DeviceKind::Radar, Some(s)) => s == RADAR_ONLINE || s == "online",
            (DeviceKind::Light, Some(s)) => s == "on",
            (DeviceKind::Climate, Some(s)) => matches!(s, "on" | "heat" | "cool"),
            (_, None) => false,
        }
    }

    /// A device is unavailable only when the host says so; no state yet is
    /// not the same as unreachable.
    #[must_use]
    pub fn is_unavailable(&self, device: &Device) -> bool {
        self.of(device) == Some(UNAVAILABLE)
    }

    /// Floor tint for `room` from the lights centered inside it.
    #[must_use]
    pub fn room_tint(&self, doc: &DocStore, room: &Room) -> &'static str {
        let rect = room.geom.rect();
        let mut lights = doc
            .devices()
            .iter()
            .filter(|d| d.kind == DeviceKind::Light && point_in_rect(d.center(), &rect))
            .peekable();
        if lights.peek().is_none() {
            return FLOOR_PLAIN;
        }
        if lights.any(|d| self.is_active(d)) { FLOOR_LIT } else { FLOOR_DARK }
    }
}
