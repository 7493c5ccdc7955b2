//! Floorplan storage: the stored document, compiled sender data and the
//! host's device registry.
//!
//! DESIGN
//! ======
//! Each apartment's floorplan lives under the key
//! `airibes_floorplan_<apartment>`; its compiled sender data lives beside it
//! under `<key>_sender`. The store treats both as opaque JSON. Decoding the
//! floorplan is the session's job.
//!
//! ERROR HANDLING
//! ==============
//! A key that was never written loads as `null` (an empty floorplan), a
//! missing device list is empty, and an unknown entity has no state. Only
//! I/O failures and unreadable JSON are errors.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use floorplan::doc::DeviceKind;
use floorplan::input::DeviceEntry;
use floorplan::sender::SenderData;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored json is invalid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// COLLABORATOR TRAIT
// =============================================================================

/// Persistence and host-registry collaborator for an editor session.
#[async_trait::async_trait]
pub trait FloorplanStore: Send + Sync {
    /// The stored floorplan document, or `null` if none was saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the document cannot be read.
    async fn load_floorplan(&self, apartment_id: &str) -> Result<Value, StoreError>;

    /// Store the floorplan document and its compiled sender data together.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if either cannot be written.
    async fn save_floorplan(&self, apartment_id: &str, data: Value, sender: SenderData) -> Result<(), StoreError>;

    /// Devices the host offers for placement.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the registry cannot be read.
    async fn list_devices(&self) -> Result<Vec<DeviceEntry>, StoreError>;

    /// Current state string of a host entity, if the host knows it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the state table cannot be read.
    async fn device_state(&self, entity_id: &str) -> Result<Option<String>, StoreError>;
}

#[must_use]
pub fn floorplan_key(apartment_id: &str) -> String {
    format!("airibes_floorplan_{apartment_id}")
}

#[must_use]
pub fn sender_key(apartment_id: &str) -> String {
    format!("{}_sender", floorplan_key(apartment_id))
}

// =============================================================================
// DEVICE REGISTRY
// =============================================================================

/// A registry entry as the host lists it; the display name is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListedDevice {
    id: String,
    #[serde(rename = "type")]
    kind: DeviceKind,
    #[serde(default)]
    display_name: Option<String>,
}

/// Name shown for a device the host did not name: radars are labelled by
/// the last four characters of their id.
#[must_use]
pub fn default_display_name(id: &str, kind: DeviceKind) -> String {
    match kind {
        DeviceKind::Radar => {
            let start = id.char_indices().rev().nth(3).map_or(0, |(i, _)| i);
            format!("Radar-{}", id[start..].to_uppercase())
        }
        DeviceKind::Light | DeviceKind::Climate => id.to_string(),
    }
}

impl From<ListedDevice> for DeviceEntry {
    fn from(d: ListedDevice) -> Self {
        let display_name = d
            .display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| default_display_name(&d.id, d.kind));
        Self { id: d.id, kind: d.kind, display_name }
    }
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// Store kept entirely in memory. Used by tests and for ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    floorplans: RwLock<HashMap<String, Value>>,
    senders: RwLock<HashMap<String, SenderData>>,
    devices: RwLock<Vec<DeviceEntry>>,
    states: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_devices(devices: Vec<DeviceEntry>) -> Self {
        Self { devices: RwLock::new(devices), ..Self::default() }
    }

    pub async fn put_floorplan(&self, apartment_id: &str, data: Value) {
        self.floorplans.write().await.insert(floorplan_key(apartment_id), data);
    }

    pub async fn set_state(&self, entity_id: &str, state: &str) {
        self.states.write().await.insert(entity_id.to_string(), state.to_string());
    }

    /// Sender data from the last save of `apartment_id`.
    pub async fn sender_data(&self, apartment_id: &str) -> Option<SenderData> {
        self.senders.read().await.get(&sender_key(apartment_id)).cloned()
    }
}

#[async_trait::async_trait]
impl FloorplanStore for InMemoryStore {
    async fn load_floorplan(&self, apartment_id: &str) -> Result<Value, StoreError> {
        Ok(self.floorplans.read().await.get(&floorplan_key(apartment_id)).cloned().unwrap_or(Value::Null))
    }

    async fn save_floorplan(&self, apartment_id: &str, data: Value, sender: SenderData) -> Result<(), StoreError> {
        self.floorplans.write().await.insert(floorplan_key(apartment_id), data);
        self.senders.write().await.insert(sender_key(apartment_id), sender);
        Ok(())
    }

    async fn list_devices(&self) -> Result<Vec<DeviceEntry>, StoreError> {
        Ok(self.devices.read().await.clone())
    }

    async fn device_state(&self, entity_id: &str) -> Result<Option<String>, StoreError> {
        Ok(self.states.read().await.get(entity_id).cloned())
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// Store backed by JSON files in one directory.
///
/// | File | Contents |
/// |------|----------|
/// | `<key>.json` | stored floorplan document |
/// | `<key>_sender.json` | compiled sender data |
/// | `devices.json` | host device list: `[{id, type, displayName?}]` |
/// | `states.json` | host entity states: `{entity_id: state}` |
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Write through a temporary file so readers never see a partial document.
    async fn write_json<T: serde::Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let path = self.path(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(value)?).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

async fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "nothing stored yet");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

#[async_trait::async_trait]
impl FloorplanStore for FileStore {
    async fn load_floorplan(&self, apartment_id: &str) -> Result<Value, StoreError> {
        match read_optional(&self.path(&floorplan_key(apartment_id))).await? {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Ok(Value::Null),
        }
    }

    async fn save_floorplan(&self, apartment_id: &str, data: Value, sender: SenderData) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        self.write_json(&floorplan_key(apartment_id), &data).await?;
        self.write_json(&sender_key(apartment_id), &sender).await?;
        info!(apartment_id, radars = sender.len(), dir = %self.dir.display(), "floorplan written");
        Ok(())
    }

    async fn list_devices(&self) -> Result<Vec<DeviceEntry>, StoreError> {
        let Some(text) = read_optional(&self.path("devices")).await? else {
            return Ok(Vec::new());
        };
        let listed: Vec<ListedDevice> = serde_json::from_str(&text)?;
        Ok(listed.into_iter().map(DeviceEntry::from).collect())
    }

    async fn device_state(&self, entity_id: &str) -> Result<Option<String>, StoreError> {
        let Some(text) = read_optional(&self.path("states")).await? else {
            return Ok(None);
        };
        let mut states: HashMap<String, String> = serde_json::from_str(&text)?;
        Ok(states.remove(entity_id))
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
