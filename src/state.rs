//! Editor session: one open floorplan bound to its storage collaborator.
//!
//! DESIGN
//! ======
//! `EditorSession` is cheap to clone; clones share one [`Editor`] behind a
//! `tokio::sync::RwLock`. Pointer and palette handlers are synchronous and
//! run under the write lock through [`EditorSession::apply`]. Only loading,
//! saving and device refresh await the store, and none of them holds the
//! lock across a store call.
//!
//! ERROR HANDLING
//! ==============
//! A failed load or device refresh leaves the open floorplan exactly as it
//! was. A failed save leaves the editor untouched; the error is logged and
//! returned so the host can show it. Saves never queue: a save requested
//! while another is in flight is refused with [`SessionError::Busy`]; a save
//! whose future is dropped releases the busy flag.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use floorplan::codec::{self, CodecError};
use floorplan::engine::{Action, Editor};
use floorplan::scene::{self, PersonPositions, Scene};
use floorplan::sender::{self, SenderData};
use floorplan::status::state_entity_id;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::services::store::{FloorplanStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("floorplan storage failed: {0}")]
    Store(#[from] StoreError),
    #[error("stored floorplan is unreadable: {0}")]
    Codec(#[from] CodecError),
    #[error("a save is already in progress")]
    Busy,
}

// =============================================================================
// SESSION
// =============================================================================

/// Clears the busy flag when a save finishes or its future is dropped.
struct SaveGuard(Arc<AtomicBool>);

impl Drop for SaveGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Clone)]
pub struct EditorSession {
    store: Arc<dyn FloorplanStore>,
    apartment_id: String,
    editor: Arc<RwLock<Editor>>,
    saving: Arc<AtomicBool>,
}

impl EditorSession {
    #[must_use]
    pub fn new(store: Arc<dyn FloorplanStore>, apartment_id: impl Into<String>, editor: Editor) -> Self {
        Self {
            store,
            apartment_id: apartment_id.into(),
            editor: Arc::new(RwLock::new(editor)),
            saving: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn apartment_id(&self) -> &str {
        &self.apartment_id
    }

    /// Run a handler against the editor, e.g. a pointer event or an edit.
    pub async fn apply<R>(&self, f: impl FnOnce(&mut Editor) -> R) -> R {
        let mut editor = self.editor.write().await;
        f(&mut editor)
    }

    /// Read from the editor without changing it.
    pub async fn read<R>(&self, f: impl FnOnce(&Editor) -> R) -> R {
        let editor = self.editor.read().await;
        f(&editor)
    }

    // --- Persistence ---

    /// Replace the open floorplan with the stored one.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the store fails or the stored document is
    /// not a floorplan. The open floorplan is unchanged in that case.
    pub async fn load(&self) -> Result<(), SessionError> {
        let value = self.store.load_floorplan(&self.apartment_id).await.inspect_err(|e| {
            warn!(apartment_id = %self.apartment_id, error = %e, "floorplan load failed");
        })?;
        let snapshot = codec::decode_value(value).inspect_err(|e| {
            warn!(apartment_id = %self.apartment_id, error = %e, "stored floorplan rejected");
        })?;

        info!(
            apartment_id = %self.apartment_id,
            rooms = snapshot.rooms.len(),
            areas = snapshot.areas.len(),
            stickers = snapshot.stickers.len(),
            devices = snapshot.devices.len(),
            "floorplan loaded"
        );
        self.editor.write().await.load_snapshot(snapshot);
        Ok(())
    }

    /// Store the floorplan together with freshly compiled sender data.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Busy`] while another save is in flight, or the
    /// store/codec failure. The editor is never modified by a save.
    pub async fn save(&self) -> Result<(), SessionError> {
        if self.saving.swap(true, Ordering::AcqRel) {
            debug!(apartment_id = %self.apartment_id, "save already in flight");
            return Err(SessionError::Busy);
        }
        let _in_flight = SaveGuard(Arc::clone(&self.saving));
        let result = self.write_through().await;

        if let Err(e) = &result {
            warn!(apartment_id = %self.apartment_id, error = %e, "floorplan save failed");
        }
        result
    }

    async fn write_through(&self) -> Result<(), SessionError> {
        let (data, sender) = {
            let editor = self.editor.read().await;
            (codec::encode_value(&editor.doc)?, self.compile(&editor))
        };
        let radars = sender.len();
        self.store.save_floorplan(&self.apartment_id, data, sender).await?;
        info!(apartment_id = %self.apartment_id, radars, "floorplan saved");
        Ok(())
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }

    fn compile(&self, editor: &Editor) -> SenderData {
        sender::compile(&editor.doc, &editor.states, &editor.devices, &self.apartment_id, || {
            sender::fresh_version(&self.apartment_id)
        })
    }

    /// Sender data for the floorplan as it is now.
    pub async fn sender_data(&self) -> SenderData {
        let editor = self.editor.read().await;
        self.compile(&editor)
    }

    // --- Host inputs ---

    /// Refresh the placeable device list and the state of every listed or
    /// placed device.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] if any query fails; nothing is applied
    /// in that case.
    pub async fn refresh_devices(&self) -> Result<Vec<Action>, SessionError> {
        let devices = self.store.list_devices().await?;
        let entity_ids: BTreeSet<String> = {
            let editor = self.editor.read().await;
            devices
                .iter()
                .map(|d| state_entity_id(&d.id, d.kind))
                .chain(editor.doc.devices().iter().map(|d| state_entity_id(&d.id, d.kind)))
                .collect()
        };

        let mut states = Vec::new();
        for entity_id in entity_ids {
            if let Some(state) = self.store.device_state(&entity_id).await? {
                states.push((entity_id, state));
            }
        }

        debug!(devices = devices.len(), states = states.len(), "device registry refreshed");
        let mut editor = self.editor.write().await;
        editor.set_devices(devices);
        let mut actions: Vec<Action> =
            states.iter().flat_map(|(entity_id, state)| editor.set_device_state(entity_id, state)).collect();
        actions.dedup();
        Ok(actions)
    }

    /// Overlay the people one radar currently sees. Never persisted.
    pub async fn push_person_positions(&self, push: PersonPositions) -> Vec<Action> {
        self.editor.write().await.set_person_positions(push)
    }

    /// The read-only dashboard picture fitted into the viewport.
    pub async fn dashboard(&self, viewport_w: f64, viewport_h: f64) -> Scene {
        let editor = self.editor.read().await;
        scene::dashboard(&editor.doc, &editor.states, &editor.people, viewport_w, viewport_h)
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
