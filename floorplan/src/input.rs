//! Input model: tools, palette items, and the gesture state machine.
//!
//! `Tool` and `PaletteItem` capture the user's intent at the time of a
//! pointer event or drop. `InputState` is the active gesture tracked between
//! pointer-down and pointer-up, carrying what is needed to compute deltas
//! and to restore the entity if the gesture is abandoned.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::catalog::StickerKind;
use crate::doc::{AreaKind, DeviceKind, Entity, EntityId};
use crate::geom::Rect;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Select, move, resize and rotate (default).
    #[default]
    Select,
    /// Draw a room by dragging between two corners.
    DrawRoom,
}

/// Something dragged from the palette onto the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteItem {
    Area(AreaKind),
    Sticker(StickerKind),
    Device { id: String, kind: DeviceKind },
}

/// A host device that can be placed, as listed by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    pub display_name: String,
}

/// Persistent UI state visible to the host.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// The currently selected entity, if any.
    pub selected: Option<EntityId>,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A new room is being drawn from `anchor` (display px).
    DrawingRoom { anchor: Point, current: Point },
    /// An entity is being moved.
    Dragging {
        id: EntityId,
        /// Pointer position at pointer-down, display px.
        start: Point,
        /// Entity rect at pointer-down, display px.
        orig_display: Rect,
        /// The entity as it was at pointer-down; restored on cancel.
        orig: Entity,
    },
    /// An entity is being resized from its bottom-right handle.
    Resizing {
        id: EntityId,
        start: Point,
        /// Display size at pointer-down.
        orig_w: f64,
        orig_h: f64,
        orig: Entity,
    },
    /// An entity is being turned around its center.
    Rotating {
        id: EntityId,
        /// Pivot in display px.
        center: Point,
        start: Point,
        orig_rotation: f64,
        orig: Entity,
    },
}

impl InputState {
    /// The entity snapshot taken when the gesture began, if any.
    #[must_use]
    pub fn original(&self) -> Option<&Entity> {
        match self {
            Self::Idle | Self::DrawingRoom { .. } => None,
            Self::Dragging { orig, .. } | Self::Resizing { orig, .. } | Self::Rotating { orig, .. } => Some(orig),
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
