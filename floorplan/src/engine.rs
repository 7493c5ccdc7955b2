//! The editor: pointer gestures, palette drops and edits over one floorplan.
//!
//! [`Editor`] owns the document, the editor camera and the gesture state
//! machine. Every handler returns the [`Action`]s the host must carry out:
//! persist a created/updated/deleted entity, show a notice, or redraw.
//!
//! Gestures are measured in display pixels. While a gesture is in flight the
//! entity in the store already reflects the pointer (so a redraw shows it);
//! release reports the final entity, and pointer-leave puts back the entity
//! captured at pointer-down.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::debug;

use crate::camera::{Camera, Point};
use crate::catalog::AreaType;
use crate::doc::{AreaId, AreaKind, DocStore, Entity, EntityId, RoomId, Snapshot};
use crate::geom::Rect;
use crate::hit::{HitPart, hit_test};
use crate::input::{DeviceEntry, InputState, PaletteItem, Tool, UiState};
use crate::layout::{
    Notice, align_to_rooms, area_at, area_drop_refused, check_area, clamp_to_canvas, device_at, min_size_cm,
    new_room, resized, room_from_corners, rotation_from_drag, snap_door, sticker_at,
};
use crate::scene::{PersonOverlay, PersonPositions};
use crate::status::DeviceStates;

/// Default canvas side in real cm.
pub const DEFAULT_CANVAS_CM: f64 = 1000.0;

/// Default canvas side in display px.
pub const DEFAULT_VIEWPORT_PX: f64 = 800.0;

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ObjectCreated(Entity),
    ObjectUpdated(Entity),
    ObjectDeleted(EntityId),
    Notice(Notice),
    SetCursor(String),
    RenderNeeded,
}

/// Optional changes to an area from its edit dialog.
#[derive(Debug, Clone, Default)]
pub struct AreaEdit {
    pub name: Option<String>,
    pub color: Option<String>,
    /// Ignored for interference areas.
    pub area_type: Option<AreaType>,
    pub report_events: Option<bool>,
    pub visible: Option<bool>,
}

/// Optional changes to a placed device.
#[derive(Debug, Clone, Default)]
pub struct DeviceEdit {
    /// Mounting height in cm.
    pub install_height: Option<f64>,
    /// Mounting orientation code; values above 3 are ignored.
    pub install_angle: Option<u8>,
    pub visible: Option<bool>,
}

/// Highest accepted install angle code.
const MAX_INSTALL_ANGLE: u8 = 3;

/// Editor state for one open floorplan.
#[derive(Debug)]
pub struct Editor {
    pub doc: DocStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    /// Canvas side length in real cm.
    pub canvas_cm: f64,
    /// Devices the host offers for placement.
    pub devices: Vec<DeviceEntry>,
    pub states: DeviceStates,
    pub people: PersonOverlay,
}

impl Default for Editor {
    fn default() -> Self {
        Self {
            doc: DocStore::new(),
            camera: Camera::with_scale(DEFAULT_VIEWPORT_PX / DEFAULT_CANVAS_CM),
            ui: UiState::default(),
            input: InputState::default(),
            canvas_cm: DEFAULT_CANVAS_CM,
            devices: Vec::new(),
            states: DeviceStates::new(),
            people: PersonOverlay::new(),
        }
    }
}

impl Editor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Canvas ---

    /// Resize the canvas: `canvas_cm` of floor shown across `viewport_px`.
    /// Non-positive values are ignored.
    pub fn set_canvas(&mut self, canvas_cm: f64, viewport_px: f64) -> Vec<Action> {
        if canvas_cm <= 0.0 || viewport_px <= 0.0 {
            debug!(canvas_cm, viewport_px, "degenerate canvas ignored");
            return Vec::new();
        }
        self.canvas_cm = canvas_cm;
        self.camera = Camera::with_scale(viewport_px / canvas_cm);
        vec![Action::RenderNeeded]
    }

    /// Display pixels per real cm.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.camera.scale
    }

    /// Canvas side length in display px.
    #[must_use]
    pub fn canvas_px(&self) -> f64 {
        self.canvas_cm * self.scale()
    }

    // --- Data inputs ---

    /// Replace the whole floorplan. Any selection and gesture are dropped.
    pub fn load_snapshot(&mut self, snapshot: Snapshot) {
        self.doc.load_snapshot(snapshot);
        self.ui.selected = None;
        self.input = InputState::Idle;
    }

    /// Replace the list of placeable host devices.
    pub fn set_devices(&mut self, devices: Vec<DeviceEntry>) {
        self.devices = devices;
    }

    /// Record a host state change. Redraws only if the state changed.
    pub fn set_device_state(&mut self, entity_id: &str, state: &str) -> Vec<Action> {
        if self.states.set(entity_id, state) { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    /// Replace the person markers reported by one radar.
    pub fn set_person_positions(&mut self, push: PersonPositions) -> Vec<Action> {
        self.people.insert(push.device_id, push.positions);
        vec![Action::RenderNeeded]
    }

    /// Set the active tool. Switching tools abandons any gesture.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        let actions = self.on_pointer_leave();
        self.ui.tool = tool;
        actions
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> Option<&EntityId> {
        self.ui.selected.as_ref()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn entity(&self, id: &EntityId) -> Option<Entity> {
        self.doc.get(id)
    }

    /// Where an entity is drawn, in display px.
    #[must_use]
    pub fn display_rect(&self, id: &EntityId) -> Option<Rect> {
        self.doc.get(id).map(|e| e.rect().scaled(self.scale()))
    }

    /// The room outline being drawn, in display px.
    #[must_use]
    pub fn draft_room(&self) -> Option<Rect> {
        match self.input {
            InputState::DrawingRoom { anchor, current } => Some(Rect::from_corners(anchor, current)),
            _ => None,
        }
    }

    /// Host devices not yet placed on the floorplan.
    pub fn palette(&self) -> impl Iterator<Item = &DeviceEntry> {
        self.devices.iter().filter(|d| self.doc.device(&d.id).is_none())
    }

    // --- Pointer ---

    pub fn on_pointer_down(&mut self, screen_pt: Point) -> Vec<Action> {
        if self.ui.tool == Tool::DrawRoom {
            self.input = InputState::DrawingRoom { anchor: screen_pt, current: screen_pt };
            return vec![Action::SetCursor("crosshair".into()), Action::RenderNeeded];
        }

        let Some(hit) = hit_test(screen_pt, &self.doc, &self.camera, self.ui.selected.as_ref()) else {
            return if self.ui.selected.take().is_some() { vec![Action::RenderNeeded] } else { Vec::new() };
        };
        let Some(orig) = self.doc.get(&hit.id) else {
            return Vec::new();
        };

        let scale = self.scale();
        let display = orig.rect().scaled(scale);
        let (input, cursor) = match hit.part {
            HitPart::Body => (
                InputState::Dragging { id: hit.id.clone(), start: screen_pt, orig_display: display, orig },
                "move",
            ),
            HitPart::ResizeHandle => (
                InputState::Resizing {
                    id: hit.id.clone(),
                    start: screen_pt,
                    orig_w: display.width,
                    orig_h: display.height,
                    orig,
                },
                "nwse-resize",
            ),
            HitPart::RotateHandle => (
                InputState::Rotating {
                    id: hit.id.clone(),
                    center: self.camera.world_to_screen(orig.rect().center()),
                    start: screen_pt,
                    orig_rotation: orig.rotation(),
                    orig,
                },
                "grabbing",
            ),
        };
        self.input = input;
        self.ui.selected = Some(hit.id);
        vec![Action::SetCursor(cursor.into()), Action::RenderNeeded]
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        match self.input.clone() {
            InputState::Idle => Vec::new(),
            InputState::DrawingRoom { anchor, .. } => {
                self.input = InputState::DrawingRoom { anchor, current: screen_pt };
                vec![Action::RenderNeeded]
            }
            InputState::Dragging { id, start, orig_display, .. } => {
                let delta = Point::new(screen_pt.x - start.x, screen_pt.y - start.y);
                self.drag(&id, orig_display, delta)
            }
            InputState::Resizing { id, start, orig_w, orig_h, .. } => {
                self.resize(&id, orig_w, orig_h, screen_pt.x - start.x, screen_pt.y - start.y)
            }
            InputState::Rotating { id, center, start, orig_rotation, .. } => {
                let Some(mut entity) = self.doc.get(&id) else {
                    return Vec::new();
                };
                set_rotation(&mut entity, rotation_from_drag(center, start, screen_pt, orig_rotation));
                self.doc.insert(entity);
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::DrawingRoom { anchor, .. } => self.finish_room(anchor, screen_pt),
            InputState::Dragging { id, orig, .. }
            | InputState::Resizing { id, orig, .. }
            | InputState::Rotating { id, orig, .. } => {
                let mut actions = vec![Action::SetCursor("default".into())];
                if let Some(current) = self.doc.get(&id).filter(|current| *current != orig) {
                    actions.push(Action::ObjectUpdated(current));
                }
                actions.push(Action::RenderNeeded);
                actions
            }
        }
    }

    /// The pointer left the canvas: roll back the gesture in flight.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        let input = std::mem::take(&mut self.input);
        if input.is_idle() {
            return Vec::new();
        }
        if let Some(orig) = input.original() {
            debug!(id = ?orig.id(), "gesture cancelled, entity restored");
            self.doc.insert(orig.clone());
        }
        vec![Action::SetCursor("default".into()), Action::RenderNeeded]
    }

    // --- Palette ---

    /// Drop a palette item centered on `screen_pt`. Drops outside the canvas
    /// are ignored.
    pub fn drop_item(&mut self, item: PaletteItem, screen_pt: Point) -> Vec<Action> {
        let canvas = self.canvas_px();
        if screen_pt.x < 0.0 || screen_pt.y < 0.0 || screen_pt.x > canvas || screen_pt.y > canvas {
            debug!(x = screen_pt.x, y = screen_pt.y, "drop outside canvas ignored");
            return Vec::new();
        }
        let scale = self.scale();
        let entity = match item {
            PaletteItem::Area(kind) => {
                let center = self.camera.screen_to_world(screen_pt);
                if let Some(notice) = area_drop_refused(&self.doc, kind, center) {
                    return vec![Action::Notice(notice)];
                }
                let Some(id) = self.doc.allocate_area_id() else {
                    debug!("area ids exhausted");
                    return Vec::new();
                };
                let mut area = area_at(id, kind, screen_pt, scale);
                area.is_valid = check_area(&self.doc, &area).is_valid();
                Entity::Area(area)
            }
            PaletteItem::Sticker(kind) => {
                let Some(id) = self.doc.allocate_sticker_id() else {
                    return Vec::new();
                };
                let mut sticker = sticker_at(id, kind, screen_pt, scale);
                if kind.is_door() {
                    let snap = snap_door(&self.doc, id, &sticker.geom.rect().scaled(scale), scale);
                    if let Some(p) = snap.placement {
                        sticker.geom.left = p.left / scale;
                        sticker.geom.top = p.top / scale;
                        sticker.geom.rotation = p.rotation;
                    }
                    sticker.is_valid = snap.is_valid;
                }
                Entity::Sticker(sticker)
            }
            PaletteItem::Device { id, kind } => {
                if !self.devices.iter().any(|d| d.id == id) {
                    debug!(device_id = %id, "unknown device drop ignored");
                    return Vec::new();
                }
                if self.doc.device(&id).is_some() {
                    debug!(device_id = %id, "device already placed");
                    return Vec::new();
                }
                Entity::Device(device_at(&id, kind, screen_pt, scale))
            }
        };
        self.commit_new(entity)
    }

    // --- Edits ---

    /// Delete the selected entity.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        match self.ui.selected.take() {
            Some(id) => self.delete(&id),
            None => Vec::new(),
        }
    }

    /// Delete an entity and recycle its id.
    pub fn delete(&mut self, id: &EntityId) -> Vec<Action> {
        if self.ui.selected.as_ref() == Some(id) {
            self.ui.selected = None;
        }
        match self.doc.remove(id) {
            Some(_) => vec![Action::ObjectDeleted(id.clone()), Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    pub fn rename_room(&mut self, id: RoomId, name: &str) -> Vec<Action> {
        let Some(mut room) = self.doc.room(id).cloned() else {
            return Vec::new();
        };
        room.name = name.to_string();
        self.commit_update(Entity::Room(room))
    }

    /// Apply an area edit and revalidate the area.
    pub fn edit_area(&mut self, id: AreaId, edit: AreaEdit) -> Vec<Action> {
        let Some(mut area) = self.doc.area(id).cloned() else {
            return Vec::new();
        };
        if let Some(name) = edit.name {
            area.name = name;
        }
        if let Some(color) = edit.color {
            area.color = color;
        }
        if let Some(area_type) = edit.area_type {
            if area.kind == AreaKind::Monitor {
                area.area_type = area_type;
            }
        }
        if let Some(report) = edit.report_events {
            area.report_events = report;
        }
        if let Some(visible) = edit.visible {
            area.visible = visible;
        }
        area.is_valid = check_area(&self.doc, &area).is_valid();
        self.commit_update(Entity::Area(area))
    }

    pub fn edit_device(&mut self, id: &str, edit: DeviceEdit) -> Vec<Action> {
        let Some(mut device) = self.doc.device(id).cloned() else {
            return Vec::new();
        };
        if let Some(height) = edit.install_height {
            device.install_height = height.max(0.0);
        }
        match edit.install_angle {
            Some(angle) if angle <= MAX_INSTALL_ANGLE => device.install_angle = angle,
            Some(angle) => debug!(device_id = id, angle, "install angle out of range ignored"),
            None => {}
        }
        if let Some(visible) = edit.visible {
            device.visible = visible;
        }
        self.commit_update(Entity::Device(device))
    }

    // --- Internals ---

    fn commit_new(&mut self, entity: Entity) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Entity::Sticker(s) = &entity {
            if s.kind.is_door() && !s.is_valid {
                actions.push(Action::Notice(Notice::MaxDoors));
            }
        }
        self.ui.selected = Some(entity.id());
        self.doc.insert(entity.clone());
        actions.push(Action::ObjectCreated(entity));
        actions.push(Action::RenderNeeded);
        actions
    }

    fn commit_update(&mut self, entity: Entity) -> Vec<Action> {
        self.doc.insert(entity.clone());
        vec![Action::ObjectUpdated(entity), Action::RenderNeeded]
    }

    fn finish_room(&mut self, anchor: Point, end: Point) -> Vec<Action> {
        let mut actions = vec![Action::SetCursor("default".into())];
        match room_from_corners(anchor, end, self.scale()) {
            None => {}
            Some(rect) => match self.doc.allocate_room_id() {
                Some(id) => {
                    let room = Entity::Room(new_room(id, rect));
                    self.ui.selected = Some(room.id());
                    self.doc.insert(room.clone());
                    actions.push(Action::ObjectCreated(room));
                }
                None => actions.push(Action::Notice(Notice::RoomIdsExhausted)),
            },
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    fn drag(&mut self, id: &EntityId, orig_display: Rect, delta: Point) -> Vec<Action> {
        let Some(mut entity) = self.doc.get(id) else {
            return Vec::new();
        };
        let scale = self.scale();
        let canvas = self.canvas_px();
        let mut cand = Rect::new(
            orig_display.left + delta.x,
            orig_display.top + delta.y,
            orig_display.width,
            orig_display.height,
        );
        let tl = clamp_to_canvas(&cand, canvas, canvas);
        cand.left = tl.x;
        cand.top = tl.y;

        let mut actions = Vec::new();
        let mut snapped = false;
        if let Entity::Sticker(door) = &mut entity {
            if door.kind.is_door() {
                let snap = snap_door(&self.doc, door.id, &cand, scale);
                if let Some(p) = snap.placement {
                    cand.left = p.left;
                    cand.top = p.top;
                    door.geom.rotation = p.rotation;
                    snapped = true;
                }
                if door.is_valid && !snap.is_valid {
                    actions.push(Action::Notice(Notice::MaxDoors));
                }
                door.is_valid = snap.is_valid;
            }
        }

        if !snapped {
            let (align_x, align_y) = align_to_rooms(&self.doc, id, &cand, scale);
            if let Some(x) = align_x {
                cand.left = x.min(canvas - cand.width).max(0.0);
            }
            if let Some(y) = align_y {
                cand.top = y.min(canvas - cand.height).max(0.0);
            }
        }

        entity.move_to(cand.left / scale, cand.top / scale);
        if let Entity::Area(area) = &mut entity {
            let check = check_area(&self.doc, area);
            if area.is_valid && !check.is_valid() {
                actions.extend(check.notice().map(Action::Notice));
            }
            area.is_valid = check.is_valid();
        }
        self.doc.insert(entity);
        actions.push(Action::RenderNeeded);
        actions
    }

    fn resize(&mut self, id: &EntityId, orig_w: f64, orig_h: f64, dx: f64, dy: f64) -> Vec<Action> {
        let Some(mut entity) = self.doc.get(id) else {
            return Vec::new();
        };
        let Some(min_cm) = min_size_cm(&entity) else {
            return Vec::new();
        };
        let scale = self.scale();
        let (w, h) = resized(orig_w, orig_h, dx, dy, min_cm * scale);
        let (real_w, real_h) = ((w / scale).round().max(min_cm), (h / scale).round().max(min_cm));
        match &mut entity {
            Entity::Room(r) => {
                r.geom.width = real_w;
                r.geom.height = real_h;
            }
            Entity::Sticker(s) => {
                s.geom.width = real_w;
                s.geom.height = real_h;
            }
            Entity::Area(a) => {
                a.geom.width = real_w;
                a.geom.height = real_h;
                a.is_valid = check_area(&self.doc, a).is_valid();
            }
            Entity::Device(_) => {}
        }
        self.doc.insert(entity);
        vec![Action::RenderNeeded]
    }
}

fn set_rotation(entity: &mut Entity, rotation: f64) {
    match entity {
        Entity::Room(r) => r.geom.rotation = rotation,
        Entity::Area(a) => a.geom.rotation = rotation,
        Entity::Sticker(s) => s.geom.rotation = rotation,
        Entity::Device(d) => d.rotation = rotation,
    }
}
