use super::*;
use crate::doc::test_helpers::*;

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_default_is_select() {
    assert_eq!(Tool::default(), Tool::Select);
}

#[test]
fn tool_debug_format() {
    assert_eq!(format!("{:?}", Tool::Select), "Select");
    assert_eq!(format!("{:?}", Tool::DrawRoom), "DrawRoom");
}

// =============================================================
// PaletteItem
// =============================================================

#[test]
fn palette_items_compare_by_payload() {
    assert_eq!(PaletteItem::Area(AreaKind::Monitor), PaletteItem::Area(AreaKind::Monitor));
    assert_ne!(PaletteItem::Area(AreaKind::Monitor), PaletteItem::Area(AreaKind::Interference));
    assert_ne!(
        PaletteItem::Device { id: "A".into(), kind: DeviceKind::Radar },
        PaletteItem::Device { id: "B".into(), kind: DeviceKind::Radar }
    );
}

// =============================================================
// UiState
// =============================================================

#[test]
fn ui_state_default() {
    let ui = UiState::default();
    assert_eq!(ui.tool, Tool::Select);
    assert!(ui.selected.is_none());
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    let state = InputState::default();
    assert!(state.is_idle());
    assert!(state.original().is_none());
}

#[test]
fn drawing_has_no_original() {
    let state = InputState::DrawingRoom { anchor: Point::new(1.0, 2.0), current: Point::new(3.0, 4.0) };
    assert!(!state.is_idle());
    assert!(state.original().is_none());
}

#[test]
fn gestures_keep_their_original() {
    let orig = Entity::Room(room(1, 0.0, 0.0, 300.0, 300.0));
    let states = [
        InputState::Dragging {
            id: EntityId::Room(1),
            start: Point::new(0.0, 0.0),
            orig_display: Rect::new(0.0, 0.0, 240.0, 240.0),
            orig: orig.clone(),
        },
        InputState::Resizing { id: EntityId::Room(1), start: Point::new(0.0, 0.0), orig_w: 240.0, orig_h: 240.0, orig: orig.clone() },
        InputState::Rotating {
            id: EntityId::Room(1),
            center: Point::new(120.0, 120.0),
            start: Point::new(0.0, 0.0),
            orig_rotation: 0.0,
            orig: orig.clone(),
        },
    ];
    for state in &states {
        assert_eq!(state.original(), Some(&orig));
    }
}

// =============================================================
// DeviceEntry
// =============================================================

#[test]
fn device_entry_wire_shape() {
    let entry: DeviceEntry =
        serde_json::from_value(serde_json::json!({"id": "AB12", "type": "radar", "displayName": "Radar-AB12"})).unwrap();
    assert_eq!(entry.kind, DeviceKind::Radar);
    assert_eq!(entry.display_name, "Radar-AB12");
    assert_eq!(serde_json::to_value(&entry).unwrap()["displayName"], "Radar-AB12");
}
