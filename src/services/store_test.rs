use super::*;
use serde_json::json;

// =============================================================================
// Helpers
// =============================================================================

/// A fresh, not yet created directory under the system temp dir.
fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("airibes-store-{:016x}", rand::random::<u64>()))
}

async fn file_store_with(files: &[(&str, Value)]) -> FileStore {
    let dir = temp_dir();
    tokio::fs::create_dir_all(&dir).await.unwrap();
    for (name, value) in files {
        tokio::fs::write(dir.join(name), value.to_string()).await.unwrap();
    }
    FileStore::new(dir)
}

async fn cleanup(store: &FileStore) {
    tokio::fs::remove_dir_all(store.dir()).await.unwrap();
}

fn stored_doc() -> Value {
    json!({ "rooms": [], "areas": [], "stickers": [], "devices": [], "nextRoomId": 4 })
}

// =============================================================================
// Keys and names
// =============================================================================

#[test]
fn keys_follow_apartment() {
    assert_eq!(floorplan_key("12"), "airibes_floorplan_12");
    assert_eq!(sender_key("12"), "airibes_floorplan_12_sender");
}

#[test]
fn radar_default_name_uses_last_four_chars() {
    assert_eq!(default_display_name("a1b2c3d4", DeviceKind::Radar), "Radar-C3D4");
    assert_eq!(default_display_name("ab", DeviceKind::Radar), "Radar-AB");
    assert_eq!(default_display_name("light.kitchen", DeviceKind::Light), "light.kitchen");
}

#[test]
fn listed_device_keeps_given_name() {
    let listed: ListedDevice =
        serde_json::from_value(json!({ "id": "a1b2c3d4", "type": "radar", "displayName": "Bedroom radar" })).unwrap();
    assert_eq!(DeviceEntry::from(listed).display_name, "Bedroom radar");

    let blank: ListedDevice = serde_json::from_value(json!({ "id": "a1b2c3d4", "type": "radar", "displayName": " " })).unwrap();
    assert_eq!(DeviceEntry::from(blank).display_name, "Radar-C3D4");
}

// =============================================================================
// InMemoryStore
// =============================================================================

#[tokio::test]
async fn memory_store_starts_empty() {
    let store = InMemoryStore::new();
    assert_eq!(store.load_floorplan("1").await.unwrap(), Value::Null);
    assert!(store.list_devices().await.unwrap().is_empty());
    assert_eq!(store.device_state("light.kitchen").await.unwrap(), None);
    assert!(store.sender_data("1").await.is_none());
}

#[tokio::test]
async fn memory_store_saves_per_apartment() {
    let store = InMemoryStore::new();
    store.save_floorplan("1", stored_doc(), SenderData::new()).await.unwrap();

    assert_eq!(store.load_floorplan("1").await.unwrap(), stored_doc());
    assert_eq!(store.load_floorplan("2").await.unwrap(), Value::Null);
    assert_eq!(store.sender_data("1").await, Some(SenderData::new()));
}

#[tokio::test]
async fn memory_store_reports_states() {
    let store = InMemoryStore::new();
    store.set_state("light.kitchen", "on").await;
    assert_eq!(store.device_state("light.kitchen").await.unwrap().as_deref(), Some("on"));
}

// =============================================================================
// FileStore
// =============================================================================

#[tokio::test]
async fn file_store_missing_files_are_empty() {
    let store = FileStore::new(temp_dir());
    assert_eq!(store.load_floorplan("1").await.unwrap(), Value::Null);
    assert!(store.list_devices().await.unwrap().is_empty());
    assert_eq!(store.device_state("light.kitchen").await.unwrap(), None);
}

#[tokio::test]
async fn file_store_save_then_load() {
    let store = FileStore::new(temp_dir());
    store.save_floorplan("7", stored_doc(), SenderData::new()).await.unwrap();

    assert_eq!(store.load_floorplan("7").await.unwrap(), stored_doc());
    let sender = tokio::fs::read_to_string(store.dir().join("airibes_floorplan_7_sender.json")).await.unwrap();
    assert_eq!(serde_json::from_str::<Value>(&sender).unwrap(), json!({}));
    assert!(!store.dir().join("airibes_floorplan_7.json.tmp").exists());

    cleanup(&store).await;
}

#[tokio::test]
async fn file_store_overwrites_previous_save() {
    let store = FileStore::new(temp_dir());
    store.save_floorplan("7", json!({ "nextRoomId": 2 }), SenderData::new()).await.unwrap();
    store.save_floorplan("7", json!({ "nextRoomId": 3 }), SenderData::new()).await.unwrap();

    assert_eq!(store.load_floorplan("7").await.unwrap()["nextRoomId"], 3);

    cleanup(&store).await;
}

#[tokio::test]
async fn file_store_lists_devices_with_names() {
    let devices = json!([
        { "id": "a1b2c3d4", "type": "radar" },
        { "id": "light.kitchen", "type": "light", "displayName": "Kitchen" },
    ]);
    let store = file_store_with(&[("devices.json", devices)]).await;

    let listed = store.list_devices().await.unwrap();
    assert_eq!(
        listed,
        vec![
            DeviceEntry { id: "a1b2c3d4".into(), kind: DeviceKind::Radar, display_name: "Radar-C3D4".into() },
            DeviceEntry { id: "light.kitchen".into(), kind: DeviceKind::Light, display_name: "Kitchen".into() },
        ]
    );

    cleanup(&store).await;
}

#[tokio::test]
async fn file_store_reads_states() {
    let store = file_store_with(&[("states.json", json!({ "light.kitchen": "off" }))]).await;
    assert_eq!(store.device_state("light.kitchen").await.unwrap().as_deref(), Some("off"));
    assert_eq!(store.device_state("light.hall").await.unwrap(), None);

    cleanup(&store).await;
}

#[tokio::test]
async fn file_store_rejects_malformed_json() {
    let store = file_store_with(&[]).await;
    tokio::fs::write(store.path(&floorplan_key("1")), "{ not json").await.unwrap();

    assert!(matches!(store.load_floorplan("1").await, Err(StoreError::Json(_))));

    cleanup(&store).await;
}
